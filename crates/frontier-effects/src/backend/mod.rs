//! Off-ledger backend handler.

mod http;

pub use http::{GrantResponse, HttpBackendHandler, PlayerAddressBody};
