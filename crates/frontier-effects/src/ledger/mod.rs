//! Ledger JSON-RPC handler.

pub mod jsonrpc;
mod rpc;

pub use rpc::RpcLedgerHandler;
