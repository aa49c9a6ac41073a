//! Game program handler and transaction sources.

mod presigned;
mod rpc;

pub use presigned::PresignedTransactionSource;
pub use rpc::RpcGameProgramHandler;
