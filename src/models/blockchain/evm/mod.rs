//! EVM log, receipt and transaction data structures.

mod receipt;
mod transaction;

pub use receipt::{
	BaseLog as EVMReceiptLog, BaseReceipt as EVMBaseReceipt,
	TransactionReceipt as EVMTransactionReceipt,
};
pub use transaction::{BaseTransaction as EVMBaseTransaction, Transaction as EVMTransaction};
