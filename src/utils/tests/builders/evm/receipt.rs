use crate::{
	models::{EVMBaseReceipt, EVMReceiptLog, EVMTransactionReceipt},
	services::signature::DecodedShape,
};
use alloy::{
	core::dyn_abi::DynSolValue,
	primitives::{keccak256, Address, Bytes, B256, U256, U64},
};

/// A builder for creating test EVM logs.
///
/// With [`event`](Self::event) and [`args`](Self::args) the topics and data
/// are ABI-encoded the way a contract would emit them.
#[derive(Debug, Default)]
pub struct LogBuilder {
	address: Option<Address>,
	event: Option<DecodedShape>,
	args: Vec<DynSolValue>,
	topics: Option<Vec<B256>>,
	data: Option<Bytes>,
	transaction_hash: Option<B256>,
	block_number: Option<u64>,
	log_index: Option<u64>,
	removed: Option<bool>,
}

impl LogBuilder {
	/// Creates a new LogBuilder instance.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the emitting contract.
	pub fn address(mut self, address: Address) -> Self {
		self.address = Some(address);
		self
	}

	/// Sets the event layout used to encode the arguments.
	pub fn event(mut self, event: &DecodedShape) -> Self {
		self.event = Some(event.clone());
		self
	}

	/// Sets the event arguments in declaration order.
	pub fn args(mut self, args: Vec<DynSolValue>) -> Self {
		self.args = args;
		self
	}

	/// Overrides the encoded topics.
	pub fn topics(mut self, topics: Vec<B256>) -> Self {
		self.topics = Some(topics);
		self
	}

	/// Overrides the encoded data.
	pub fn data(mut self, data: impl Into<Bytes>) -> Self {
		self.data = Some(data.into());
		self
	}

	pub fn transaction_hash(mut self, transaction_hash: B256) -> Self {
		self.transaction_hash = Some(transaction_hash);
		self
	}

	pub fn block_number(mut self, block_number: u64) -> Self {
		self.block_number = Some(block_number);
		self
	}

	pub fn log_index(mut self, log_index: u64) -> Self {
		self.log_index = Some(log_index);
		self
	}

	/// Marks the log as removed by a reorg.
	pub fn removed(mut self, removed: bool) -> Self {
		self.removed = Some(removed);
		self
	}

	/// Builds the log instance.
	pub fn build(self) -> EVMReceiptLog {
		let (topics, data) = match &self.event {
			Some(DecodedShape::Event(event)) => {
				let mut topics = vec![event.selector()];
				let mut body = Vec::new();
				for (param, value) in event.inputs.iter().zip(self.args) {
					if param.indexed {
						topics.push(
							value
								.as_word()
								.unwrap_or_else(|| keccak256(value.abi_encode_packed())),
						);
					} else {
						body.push(value);
					}
				}
				let data = if body.is_empty() {
					Bytes::new()
				} else {
					Bytes::from(DynSolValue::Tuple(body).abi_encode_params())
				};
				(topics, data)
			}
			_ => (Vec::new(), Bytes::new()),
		};

		EVMReceiptLog {
			address: self.address.unwrap_or_default(),
			topics: self.topics.unwrap_or(topics),
			data: self.data.unwrap_or(data),
			transaction_hash: self.transaction_hash,
			block_number: self.block_number.map(U64::from),
			log_index: self.log_index.map(U256::from),
			removed: self.removed,
			..Default::default()
		}
	}
}

/// A builder for creating test EVM transaction receipts with default values.
#[derive(Debug, Default)]
pub struct ReceiptBuilder {
	transaction_hash: Option<B256>,
	status: Option<bool>,
	logs: Option<Vec<EVMReceiptLog>>,
	from: Option<Address>,
	to: Option<Address>,
	block_number: Option<u64>,
}

impl ReceiptBuilder {
	/// Creates a new ReceiptBuilder instance.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the transaction hash of the receipt.
	pub fn transaction_hash(mut self, transaction_hash: B256) -> Self {
		self.transaction_hash = Some(transaction_hash);
		self
	}

	/// Sets the status of the transaction. Default is success.
	pub fn status(mut self, status: bool) -> Self {
		self.status = Some(status);
		self
	}

	/// Sets the logs associated with the transaction.
	pub fn logs(mut self, logs: Vec<EVMReceiptLog>) -> Self {
		self.logs = Some(logs);
		self
	}

	/// Sets the sender address of the transaction.
	pub fn from(mut self, from: Address) -> Self {
		self.from = Some(from);
		self
	}

	/// Sets the recipient address of the transaction
	pub fn to(mut self, to: Address) -> Self {
		self.to = Some(to);
		self
	}

	pub fn block_number(mut self, block_number: u64) -> Self {
		self.block_number = Some(block_number);
		self
	}

	/// Builds the TransactionReceipt instance.
	pub fn build(self) -> EVMTransactionReceipt {
		let status = if self.status.unwrap_or(true) {
			U64::from(1)
		} else {
			U64::ZERO
		};

		EVMTransactionReceipt::from(EVMBaseReceipt {
			transaction_hash: self.transaction_hash.unwrap_or_default(),
			block_number: self.block_number.map(U64::from),
			from: self.from.unwrap_or_default(),
			to: self.to,
			logs: self.logs.unwrap_or_default(),
			status: Some(status),
		})
	}
}
