//! Canonical transaction records.

use alloy_primitives::{Address, Bytes, U256};
use serde::{Serialize, Serializer};

/// How a multisig executes a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Operation {
    /// Regular call
    #[default]
    Call = 0,
    /// Delegate call, executing the target's code in the multisig's context
    DelegateCall = 1,
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// A ready-to-submit transaction. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    to: Address,
    value: U256,
    data: Bytes,
    operation: Operation,
}

impl TransactionRecord {
    /// Target address.
    pub fn to(&self) -> Address {
        self.to
    }

    /// Wei attached to the call.
    pub fn value(&self) -> U256 {
        self.value
    }

    /// Call data.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Execution mode.
    pub fn operation(&self) -> Operation {
        self.operation
    }
}

/// Builds a transaction record, defaulting `value` to zero and `operation` to [`Operation::Call`].
pub fn build_transaction(
    to: Address,
    data: Bytes,
    value: Option<U256>,
    operation: Option<Operation>,
) -> TransactionRecord {
    TransactionRecord {
        to,
        data,
        value: value.unwrap_or_default(),
        operation: operation.unwrap_or_default(),
    }
}

/// Wire form: checksummed `to`, decimal `value`, hex `data`, numeric `operation`.
impl Serialize for TransactionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a> {
            to: String,
            value: String,
            data: &'a Bytes,
            operation: Operation,
        }

        Wire {
            to: self.to.to_checksum(None),
            value: self.value.to_string(),
            data: &self.data,
            operation: self.operation,
        }
        .serialize(serializer)
    }
}
