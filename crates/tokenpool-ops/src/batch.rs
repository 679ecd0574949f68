//! Multisig transaction-batch documents.
//!
//! The document layout is the one consumed by the Safe transaction builder: a header with chain
//! and creator metadata followed by the raw transactions, each annotated with the parameter list
//! of the method it calls so that signers can review it without decoding the call data.

use std::time::{SystemTime, UNIX_EPOCH};

use alloy_json_abi::{Param, StateMutability};
use alloy_primitives::Address;
use serde::Serialize;

use crate::{BatchError, Interface, Result, TransactionRecord};

/// Batch document format version.
pub const BATCH_VERSION: &str = "1.0";

/// Transaction builder version recorded in the document header.
pub const TX_BUILDER_VERSION: &str = "1.18.0";

/// Where and by whom a batch will be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentMetadata {
    /// Chain ID as a decimal string
    pub chain_id: String,
    /// Multisig executing the batch
    pub safe_address: Address,
    /// Multisig owner proposing the batch
    pub owner_address: Address,
}

/// Header of a batch document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMeta {
    /// Batch title
    pub name: String,
    /// Free text description
    pub description: String,
    /// See [`TX_BUILDER_VERSION`]
    pub tx_builder_version: String,
    /// Checksummed multisig address
    pub created_from_safe_address: String,
    /// Checksummed owner address
    pub created_from_owner_address: String,
}

/// Human readable signature of the called method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractMethod {
    /// Parameters with names, types and internal types
    pub inputs: Vec<Param>,
    /// Method name
    pub name: String,
    /// Whether the method accepts value
    pub payable: bool,
}

/// One transaction of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchTransaction {
    #[serde(flatten)]
    transaction: TransactionRecord,
    contract_method: ContractMethod,
    /// Always `null`: the call data is already encoded and is not decoded back.
    contract_inputs_values: Option<serde_json::Value>,
}

impl BatchTransaction {
    /// The raw transaction.
    pub fn transaction(&self) -> &TransactionRecord {
        &self.transaction
    }

    /// The method signature attached for review.
    pub fn contract_method(&self) -> &ContractMethod {
        &self.contract_method
    }

    /// Decoded argument values, which are never populated.
    pub fn contract_inputs_values(&self) -> Option<&serde_json::Value> {
        self.contract_inputs_values.as_ref()
    }
}

/// A complete batch document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDescriptor {
    version: &'static str,
    chain_id: String,
    created_at: u64,
    meta: BatchMeta,
    transactions: Vec<BatchTransaction>,
}

impl BatchDescriptor {
    /// Chain the batch targets.
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Creation time in milliseconds since the Unix epoch.
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Document header.
    pub fn meta(&self) -> &BatchMeta {
        &self.meta
    }

    /// Transactions in execution order.
    pub fn transactions(&self) -> &[BatchTransaction] {
        &self.transactions
    }
}

/// Builds [`BatchDescriptor`]s sharing the same metadata.
#[derive(Debug, Clone)]
pub struct BatchBuilder<'a> {
    metadata: &'a DeploymentMetadata,
    name: String,
    description: String,
    created_at: u64,
}

impl<'a> BatchBuilder<'a> {
    /// Creates a builder stamped with the current time.
    pub fn new(
        metadata: &'a DeploymentMetadata,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or_default();
        Self { metadata, name: name.into(), description: description.into(), created_at }
    }

    /// Overrides the creation timestamp (milliseconds since the Unix epoch).
    pub fn with_created_at(mut self, created_at: u64) -> Self {
        self.created_at = created_at;
        self
    }

    /// Wraps a single transaction calling `function` of `interface`.
    pub fn build(
        &self,
        transaction: TransactionRecord,
        interface: &Interface,
        function: &str,
    ) -> Result<BatchDescriptor> {
        self.build_many(vec![transaction], interface, &[function])
    }

    /// Wraps several transactions; `functions[i]` names the method called by `transactions[i]`.
    pub fn build_many(
        &self,
        transactions: Vec<TransactionRecord>,
        interface: &Interface,
        functions: &[&str],
    ) -> Result<BatchDescriptor> {
        if transactions.len() != functions.len() {
            return Err(BatchError::LengthMismatch {
                transactions: transactions.len(),
                function_names: functions.len(),
            }
            .into());
        }
        if transactions.is_empty() {
            return Err(BatchError::Empty.into());
        }

        let transactions = transactions
            .into_iter()
            .zip(functions)
            .map(|(transaction, name)| -> Result<BatchTransaction> {
                let function = interface.function_by_name(name)?;
                Ok(BatchTransaction {
                    transaction,
                    contract_method: ContractMethod {
                        inputs: function.inputs.clone(),
                        name: function.name.clone(),
                        payable: function.state_mutability == StateMutability::Payable,
                    },
                    contract_inputs_values: None,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(BatchDescriptor {
            version: BATCH_VERSION,
            chain_id: self.metadata.chain_id.clone(),
            created_at: self.created_at,
            meta: BatchMeta {
                name: self.name.clone(),
                description: self.description.clone(),
                tx_builder_version: TX_BUILDER_VERSION.to_string(),
                created_from_safe_address: self.metadata.safe_address.to_checksum(None),
                created_from_owner_address: self.metadata.owner_address.to_checksum(None),
            },
            transactions,
        })
    }
}
