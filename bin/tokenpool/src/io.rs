//! Input loading and output writing.

use std::{
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use clap::{Parser, ValueEnum};
use serde_json::Value;
use tokenpool_ops::{
    address_argument, BatchBuilder, Contract, DeploymentMetadata, InterfaceRegistry,
    TransactionRecord,
};
use tracing::{debug, info};

use crate::{Error, Result};

/// Load a JSON document from a file. A dash (-) reads from stdin.
pub fn load_json(path: &Path) -> Result<Value> {
    let file = path.display().to_string();
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|source| Error::InputLoad { file: "stdin".to_string(), source })?;
        buffer
    } else {
        fs::read_to_string(path).map_err(|source| Error::InputLoad { file: file.clone(), source })?
    };
    serde_json::from_str(&content).map_err(|source| Error::JsonParse { file, source })
}

/// Input document argument shared by every transaction command.
#[derive(Parser, Debug, Clone)]
pub struct InputArgs {
    /// JSON parameter file, or `-` for stdin
    #[arg(long = "input", short = 'i', value_name = "FILE")]
    pub input: PathBuf,
}

impl InputArgs {
    /// Load the input document.
    pub fn load(&self) -> Result<Value> {
        let value = load_json(&self.input)?;
        debug!(input = %self.input.display(), "Loaded input");
        Ok(value)
    }
}

/// Output encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One hex call data string per transaction
    #[default]
    Calldata,
    /// Safe transaction builder batch document
    SafeJson,
}

/// Output configuration arguments (format, destination, batch metadata)
#[derive(Parser, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Calldata)]
    pub format: OutputFormat,

    /// Output file. Defaults to stdout.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Chain ID the batch targets
    #[arg(long = "chain-id", env = "TOKENPOOL_CHAIN_ID")]
    pub chain_id: Option<u64>,

    /// Safe executing the batch
    #[arg(long = "safe", env = "TOKENPOOL_SAFE")]
    pub safe: Option<String>,

    /// Safe owner proposing the batch
    #[arg(long = "owner", env = "TOKENPOOL_OWNER")]
    pub owner: Option<String>,

    /// Batch name. Defaults to a name derived from the command.
    #[arg(long = "batch.name", visible_aliases = ["batch-name"])]
    pub batch_name: Option<String>,

    /// Batch description. Defaults to a description derived from the command.
    #[arg(long = "batch.description", visible_aliases = ["batch-description"])]
    pub batch_description: Option<String>,
}

impl OutputArgs {
    /// Batch metadata from the flags. Every field is required.
    pub fn metadata(&self) -> Result<DeploymentMetadata> {
        let chain_id = self.chain_id.ok_or(Error::MissingMetadata("chain-id"))?;
        let safe = self.safe.as_deref().ok_or(Error::MissingMetadata("safe"))?;
        let owner = self.owner.as_deref().ok_or(Error::MissingMetadata("owner"))?;
        Ok(DeploymentMetadata {
            chain_id: chain_id.to_string(),
            safe_address: address_argument("safe", safe)?,
            owner_address: address_argument("owner", owner)?,
        })
    }

    /// Whether human readable notes may go to stderr without mixing into the output.
    pub const fn is_calldata(&self) -> bool {
        matches!(self.format, OutputFormat::Calldata)
    }

    /// Render `transactions`, which call `functions` on `contract`, in the configured format.
    pub fn render(
        &self,
        registry: &InterfaceRegistry,
        contract: Contract,
        transactions: Vec<TransactionRecord>,
        functions: &[&str],
        name: &str,
        description: &str,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Calldata => {
                Ok(transactions.iter().map(|tx| format!("{}\n", tx.data())).collect())
            }
            OutputFormat::SafeJson => {
                let metadata = self.metadata()?;
                let batch = BatchBuilder::new(
                    &metadata,
                    self.batch_name.as_deref().unwrap_or(name),
                    self.batch_description.as_deref().unwrap_or(description),
                )
                .build_many(transactions, registry.interface(contract), functions)?;
                debug!(
                    name = %batch.meta().name,
                    chain_id = batch.chain_id(),
                    count = batch.transactions().len(),
                    "Built batch"
                );
                let mut json = serde_json::to_string_pretty(&batch).map_err(Error::JsonSerialize)?;
                json.push('\n');
                Ok(json)
            }
        }
    }

    /// Render and write the output.
    pub fn write(
        &self,
        registry: &InterfaceRegistry,
        contract: Contract,
        transactions: Vec<TransactionRecord>,
        functions: &[&str],
        name: &str,
        description: &str,
    ) -> Result<()> {
        let count = transactions.len();
        let content = self.render(registry, contract, transactions, functions, name, description)?;
        match &self.output {
            Some(path) => {
                // Create base directory if it doesn't exist
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).map_err(|source| Error::OutputWrite {
                        file: parent.display().to_string(),
                        source,
                    })?;
                }
                fs::write(path, content).map_err(|source| Error::OutputWrite {
                    file: path.display().to_string(),
                    source,
                })?;
                info!(path = %path.display(), count, "Wrote transactions");
            }
            None => {
                std::io::stdout()
                    .write_all(content.as_bytes())
                    .map_err(|source| Error::OutputWrite { file: "stdout".to_string(), source })?;
            }
        }
        Ok(())
    }
}
