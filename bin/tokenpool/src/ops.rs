//! Administrative operation commands.

use alloy_primitives::Address;
use clap::Parser;
use serde_json::Value;
use tokenpool_ops::{address_argument, InterfaceRegistry, Operations, PreparedCall};
use tracing::info;

use crate::{Error, InputArgs, OutputArgs, Result};

/// Arguments shared by the single-call operation commands
#[derive(Parser, Debug)]
pub struct OpCmd {
    /// Contract receiving the call (pool, token, registry or registry module)
    #[arg(long = "to", visible_aliases = ["pool", "token", "registry", "module"])]
    pub to: String,

    /// Parameter document
    #[command(flatten)]
    pub input: InputArgs,

    /// Output configuration
    #[command(flatten)]
    pub output: OutputArgs,
}

impl OpCmd {
    /// Validate the input, encode the call with `build` and write it out.
    pub fn run<F>(&self, registry: &InterfaceRegistry, name: &str, build: F) -> Result<()>
    where
        F: FnOnce(Operations<'_>, Address, &Value) -> tokenpool_ops::Result<PreparedCall>,
    {
        self.run_many(registry, name, |ops, to, input| build(ops, to, input).map(|call| vec![call]))
    }

    /// Like [`OpCmd::run`] for operations made of several calls on the same contract, written
    /// as a single batch.
    pub fn run_many<F>(&self, registry: &InterfaceRegistry, name: &str, build: F) -> Result<()>
    where
        F: FnOnce(Operations<'_>, Address, &Value) -> tokenpool_ops::Result<Vec<PreparedCall>>,
    {
        let to = address_argument("to", &self.to)?;
        let input = self.input.load()?;
        let calls = build(Operations::new(registry), to, &input)?;
        let Some(first) = calls.first() else {
            return Err(Error::InvalidInput("operation produced no transactions".to_string()));
        };
        let contract = first.contract;
        for call in &calls {
            info!(%to, contract = %call.contract, function = call.function, "Encoded operation");
        }

        let description = match calls.as_slice() {
            [call] => format!("{}.{} on {}", call.contract, call.function, to),
            _ => format!("{} calls to {} on {}", calls.len(), contract, to),
        };
        let functions: Vec<_> = calls.iter().map(|call| call.function).collect();
        let transactions = calls.into_iter().map(|call| call.transaction).collect();
        self.output.write(registry, contract, transactions, &functions, name, &description)
    }
}
