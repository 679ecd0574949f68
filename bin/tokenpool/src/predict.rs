//! Address prediction command.

use std::path::PathBuf;

use alloy_primitives::{hex, Bytes};
use clap::Parser;
use tokenpool_ops::{predict_address, Deployer, InterfaceRegistry, Object, TokenParams};
use tracing::debug;

use crate::{load_json, ArtifactArgs, Error, Result};

/// Predict the address of a contract deployed through the CREATE2 factory
#[derive(Parser, Debug)]
pub struct PredictCmd {
    /// Factory contract performing the deployment
    #[arg(long = "deployer", visible_aliases = ["factory"])]
    pub deployer: String,

    /// Account calling the factory
    #[arg(long = "sender", visible_aliases = ["from"])]
    pub sender: String,

    /// 32-byte salt before sender binding
    #[arg(long = "salt")]
    pub salt: String,

    /// Init code as hex
    #[arg(long = "init-code", conflicts_with = "token", required_unless_present = "token")]
    pub init_code: Option<String>,

    /// Token parameter object; the init code is built from the token artifact
    #[arg(long = "token", value_name = "FILE")]
    pub token: Option<PathBuf>,

    /// Artifact configuration, used with `--token`
    #[command(flatten)]
    pub artifacts: ArtifactArgs,
}

impl PredictCmd {
    /// Execute the predict-address command
    pub fn run(&self, registry: &InterfaceRegistry) -> Result<()> {
        let init_code = self.init_code(registry)?;
        debug!(len = init_code.len(), "Init code ready");
        let address = predict_address(&self.deployer, &init_code, &self.salt, &self.sender)?;
        println!("{address}");
        Ok(())
    }

    fn init_code(&self, registry: &InterfaceRegistry) -> Result<Bytes> {
        if let Some(ref hex_code) = self.init_code {
            return hex::decode(hex_code.trim())
                .map(Bytes::from)
                .map_err(|e| Error::InvalidInput(format!("Invalid init code: {e}")));
        }
        let path = self
            .token
            .as_ref()
            .ok_or_else(|| Error::InvalidInput("--init-code or --token is required".to_string()))?;
        let document = load_json(path)?;
        let token = TokenParams::from_object(&Object::root(&document)?)?;
        let artifacts = self.artifacts.load();
        Ok(Deployer::new(registry, &artifacts).token_init_code(&token)?)
    }
}
