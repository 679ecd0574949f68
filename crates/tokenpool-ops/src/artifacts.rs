//! Compiled contract bytecode.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use alloy_primitives::{hex, Bytes};
use serde_json::Value;
use tracing::debug;

use crate::{ArtifactError, Contract};

/// Source of creation bytecode for the deployable contracts.
///
/// Artifacts are read from `<dir>/<Contract>.json` on first use and kept for the lifetime of the
/// value. Bytecode may also be supplied directly, which takes precedence over the directory.
#[derive(Debug, Default)]
pub struct Artifacts {
    dir: Option<PathBuf>,
    preloaded: HashMap<Contract, Bytes>,
    cache: [OnceLock<Bytes>; Contract::ALL.len()],
}

impl Artifacts {
    /// Reads artifacts from `dir`.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: Some(dir.into()), ..Default::default() }
    }

    /// Supplies the bytecode of `contract` directly.
    pub fn with_bytecode(mut self, contract: Contract, bytecode: impl Into<Bytes>) -> Self {
        self.preloaded.insert(contract, bytecode.into());
        self
    }

    /// Path of the artifact file for `contract`, if a directory is configured.
    pub fn path(&self, contract: Contract) -> Option<PathBuf> {
        self.dir.as_ref().map(|dir| dir.join(format!("{}.json", contract.name())))
    }

    /// Creation bytecode of `contract`.
    pub fn bytecode(&self, contract: Contract) -> Result<Bytes, ArtifactError> {
        if let Some(bytecode) = self.preloaded.get(&contract) {
            return Ok(bytecode.clone());
        }
        let slot = &self.cache[contract.index()];
        if let Some(bytecode) = slot.get() {
            return Ok(bytecode.clone());
        }
        let path = self.path(contract).ok_or(ArtifactError::Unavailable(contract.name()))?;
        let bytecode = read_artifact(&path)?;
        debug!(contract = %contract, path = %path.display(), len = bytecode.len(), "Loaded artifact");
        Ok(slot.get_or_init(|| bytecode).clone())
    }
}

/// Reads the creation bytecode from a compiler artifact.
///
/// Accepts both the Foundry layout (`"bytecode": { "object": "0x…" }`) and the flat layout
/// (`"bytecode": "0x…"`).
pub fn read_artifact(path: &Path) -> Result<Bytes, ArtifactError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| ArtifactError::Read { path: path.to_path_buf(), source })?;
    let artifact: Value = serde_json::from_str(&content)
        .map_err(|source| ArtifactError::Parse { path: path.to_path_buf(), source })?;

    let encoded = match artifact.get("bytecode") {
        Some(Value::String(s)) => s.as_str(),
        Some(Value::Object(obj)) => obj.get("object").and_then(Value::as_str).unwrap_or_default(),
        _ => "",
    };
    let bytecode = hex::decode(encoded.trim())
        .map_err(|source| ArtifactError::InvalidBytecode { path: path.to_path_buf(), source })?;
    // interfaces and abstract contracts compile to empty bytecode
    if bytecode.is_empty() {
        return Err(ArtifactError::MissingBytecode { path: path.to_path_buf() });
    }
    Ok(bytecode.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::bytes;
    use rstest::rstest;

    fn write(dir: &Path, contract: Contract, content: &str) {
        std::fs::write(dir.join(format!("{}.json", contract.name())), content).unwrap();
    }

    #[rstest]
    #[case(r#"{ "bytecode": { "object": "0x6080" } }"#)]
    #[case(r#"{ "bytecode": "0x6080" }"#)]
    #[case(r#"{ "abi": [], "bytecode": { "object": "6080", "linkReferences": {} } }"#)]
    fn test_reads_artifact_layouts(#[case] content: &str) {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), Contract::BurnMintErc20, content);
        let artifacts = Artifacts::from_dir(dir.path());
        assert_eq!(artifacts.bytecode(Contract::BurnMintErc20).unwrap(), bytes!("6080"));
    }

    #[test]
    fn test_bytecode_cached_after_first_read() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), Contract::BurnMintTokenPool, r#"{ "bytecode": "0x01" }"#);
        let artifacts = Artifacts::from_dir(dir.path());
        assert_eq!(artifacts.bytecode(Contract::BurnMintTokenPool).unwrap(), bytes!("01"));
        std::fs::remove_file(dir.path().join("BurnMintTokenPool.json")).unwrap();
        assert_eq!(artifacts.bytecode(Contract::BurnMintTokenPool).unwrap(), bytes!("01"));
    }

    #[test]
    fn test_errors() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), Contract::TokenPool, r#"{ "bytecode": { "object": "0x" } }"#);
        write(dir.path(), Contract::CreateCall, r#"{ "bytecode": "0xzz" }"#);
        write(dir.path(), Contract::Create2Factory, "not json");
        let artifacts = Artifacts::from_dir(dir.path());

        assert!(matches!(
            artifacts.bytecode(Contract::TokenPool),
            Err(ArtifactError::MissingBytecode { .. })
        ));
        assert!(matches!(
            artifacts.bytecode(Contract::CreateCall),
            Err(ArtifactError::InvalidBytecode { .. })
        ));
        assert!(matches!(
            artifacts.bytecode(Contract::Create2Factory),
            Err(ArtifactError::Parse { .. })
        ));
        assert!(matches!(
            artifacts.bytecode(Contract::BurnMintErc20),
            Err(ArtifactError::Read { .. })
        ));
        assert!(matches!(
            Artifacts::default().bytecode(Contract::BurnMintErc20),
            Err(ArtifactError::Unavailable("BurnMintERC20"))
        ));
    }

    #[test]
    fn test_preloaded_bytecode_wins() {
        let artifacts = Artifacts::default().with_bytecode(Contract::BurnMintErc20, bytes!("00"));
        assert_eq!(artifacts.bytecode(Contract::BurnMintErc20).unwrap(), bytes!("00"));
    }
}
