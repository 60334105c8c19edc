//! Loader for compiled contract artifacts.
//!
//! The factory has no fixed deployment address, it is deployed fresh on
//! every run. Its creation bytecode comes from a solc-style JSON artifact
//! (the `build/contracts` output of the contract project) located in a
//! configurable artifacts directory.

use {
    alloy::primitives::Bytes,
    serde::Deserialize,
    std::path::{Path, PathBuf},
};

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("artifact {path} contains invalid bytecode: {source}")]
    Bytecode {
        path: PathBuf,
        source: const_hex::FromHexError,
    },
    #[error("artifact {path} contains no creation bytecode")]
    EmptyBytecode { path: PathBuf },
}

#[derive(Debug, Deserialize)]
struct Artifact {
    bytecode: String,
}

/// Reads the creation bytecode of `name` from `<dir>/<name>.json`.
pub fn load_bytecode(dir: &Path, name: &str) -> Result<Bytes, ArtifactError> {
    let path = dir.join(format!("{name}.json"));
    let raw = std::fs::read_to_string(&path).map_err(|source| ArtifactError::Read {
        path: path.clone(),
        source,
    })?;
    let artifact: Artifact =
        serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
            path: path.clone(),
            source,
        })?;
    let code = const_hex::decode(artifact.bytecode.trim()).map_err(|source| {
        ArtifactError::Bytecode {
            path: path.clone(),
            source,
        }
    })?;
    if code.is_empty() {
        return Err(ArtifactError::EmptyBytecode { path });
    }
    Ok(code.into())
}
