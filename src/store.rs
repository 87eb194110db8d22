//! Persistence of the infra document between reconciliation steps

use crate::error::{InfraError, Result};
use crate::models::Infra;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

pub trait InfraStore {
    /// Durably record the current spec and status
    fn save(&self, infra: &Infra) -> Result<()>;
}

/// Stores the whole infra document as a YAML file
pub struct YamlInfraStore {
    path: PathBuf,
}

impl YamlInfraStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Infra> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            error!("{:?}", e);
            InfraError::Store(format!("failed to read '{}': {}", self.path.display(), e))
        })?;
        serde_yaml::from_str(&contents).map_err(|e| {
            error!("{:?}", e);
            InfraError::Store(format!("failed to parse '{}': {}", self.path.display(), e))
        })
    }
}

impl InfraStore for YamlInfraStore {
    fn save(&self, infra: &Infra) -> Result<()> {
        let contents = serde_yaml::to_string(infra)
            .map_err(|e| InfraError::Store(format!("failed to serialize infra: {}", e)))?;

        // write next to the target and rename so a crash never leaves half a document
        let tmp_path = self.path.with_extension("yaml.tmp");
        fs::write(&tmp_path, contents)
            .and_then(|_| fs::rename(&tmp_path, &self.path))
            .map_err(|e| {
                error!("{:?}", e);
                InfraError::Store(format!("failed to write '{}': {}", self.path.display(), e))
            })?;

        debug!("Saved infra '{}' to '{}'", infra.name, self.path.display());
        Ok(())
    }
}

/// Keeps every saved snapshot in memory
#[cfg(test)]
#[derive(Default)]
pub struct MemoryInfraStore {
    pub snapshots: std::sync::Mutex<Vec<Infra>>,
}

#[cfg(test)]
impl MemoryInfraStore {
    pub fn saved(&self) -> Vec<Infra> {
        self.snapshots.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl InfraStore for MemoryInfraStore {
    fn save(&self, infra: &Infra) -> Result<()> {
        self.snapshots.lock().unwrap().push(infra.clone());
        Ok(())
    }
}
