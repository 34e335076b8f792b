use crate::assignment::{AssignmentBuilder, DEFAULT_MAX_ATTEMPTS};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "secret-santa.toml";
pub const DEFAULT_STATE_PATH: &str = "secret-santa.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SantaConfig {
    pub state_path: PathBuf,
    /// Shuffles tried before falling back to a rotation.
    pub max_attempts: u32,
    /// Fixed seed for reproducible drawings.
    pub seed: Option<u64>,
}

impl Default for SantaConfig {
    fn default() -> Self {
        SantaConfig {
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }
}

impl SantaConfig {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn builder(&self) -> AssignmentBuilder {
        AssignmentBuilder::with_max_attempts(self.max_attempts)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(SantaConfig::from_toml_str("").unwrap(), SantaConfig::default());
    }

    #[test]
    fn values_override_defaults() {
        let config = SantaConfig::from_toml_str(
            r#"
            state_path = "/tmp/party.json"
            max_attempts = 25
            seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(config.state_path, PathBuf::from("/tmp/party.json"));
        assert_eq!(config.max_attempts, 25);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.builder().deranger().max_attempts(), 25);
    }

    #[test]
    fn malformed_document_is_rejected() {
        assert!(matches!(
            SantaConfig::from_toml_str("max_attempts = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = SantaConfig::load("/definitely/not/here/secret-santa.toml").unwrap();
        assert_eq!(config, SantaConfig::default());
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let config = SantaConfig {
            seed: Some(7),
            ..SantaConfig::default()
        };
        let a: u64 = config.rng().random();
        let b: u64 = config.rng().random();
        assert_eq!(a, b);
    }
}
