use super::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "service-registry.yaml";
const ALT_CONFIG_FILE_NAME: &str = "service-registry.yml";

pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Self
    }

    /// Looks for the registry config in the working directory and its
    /// ancestors.
    pub fn find_config_file(&self) -> Result<PathBuf> {
        let current_dir = std::env::current_dir()?;
        Self::find_config_in_dir(&current_dir)
    }

    /// Nearest `service-registry.yaml` (or `.yml`) at or above `dir`. The
    /// `.yaml` spelling wins when a directory has both.
    pub fn find_config_in_dir(dir: &Path) -> Result<PathBuf> {
        for ancestor in dir.ancestors() {
            let found = [CONFIG_FILE_NAME, ALT_CONFIG_FILE_NAME]
                .iter()
                .map(|name| ancestor.join(name))
                .find(|candidate| candidate.is_file());
            if let Some(path) = found {
                return Ok(path);
            }
        }

        Err(Error::Config(format!(
            "Could not find {} in {} or any parent",
            CONFIG_FILE_NAME,
            dir.display()
        )))
    }

    /// Reads and parses the config at `path`. A missing or unreadable file is
    /// a [`Error::Config`].
    pub fn load_config<P: AsRef<Path>>(&self, path: P) -> Result<Config> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        self.parse_config(&content)
    }

    /// Parses YAML without validating it; see [`Config::validate`].
    pub fn parse_config(&self, content: &str) -> Result<Config> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| Error::Parse(format!("Failed to parse YAML config: {}", e)))?;

        Ok(config)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
