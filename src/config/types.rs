use crate::factory::ServiceFilter;
use crate::systemd::Scope;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for service-registry.yaml
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Service types any backend may manage.
    #[serde(default)]
    pub filter: ServiceFilter,

    #[serde(default)]
    pub backends: Backends,
}

/// Backends to wire into the registry, one factory each.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Backends {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systemd: Option<SystemdConfig>,
}

impl Default for Backends {
    /// systemd, system scope
    fn default() -> Self {
        Self {
            systemd: Some(SystemdConfig::default()),
        }
    }
}

impl Backends {
    pub fn enabled(&self) -> Vec<&'static str> {
        let mut enabled = Vec::new();
        if self.systemd.is_some() {
            enabled.push(crate::systemd::SYSTEMD_FACTORY_TYPE);
        }
        enabled
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SystemdConfig {
    #[serde(default)]
    pub scope: Scope,

    /// Path to the `systemctl` binary. Looked up in PATH when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systemctl: Option<PathBuf>,
}
