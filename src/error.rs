// Allow unused_assignments at module level because thiserror's generated code
// for struct variants triggers false positive warnings - the fields ARE used
// in the Display impl but rustc's lint pass doesn't see this.
#![allow(unused_assignments)]

use crate::systemd::SystemdError;
use miette::Diagnostic;
use std::io;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Factory '{factory}' does not support services of type '{service_type}'")]
    #[diagnostic(
        code(svcreg::factory::type_not_compatible),
        help("List the types each factory supports with `svcreg factories`")
    )]
    ServiceTypeNotCompatible {
        factory: String,
        service_type: String,
    },

    #[error("Service type '{service_type}' has already been registered to id '{id}'")]
    #[diagnostic(
        code(svcreg::registry::already_registered),
        help("Each (type, id) pair can be registered once across all factories")
    )]
    ServiceTypeAlreadyRegistered { service_type: String, id: String },

    #[error("Service type '{0}' does not have any compatible registered factory")]
    #[diagnostic(
        code(svcreg::registry::no_compatible_factory),
        help("Check that '{0}' is listed in the filter and that a backend provides a template for it")
    )]
    NoCompatibleFactoryFound(String),

    #[error("Factory '{0}' has already been added to this registry")]
    #[diagnostic(code(svcreg::registry::duplicate_factory))]
    FactoryAlreadyAdded(String),

    #[error("Service '{0}' is not registered")]
    #[diagnostic(
        code(svcreg::service::not_found),
        help("List registered services with `svcreg list`")
    )]
    ServiceNotFound(String),

    #[error("Backend '{provider}' reported unknown state '{state}'")]
    #[diagnostic(code(svcreg::service::unknown_state))]
    UnknownState { provider: String, state: String },

    #[error("systemd error: {0}")]
    #[diagnostic(
        code(svcreg::systemd::error),
        help("Check that systemd is running with `systemctl is-system-running`")
    )]
    Systemd(#[from] SystemdError),

    #[error("Backend error: {0}")]
    #[diagnostic(code(svcreg::backend::error))]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(svcreg::config::validation),
        help("Enable at least one backend under 'backends:' in service-registry.yaml")
    )]
    Validation(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wraps an error raised by a third-party backend adapter.
    ///
    /// Backend failures are carried through unmodified; the registry never
    /// classifies or retries them.
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Backend(Box::new(err))
    }

    /// True for the errors the registry itself raises when a request is
    /// structurally invalid. These never leave partial state behind.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::ServiceTypeNotCompatible { .. }
                | Error::ServiceTypeAlreadyRegistered { .. }
                | Error::NoCompatibleFactoryFound(_)
                | Error::FactoryAlreadyAdded(_)
        )
    }

    /// Returns a helpful suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Error::ServiceTypeAlreadyRegistered { service_type, id } => Some(format!(
                "'{}@{}' is already known. Control it directly, e.g. `svcreg start {} {}`.",
                service_type, id, service_type, id
            )),
            Error::NoCompatibleFactoryFound(service_type) => Some(format!(
                "Add '{}' to the filter (`--filter {}` or 'filter:' in service-registry.yaml) and make sure the backend has a template for it.",
                service_type, service_type
            )),
            Error::ServiceTypeNotCompatible { .. } => {
                Some("List the supported types with: svcreg factories".to_string())
            }
            Error::ServiceNotFound(_) => {
                Some("List registered services with: svcreg list".to_string())
            }
            Error::Config(msg) if msg.contains("Could not find") => None,
            Error::Config(_) | Error::Validation(_) => {
                Some("Check the 'filter:' and 'backends:' sections of service-registry.yaml".to_string())
            }
            Error::Systemd(e) if e.is_permission_denied() => Some(
                "Controlling system units needs privileges. Run with sudo, grant a polkit rule, or use 'scope: user'.".to_string(),
            ),
            Error::Systemd(_) => Some("Check that systemd is running: systemctl is-system-running".to_string()),
            _ => None,
        }
    }

    /// Formats the error with its suggestion (if any) for user-friendly display.
    pub fn with_suggestion(&self) -> String {
        match self.suggestion() {
            Some(suggestion) => format!("{}\n\nHint: {}", self, suggestion),
            None => self.to_string(),
        }
    }
}
