use super::ServiceState;
use crate::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Descriptive fields reported by a backend for one service.
///
/// The field set is chosen by each backend.
pub type ServiceInfo = BTreeMap<String, String>;

/// Shared handle to a managed service.
///
/// The registry keeps one clone in its catalogue and hands another to the
/// caller; both refer to the same backend entity.
pub type ServiceHandle = Arc<dyn Service>;

/// Identity of a service inside a registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ServiceKey {
    pub service_type: String,
    pub id: String,
}

impl ServiceKey {
    pub fn new(service_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            service_type: service_type.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.service_type, self.id)
    }
}

/// A command a service forwards to its backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleCommand {
    Start,
    Stop,
    Restart,
}

impl fmt::Display for LifecycleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleCommand::Start => write!(f, "start"),
            LifecycleCommand::Stop => write!(f, "stop"),
            LifecycleCommand::Restart => write!(f, "restart"),
        }
    }
}

impl LifecycleCommand {
    /// Whether the command may be sent to a service observed in `state`.
    ///
    /// Start is only sent to a stopped service. Stop and restart are only
    /// sent to a service that is exactly `ACTIVE`; a service that is still
    /// activating is left alone.
    pub fn is_eligible(self, state: ServiceState) -> bool {
        match self {
            LifecycleCommand::Start => state.is_member_of(ServiceState::STOPPED),
            LifecycleCommand::Stop | LifecycleCommand::Restart => state == ServiceState::ACTIVE,
        }
    }
}

/// A single managed entity, realized by one backend.
///
/// Every method that touches the backend performs a blocking round trip.
/// Nothing is cached: two `state()` calls may observe different values if the
/// backend changes in between.
///
/// Implementors provide [`Service::state`] and [`Service::issue`]; the guarded
/// lifecycle methods are built on top of them and should not be overridden.
pub trait Service: Send + Sync + fmt::Debug {
    /// Factory type of the owning factory.
    fn provider(&self) -> &'static str;

    fn service_type(&self) -> &str;

    fn id(&self) -> &str;

    /// Queries the backend for the current state.
    fn state(&self) -> Result<ServiceState>;

    /// Sends exactly one command to the backend without waiting for the
    /// backend to converge.
    fn issue(&self, command: LifecycleCommand) -> Result<()>;

    /// Descriptive information about the service.
    fn information(&self) -> Result<ServiceInfo>;

    fn key(&self) -> ServiceKey {
        ServiceKey::new(self.service_type(), self.id())
    }

    /// Starts the service if it is currently stopped.
    ///
    /// Returns `false` without contacting the backend again when the service
    /// is not stopped. A `true` result only means the command was accepted;
    /// poll [`Service::state`] to observe the outcome.
    fn start(&self) -> Result<bool> {
        self.issue_if_eligible(LifecycleCommand::Start)
    }

    /// Stops the service if it is exactly `ACTIVE`.
    fn stop(&self) -> Result<bool> {
        self.issue_if_eligible(LifecycleCommand::Stop)
    }

    /// Restarts the service if it is exactly `ACTIVE`.
    fn restart(&self) -> Result<bool> {
        self.issue_if_eligible(LifecycleCommand::Restart)
    }

    fn issue_if_eligible(&self, command: LifecycleCommand) -> Result<bool> {
        let state = self.state()?;
        if !command.is_eligible(state) {
            tracing::debug!(
                "Not sending {} to '{}': state is {}",
                command,
                self.key(),
                state
            );
            return Ok(false);
        }
        tracing::debug!("Sending {} to '{}'", command, self.key());
        self.issue(command)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::LEAF_STATES;

    #[test]
    fn start_is_eligible_only_when_stopped() {
        for state in LEAF_STATES {
            assert_eq!(
                LifecycleCommand::Start.is_eligible(state),
                state == ServiceState::INACTIVE || state == ServiceState::FAILED,
                "start eligibility for {}",
                state
            );
        }
    }

    #[test]
    fn stop_and_restart_need_exactly_active() {
        for command in [LifecycleCommand::Stop, LifecycleCommand::Restart] {
            assert!(command.is_eligible(ServiceState::ACTIVE));
            assert!(!command.is_eligible(ServiceState::ACTIVATING));
            assert!(!command.is_eligible(ServiceState::INACTIVE));
            assert!(!command.is_eligible(ServiceState::ACTIVE | ServiceState::FAILED));
        }
    }

    #[test]
    fn key_displays_type_and_id() {
        let key = ServiceKey::new("web", "app1");
        assert_eq!(key.to_string(), "web@app1");
    }
}
