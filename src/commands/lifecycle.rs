use crate::output::UserOutput;
use service_registry::{LifecycleCommand, Registry, ServiceHandle};

/// Runs a guarded lifecycle command on `(service_type, id)`.
///
/// A pair the registry does not know yet is registered first, which lets
/// `start` bring up a new instance of a supported type.
pub fn run_lifecycle(
    registry: &mut Registry,
    command: LifecycleCommand,
    service_type: &str,
    id: &str,
    out: &dyn UserOutput,
) -> anyhow::Result<()> {
    let known: Option<ServiceHandle> = registry.service(service_type, id).cloned();
    let service = match known {
        Some(service) => service,
        None => registry.register_service(service_type, id)?,
    };

    let sent = match command {
        LifecycleCommand::Start => service.start()?,
        LifecycleCommand::Stop => service.stop()?,
        LifecycleCommand::Restart => service.restart()?,
    };

    if sent {
        out.success(&format!("{} requested for {}", command, service.key()));
    } else {
        out.warning(&format!(
            "{} is {}; no {} command sent",
            service.key(),
            service.state()?,
            command
        ));
    }
    Ok(())
}
