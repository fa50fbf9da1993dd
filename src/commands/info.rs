use crate::output::UserOutput;
use service_registry::{Error, Registry, ServiceKey};

pub fn run_info(
    registry: &Registry,
    service_type: &str,
    id: &str,
    json: bool,
    out: &dyn UserOutput,
) -> anyhow::Result<()> {
    let service = registry
        .service(service_type, id)
        .ok_or_else(|| Error::ServiceNotFound(ServiceKey::new(service_type, id).to_string()))?;
    let info = service.information()?;

    if json {
        out.status(&serde_json::to_string_pretty(&info)?);
    } else {
        for (field, value) in &info {
            out.status(&format!("{}: {} -> {}", service.key(), field, value));
        }
        out.status(&format!("STATE: {}", service.state()?));
    }
    Ok(())
}
