use crate::output::UserOutput;
use service_registry::Registry;

pub fn run_factories(registry: &Registry, out: &dyn UserOutput) -> anyhow::Result<()> {
    out.status(&format!(
        "Filter: {}",
        registry.filter().iter().collect::<Vec<_>>().join(", ")
    ));
    for factory in registry.factories() {
        out.status(&format!(
            "{} - {}",
            factory.factory_type(),
            factory.description()
        ));
        let supported = factory.supported_types();
        if supported.is_empty() {
            out.status("  (no supported types)");
        }
        for service_type in supported {
            out.status(&format!("  {}", service_type));
        }
    }
    Ok(())
}
