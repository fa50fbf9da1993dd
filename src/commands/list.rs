use crate::output::UserOutput;
use serde_json::json;
use service_registry::Registry;

pub fn run_list(registry: &Registry, json: bool, out: &dyn UserOutput) -> anyhow::Result<()> {
    let mut ids: Vec<&String> = registry.services().keys().collect();
    ids.sort();

    if json {
        let services = ids
            .into_iter()
            .map(|id| {
                let entries = registry.services()[id]
                    .iter()
                    .map(|service| match service.state() {
                        Ok(state) => json!({
                            "type": service.service_type(),
                            "provider": service.provider(),
                            "state": state,
                        }),
                        Err(e) => json!({
                            "type": service.service_type(),
                            "provider": service.provider(),
                            "state": null,
                            "error": e.to_string(),
                        }),
                    })
                    .collect::<Vec<_>>();
                (id.clone(), serde_json::Value::Array(entries))
            })
            .collect::<serde_json::Map<_, _>>();

        out.status(&serde_json::to_string_pretty(&services)?);
        return Ok(());
    }

    out.status("Registered services:");
    out.status(&format!("{:-<60}", ""));
    if ids.is_empty() {
        out.status("  No services registered");
        return Ok(());
    }

    for id in ids {
        for service in &registry.services()[id] {
            let state = match service.state() {
                Ok(state) => state.to_string(),
                Err(e) => format!("error: {}", e),
            };
            out.status(&format!(
                "  {:<30} {:<10} {}",
                service.key(),
                service.provider(),
                state
            ));
        }
    }
    Ok(())
}
