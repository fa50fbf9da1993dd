use super::{SystemctlClient, SystemdError, UnitBus, UnitFile};
use crate::error::{Error, Result};
use crate::factory::{ConstructFactory, Inventory, ServiceFactory, ServiceFilter};
use crate::service::{LifecycleCommand, Service, ServiceHandle, ServiceInfo, ServiceState};
use std::sync::Arc;

pub const SYSTEMD_FACTORY_TYPE: &str = "systemd";

const STATE_PROPERTIES: &[&str] = &["LoadState", "ActiveState"];

/// Unit properties reported by [`Service::information`], paired with the
/// field name they are reported under.
const INFO_PROPERTIES: &[(&str, &str)] = &[
    ("Id", "Name"),
    ("Description", "Description"),
    ("LoadState", "State"),
    ("SubState", "Substate"),
    ("ExecStartPre", "ExecStartPre"),
    ("ExecStart", "ExecStart"),
    ("ExecStartPost", "ExecStartPost"),
    ("ExecReload", "ExecReload"),
    ("ExecStop", "ExecStop"),
    ("MemoryCurrent", "MemoryCurrent"),
];

/// Maps a unit's `LoadState`/`ActiveState` pair onto [`ServiceState`].
///
/// A unit systemd cannot find is `MISSING` whatever its active state.
/// `reloading` and `refreshing` are active sub-phases.
pub fn map_unit_state(load_state: Option<&str>, active_state: &str) -> Result<ServiceState> {
    if load_state == Some("not-found") {
        return Ok(ServiceState::MISSING);
    }
    match active_state {
        "reloading" | "refreshing" => Ok(ServiceState::ACTIVE),
        // "missing" is not a word systemd uses for ActiveState.
        "missing" => Err(unknown_state(active_state)),
        other => ServiceState::from_status_word(other).ok_or_else(|| unknown_state(other)),
    }
}

fn unknown_state(state: &str) -> Error {
    Error::UnknownState {
        provider: SYSTEMD_FACTORY_TYPE.to_string(),
        state: state.to_string(),
    }
}

/// Factory for services backed by systemd template units.
///
/// A template unit `T@.service` makes `T` a supported type when `T` passes
/// the filter; every enabled instance `T@I.service` is an existing service
/// `(T, I)`.
#[derive(Debug)]
pub struct SystemdServiceFactory {
    bus: Arc<dyn UnitBus>,
    filter: ServiceFilter,
    inventory: Inventory,
}

impl SystemdServiceFactory {
    /// Creates a factory over `bus` and performs the first scan.
    pub fn with_bus(bus: Arc<dyn UnitBus>, filter: &ServiceFilter) -> Result<Self> {
        let mut factory = Self {
            bus,
            filter: filter.clone(),
            inventory: Inventory::new(),
        };
        factory.refresh()?;
        Ok(factory)
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    fn scan(&self) -> Result<Inventory> {
        let mut inventory = Inventory::new();
        for entry in self.bus.list_unit_files()? {
            let unit = UnitFile::parse(&entry.unit);
            if !unit.is_service() || !self.filter.allows(unit.service_type()) {
                continue;
            }
            if unit.is_template() {
                inventory.add_supported(&self.filter, unit.service_type());
            } else if let Some(id) = unit.id() {
                inventory.add_existing(&self.filter, unit.service_type(), id);
            }
        }
        Ok(inventory)
    }

    fn handles_for(&self, inventory: &Inventory) -> Vec<ServiceHandle> {
        inventory
            .existing()
            .map(|key| self.handle(&key.service_type, &key.id))
            .collect()
    }

    fn handle(&self, service_type: &str, id: &str) -> ServiceHandle {
        Arc::new(SystemdService::new(self.bus.clone(), service_type, id))
    }
}

impl ConstructFactory for SystemdServiceFactory {
    fn construct(filter: &ServiceFilter) -> Result<Self> {
        Self::with_bus(Arc::new(SystemctlClient::system()), filter)
    }
}

impl ServiceFactory for SystemdServiceFactory {
    fn description(&self) -> &'static str {
        "Interface to use systemd services as services"
    }

    fn factory_type(&self) -> &'static str {
        SYSTEMD_FACTORY_TYPE
    }

    fn has_support(&self, service_type: &str) -> bool {
        self.inventory.supports(service_type)
    }

    fn supported_types(&self) -> Vec<String> {
        self.inventory
            .supported_types()
            .map(str::to_string)
            .collect()
    }

    fn create_service(&self, service_type: &str, id: &str) -> Result<ServiceHandle> {
        if !self.has_support(service_type) {
            return Err(Error::ServiceTypeNotCompatible {
                factory: SYSTEMD_FACTORY_TYPE.to_string(),
                service_type: service_type.to_string(),
            });
        }
        Ok(self.handle(service_type, id))
    }

    fn refresh(&mut self) -> Result<()> {
        self.inventory = self.scan()?;
        tracing::debug!(
            "systemd scan found {} template(s) and {} instance(s)",
            self.inventory.supported_types().count(),
            self.inventory.existing_count()
        );
        Ok(())
    }

    fn initial_services(&self) -> Result<Vec<ServiceHandle>> {
        Ok(self.handles_for(&self.inventory))
    }

    fn services(&self) -> Result<Vec<ServiceHandle>> {
        let current = self.scan()?;
        Ok(self.handles_for(&current))
    }
}

/// One instance `T@I.service` of a systemd template unit.
#[derive(Debug)]
pub struct SystemdService {
    bus: Arc<dyn UnitBus>,
    service_type: String,
    id: String,
    unit: String,
}

impl SystemdService {
    pub fn new(bus: Arc<dyn UnitBus>, service_type: &str, id: &str) -> Self {
        Self {
            bus,
            service_type: service_type.to_string(),
            id: id.to_string(),
            unit: UnitFile::instance_name(service_type, id),
        }
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }
}

impl Service for SystemdService {
    fn provider(&self) -> &'static str {
        SYSTEMD_FACTORY_TYPE
    }

    fn service_type(&self) -> &str {
        &self.service_type
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn state(&self) -> Result<ServiceState> {
        let properties = self.bus.properties(&self.unit, STATE_PROPERTIES)?;
        let load_state = properties.get("LoadState").map(String::as_str);
        match properties.get("ActiveState") {
            Some(active_state) => map_unit_state(load_state, active_state),
            None if load_state == Some("not-found") => Ok(ServiceState::MISSING),
            None => Err(SystemdError::unexpected_output(
                format!("systemctl show {}", self.unit),
                "ActiveState not reported",
            )
            .into()),
        }
    }

    fn issue(&self, command: LifecycleCommand) -> Result<()> {
        self.bus.send(command, &self.unit)?;
        Ok(())
    }

    fn information(&self) -> Result<ServiceInfo> {
        let names: Vec<&str> = INFO_PROPERTIES.iter().map(|(property, _)| *property).collect();
        let properties = self.bus.properties(&self.unit, &names)?;

        let mut info = ServiceInfo::new();
        info.insert("Provider".to_string(), self.provider().to_string());
        for (property, field) in INFO_PROPERTIES {
            let value = properties.get(*property).cloned().unwrap_or_default();
            info.insert(field.to_string(), value);
        }
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_systemd_active_states() {
        let cases = [
            ("active", ServiceState::ACTIVE),
            ("activating", ServiceState::ACTIVATING),
            ("inactive", ServiceState::INACTIVE),
            ("deactivating", ServiceState::DEACTIVATING),
            ("failed", ServiceState::FAILED),
            ("reloading", ServiceState::ACTIVE),
        ];
        for (word, expected) in cases {
            assert_eq!(map_unit_state(Some("loaded"), word).unwrap(), expected, "{}", word);
        }
    }

    #[test]
    fn not_found_unit_is_missing() {
        assert_eq!(
            map_unit_state(Some("not-found"), "inactive").unwrap(),
            ServiceState::MISSING
        );
    }

    #[test]
    fn unknown_active_state_is_an_error() {
        let err = map_unit_state(Some("loaded"), "maintenance").unwrap_err();
        assert!(matches!(err, Error::UnknownState { ref state, .. } if state == "maintenance"));
        assert!(map_unit_state(None, "missing").is_err());
    }
}
