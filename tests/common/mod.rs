//! Shared helpers for integration tests: an in-memory backend that records
//! every command it receives, and a factory over it.
#![allow(dead_code)]

use parking_lot::Mutex;
use service_registry::factory::{ConstructFactory, Inventory, ServiceFactory, ServiceFilter};
use service_registry::service::{
    LifecycleCommand, Service, ServiceHandle, ServiceInfo, ServiceKey, ServiceState,
};
use service_registry::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::marker::PhantomData;
use std::sync::Arc;

#[derive(Debug, Default)]
struct BackendState {
    templates: BTreeSet<String>,
    units: BTreeMap<ServiceKey, ServiceState>,
    commands: Vec<(LifecycleCommand, ServiceKey)>,
    created: usize,
    scans: usize,
    unreachable: bool,
}

/// In-memory backend. Commands are recorded but never change unit state,
/// like a real backend that has not converged yet.
#[derive(Debug, Default)]
pub struct FakeBackend {
    state: Mutex<BackendState>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_template(&self, service_type: &str) {
        self.state.lock().templates.insert(service_type.to_string());
    }

    pub fn add_unit(&self, service_type: &str, id: &str, state: ServiceState) {
        self.state
            .lock()
            .units
            .insert(ServiceKey::new(service_type, id), state);
    }

    pub fn set_state(&self, service_type: &str, id: &str, state: ServiceState) {
        self.add_unit(service_type, id, state);
    }

    pub fn remove_unit(&self, service_type: &str, id: &str) {
        self.state
            .lock()
            .units
            .remove(&ServiceKey::new(service_type, id));
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.state.lock().unreachable = unreachable;
    }

    pub fn commands(&self) -> Vec<(LifecycleCommand, ServiceKey)> {
        self.state.lock().commands.clone()
    }

    pub fn command_count(&self) -> usize {
        self.state.lock().commands.len()
    }

    /// Number of handles factories have created over this backend.
    pub fn created(&self) -> usize {
        self.state.lock().created
    }

    pub fn scans(&self) -> usize {
        self.state.lock().scans
    }

    fn check_reachable(&self) -> Result<()> {
        if self.state.lock().unreachable {
            return Err(Error::backend(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "backend unreachable",
            )));
        }
        Ok(())
    }

    fn scan(&self, filter: &ServiceFilter) -> Result<Inventory> {
        self.check_reachable()?;
        let mut state = self.state.lock();
        state.scans += 1;
        let mut inventory = Inventory::new();
        for template in &state.templates {
            inventory.add_supported(filter, template);
        }
        for key in state.units.keys() {
            inventory.add_existing(filter, &key.service_type, &key.id);
        }
        Ok(inventory)
    }
}

/// Gives each fake factory type its own identity.
pub trait Label: Send + Sync + 'static {
    const NAME: &'static str;
}

#[derive(Debug)]
pub struct Alpha;
impl Label for Alpha {
    const NAME: &'static str = "alpha";
}

#[derive(Debug)]
pub struct Beta;
impl Label for Beta {
    const NAME: &'static str = "beta";
}

pub struct FakeFactory<L: Label> {
    backend: Arc<FakeBackend>,
    filter: ServiceFilter,
    inventory: Inventory,
    _label: PhantomData<L>,
}

impl<L: Label> FakeFactory<L> {
    pub fn with_backend(backend: Arc<FakeBackend>, filter: &ServiceFilter) -> Result<Self> {
        let mut factory = Self {
            backend,
            filter: filter.clone(),
            inventory: Inventory::new(),
            _label: PhantomData,
        };
        factory.refresh()?;
        Ok(factory)
    }

    fn handle(&self, service_type: &str, id: &str) -> ServiceHandle {
        Arc::new(FakeService {
            backend: self.backend.clone(),
            provider: L::NAME,
            key: ServiceKey::new(service_type, id),
        })
    }
}

/// Self-constructing variant: every filtered type gets a template.
impl<L: Label> ConstructFactory for FakeFactory<L> {
    fn construct(filter: &ServiceFilter) -> Result<Self> {
        let backend = FakeBackend::new();
        for service_type in filter.iter() {
            backend.add_template(service_type);
        }
        Self::with_backend(backend, filter)
    }
}

impl<L: Label> ServiceFactory for FakeFactory<L> {
    fn description(&self) -> &'static str {
        "In-memory test backend"
    }

    fn factory_type(&self) -> &'static str {
        L::NAME
    }

    fn has_support(&self, service_type: &str) -> bool {
        self.inventory.supports(service_type)
    }

    fn supported_types(&self) -> Vec<String> {
        self.inventory.supported_types().map(str::to_string).collect()
    }

    fn create_service(&self, service_type: &str, id: &str) -> Result<ServiceHandle> {
        if !self.has_support(service_type) {
            return Err(Error::ServiceTypeNotCompatible {
                factory: L::NAME.to_string(),
                service_type: service_type.to_string(),
            });
        }
        self.backend.state.lock().created += 1;
        Ok(self.handle(service_type, id))
    }

    fn refresh(&mut self) -> Result<()> {
        self.inventory = self.backend.scan(&self.filter)?;
        Ok(())
    }

    fn initial_services(&self) -> Result<Vec<ServiceHandle>> {
        Ok(self
            .inventory
            .existing()
            .map(|key| self.handle(&key.service_type, &key.id))
            .collect())
    }

    fn services(&self) -> Result<Vec<ServiceHandle>> {
        let current = self.backend.scan(&self.filter)?;
        Ok(current
            .existing()
            .map(|key| self.handle(&key.service_type, &key.id))
            .collect())
    }
}

#[derive(Debug)]
pub struct FakeService {
    backend: Arc<FakeBackend>,
    provider: &'static str,
    key: ServiceKey,
}

impl Service for FakeService {
    fn provider(&self) -> &'static str {
        self.provider
    }

    fn service_type(&self) -> &str {
        &self.key.service_type
    }

    fn id(&self) -> &str {
        &self.key.id
    }

    fn state(&self) -> Result<ServiceState> {
        self.backend.check_reachable()?;
        Ok(self
            .backend
            .state
            .lock()
            .units
            .get(&self.key)
            .copied()
            .unwrap_or(ServiceState::MISSING))
    }

    fn issue(&self, command: LifecycleCommand) -> Result<()> {
        self.backend.check_reachable()?;
        self.backend
            .state
            .lock()
            .commands
            .push((command, self.key.clone()));
        Ok(())
    }

    fn information(&self) -> Result<ServiceInfo> {
        self.backend.check_reachable()?;
        let mut info = ServiceInfo::new();
        info.insert("Provider".to_string(), self.provider.to_string());
        info.insert("Name".to_string(), self.key.to_string());
        Ok(info)
    }
}

pub fn filter(types: &[&str]) -> ServiceFilter {
    types.iter().copied().collect()
}

/// Sorted `type@id` labels of everything registered.
pub fn registered_pairs(registry: &service_registry::Registry) -> Vec<String> {
    let mut pairs: Vec<String> = registry
        .services()
        .values()
        .flatten()
        .map(|service| service.key().to_string())
        .collect();
    pairs.sort();
    pairs
}
