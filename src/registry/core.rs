use crate::error::{Error, Result};
use crate::factory::{ConstructFactory, ServiceFactory, ServiceFilter};
use crate::service::ServiceHandle;
use std::any::TypeId;
use std::collections::{HashMap, HashSet};

use super::RegistryBuilder;

/// Ledger of registered types, keyed by service id.
pub(super) type TypeLedger = HashMap<String, HashSet<String>>;

/// Registered handles, keyed by service id, in registration order.
pub type ServiceCatalogue = HashMap<String, Vec<ServiceHandle>>;

pub(super) struct FactoryEntry {
    pub(super) kind: TypeId,
    pub(super) factory: Box<dyn ServiceFactory>,
}

/// Central catalogue of managed services across all backends.
///
/// The registry owns one instance of each factory implementation it was
/// given, routes new registrations to the factory that supports the requested
/// type, and guarantees that a `(type, id)` pair is registered at most once
/// across all factories.
///
/// The registry does no locking. Callers sharing it between threads must
/// provide their own mutual exclusion.
pub struct Registry {
    pub(super) filter: ServiceFilter,
    pub(super) factories: Vec<FactoryEntry>,
    pub(super) registered_types: TypeLedger,
    pub(super) registered_services: ServiceCatalogue,
}

impl Registry {
    /// Creates an empty registry with no factories.
    ///
    /// Prefer [`Registry::builder`], which also adopts the services that
    /// already exist in each backend.
    pub fn new(filter: ServiceFilter) -> Self {
        if filter.is_empty() {
            tracing::warn!("Service filter is empty; no backend entity will be manageable");
        }
        Self {
            filter,
            factories: Vec::new(),
            registered_types: HashMap::new(),
            registered_services: HashMap::new(),
        }
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn filter(&self) -> &ServiceFilter {
        &self.filter
    }

    /// Constructs one `F` from the shared filter and adds it.
    pub fn add_factory<F: ConstructFactory>(&mut self) -> Result<()> {
        self.add_factory_with(F::construct)
    }

    /// Constructs a factory with `construct`, passing it the shared filter,
    /// and adds it.
    ///
    /// A registry holds at most one instance of each factory implementation;
    /// adding a second one fails with [`Error::FactoryAlreadyAdded`] before
    /// `construct` runs.
    pub fn add_factory_with<F, C>(&mut self, construct: C) -> Result<()>
    where
        F: ServiceFactory + 'static,
        C: FnOnce(&ServiceFilter) -> Result<F>,
    {
        let kind = TypeId::of::<F>();
        if let Some(existing) = self.factories.iter().find(|entry| entry.kind == kind) {
            return Err(Error::FactoryAlreadyAdded(
                existing.factory.factory_type().to_string(),
            ));
        }

        let factory = construct(&self.filter)?;
        tracing::info!(
            "Added factory '{}' supporting {:?}",
            factory.factory_type(),
            factory.supported_types()
        );
        self.factories.push(FactoryEntry {
            kind,
            factory: Box::new(factory),
        });
        Ok(())
    }

    pub fn factories(&self) -> impl Iterator<Item = &dyn ServiceFactory> {
        self.factories.iter().map(|entry| entry.factory.as_ref())
    }

    /// Rescans every factory's backend.
    ///
    /// Only the factories' own knowledge changes; registered services are
    /// left as they are.
    pub fn refresh(&mut self) -> Result<()> {
        for entry in &mut self.factories {
            tracing::debug!("Refreshing factory '{}'", entry.factory.factory_type());
            entry.factory.refresh()?;
        }
        Ok(())
    }

    /// All registered services, keyed by id.
    ///
    /// Handles for one id appear in the order they were registered.
    pub fn services(&self) -> &ServiceCatalogue {
        &self.registered_services
    }

    /// Looks up the handle registered for `(service_type, id)`.
    pub fn service(&self, service_type: &str, id: &str) -> Option<&ServiceHandle> {
        self.registered_services
            .get(id)?
            .iter()
            .find(|service| service.service_type() == service_type)
    }

    pub fn is_registered(&self, service_type: &str, id: &str) -> bool {
        self.registered_types
            .get(id)
            .is_some_and(|types| types.contains(service_type))
    }

    /// Number of registered `(type, id)` pairs.
    pub fn len(&self) -> usize {
        self.registered_services.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("filter", &self.filter)
            .field(
                "factories",
                &self.factories().map(|f| f.factory_type()).collect::<Vec<_>>(),
            )
            .field("services", &self.registered_services)
            .finish()
    }
}
