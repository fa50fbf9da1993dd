//! Registration of new and pre-existing services.
//!
//! This module handles:
//! - Dispatching a requested type to the factory that supports it
//! - Enforcing `(type, id)` uniqueness across all factories
//! - Adopting the instances each backend already had at startup

use crate::error::{Error, Result};
use crate::factory::ServiceFactory;
use crate::service::ServiceHandle;

use super::Registry;

impl Registry {
    /// Registers a new service of `service_type` under `id`.
    ///
    /// Fails with [`Error::ServiceTypeAlreadyRegistered`] if the pair is
    /// already known, or [`Error::NoCompatibleFactoryFound`] if no factory
    /// supports the type. Both checks run before any backend call, and no
    /// failure leaves the registry modified.
    pub fn register_service(&mut self, service_type: &str, id: &str) -> Result<ServiceHandle> {
        self.ensure_unregistered(service_type, id)?;

        let factory = self
            .factory_for_type(service_type)
            .ok_or_else(|| Error::NoCompatibleFactoryFound(service_type.to_string()))?;

        let service = factory.create_service(service_type, id)?;
        tracing::info!(
            "Registered '{}@{}' with factory '{}'",
            service_type,
            id,
            factory.factory_type()
        );
        self.record(service.clone());
        Ok(service)
    }

    /// Adopts every instance the factories found during their first refresh.
    ///
    /// Two factories reporting the same `(type, id)` pair is a configuration
    /// error and fails with [`Error::ServiceTypeAlreadyRegistered`].
    pub(super) fn register_existing_services(&mut self) -> Result<()> {
        let mut adopted = Vec::new();
        for entry in &self.factories {
            let initial = entry.factory.initial_services()?;
            tracing::debug!(
                "Factory '{}' reported {} existing service(s)",
                entry.factory.factory_type(),
                initial.len()
            );
            adopted.extend(initial);
        }

        for service in adopted {
            self.ensure_unregistered(service.service_type(), service.id())?;
            tracing::info!("Adopted existing service '{}'", service.key());
            self.record(service);
        }
        Ok(())
    }

    /// First factory, in the order they were added, that supports
    /// `service_type`.
    pub(super) fn factory_for_type(&self, service_type: &str) -> Option<&dyn ServiceFactory> {
        let mut candidates = self
            .factories()
            .filter(|factory| factory.has_support(service_type));
        let chosen = candidates.next()?;

        let others: Vec<&str> = candidates.map(|factory| factory.factory_type()).collect();
        if !others.is_empty() {
            tracing::warn!(
                "Service type '{}' is supported by several factories; using '{}' over {:?}",
                service_type,
                chosen.factory_type(),
                others
            );
        }
        Some(chosen)
    }

    fn ensure_unregistered(&self, service_type: &str, id: &str) -> Result<()> {
        if self.is_registered(service_type, id) {
            return Err(Error::ServiceTypeAlreadyRegistered {
                service_type: service_type.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    fn record(&mut self, service: ServiceHandle) {
        let id = service.id().to_string();
        self.registered_types
            .entry(id.clone())
            .or_default()
            .insert(service.service_type().to_string());
        self.registered_services.entry(id).or_default().push(service);
    }
}
