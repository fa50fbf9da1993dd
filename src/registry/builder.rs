use super::Registry;
use crate::config::Config;
use crate::error::Result;
use crate::factory::{ConstructFactory, ServiceFactory, ServiceFilter};
use crate::systemd::{SystemctlClient, SystemdServiceFactory};
use std::sync::Arc;

type AddFactory = Box<dyn FnOnce(&mut Registry) -> Result<()>>;

/// Builder for constructing a [`Registry`] with a fluent API.
///
/// `build()` constructs the factories in the order they were given, each
/// performing its first backend scan, and then adopts the services every
/// backend already has.
///
/// # Example
///
/// ```no_run
/// use service_registry::{Registry, SystemdServiceFactory};
///
/// # fn example() -> service_registry::Result<()> {
/// let registry = Registry::builder()
///     .filter(["mc-server", "ngrok"])
///     .factory::<SystemdServiceFactory>()
///     .build()?;
///
/// for (id, services) in registry.services() {
///     for service in services {
///         println!("{}/{}: {}", service.service_type(), id, service.state()?);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct RegistryBuilder {
    filter: ServiceFilter,
    factories: Vec<AddFactory>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            filter: ServiceFilter::new(),
            factories: Vec::new(),
        }
    }

    /// Set the type filter shared by every factory.
    pub fn filter<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter = types.into_iter().collect();
        self
    }

    /// Add a factory that constructs itself from the filter.
    pub fn factory<F: ConstructFactory>(mut self) -> Self {
        self.factories
            .push(Box::new(|registry: &mut Registry| registry.add_factory::<F>()));
        self
    }

    /// Add a factory built by `construct`, which receives the shared filter.
    ///
    /// Use this to hand a factory an explicitly configured backend session.
    pub fn factory_with<F, C>(mut self, construct: C) -> Self
    where
        F: ServiceFactory + 'static,
        C: FnOnce(&ServiceFilter) -> Result<F> + 'static,
    {
        self.factories
            .push(Box::new(move |registry: &mut Registry| {
                registry.add_factory_with(construct)
            }));
        self
    }

    /// Construct every factory and adopt pre-existing services.
    pub fn build(self) -> Result<Registry> {
        let mut registry = Registry::new(self.filter);
        for add in self.factories {
            add(&mut registry)?;
        }
        registry.register_existing_services()?;
        tracing::debug!(
            "Registry ready with {} factory(ies) and {} adopted service(s)",
            registry.factories.len(),
            registry.len()
        );
        Ok(registry)
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Build a registry from a loaded configuration.
    ///
    /// Each backend enabled under `backends:` contributes one factory.
    pub fn from_config(config: &Config) -> Result<Registry> {
        config.validate()?;

        let mut builder = Registry::builder().filter(config.filter.iter());
        if let Some(systemd) = &config.backends.systemd {
            let client = SystemctlClient::from_config(systemd);
            builder = builder.factory_with(move |filter: &ServiceFilter| {
                SystemdServiceFactory::with_bus(Arc::new(client), filter)
            });
        }
        builder.build()
    }
}
