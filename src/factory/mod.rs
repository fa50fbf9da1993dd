//! The factory contract implemented by every backend provider.
//!
//! A factory owns one session with its backend for its whole lifetime. It
//! knows which service types the backend can instantiate and which instances
//! already exist, and it creates [`Service`](crate::service::Service) handles
//! bound to that session.
//!
//! Factories are wired into a [`Registry`](crate::registry::Registry) at
//! construction time, either through [`ConstructFactory`] or through an
//! explicit constructor closure.

mod filter;
mod inventory;

pub use filter::ServiceFilter;
pub use inventory::Inventory;

use crate::error::Result;
use crate::service::ServiceHandle;

/// A backend provider that creates and enumerates services.
///
/// Every method that reaches the backend blocks until the round trip
/// completes. Backend failures are returned unmodified.
pub trait ServiceFactory: Send + Sync {
    fn description(&self) -> &'static str;

    /// Identifier of this factory. Reported by its services as their
    /// provider.
    fn factory_type(&self) -> &'static str;

    /// Whether `service_type` is in the capability set found by the last
    /// [`refresh`](ServiceFactory::refresh).
    fn has_support(&self, service_type: &str) -> bool;

    /// Types in the current capability set, sorted.
    fn supported_types(&self) -> Vec<String>;

    /// Creates a handle for `(service_type, id)`.
    ///
    /// Fails with [`Error::ServiceTypeNotCompatible`](crate::Error::ServiceTypeNotCompatible)
    /// when the type is unsupported. Does not check whether the pair was
    /// created before; uniqueness is the registry's job.
    fn create_service(&self, service_type: &str, id: &str) -> Result<ServiceHandle>;

    /// Rescans the backend, replacing both the capability set and the
    /// inventory of existing instances.
    fn refresh(&mut self) -> Result<()>;

    /// Handles for every instance found by the last refresh. Issues no
    /// command to the backend.
    fn initial_services(&self) -> Result<Vec<ServiceHandle>>;

    /// Handles for every instance that exists in the backend right now.
    ///
    /// Performs a fresh scan and leaves the inventory used by
    /// [`initial_services`](ServiceFactory::initial_services) untouched.
    fn services(&self) -> Result<Vec<ServiceHandle>>;
}

/// A factory that can set itself up from the shared filter alone.
///
/// Construction opens the backend session and performs the first refresh
/// before returning, so it may block and may fail.
pub trait ConstructFactory: ServiceFactory + Sized + 'static {
    fn construct(filter: &ServiceFilter) -> Result<Self>;
}
