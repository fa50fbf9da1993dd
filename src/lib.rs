//! # Service Registry
//!
//! A backend-agnostic registry for managing system services.
//!
//! ## Features
//!
//! - **Uniform lifecycle**: every service is a `(type, id)` pair with
//!   start/stop/restart/state/info, whatever backend realizes it
//! - **Pluggable backends**: each backend is a [`ServiceFactory`]; the
//!   registry routes a requested type to the factory that supports it
//! - **Global uniqueness**: a `(type, id)` pair is registered at most once
//!   across all factories
//! - **Adoption**: instances that already exist in a backend are registered
//!   when the registry is built
//! - **systemd backend**: template units (`web@.service`) as types, their
//!   instances (`web@app1.service`) as services
//!
//! ## Quick Start
//!
//! ```no_run
//! use service_registry::{Registry, SystemdServiceFactory};
//!
//! # fn example() -> Result<(), service_registry::Error> {
//! let mut registry = Registry::builder()
//!     .filter(["web"])
//!     .factory::<SystemdServiceFactory>()
//!     .build()?;
//!
//! let web = registry.register_service("web", "app2")?;
//! if web.start()? {
//!     println!("start requested, now {}", web.state()?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency Model
//!
//! Everything is synchronous. Each backend call blocks until its round trip
//! completes, and start/stop/restart return as soon as the backend accepts
//! the command, without waiting for the service to reach its new state.
//! Nothing is cached and nothing is retried. The registry does no internal
//! locking.

pub mod config;
pub mod error;
pub mod factory;
pub mod registry;
pub mod service;
pub mod systemd;

// Re-export commonly used types
pub use config::{Config, Parser};
pub use error::{Error, Result};
pub use factory::{ConstructFactory, ServiceFactory, ServiceFilter};
pub use registry::{Registry, RegistryBuilder};
pub use service::{LifecycleCommand, Service, ServiceHandle, ServiceInfo, ServiceKey, ServiceState};
pub use systemd::{SystemctlClient, SystemdServiceFactory};
