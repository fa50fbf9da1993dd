//! The service contract and the backend-independent state model.
//!
//! A [`Service`] is a thin identity handle for one `(type, id)` entity owned
//! by a backend. Its state is never stored here; see [`ServiceState`].
//!
//! # Example
//!
//! ```ignore
//! use service_registry::service::{Service, ServiceState};
//!
//! fn bounce(service: &dyn Service) -> service_registry::Result<()> {
//!     if service.state()? == ServiceState::ACTIVE {
//!         service.restart()?;
//!     }
//!     Ok(())
//! }
//! ```

mod state;
mod types;

pub use state::*;
pub use types::*;
