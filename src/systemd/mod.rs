//! systemd backend.
//!
//! Exposes systemd template units as services: the template `web@.service`
//! provides the type `web`, and the instance `web@app1.service` is the service
//! `(web, app1)`. All communication goes through a [`UnitBus`], normally the
//! `systemctl` binary.

pub mod client;
pub mod error;
mod factory;
pub mod unit;

pub use client::{Scope, SystemctlClient, UnitBus, UnitFileEntry};
pub use error::SystemdError;
pub use factory::*;
pub use unit::UnitFile;
