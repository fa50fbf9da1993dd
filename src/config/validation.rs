use super::Config;
use crate::error::{Error, Result};

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.backends.enabled().is_empty() {
            return Err(Error::Validation(
                "No backend is enabled under 'backends:'".to_string(),
            ));
        }

        if self.filter.is_empty() {
            tracing::warn!(
                "'filter' is empty: no service type will be recognized by any backend"
            );
        }

        for service_type in self.filter.iter() {
            if service_type.is_empty() || service_type.contains(['@', '/']) {
                return Err(Error::Validation(format!(
                    "Filter entry '{}' is not a valid service type name",
                    service_type
                )));
            }
        }

        Ok(())
    }
}
