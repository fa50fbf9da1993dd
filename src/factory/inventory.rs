use super::ServiceFilter;
use crate::service::ServiceKey;
use std::collections::{BTreeMap, BTreeSet};

/// What a factory knows about its backend after a scan.
///
/// Holds the set of types the backend can instantiate and the `(type, id)`
/// pairs that already exist. An inventory is always rebuilt as a whole; the
/// only way to update one is to replace it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    supported: BTreeSet<String>,
    existing: BTreeMap<String, BTreeSet<String>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that the backend can create services of `service_type`.
    /// Types outside `filter` are dropped.
    pub fn add_supported(&mut self, filter: &ServiceFilter, service_type: &str) -> bool {
        if !filter.allows(service_type) {
            return false;
        }
        self.supported.insert(service_type.to_string())
    }

    /// Records an instance that already exists in the backend.
    /// Types outside `filter` are dropped.
    pub fn add_existing(&mut self, filter: &ServiceFilter, service_type: &str, id: &str) -> bool {
        if !filter.allows(service_type) {
            return false;
        }
        self.existing
            .entry(id.to_string())
            .or_default()
            .insert(service_type.to_string())
    }

    pub fn supports(&self, service_type: &str) -> bool {
        self.supported.contains(service_type)
    }

    pub fn supported_types(&self) -> impl Iterator<Item = &str> {
        self.supported.iter().map(String::as_str)
    }

    /// Existing pairs ordered by id, then type.
    pub fn existing(&self) -> impl Iterator<Item = ServiceKey> + '_ {
        self.existing.iter().flat_map(|(id, types)| {
            types
                .iter()
                .map(move |service_type| ServiceKey::new(service_type.as_str(), id.as_str()))
        })
    }

    pub fn existing_count(&self) -> usize {
        self.existing.values().map(BTreeSet::len).sum()
    }
}
