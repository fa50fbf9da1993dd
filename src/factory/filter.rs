use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Allow-list of service type names a registry is willing to manage.
///
/// Every factory of a registry receives the same filter at construction time
/// and ignores backend entities whose type is not listed. An empty filter
/// allows nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceFilter {
    types: BTreeSet<String>,
}

impl ServiceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allows(&self, service_type: &str) -> bool {
        self.types.contains(service_type)
    }

    pub fn insert(&mut self, service_type: impl Into<String>) -> bool {
        self.types.insert(service_type.into())
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ServiceFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for ServiceFilter {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.types.extend(iter.into_iter().map(Into::into));
    }
}
