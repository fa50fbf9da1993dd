use serde::{Serialize, Serializer};
use std::fmt;

bitflags::bitflags! {
    /// Backend-independent lifecycle state of a service.
    ///
    /// Every backend maps its native status words onto the six leaf states.
    /// Composite members such as [`ServiceState::STOPPED`] group several
    /// leaves; test them with [`ServiceState::is_member_of`], which checks for
    /// intersection rather than equality.
    ///
    /// ```text
    /// ACTIVATING ──► ACTIVE ──► DEACTIVATING ──► INACTIVE
    ///                  │                            ▲
    ///                  └────────► FAILED ───────────┘
    /// ```
    ///
    /// Transitions happen in the backend. This type only names what was
    /// observed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ServiceState: u8 {
        const ACTIVE = 1 << 0;
        const ACTIVATING = 1 << 1;
        const INACTIVE = 1 << 2;
        const DEACTIVATING = 1 << 3;
        const FAILED = 1 << 4;
        /// The backend has no entity for this service.
        const MISSING = 1 << 5;

        /// Not running, either cleanly or after a failure.
        const STOPPED = Self::INACTIVE.bits() | Self::FAILED.bits();
    }
}

/// The six leaf states, in declaration order.
pub const LEAF_STATES: [ServiceState; 6] = [
    ServiceState::ACTIVE,
    ServiceState::ACTIVATING,
    ServiceState::INACTIVE,
    ServiceState::DEACTIVATING,
    ServiceState::FAILED,
    ServiceState::MISSING,
];

const LEAF_NAMES: [&str; 6] = [
    "active",
    "activating",
    "inactive",
    "deactivating",
    "failed",
    "missing",
];

impl ServiceState {
    /// Whether this state shares at least one leaf with `composite`.
    ///
    /// # Examples
    ///
    /// ```
    /// use service_registry::ServiceState;
    ///
    /// assert!(ServiceState::FAILED.is_member_of(ServiceState::STOPPED));
    /// assert!(!ServiceState::ACTIVE.is_member_of(ServiceState::STOPPED));
    /// ```
    pub fn is_member_of(self, composite: ServiceState) -> bool {
        self.intersects(composite)
    }

    pub fn is_stopped(self) -> bool {
        self.is_member_of(ServiceState::STOPPED)
    }

    /// Exactly one leaf state is set.
    pub fn is_leaf(self) -> bool {
        self.bits().count_ones() == 1
    }

    /// Parses one of the canonical lowercase status words.
    ///
    /// Backend adapters with additional vocabulary should handle their extras
    /// before falling back to this.
    pub fn from_status_word(word: &str) -> Option<ServiceState> {
        LEAF_NAMES
            .iter()
            .position(|name| *name == word)
            .map(|idx| LEAF_STATES[idx])
    }

    fn leaf_name(self) -> Option<&'static str> {
        LEAF_STATES
            .iter()
            .zip(LEAF_NAMES)
            .find(|(leaf, _)| **leaf == self)
            .map(|(_, name)| name)
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let names: Vec<&str> = LEAF_STATES
            .iter()
            .filter(|leaf| self.contains(**leaf))
            .filter_map(|leaf| leaf.leaf_name())
            .collect();
        write!(f, "{}", names.join("|"))
    }
}

impl Serialize for ServiceState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
