//! Type-safe identifiers for plots and orders.
//!
//! Plots are addressed by their fixed grid index, orders by an opaque
//! [`Uuid`]. Order ids are minted by the order generator from the session
//! RNG, so a seeded session always produces the same ids.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Number of leading characters shown when an order id is abbreviated.
const SHORT_ID_LEN: usize = 4;

/// Index of a plot on the farm grid (`0..grid_size`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlotId(pub usize);

impl PlotId {
    /// Return the grid index.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl core::fmt::Display for PlotId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for PlotId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Unique identifier for a delivery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct OrderId(pub Uuid);

impl OrderId {
    /// Build an order id from 16 random bytes (a version 4 UUID).
    pub const fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Abbreviated form used on order cards.
    pub fn short(&self) -> String {
        self.0.simple().to_string().chars().take(SHORT_ID_LEN).collect()
    }

    /// Whether the textual id starts with `prefix` (hyphens ignored).
    ///
    /// An empty prefix never matches.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        let wanted: String = prefix
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        !wanted.is_empty() && self.0.simple().to_string().starts_with(&wanted)
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for OrderId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_bytes_produce_v4_ids() {
        let id = OrderId::from_random_bytes([7; 16]);
        assert_eq!(id.into_inner().get_version_num(), 4);
        assert_eq!(id, OrderId::from_random_bytes([7; 16]));
        assert_ne!(id, OrderId::from_random_bytes([8; 16]));
    }

    #[test]
    fn short_id_is_four_chars_of_display() {
        let id = OrderId::from_random_bytes([0xab; 16]);
        assert_eq!(id.short().len(), 4);
        assert!(id.to_string().starts_with(&id.short()));
    }

    #[test]
    fn prefix_matching_ignores_case_and_hyphens() {
        let id = OrderId::from_random_bytes([0xab; 16]);
        let text = id.to_string();
        let upper_prefix = text.get(..10).unwrap_or_default().to_uppercase();
        assert!(id.matches_prefix(&upper_prefix));
        assert!(id.matches_prefix(&id.short()));
        assert!(!id.matches_prefix(""));
        assert!(!id.matches_prefix("zzzz"));
    }

    #[test]
    fn plot_id_serializes_as_bare_index() {
        let json = serde_json::to_string(&PlotId(3)).ok();
        assert_eq!(json.as_deref(), Some("3"));
    }
}
