//! Enumeration types for the farm simulation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Crops
// ---------------------------------------------------------------------------

/// A crop kind that can be planted, harvested, and ordered.
///
/// The set is closed: every variant resolves to an entry in the crop
/// catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum CropId {
    /// Cheap and fast.
    Wheat,
    /// Mid-range cost and growth time.
    Tomato,
    /// Expensive, slow, and the most valuable.
    Corn,
}

impl CropId {
    /// Every crop, in catalog order.
    pub const ALL: [Self; 3] = [Self::Wheat, Self::Tomato, Self::Corn];

    /// Lowercase identifier used in config files and commands.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wheat => "wheat",
            Self::Tomato => "tomato",
            Self::Corn => "corn",
        }
    }
}

impl core::fmt::Display for CropId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known crop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown crop: {0}")]
pub struct UnknownCrop(pub String);

impl core::str::FromStr for CropId {
    type Err = UnknownCrop;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wheat" => Ok(Self::Wheat),
            "tomato" => Ok(Self::Tomato),
            "corn" => Ok(Self::Corn),
            other => Err(UnknownCrop(other.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Plot status
// ---------------------------------------------------------------------------

/// Lifecycle stage of a single plot.
///
/// `Empty -> Growing` on plant, `Growing -> Ready` when progress reaches
/// 100, `Ready -> Empty` on harvest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum PlotStatus {
    /// Nothing planted.
    Empty,
    /// A crop is growing.
    Growing,
    /// The crop is mature and can be harvested.
    Ready,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_id_parses_case_insensitively() {
        assert_eq!("Wheat".parse::<CropId>(), Ok(CropId::Wheat));
        assert_eq!(" corn ".parse::<CropId>(), Ok(CropId::Corn));
        assert_eq!(
            "rice".parse::<CropId>(),
            Err(UnknownCrop("rice".to_owned()))
        );
    }

    #[test]
    fn crop_id_serde_uses_lowercase() {
        let json = serde_json::to_string(&CropId::Tomato).ok();
        assert_eq!(json.as_deref(), Some("\"tomato\""));
    }

    #[test]
    fn plot_status_serde_matches_wire_names() {
        let json = serde_json::to_string(&PlotStatus::Growing).ok();
        assert_eq!(json.as_deref(), Some("\"GROWING\""));
    }
}
