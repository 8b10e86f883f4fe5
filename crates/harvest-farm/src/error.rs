//! Rejection reasons for player actions.
//!
//! A rejected action never changes state. Rejections split into two
//! groups: user-facing ones the presentation layer should surface
//! (insufficient funds or inventory) and silent ones that only reflect a
//! stale click (wrong plot state, unknown plot or order).

use harvest_types::{CropId, OrderId, PlotId, PlotStatus};

/// The plot operation a player attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotAction {
    /// Plant a crop on an empty plot.
    Plant,
    /// Harvest a ready plot.
    Harvest,
}

impl core::fmt::Display for PlotAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Plant => f.write_str("plant"),
            Self::Harvest => f.write_str("harvest"),
        }
    }
}

/// Why a player action was rejected.
///
/// The `Display` text of the user-facing variants is the feedback message
/// shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionRejection {
    /// Not enough money to plant the crop.
    #[error("Not enough money! Need ${cost}")]
    InsufficientFunds {
        /// The crop the player tried to plant.
        crop: CropId,
        /// Planting cost.
        cost: u64,
        /// Money on hand.
        available: u64,
    },

    /// Not enough stock to deliver the order.
    #[error("Need more {crop_name}!")]
    InsufficientInventory {
        /// The order the player tried to fulfil.
        order_id: OrderId,
        /// Requested crop.
        crop: CropId,
        /// Display name of the requested crop.
        crop_name: &'static str,
        /// Requested quantity.
        required: u32,
        /// Quantity in stock.
        available: u32,
    },

    /// The plot is in the wrong lifecycle stage for the action.
    #[error("plot {plot} is {status:?}, cannot {action}")]
    InvalidPlotState {
        /// The targeted plot.
        plot: PlotId,
        /// Its current stage.
        status: PlotStatus,
        /// What the player tried to do.
        action: PlotAction,
    },

    /// The plot index is outside the grid.
    #[error("plot {0} does not exist")]
    UnknownPlot(PlotId),

    /// The order is not outstanding (already fulfilled, expired, or never
    /// existed).
    #[error("order {0} does not exist")]
    UnknownOrder(OrderId),

    /// A money or counter update would overflow.
    #[error("arithmetic overflow while applying action")]
    ArithmeticOverflow,
}

impl ActionRejection {
    /// Whether this rejection reflects a stale click and should not be
    /// shown to the player.
    pub const fn is_silent(&self) -> bool {
        matches!(
            self,
            Self::InvalidPlotState { .. } | Self::UnknownPlot(_) | Self::UnknownOrder(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_messages() {
        let funds = ActionRejection::InsufficientFunds {
            crop: CropId::Corn,
            cost: 40,
            available: 12,
        };
        assert_eq!(funds.to_string(), "Not enough money! Need $40");
        assert!(!funds.is_silent());

        let stock = ActionRejection::InsufficientInventory {
            order_id: OrderId::from_random_bytes([0; 16]),
            crop: CropId::Tomato,
            crop_name: "Tomato",
            required: 2,
            available: 1,
        };
        assert_eq!(stock.to_string(), "Need more Tomato!");
        assert!(!stock.is_silent());
    }

    #[test]
    fn stale_clicks_are_silent() {
        let occupied = ActionRejection::InvalidPlotState {
            plot: PlotId(3),
            status: PlotStatus::Growing,
            action: PlotAction::Plant,
        };
        assert!(occupied.is_silent());
        assert_eq!(occupied.to_string(), "plot 3 is Growing, cannot plant");
        assert!(ActionRejection::UnknownPlot(PlotId(99)).is_silent());
        assert!(ActionRejection::UnknownOrder(OrderId::from_random_bytes([1; 16])).is_silent());
        assert!(!ActionRejection::ArithmeticOverflow.is_silent());
    }
}
