//! Core state structs for the farm simulation.
//!
//! [`GameState`] is the aggregate root. It is a plain value: transitions
//! take a borrowed state and return a new one, so a rejected action leaves
//! the caller's copy untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{CropId, PlotStatus};
use crate::ids::{OrderId, PlotId};

/// Progress value of a mature plot.
pub const PROGRESS_COMPLETE: f64 = 100.0;

/// Orders with less remaining time than this are flagged as urgent.
pub const URGENT_TIME_LEFT: u32 = 10;

// ---------------------------------------------------------------------------
// Plot
// ---------------------------------------------------------------------------

/// One grid cell capable of holding a single crop through its growth cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Plot {
    /// Fixed grid position.
    pub id: PlotId,
    /// Lifecycle stage.
    pub status: PlotStatus,
    /// The occupying crop; present iff `status != Empty`.
    pub crop_id: Option<CropId>,
    /// Growth progress in `[0, 100]`. Exactly 100 iff `Ready`.
    pub progress: f64,
}

impl Plot {
    /// A fresh, unplanted plot.
    pub const fn empty(id: PlotId) -> Self {
        Self {
            id,
            status: PlotStatus::Empty,
            crop_id: None,
            progress: 0.0,
        }
    }

    /// Whether nothing is planted here.
    pub const fn is_empty(&self) -> bool {
        matches!(self.status, PlotStatus::Empty)
    }

    /// Whether the crop can be harvested.
    pub const fn is_ready(&self) -> bool {
        matches!(self.status, PlotStatus::Ready)
    }

    /// Progress rounded up to a whole percent, as shown on the plot tile.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn progress_percent(&self) -> u32 {
        // Clamped to [0, 100] first, so the cast cannot truncate.
        self.progress.clamp(0.0, PROGRESS_COMPLETE).ceil() as u32
    }
}

// ---------------------------------------------------------------------------
// Order
// ---------------------------------------------------------------------------

/// A time-limited request for a quantity of one crop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Order {
    /// Unique id within the session.
    pub id: OrderId,
    /// Requested crop.
    pub crop_id: CropId,
    /// Requested quantity (1 to 3).
    pub quantity: u32,
    /// Money paid on fulfilment.
    pub reward: u64,
    /// Ticks left before the order expires.
    pub time_left: u32,
    /// Time window at creation. Display only.
    pub total_time: u32,
}

impl Order {
    /// Remaining fraction of the time window, in `[0, 1]`.
    pub fn time_ratio(&self) -> f64 {
        if self.total_time == 0 {
            return 0.0;
        }
        (f64::from(self.time_left) / f64::from(self.total_time)).clamp(0.0, 1.0)
    }

    /// Whether the order is close to expiring.
    pub const fn is_urgent(&self) -> bool {
        self.time_left < URGENT_TIME_LEFT
    }

    /// Abbreviated id for order cards.
    pub fn short_id(&self) -> String {
        self.id.short()
    }

    /// Whether `inventory` holds enough of the requested crop.
    pub fn can_fulfill(&self, inventory: &Inventory) -> bool {
        inventory.count(self.crop_id) >= self.quantity
    }
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// Harvested crop counts, one entry per crop kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Inventory {
    counts: BTreeMap<CropId, u32>,
}

impl Inventory {
    /// An inventory holding zero of every crop.
    pub fn new() -> Self {
        Self {
            counts: CropId::ALL.iter().map(|crop| (*crop, 0)).collect(),
        }
    }

    /// Number of `crop` held.
    pub fn count(&self, crop: CropId) -> u32 {
        self.counts.get(&crop).copied().unwrap_or(0)
    }

    /// Add `quantity` of `crop`. Returns the new count, or `None` on
    /// overflow (inventory unchanged).
    pub fn add(&mut self, crop: CropId, quantity: u32) -> Option<u32> {
        let next = self.count(crop).checked_add(quantity)?;
        self.counts.insert(crop, next);
        Some(next)
    }

    /// Remove `quantity` of `crop`. Returns the new count, or `None` if
    /// fewer than `quantity` are held (inventory unchanged).
    pub fn remove(&mut self, crop: CropId, quantity: u32) -> Option<u32> {
        let next = self.count(crop).checked_sub(quantity)?;
        self.counts.insert(crop, next);
        Some(next)
    }

    /// Whether any crop count is non-zero.
    pub fn has_any(&self) -> bool {
        self.counts.values().any(|count| *count > 0)
    }

    /// Iterate over `(crop, count)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (CropId, u32)> + '_ {
        self.counts.iter().map(|(crop, count)| (*crop, *count))
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Session counters. Each only ever increases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Stats {
    /// Money earned from fulfilled orders.
    pub total_earned: u64,
    /// Plots harvested.
    pub crops_harvested: u64,
    /// Orders delivered.
    pub orders_fulfilled: u64,
    /// Orders that expired unfulfilled.
    pub orders_failed: u64,
}

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

/// The complete simulation state of one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameState {
    /// Available capital.
    pub money: u64,
    /// Harvested crops awaiting delivery.
    pub inventory: Inventory,
    /// The fixed farm grid, indexed by [`PlotId`].
    pub plots: Vec<Plot>,
    /// Outstanding orders, oldest first.
    pub orders: Vec<Order>,
    /// Session counters.
    pub stats: Stats,
}

impl GameState {
    /// Start-of-session state: `grid_size` empty plots, no orders, no stock.
    pub fn new(initial_money: u64, grid_size: usize) -> Self {
        Self {
            money: initial_money,
            inventory: Inventory::new(),
            plots: (0..grid_size).map(|i| Plot::empty(PlotId(i))).collect(),
            orders: Vec::new(),
            stats: Stats::default(),
        }
    }

    /// Look up a plot by id.
    pub fn plot(&self, id: PlotId) -> Option<&Plot> {
        self.plots.get(id.index())
    }

    /// Look up an outstanding order by id.
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    /// Whether any plot is planted (growing or ready).
    pub fn any_plot_in_use(&self) -> bool {
        self.plots.iter().any(|plot| !plot.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Win/loss flags derived from a [`GameState`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Outcome {
    /// Money reached the goal.
    pub won: bool,
    /// No money, stock, or planted plots remain.
    pub lost: bool,
}

impl Outcome {
    /// Whether the session has reached an end state.
    pub const fn is_terminal(self) -> bool {
        self.won || self.lost
    }
}
