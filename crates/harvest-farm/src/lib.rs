//! Crop catalog, order generation, and player actions for the Harvest
//! farm simulation.
//!
//! Everything here is a pure function over [`GameState`] values: actions
//! borrow a state and return a new one or a rejection, and randomness is
//! always supplied by the caller.
//!
//! # Modules
//!
//! - [`actions`] -- Plant, harvest, fulfil, and plot-click transitions.
//! - [`catalog`] -- Static crop table and lookups.
//! - [`economy`] -- Starting capital, win goal, grid size, order limits.
//! - [`error`] -- [`ActionRejection`] reasons.
//! - [`orders`] -- Randomized order generation and pricing.
//! - [`plots`] -- Per-plot lifecycle: plant, grow, harvest.
//!
//! [`GameState`]: harvest_types::GameState

pub mod actions;
pub mod catalog;
pub mod economy;
pub mod error;
pub mod orders;
pub mod plots;

// Re-export primary types at crate root.
pub use actions::{fulfill_order, harvest, interact, plant};
pub use catalog::{CATALOG, CropDef, cheapest_cost, crop_def};
pub use economy::{
    EconomyRules, GRID_SIZE, INITIAL_MONEY, MAX_ORDERS, ORDER_SPAWN_CHANCE_PCT, TICK_RATE_MS,
    WIN_GOAL,
};
pub use error::{ActionRejection, PlotAction};
pub use orders::generate_order;
