//! Shared type definitions for the Harvest farm simulation.
//!
//! This crate is the single source of truth for the values that flow
//! between the simulation core and the presentation layer. Types are
//! exported to `TypeScript` via `ts-rs` so a front end can render them.
//!
//! # Modules
//!
//! - [`ids`] -- Plot indices and opaque order identifiers
//! - [`enums`] -- Crop kinds and plot lifecycle stages
//! - [`structs`] -- Plots, orders, inventory, stats, and the aggregate
//!   [`GameState`]

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{CropId, PlotStatus, UnknownCrop};
pub use ids::{OrderId, PlotId};
pub use structs::{
    GameState, Inventory, Order, Outcome, PROGRESS_COMPLETE, Plot, Stats, URGENT_TIME_LEFT,
};
