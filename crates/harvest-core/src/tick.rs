//! Tick cycle: the per-tick transition of the farm state.
//!
//! Each tick runs three steps against the same input snapshot:
//!
//! 1. **Growth** -- every growing plot gains `100 / growth_time` percent and
//!    turns ready once it reaches 100.
//! 2. **Expiry** -- every outstanding order loses one time unit; orders at
//!    zero are removed and counted as failed.
//! 3. **Arrival** -- if fewer than `max_orders` remain, a new order is
//!    appended with the configured probability.
//!
//! Orders spawned in step 3 are never aged by step 2 of the same tick. The
//! input state is not modified; the result is a fresh [`GameState`].

use rand::Rng;
use tracing::debug;

use harvest_farm::economy::EconomyRules;
use harvest_farm::{generate_order, plots};
use harvest_types::{GameState, OrderId, Outcome, PlotId};

use crate::clock::ClockError;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },
}

/// What changed during one tick, for logging and observers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickChanges {
    /// Plots that became ready this tick.
    pub plots_ready: Vec<PlotId>,
    /// Orders that expired unfulfilled this tick.
    pub orders_expired: Vec<OrderId>,
    /// The order that arrived this tick, if any.
    pub order_spawned: Option<OrderId>,
}

impl TickChanges {
    /// Whether the tick changed anything besides growth progress.
    pub fn is_quiet(&self) -> bool {
        self.plots_ready.is_empty() && self.orders_expired.is_empty() && self.order_spawned.is_none()
    }
}

/// Result of [`advance_tick`].
#[derive(Debug, Clone)]
pub struct TickResult {
    /// The state after the tick.
    pub state: GameState,
    /// What changed.
    pub changes: TickChanges,
}

/// Summary of a single tick's execution within a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// What changed.
    pub changes: TickChanges,
    /// Money after the tick.
    pub money: u64,
    /// Outstanding orders after the tick.
    pub open_orders: usize,
    /// Outcome evaluated after the tick.
    pub outcome: Outcome,
}

/// Apply one tick to `state`.
///
/// Randomness for order arrival and generation is drawn from `rng`, so a
/// seeded generator makes the tick fully deterministic.
pub fn advance_tick(state: &GameState, rules: &EconomyRules, rng: &mut impl Rng) -> TickResult {
    let mut next = state.clone();
    let mut changes = TickChanges::default();

    // --- Growth ---
    for plot in &mut next.plots {
        if plots::grow(plot) {
            changes.plots_ready.push(plot.id);
        }
    }

    // --- Expiry ---
    next.orders.retain_mut(|order| {
        order.time_left = order.time_left.saturating_sub(1);
        if order.time_left == 0 {
            changes.orders_expired.push(order.id);
            false
        } else {
            true
        }
    });
    let expired = u64::try_from(changes.orders_expired.len()).unwrap_or(u64::MAX);
    next.stats.orders_failed = next.stats.orders_failed.saturating_add(expired);

    // --- Arrival ---
    if next.orders.len() < rules.max_orders && roll_spawn(rules.order_spawn_chance_pct, rng) {
        let order = generate_order(rng);
        debug!(
            order_id = %order.id,
            crop = %order.crop_id,
            quantity = order.quantity,
            reward = order.reward,
            time_left = order.time_left,
            "Order arrived"
        );
        changes.order_spawned = Some(order.id);
        next.orders.push(order);
    }

    TickResult {
        state: next,
        changes,
    }
}

/// Roll the per-tick arrival chance. Percentages above 100 always succeed.
fn roll_spawn(chance_pct: u32, rng: &mut impl Rng) -> bool {
    rng.random_range(0..100_u32) < chance_pct
}
