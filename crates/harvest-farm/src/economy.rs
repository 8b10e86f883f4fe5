//! Economy table: starting capital, win goal, grid size, and order limits.

use serde::{Deserialize, Serialize};

use harvest_types::GameState;

/// Money at the start of a session.
pub const INITIAL_MONEY: u64 = 50;

/// Money needed to win.
pub const WIN_GOAL: u64 = 2000;

/// Number of plots on the farm (a 4x4 grid).
pub const GRID_SIZE: usize = 16;

/// Maximum number of outstanding orders.
pub const MAX_ORDERS: usize = 4;

/// Real-time length of one tick in milliseconds.
pub const TICK_RATE_MS: u64 = 1000;

/// Chance per tick, in percent, that a new order arrives when below the cap.
pub const ORDER_SPAWN_CHANCE_PCT: u32 = 30;

/// The economy parameters a session runs with.
///
/// Defaults are the constants above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomyRules {
    /// Money at the start of a session.
    pub initial_money: u64,
    /// Money needed to win.
    pub win_goal: u64,
    /// Maximum number of outstanding orders.
    pub max_orders: usize,
    /// Per-tick order arrival chance in percent (clamped to 100).
    pub order_spawn_chance_pct: u32,
}

impl EconomyRules {
    /// Build the start-of-session state for these rules.
    pub fn new_game(&self) -> GameState {
        GameState::new(self.initial_money, GRID_SIZE)
    }
}

impl Default for EconomyRules {
    fn default() -> Self {
        Self {
            initial_money: INITIAL_MONEY,
            win_goal: WIN_GOAL,
            max_orders: MAX_ORDERS,
            order_spawn_chance_pct: ORDER_SPAWN_CHANCE_PCT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_game_matches_table() {
        let state = EconomyRules::default().new_game();
        assert_eq!(state.money, 50);
        assert_eq!(state.plots.len(), GRID_SIZE);
        assert!(state.orders.is_empty());
        assert_eq!(state.stats, harvest_types::Stats::default());
    }
}
