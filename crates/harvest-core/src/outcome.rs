//! Win and loss evaluation.
//!
//! [`evaluate_outcome`] is a pure predicate pair over a [`GameState`].
//! [`OutcomeLatch`] makes the result sticky for the rest of a session.

use harvest_farm::cheapest_cost;
use harvest_farm::economy::EconomyRules;
use harvest_types::{GameState, Outcome};

/// Evaluate the win and loss predicates for `state`.
///
/// Win: money has reached the goal. Loss: the player cannot afford the
/// cheapest crop, holds no stock, and has nothing planted. Win takes
/// precedence, so both flags are never set together.
pub fn evaluate_outcome(state: &GameState, rules: &EconomyRules) -> Outcome {
    let won = state.money >= rules.win_goal;
    let can_continue = state.money >= u64::from(cheapest_cost())
        || state.inventory.has_any()
        || state.any_plot_in_use();
    Outcome {
        won,
        lost: !won && !can_continue,
    }
}

/// Sticky outcome holder for one session.
///
/// The first terminal outcome observed is kept until [`reset`](Self::reset).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeLatch {
    latched: Outcome,
}

impl OutcomeLatch {
    /// A latch with no outcome recorded.
    pub const fn new() -> Self {
        Self {
            latched: Outcome {
                won: false,
                lost: false,
            },
        }
    }

    /// Feed a freshly evaluated outcome.
    ///
    /// Returns `Some` only on the call that first latches a terminal
    /// outcome; later calls return `None` and leave the latch unchanged.
    pub const fn observe(&mut self, outcome: Outcome) -> Option<Outcome> {
        if self.latched.is_terminal() || !outcome.is_terminal() {
            return None;
        }
        self.latched = outcome;
        Some(outcome)
    }

    /// The latched outcome (non-terminal until something is observed).
    pub const fn outcome(&self) -> Outcome {
        self.latched
    }

    /// Whether a terminal outcome has been latched.
    pub const fn is_terminal(&self) -> bool {
        self.latched.is_terminal()
    }

    /// Clear the latch for a new session.
    pub const fn reset(&mut self) {
        self.latched = Outcome {
            won: false,
            lost: false,
        };
    }
}
