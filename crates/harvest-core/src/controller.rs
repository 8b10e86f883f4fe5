//! The session state container.
//!
//! [`FarmController`] owns the only [`GameState`] of a session together
//! with everything a transition needs: the economy rules, the tick clock,
//! the seeded RNG, the player's selected crop, and the outcome latch.
//! All mutation goes through `&mut self`, so ticks and player commands
//! are serialized by construction.
//!
//! After every change the controller publishes a [`FarmEvent`] carrying
//! the new snapshot on a [`broadcast`] channel. Presentation layers
//! subscribe with [`FarmController::subscribe`] and never touch the
//! state directly.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use harvest_farm::economy::EconomyRules;
use harvest_farm::{ActionRejection, actions, crop_def};
use harvest_types::{CropId, GameState, OrderId, Outcome, PlotId};

use crate::clock::FarmClock;
use crate::outcome::{OutcomeLatch, evaluate_outcome};
use crate::tick::{self, TickChanges, TickError, TickSummary};

/// Capacity of the event channel.
///
/// A subscriber that falls behind by more than this many events receives
/// [`broadcast::error::RecvError::Lagged`] and skips to the newest one.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// How a player names an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderSelector {
    /// The full order id.
    Id(OrderId),
    /// A leading fragment of the id, as shown on the order card.
    Prefix(String),
}

/// A logical player action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Choose the crop used by subsequent plant and click commands.
    SelectCrop(CropId),
    /// Plant the selected crop.
    Plant {
        /// Target plot.
        plot: PlotId,
    },
    /// Harvest a ready plot.
    Harvest {
        /// Target plot.
        plot: PlotId,
    },
    /// Click a plot: plant if empty, harvest otherwise.
    Click {
        /// Target plot.
        plot: PlotId,
    },
    /// Deliver an order from stock.
    Fulfill {
        /// Which order.
        order: OrderSelector,
    },
    /// Start over from the initial state.
    Reset,
}

/// Whether a command was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The state (or the crop selection) changed.
    Applied,
    /// The session is over or the command matched nothing; nothing changed.
    Ignored,
}

/// What happened in a [`FarmEvent`].
#[derive(Debug, Clone, PartialEq)]
pub enum FarmEventKind {
    /// A tick was applied.
    TickCompleted {
        /// What the tick changed.
        changes: TickChanges,
    },
    /// The player selected a crop.
    CropSelected {
        /// The new selection.
        crop: CropId,
    },
    /// A crop was planted.
    Planted {
        /// The plot.
        plot: PlotId,
        /// The crop.
        crop: CropId,
    },
    /// A plot was harvested.
    Harvested {
        /// The plot.
        plot: PlotId,
        /// The crop added to the inventory.
        crop: CropId,
    },
    /// An order was delivered.
    OrderFulfilled {
        /// The order.
        order: OrderId,
        /// Money received.
        reward: u64,
    },
    /// A player action was rejected; the state is unchanged.
    ActionRejected {
        /// Why.
        reason: ActionRejection,
    },
    /// The session reached a terminal outcome.
    OutcomeReached {
        /// The outcome.
        outcome: Outcome,
    },
    /// The session restarted from the initial state.
    Reset,
}

impl FarmEventKind {
    /// Feedback text for the player, if this event warrants any.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::OrderFulfilled { reward, .. } => Some(format!("Order Fulfilled! +${reward}")),
            Self::ActionRejected { reason } if !reason.is_silent() => Some(reason.to_string()),
            Self::OutcomeReached { outcome } if outcome.won => Some("You won!".to_owned()),
            Self::OutcomeReached { .. } => Some("Bankrupt! Game over.".to_owned()),
            _ => None,
        }
    }
}

/// A change notification with the snapshot that resulted from it.
#[derive(Debug, Clone, PartialEq)]
pub struct FarmEvent {
    /// Tick count when the event was published.
    pub tick: u64,
    /// What happened.
    pub kind: FarmEventKind,
    /// The state after the change.
    pub state: GameState,
}

/// Owner of one session's state.
#[derive(Debug)]
pub struct FarmController {
    rules: EconomyRules,
    state: GameState,
    clock: FarmClock,
    rng: StdRng,
    selected: CropId,
    latch: OutcomeLatch,
    events: broadcast::Sender<FarmEvent>,
}

impl FarmController {
    /// Start a session with `rules`, drawing order randomness from `seed`.
    pub fn new(rules: EconomyRules, seed: u64) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            rules,
            state: rules.new_game(),
            clock: FarmClock::new(),
            rng: StdRng::seed_from_u64(seed),
            selected: CropId::Wheat,
            latch: OutcomeLatch::new(),
            events,
        }
    }

    /// The current state.
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// The rules this session runs with.
    pub const fn rules(&self) -> &EconomyRules {
        &self.rules
    }

    /// The latched outcome.
    pub const fn outcome(&self) -> Outcome {
        self.latch.outcome()
    }

    /// Number of ticks applied since the session (re)started.
    pub const fn tick_count(&self) -> u64 {
        self.clock.tick()
    }

    /// The crop used by plant and click commands.
    pub const fn selected_crop(&self) -> CropId {
        self.selected
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<FarmEvent> {
        self.events.subscribe()
    }

    /// Apply one tick.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::Clock`] if the tick counter would overflow; the
    /// state is unchanged in that case.
    pub fn tick(&mut self) -> Result<TickSummary, TickError> {
        let tick = self.clock.advance()?;
        let result = tick::advance_tick(&self.state, &self.rules, &mut self.rng);
        self.state = result.state;

        for plot in &result.changes.plots_ready {
            debug!(tick, plot = %plot, "Plot ready for harvest");
        }
        for order in &result.changes.orders_expired {
            info!(tick, order_id = %order, "Order expired");
        }

        self.publish(FarmEventKind::TickCompleted {
            changes: result.changes.clone(),
        });
        let outcome = self.check_outcome();

        Ok(TickSummary {
            tick,
            changes: result.changes,
            money: self.state.money,
            open_orders: self.state.orders.len(),
            outcome,
        })
    }

    /// Apply a player command.
    ///
    /// Commands other than [`PlayerCommand::Reset`] are ignored once the
    /// session has a terminal outcome.
    ///
    /// # Errors
    ///
    /// Returns the [`ActionRejection`] when the action is not allowed in
    /// the current state. The state is unchanged and an
    /// [`FarmEventKind::ActionRejected`] event is still published.
    pub fn handle(&mut self, command: PlayerCommand) -> Result<CommandStatus, ActionRejection> {
        if self.latch.is_terminal() && !matches!(command, PlayerCommand::Reset) {
            debug!(?command, "Session over, command ignored");
            return Ok(CommandStatus::Ignored);
        }

        match command {
            PlayerCommand::SelectCrop(crop) => {
                self.selected = crop;
                debug!(crop = %crop, "Crop selected");
                self.publish(FarmEventKind::CropSelected { crop });
                Ok(CommandStatus::Applied)
            }
            PlayerCommand::Plant { plot } => {
                let result = actions::plant(&self.state, plot, self.selected);
                self.commit(
                    result,
                    FarmEventKind::Planted {
                        plot,
                        crop: self.selected,
                    },
                )
            }
            PlayerCommand::Harvest { plot } => {
                let event = self.click_event(plot);
                let result = actions::harvest(&self.state, plot);
                self.commit(result, event)
            }
            PlayerCommand::Click { plot } => {
                let event = self.click_event(plot);
                let result = actions::interact(&self.state, plot, self.selected);
                self.commit(result, event)
            }
            PlayerCommand::Fulfill { order } => {
                let Some((order_id, reward)) = self.resolve_order(&order) else {
                    debug!(?order, "No outstanding order matches");
                    return Ok(CommandStatus::Ignored);
                };
                let result = actions::fulfill_order(&self.state, order_id);
                self.commit(
                    result,
                    FarmEventKind::OrderFulfilled {
                        order: order_id,
                        reward,
                    },
                )
            }
            PlayerCommand::Reset => {
                self.reset();
                Ok(CommandStatus::Applied)
            }
        }
    }

    /// Restart the session from the initial state.
    ///
    /// The crop selection and the RNG stream carry over.
    pub fn reset(&mut self) {
        self.state = self.rules.new_game();
        self.clock = FarmClock::new();
        self.latch.reset();
        info!(money = self.state.money, "Session reset");
        self.publish(FarmEventKind::Reset);
    }

    /// Replace the state with `result` on success and publish `event`, or
    /// publish the rejection.
    fn commit(
        &mut self,
        result: Result<GameState, ActionRejection>,
        event: FarmEventKind,
    ) -> Result<CommandStatus, ActionRejection> {
        match result {
            Ok(next) => {
                self.state = next;
                debug!(?event, money = self.state.money, "Action applied");
                self.publish(event);
                self.check_outcome();
                Ok(CommandStatus::Applied)
            }
            Err(reason) => {
                if reason.is_silent() {
                    debug!(%reason, "Action rejected");
                } else {
                    warn!(%reason, "Action rejected");
                }
                self.publish(FarmEventKind::ActionRejected {
                    reason: reason.clone(),
                });
                Err(reason)
            }
        }
    }

    /// The event a successful click on `plot` produces: harvest of the
    /// occupying crop, or planting the selected one.
    fn click_event(&self, plot: PlotId) -> FarmEventKind {
        match self.state.plot(plot).and_then(|p| p.crop_id) {
            Some(crop) => FarmEventKind::Harvested { plot, crop },
            None => FarmEventKind::Planted {
                plot,
                crop: self.selected,
            },
        }
    }

    /// Find the outstanding order a selector names, oldest first.
    fn resolve_order(&self, selector: &OrderSelector) -> Option<(OrderId, u64)> {
        self.state
            .orders
            .iter()
            .find(|order| match selector {
                OrderSelector::Id(id) => order.id == *id,
                OrderSelector::Prefix(prefix) => order.id.matches_prefix(prefix),
            })
            .map(|order| (order.id, order.reward))
    }

    /// Evaluate the outcome, latch it, and announce it the first time it
    /// becomes terminal.
    fn check_outcome(&mut self) -> Outcome {
        let outcome = evaluate_outcome(&self.state, &self.rules);
        if let Some(reached) = self.latch.observe(outcome) {
            info!(
                tick = self.clock.tick(),
                won = reached.won,
                lost = reached.lost,
                money = self.state.money,
                goal = self.rules.win_goal,
                "Outcome reached"
            );
            self.publish(FarmEventKind::OutcomeReached { outcome: reached });
        }
        self.latch.outcome()
    }

    fn publish(&self, kind: FarmEventKind) {
        // send fails only when nobody is subscribed.
        let _ = self.events.send(FarmEvent {
            tick: self.clock.tick(),
            kind,
            state: self.state.clone(),
        });
    }
}

/// Human-readable cost of planting `crop`, as shown in the crop picker.
pub fn crop_label(crop: CropId) -> String {
    let def = crop_def(crop);
    format!("{} {} (${})", def.icon, def.name, def.cost)
}
