//! Session loop runner with operator controls.
//!
//! This module provides [`run_session`], the top-level async function that
//! drives a [`FarmController`] in real time with support for:
//!
//! - **Fixed-period ticks**: a [`tokio::time::Interval`] with
//!   [`MissedTickBehavior::Delay`], so a late tick is deferred, never doubled
//! - **Player commands**: applied between ticks from an `mpsc` channel
//! - **Bounded sessions**: stop after `max_ticks` or `max_real_time_seconds`
//! - **Pause/resume** and **variable tick speed** at runtime
//! - **Clean shutdown**: a stop request never interrupts a tick in progress
//!
//! Each `select!` branch runs to completion before the next one is polled,
//! so a tick and a player command are never interleaved.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use harvest_types::GameState;

use crate::controller::{CommandStatus, FarmController, PlayerCommand};
use crate::operator::{OperatorState, SessionEndReason};
use crate::tick::{TickError, TickSummary};

/// Errors that can occur during the session run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick execution failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

/// Result of the session run.
#[derive(Debug)]
pub struct SessionResult {
    /// The reason the session ended.
    pub end_reason: SessionEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed, across resets.
    pub total_ticks: u64,
    /// Total number of player commands applied.
    pub commands_applied: u64,
    /// The state when the session ended.
    pub final_state: GameState,
}

/// Run the session loop until a termination condition is met.
///
/// Terminates on a win or loss, when the operator's tick or time bound is
/// reached, or on a stop request. A closed command channel does not end
/// the session; the clock keeps running without a player.
///
/// # Errors
///
/// Returns [`RunnerError`] if a tick execution fails unrecoverably.
pub async fn run_session(
    controller: &mut FarmController,
    operator: &Arc<OperatorState>,
    commands: &mut mpsc::Receiver<PlayerCommand>,
) -> Result<SessionResult, RunnerError> {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;
    let mut commands_applied: u64 = 0;
    let mut commands_open = true;

    let mut period_ms = operator.tick_interval_ms();
    let mut interval = tick_interval(period_ms);

    info!(
        max_ticks = operator.max_ticks(),
        max_real_time_seconds = operator.max_real_time_seconds(),
        tick_interval_ms = period_ms,
        money = controller.state().money,
        goal = controller.rules().win_goal,
        "Session starting"
    );

    let end_reason = loop {
        // --- Check stop request ---
        if operator.is_stop_requested() {
            info!("Operator stop requested");
            break SessionEndReason::OperatorStop;
        }

        // --- Check time limit ---
        if operator.time_limit_reached() {
            info!(
                max_seconds = operator.max_real_time_seconds(),
                elapsed = operator.elapsed_seconds(),
                "Real-time limit reached"
            );
            break SessionEndReason::MaxRealTimeReached;
        }

        // --- Check pause ---
        if operator.is_paused() {
            info!("Session paused, waiting for resume...");
            tokio::select! {
                biased;
                () = operator.stopped() => {}
                () = operator.wait_if_paused() => {
                    info!("Session resumed");
                    interval.reset();
                }
            }
            continue;
        }

        // --- Pick up speed changes ---
        let current_ms = operator.tick_interval_ms();
        if current_ms != period_ms {
            info!(from_ms = period_ms, to_ms = current_ms, "Tick interval changed");
            period_ms = current_ms;
            interval = tick_interval(period_ms);
        }

        tokio::select! {
            biased;

            () = operator.stopped() => {}

            _ = interval.tick() => {
                // Pause may have been requested while waiting.
                if operator.is_paused() {
                    continue;
                }
                let summary = controller.tick()?;
                total_ticks = total_ticks.saturating_add(1);
                log_tick(&summary);

                if let Some(reason) = outcome_reason(controller) {
                    last_summary = Some(summary);
                    break reason;
                }
                if operator.tick_limit_reached(total_ticks) {
                    info!(
                        tick = summary.tick,
                        max_ticks = operator.max_ticks(),
                        "Tick limit reached"
                    );
                    last_summary = Some(summary);
                    break SessionEndReason::MaxTicksReached;
                }
                last_summary = Some(summary);
            }

            command = commands.recv(), if commands_open => {
                let Some(command) = command else {
                    debug!("Command channel closed, continuing without a player");
                    commands_open = false;
                    continue;
                };
                // Rejections are logged and published by the controller.
                if let Ok(CommandStatus::Applied) = controller.handle(command) {
                    commands_applied = commands_applied.saturating_add(1);
                }
                if let Some(reason) = outcome_reason(controller) {
                    break reason;
                }
            }
        }
    };

    operator.set_end_reason(end_reason).await;
    Ok(SessionResult {
        end_reason,
        final_summary: last_summary,
        total_ticks,
        commands_applied,
        final_state: controller.state().clone(),
    })
}

/// Log the session end sequence.
///
/// This should be called after [`run_session`] returns.
pub fn log_session_end(result: &SessionResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        commands_applied = result.commands_applied,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        "Session ended"
    );

    let stats = &result.final_state.stats;
    info!(
        money = result.final_state.money,
        total_earned = stats.total_earned,
        crops_harvested = stats.crops_harvested,
        orders_fulfilled = stats.orders_fulfilled,
        orders_failed = stats.orders_failed,
        "Final farm summary"
    );

    if result.final_summary.is_none() {
        warn!("Session ended with no ticks executed");
    }
}

/// An interval whose first tick fires one period from now.
fn tick_interval(period_ms: u64) -> Interval {
    let period = Duration::from_millis(period_ms.max(1));
    let start = Instant::now().checked_add(period).unwrap_or_else(Instant::now);
    let mut interval = tokio::time::interval_at(start, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// The end reason for a latched outcome, if the session is over.
const fn outcome_reason(controller: &FarmController) -> Option<SessionEndReason> {
    let outcome = controller.outcome();
    if outcome.won {
        Some(SessionEndReason::Won)
    } else if outcome.lost {
        Some(SessionEndReason::Lost)
    } else {
        None
    }
}

fn log_tick(summary: &TickSummary) {
    if summary.changes.is_quiet() {
        debug!(
            tick = summary.tick,
            money = summary.money,
            open_orders = summary.open_orders,
            "Tick completed"
        );
    } else {
        info!(
            tick = summary.tick,
            money = summary.money,
            open_orders = summary.open_orders,
            plots_ready = summary.changes.plots_ready.len(),
            orders_expired = summary.changes.orders_expired.len(),
            order_spawned = summary.changes.order_spawned.is_some(),
            "Tick completed"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use harvest_farm::economy::EconomyRules;
    use harvest_types::{PlotId, PlotStatus};

    use super::*;
    use crate::config::SimulationBoundsConfig;

    fn quiet_rules() -> EconomyRules {
        EconomyRules {
            order_spawn_chance_pct: 0,
            ..EconomyRules::default()
        }
    }

    fn operator(max_ticks: u64) -> Arc<OperatorState> {
        let bounds = SimulationBoundsConfig {
            max_ticks,
            max_real_time_seconds: 0,
        };
        Arc::new(OperatorState::new(1000, &bounds))
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_by_max_ticks() {
        let mut farm = FarmController::new(quiet_rules(), 1);
        let (_tx, mut rx) = mpsc::channel(8);
        let operator = operator(5);

        let result = run_session(&mut farm, &operator, &mut rx).await.unwrap();

        assert_eq!(result.end_reason, SessionEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 5);
        assert_eq!(result.final_summary.map(|s| s.tick), Some(5));
        assert_eq!(
            operator.end_reason().await,
            Some(SessionEndReason::MaxTicksReached)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn operator_stop_before_first_tick() {
        let mut farm = FarmController::new(quiet_rules(), 1);
        let (_tx, mut rx) = mpsc::channel(8);
        let operator = operator(0);
        operator.request_stop();

        let result = run_session(&mut farm, &operator, &mut rx).await.unwrap();

        assert_eq!(result.end_reason, SessionEndReason::OperatorStop);
        assert_eq!(result.total_ticks, 0);
        assert!(result.final_summary.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_during_run_ends_session() {
        let mut farm = FarmController::new(quiet_rules(), 1);
        let (_tx, mut rx) = mpsc::channel(8);
        let operator = operator(0);
        let stopper = {
            let operator = Arc::clone(&operator);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(3500)).await;
                operator.request_stop();
            })
        };

        let result = run_session(&mut farm, &operator, &mut rx).await.unwrap();
        stopper.await.unwrap();

        assert_eq!(result.end_reason, SessionEndReason::OperatorStop);
        assert_eq!(result.total_ticks, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn reaching_goal_wins() {
        let rules = EconomyRules {
            win_goal: 50,
            ..quiet_rules()
        };
        let mut farm = FarmController::new(rules, 1);
        let (_tx, mut rx) = mpsc::channel(8);
        let operator = operator(100);

        let result = run_session(&mut farm, &operator, &mut rx).await.unwrap();

        assert_eq!(result.end_reason, SessionEndReason::Won);
        assert_eq!(result.total_ticks, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn bankrupt_start_loses() {
        let rules = EconomyRules {
            initial_money: 0,
            ..quiet_rules()
        };
        let mut farm = FarmController::new(rules, 1);
        let (_tx, mut rx) = mpsc::channel(8);
        let operator = operator(100);

        let result = run_session(&mut farm, &operator, &mut rx).await.unwrap();

        assert_eq!(result.end_reason, SessionEndReason::Lost);
    }

    #[tokio::test(start_paused = true)]
    async fn commands_apply_between_ticks() {
        let mut farm = FarmController::new(quiet_rules(), 1);
        let (tx, mut rx) = mpsc::channel(8);
        tx.send(PlayerCommand::Plant { plot: PlotId(0) }).await.unwrap();
        let operator = operator(5);

        let result = run_session(&mut farm, &operator, &mut rx).await.unwrap();

        assert_eq!(result.commands_applied, 1);
        assert_eq!(result.final_state.money, 45);
        assert_eq!(
            result.final_state.plot(PlotId(0)).map(|p| p.status),
            Some(PlotStatus::Ready)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn closed_channel_keeps_clock_running() {
        let mut farm = FarmController::new(quiet_rules(), 1);
        let (tx, mut rx) = mpsc::channel::<PlayerCommand>(8);
        drop(tx);
        let operator = operator(3);

        let result = run_session(&mut farm, &operator, &mut rx).await.unwrap();

        assert_eq!(result.end_reason, SessionEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn paused_session_waits_for_resume() {
        let mut farm = FarmController::new(quiet_rules(), 1);
        let (_tx, mut rx) = mpsc::channel(8);
        let operator = operator(2);
        operator.pause();
        let resumer = {
            let operator = Arc::clone(&operator);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(30)).await;
                operator.resume();
            })
        };
        let started = Instant::now();

        let result = run_session(&mut farm, &operator, &mut rx).await.unwrap();
        resumer.await.unwrap();

        assert_eq!(result.end_reason, SessionEndReason::MaxTicksReached);
        assert!(started.elapsed() >= Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn speed_change_takes_effect() {
        let mut farm = FarmController::new(quiet_rules(), 1);
        let (_tx, mut rx) = mpsc::channel(8);
        let operator = operator(10);
        assert_eq!(operator.set_tick_interval_ms(100), Some(1000));
        let started = Instant::now();

        let result = run_session(&mut farm, &operator, &mut rx).await.unwrap();

        assert_eq!(result.total_ticks, 10);
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
