//! Session binary for the Harvest farm simulation.
//!
//! This is the main entry point that wires together the farm controller,
//! the real-time session loop, operator controls, the stdin command
//! reader, and the event log. It runs one session until the player wins
//! or goes bankrupt, a configured bound is reached, or the operator quits.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `harvest-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Pick the session seed
//! 4. Create the farm controller and operator state
//! 5. Start the event log, the stdin reader, and the Ctrl-C handler
//! 6. Run the session loop
//! 7. Log the result

mod commands;
mod error;
mod event_log;

use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use harvest_core::config::{HarvestConfig, LoggingConfig};
use harvest_core::controller::{FarmController, PlayerCommand, crop_label};
use harvest_core::operator::OperatorState;
use harvest_core::runner;
use harvest_types::CropId;

use crate::commands::Command;
use crate::error::EngineError;

/// Config file looked up in the working directory.
const CONFIG_PATH: &str = "harvest-config.yaml";

/// Queued player commands before the reader waits for the loop.
const COMMAND_QUEUE_CAPACITY: usize = 64;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the session loop fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!("harvest-engine starting");
    info!(
        tick_interval_ms = config.session.tick_interval_ms,
        initial_money = config.economy.initial_money,
        win_goal = config.economy.win_goal,
        max_orders = config.economy.max_orders,
        order_spawn_chance_pct = config.economy.order_spawn_chance_pct,
        "Configuration loaded"
    );

    // 3. Pick the seed. Logged so a session can be replayed.
    let seed = config.session.seed.unwrap_or_else(rand::random);
    info!(seed, "Session seed");

    // 4. Create controller and operator state.
    let mut controller = FarmController::new(config.economy.rules(), seed);
    let operator = Arc::new(OperatorState::new(
        config.session.tick_interval_ms,
        &config.simulation,
    ));
    info!(
        max_ticks = operator.max_ticks(),
        max_real_time_seconds = operator.max_real_time_seconds(),
        tick_interval_ms = operator.tick_interval_ms(),
        "Operator state initialized"
    );
    for crop in CropId::ALL {
        info!(crop = %crop, "{}", crop_label(crop));
    }

    // 5. Background tasks.
    let event_log = tokio::spawn(event_log::run(controller.subscribe()));

    let (tx, mut rx) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
    {
        let operator = Arc::clone(&operator);
        // A plain thread: a blocking stdin read cannot be cancelled, and
        // it must not hold the runtime open at shutdown.
        std::thread::spawn(move || read_commands(&tx, &operator));
    }

    {
        let operator = Arc::clone(&operator);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Ctrl-C received, stopping session");
                operator.request_stop();
            }
        });
    }

    // 6. Run the session.
    let result = runner::run_session(&mut controller, &operator, &mut rx).await?;

    // 7. Log results.
    runner::log_session_end(&result);

    drop(controller);
    let _ = event_log.await;

    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        "harvest-engine shutdown complete"
    );

    Ok(())
}

/// Load the configuration from `harvest-config.yaml`.
///
/// Looks for the config file relative to the current working directory and
/// falls back to defaults (with `HARVEST_SEED` still applied) when absent.
fn load_config() -> Result<HarvestConfig, EngineError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        Ok(HarvestConfig::from_file(config_path)?)
    } else {
        Ok(HarvestConfig::parse("")?)
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(logging: &LoggingConfig) -> Result<(), EngineError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level).map_err(|e| EngineError::Logging {
            message: format!("invalid log level {:?}: {e}", logging.level),
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

/// Forward stdin lines to the session until EOF or `quit`.
///
/// Player actions go to the session loop; pause, resume, speed, and quit
/// act on the operator state directly.
fn read_commands(tx: &mpsc::Sender<PlayerCommand>, operator: &OperatorState) {
    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "Failed to read stdin, no more commands");
                return;
            }
        };

        match commands::parse_line(&line) {
            Ok(None) => {}
            Ok(Some(Command::Player(command))) => {
                if tx.blocking_send(command).is_err() {
                    debug!("Session loop gone, command reader stopping");
                    return;
                }
            }
            Ok(Some(Command::Pause)) => {
                operator.pause();
                info!("Paused");
            }
            Ok(Some(Command::Resume)) => {
                operator.resume();
                info!("Resumed");
            }
            Ok(Some(Command::Speed(ms))) => match operator.set_tick_interval_ms(ms) {
                Some(previous) => info!(from_ms = previous, to_ms = ms, "Tick interval set"),
                None => warn!(requested_ms = ms, "Tick interval below 100ms rejected"),
            },
            Ok(Some(Command::Quit)) => {
                operator.request_stop();
                return;
            }
            Err(e) => warn!(line = %line.trim(), error = %e, "Ignoring command"),
        }
    }
    debug!("stdin closed, no more commands");
}
