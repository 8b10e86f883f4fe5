//! Event subscriber that narrates the session to the log.
//!
//! Stands in for a presentation layer: it subscribes to the controller's
//! [`FarmEvent`] stream, logs player feedback and notable changes, and
//! emits the full snapshot as JSON at trace level.

use tokio::sync::broadcast;
use tracing::{debug, info, trace, warn};

use harvest_core::controller::{FarmEvent, FarmEventKind};
use harvest_farm::crop_def;

/// Consume events until the channel closes.
pub async fn run(mut rx: broadcast::Receiver<FarmEvent>) {
    loop {
        match rx.recv().await {
            Ok(event) => log_event(&event),
            Err(broadcast::error::RecvError::Lagged(n)) => {
                debug!(skipped = n, "Event log lagged, skipping ahead");
            }
            Err(broadcast::error::RecvError::Closed) => {
                debug!("Event channel closed, event log stopping");
                return;
            }
        }
    }
}

fn log_event(event: &FarmEvent) {
    if let Some(message) = event.kind.message() {
        info!(tick = event.tick, money = event.state.money, "{message}");
    }

    match &event.kind {
        FarmEventKind::TickCompleted { changes } => {
            for plot in &changes.plots_ready {
                let crop = event
                    .state
                    .plot(*plot)
                    .and_then(|p| p.crop_id)
                    .map(|c| crop_def(c).name);
                info!(tick = event.tick, plot = %plot, crop, "Ready to harvest");
            }
            if let Some(order) = changes
                .order_spawned
                .and_then(|id| event.state.order(id))
            {
                info!(
                    tick = event.tick,
                    order = %order.short_id(),
                    crop = crop_def(order.crop_id).name,
                    quantity = order.quantity,
                    reward = order.reward,
                    time_left = order.time_left,
                    "New order"
                );
            }
            for order in &event.state.orders {
                if order.is_urgent() {
                    debug!(
                        order = %order.short_id(),
                        time_left = order.time_left,
                        "Order about to expire"
                    );
                }
            }
        }
        FarmEventKind::CropSelected { crop } => {
            let def = crop_def(*crop);
            info!(crop = def.name, cost = def.cost, "Selected crop");
        }
        FarmEventKind::Planted { plot, crop } => {
            debug!(plot = %plot, crop = crop_def(*crop).name, money = event.state.money, "Planted");
        }
        FarmEventKind::Harvested { plot, crop } => {
            debug!(
                plot = %plot,
                crop = crop_def(*crop).name,
                in_stock = event.state.inventory.count(*crop),
                "Harvested"
            );
        }
        FarmEventKind::Reset => {
            info!(money = event.state.money, "New game");
        }
        FarmEventKind::OrderFulfilled { .. }
        | FarmEventKind::ActionRejected { .. }
        | FarmEventKind::OutcomeReached { .. } => {}
    }

    match serde_json::to_string(&event.state) {
        Ok(json) => trace!(tick = event.tick, state = %json, "Snapshot"),
        Err(e) => warn!(error = %e, "Failed to serialize snapshot"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use harvest_core::controller::{FarmController, PlayerCommand};
    use harvest_farm::economy::EconomyRules;
    use harvest_types::PlotId;

    use super::*;

    #[tokio::test]
    async fn stops_when_controller_is_dropped() {
        let mut farm = FarmController::new(EconomyRules::default(), 3);
        let rx = farm.subscribe();
        let task = tokio::spawn(run(rx));

        farm.handle(PlayerCommand::Plant { plot: PlotId(0) }).unwrap();
        farm.tick().unwrap();
        drop(farm);

        let joined = tokio::time::timeout(std::time::Duration::from_secs(5), task).await;
        assert!(matches!(joined, Ok(Ok(()))));
    }
}
