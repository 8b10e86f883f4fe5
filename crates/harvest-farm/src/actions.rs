//! Player actions: plant, harvest, fulfil an order, and click a plot.
//!
//! Every action borrows the current state and returns either a new state
//! or an [`ActionRejection`]. The input is never modified, so replaying a
//! rejected action is always safe.

use harvest_types::{CropId, GameState, OrderId, PlotId, PlotStatus};

use crate::catalog::crop_def;
use crate::error::{ActionRejection, PlotAction};
use crate::plots;

/// Plant `crop` on `plot_id`, paying its cost.
///
/// Funds are checked first: a player who cannot afford the crop is told so
/// even when the plot is occupied.
pub fn plant(
    state: &GameState,
    plot_id: PlotId,
    crop: CropId,
) -> Result<GameState, ActionRejection> {
    let cost = u64::from(crop_def(crop).cost);
    let money = state
        .money
        .checked_sub(cost)
        .ok_or(ActionRejection::InsufficientFunds {
            crop,
            cost,
            available: state.money,
        })?;

    let mut next = state.clone();
    let plot = next
        .plots
        .get_mut(plot_id.index())
        .ok_or(ActionRejection::UnknownPlot(plot_id))?;
    if !plots::plant(plot, crop) {
        return Err(ActionRejection::InvalidPlotState {
            plot: plot_id,
            status: plot.status,
            action: PlotAction::Plant,
        });
    }
    next.money = money;
    Ok(next)
}

/// Harvest a ready plot into the inventory.
pub fn harvest(state: &GameState, plot_id: PlotId) -> Result<GameState, ActionRejection> {
    let mut next = state.clone();
    let plot = next
        .plots
        .get_mut(plot_id.index())
        .ok_or(ActionRejection::UnknownPlot(plot_id))?;
    let status = plot.status;
    let crop = plots::harvest(plot).ok_or(ActionRejection::InvalidPlotState {
        plot: plot_id,
        status,
        action: PlotAction::Harvest,
    })?;

    next.inventory
        .add(crop, 1)
        .ok_or(ActionRejection::ArithmeticOverflow)?;
    next.stats.crops_harvested = next
        .stats
        .crops_harvested
        .checked_add(1)
        .ok_or(ActionRejection::ArithmeticOverflow)?;
    Ok(next)
}

/// Deliver an outstanding order from stock and collect its reward.
pub fn fulfill_order(state: &GameState, order_id: OrderId) -> Result<GameState, ActionRejection> {
    let order = state
        .order(order_id)
        .ok_or(ActionRejection::UnknownOrder(order_id))?;

    let mut next = state.clone();
    next.inventory
        .remove(order.crop_id, order.quantity)
        .ok_or_else(|| ActionRejection::InsufficientInventory {
            order_id,
            crop: order.crop_id,
            crop_name: crop_def(order.crop_id).name,
            required: order.quantity,
            available: state.inventory.count(order.crop_id),
        })?;

    next.money = next
        .money
        .checked_add(order.reward)
        .ok_or(ActionRejection::ArithmeticOverflow)?;
    next.stats.total_earned = next
        .stats
        .total_earned
        .checked_add(order.reward)
        .ok_or(ActionRejection::ArithmeticOverflow)?;
    next.stats.orders_fulfilled = next
        .stats
        .orders_fulfilled
        .checked_add(1)
        .ok_or(ActionRejection::ArithmeticOverflow)?;
    next.orders.retain(|o| o.id != order_id);
    Ok(next)
}

/// A single click on a plot: plant `selected` if empty, harvest if ready.
///
/// Clicking a growing plot is rejected as a premature harvest.
pub fn interact(
    state: &GameState,
    plot_id: PlotId,
    selected: CropId,
) -> Result<GameState, ActionRejection> {
    let plot = state
        .plot(plot_id)
        .ok_or(ActionRejection::UnknownPlot(plot_id))?;
    match plot.status {
        PlotStatus::Empty => plant(state, plot_id, selected),
        PlotStatus::Ready | PlotStatus::Growing => harvest(state, plot_id),
    }
}
