//! Order generation: random delivery requests priced from the catalog.
//!
//! # Pricing
//!
//! | Field    | Formula                                              |
//! |----------|------------------------------------------------------|
//! | crop     | uniform over the catalog                             |
//! | quantity | uniform over `1..=3`                                 |
//! | reward   | `round(order_value * quantity * (1 + u))`, `u` in `[0, 0.2)` |
//! | time     | `growth_time * quantity * 3 + 15`                    |
//!
//! Slow crops get proportionally longer windows; the flat buffer covers
//! the time needed to reach an empty plot.
//!
//! # Determinism
//!
//! All draws come from the caller's RNG, including the order id, so a
//! seeded generator reproduces the same order stream.

use rand::Rng;
use rand::seq::IndexedRandom;

use harvest_types::{CropId, Order, OrderId};

use crate::catalog::{CropDef, crop_def};

/// Smallest quantity an order asks for.
pub const MIN_ORDER_QUANTITY: u32 = 1;

/// Largest quantity an order asks for.
pub const MAX_ORDER_QUANTITY: u32 = 3;

/// Upper bound (exclusive) of the random reward premium.
pub const MAX_REWARD_PREMIUM: f64 = 0.2;

/// Time-window multiplier applied to `growth_time * quantity`.
pub const TIME_WINDOW_FACTOR: u32 = 3;

/// Flat number of ticks added to every time window.
pub const TIME_WINDOW_BUFFER: u32 = 15;

/// Draw a fresh order.
pub fn generate_order(rng: &mut impl Rng) -> Order {
    let crop_id = CropId::ALL.choose(rng).copied().unwrap_or(CropId::Wheat);
    let quantity = rng.random_range(MIN_ORDER_QUANTITY..=MAX_ORDER_QUANTITY);
    let premium = rng.random_range(0.0..MAX_REWARD_PREMIUM);
    let def = crop_def(crop_id);
    let window = time_window(def, quantity);

    Order {
        id: OrderId::from_random_bytes(rng.random()),
        crop_id,
        quantity,
        reward: order_reward(def, quantity, premium),
        time_left: window,
        total_time: window,
    }
}

/// Reward for `quantity` units of `def` with a fractional `premium`.
///
/// Negative premiums are treated as zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn order_reward(def: &CropDef, quantity: u32, premium: f64) -> u64 {
    let base = f64::from(def.order_value) * f64::from(quantity);
    // Non-negative and far below 2^53 for catalog values, so the cast is exact.
    (base * (1.0 + premium.max(0.0))).round() as u64
}

/// Ticks an order for `quantity` units of `def` stays open.
pub const fn time_window(def: &CropDef, quantity: u32) -> u32 {
    def.growth_time
        .saturating_mul(quantity)
        .saturating_mul(TIME_WINDOW_FACTOR)
        .saturating_add(TIME_WINDOW_BUFFER)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn reward_applies_premium_and_rounds() {
        let wheat = crop_def(CropId::Wheat);
        assert_eq!(order_reward(wheat, 1, 0.0), 15);
        assert_eq!(order_reward(wheat, 2, 0.1), 33);
        // 125 * 3 * 1.19 = 446.25
        assert_eq!(order_reward(crop_def(CropId::Corn), 3, 0.19), 446);
        assert_eq!(order_reward(wheat, 1, -0.5), 15);
    }

    #[test]
    fn time_window_scales_with_growth() {
        assert_eq!(time_window(crop_def(CropId::Wheat), 1), 30);
        assert_eq!(time_window(crop_def(CropId::Tomato), 2), 87);
        assert_eq!(time_window(crop_def(CropId::Corn), 3), 240);
    }

    #[test]
    fn generated_orders_stay_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            let order = generate_order(&mut rng);
            let def = crop_def(order.crop_id);
            assert!((MIN_ORDER_QUANTITY..=MAX_ORDER_QUANTITY).contains(&order.quantity));

            let base = u64::from(def.order_value) * u64::from(order.quantity);
            assert!(order.reward >= base);
            // Premium is below 20%, rounding can add at most half a unit.
            assert!(order.reward * 10 <= base * 12 + 5);

            assert_eq!(order.time_left, order.total_time);
            assert_eq!(order.total_time, time_window(def, order.quantity));
        }
    }

    #[test]
    fn generated_ids_are_unique() {
        let mut rng = SmallRng::seed_from_u64(11);
        let ids: BTreeSet<OrderId> = (0..1000).map(|_| generate_order(&mut rng).id).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn same_seed_same_orders() {
        let mut a = SmallRng::seed_from_u64(99);
        let mut b = SmallRng::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(generate_order(&mut a), generate_order(&mut b));
        }
    }

    #[test]
    fn every_crop_and_quantity_is_drawn() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut crops = BTreeSet::new();
        let mut quantities = BTreeSet::new();
        for _ in 0..300 {
            let order = generate_order(&mut rng);
            crops.insert(order.crop_id);
            quantities.insert(order.quantity);
        }
        assert_eq!(crops.len(), 3);
        assert_eq!(quantities.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
