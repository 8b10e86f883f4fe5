//! Static crop catalog: cost, growth time, and order value per crop.
//!
//! Lookups are total over [`CropId`]; the closed enum guarantees every id
//! resolves to a [`CropDef`].

use serde::Serialize;

use harvest_types::CropId;

/// Immutable economic and display parameters of one crop kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropDef {
    /// The crop this entry describes.
    pub id: CropId,
    /// Display name.
    pub name: &'static str,
    /// Display icon.
    pub icon: &'static str,
    /// Colour tag used by the plot tile.
    pub color: &'static str,
    /// Money spent to plant one plot.
    pub cost: u32,
    /// Ticks from planting to harvest.
    pub growth_time: u32,
    /// Baseline value of one unit in an order.
    pub order_value: u32,
}

const WHEAT: CropDef = CropDef {
    id: CropId::Wheat,
    name: "Wheat",
    icon: "\u{1f33e}",
    color: "bg-yellow-100",
    cost: 5,
    growth_time: 5,
    order_value: 15,
};

const TOMATO: CropDef = CropDef {
    id: CropId::Tomato,
    name: "Tomato",
    icon: "\u{1f345}",
    color: "bg-red-100",
    cost: 15,
    growth_time: 12,
    order_value: 45,
};

const CORN: CropDef = CropDef {
    id: CropId::Corn,
    name: "Corn",
    icon: "\u{1f33d}",
    color: "bg-yellow-300",
    cost: 40,
    growth_time: 25,
    order_value: 125,
};

/// Every catalog entry, in [`CropId::ALL`] order.
pub const CATALOG: [CropDef; 3] = [WHEAT, TOMATO, CORN];

/// Resolve a crop id to its catalog entry.
pub const fn crop_def(id: CropId) -> &'static CropDef {
    match id {
        CropId::Wheat => &WHEAT,
        CropId::Tomato => &TOMATO,
        CropId::Corn => &CORN,
    }
}

/// Planting cost of the cheapest crop. A player with less money than this
/// cannot plant anything.
pub fn cheapest_cost() -> u32 {
    CATALOG.iter().map(|def| def.cost).min().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_matches_crop_ids() {
        let ids: Vec<CropId> = CATALOG.iter().map(|def| def.id).collect();
        assert_eq!(ids, CropId::ALL.to_vec());
    }

    #[test]
    fn every_crop_resolves() {
        for id in CropId::ALL {
            let def = crop_def(id);
            assert_eq!(def.id, id);
            assert!(def.cost > 0);
            assert!(def.growth_time > 0);
            assert!(def.order_value > 0);
        }
    }

    #[test]
    fn wheat_is_cheapest() {
        assert_eq!(cheapest_cost(), 5);
        assert_eq!(crop_def(CropId::Wheat).cost, cheapest_cost());
    }
}
