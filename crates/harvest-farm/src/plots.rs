//! Plot lifecycle: planting, per-tick growth, and harvest.
//!
//! Growth is expressed as a percentage. Each tick a growing plot gains
//! `100 / growth_time` percent; once it reaches 100 the plot is ready and
//! keeps its crop and progress until harvested.

use harvest_types::{CropId, PROGRESS_COMPLETE, Plot, PlotStatus};

use crate::catalog::crop_def;

/// Tolerance for accumulated float error when checking maturity.
///
/// `100 / 12` summed twelve times lands a hair below 100.
const READY_EPSILON: f64 = 1e-9;

/// Progress gained per tick by `crop`.
pub fn growth_increment(crop: CropId) -> f64 {
    PROGRESS_COMPLETE / f64::from(crop_def(crop).growth_time.max(1))
}

/// Plant `crop` on an empty plot.
///
/// Returns `false` (plot unchanged) if the plot is not empty.
pub const fn plant(plot: &mut Plot, crop: CropId) -> bool {
    if !plot.is_empty() {
        return false;
    }
    plot.status = PlotStatus::Growing;
    plot.crop_id = Some(crop);
    plot.progress = 0.0;
    true
}

/// Advance a growing plot by one tick.
///
/// Returns `true` if the plot became ready on this tick. Empty and ready
/// plots are left untouched.
pub fn grow(plot: &mut Plot) -> bool {
    let (PlotStatus::Growing, Some(crop)) = (plot.status, plot.crop_id) else {
        return false;
    };

    let next = plot.progress + growth_increment(crop);
    if next >= PROGRESS_COMPLETE - READY_EPSILON {
        plot.progress = PROGRESS_COMPLETE;
        plot.status = PlotStatus::Ready;
        true
    } else {
        plot.progress = next.max(plot.progress);
        false
    }
}

/// Harvest a ready plot, resetting it to empty.
///
/// Returns the harvested crop, or `None` (plot unchanged) if the plot was
/// not ready.
pub const fn harvest(plot: &mut Plot) -> Option<CropId> {
    let (PlotStatus::Ready, Some(crop)) = (plot.status, plot.crop_id) else {
        return None;
    };
    plot.status = PlotStatus::Empty;
    plot.crop_id = None;
    plot.progress = 0.0;
    Some(crop)
}

#[cfg(test)]
mod tests {
    use harvest_types::PlotId;

    use super::*;

    fn ticks_to_ready(crop: CropId) -> u32 {
        let mut plot = Plot::empty(PlotId(0));
        assert!(plant(&mut plot, crop));
        let mut ticks = 0;
        while !grow(&mut plot) {
            ticks += 1;
            assert!(ticks < 1000, "plot never matured");
        }
        ticks + 1
    }

    #[test]
    fn plant_sets_growing_at_zero() {
        let mut plot = Plot::empty(PlotId(2));
        assert!(plant(&mut plot, CropId::Tomato));
        assert_eq!(plot.status, PlotStatus::Growing);
        assert_eq!(plot.crop_id, Some(CropId::Tomato));
        assert!(plot.progress.abs() < f64::EPSILON);
    }

    #[test]
    fn cannot_plant_occupied_plot() {
        let mut plot = Plot::empty(PlotId(0));
        assert!(plant(&mut plot, CropId::Wheat));
        let before = plot.clone();
        assert!(!plant(&mut plot, CropId::Corn));
        assert_eq!(plot, before);
    }

    #[test]
    fn maturity_takes_growth_time_ticks() {
        assert_eq!(ticks_to_ready(CropId::Wheat), 5);
        assert_eq!(ticks_to_ready(CropId::Tomato), 12);
        assert_eq!(ticks_to_ready(CropId::Corn), 25);
    }

    #[test]
    fn eighty_percent_wheat_matures_in_one_tick() {
        let mut plot = Plot {
            id: PlotId(0),
            status: PlotStatus::Growing,
            crop_id: Some(CropId::Wheat),
            progress: 80.0,
        };
        assert!(grow(&mut plot));
        assert_eq!(plot.status, PlotStatus::Ready);
        assert!((plot.progress - PROGRESS_COMPLETE).abs() < f64::EPSILON);
        assert_eq!(plot.crop_id, Some(CropId::Wheat));
    }

    #[test]
    fn ready_and_empty_plots_do_not_grow() {
        let mut empty = Plot::empty(PlotId(0));
        assert!(!grow(&mut empty));
        assert_eq!(empty, Plot::empty(PlotId(0)));

        let mut ready = Plot {
            id: PlotId(1),
            status: PlotStatus::Ready,
            crop_id: Some(CropId::Corn),
            progress: PROGRESS_COMPLETE,
        };
        let before = ready.clone();
        assert!(!grow(&mut ready));
        assert_eq!(ready, before);
    }

    #[test]
    fn harvest_resets_plot() {
        let mut plot = Plot {
            id: PlotId(4),
            status: PlotStatus::Ready,
            crop_id: Some(CropId::Corn),
            progress: PROGRESS_COMPLETE,
        };
        assert_eq!(harvest(&mut plot), Some(CropId::Corn));
        assert_eq!(plot, Plot::empty(PlotId(4)));
    }

    #[test]
    fn harvest_growing_is_noop() {
        let mut plot = Plot::empty(PlotId(0));
        assert!(plant(&mut plot, CropId::Wheat));
        let before = plot.clone();
        assert_eq!(harvest(&mut plot), None);
        assert_eq!(plot, before);
    }
}
