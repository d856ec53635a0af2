//! Property-based tests for the epoch cycle, orbit and starfield.

use proptest::prelude::*;

use crate::cycle::Cycle;
use crate::orbit::{Ellipse, orbit_point};
use crate::star::{STAR_MARGIN, Star};
use crate::viewport::Viewport;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Progress stays in [0, 1) for any clock reading and period.
    #[test]
    fn prop_progress_in_unit_interval(
        t in -1.0e12f64..1.0e12,
        period in 1.0f64..1.0e7,
    ) {
        let p = Cycle::new(period, 90).progress(t);
        prop_assert!((0.0..1.0).contains(&p), "progress {} out of range", p);
    }

    /// Sector index is always a valid zero-based index.
    #[test]
    fn prop_sector_in_range(
        t in 0.0f64..1.0e10,
        sectors in 1u32..1000,
    ) {
        let cycle = Cycle::new(86_400.0, sectors);
        let sector = cycle.sector(cycle.progress(t));
        prop_assert!(sector < sectors);
    }

    /// Progress is continuous away from period multiples.
    #[test]
    fn prop_progress_continuous_inside_epoch(
        epoch in 0i64..100_000,
        offset in 1.0f64..86_000.0,
    ) {
        let cycle = Cycle::default();
        let t = epoch as f64 * 86_400.0 + offset;
        let delta = cycle.progress(t + 1.0) - cycle.progress(t);
        prop_assert!((delta - 1.0 / 86_400.0).abs() < 1e-6);
    }

    /// The drawn position is the same one full period apart.
    #[test]
    fn prop_orbit_periodic(
        progress in 0.0f64..1.0,
        width in 10.0f32..4000.0,
        height in 10.0f32..4000.0,
    ) {
        let ellipse = Ellipse::for_viewport(&Viewport::new(width, height, 1.0));
        let a = orbit_point(progress, &ellipse);
        let b = orbit_point(progress + 1.0, &ellipse);
        let tolerance = 1e-3 * width.max(height);
        prop_assert!((a.x - b.x).abs() < tolerance);
        prop_assert!((a.y - b.y).abs() < tolerance);
    }

    /// One update always brings a star back inside the wrap bounds.
    #[test]
    fn prop_star_stays_within_margin(
        x in -5000.0f32..5000.0,
        y in -5000.0f32..5000.0,
        vx in -0.03f32..0.03,
        vy in -0.03f32..0.03,
        width in 0.0f32..2000.0,
        height in 0.0f32..2000.0,
    ) {
        let viewport = Viewport::new(width, height, 1.0);
        let mut star = Star { x, y, radius: 1.0, alpha: 1.0, vx, vy };
        star.step(&viewport);
        prop_assert!(star.x >= -STAR_MARGIN && star.x <= width + STAR_MARGIN);
        prop_assert!(star.y >= -STAR_MARGIN && star.y <= height + STAR_MARGIN);
        prop_assert_eq!((star.vx, star.vy), (vx, vy));
    }
}
