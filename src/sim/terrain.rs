//! Arena geometry: rolling terrain and floating platforms
//!
//! Screen coordinates: +x right, +y down. The ground is a double-hump curve
//! whose periods divide the viewport width, so it tiles seamlessly.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::error::{ConfigError, check_viewport};

/// Baseline ground level as a fraction of viewport height
const BASELINE_FRACTION: f32 = 0.78;
/// Primary hump amplitude (fraction of height) and humps per viewport
const PRIMARY_AMPLITUDE: f32 = 0.06;
const PRIMARY_WAVES: f32 = 2.0;
/// Secondary ripple amplitude (fraction of height) and ripples per viewport
const SECONDARY_AMPLITUDE: f32 = 0.025;
const SECONDARY_WAVES: f32 = 4.0;

/// Platform thickness (px)
pub const PLATFORM_THICKNESS: f32 = 14.0;

/// Stateless ground profile parameterised only by the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    pub width: f32,
    pub height: f32,
}

impl Terrain {
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        check_viewport(width, height)?;
        Ok(Self { width, height })
    }

    /// Ground surface y at horizontal position `x`
    pub fn height_at(&self, x: f32) -> f32 {
        let phase = x / self.width * TAU;
        self.height * BASELINE_FRACTION
            + (phase * PRIMARY_WAVES).sin() * self.height * PRIMARY_AMPLITUDE
            + (phase * SECONDARY_WAVES).sin() * self.height * SECONDARY_AMPLITUDE
    }

    /// Local slope dy/dx (central difference, unit step)
    pub fn slope_at(&self, x: f32) -> f32 {
        (self.height_at(x + 1.0) - self.height_at(x - 1.0)) / 2.0
    }

    /// Upward (toward -y) unit normal of the surface at `x`
    pub fn up_normal_at(&self, x: f32) -> Vec2 {
        Vec2::new(self.slope_at(x), -1.0).normalize()
    }

    /// Sample the surface every `step` px from 0 to width inclusive (for rendering)
    pub fn sample(&self, step: f32) -> Vec<Vec2> {
        let step = step.max(1.0);
        let count = (self.width / step).ceil() as usize;
        (0..=count)
            .map(|i| {
                let x = (i as f32 * step).min(self.width);
                Vec2::new(x, self.height_at(x))
            })
            .collect()
    }
}

/// Static axis-aligned rectangle; only its top surface is solid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Platform {
    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn spans(&self, x: f32) -> bool {
        x >= self.x && x <= self.x + self.width
    }
}

/// Platform layout for a viewport: two low side ledges and one high centre ledge
pub fn build_platforms(width: f32, height: f32) -> Vec<Platform> {
    // (x, y, width) as viewport fractions
    const LAYOUT: [(f32, f32, f32); 3] = [(0.12, 0.52, 0.18), (0.41, 0.38, 0.18), (0.70, 0.52, 0.18)];

    LAYOUT
        .iter()
        .map(|&(fx, fy, fw)| Platform {
            x: width * fx,
            y: height * fy,
            width: width * fw,
            height: PLATFORM_THICKNESS,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_rejects_bad_viewport() {
        assert!(Terrain::new(0.0, 600.0).is_err());
        assert!(Terrain::new(800.0, 600.0).is_ok());
    }

    #[test]
    fn test_height_stays_near_baseline() {
        let t = Terrain::new(1000.0, 600.0).unwrap();
        let max_dev = 600.0 * (PRIMARY_AMPLITUDE + SECONDARY_AMPLITUDE) + 0.01;
        for x in (0..1000).step_by(7) {
            let h = t.height_at(x as f32);
            assert!((h - 600.0 * BASELINE_FRACTION).abs() <= max_dev);
        }
    }

    #[test]
    fn test_up_normal_points_up() {
        let t = Terrain::new(1000.0, 600.0).unwrap();
        for x in [0.0, 130.0, 250.0, 777.0] {
            let n = t.up_normal_at(x);
            assert!(n.y < 0.0);
            assert!((n.length() - 1.0).abs() < 1e-5);
            // Perpendicular to the surface tangent
            assert!(n.dot(Vec2::new(1.0, t.slope_at(x))).abs() < 1e-4);
        }
    }

    #[test]
    fn test_sample_covers_full_width() {
        let t = Terrain::new(1000.0, 600.0).unwrap();
        let pts = t.sample(16.0);
        assert_eq!(pts.first().map(|p| p.x), Some(0.0));
        assert_eq!(pts.last().map(|p| p.x), Some(1000.0));
    }

    #[test]
    fn test_platforms_scale_with_viewport() {
        let small = build_platforms(800.0, 600.0);
        let big = build_platforms(1600.0, 1200.0);
        assert_eq!(small.len(), 3);
        for (a, b) in small.iter().zip(&big) {
            assert!((b.x - 2.0 * a.x).abs() < 1e-3);
            assert!((b.y - 2.0 * a.y).abs() < 1e-3);
            assert!((b.width - 2.0 * a.width).abs() < 1e-3);
        }
    }

    #[test]
    fn test_platforms_float_above_ground() {
        let t = Terrain::new(1000.0, 600.0).unwrap();
        for p in build_platforms(1000.0, 600.0) {
            for x in [p.x, p.x + p.width / 2.0, p.x + p.width] {
                assert!(p.top() + p.height < t.height_at(x));
            }
        }
    }

    proptest! {
        #[test]
        fn height_is_periodic_over_viewport(width in 100.0f32..4000.0, height in 100.0f32..3000.0) {
            let t = Terrain::new(width, height).unwrap();
            let tol = height * 1e-4;
            prop_assert!((t.height_at(0.0) - t.height_at(width)).abs() < tol);
        }

        #[test]
        fn slope_is_numerical_derivative(x in 0.0f32..1000.0) {
            let t = Terrain::new(1000.0, 600.0).unwrap();
            let h = 1e-2f32;
            let phase = TAU / 1000.0;
            // Analytic derivative of the height function
            let exact = (x * phase * PRIMARY_WAVES).cos() * 600.0 * PRIMARY_AMPLITUDE * phase * PRIMARY_WAVES
                + (x * phase * SECONDARY_WAVES).cos() * 600.0 * SECONDARY_AMPLITUDE * phase * SECONDARY_WAVES;
            prop_assert!((t.slope_at(x) - exact).abs() < h);
        }
    }
}
