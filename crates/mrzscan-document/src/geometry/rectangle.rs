// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document rectangle acceptance — tilt, containment, aspect ratio and size
// tests of a detected quadrilateral against the on-screen capture frame.

use mrzscan_core::{Point, Quad, Rect, ValidationTolerances};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Where the origin of normalised (0..1) corner coordinates sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizedOrigin {
    /// Y grows downwards, like screen coordinates.
    #[default]
    TopLeft,
    /// Y grows upwards, as vision frameworks usually report it.
    BottomLeft,
}

/// A detected quadrilateral in screen coordinates plus its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangleObservation {
    pub corners: Quad,
    pub bounding_box: Rect,
}

impl RectangleObservation {
    /// Wrap corners that are already in screen coordinates.
    pub fn new(corners: Quad) -> Self {
        Self {
            corners,
            bounding_box: Rect::bounding(&corners.corners()),
        }
    }

    /// Scale normalised corners into a `width` x `height` viewport.
    pub fn from_normalized(
        corners: Quad,
        viewport_width: f64,
        viewport_height: f64,
        origin: NormalizedOrigin,
    ) -> Self {
        Self::new(corners.map(|p| {
            let y = match origin {
                NormalizedOrigin::TopLeft => p.y,
                NormalizedOrigin::BottomLeft => 1.0 - p.y,
            };
            Point::new(p.x * viewport_width, y * viewport_height)
        }))
    }

    /// Angle of the top edge from horizontal, in degrees (0..=180).
    pub fn tilt_degrees(&self) -> f64 {
        let Quad {
            top_left, top_right, ..
        } = self.corners;
        (top_right.y - top_left.y)
            .atan2(top_right.x - top_left.x)
            .to_degrees()
            .abs()
    }
}

/// Result of each acceptance criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RectangleAssessment {
    pub tilt_ok: bool,
    pub contained: bool,
    pub aspect_ratio_ok: bool,
    pub size_ok: bool,
}

impl RectangleAssessment {
    /// Every criterion failed; used for degenerate input.
    pub const REJECTED: Self = Self {
        tilt_ok: false,
        contained: false,
        aspect_ratio_ok: false,
        size_ok: false,
    };

    pub fn is_acceptable(&self) -> bool {
        self.tilt_ok && self.contained && self.aspect_ratio_ok && self.size_ok
    }
}

/// Run all four criteria against `mask`.
///
/// A mask or bounding box without positive, finite area, or a quad with a
/// non-finite corner, is rejected outright instead of dividing by zero.
#[instrument(skip_all)]
pub fn evaluate(
    observation: &RectangleObservation,
    mask: &Rect,
    tolerances: &ValidationTolerances,
) -> RectangleAssessment {
    let bbox = &observation.bounding_box;
    if !mask.has_area() || !bbox.has_area() || !observation.corners.is_finite() {
        debug!(?mask, ?bbox, "degenerate rectangle rejected");
        return RectangleAssessment::REJECTED;
    }

    let tilt = observation.tilt_degrees();
    let mask_ratio = mask.aspect_ratio();
    let ratio_diff = (bbox.aspect_ratio() - mask_ratio).abs() / mask_ratio;
    let width_diff = (bbox.width - mask.width).abs() / mask.width;
    let height_diff = (bbox.height - mask.height).abs() / mask.height;

    let assessment = RectangleAssessment {
        tilt_ok: tilt <= tolerances.max_tilt_degrees,
        contained: mask.contains_rect(bbox),
        aspect_ratio_ok: ratio_diff <= tolerances.aspect_ratio_tolerance,
        size_ok: width_diff <= tolerances.size_tolerance
            && height_diff <= tolerances.size_tolerance,
    };
    debug!(
        tilt,
        ratio_diff,
        width_diff,
        height_diff,
        accepted = assessment.is_acceptable(),
        "rectangle evaluated"
    );
    assessment
}

/// True when the observation passes every criterion.
pub fn is_acceptable(
    observation: &RectangleObservation,
    mask: &Rect,
    tolerances: &ValidationTolerances,
) -> bool {
    evaluate(observation, mask, tolerances).is_acceptable()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mask used by most tests: 340x220, roughly an ID-1 card.
    const MASK: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 340.0,
        height: 220.0,
    };

    fn axis_aligned(x: f64, y: f64, w: f64, h: f64) -> RectangleObservation {
        RectangleObservation::new(Quad::new(
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x + w, y + h),
            Point::new(x, y + h),
        ))
    }

    /// A quad spanning a 300x180 box whose top edge is inclined by `degrees`.
    fn tilted(degrees: f64) -> RectangleObservation {
        let rise = 300.0 * degrees.to_radians().tan();
        let left_y = 20.0 - rise.min(0.0);
        RectangleObservation::new(Quad::new(
            Point::new(20.0, left_y),
            Point::new(320.0, left_y + rise),
            Point::new(320.0, 200.0),
            Point::new(20.0, 200.0),
        ))
    }

    fn defaults() -> ValidationTolerances {
        ValidationTolerances::default()
    }

    #[test]
    fn well_placed_box_is_accepted() {
        let obs = axis_aligned(10.0, 10.0, 320.0, 200.0);
        let assessment = evaluate(&obs, &MASK, &defaults());
        assert_eq!(
            assessment,
            RectangleAssessment {
                tilt_ok: true,
                contained: true,
                aspect_ratio_ok: true,
                size_ok: true,
            }
        );
    }

    #[test]
    fn tilt_of_twenty_degrees_rejected() {
        let obs = tilted(20.0);
        assert!((obs.tilt_degrees() - 20.0).abs() < 1e-9);
        let assessment = evaluate(&obs, &MASK, &defaults());
        assert!(!assessment.tilt_ok);
        assert!(assessment.contained && assessment.aspect_ratio_ok && assessment.size_ok);
        assert!(!is_acceptable(&obs, &MASK, &defaults()));
    }

    #[test]
    fn small_tilt_accepted() {
        assert!(is_acceptable(&tilted(14.9), &MASK, &defaults()));
        assert!(is_acceptable(&tilted(-14.9), &MASK, &defaults()));
    }

    /// The tilt limit follows the configured tolerance.
    #[test]
    fn tilt_limit_is_configurable() {
        let strict = ValidationTolerances {
            max_tilt_degrees: 5.0,
            ..defaults()
        };
        assert!(!is_acceptable(&tilted(10.0), &MASK, &strict));
    }

    #[test]
    fn wrong_aspect_ratio_rejected_even_when_contained() {
        let obs = axis_aligned(20.0, 10.0, 200.0, 200.0);
        let assessment = evaluate(&obs, &MASK, &defaults());
        assert!(assessment.contained);
        assert!(!assessment.aspect_ratio_ok);
        assert!(!assessment.is_acceptable());
    }

    /// Containment has no tolerance: one pixel past the right edge fails.
    #[test]
    fn one_pixel_outside_mask_rejected() {
        let mask = Rect::new(10.0, 10.0, 340.0, 220.0);
        let obs = axis_aligned(11.0, 10.0, 340.0, 220.0);
        let assessment = evaluate(&obs, &mask, &defaults());
        assert!(!assessment.contained);
        assert!(assessment.tilt_ok && assessment.aspect_ratio_ok && assessment.size_ok);

        assert!(is_acceptable(&axis_aligned(10.0, 10.0, 340.0, 220.0), &mask, &defaults()));
    }

    #[test]
    fn too_small_box_rejected() {
        let obs = axis_aligned(100.0, 60.0, 170.0, 110.0);
        let assessment = evaluate(&obs, &MASK, &defaults());
        assert!(assessment.contained && assessment.aspect_ratio_ok);
        assert!(!assessment.size_ok);
    }

    #[test]
    fn zero_area_mask_rejected() {
        let obs = axis_aligned(10.0, 10.0, 320.0, 200.0);
        for mask in [
            Rect::new(0.0, 0.0, 0.0, 220.0),
            Rect::new(0.0, 0.0, 340.0, 0.0),
            Rect::new(0.0, 0.0, f64::NAN, 220.0),
        ] {
            assert_eq!(evaluate(&obs, &mask, &defaults()), RectangleAssessment::REJECTED);
        }
    }

    #[test]
    fn collapsed_observation_rejected() {
        let point = Point::new(50.0, 50.0);
        let obs = RectangleObservation::new(Quad::new(point, point, point, point));
        assert!(!is_acceptable(&obs, &MASK, &defaults()));
    }

    #[test]
    fn nan_corner_rejected() {
        let obs = RectangleObservation::new(Quad::new(
            Point::new(10.0, 10.0),
            Point::new(330.0, 10.0),
            Point::new(f64::NAN, f64::NAN),
            Point::new(10.0, 210.0),
        ));
        assert_eq!(evaluate(&obs, &MASK, &defaults()), RectangleAssessment::REJECTED);
        assert!(!is_acceptable(&obs, &MASK, &defaults()));
    }

    /// A bounding box built elsewhere cannot hide a non-finite corner.
    #[test]
    fn infinite_corner_rejected_with_finite_box() {
        let obs = RectangleObservation {
            corners: Quad::new(
                Point::new(10.0, 10.0),
                Point::new(f64::INFINITY, 10.0),
                Point::new(330.0, 210.0),
                Point::new(10.0, 210.0),
            ),
            bounding_box: Rect::new(10.0, 10.0, 320.0, 200.0),
        };
        assert!(!is_acceptable(&obs, &MASK, &defaults()));
    }

    #[test]
    fn normalized_corners_scale_to_viewport() {
        let quad = Quad::new(
            Point::new(0.25, 0.25),
            Point::new(0.75, 0.25),
            Point::new(0.75, 0.75),
            Point::new(0.25, 0.75),
        );
        let obs = RectangleObservation::from_normalized(quad, 400.0, 800.0, NormalizedOrigin::TopLeft);
        assert_eq!(obs.bounding_box, Rect::new(100.0, 200.0, 200.0, 400.0));
        assert_eq!(obs.tilt_degrees(), 0.0);
    }

    /// Bottom-left normalised input is flipped so the top edge stays on top.
    #[test]
    fn bottom_left_origin_is_flipped() {
        let quad = Quad::new(
            Point::new(0.25, 0.75),
            Point::new(0.75, 0.75),
            Point::new(0.75, 0.5),
            Point::new(0.25, 0.5),
        );
        let obs = RectangleObservation::from_normalized(quad, 400.0, 400.0, NormalizedOrigin::BottomLeft);
        assert_eq!(obs.corners.top_left, Point::new(100.0, 100.0));
        assert_eq!(obs.bounding_box, Rect::new(100.0, 100.0, 200.0, 100.0));
    }
}
