// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: document kinds, capture geometry and tolerances.

use serde::{Deserialize, Serialize};

/// Which ICAO 9303 layout a line run is parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    /// TD1: three lines of 30 characters.
    IdCard,
    /// TD3: two lines of 44 characters.
    Passport,
}

impl DocumentKind {
    /// Number of MRZ lines in this layout.
    pub fn line_count(&self) -> usize {
        match self {
            Self::IdCard => 3,
            Self::Passport => 2,
        }
    }

    /// Fixed width of every MRZ line in this layout.
    pub fn line_width(&self) -> usize {
        match self {
            Self::IdCard => 30,
            Self::Passport => 44,
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdCard => write!(f, "ID card (TD1)"),
            Self::Passport => write!(f, "passport (TD3)"),
        }
    }
}

/// A point in either normalised (0..1) or screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest rectangle enclosing every point. Empty input yields a zero rect;
    /// any non-finite coordinate yields a NaN-sized rect with no area.
    pub fn bounding(points: &[Point]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        if !points.iter().all(Point::is_finite) {
            return Self::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN);
        }
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// True when the rectangle has positive, finite width and height.
    pub fn has_area(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Full containment: every edge of `other` lies on or inside `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min_x() >= self.min_x()
            && other.min_y() >= self.min_y()
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// Four corners of a detected document quadrilateral.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Quad {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_right: Point,
    pub bottom_left: Point,
}

impl Quad {
    pub fn new(top_left: Point, top_right: Point, bottom_right: Point, bottom_left: Point) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Corners in clockwise order starting at the top-left.
    pub fn corners(&self) -> [Point; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
    }

    /// True when no corner has a NaN or infinite coordinate.
    pub fn is_finite(&self) -> bool {
        self.corners().iter().all(Point::is_finite)
    }

    /// Apply `f` to every corner.
    pub fn map(&self, f: impl Fn(Point) -> Point) -> Self {
        Self {
            top_left: f(self.top_left),
            top_right: f(self.top_right),
            bottom_right: f(self.bottom_right),
            bottom_left: f(self.bottom_left),
        }
    }
}

/// Tunable acceptance tolerances for the capture-rectangle test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationTolerances {
    /// Maximum angle of the top edge from horizontal, in degrees.
    pub max_tilt_degrees: f64,
    /// Maximum relative difference between box and mask aspect ratios.
    pub aspect_ratio_tolerance: f64,
    /// Maximum relative difference in width and in height.
    pub size_tolerance: f64,
}

impl Default for ValidationTolerances {
    fn default() -> Self {
        Self {
            max_tilt_degrees: 15.0,
            aspect_ratio_tolerance: 0.2,
            size_tolerance: 0.2,
        }
    }
}
