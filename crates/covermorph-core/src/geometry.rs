//! Clip and ring geometry derived from the view bounds and current radius.

use crate::shape::Shape;
use kurbo::{BezPath, Circle, Point, Rect, Shape as KurboShape, Size};

/// Tolerance used when flattening circles to paths.
const PATH_TOLERANCE: f64 = 0.1;

/// The innermost rings are skipped to keep the record center clean.
pub const FIRST_RING_INDEX: usize = 3;

/// Radius of the largest circle that fits inside the bounds.
pub fn min_radius(size: Size) -> f64 {
    size.width.min(size.height) / 2.0
}

/// Radius of the circle that passes through the bounds' corners.
pub fn max_radius(size: Size) -> f64 {
    (size.width / 2.0).hypot(size.height / 2.0)
}

/// Clip radius a shape rests at: inscribed circle for circles, the
/// corner-covering circle for rectangles.
pub fn rest_radius(shape: Shape, size: Size) -> f64 {
    match shape {
        Shape::Circle => min_radius(size),
        Shape::Rectangle => max_radius(size),
    }
}

/// Number of ring slots that fit in the bounds: `floor(min(w, h) / track_size)`.
pub fn track_count(size: Size, track_size: f64) -> usize {
    let extent = size.width.min(size.height);
    if !(track_size > 0.0) || !(extent > 0.0) {
        return 0;
    }
    (extent / track_size).floor() as usize
}

/// Radii of the emitted rings, strictly increasing.
pub fn ring_radii(size: Size, track_size: f64) -> Vec<f64> {
    let count = track_count(size, track_size);
    let extent = size.width.min(size.height);
    (FIRST_RING_INDEX..count)
        .map(|i| extent * (i as f64 / count as f64))
        .collect()
}

/// Derived clip and ring geometry for one cover view.
#[derive(Debug, Clone)]
pub struct CoverGeometry {
    track_size: f64,
    size: Size,
    radius: f64,
    clip: Circle,
    rings: Vec<Circle>,
}

impl CoverGeometry {
    /// Create empty geometry with the given ring spacing in pixels.
    pub fn new(track_size: f64) -> Self {
        Self {
            track_size,
            size: Size::ZERO,
            radius: 0.0,
            clip: Circle::new(Point::ZERO, 0.0),
            rings: Vec::new(),
        }
    }

    /// Rebuild everything for new bounds and radius.
    pub fn reset(&mut self, size: Size, radius: f64) {
        self.size = size;
        self.radius = radius;
        let center = self.center();
        self.clip = Circle::new(center, radius);
        self.rings = ring_radii(size, self.track_size)
            .into_iter()
            .map(|r| Circle::new(center, r))
            .collect();
    }

    /// Current view bounds size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Current clip radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Center of the view.
    pub fn center(&self) -> Point {
        Point::new(self.size.width / 2.0, self.size.height / 2.0)
    }

    pub fn min_radius(&self) -> f64 {
        min_radius(self.size)
    }

    pub fn max_radius(&self) -> f64 {
        max_radius(self.size)
    }

    /// Circular clip region.
    pub fn clip(&self) -> Circle {
        self.clip
    }

    /// Full-bounds rectangle.
    pub fn rect(&self) -> Rect {
        self.size.to_rect()
    }

    /// Ring circles, innermost first.
    pub fn rings(&self) -> &[Circle] {
        &self.rings
    }

    /// Clip circle as a path.
    pub fn clip_path(&self) -> BezPath {
        self.clip.to_path(PATH_TOLERANCE)
    }

    /// Full-bounds rectangle as a path.
    pub fn rect_path(&self) -> BezPath {
        self.rect().to_path(PATH_TOLERANCE)
    }

    /// All rings combined into one stroke path.
    pub fn ring_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for ring in &self.rings {
            path.extend(ring.path_elements(PATH_TOLERANCE));
        }
        path
    }
}
