//! Smoothed camera used by map and scene views
//!
//! The camera eases its center and zoom toward a target every tick and
//! reports itself settled once both are within tolerance.

use serde::{Deserialize, Serialize};

/// Center distance below which the camera snaps onto its target (map units)
const POSITION_TOLERANCE: f64 = 1e-6;
/// Zoom difference below which the camera snaps onto its target zoom
const ZOOM_TOLERANCE: f64 = 1e-4;
/// Tile size used by web map zoom levels
const TILE_SIZE: f64 = 256.0;

/// Degrees covered by `pixels` screen pixels at `zoom`
pub fn span_at(pixels: f64, zoom: f64) -> f64 {
    pixels * 360.0 / (TILE_SIZE * 2f64.powf(zoom))
}

/// Zoom level at which `degrees` fill `pixels` screen pixels
pub fn zoom_for_span(degrees: f64, pixels: f64) -> f64 {
    (pixels * 360.0 / (TILE_SIZE * degrees)).log2()
}

/// Size of the surface a camera renders into, in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
        }
    }
}

/// A map point: longitude, latitude and elevation
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Linear interpolation between two points
    pub fn lerp(&self, target: &Point, t: f64) -> Point {
        Point {
            x: self.x + (target.x - self.x) * t,
            y: self.y + (target.y - self.y) * t,
            z: self.z + (target.z - self.z) * t,
        }
    }

    /// Smooth interpolation with easing
    pub fn smooth_lerp(&self, target: &Point, t: f64) -> Point {
        // Ease-out cubic for smooth deceleration
        let eased_t = 1.0 - (1.0 - t).powi(3);
        self.lerp(target, eased_t)
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5}, {:.1})", self.x, self.y, self.z)
    }
}

/// Camera state for an animated view
#[derive(Clone, Debug)]
pub struct Camera {
    /// Current camera center position
    pub position: Point,
    /// Target position to move towards
    pub target: Point,
    /// Current zoom level (web map scale levels, 0 = whole world)
    pub zoom: f64,
    /// Target zoom level
    pub target_zoom: f64,
    /// Smoothing factor (0.0-1.0, higher = faster)
    pub smoothing: f64,
    pub viewport: Viewport,
}

impl Camera {
    pub fn new(position: Point, zoom: f64, smoothing: f64) -> Self {
        Self {
            position,
            target: position,
            zoom,
            target_zoom: zoom,
            smoothing: smoothing.clamp(0.01, 1.0),
            viewport: Viewport::default(),
        }
    }

    /// Update camera position with smoothing
    pub fn update(&mut self, delta_time: f64) {
        if self.is_settled() {
            return;
        }

        let t = (self.smoothing * delta_time * 60.0).min(1.0);
        self.position = self.position.smooth_lerp(&self.target, t);
        self.zoom += (self.target_zoom - self.zoom) * t;

        if self.position.distance(&self.target) < POSITION_TOLERANCE {
            self.position = self.target;
        }
        if (self.target_zoom - self.zoom).abs() < ZOOM_TOLERANCE {
            self.zoom = self.target_zoom;
        }
    }

    /// Fly towards a point, optionally changing zoom
    pub fn fly_to(&mut self, target: Point, zoom: Option<f64>) {
        self.target = target;
        if let Some(zoom) = zoom {
            self.target_zoom = zoom;
        }
    }

    /// Move instantly to a point, keeping any pending zoom animation
    pub fn jump_to(&mut self, position: Point) {
        self.position = position;
        self.target = position;
    }

    pub fn is_settled(&self) -> bool {
        self.position == self.target && self.zoom == self.target_zoom
    }

    /// Visible width and height in degrees
    pub fn span(&self) -> (f64, f64) {
        (
            span_at(self.viewport.width, self.zoom),
            span_at(self.viewport.height, self.zoom),
        )
    }
}
