//! Pan/zoom image viewer with clickable hotspots.
//!
//! One viewer backs every tour-like game: the virtual site tours, the rock
//! art detective and the site map. Hotspots live in image pixel space; the
//! camera maps them to the screen.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_ZOOM_FACTOR: f64 = 4.0;

/// A point in either screen or image space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }
}

/// `pan_x` / `pan_y` are screen pixels, `zoom` is screen pixels per image pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Hotspot {
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone)]
pub struct HotspotViewer {
    image: Size,
    viewport: Size,
    camera: Camera,
    min_zoom: f64,
    max_zoom: f64,
    hotspots: Vec<Hotspot>,
    visited: HashSet<String>,
}

impl HotspotViewer {
    /// Starts zoomed out so the image just covers the viewport, centred.
    pub fn new(image: Size, viewport: Size, hotspots: Vec<Hotspot>) -> Self {
        let min_zoom = (viewport.width / image.width).max(viewport.height / image.height);
        let mut viewer = HotspotViewer {
            image,
            viewport,
            camera: Camera {
                pan_x: 0.0,
                pan_y: 0.0,
                zoom: min_zoom,
            },
            min_zoom,
            max_zoom: min_zoom * DEFAULT_MAX_ZOOM_FACTOR,
            hotspots,
            visited: HashSet::new(),
        };
        viewer.center_on(Point::new(image.width / 2.0, image.height / 2.0));
        viewer
    }

    pub fn with_max_zoom(mut self, max_zoom: f64) -> Self {
        self.max_zoom = max_zoom.max(self.min_zoom);
        self
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    /// Scales by `factor` around `anchor`, keeping the image point under the
    /// anchor fixed on screen.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        let world = self.camera.screen_to_world(anchor);
        self.camera.zoom = (self.camera.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        self.camera.pan_x = anchor.x - world.x * self.camera.zoom;
        self.camera.pan_y = anchor.y - world.y * self.camera.zoom;
        self.clamp_pan();
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.camera.pan_x += dx;
        self.camera.pan_y += dy;
        self.clamp_pan();
    }

    fn center_on(&mut self, world: Point) {
        self.camera.pan_x = self.viewport.width / 2.0 - world.x * self.camera.zoom;
        self.camera.pan_y = self.viewport.height / 2.0 - world.y * self.camera.zoom;
        self.clamp_pan();
    }

    // The image must always cover the viewport.
    fn clamp_pan(&mut self) {
        let zoom = self.camera.zoom;
        let clamp_axis = |pan: f64, image: f64, viewport: f64| {
            let scaled = image * zoom;
            if scaled <= viewport {
                (viewport - scaled) / 2.0
            } else {
                pan.clamp(viewport - scaled, 0.0)
            }
        };
        self.camera.pan_x = clamp_axis(self.camera.pan_x, self.image.width, self.viewport.width);
        self.camera.pan_y = clamp_axis(self.camera.pan_y, self.image.height, self.viewport.height);
    }

    /// Nearest hotspot under a screen point, if any.
    pub fn hotspot_at(&self, screen: Point) -> Option<&Hotspot> {
        let world = self.camera.screen_to_world(screen);
        self.hotspots
            .iter()
            .filter(|hotspot| hotspot.center().distance_to(world) <= hotspot.radius)
            .min_by(|a, b| {
                a.center()
                    .distance_to(world)
                    .total_cmp(&b.center().distance_to(world))
            })
    }

    /// Marks a hotspot as visited. Returns `true` only the first time.
    pub fn visit(&mut self, id: &str) -> bool {
        if !self.hotspots.iter().any(|hotspot| hotspot.id == id) {
            return false;
        }
        self.visited.insert(id.to_string())
    }

    pub fn is_visited(&self, id: &str) -> bool {
        self.visited.contains(id)
    }

    /// `(visited, total)`.
    pub fn progress(&self) -> (usize, usize) {
        (self.visited.len(), self.hotspots.len())
    }

    /// Centres the camera on a hotspot. Returns `false` for unknown ids.
    pub fn focus(&mut self, id: &str) -> bool {
        match self.hotspots.iter().find(|hotspot| hotspot.id == id) {
            Some(hotspot) => {
                let center = hotspot.center();
                self.center_on(center);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn hotspot(id: &str, x: f64, y: f64) -> Hotspot {
        Hotspot {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            x,
            y,
            radius: 20.0,
        }
    }

    fn viewer() -> HotspotViewer {
        HotspotViewer::new(
            Size::new(2000.0, 1000.0),
            Size::new(800.0, 400.0),
            vec![
                hotspot("panel-a", 1000.0, 500.0),
                hotspot("panel-b", 100.0, 100.0),
                hotspot("panel-c", 1900.0, 900.0),
            ],
        )
    }

    #[test]
    fn test_camera_roundtrip() {
        let camera = Camera {
            pan_x: -120.0,
            pan_y: 40.0,
            zoom: 2.5,
        };
        let world = Point::new(33.0, -7.0);
        let back = camera.screen_to_world(camera.world_to_screen(world));
        assert!(approx_eq(back.x, world.x) && approx_eq(back.y, world.y));
    }

    #[test]
    fn test_new_covers_viewport_and_centres() {
        let viewer = viewer();
        let camera = viewer.camera();

        assert!(approx_eq(camera.zoom, 0.4));
        let centre = camera.screen_to_world(Point::new(400.0, 200.0));
        assert!(approx_eq(centre.x, 1000.0) && approx_eq(centre.y, 500.0));
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed_and_clamps() {
        let mut viewer = viewer();
        let anchor = Point::new(400.0, 200.0);
        let before = viewer.camera().screen_to_world(anchor);

        viewer.zoom_at(anchor, 2.0);
        let after = viewer.camera().screen_to_world(anchor);
        assert!(approx_eq(viewer.camera().zoom, 0.8));
        assert!(approx_eq(before.x, after.x) && approx_eq(before.y, after.y));

        viewer.zoom_at(anchor, 100.0);
        assert!(approx_eq(viewer.camera().zoom, 1.6));
        viewer.zoom_at(anchor, 0.001);
        assert!(approx_eq(viewer.camera().zoom, 0.4));
    }

    #[test]
    fn test_pan_is_clamped_to_image_edges() {
        let mut viewer = viewer();
        viewer.zoom_at(Point::new(400.0, 200.0), 2.0);

        viewer.pan_by(10_000.0, 10_000.0);
        assert!(approx_eq(viewer.camera().pan_x, 0.0));
        assert!(approx_eq(viewer.camera().pan_y, 0.0));

        viewer.pan_by(-10_000.0, -10_000.0);
        assert!(approx_eq(viewer.camera().pan_x, 800.0 - 2000.0 * 0.8));
        assert!(approx_eq(viewer.camera().pan_y, 400.0 - 1000.0 * 0.8));
    }

    #[test]
    fn test_hotspot_hit_testing_follows_camera() {
        let mut viewer = viewer();
        let screen = viewer.camera().world_to_screen(Point::new(1005.0, 495.0));
        assert_eq!(viewer.hotspot_at(screen).map(|h| h.id.as_str()), Some("panel-a"));

        assert!(viewer.focus("panel-b"));
        let screen = viewer.camera().world_to_screen(Point::new(100.0, 100.0));
        assert_eq!(viewer.hotspot_at(screen).map(|h| h.id.as_str()), Some("panel-b"));
        assert!(viewer.hotspot_at(Point::new(-500.0, -500.0)).is_none());
    }

    #[test]
    fn test_visit_tracks_progress_once() {
        let mut viewer = viewer();

        assert!(viewer.visit("panel-a"));
        assert!(!viewer.visit("panel-a"));
        assert!(!viewer.visit("unknown"));
        assert!(viewer.is_visited("panel-a"));
        assert_eq!(viewer.progress(), (1, 3));
        assert!(!viewer.focus("unknown"));
    }
}
