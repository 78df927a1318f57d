//! Animated 2D map and 3D scene views
//!
//! A view owns a [`Camera`] and publishes its center, zoom and motion state
//! through observable properties. Motion only advances when the shell calls
//! [`MapView::tick`].

use super::camera::{Camera, Point};
use super::observable::{when_true, Observable, WatchHandle};
use super::View;
use crate::layer::Extent;
use std::cell::RefCell;

/// Fraction of the visible span moved by one pan step
const PAN_STEP: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Flat 2D map
    Map,
    /// 3D globe scene
    Scene,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GoToTarget {
    Center(Point),
    CenterZoom(Point, f64),
    Extent(Extent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    North,
    South,
    East,
    West,
}

/// Point-in-time copy of a view's state for display
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub name: String,
    pub kind: ViewKind,
    pub center: Point,
    pub zoom: f64,
    pub stationary: bool,
    pub ready: bool,
}

pub struct MapView {
    kind: ViewKind,
    name: String,
    camera: RefCell<Camera>,
    center: Observable<Point>,
    zoom: Observable<f64>,
    stationary: Observable<bool>,
    ready: Observable<bool>,
}

impl MapView {
    pub fn new(
        kind: ViewKind,
        name: impl Into<String>,
        center: Point,
        zoom: f64,
        smoothing: f64,
    ) -> Self {
        let camera = Camera::new(center, zoom, smoothing);
        Self {
            kind,
            name: name.into(),
            center: Observable::new(camera.position),
            zoom: Observable::new(camera.zoom),
            stationary: Observable::new(true),
            ready: Observable::new(false),
            camera: RefCell::new(camera),
        }
    }

    /// Mark the view as attached to its surface
    pub fn attach(&self) {
        if self.ready.set(true) {
            tracing::info!(view = %self.name, "view ready");
        }
    }

    /// Run `callback` once the view is ready
    pub fn when_ready(&self, callback: impl FnOnce() + 'static) {
        when_true(&self.ready, callback);
    }

    /// Start an animated flight towards `target`
    pub fn go_to(&self, target: GoToTarget) {
        let settled = {
            let mut camera = self.camera.borrow_mut();
            let (center, zoom) = match target {
                GoToTarget::Center(center) => (center, None),
                GoToTarget::CenterZoom(center, zoom) => (center, Some(zoom)),
                GoToTarget::Extent(extent) => {
                    (extent.center(), Some(extent.fit_zoom(camera.viewport)))
                }
            };
            tracing::debug!(view = %self.name, %center, ?zoom, "go to");
            camera.fly_to(center, zoom);
            camera.is_settled()
        };
        self.stationary.set(settled);
    }

    /// Pan by a fraction of the visible span
    pub fn pan(&self, direction: PanDirection) {
        let target = {
            let camera = self.camera.borrow();
            let (width, height) = camera.span();
            let mut target = camera.target;
            match direction {
                PanDirection::North => target.y += height * PAN_STEP,
                PanDirection::South => target.y -= height * PAN_STEP,
                PanDirection::East => target.x += width * PAN_STEP,
                PanDirection::West => target.x -= width * PAN_STEP,
            }
            target
        };
        self.go_to(GoToTarget::Center(target));
    }

    /// Advance the camera by `delta_time` seconds and publish the result
    pub fn tick(&self, delta_time: f64) {
        let (position, zoom, settled) = {
            let mut camera = self.camera.borrow_mut();
            camera.update(delta_time);
            (camera.position, camera.zoom, camera.is_settled())
        };
        self.center.set(position);
        self.zoom.set(zoom);
        if settled && self.stationary.set(true) {
            tracing::debug!(view = %self.name, center = %position, "view stationary");
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            name: self.name.clone(),
            kind: self.kind,
            center: self.center.get(),
            zoom: self.zoom.get(),
            stationary: self.stationary.get(),
            ready: self.ready.get(),
        }
    }
}

impl View for MapView {
    fn center(&self) -> Point {
        self.center.get()
    }

    fn set_center(&self, center: Point) {
        let settled = {
            let mut camera = self.camera.borrow_mut();
            camera.jump_to(center);
            camera.is_settled()
        };
        self.center.set(center);
        self.stationary.set(settled);
    }

    fn is_stationary(&self) -> bool {
        self.stationary.get()
    }

    fn watch_center(&self, mut callback: Box<dyn FnMut(&Point, &Point)>) -> WatchHandle {
        self.center.watch(move |new, old| callback(new, old))
    }

    fn watch_stationary(&self, mut callback: Box<dyn FnMut(&bool, &bool)>) -> WatchHandle {
        self.stationary.watch(move |new, old| callback(new, old))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Viewport;
    use std::cell::Cell;
    use std::rc::Rc;

    const DT: f64 = 1.0 / 60.0;

    fn settle(view: &MapView) {
        for _ in 0..1000 {
            view.tick(DT);
        }
    }

    fn view() -> MapView {
        MapView::new(ViewKind::Map, "map", Point::new(-118.244, 34.052), 12.0, 0.2)
    }

    #[test]
    fn new_view_is_stationary_but_not_ready() {
        let view = view();
        let snapshot = view.snapshot();
        assert!(snapshot.stationary);
        assert!(!snapshot.ready);
        assert_eq!(snapshot.center, Point::new(-118.244, 34.052));
        assert_eq!(snapshot.zoom, 12.0);
        assert_eq!(snapshot.kind, ViewKind::Map);
    }

    #[test]
    fn go_to_animates_until_stationary() {
        let view = view();
        let transitions = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&transitions);
        let _watch = view.watch_stationary(Box::new(move |new: &bool, _: &bool| {
            sink.borrow_mut().push(*new)
        }));

        view.go_to(GoToTarget::Center(Point::new(-118.0, 34.0)));
        assert!(!view.is_stationary());

        view.tick(DT);
        assert!(!view.is_stationary());
        assert_ne!(view.center(), Point::new(-118.244, 34.052));

        settle(&view);
        assert!(view.is_stationary());
        assert_eq!(view.center(), Point::new(-118.0, 34.0));
        assert_eq!(*transitions.borrow(), vec![false, true]);
    }

    #[test]
    fn go_to_extent_fits_zoom() {
        let view = view();
        let extent = Extent::new(6.0, 47.5, 10.5, 51.0);
        view.go_to(GoToTarget::Extent(extent));
        settle(&view);

        assert_eq!(view.center(), extent.center());
        assert!((view.snapshot().zoom - extent.fit_zoom(Viewport::default())).abs() < 1e-9);
    }

    #[test]
    fn fitted_extent_is_fully_visible() {
        let view = view();
        let extent = Extent::new(0.0, 0.0, 8.0, 4.0);
        view.go_to(GoToTarget::Extent(extent));
        settle(&view);

        let (width, height) = view.camera.borrow().span();
        assert!((width - extent.width()).abs() < 1e-9, "visible width {width}");
        assert!(height >= extent.height());
    }

    #[test]
    fn tall_extent_fits_its_height() {
        let view = view();
        let extent = Extent::new(0.0, 0.0, 1.0, 40.0);
        view.go_to(GoToTarget::Extent(extent));
        settle(&view);

        let (width, height) = view.camera.borrow().span();
        assert!((height - extent.height()).abs() < 1e-9, "visible height {height}");
        assert!(width >= extent.width());
    }

    #[test]
    fn pan_moves_by_a_quarter_span() {
        // 1024x768 px at zoom 2 shows 360 by 270 degrees
        let view = MapView::new(ViewKind::Scene, "scene", Point::new(0.0, 0.0), 2.0, 0.2);
        view.pan(PanDirection::East);
        view.pan(PanDirection::North);
        settle(&view);

        assert_eq!(view.center(), Point::new(90.0, 67.5));
    }

    #[test]
    fn set_center_jumps_and_publishes() {
        let view = view();
        let centers = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&centers);
        let _watch = view.watch_center(Box::new(move |new: &Point, _: &Point| {
            sink.borrow_mut().push(*new)
        }));

        view.set_center(Point::new(1.0, 2.0));

        assert_eq!(view.center(), Point::new(1.0, 2.0));
        assert!(view.is_stationary());
        assert_eq!(*centers.borrow(), vec![Point::new(1.0, 2.0)]);
    }

    #[test]
    fn when_ready_runs_once_after_attach() {
        let view = view();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        view.when_ready(move || counter.set(counter.get() + 1));

        assert_eq!(calls.get(), 0);
        view.attach();
        view.attach();
        assert_eq!(calls.get(), 1);

        let late = Rc::new(Cell::new(false));
        let mark = Rc::clone(&late);
        view.when_ready(move || mark.set(true));
        assert!(late.get());
    }
}
