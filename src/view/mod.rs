pub mod camera;
pub mod map_view;
pub mod observable;

pub use camera::{zoom_for_span, Point, Viewport};
pub use map_view::{GoToTarget, MapView, PanDirection, ViewKind, ViewSnapshot};
pub use observable::WatchHandle;

/// A render surface whose center can be observed and written
///
/// Callbacks receive `(new, old)`.
pub trait View {
    fn center(&self) -> Point;
    fn set_center(&self, center: Point);
    fn is_stationary(&self) -> bool;
    fn watch_center(&self, callback: Box<dyn FnMut(&Point, &Point)>) -> WatchHandle;
    fn watch_stationary(&self, callback: Box<dyn FnMut(&bool, &bool)>) -> WatchHandle;
}
