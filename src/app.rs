//! Composition root: wires the map, both views and the synchronizer together

use crate::config::Config;
use crate::error::LayerError;
use crate::layer::{Extent, ExtentSource, FeatureLayer, Query, StaticExtentSource};
use crate::map::{Basemap, Map};
use crate::sync::{SyncPhase, ViewSynchronizer};
use crate::view::{GoToTarget, MapView, PanDirection, View, ViewKind, ViewSnapshot};
use std::cell::RefCell;
use std::rc::Rc;

/// Everything the dashboard needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct AppSnapshot {
    pub map_view: ViewSnapshot,
    pub scene_view: ViewSnapshot,
    pub phase: SyncPhase,
    pub basemap: Basemap,
    pub layers: Vec<String>,
}

/// The map document, its two linked views, and the operational layer
pub struct LinkedApp {
    map: Rc<RefCell<Map>>,
    map_view: Rc<MapView>,
    scene_view: Rc<MapView>,
    layer: FeatureLayer,
    query: Query,
    extent_source: Rc<dyn ExtentSource>,
    synchronizer: ViewSynchronizer,
}

/// Link already-constructed collaborators.
///
/// The scene view is the secondary: once it settles, its center drives the
/// map view. When the map view becomes ready the layer's extent is queried,
/// the map view flies to it, and the layer is added to the map.
pub fn compose(
    map: Rc<RefCell<Map>>,
    map_view: Rc<MapView>,
    scene_view: Rc<MapView>,
    layer: FeatureLayer,
    query: Query,
    extent_source: Rc<dyn ExtentSource>,
) -> LinkedApp {
    let primary: Rc<dyn View> = map_view.clone();
    let secondary: Rc<dyn View> = scene_view.clone();
    let synchronizer = ViewSynchronizer::new(&primary, &secondary);

    {
        let map = Rc::clone(&map);
        let view = Rc::downgrade(&map_view);
        let layer = layer.clone();
        let query = query.clone();
        let source = Rc::clone(&extent_source);
        map_view.when_ready(move || {
            let Some(view) = view.upgrade() else {
                return;
            };
            if let Err(e) = reveal_layer(&map, &view, &layer, &query, source.as_ref()) {
                tracing::error!(layer = %layer.title, "failed to reveal layer: {e}");
            }
        });
    }

    LinkedApp {
        map,
        map_view,
        scene_view,
        layer,
        query,
        extent_source,
        synchronizer,
    }
}

/// Query the layer's extent, fly `view` to it, then add the layer to `map`
pub fn reveal_layer(
    map: &RefCell<Map>,
    view: &MapView,
    layer: &FeatureLayer,
    query: &Query,
    source: &dyn ExtentSource,
) -> Result<Extent, LayerError> {
    let extent = source.query_extent(layer, query)?;
    tracing::info!(layer = %layer.title, ?extent, "zooming to layer extent");
    view.go_to(GoToTarget::Extent(extent));
    map.borrow_mut().add(layer.clone());
    Ok(extent)
}

/// Construct every collaborator from configuration and compose them
pub fn build(config: &Config) -> LinkedApp {
    let map = Rc::new(RefCell::new(Map::new(config.basemap)));

    let map_view = Rc::new(MapView::new(
        ViewKind::Map,
        "Map",
        config.map_view.center,
        config.map_view.zoom,
        config.smoothing,
    ));

    let scene_view = Rc::new(MapView::new(
        ViewKind::Scene,
        "Scene",
        config.scene_intro.center,
        config.scene_intro.zoom,
        config.smoothing,
    ));
    scene_view.go_to(GoToTarget::CenterZoom(
        config.scene_view.center,
        config.scene_view.zoom,
    ));

    let mut layer = FeatureLayer::new(config.layer.url.clone());
    if let Some(title) = &config.layer.title {
        layer = layer.with_title(title.clone());
    }
    let mut query = layer.create_query();
    query.where_clause.clone_from(&config.layer.where_clause);
    query.out_fields.clone_from(&config.layer.out_fields);

    let mut source = StaticExtentSource::new();
    if let Some(extent) = config.layer.extent {
        source = source.with_extent(config.layer.url.clone(), extent);
    }

    compose(map, map_view, scene_view, layer, query, Rc::new(source))
}

impl LinkedApp {
    /// Attach both views to their surfaces
    pub fn attach(&self) {
        self.map_view.attach();
        self.scene_view.attach();
    }

    pub fn tick(&self, delta_time: f64) {
        self.scene_view.tick(delta_time);
        self.map_view.tick(delta_time);
    }

    pub fn pan_scene(&self, direction: PanDirection) {
        self.scene_view.pan(direction);
    }

    /// Fly the map view back to the operational layer
    pub fn zoom_to_layer(&self) -> Result<Extent, LayerError> {
        reveal_layer(
            &self.map,
            &self.map_view,
            &self.layer,
            &self.query,
            self.extent_source.as_ref(),
        )
    }

    /// Stop mirroring the scene center onto the map
    pub fn unlink(&self) {
        self.synchronizer.dispose();
    }

    pub fn snapshot(&self) -> AppSnapshot {
        let map = self.map.borrow();
        AppSnapshot {
            map_view: self.map_view.snapshot(),
            scene_view: self.scene_view.snapshot(),
            phase: self.synchronizer.phase(),
            basemap: map.basemap(),
            layers: map.layers().iter().map(|l| l.title.clone()).collect(),
        }
    }
}
