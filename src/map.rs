//! The map document: a basemap and the feature layers drawn over it

use crate::layer::FeatureLayer;
use serde::{Deserialize, Serialize};

/// Basemap style drawn beneath operational layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Basemap {
    #[default]
    Gray,
    Streets,
    Topo,
    Satellite,
}

impl Basemap {
    pub const ALL: [Basemap; 4] = [
        Basemap::Gray,
        Basemap::Streets,
        Basemap::Topo,
        Basemap::Satellite,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Basemap::Gray => "Light Gray Canvas",
            Basemap::Streets => "Streets",
            Basemap::Topo => "Topographic",
            Basemap::Satellite => "Imagery",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Map {
    basemap: Basemap,
    layers: Vec<FeatureLayer>,
}

impl Map {
    pub fn new(basemap: Basemap) -> Self {
        Self {
            basemap,
            layers: Vec::new(),
        }
    }

    pub fn basemap(&self) -> Basemap {
        self.basemap
    }

    pub fn layers(&self) -> &[FeatureLayer] {
        &self.layers
    }

    /// Append a layer on top. Returns false if a layer with the same id is
    /// already on the map.
    pub fn add(&mut self, layer: FeatureLayer) -> bool {
        if self.layers.iter().any(|l| l.id == layer.id) {
            tracing::debug!(layer = %layer.id, "layer already on map");
            return false;
        }
        tracing::info!(layer = %layer.title, "added layer to map");
        self.layers.push(layer);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_keeps_order_and_ignores_duplicates() {
        let mut map = Map::new(Basemap::Gray);
        assert!(map.add(FeatureLayer::new("http://example.com/a/FeatureServer/0")));
        assert!(map.add(FeatureLayer::new("http://example.com/b/FeatureServer/0")));
        assert!(!map.add(FeatureLayer::new("http://example.com/a/FeatureServer/0")));

        let titles: Vec<&str> = map.layers().iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
        assert_eq!(map.basemap(), Basemap::Gray);
    }
}
