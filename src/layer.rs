//! Feature layers, extent queries and the sources that answer them

use crate::error::LayerError;
use crate::view::{zoom_for_span, Point, Viewport};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const MAX_ZOOM: f64 = 22.0;

/// Axis-aligned bounding box in map units
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Extent {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin: xmin.min(xmax),
            ymin: ymin.min(ymax),
            xmax: xmin.max(xmax),
            ymax: ymin.max(ymax),
        }
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.xmin + self.xmax) / 2.0,
            (self.ymin + self.ymax) / 2.0,
        )
    }

    /// True only for a single point; a line still has a size to fit
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 && self.height() <= 0.0
    }

    /// Deepest zoom level at which the whole extent fits in `viewport`.
    ///
    /// A zero-size axis places no limit on the zoom.
    pub fn fit_zoom(&self, viewport: Viewport) -> f64 {
        [
            (self.width(), viewport.width),
            (self.height(), viewport.height),
        ]
        .into_iter()
        .filter(|(degrees, _)| *degrees > 0.0)
        .map(|(degrees, pixels)| zoom_for_span(degrees, pixels))
        .reduce(f64::min)
        .map_or(MAX_ZOOM, |zoom| zoom.clamp(0.0, MAX_ZOOM))
    }
}

/// A feature layer published by a feature service
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureLayer {
    pub id: String,
    pub title: String,
    pub url: String,
}

impl FeatureLayer {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let title = url
            .trim_end_matches('/')
            .rsplit('/')
            .find(|part| !part.chars().all(|c| c.is_ascii_digit()) && *part != "FeatureServer")
            .unwrap_or("Layer")
            .to_string();
        Self {
            id: url.clone(),
            title,
            url,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Query selecting every feature with every field
    pub fn create_query(&self) -> Query {
        Query::default()
    }
}

/// Attribute query against a feature layer
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    pub where_clause: String,
    pub out_fields: Vec<String>,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            where_clause: "1=1".to_string(),
            out_fields: vec!["*".to_string()],
        }
    }
}

/// Answers extent queries for feature layers
pub trait ExtentSource {
    fn query_extent(&self, layer: &FeatureLayer, query: &Query) -> Result<Extent, LayerError>;
}

/// Extent source backed by precomputed extents keyed by layer url
#[derive(Clone, Debug, Default)]
pub struct StaticExtentSource {
    extents: HashMap<String, Extent>,
}

impl StaticExtentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extent(mut self, url: impl Into<String>, extent: Extent) -> Self {
        self.extents.insert(url.into(), extent);
        self
    }
}

impl ExtentSource for StaticExtentSource {
    fn query_extent(&self, layer: &FeatureLayer, query: &Query) -> Result<Extent, LayerError> {
        if query.where_clause.trim().is_empty() {
            return Err(LayerError::EmptyWhereClause);
        }
        let extent = self
            .extents
            .get(&layer.url)
            .ok_or_else(|| LayerError::UnknownLayer {
                url: layer.url.clone(),
            })?;
        if extent.is_empty() {
            return Err(LayerError::EmptyExtent {
                url: layer.url.clone(),
            });
        }
        Ok(*extent)
    }
}
