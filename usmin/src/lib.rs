//! Reads mine locations from the USGS mineral resources WFS (the `usmin` feature namespace).
//!
//! [`WfsClient`] issues the GetFeature request and [`parse`] turns the GML that comes back into
//! [`PointRecord`]s. The two are split by the [`FeatureSource`] trait, so callers can feed canned
//! responses through the rest of the pipeline.

#[macro_use]
extern crate log;

mod fetch;
mod parse;

pub use crate::fetch::{
    wfs_bbox_param, FeatureSource, RawFeatureResponse, WfsClient, DEFAULT_WFS_URL,
};
pub use crate::parse::{
    parse, AttributeDefaults, FeatureBatch, MineAttributes, ParseError, PointRecord, SkipReason,
    SkippedFeature, GML_NS, USMIN_NS,
};
