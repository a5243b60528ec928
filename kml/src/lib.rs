//! Builds and writes KML marker documents: one folder of styled placemarks.

#[macro_use]
extern crate log;

mod write;

use geom::LonLat;

pub use crate::write::write;

pub const MINING_ICON: &str = "http://maps.google.com/mapfiles/kml/shapes/mining.png";

#[derive(Clone, Debug, PartialEq)]
pub struct IconStyle {
    pub href: String,
    pub scale: f64,
}

impl Default for IconStyle {
    fn default() -> IconStyle {
        IconStyle {
            href: MINING_ICON.to_string(),
            scale: 1.0,
        }
    }
}

/// A single placemark.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub name: String,
    pub description: String,
    /// KML always writes this as longitude,latitude
    pub pos: LonLat,
    pub style: IconStyle,
}

/// One named folder of markers.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerDocument {
    pub folder_name: String,
    pub markers: Vec<Marker>,
}

impl MarkerDocument {
    /// One marker per `(name, description, position)`, in the same order, all sharing one style.
    /// Coordinates pass through untouched, even if they're nonsense.
    pub fn build<I>(items: I, folder_name: &str, style: &IconStyle) -> MarkerDocument
    where
        I: IntoIterator<Item = (String, String, LonLat)>,
    {
        let markers = items
            .into_iter()
            .map(|(name, description, pos)| Marker {
                name,
                description,
                pos,
                style: style.clone(),
            })
            .collect();
        MarkerDocument {
            folder_name: folder_name.to_string(),
            markers,
        }
    }
}
