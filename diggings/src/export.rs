use std::path::Path;

use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};

use usmin::PointRecord;

/// One Point feature per record, in the same order, with the raw attribute names the service uses.
pub fn geojson_string(records: &[PointRecord]) -> Result<String> {
    let mut features = Vec::new();
    for rec in records {
        let mut feature = Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![
                rec.longitude(),
                rec.latitude(),
            ]))),
            id: None,
            properties: None,
            foreign_members: None,
        };
        feature.set_property("name", rec.attributes.name.clone());
        feature.set_property("type", rec.attributes.category.clone());
        feature.set_property("state", rec.attributes.region.clone());
        features.push(feature);
    }

    let gj = GeoJson::FeatureCollection(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    });
    Ok(serde_json::to_string_pretty(&gj)?)
}

pub fn write_geojson(records: &[PointRecord], path: &Path) -> Result<()> {
    let contents = geojson_string(records)?;
    info!("Writing {} features to {}", records.len(), path.display());
    digio::write_atomically(path, contents.as_bytes())
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geom::LonLat;
    use usmin::MineAttributes;

    #[test]
    fn point_features() {
        let records = vec![PointRecord {
            pos: LonLat::new(-123.5, 40.0),
            attributes: MineAttributes {
                name: "Black Diamond".to_string(),
                category: "Coal".to_string(),
                region: "CA".to_string(),
            },
        }];
        let txt = geojson_string(&records).unwrap();
        let fc = match txt.parse::<GeoJson>().unwrap() {
            GeoJson::FeatureCollection(fc) => fc,
            x => panic!("expected a FeatureCollection, got {:?}", x),
        };
        assert_eq!(fc.features.len(), 1);
        let f = &fc.features[0];
        assert_eq!(
            f.geometry.as_ref().unwrap().value,
            Value::Point(vec![-123.5, 40.0])
        );
        assert_eq!(
            f.property("name"),
            Some(&serde_json::Value::from("Black Diamond"))
        );
        assert_eq!(f.property("type"), Some(&serde_json::Value::from("Coal")));
        assert_eq!(f.property("state"), Some(&serde_json::Value::from("CA")));
    }
}
