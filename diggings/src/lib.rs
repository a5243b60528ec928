//! Downloads USGS mine locations for a region and writes them out as a KML folder of placemarks.
//!
//! [`run`] is the whole pipeline: fetch, parse, build, write. It runs once and either writes a
//! file, finds nothing, or fails; per-feature problems are counted, not fatal.

#[macro_use]
extern crate log;

mod export;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use digutil::{prettyprint_usize, Timer};
use geom::{GPSBounds, LonLat};
use kml::{IconStyle, MarkerDocument};
use usmin::{AttributeDefaults, FeatureSource, PointRecord};

pub use crate::export::geojson_string;

/// Everything that shapes a run. `Config::for_date` fills in the Northern California defaults.
#[derive(Clone, Debug)]
pub struct Config {
    /// The WFS endpoint
    pub url: String,
    pub bbox: GPSBounds,
    /// Must already exist
    pub output_dir: PathBuf,
    pub filename_prefix: String,
    pub folder_name: String,
    pub icon: IconStyle,
    pub defaults: AttributeDefaults,
    /// Stamped into the output filenames
    pub date: NaiveDate,
    /// Also write the records as GeoJSON next to the KML
    pub geojson: bool,
}

impl Config {
    pub fn for_date(date: NaiveDate) -> Config {
        Config {
            url: usmin::DEFAULT_WFS_URL.to_string(),
            bbox: GPSBounds::from_wsen(-124.5, 40.0, -122.3, 41.5),
            output_dir: PathBuf::from("."),
            filename_prefix: "norcal_mines".to_string(),
            folder_name: "Northern California Mines".to_string(),
            icon: IconStyle::default(),
            defaults: AttributeDefaults::default(),
            date,
            geojson: false,
        }
    }

    /// `<prefix>_<YYYYMMDD>.<ext>` inside the output directory
    pub fn output_path(&self, ext: &str) -> PathBuf {
        self.output_dir
            .join(output_filename(&self.filename_prefix, self.date, ext))
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::for_date(chrono::Local::now().date_naive())
    }
}

pub fn output_filename(prefix: &str, date: NaiveDate, ext: &str) -> String {
    format!("{}_{}.{}", prefix, date.format("%Y%m%d"), ext)
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The region had no usable features, so nothing was written.
    NoPoints,
    Written {
        kml: PathBuf,
        geojson: Option<PathBuf>,
        count: usize,
        skipped: usize,
    },
}

/// Runs the pipeline once. Nothing touches the filesystem until the response has been fetched and
/// parsed successfully.
pub fn run(config: &Config, source: &dyn FeatureSource) -> Result<Outcome> {
    let mut timer = Timer::new(format!(
        "Fetching mine location data for {}",
        config.folder_name
    ));

    timer.start("fetch");
    let raw = source.fetch(&config.bbox).context("fetching mine points")?;
    timer.stop("fetch");
    debug!(
        "Response status {}, {} bytes",
        raw.status,
        prettyprint_usize(raw.body.len())
    );

    timer.start("parse");
    let batch = usmin::parse(&raw.body, &config.defaults).context("parsing GetFeature response")?;
    timer.stop("parse");
    timer.note(format!(
        "Got {} points and skipped {} features",
        prettyprint_usize(batch.records.len()),
        prettyprint_usize(batch.skipped.len())
    ));

    let outside = batch
        .records
        .iter()
        .filter(|rec| !config.bbox.contains(rec.pos))
        .count();
    if outside > 0 {
        warn!(
            "{} points fall outside of {}; keeping them anyway",
            outside, config.bbox
        );
    }

    if batch.records.is_empty() {
        return Ok(Outcome::NoPoints);
    }

    let doc = build_document(&batch.records, config);
    let kml_path = config.output_path("kml");
    timer.start("write KML");
    kml::write(&doc, &kml_path).with_context(|| format!("writing {}", kml_path.display()))?;
    timer.stop("write KML");

    let geojson = if config.geojson {
        let path = config.output_path("geojson");
        export::write_geojson(&batch.records, &path)?;
        Some(path)
    } else {
        None
    };

    Ok(Outcome::Written {
        kml: kml_path,
        geojson,
        count: batch.records.len(),
        skipped: batch.skipped.len(),
    })
}

/// One placemark per record, in the same order. KML wants longitude first, so the axes flip here.
pub fn build_document(records: &[PointRecord], config: &Config) -> MarkerDocument {
    let items = records.iter().map(|rec| {
        (
            rec.attributes.name.clone(),
            format!(
                "Type: {}\nState: {}",
                rec.attributes.category, rec.attributes.region
            ),
            LonLat::new(rec.longitude(), rec.latitude()),
        )
    });
    MarkerDocument::build(items, &config.folder_name, &config.icon)
}

/// What to tell the operator about a run: exactly one message, and the process exit code. Errors
/// include their whole context chain.
pub fn report(result: &Result<Outcome>) -> (String, i32) {
    match result {
        Ok(Outcome::NoPoints) => ("No points found in the specified region.".to_string(), 0),
        Ok(Outcome::Written {
            kml,
            geojson,
            count,
            skipped,
        }) => {
            let mut lines = vec![format!("Successfully created KML file: {}", kml.display())];
            if let Some(path) = geojson {
                lines.push(format!("Also wrote GeoJSON: {}", path.display()));
            }
            lines.push(format!("Total points processed: {}", count));
            if *skipped > 0 {
                lines.push(format!("Features skipped: {}", skipped));
            }
            (lines.join("\n"), 0)
        }
        Err(err) => (format!("Error: {:#}", err), 1),
    }
}
