use std::path::PathBuf;

use chrono::NaiveDate;
use structopt::StructOpt;

use diggings::Config;
use geom::GPSBounds;
use usmin::WfsClient;

#[derive(StructOpt)]
#[structopt(
    name = "diggings",
    about = "Downloads USGS mine locations for a region and writes them as a KML file"
)]
struct Flags {
    /// Western edge of the region, in degrees
    #[structopt(long, default_value = "-124.5", allow_hyphen_values = true)]
    west: f64,
    /// Southern edge of the region, in degrees
    #[structopt(long, default_value = "40.0", allow_hyphen_values = true)]
    south: f64,
    /// Eastern edge of the region, in degrees
    #[structopt(long, default_value = "-122.3", allow_hyphen_values = true)]
    east: f64,
    /// Northern edge of the region, in degrees
    #[structopt(long, default_value = "41.5", allow_hyphen_values = true)]
    north: f64,
    /// The WFS endpoint to query
    #[structopt(long, default_value = "https://mrdata.usgs.gov/services/wfs/usmin")]
    url: String,
    /// Where to write output. The directory must exist.
    #[structopt(long, default_value = ".", parse(from_os_str))]
    output_dir: PathBuf,
    /// The date to put in the output filename, as YYYY-MM-DD. Defaults to today.
    #[structopt(long)]
    date: Option<NaiveDate>,
    /// Also write the points as GeoJSON
    #[structopt(long)]
    geojson: bool,
}

impl Flags {
    fn into_config(self) -> Config {
        let mut config = match self.date {
            Some(date) => Config::for_date(date),
            None => Config::default(),
        };
        config.url = self.url;
        config.bbox = GPSBounds::from_wsen(self.west, self.south, self.east, self.north);
        config.output_dir = self.output_dir;
        config.geojson = self.geojson;
        config
    }
}

fn main() {
    digutil::logger::setup();
    let config = Flags::from_args().into_config();

    let result =
        WfsClient::new(config.url.clone()).and_then(|client| diggings::run(&config, &client));
    let (msg, code) = diggings::report(&result);
    if code == 0 {
        println!("{}", msg);
    } else {
        eprintln!("{}", msg);
        std::process::exit(code);
    }
}
