use std::fmt;

// longitude is x, latitude is y
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> LonLat {
        LonLat {
            longitude: lon,
            latitude: lat,
        }
    }

    pub fn x(&self) -> f64 {
        self.longitude
    }

    pub fn y(&self) -> f64 {
        self.latitude
    }
}

/// A rectangle in degrees. Nothing checks that min < max; callers supply sane constants.
#[derive(Clone, Debug, PartialEq)]
pub struct GPSBounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl GPSBounds {
    /// Takes the bounds in the usual (west, south, east, north) order.
    pub fn from_wsen(west: f64, south: f64, east: f64, north: f64) -> GPSBounds {
        GPSBounds {
            min_lon: west,
            min_lat: south,
            max_lon: east,
            max_lat: north,
        }
    }

    pub fn west(&self) -> f64 {
        self.min_lon
    }

    pub fn south(&self) -> f64 {
        self.min_lat
    }

    pub fn east(&self) -> f64 {
        self.max_lon
    }

    pub fn north(&self) -> f64 {
        self.max_lat
    }

    pub fn contains(&self, pt: LonLat) -> bool {
        pt.longitude >= self.min_lon
            && pt.longitude <= self.max_lon
            && pt.latitude >= self.min_lat
            && pt.latitude <= self.max_lat
    }
}

impl fmt::Display for GPSBounds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "GPSBounds(west {}, south {}, east {}, north {})",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}
