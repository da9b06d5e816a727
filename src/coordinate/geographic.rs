//! Validated geographic coordinate

use std::fmt;

use crate::errors::{FeatureError, FeatureResult};

/// Latitude bounds in decimal degrees (inclusive)
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
/// Longitude bounds in decimal degrees (inclusive)
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// A geographic coordinate with latitude, longitude and optional elevation
///
/// Values are checked once at construction and cannot change afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
    elevation: Option<f64>,
}

impl Coordinate {
    /// Create a new coordinate
    ///
    /// # Arguments
    /// * `latitude` - Latitude in decimal degrees (-90 to 90)
    /// * `longitude` - Longitude in decimal degrees (-180 to 180)
    /// * `elevation` - Optional elevation in meters
    ///
    /// # Returns
    /// The coordinate, or `OutOfRange` naming the first offending component
    pub fn new(latitude: f64, longitude: f64, elevation: Option<f64>) -> FeatureResult<Self> {
        // NaN is never contained, so it is rejected as well
        if !(LATITUDE_RANGE.0..=LATITUDE_RANGE.1).contains(&latitude) {
            return Err(FeatureError::OutOfRange { field: "latitude", value: latitude });
        }

        if !(LONGITUDE_RANGE.0..=LONGITUDE_RANGE.1).contains(&longitude) {
            return Err(FeatureError::OutOfRange { field: "longitude", value: longitude });
        }

        Ok(Coordinate { latitude, longitude, elevation })
    }

    /// Create a coordinate without elevation
    pub fn from_lat_lon(latitude: f64, longitude: f64) -> FeatureResult<Self> {
        Self::new(latitude, longitude, None)
    }

    /// Latitude in decimal degrees
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Elevation in meters, if known
    pub fn elevation(&self) -> Option<f64> {
        self.elevation
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.elevation {
            Some(elevation) => write!(
                f,
                "({:.6}, {:.6}, {:.2}m)",
                self.latitude, self.longitude, elevation
            ),
            None => write!(f, "({:.6}, {:.6})", self.latitude, self.longitude),
        }
    }
}
