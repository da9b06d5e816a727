//! Spatial reference identifiers

use crate::errors::{FeatureError, FeatureResult};

/// SRID assigned to geometries and features unless stated otherwise (WGS 84)
pub const DEFAULT_SRID: i32 = 4326;

/// Identifier for common coordinate systems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSystem {
    /// WGS 84 (EPSG:4326)
    WGS84,
    /// Web Mercator (EPSG:3857)
    WebMercator,
    /// UTM Zone (EPSG:326xx for northern hemisphere, 327xx for southern)
    UTM(u8, bool),
    /// Any other SRID
    Other(i32),
}

impl CoordinateSystem {
    /// Classify an SRID
    pub fn from_srid(srid: i32) -> Self {
        match srid {
            4326 => CoordinateSystem::WGS84,
            3857 => CoordinateSystem::WebMercator,
            32601..=32660 => CoordinateSystem::UTM((srid - 32600) as u8, true),
            32701..=32760 => CoordinateSystem::UTM((srid - 32700) as u8, false),
            _ => CoordinateSystem::Other(srid),
        }
    }

    /// Parse an SRID from a string (e.g. "EPSG:4326" or "4326")
    pub fn parse_srid(crs_str: &str) -> FeatureResult<i32> {
        let crs_str = crs_str.trim().to_uppercase();
        let code = crs_str.strip_prefix("EPSG:").unwrap_or(&crs_str);

        code.parse::<i32>()
            .map_err(|_| FeatureError::ConfigError(format!("Invalid SRID: {}", crs_str)))
    }

    /// Get the SRID for this coordinate system
    pub fn srid(&self) -> i32 {
        match self {
            CoordinateSystem::WGS84 => 4326,
            CoordinateSystem::WebMercator => 3857,
            CoordinateSystem::UTM(zone, is_northern) => {
                if *is_northern {
                    32600 + *zone as i32
                } else {
                    32700 + *zone as i32
                }
            },
            CoordinateSystem::Other(code) => *code,
        }
    }

    /// True for systems whose axes are degrees of longitude/latitude
    pub fn is_geographic(&self) -> bool {
        matches!(self, CoordinateSystem::WGS84)
    }

    /// Get a description of this coordinate system
    pub fn description(&self) -> String {
        match self {
            CoordinateSystem::WGS84 => "WGS 84 (EPSG:4326)".to_string(),
            CoordinateSystem::WebMercator => "Web Mercator (EPSG:3857)".to_string(),
            CoordinateSystem::UTM(zone, is_northern) => {
                let hemisphere = if *is_northern { "N" } else { "S" };
                format!("UTM Zone {}{} (EPSG:{})", zone, hemisphere, self.srid())
            },
            CoordinateSystem::Other(code) => format!("EPSG:{}", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_srid() {
        assert_eq!(CoordinateSystem::from_srid(4326), CoordinateSystem::WGS84);
        assert_eq!(CoordinateSystem::from_srid(32635), CoordinateSystem::UTM(35, true));
        assert_eq!(CoordinateSystem::from_srid(32735), CoordinateSystem::UTM(35, false));
        assert_eq!(CoordinateSystem::from_srid(2154), CoordinateSystem::Other(2154));
        assert_eq!(CoordinateSystem::from_srid(32635).srid(), 32635);
    }

    #[test]
    fn test_description() {
        assert_eq!(CoordinateSystem::from_srid(32635).description(), "UTM Zone 35N (EPSG:32635)");
        assert_eq!(CoordinateSystem::from_srid(3857).description(), "Web Mercator (EPSG:3857)");
    }

    #[test]
    fn test_parse_srid() {
        assert_eq!(CoordinateSystem::parse_srid("epsg:3857").unwrap(), 3857);
        assert_eq!(CoordinateSystem::parse_srid(" 32635 ").unwrap(), 32635);
        assert!(CoordinateSystem::parse_srid("EPSG:abc").is_err());
    }
}
