//! Text rendering of features for the command line

use crate::coordinate::CoordinateSystem;
use crate::feature::Feature;

/// Multi-line summary of a feature
///
/// Attributes are listed in key order so output is stable.
pub fn describe_feature(feature: &Feature) -> String {
    let mut result = format!("Feature {}\n", feature.id);
    result.push_str(&format!("  CRS: {}\n", CoordinateSystem::from_srid(feature.srid()).description()));

    match feature.geometry() {
        Some(geometry) => result.push_str(&format!("  Geometry: {}\n", geometry)),
        None => result.push_str("  Geometry: none\n"),
    }

    if let Some(bounds) = feature.geometry().and_then(|g| g.bounds()) {
        result.push_str(&format!(
            "  Bounds: {}, {}, {}, {}\n",
            bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y
        ));
    }

    let mut keys: Vec<&String> = feature.attributes.keys().collect();
    keys.sort();
    if !keys.is_empty() {
        result.push_str("  Attributes:\n");
        for key in keys {
            let value = &feature.attributes[key];
            result.push_str(&format!("    {} ({}): {}\n", key, value.kind(), value));
        }
    }

    result.push_str(&format!("  Created: {}\n", feature.created_at.to_rfc3339()));
    if let Some(updated) = feature.updated_at {
        result.push_str(&format!("  Updated: {}\n", updated.to_rfc3339()));
    }

    result
}

/// One-line summary used by list and query output
pub fn summarize_feature(feature: &Feature) -> String {
    let geometry = feature
        .geometry()
        .map(|g| g.to_string())
        .unwrap_or_else(|| "no geometry".to_string());
    match feature.attribute("name") {
        Some(name) => format!("{}  {}  {}", feature.id, name, geometry),
        None => format!("{}  {}", feature.id, geometry),
    }
}
