//! Point features from CSV
//!
//! The header row names the columns. Longitude comes from `lon`,
//! `longitude` or `x` and latitude from `lat`, `latitude` or `y`; an `id`
//! column sets the feature id. Every other column becomes an attribute whose
//! kind is inferred from the text.

use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;

use crate::coordinate::{Coordinate, CoordinateSystem};
use crate::errors::{FeatureError, FeatureResult};
use crate::feature::{AttributeValue, Feature};

const X_COLUMNS: [&str; 3] = ["lon", "longitude", "x"];
const Y_COLUMNS: [&str; 3] = ["lat", "latitude", "y"];
const ID_COLUMN: &str = "id";

/// Header positions resolved once per file
struct Columns {
    x: usize,
    y: usize,
    id: Option<usize>,
    attributes: Vec<(usize, String)>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> FeatureResult<Self> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
        };

        let x = find(&X_COLUMNS)
            .ok_or_else(|| FeatureError::ConfigError("CSV header has no lon/longitude/x column".to_string()))?;
        let y = find(&Y_COLUMNS)
            .ok_or_else(|| FeatureError::ConfigError("CSV header has no lat/latitude/y column".to_string()))?;
        let id = find(&[ID_COLUMN]);

        let attributes = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != x && *i != y && Some(*i) != id)
            .map(|(i, h)| (i, h.to_string()))
            .collect();

        Ok(Columns { x, y, id, attributes })
    }
}

/// Parse every data row into a point feature
///
/// The outer error is for unreadable input; each inner result is one row, so
/// a bad coordinate on one line does not stop the rest.
pub fn read_point_features<R: Read>(input: R, srid: i32) -> FeatureResult<Vec<FeatureResult<Feature>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| FeatureError::ConfigError(format!("Failed to read CSV headers: {}", e)))?
        .clone();
    let columns = Columns::resolve(&headers)?;
    let geographic = CoordinateSystem::from_srid(srid).is_geographic();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let line = index + 2;
        let record = record.map_err(|e| FeatureError::ConfigError(format!("Row {}: CSV parse error: {}", line, e)))?;
        rows.push(row_to_feature(&record, &columns, srid, geographic, line));
    }

    Ok(rows)
}

fn row_to_feature(
    record: &StringRecord,
    columns: &Columns,
    srid: i32,
    geographic: bool,
    line: usize,
) -> FeatureResult<Feature> {
    let number = |index: usize, name: &str| -> FeatureResult<f64> {
        let text = record.get(index).unwrap_or("");
        text.parse::<f64>()
            .map_err(|_| FeatureError::ConfigError(format!("Row {}: invalid {} '{}'", line, name, text)))
    };
    let x = number(columns.x, "longitude")?;
    let y = number(columns.y, "latitude")?;

    let mut builder = Feature::builder().with_srid(srid);
    builder = if geographic {
        builder.with_coordinate(&Coordinate::from_lat_lon(y, x)?)
    } else {
        builder.with_point(x, y)
    };

    if let Some(id) = columns.id.and_then(|i| record.get(i)).filter(|id| !id.is_empty()) {
        builder = builder.with_id(id);
    }

    for (index, name) in &columns.attributes {
        builder = builder.with_attribute(name.as_str(), infer_value(record.get(*index).unwrap_or("")));
    }

    Ok(builder.build())
}

/// Attribute value for a CSV cell: empty is null, then integer, float, boolean, text
pub fn infer_value(text: &str) -> AttributeValue {
    if text.is_empty() {
        return AttributeValue::Null;
    }
    if let Ok(i) = text.parse::<i64>() {
        return AttributeValue::Integer(i);
    }
    if let Ok(f) = text.parse::<f64>() {
        return AttributeValue::Float(f);
    }
    match text.to_ascii_lowercase().as_str() {
        "true" => AttributeValue::Boolean(true),
        "false" => AttributeValue::Boolean(false),
        _ => AttributeValue::String(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Position, Shape};

    const CITIES: &str = "id,name,lat,lon,population,capital\n\
                          istanbul,Istanbul,41.0082,28.9784,15460000,false\n\
                          ankara, Ankara ,39.9334,32.8597,5663000,true\n";

    #[test]
    fn test_reads_points_and_attributes() {
        let rows = read_point_features(CITIES.as_bytes(), 4326).unwrap();
        assert_eq!(rows.len(), 2);

        let istanbul = rows[0].as_ref().unwrap();
        assert_eq!(istanbul.id, "istanbul");
        assert_eq!(istanbul.geometry().unwrap().shape, Shape::Point(Position::new(28.9784, 41.0082)));
        assert_eq!(istanbul.attribute("population"), Some(&AttributeValue::Integer(15_460_000)));
        assert_eq!(istanbul.attribute("capital"), Some(&AttributeValue::Boolean(false)));
        assert!(istanbul.attribute("lat").is_none());

        let ankara = rows[1].as_ref().unwrap();
        assert_eq!(ankara.attribute("name").and_then(|v| v.as_str()), Some("Ankara"));
    }

    #[test]
    fn test_out_of_range_row_fails_alone() {
        let csv = "lat,lon\n91.0,0.0\n10.0,10.0\n";
        let rows = read_point_features(csv.as_bytes(), 4326).unwrap();
        assert!(matches!(rows[0], Err(FeatureError::OutOfRange { field: "latitude", .. })));
        assert!(rows[1].is_ok());
    }

    #[test]
    fn test_projected_srid_skips_range_check() {
        let csv = "x,y\n664274,4550917\n";
        let rows = read_point_features(csv.as_bytes(), 32635).unwrap();
        let feature = rows[0].as_ref().unwrap();
        assert_eq!(feature.srid(), 32635);
        assert_eq!(feature.geometry().unwrap().srid, 32635);
    }

    #[test]
    fn test_missing_coordinate_column() {
        let result = read_point_features("name,lat\nA,1.0\n".as_bytes(), 4326);
        assert!(matches!(result, Err(FeatureError::ConfigError(_))));
    }

    #[test]
    fn test_generated_id_when_column_absent() {
        let rows = read_point_features("lat,lon\n1,2\n".as_bytes(), 4326).unwrap();
        assert!(!rows[0].as_ref().unwrap().id.is_empty());
    }

    #[test]
    fn test_infer_value() {
        assert_eq!(infer_value(""), AttributeValue::Null);
        assert_eq!(infer_value("42"), AttributeValue::Integer(42));
        assert_eq!(infer_value("5461.0"), AttributeValue::Float(5461.0));
        assert_eq!(infer_value("TRUE"), AttributeValue::Boolean(true));
        assert_eq!(infer_value("Turkey"), AttributeValue::String("Turkey".to_string()));
    }
}
