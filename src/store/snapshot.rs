//! Snapshot file format
//!
//! Layout: the magic `FKS1`, one compression code byte, then the compressed
//! body. The body is little endian: a table count, then per table its name,
//! a row count and the rows. Strings and byte blobs carry a u32 length
//! prefix; optional columns carry a presence byte.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashMap;
use std::io::{self, Cursor, Read};

use crate::compression::{CompressionFactory, CompressionHandler};
use crate::errors::{FeatureError, FeatureResult};
use super::identifier::TableName;
use super::row::FeatureRow;
use super::table::Table;

pub const MAGIC: &[u8; 4] = b"FKS1";

/// Serialize every table into snapshot bytes
pub fn encode(tables: &HashMap<TableName, Table>, compression: &dyn CompressionHandler) -> FeatureResult<Vec<u8>> {
    let mut names: Vec<&TableName> = tables.keys().collect();
    names.sort_by(|a, b| a.as_str().cmp(b.as_str()));

    let mut body = Vec::new();
    body.write_u32::<LittleEndian>(names.len() as u32)?;
    for name in names {
        let table = &tables[name];
        write_str(&mut body, name.as_str())?;
        body.write_u32::<LittleEndian>(table.len() as u32)?;
        for row in table.rows() {
            write_row(&mut body, row)?;
        }
    }

    let packed = compression.compress(&body)?;
    let mut out = Vec::with_capacity(MAGIC.len() + 1 + packed.len());
    out.extend_from_slice(MAGIC);
    out.push(compression.code());
    out.extend_from_slice(&packed);
    Ok(out)
}

/// Parse snapshot bytes back into tables
pub fn decode(bytes: &[u8]) -> FeatureResult<HashMap<TableName, Table>> {
    if bytes.len() < MAGIC.len() + 1 || &bytes[..MAGIC.len()] != MAGIC {
        return Err(corrupt("missing FKS1 header"));
    }
    let handler = CompressionFactory::create_handler(bytes[MAGIC.len()])?;
    let body = handler
        .decompress(&bytes[MAGIC.len() + 1..])
        .map_err(|e| corrupt(&format!("{} body: {}", handler.name(), e)))?;

    let mut cursor = Cursor::new(body.as_slice());
    let table_count = cursor.read_u32::<LittleEndian>().map_err(truncated)?;
    let mut tables = HashMap::new();
    for _ in 0..table_count {
        let name = TableName::new(&read_str(&mut cursor)?)?;
        let row_count = cursor.read_u32::<LittleEndian>().map_err(truncated)?;
        let mut rows = Vec::new();
        for _ in 0..row_count {
            rows.push(read_row(&mut cursor)?);
        }
        tables.insert(name, Table::from_rows(rows));
    }

    if (cursor.position() as usize) != body.len() {
        return Err(corrupt("trailing bytes after last table"));
    }
    Ok(tables)
}

fn write_row(out: &mut Vec<u8>, row: &FeatureRow) -> io::Result<()> {
    write_str(out, &row.id)?;
    match &row.geometry {
        Some(bytes) => {
            out.write_u8(1)?;
            write_bytes(out, bytes)?;
        },
        None => out.write_u8(0)?,
    }
    match &row.attributes {
        Some(text) => {
            out.write_u8(1)?;
            write_str(out, text)?;
        },
        None => out.write_u8(0)?,
    }
    out.write_i32::<LittleEndian>(row.srid)?;
    write_str(out, &format_time(&row.created_at))?;
    match &row.updated_at {
        Some(t) => {
            out.write_u8(1)?;
            write_str(out, &format_time(t))?;
        },
        None => out.write_u8(0)?,
    }
    Ok(())
}

fn read_row(cursor: &mut Cursor<&[u8]>) -> FeatureResult<FeatureRow> {
    let id = read_str(cursor)?;
    let geometry = if read_flag(cursor)? { Some(read_bytes(cursor)?) } else { None };
    let attributes = if read_flag(cursor)? { Some(read_str(cursor)?) } else { None };
    let srid = cursor.read_i32::<LittleEndian>().map_err(truncated)?;
    let created_at = parse_time(&read_str(cursor)?)?;
    let updated_at = if read_flag(cursor)? { Some(parse_time(&read_str(cursor)?)?) } else { None };

    Ok(FeatureRow { id, geometry, attributes, srid, created_at, updated_at })
}

fn write_bytes(out: &mut Vec<u8>, bytes: &[u8]) -> io::Result<()> {
    out.write_u32::<LittleEndian>(bytes.len() as u32)?;
    out.extend_from_slice(bytes);
    Ok(())
}

fn write_str(out: &mut Vec<u8>, text: &str) -> io::Result<()> {
    write_bytes(out, text.as_bytes())
}

fn read_flag(cursor: &mut Cursor<&[u8]>) -> FeatureResult<bool> {
    match cursor.read_u8().map_err(truncated)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(corrupt(&format!("invalid presence flag {}", other))),
    }
}

fn read_bytes(cursor: &mut Cursor<&[u8]>) -> FeatureResult<Vec<u8>> {
    let len = cursor.read_u32::<LittleEndian>().map_err(truncated)? as usize;
    let remaining = cursor.get_ref().len() - cursor.position() as usize;
    if len > remaining {
        return Err(corrupt(&format!("length {} exceeds remaining {} bytes", len, remaining)));
    }
    let mut buf = vec![0u8; len];
    cursor.read_exact(&mut buf).map_err(truncated)?;
    Ok(buf)
}

fn read_str(cursor: &mut Cursor<&[u8]>) -> FeatureResult<String> {
    String::from_utf8(read_bytes(cursor)?).map_err(|e| corrupt(&format!("invalid UTF-8: {}", e)))
}

fn format_time(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_time(text: &str) -> FeatureResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| corrupt(&format!("invalid timestamp '{}': {}", text, e)))
}

fn truncated(e: io::Error) -> FeatureError {
    corrupt(&format!("truncated: {}", e))
}

fn corrupt(msg: &str) -> FeatureError {
    FeatureError::StoreUnavailable(format!("corrupt snapshot: {}", msg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::{DeflateHandler, UncompressedHandler, ZstdHandler};
    use crate::geometry::Geometry;
    use crate::store::Statement;
    use crate::wkb;

    fn sample() -> HashMap<TableName, Table> {
        let mut table = Table::new();
        table
            .apply(Statement::Insert(FeatureRow {
                id: "istanbul".to_string(),
                geometry: Some(wkb::encode(&Geometry::point(28.9784, 41.0082))),
                attributes: Some(r#"{"name":"Istanbul"}"#.to_string()),
                srid: 4326,
                created_at: Utc::now(),
                updated_at: Some(Utc::now()),
            }))
            .unwrap();
        table
            .apply(Statement::Insert(FeatureRow {
                id: "bare".to_string(),
                geometry: None,
                attributes: None,
                srid: 32635,
                created_at: Utc::now(),
                updated_at: None,
            }))
            .unwrap();

        let mut tables = HashMap::new();
        tables.insert(TableName::default(), table);
        tables.insert(TableName::new("empty").unwrap(), Table::new());
        tables
    }

    #[test]
    fn test_snapshot_preserves_rows_with_each_handler() {
        let tables = sample();
        let handlers: Vec<Box<dyn CompressionHandler>> =
            vec![Box::new(UncompressedHandler), Box::new(DeflateHandler), Box::new(ZstdHandler::new())];

        for handler in handlers {
            let bytes = encode(&tables, handler.as_ref()).unwrap();
            assert_eq!(&bytes[..4], b"FKS1");
            assert_eq!(bytes[4], handler.code());

            let restored = decode(&bytes).unwrap();
            assert_eq!(restored.len(), 2);
            let original: Vec<&FeatureRow> = tables[&TableName::default()].rows().collect();
            let read_back: Vec<&FeatureRow> = restored[&TableName::default()].rows().collect();
            assert_eq!(original, read_back);
            assert_eq!(restored[&TableName::default()].indexed_len(), 1);
        }
    }

    #[test]
    fn test_rejects_bad_header() {
        assert!(matches!(decode(b"FKS"), Err(FeatureError::StoreUnavailable(_))));
        assert!(matches!(decode(b"XXXX\x01"), Err(FeatureError::StoreUnavailable(_))));
        assert!(matches!(decode(b"FKS1\x63"), Err(FeatureError::StoreUnavailable(_))));
    }

    #[test]
    fn test_rejects_truncated_body() {
        let bytes = encode(&sample(), &UncompressedHandler).unwrap();
        let cut = &bytes[..bytes.len() - 3];
        assert!(matches!(decode(cut), Err(FeatureError::StoreUnavailable(_))));
    }
}
