//! Decoder rejection tests

use byteorder::{LittleEndian, WriteBytesExt};

use crate::errors::FeatureError;
use crate::geometry::Geometry;
use crate::wkb;

fn assert_malformed(bytes: &[u8]) {
    match wkb::decode(bytes) {
        Err(FeatureError::MalformedGeometry(_)) => {},
        other => panic!("expected MalformedGeometry, got {:?}", other),
    }
}

#[test]
fn test_empty_buffer() {
    assert_malformed(&[]);
}

#[test]
fn test_invalid_byte_order_marker() {
    let mut bytes = wkb::encode(&Geometry::point(1.0, 2.0));
    bytes[0] = 7;
    assert_malformed(&bytes);
}

#[test]
fn test_unrecognized_type_code() {
    // GeometryCollection and ISO Z codes are outside the model
    for code in [0u32, 7, 1001, 0x2000_0001] {
        let mut bytes = vec![1u8];
        bytes.write_u32::<LittleEndian>(code).unwrap();
        bytes.write_f64::<LittleEndian>(1.0).unwrap();
        bytes.write_f64::<LittleEndian>(2.0).unwrap();
        assert_malformed(&bytes);
    }
}

#[test]
fn test_truncated_point() {
    let bytes = wkb::encode(&Geometry::point(1.0, 2.0));
    for len in 1..bytes.len() {
        assert_malformed(&bytes[..len]);
    }
}

#[test]
fn test_truncated_polygon() {
    let polygon = Geometry::polygon(&[vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]]);
    let bytes = wkb::encode(&polygon);
    assert_malformed(&bytes[..bytes.len() - 1]);
}

#[test]
fn test_count_larger_than_payload() {
    let mut bytes = vec![1u8];
    bytes.write_u32::<LittleEndian>(2).unwrap();
    bytes.write_u32::<LittleEndian>(1_000_000).unwrap();
    bytes.write_f64::<LittleEndian>(1.0).unwrap();
    bytes.write_f64::<LittleEndian>(2.0).unwrap();
    assert_malformed(&bytes);
}

#[test]
fn test_trailing_bytes() {
    let mut bytes = wkb::encode(&Geometry::point(1.0, 2.0));
    bytes.push(0);
    assert_malformed(&bytes);
}

#[test]
fn test_member_type_mismatch() {
    // MultiPoint holding a LineString
    let mut bytes = vec![1u8];
    bytes.write_u32::<LittleEndian>(4).unwrap();
    bytes.write_u32::<LittleEndian>(1).unwrap();
    bytes.extend(wkb::encode(&Geometry::line_string(&[(0.0, 0.0), (1.0, 1.0)])));
    assert_malformed(&bytes);
}
