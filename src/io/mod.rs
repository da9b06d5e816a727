//! I/O utilities for binary encoding
//!
//! This module provides the byte order strategies used by the WKB codec.

pub mod byte_order;
