//! Compression for store snapshots
//!
//! Each method is a strategy behind `CompressionHandler`; the factory maps
//! configuration names and snapshot header codes to handlers.

mod handler;
mod uncompressed;
mod deflate;
mod factory;
mod zstd;

pub use handler::CompressionHandler;
pub use uncompressed::UncompressedHandler;
pub use deflate::DeflateHandler;
pub use factory::CompressionFactory;
pub use zstd::ZstdHandler;
