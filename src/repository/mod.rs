//! Feature repository
//!
//! Maps features to store rows: geometry through the WKB codec and
//! attributes through their JSON text form.

mod store_repository;
mod traits;
#[cfg(test)]
mod tests;

pub use store_repository::StoreFeatureRepository;
pub use traits::FeatureRepository;
