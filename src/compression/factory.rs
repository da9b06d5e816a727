//! Handler lookup by snapshot code or configuration name

use crate::errors::{FeatureError, FeatureResult};
use super::handler::CompressionHandler;
use super::uncompressed::UncompressedHandler;
use super::deflate::DeflateHandler;
use super::zstd::ZstdHandler;

pub struct CompressionFactory;

impl CompressionFactory {
    /// Every supported method at its default settings
    pub fn get_available_handlers() -> Vec<Box<dyn CompressionHandler>> {
        vec![
            Box::new(UncompressedHandler),
            Box::new(DeflateHandler),
            Box::new(ZstdHandler::new()),
        ]
    }

    /// Handler for the code found in a snapshot header
    ///
    /// An unknown code means the file was not written by this store.
    pub fn create_handler(code: u8) -> FeatureResult<Box<dyn CompressionHandler>> {
        Self::get_available_handlers()
            .into_iter()
            .find(|handler| handler.code() == code)
            .ok_or_else(|| FeatureError::StoreUnavailable(format!("unknown snapshot compression code {}", code)))
    }

    /// Handler for a configured name; `uncompressed` and `zlib` are accepted aliases
    pub fn get_handler_by_name(name: &str) -> FeatureResult<Box<dyn CompressionHandler>> {
        let lowered = name.to_lowercase();
        let wanted = match lowered.as_str() {
            "uncompressed" => "none",
            "zlib" => "deflate",
            other => other,
        };

        let handlers = Self::get_available_handlers();
        let known: Vec<&'static str> = handlers.iter().map(|handler| handler.name()).collect();
        handlers
            .into_iter()
            .find(|handler| handler.name() == wanted)
            .ok_or_else(|| {
                FeatureError::ConfigError(format!(
                    "Unknown compression type: {} (expected one of {})",
                    name,
                    known.join(", ")
                ))
            })
    }

    /// Handler for the `[store]` compression settings
    ///
    /// A level is only meaningful for zstd.
    pub fn from_config(name: &str, level: Option<i32>) -> FeatureResult<Box<dyn CompressionHandler>> {
        let handler = Self::get_handler_by_name(name)?;
        match level {
            None => Ok(handler),
            Some(level) if handler.code() == ZstdHandler::CODE => Ok(Box::new(ZstdHandler::with_level(level)?)),
            Some(_) => Err(FeatureError::ConfigError(format!(
                "compression_level is only supported for zstd, not {}",
                handler.name()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handlers_round_trip() {
        let body: Vec<u8> = b"FKS1 row payload ".iter().cycle().take(4096).copied().collect();
        for handler in CompressionFactory::get_available_handlers() {
            let packed = handler.compress(&body).unwrap();
            assert_eq!(handler.decompress(&packed).unwrap(), body, "{}", handler.name());
        }
    }

    #[test]
    fn test_codes_and_names_agree() {
        for handler in CompressionFactory::get_available_handlers() {
            assert_eq!(CompressionFactory::create_handler(handler.code()).unwrap().name(), handler.name());
            assert_eq!(CompressionFactory::get_handler_by_name(handler.name()).unwrap().code(), handler.code());
        }
        assert_eq!(CompressionFactory::get_handler_by_name("ZLIB").unwrap().code(), DeflateHandler::CODE);
        assert_eq!(CompressionFactory::get_handler_by_name("uncompressed").unwrap().code(), UncompressedHandler::CODE);
    }

    #[test]
    fn test_unknown_inputs() {
        assert!(matches!(CompressionFactory::create_handler(7), Err(FeatureError::StoreUnavailable(_))));
        match CompressionFactory::get_handler_by_name("lzw") {
            Err(FeatureError::ConfigError(message)) => assert!(message.contains("none, deflate, zstd")),
            _ => panic!("lzw should be rejected"),
        }
    }

    #[test]
    fn test_from_config_levels() {
        assert_eq!(CompressionFactory::from_config("zstd", None).unwrap().code(), ZstdHandler::CODE);
        assert!(CompressionFactory::from_config("zstd", Some(19)).is_ok());
        assert!(matches!(CompressionFactory::from_config("zstd", Some(99)), Err(FeatureError::ConfigError(_))));
        assert!(matches!(CompressionFactory::from_config("deflate", Some(6)), Err(FeatureError::ConfigError(_))));
    }
}
