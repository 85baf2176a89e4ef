//! Store connection strings.

use std::path::PathBuf;

use crate::store::StoreError;

/// A parsed store connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUrl {
    /// `memory://`: volatile, lost on restart.
    Memory,
    /// `file://<path>`: JSON snapshot at `path`.
    File(PathBuf),
}

impl StoreUrl {
    /// Parse `memory://`, `file:///abs/path.json` or `file://relative.json`.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let unsupported = || StoreError::UnsupportedUrl(raw.to_string());
        let (scheme, rest) = raw.trim().split_once("://").ok_or_else(unsupported)?;

        match scheme.to_ascii_lowercase().as_str() {
            "memory" if rest.is_empty() => Ok(StoreUrl::Memory),
            "file" if !rest.is_empty() => Ok(StoreUrl::File(PathBuf::from(rest))),
            _ => Err(unsupported()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schemes() {
        assert_eq!(StoreUrl::parse("memory://").unwrap(), StoreUrl::Memory);
        assert_eq!(
            StoreUrl::parse("file:///var/lib/catalog.json").unwrap(),
            StoreUrl::File(PathBuf::from("/var/lib/catalog.json"))
        );
        assert_eq!(
            StoreUrl::parse("FILE://data/catalog.json").unwrap(),
            StoreUrl::File(PathBuf::from("data/catalog.json"))
        );
    }

    #[test]
    fn test_rejects_unknown_or_incomplete() {
        assert!(StoreUrl::parse("mongodb://localhost:27017/countries").is_err());
        assert!(StoreUrl::parse("file://").is_err());
        assert!(StoreUrl::parse("memory://somewhere").is_err());
        assert!(StoreUrl::parse("catalog.json").is_err());
    }
}
