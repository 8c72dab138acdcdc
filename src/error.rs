use crate::router::Page;
use thiserror::Error;

/// Errors surfaced at the binary edge: loading the catalog, config, or logs.
#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog format error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Invalid values in a loaded configuration.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{field}: range [{min}, {max}] is inverted")]
    InvertedRange { field: &'static str, min: f64, max: f64 },

    #[error("{field}: {value} must not be negative")]
    Negative { field: &'static str, value: f64 },

    #[error("{field}: {value} must lie within [0, 1]")]
    NotAFraction { field: &'static str, value: f64 },

    #[error("frame interval must be at least 1ms")]
    ZeroFrameInterval,
}

/// Misuse of the filter/search entry points.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouteError {
    #[error("page `{0}` has no filter dimension")]
    NotFilterable(Page),

    #[error("page `{0}` does not support search")]
    NotSearchable(Page),
}

/// Failure to resolve a "show detail" action.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DetailError {
    #[error("no card {index} on page `{page}` ({len} rendered)")]
    IndexOutOfRange { page: Page, index: usize, len: usize },

    #[error("cards on page `{0}` have no detail view")]
    NoDetail(Page),

    #[error("record {id} not found on page `{page}`")]
    UnknownRecord { page: Page, id: usize },
}

impl PortfolioError {
    /// Short message for the CLI, without the error chain.
    pub fn user_message(&self) -> String {
        match self {
            PortfolioError::Io(e) => format!("File system error: {}", e),
            PortfolioError::Json(e) => format!("Could not parse catalog: {}", e),
            PortfolioError::Config(e) => format!("Invalid configuration: {}", e),
            PortfolioError::Logging(msg) => format!("Logging disabled: {}", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvertedRange {
            field: "radius_range",
            min: 2.0,
            max: 1.0,
        };
        assert_eq!(err.to_string(), "radius_range: range [2, 1] is inverted");
    }

    #[test]
    fn test_detail_error_display() {
        let err = DetailError::IndexOutOfRange {
            page: Page::Episodes,
            index: 4,
            len: 2,
        };
        assert!(err.to_string().contains("episodes"));
        assert!(err.to_string().contains("2 rendered"));
    }

    #[test]
    fn test_user_message_wraps_config_error() {
        let err = PortfolioError::from(ConfigError::ZeroFrameInterval);
        assert!(err.user_message().starts_with("Invalid configuration"));
    }
}
