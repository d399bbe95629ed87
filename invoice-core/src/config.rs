use std::env;

use serde::{Deserialize, Serialize};

use crate::paginate::{PageGeometry, TrailingPage};

/// Settings for turning a rendered invoice into a paginated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Page size in millimeters.
    pub page: PageGeometry,
    pub trailing_page: TrailingPage,
    /// Flate-compress the embedded image.
    pub compress: bool,
    pub title: Option<String>,
    pub creator: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            page: PageGeometry::a4(),
            trailing_page: TrailingPage::Preserve,
            compress: true,
            title: None,
            creator: "invoice-core".to_string(),
        }
    }
}

impl ExportConfig {
    /// Read overrides from the environment. Missing or unparsable values
    /// fall back to the defaults.
    ///
    /// `INVOICE_PAGE_WIDTH_MM`, `INVOICE_PAGE_HEIGHT_MM`,
    /// `INVOICE_TRAILING_PAGE` (`preserve` | `trim`), `INVOICE_COMPRESS`,
    /// `INVOICE_TITLE`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        ExportConfig {
            page: PageGeometry {
                width: env_parse("INVOICE_PAGE_WIDTH_MM").unwrap_or(defaults.page.width),
                height: env_parse("INVOICE_PAGE_HEIGHT_MM").unwrap_or(defaults.page.height),
            },
            trailing_page: env_parse("INVOICE_TRAILING_PAGE").unwrap_or(defaults.trailing_page),
            compress: env_parse("INVOICE_COMPRESS").unwrap_or(defaults.compress),
            title: env::var("INVOICE_TITLE").ok().or(defaults.title),
            creator: defaults.creator,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
