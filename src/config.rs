//! Engine configuration.

use serde::Deserialize;

use crate::i18n::Locale;
use crate::pagination::MAX_PAGE_SIZE;

/// Pagination settings shared by every connection of a schema.
///
/// Put one in the schema data; resolvers fall back to the defaults when it is
/// absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationConfig {
    /// Largest accepted `first`/`last`.
    pub max_page_size: u32,
    /// Message language when the request names none.
    pub default_locale: Locale,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_page_size: MAX_PAGE_SIZE,
            default_locale: Locale::En,
        }
    }
}
