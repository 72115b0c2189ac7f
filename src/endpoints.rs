use std::fmt;

use url::Url;

use crate::error::{Error, Result};

pub const BASE_URL: &str = "https://api.xero.com/api.xro/2.0/";

/// A typed representation of the accounting API collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Accounts,
    BankTransactions,
    BankTransfers,
    BrandingThemes,
    Contacts,
    Invoices,

    /// Custom endpoint with path components
    Custom(Vec<String>),
}

impl Endpoint {
    /// Path of the collection relative to the API root.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Accounts => "Accounts".to_string(),
            Self::BankTransactions => "BankTransactions".to_string(),
            Self::BankTransfers => "BankTransfers".to_string(),
            Self::BrandingThemes => "BrandingThemes".to_string(),
            Self::Contacts => "Contacts".to_string(),
            Self::Invoices => "Invoices".to_string(),
            Self::Custom(segments) => segments.join("/"),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Appends `segments` to the path of `base`.
///
/// Every segment may itself contain `/`; empty components are dropped, so
/// doubled or missing separators between the parts do not matter.
pub fn join(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    let base_segments: Vec<String> = base
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).map(str::to_owned).collect())
        .unwrap_or_default();

    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
        path.clear();
        path.extend(base_segments.iter().map(String::as_str));
        path.extend(
            segments
                .iter()
                .flat_map(|segment| segment.split('/'))
                .filter(|s| !s.is_empty()),
        );
    }

    Ok(url)
}

/// Sets `key=value` on the query string, replacing any previous values of
/// `key` and keeping every other pair in place.
pub fn set_query_param(url: &mut Url, key: &str, value: &str) {
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(key, value);
}
