use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, instrument};
use url::Url;

use crate::utils::collate::locale_compare;

/// Orderings available for the final URL list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    /// Whole URL, ascending
    #[default]
    Asc,
    /// Whole URL, descending
    Desc,
    /// Hostname, ascending
    Domain,
    /// Scheme, ascending
    Protocol,
    /// File extension of the path, ascending, URLs without one last
    Filetype,
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortOption::Asc => "asc",
            SortOption::Desc => "desc",
            SortOption::Domain => "domain",
            SortOption::Protocol => "protocol",
            SortOption::Filetype => "filetype",
        };
        f.write_str(name)
    }
}

/// Hostname of a URL, empty when it does not parse or has no host
pub fn hostname(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_owned))
        .unwrap_or_default()
}

/// Scheme of a URL, empty when it does not parse
pub fn protocol(url: &str) -> String {
    Url::parse(url)
        .map(|parsed| parsed.scheme().to_string())
        .unwrap_or_default()
}

/// Extension of the last path segment, with its leading dot
///
/// `None` when the URL does not parse or the last segment has no extension.
pub fn extension(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let path = parsed.path();
    let segment = &path[path.rfind('/').map_or(0, |i| i + 1)..];
    let ext = &segment[segment.rfind('.')?..];
    if ext.len() > 1 {
        Some(ext.to_string())
    } else {
        None
    }
}

/// Sort key computed once per URL
enum SortKey {
    Text(String),
    Extension(Option<String>),
}

fn sort_key(option: SortOption, url: &str) -> SortKey {
    match option {
        SortOption::Asc | SortOption::Desc => SortKey::Text(url.to_string()),
        SortOption::Domain => SortKey::Text(hostname(url)),
        SortOption::Protocol => SortKey::Text(protocol(url)),
        SortOption::Filetype => SortKey::Extension(extension(url)),
    }
}

fn compare_keys(a: &SortKey, b: &SortKey) -> Ordering {
    match (a, b) {
        (SortKey::Text(a), SortKey::Text(b)) => locale_compare(a, b),
        (SortKey::Extension(a), SortKey::Extension(b)) => match (a, b) {
            (Some(a), Some(b)) => locale_compare(a, b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        _ => Ordering::Equal,
    }
}

/// Orders URLs by the chosen option
///
/// The sort is stable: URLs with equal keys keep their incoming order.
#[instrument(level = "debug", skip(urls), fields(count = urls.len()))]
pub fn sort_urls(urls: Vec<String>, option: SortOption) -> Vec<String> {
    let mut keyed: Vec<(SortKey, String)> = urls
        .into_iter()
        .map(|url| (sort_key(option, &url), url))
        .collect();

    match option {
        SortOption::Desc => keyed.sort_by(|(a, _), (b, _)| compare_keys(b, a)),
        _ => keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b)),
    }

    debug!("Sorted {} URLs by {}", keyed.len(), option);
    keyed.into_iter().map(|(_, url)| url).collect()
}
