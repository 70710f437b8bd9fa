use std::collections::HashSet;
use std::future::Future;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::error::Result;

/// Page size requested by the minimal variant of a listing.
pub const MINIMAL_PAGE_LIMIT: u32 = 1;

/// Which page of a cursor-paginated resource to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    First,
    /// A single small page, used to check whether anything exists.
    Minimal,
    After(String),
}

/// Whether a listing follows every cursor or stops after one small page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    #[default]
    Full,
    Minimal,
}

impl PaginationMode {
    pub fn from_flag(minimal: bool) -> Self {
        if minimal { Self::Minimal } else { Self::Full }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// One page of a paginated listing as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    #[serde(default)]
    pub pagination: Option<PageInfo>,
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub results: Vec<T>,
}

/// An explicit `null` results field is an empty page.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl<T> Connection<T> {
    pub fn next_cursor(&self) -> Option<&str> {
        self.pagination
            .as_ref()
            .and_then(|page| page.cursor.as_deref())
            .filter(|cursor| !cursor.is_empty())
    }
}

/// Drives `fetch_page` until the backend stops returning cursors.
///
/// Minimal mode issues exactly one [`PageRequest::Minimal`]. A cursor seen
/// twice ends the walk with what has been gathered so far.
pub async fn paginate<T, F, Fut>(
    mode: PaginationMode,
    resource: &str,
    mut fetch_page: F,
) -> Result<Vec<T>>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Connection<T>>>,
{
    if mode == PaginationMode::Minimal {
        let page = fetch_page(PageRequest::Minimal).await?;
        debug!(resource, results = page.results.len(), "fetched minimal page");
        return Ok(page.results);
    }

    let mut items = Vec::new();
    let mut seen = HashSet::new();
    let mut request = PageRequest::First;
    let mut pages = 0usize;

    loop {
        let page = fetch_page(request).await?;
        pages += 1;
        let next = page.next_cursor().map(str::to_owned);
        items.extend(page.results);

        let Some(cursor) = next else { break };
        if !seen.insert(cursor.clone()) {
            warn!(resource, %cursor, "pagination cursor repeated, stopping");
            break;
        }
        request = PageRequest::After(cursor);
    }

    debug!(resource, pages, results = items.len(), "pagination complete");
    Ok(items)
}
