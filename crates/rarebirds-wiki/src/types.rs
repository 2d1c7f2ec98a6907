//! Wikipedia `action=query&prop=pageimages` response types.
//!
//! Pages are keyed by page id; a title with no article comes back under a
//! negative id with a `"missing"` marker and no thumbnail.

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct PageImagesResponse {
    #[serde(default)]
    pub query: Option<QueryResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub pages: BTreeMap<String, Page>,
}

#[derive(Debug, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub source: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl PageImagesResponse {
    /// First thumbnail URL across the returned pages, if any.
    #[must_use]
    pub fn thumbnail_source(&self) -> Option<&str> {
        self.query
            .as_ref()?
            .pages
            .values()
            .find_map(|page| page.thumbnail.as_ref())
            .map(|thumb| thumb.source.as_str())
    }
}
