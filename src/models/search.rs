//! Global search result model.

use serde::{Deserialize, Serialize};

/// Which collection a search hit came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Article,
    Library,
}

/// One hit of a site-wide search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: SearchKind,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub slug: String,
}
