//! Response bodies of `GET /api/manga`.

use serde::{Deserialize, Serialize};
use shared::MangaEntry;

/// Body of a paged response.
///
/// The service answers with a flat page, but a nested array of pages is
/// flattened rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PageBody {
    Flat(Vec<MangaEntry>),
    Nested(Vec<Vec<MangaEntry>>),
}

impl PageBody {
    pub fn into_entries(self) -> Vec<MangaEntry> {
        match self {
            PageBody::Flat(entries) => entries,
            PageBody::Nested(pages) => pages.into_iter().flatten().collect(),
        }
    }
}
