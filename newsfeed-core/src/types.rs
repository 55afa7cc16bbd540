use crate::slug;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LATEST_COUNT: u32 = 4;

/// An article record as served by the remote service.
///
/// Fields other than the four the client relies on are kept in `extra` and
/// serialized back untouched. `slug` is never read from the service; it is
/// filled in by [`Article::decorate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub post_id: i64,
    pub title: String,
    pub category_name: String,
    pub date_unparsed: String,
    #[serde(default, skip_deserializing)]
    pub slug: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Article {
    /// Compute and attach the slug.
    pub fn decorate(mut self) -> Self {
        // a stored "slug" column would otherwise be serialized next to ours
        self.extra.remove("slug");
        self.slug = slug::build_slug(&self.title, self.post_id);
        self
    }

    /// Route path a front-end navigates to for this article.
    pub fn path(&self) -> String {
        format!("/{}/{}", self.category_name, self.slug)
    }

    /// Best-effort parse of `date_unparsed`. Ordering never depends on this.
    pub fn published_at(&self) -> Option<NaiveDateTime> {
        let raw = self.date_unparsed.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_utc());
        }
        for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(dt);
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }
}

/// Category key to whatever metadata the front-end attaches to it.
pub type CategoryMap = BTreeMap<String, Value>;
