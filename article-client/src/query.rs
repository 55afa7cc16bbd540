//! Query strings for the hosted REST service.
//!
//! The service takes `select`, `field=eq.value` filters, `order=field.dir`,
//! `limit` and `offset` as plain query parameters. Names and values are
//! percent-encoded as URI components, so a space is `%20`, never `+`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const ARTICLES_RESOURCE: &str = "articles";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    select: String,
    filters: Vec<(String, String)>,
    order: Option<(String, Direction)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleQuery {
    pub fn new() -> Self {
        Self {
            select: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
            offset: None,
        }
    }

    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.select = columns.into();
        self
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn order(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order = Some((field.into(), direction));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Render against the service root. `base` must end with `/`.
    pub fn to_url(&self, base: &Url) -> Result<Url, url::ParseError> {
        let mut url = base.join(ARTICLES_RESOURCE)?;
        url.set_query(Some(&self.query_string()));
        Ok(url)
    }

    pub fn query_string(&self) -> String {
        let mut params = vec![("select".to_string(), self.select.clone())];
        for (field, value) in &self.filters {
            params.push((field.clone(), format!("eq.{}", value)));
        }
        if let Some((field, direction)) = &self.order {
            params.push(("order".to_string(), format!("{}.{}", field, direction.as_str())));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset".to_string(), offset.to_string()));
        }

        params
            .iter()
            .map(|(name, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(name, COMPONENT),
                    utf8_percent_encode(value, COMPONENT)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}
