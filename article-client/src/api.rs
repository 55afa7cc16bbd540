use crate::query::{ArticleQuery, Direction};
use newsfeed_core::slug::extract_id;
use newsfeed_core::{
    Article, ArticleError, ConfigError, CoreError, ServiceConfig, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use tracing::{debug, error, info};
use url::Url;

const ORDER_FIELD: &str = "date_unparsed";
const CATEGORY_FIELD: &str = "category_name";
const ID_FIELD: &str = "post_id";

/// Options for [`ArticleClient::list_articles`].
///
/// Defaults: no category filter, 12 articles per page, first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    pub category: Option<String>,
    pub limit: u32,
    pub page: u32,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            category: None,
            limit: DEFAULT_PAGE_SIZE,
            page: DEFAULT_PAGE,
        }
    }
}

impl ListOptions {
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.limit == 0 {
            return Err(CoreError::invalid_input("limit must be at least 1"));
        }
        if self.page == 0 {
            return Err(CoreError::invalid_input("page must be at least 1"));
        }
        Ok(())
    }

    /// Zero-based row offset of the first article on `page`.
    pub fn offset(&self) -> Result<u64, CoreError> {
        self.validate()?;
        u64::from(self.page - 1)
            .checked_mul(u64::from(self.limit))
            .ok_or_else(|| CoreError::invalid_input("page offset overflows"))
    }

    fn category_filter(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

/// Read-only client for the article collection.
#[derive(Debug, Clone)]
pub struct ArticleClient {
    http_client: Client,
    base_url: Url,
}

impl ArticleClient {
    pub fn new(config: ServiceConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let base_url = config.parsed_base_url()?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value("api_key", &config.api_key)?);
        headers.insert(
            AUTHORIZATION,
            header_value("bearer_token", &format!("Bearer {}", config.bearer_token()))?,
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(|e| {
            error!("Failed to create HTTP client: {}", e);
            CoreError::invalid_input(format!("failed to create HTTP client: {e}"))
        })?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Issue a single query and decode the returned rows.
    async fn fetch(&self, query: &ArticleQuery, operation: &str) -> Result<Vec<Article>, CoreError> {
        let url = query
            .to_url(&self.base_url)
            .map_err(|e| CoreError::invalid_input(format!("invalid query URL: {e}")))?;
        debug!("Fetching articles with URL: {}", url);

        let response = match self.http_client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Network error for {}: {}", url, e);
                return Err(ArticleError::FetchFailed {
                    operation: operation.to_string(),
                    status_code: None,
                }
                .into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            error!("Request failed with status: {} for {}", status, url);
            return Err(ArticleError::FetchFailed {
                operation: operation.to_string(),
                status_code: Some(status.as_u16()),
            }
            .into());
        }

        let articles: Vec<Article> = response.json().await.map_err(|e| {
            error!("Failed to parse articles from {}: {}", url, e);
            ArticleError::InvalidResponse {
                details: format!("failed to {operation}: {e}"),
            }
        })?;

        Ok(articles.into_iter().map(Article::decorate).collect())
    }

    /// One page of articles, newest first, optionally restricted to a category.
    pub async fn list_articles(&self, options: &ListOptions) -> Result<Vec<Article>, CoreError> {
        let offset = options.offset()?;

        let mut query = ArticleQuery::new();
        if let Some(category) = options.category_filter() {
            query = query.eq(CATEGORY_FIELD, category);
        }
        let query = query
            .order(ORDER_FIELD, Direction::Desc)
            .limit(u64::from(options.limit))
            .offset(offset);

        let articles = self.fetch(&query, "fetch articles").await?;

        if let Some(first) = articles.first() {
            debug!("Sample article structure: {:?}", first);
        }
        info!(
            "Fetched {} articles for category: {}, page: {}",
            articles.len(),
            options.category_filter().unwrap_or("all"),
            options.page
        );
        Ok(articles)
    }

    /// Resolve `/{category}/{slug}` to an article.
    ///
    /// The id comes from the slug; the title part is ignored. An article that
    /// exists under a different category is rejected with `CategoryMismatch`.
    pub async fn get_article_by_slug(&self, category: &str, slug: &str) -> Result<Article, CoreError> {
        let post_id = extract_id(slug)?;

        let query = ArticleQuery::new().eq(ID_FIELD, post_id);
        let articles = self.fetch(&query, "fetch article").await?;

        let article = match articles.into_iter().next() {
            Some(article) => article,
            None => {
                error!("No article found with post_id: {}", post_id);
                return Err(ArticleError::NotFound {
                    post_id: post_id.to_string(),
                }
                .into());
            }
        };

        if article.category_name.to_lowercase() != category.to_lowercase() {
            error!(
                "Category mismatch. Expected: {}, Got: {}",
                category, article.category_name
            );
            return Err(ArticleError::CategoryMismatch {
                post_id: post_id.to_string(),
                requested: category.to_string(),
                actual: article.category_name,
            }
            .into());
        }

        debug!("Retrieved article {} in {}", article.slug, article.category_name);
        Ok(article)
    }

    /// The `limit` newest articles across all categories.
    pub async fn list_latest(&self, limit: u32) -> Result<Vec<Article>, CoreError> {
        if limit == 0 {
            return Err(CoreError::invalid_input("limit must be at least 1"));
        }

        let query = ArticleQuery::new()
            .order(ORDER_FIELD, Direction::Desc)
            .limit(u64::from(limit));

        let articles = self.fetch(&query, "fetch latest news").await?;
        info!("Fetched {} latest articles", articles.len());
        Ok(articles)
    }
}

fn header_value(field: &str, value: &str) -> Result<HeaderValue, CoreError> {
    let mut header = HeaderValue::from_str(value).map_err(|_| {
        CoreError::Config(ConfigError::InvalidValue {
            field: field.to_string(),
            value: "<redacted>".to_string(),
        })
    })?;
    header.set_sensitive(true);
    Ok(header)
}
