use app_state::{AppState, MemoryHistory, Route};
use article_client::{ArticleClient, ListOptions};
use newsfeed_core::{ErrorExt, ErrorReporter, ServiceConfig, DEFAULT_LATEST_COUNT};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("newsfeed=debug,article_client=debug,app_state=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting newsfeed");

    let config = ServiceConfig::from_env()?;
    let client = ArticleClient::new(config)?;

    // Stands in for the browser location, e.g. "/sport" or "/sport/some-title-42".
    let initial_path = std::env::var("NEWSFEED_PATH").unwrap_or_else(|_| "/".to_string());
    let state = AppState::new(MemoryHistory::new(initial_path));
    let reporter = ErrorReporter::new();

    let _route_log = state.route.subscribe(|route: &Route| {
        tracing::info!("Route: {} {:?}", route.path, route.params);
    });
    let _articles_log = state.ui.articles.subscribe(|articles: &Vec<_>| {
        tracing::info!("Showing {} articles", articles.len());
    });

    match client.list_latest(DEFAULT_LATEST_COUNT).await {
        Ok(latest) => {
            for article in &latest {
                tracing::info!("Latest: {} ({})", article.title, article.path());
            }
        }
        Err(e) => reporter.report_error(&e),
    }

    let route = state.route.current();
    match (route.params.category, route.params.post_id) {
        (Some(category), Some(slug)) => {
            state.ui.current_category.set(category.clone());
            match client.get_article_by_slug(&category, &slug).await {
                Ok(article) => {
                    tracing::info!("Article {}: {}", article.post_id, article.title);
                    state.ui.articles.set(vec![article]);
                }
                Err(e) if e.is_not_found() => {
                    tracing::warn!("{}", e.user_friendly_message());
                }
                Err(e) => reporter.report_error(&e),
            }
        }
        _ => {
            let category = route
                .path
                .split('/')
                .find(|s| !s.is_empty())
                .map(str::to_string);
            let mut options = ListOptions::default();
            if let Some(category) = category {
                state.ui.current_category.set(category.clone());
                options = options.with_category(category);
            }
            match client.list_articles(&options).await {
                Ok(articles) => state.ui.articles.set(articles),
                Err(e) => reporter.report_error(&e),
            }
        }
    }

    Ok(())
}
