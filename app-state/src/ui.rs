use crate::observable::Observable;
use newsfeed_core::{Article, CategoryMap};

/// Independent holders for what the article pages render.
///
/// No invariants tie them together; callers that load articles for a
/// category are responsible for writing both in the order they want.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub articles: Observable<Vec<Article>>,
    pub categories: Observable<CategoryMap>,
    pub current_category: Observable<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }
}
