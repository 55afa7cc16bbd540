use crate::observable::{Observable, Subscription};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, rename = "postId", skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
}

impl RouteParams {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.post_id.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub path: String,
    pub params: RouteParams,
}

impl Route {
    /// Route for `path` with its params parsed.
    pub fn parse(path: &str) -> Self {
        Self {
            path: path.to_string(),
            params: parse_params(path),
        }
    }
}

/// `/{category}/{postId}/...` → params; fewer than two segments → empty.
///
/// `postId` is the raw second segment (usually a slug), not validated here.
pub fn parse_params(path: &str) -> RouteParams {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    match (segments.next(), segments.next()) {
        (Some(category), Some(post_id)) => RouteParams {
            category: Some(category.to_string()),
            post_id: Some(post_id.to_string()),
        },
        _ => RouteParams::default(),
    }
}

/// The browser history as seen by the router.
pub trait NavigationHistory {
    /// Record a new entry and make it current.
    fn push(&self, path: &str);
    fn current_path(&self) -> String;
}

#[derive(Debug)]
struct HistoryStack {
    entries: Vec<String>,
    cursor: usize,
}

/// In-process history with back/forward, used outside a browser.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    stack: Arc<Mutex<HistoryStack>>,
}

impl MemoryHistory {
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            stack: Arc::new(Mutex::new(HistoryStack {
                entries: vec![initial_path.into()],
                cursor: 0,
            })),
        }
    }

    /// Step back one entry. Returns false at the start of history.
    pub fn back(&self) -> bool {
        let mut stack = self.stack.lock().unwrap_or_else(|e| e.into_inner());
        if stack.cursor == 0 {
            return false;
        }
        stack.cursor -= 1;
        true
    }

    /// Step forward one entry. Returns false at the end of history.
    pub fn forward(&self) -> bool {
        let mut stack = self.stack.lock().unwrap_or_else(|e| e.into_inner());
        if stack.cursor + 1 >= stack.entries.len() {
            return false;
        }
        stack.cursor += 1;
        true
    }

    /// Entries on the stack, including the initial one.
    pub fn entry_count(&self) -> usize {
        self.stack
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entries
            .len()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl NavigationHistory for MemoryHistory {
    fn push(&self, path: &str) {
        let mut stack = self.stack.lock().unwrap_or_else(|e| e.into_inner());
        // a push after going back discards the forward entries
        let keep = stack.cursor + 1;
        stack.entries.truncate(keep);
        stack.entries.push(path.to_string());
        stack.cursor = stack.entries.len() - 1;
    }

    fn current_path(&self) -> String {
        let stack = self.stack.lock().unwrap_or_else(|e| e.into_inner());
        stack.entries[stack.cursor].clone()
    }
}

/// The current route, kept in step with a [`NavigationHistory`].
pub struct RouteState<H: NavigationHistory> {
    history: H,
    current: Observable<Route>,
}

impl<H: NavigationHistory> RouteState<H> {
    /// Initial route comes from the history, params parsed.
    pub fn new(history: H) -> Self {
        let current = Observable::new(Route::parse(&history.current_path()));
        Self { history, current }
    }

    pub fn current(&self) -> Route {
        self.current.get()
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Programmatic navigation. Params are reset to empty, not parsed.
    pub fn navigate(&self, path: &str) {
        debug!("Navigating to {}", path);
        self.history.push(path);
        self.current.set(Route {
            path: path.to_string(),
            params: RouteParams::default(),
        });
    }

    /// Back/forward happened: re-read the history and parse params.
    pub fn handle_pop_state(&self) {
        let path = self.history.current_path();
        debug!("History moved to {}", path);
        self.current.set(Route::parse(&path));
    }

    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(&Route) + Send + Sync + 'static) -> Subscription {
        self.current.subscribe(listener)
    }

    pub fn observable(&self) -> &Observable<Route> {
        &self.current
    }
}
