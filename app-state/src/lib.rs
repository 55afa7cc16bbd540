pub mod observable;
pub mod route;
pub mod ui;

pub use observable::{Observable, Subscription};
pub use route::{MemoryHistory, NavigationHistory, Route, RouteParams, RouteState};
pub use ui::UiState;

/// Everything the front-end observes, owned by the composition root.
pub struct AppState<H: NavigationHistory> {
    pub route: RouteState<H>,
    pub ui: UiState,
}

impl<H: NavigationHistory> AppState<H> {
    pub fn new(history: H) -> Self {
        Self {
            route: RouteState::new(history),
            ui: UiState::default(),
        }
    }
}
