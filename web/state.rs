use std::sync::Arc;

use siklus::FormHandler;

/// Process-wide state, built once in `main` and shared read-only by every
/// request thread.
pub struct AppState {
    pub form: FormHandler,
}

impl AppState {
    pub fn new(form: FormHandler) -> Self {
        AppState { form }
    }
}

/// Handle given to every request thread.
pub type SharedState = Arc<AppState>;
