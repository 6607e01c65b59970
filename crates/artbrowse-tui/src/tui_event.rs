use artbrowse_core::{FetchRequest, Page};

/// Commands sent from the TUI to the backend.
#[derive(Debug, Clone, Copy)]
pub enum BackendCommand {
    /// Fetch one page. Several may be in flight at once.
    FetchPage(FetchRequest),
}

/// Events flowing from the backend fetch tasks to the TUI.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    /// A page arrived for `request`.
    PageLoaded { request: FetchRequest, page: Page },
    /// Fetching `request` failed; the error has already been logged.
    FetchFailed { request: FetchRequest, error: String },
}
