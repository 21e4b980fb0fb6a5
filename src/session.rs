use crate::api::{Photo, SearchResponse};

/// Quick-search shortcut labels shown as a button row.
pub const CATEGORIES: &[&str] = &["Nature", "Birds", "Cats", "Shoes"];

#[derive(Clone, Debug, PartialEq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Succeeded,
    Failed(String),
}

/// One outbound search, tagged with the sequence number it was issued under.
/// A response is only applied if its tag still matches the latest sequence,
/// so a slow earlier request can never overwrite a newer one.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchRequest {
    pub query: String,
    pub page: u32,
    pub seq: u64,
}

/// All state of one search session. Triggers return the `FetchRequest` to
/// issue, or `None` when the trigger is suppressed (blank query, out of
/// bounds navigation). The caller performs the HTTP call and feeds the
/// outcome back through [`apply_success`](Self::apply_success) /
/// [`apply_failure`](Self::apply_failure).
#[derive(Clone, Debug)]
pub struct SessionState {
    /// Live contents of the search box, updated on every keystroke.
    pub input: String,
    /// The last submitted query; empty until the first submit.
    pub query: String,
    pub page: u32,
    pub images: Vec<Photo>,
    pub total_pages: u32,
    pub status: FetchStatus,
    seq: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            query: String::new(),
            page: 1,
            images: Vec::new(),
            total_pages: 0,
            status: FetchStatus::Idle,
            seq: 0,
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Submit whatever is currently typed in the search box.
    pub fn submit_input(&mut self) -> Option<FetchRequest> {
        let text = self.input.clone();
        self.submit_query(&text)
    }

    /// Start a new search: page resets to 1. Blank input is silently skipped.
    pub fn submit_query(&mut self, text: &str) -> Option<FetchRequest> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.query = trimmed.to_string();
        self.page = 1;
        Some(self.issue())
    }

    /// Category shortcuts behave like typing the lowercased label and
    /// submitting it.
    pub fn select_category(&mut self, label: &str) -> Option<FetchRequest> {
        let lowered = label.to_lowercase();
        self.input = lowered.clone();
        self.submit_query(&lowered)
    }

    /// Jump to a page, clamped to `[1, total_pages]`. A no-op until the
    /// first search has succeeded, since the page count is unknown before
    /// then.
    pub fn go_to_page(&mut self, n: u32) -> Option<FetchRequest> {
        if self.query.is_empty() || self.total_pages == 0 {
            return None;
        }
        self.page = n.clamp(1, self.total_pages);
        Some(self.issue())
    }

    pub fn next_page(&mut self) -> Option<FetchRequest> {
        if self.has_next() {
            self.go_to_page(self.page + 1)
        } else {
            None
        }
    }

    pub fn previous_page(&mut self) -> Option<FetchRequest> {
        if self.has_previous() {
            self.go_to_page(self.page - 1)
        } else {
            None
        }
    }

    fn issue(&mut self) -> FetchRequest {
        debug_assert!(self.page >= 1);
        self.seq += 1;
        self.status = FetchStatus::Loading;
        FetchRequest {
            query: self.query.clone(),
            page: self.page,
            seq: self.seq,
        }
    }

    /// Apply a successful response. Results and page count are replaced
    /// together; responses from superseded requests are discarded.
    pub fn apply_success(&mut self, seq: u64, response: SearchResponse) {
        if seq != self.seq {
            return;
        }
        self.images = response.results;
        self.total_pages = response.total_pages;
        self.status = FetchStatus::Succeeded;
    }

    /// Record a fetch failure. The previous results stay visible; the error
    /// is kept for display until dismissed or replaced by a new trigger.
    pub fn apply_failure(&mut self, seq: u64, message: String) {
        if seq != self.seq {
            return;
        }
        self.status = FetchStatus::Failed(message);
    }

    pub fn dismiss_error(&mut self) {
        if matches!(self.status, FetchStatus::Failed(_)) {
            self.status = FetchStatus::Idle;
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
