use crate::firestore::page_url;

#[derive(Debug, Clone, PartialEq, Eq)]
enum CursorState {
    /// A request is due, for the first page or for the given token
    Fetching(Option<String>),
    Done,
}

/// Walks `nextPageToken` cursors until the server returns an empty one.
///
/// Every URL is rebuilt from the base request URL, so tokens never accumulate.
#[derive(Debug, Clone)]
pub struct PageCursor {
    request_url: String,
    state: CursorState,
}

impl PageCursor {
    pub fn new(request_url: impl Into<String>) -> Self {
        Self {
            request_url: request_url.into(),
            state: CursorState::Fetching(None),
        }
    }

    /// URL of the next page to request, or `None` once the last page was seen.
    pub fn next_url(&self) -> Option<String> {
        match &self.state {
            CursorState::Fetching(token) => Some(page_url(&self.request_url, token.as_deref())),
            CursorState::Done => None,
        }
    }

    /// Record the token returned with the page just fetched.
    pub fn advance(&mut self, next_page_token: Option<String>) {
        self.state = match next_page_token {
            Some(token) if !token.is_empty() => CursorState::Fetching(Some(token)),
            _ => CursorState::Done,
        };
    }

    #[cfg(test)]
    fn is_done(&self) -> bool {
        self.state == CursorState::Done
    }
}
