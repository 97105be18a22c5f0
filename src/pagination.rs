//! Pagination walker for Bitbucket list endpoints
//!
//! List endpoints return one page at a time with a `next` locator. The
//! [`Paginator`] flattens the chain into a lazy item sequence: items are
//! yielded in page order, within a page in source-array order, and the next
//! page is only fetched when the current buffer runs dry. Each walk starts
//! from the page it was built with; it is not restartable.

use crate::client::Client;
use crate::error::AppError;
use crate::model::responses::{Page, Payload};
use serde_json::Value;
use std::collections::VecDeque;
use tracing::debug;

/// Lazy iterator over every item of a paginated listing
pub struct Paginator<'a> {
    client: &'a Client,
    items: VecDeque<Value>,
    next: Option<String>,
}

impl Client {
    /// Walks every page of a paginated listing, starting from `first_page`.
    ///
    /// Pass the result of any list endpoint:
    ///
    /// ```ignore
    /// let first = client.get_issues("my-repo", None).await?;
    /// let mut items = client.all_pages(first)?;
    /// while let Some(issue) = items.try_next().await? {
    ///     println!("{}", issue["id"]);
    /// }
    /// ```
    ///
    /// A `None` first page (e.g. a 204 response) yields an empty sequence.
    ///
    /// # Errors
    /// Construction fails when the first page is not a JSON page mapping.
    /// Iteration propagates any error from a follow-up fetch immediately.
    pub fn all_pages(&self, first_page: Option<Payload>) -> Result<Paginator<'_>, AppError> {
        match first_page {
            None => Ok(Paginator {
                client: self,
                items: VecDeque::new(),
                next: None,
            }),
            Some(payload) => {
                let page = Page::from_payload(payload)?;
                Ok(Paginator {
                    client: self,
                    items: page.values.into(),
                    next: page.next,
                })
            }
        }
    }
}

impl Paginator<'_> {
    /// Returns the next item, fetching the next page when needed.
    ///
    /// `Ok(None)` marks the end of the listing. Errors abort the walk; no
    /// partial results are suppressed.
    pub async fn try_next(&mut self) -> Result<Option<Value>, AppError> {
        loop {
            if let Some(item) = self.items.pop_front() {
                return Ok(Some(item));
            }
            let Some(locator) = self.next.take() else {
                return Ok(None);
            };
            debug!("Fetching next page: {}", locator);
            let Some(payload) = self.client.get(&locator, None).await? else {
                return Ok(None);
            };
            let page = Page::from_payload(payload)?;
            self.items = page.values.into();
            self.next = page.next;
        }
    }

    /// Drains the walk into a vector
    pub async fn collect_all(mut self) -> Result<Vec<Value>, AppError> {
        let mut out = Vec::new();
        while let Some(item) = self.try_next().await? {
            out.push(item);
        }
        Ok(out)
    }
}
