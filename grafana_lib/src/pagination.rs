//! Page-by-page retrieval for list endpoints.
//!
//! A list is fetched by re-issuing the same request with an advancing
//! cursor (page number or item offset) and a fixed page size. A page holding
//! exactly `page_size` items may not be the last, so another page is
//! requested; any other count ends the sequence. When the total is an exact
//! multiple of the page size this costs one extra, empty request.

use crate::client::Client;
use crate::context::Context;
use crate::error::Error;
use crate::http::Request;
use serde::de::DeserializeOwned;
use std::num::NonZeroUsize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// Page numbers, advanced by one.
    Page,
    /// Item offsets, advanced by the page size.
    Offset,
}

/// How a list endpoint is paged: parameter names, page size, start cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    cursor: Cursor,
    cursor_param: String,
    size_param: String,
    page_size: NonZeroUsize,
    start: u64,
}

impl Paginator {
    /// Numbered pages starting at 1.
    pub fn pages(
        cursor_param: impl Into<String>,
        size_param: impl Into<String>,
        page_size: NonZeroUsize,
    ) -> Self {
        Self {
            cursor: Cursor::Page,
            cursor_param: cursor_param.into(),
            size_param: size_param.into(),
            page_size,
            start: 1,
        }
    }

    /// Item offsets starting at 0.
    pub fn offsets(
        cursor_param: impl Into<String>,
        size_param: impl Into<String>,
        page_size: NonZeroUsize,
    ) -> Self {
        Self {
            cursor: Cursor::Offset,
            cursor_param: cursor_param.into(),
            size_param: size_param.into(),
            page_size,
            start: 0,
        }
    }

    /// Override the first cursor value.
    pub fn starting_at(mut self, start: u64) -> Self {
        self.start = start;
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    fn advance(&self, cursor: u64) -> u64 {
        match self.cursor {
            Cursor::Page => cursor + 1,
            Cursor::Offset => cursor + self.page_size.get() as u64,
        }
    }

    fn page_request(&self, base: &Request, cursor: u64) -> Request {
        let mut request = base.clone();
        request.set_query(&self.size_param, self.page_size);
        request.set_query(&self.cursor_param, cursor);
        request
    }
}

impl Client {
    /// Fetch every page of a list endpoint whose pages are JSON arrays and
    /// return all items in the order received.
    ///
    /// Pages are requested strictly one after another. Any error, including
    /// cancellation through `ctx`, discards the items gathered so far.
    pub async fn paginate<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        request: Request,
        paginator: &Paginator,
    ) -> Result<Vec<T>, Error> {
        self.paginate_by(ctx, request, paginator, |page: Vec<T>| page)
            .await
    }

    /// Like [`Client::paginate`], for endpoints that wrap each page's items
    /// in an envelope `P`; `items` extracts them.
    pub async fn paginate_by<P, T, F>(
        &self,
        ctx: &Context,
        request: Request,
        paginator: &Paginator,
        items: F,
    ) -> Result<Vec<T>, Error>
    where
        P: DeserializeOwned,
        F: Fn(P) -> Vec<T>,
    {
        let mut all = Vec::new();
        let mut cursor = paginator.start;
        loop {
            let page: P = self
                .dispatch(ctx, paginator.page_request(&request, cursor))
                .await?;
            let page = items(page);
            let full = page.len() == paginator.page_size();
            all.extend(page);
            if !full {
                return Ok(all);
            }
            cursor = paginator.advance(cursor);
        }
    }
}
