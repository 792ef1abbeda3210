//! Single-source cursor bound to one remote query.

use crate::pagination::concat::ConcatCursor;
use crate::pagination::cursor::{BoxCursor, PageCursor};
use crate::ports::page_source::{PageSource, QueryError};
use async_trait::async_trait;
use tracing::debug;

/// Cursor over one paginated remote query.
///
/// Holds the pages fetched so far in order. The page counter is only
/// advanced once a fetch completes, so a failed or abandoned call
/// leaves the cursor exactly as it was and the same page is requested
/// again on retry.
pub struct QueryCursor<T> {
    source: Box<dyn PageSource<T>>,
    pages: Vec<Vec<T>>,
    /// Count of completed page fetches; the next wire page number is
    /// `fetched_pages + 1`.
    fetched_pages: u32,
    total: Option<u64>,
    loaded_all: bool,
}

impl<T> QueryCursor<T> {
    pub fn new(source: Box<dyn PageSource<T>>) -> Self {
        Self {
            source,
            pages: Vec::new(),
            fetched_pages: 0,
            total: None,
            loaded_all: false,
        }
    }
}

#[async_trait]
impl<T: Clone + Send + 'static> PageCursor<T> for QueryCursor<T> {
    fn loaded_all(&self) -> bool {
        self.loaded_all
    }

    fn length(&self) -> Option<u64> {
        self.total
    }

    fn current_page(&self) -> Option<u32> {
        self.fetched_pages.checked_sub(1)
    }

    fn loaded_len(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> Option<&[T]> {
        self.pages.get(index).map(Vec::as_slice)
    }

    async fn load_more(&mut self) -> Result<Option<Vec<T>>, QueryError> {
        if self.loaded_all {
            return Ok(None);
        }

        let page_number = self.fetched_pages + 1;
        let fetched = self.source.fetch_page(page_number).await?;
        self.fetched_pages = page_number;
        self.total = Some(fetched.total);

        let loaded = self.loaded_len() + fetched.items.len();
        // An empty page with rows still outstanding would otherwise
        // spin iteration forever; treat it as the end of the listing.
        if loaded as u64 >= fetched.total || fetched.items.is_empty() {
            self.loaded_all = true;
        }

        debug!(
            page = page_number,
            batch = fetched.items.len(),
            total = fetched.total,
            exhausted = self.loaded_all,
            "fetched page"
        );

        self.pages.push(fetched.items.clone());
        Ok(Some(fetched.items))
    }

    async fn load_length(&mut self) -> Result<u64, QueryError> {
        if self.fetched_pages == 0 {
            self.load_more().await?;
        }
        self.total.ok_or_else(|| QueryError::Transport {
            message: "total row count missing after page fetch".to_string(),
            raw_body: None,
        })
    }

    fn concat(self: Box<Self>, other: BoxCursor<T>) -> BoxCursor<T> {
        Box::new(ConcatCursor::new(self, other))
    }
}
