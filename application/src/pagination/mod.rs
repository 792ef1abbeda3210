//! Lazy pagination cursors.
//!
//! A cursor walks one remote listing page by page:
//!
//! - **Unstarted** — nothing fetched yet; length and current page are
//!   unknown.
//! - **Partially loaded** — at least one page held; more may exist.
//! - **Exhausted** — everything fetched; terminal, and further
//!   [`PageCursor::load_more`] calls are no-ops.
//!
//! [`QueryCursor`] is the single-source form bound to one remote query.
//! [`ConcatCursor`] chains two cursors left-then-right, and
//! [`EmptyCursor`] is the identity element of concatenation, which makes
//! folding an arbitrary set of queries into one cursor well defined.
//! Concatenation is associative: however a chain was parenthesized, it
//! yields the same item sequence.
//!
//! The network suspension point is isolated in `load_more`; iteration
//! ([`Items`], [`into_stream`]) is a thin pull-based wrapper that walks
//! the loaded pages and fetches the next page only when it runs off the
//! end.

mod concat;
mod cursor;
mod empty;
mod source;

pub use concat::ConcatCursor;
pub use cursor::{BoxCursor, Items, PageCursor, into_stream};
pub use empty::EmptyCursor;
pub use source::QueryCursor;

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted in-memory page source for cursor tests.

    use crate::ports::page_source::{FetchedPage, PageSource, QueryError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    /// Serves pre-scripted pages and records every served page number.
    ///
    /// The call log and the failure switch are shared handles, so tests
    /// keep access to them after boxing the source into a cursor.
    pub(crate) struct ScriptedSource {
        pages: Vec<Vec<i32>>,
        total: u64,
        fail_next: Arc<AtomicBool>,
        calls: Arc<Mutex<Vec<u32>>>,
    }

    impl ScriptedSource {
        pub(crate) fn new(pages: Vec<Vec<i32>>) -> Self {
            let total = pages.iter().map(|p| p.len() as u64).sum();
            Self {
                pages,
                total,
                fail_next: Arc::new(AtomicBool::new(false)),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub(crate) fn with_total(mut self, total: u64) -> Self {
            self.total = total;
            self
        }

        /// Page numbers served so far, in order.
        pub(crate) fn call_log(&self) -> Arc<Mutex<Vec<u32>>> {
            Arc::clone(&self.calls)
        }

        /// Arm this to make the next fetch fail once.
        pub(crate) fn failure_switch(&self) -> Arc<AtomicBool> {
            Arc::clone(&self.fail_next)
        }
    }

    #[async_trait]
    impl PageSource<i32> for ScriptedSource {
        async fn fetch_page(&self, page_number: u32) -> Result<FetchedPage<i32>, QueryError> {
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(QueryError::Transport {
                    message: "connection reset".to_string(),
                    raw_body: None,
                });
            }
            self.calls.lock().unwrap().push(page_number);
            let items = self
                .pages
                .get(page_number as usize - 1)
                .cloned()
                .unwrap_or_default();
            Ok(FetchedPage {
                items,
                total: self.total,
            })
        }
    }
}
