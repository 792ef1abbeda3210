//! The cursor capability contract and its iteration wrappers.

use crate::ports::page_source::QueryError;
use async_trait::async_trait;
use futures::Stream;

/// A boxed cursor, the form queries hand out and concatenation operates
/// on.
pub type BoxCursor<T> = Box<dyn PageCursor<T>>;

/// Lazy, forward-only view of one or more remote item listings.
///
/// A cursor remembers every page it has loaded and never re-fetches.
/// Once [`loaded_all`](PageCursor::loaded_all) reports `true` it never
/// reverts; [`load_more`](PageCursor::load_more) then becomes a no-op.
///
/// Cursors are not meant to be advanced from several call sites at
/// once: interleaved `load_more` calls through independent iterators
/// would interleave page fetches. One owner drives a cursor at a time.
#[async_trait]
pub trait PageCursor<T>: Send {
    /// Whether every page has been fetched. Monotonic.
    fn loaded_all(&self) -> bool;

    /// Total item count as last reported by the server; `None` until at
    /// least one page has been fetched (and, for concatenations, until
    /// both sides know theirs).
    fn length(&self) -> Option<u64>;

    /// Zero-based index of the last fully fetched page, or `None`
    /// before any fetch. Concatenations forward whichever side is still
    /// loading, left first.
    fn current_page(&self) -> Option<u32>;

    /// Number of items currently available for in-order emission.
    fn loaded_len(&self) -> usize;

    /// Number of pages currently available for in-order emission.
    fn page_count(&self) -> usize;

    /// A loaded page by emission-order index. For a concatenation the
    /// right side's pages become visible only once the left side is
    /// exhausted, so the emitted order is always left-before-right even
    /// when the right cursor was loaded ahead through its own handle.
    fn page(&self, index: usize) -> Option<&[T]>;

    /// Fetch the next page. Returns the newly fetched batch, or
    /// `Ok(None)` without touching the network when already exhausted.
    ///
    /// On failure the cursor is unchanged: the page number is only
    /// claimed once the fetch completes, so an aborted or failed call
    /// leaves the cursor retryable.
    async fn load_more(&mut self) -> Result<Option<Vec<T>>, QueryError>;

    /// Resolve the total item count, fetching the first page if nothing
    /// has been loaded yet. Idempotent.
    async fn load_length(&mut self) -> Result<u64, QueryError>;

    /// Chain `other` after this cursor. Associative, with
    /// [`EmptyCursor`](super::EmptyCursor) as the identity on both
    /// sides.
    fn concat(self: Box<Self>, other: BoxCursor<T>) -> BoxCursor<T>;
}

/// Pull-based iterator over a cursor.
///
/// Walks the already-loaded pages first and calls
/// [`load_more`](PageCursor::load_more) only when it runs off the end,
/// so re-iterating after an earlier pass replays the loaded set without
/// touching the network. Create one with [`Items::new`].
pub struct Items<'c, T> {
    cursor: &'c mut dyn PageCursor<T>,
    page: usize,
    offset: usize,
}

impl<'c, T: Clone + Send> Items<'c, T> {
    pub fn new(cursor: &'c mut dyn PageCursor<T>) -> Self {
        Self {
            cursor,
            page: 0,
            offset: 0,
        }
    }

    /// The next item, fetching the next page when needed. `Ok(None)`
    /// once the cursor is exhausted and every item has been emitted.
    pub async fn next(&mut self) -> Result<Option<T>, QueryError> {
        loop {
            if let Some(items) = self.cursor.page(self.page) {
                if self.offset < items.len() {
                    let item = items[self.offset].clone();
                    self.offset += 1;
                    return Ok(Some(item));
                }
                self.page += 1;
                self.offset = 0;
                continue;
            }
            if self.cursor.loaded_all() {
                return Ok(None);
            }
            self.cursor.load_more().await?;
        }
    }

    /// Drain the remaining items into a vector.
    pub async fn collect(mut self) -> Result<Vec<T>, QueryError> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }
}

/// Adapt a cursor into a [`futures::Stream`] of items.
///
/// The stream owns the cursor and drives it to exhaustion; a fetch
/// error ends the stream after yielding the error.
pub fn into_stream<T>(cursor: BoxCursor<T>) -> impl Stream<Item = Result<T, QueryError>>
where
    T: Clone + Send + 'static,
{
    futures::stream::try_unfold((cursor, 0usize, 0usize), |state| async move {
        let (mut cursor, mut page, mut offset) = state;
        loop {
            if let Some(items) = cursor.page(page) {
                if offset < items.len() {
                    let item = items[offset].clone();
                    offset += 1;
                    return Ok(Some((item, (cursor, page, offset))));
                }
                page += 1;
                offset = 0;
                continue;
            }
            if cursor.loaded_all() {
                return Ok(None);
            }
            cursor.load_more().await?;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::testing::ScriptedSource;
    use crate::pagination::{EmptyCursor, QueryCursor};
    use futures::TryStreamExt;

    fn cursor_over(pages: Vec<Vec<i32>>) -> QueryCursor<i32> {
        QueryCursor::new(Box::new(ScriptedSource::new(pages)))
    }

    #[tokio::test]
    async fn items_walks_every_page_in_server_order() {
        let mut cursor = cursor_over(vec![vec![1, 2], vec![3, 4], vec![5]]);
        let collected = Items::new(&mut cursor).collect().await.unwrap();
        assert_eq!(collected, vec![1, 2, 3, 4, 5]);
        assert!(cursor.loaded_all());
    }

    #[tokio::test]
    async fn reiterating_replays_the_loaded_set_without_fetching() {
        let source = ScriptedSource::new(vec![vec![1, 2], vec![3]]);
        let log = source.call_log();
        let mut cursor = QueryCursor::new(Box::new(source));

        let first = Items::new(&mut cursor).collect().await.unwrap();
        let fetches_after_first = log.lock().unwrap().len();
        let second = Items::new(&mut cursor).collect().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(log.lock().unwrap().len(), fetches_after_first);
    }

    #[tokio::test]
    async fn concat_is_associative() {
        let a = || -> BoxCursor<i32> { Box::new(cursor_over(vec![vec![1], vec![2]])) };
        let b = || -> BoxCursor<i32> { Box::new(cursor_over(vec![vec![3]])) };
        let c = || -> BoxCursor<i32> { Box::new(cursor_over(vec![vec![4], vec![5]])) };

        let mut left_assoc = a().concat(b()).concat(c());
        let mut right_assoc = a().concat(b().concat(c()));

        let left_items = Items::new(&mut *left_assoc).collect().await.unwrap();
        let right_items = Items::new(&mut *right_assoc).collect().await.unwrap();

        assert_eq!(left_items, vec![1, 2, 3, 4, 5]);
        assert_eq!(left_items, right_items);
        assert_eq!(left_assoc.length(), right_assoc.length());
    }

    #[tokio::test]
    async fn empty_is_a_two_sided_identity() {
        let base = || -> BoxCursor<i32> { Box::new(cursor_over(vec![vec![7, 8], vec![9]])) };

        let mut plain = base();
        let mut left_id: BoxCursor<i32> = Box::new(EmptyCursor::new()).concat(base());
        let mut right_id = base().concat(Box::new(EmptyCursor::new()));

        let expected = Items::new(&mut *plain).collect().await.unwrap();
        let with_left = Items::new(&mut *left_id).collect().await.unwrap();
        let with_right = Items::new(&mut *right_id).collect().await.unwrap();

        assert_eq!(expected, vec![7, 8, 9]);
        assert_eq!(with_left, expected);
        assert_eq!(with_right, expected);
        assert_eq!(left_id.load_length().await.unwrap(), 3);
        assert_eq!(right_id.load_length().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn stream_adapter_yields_the_same_sequence() {
        let cursor: BoxCursor<i32> = Box::new(cursor_over(vec![vec![1, 2], vec![3]]));
        let items: Vec<i32> = into_stream(cursor).try_collect().await.unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }
}
