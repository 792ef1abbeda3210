//! The already-exhausted zero-item cursor.

use crate::pagination::cursor::{BoxCursor, PageCursor};
use crate::ports::page_source::QueryError;
use async_trait::async_trait;
use std::marker::PhantomData;

/// A cursor with no items, born exhausted.
///
/// Identity element of concatenation: chaining anything onto it (from
/// either side) behaves exactly like the other cursor alone, which is
/// what makes folding a list of queries over it well defined.
pub struct EmptyCursor<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> EmptyCursor<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for EmptyCursor<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Clone + Send + 'static> PageCursor<T> for EmptyCursor<T> {
    fn loaded_all(&self) -> bool {
        true
    }

    fn length(&self) -> Option<u64> {
        Some(0)
    }

    fn current_page(&self) -> Option<u32> {
        None
    }

    fn loaded_len(&self) -> usize {
        0
    }

    fn page_count(&self) -> usize {
        0
    }

    fn page(&self, _index: usize) -> Option<&[T]> {
        None
    }

    async fn load_more(&mut self) -> Result<Option<Vec<T>>, QueryError> {
        Ok(None)
    }

    async fn load_length(&mut self) -> Result<u64, QueryError> {
        Ok(0)
    }

    fn concat(self: Box<Self>, other: BoxCursor<T>) -> BoxCursor<T> {
        other
    }
}
