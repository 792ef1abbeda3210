//! Concatenation of two cursors into one logical sequence.

use crate::pagination::cursor::{BoxCursor, PageCursor};
use crate::ports::page_source::QueryError;
use async_trait::async_trait;

/// Two cursors presented as one, left before right.
///
/// `load_more` drains the left side first; the right side's pages are
/// not exposed until the left is exhausted, which keeps the emitted
/// item order left-before-right even when the right cursor was loaded
/// ahead through its own handle before being chained.
pub struct ConcatCursor<T> {
    left: BoxCursor<T>,
    right: BoxCursor<T>,
}

impl<T> ConcatCursor<T> {
    pub fn new(left: BoxCursor<T>, right: BoxCursor<T>) -> Self {
        Self { left, right }
    }
}

#[async_trait]
impl<T: Clone + Send + 'static> PageCursor<T> for ConcatCursor<T> {
    fn loaded_all(&self) -> bool {
        self.left.loaded_all() && self.right.loaded_all()
    }

    fn length(&self) -> Option<u64> {
        match (self.left.length(), self.right.length()) {
            (Some(left), Some(right)) => Some(left + right),
            _ => None,
        }
    }

    fn current_page(&self) -> Option<u32> {
        if !self.left.loaded_all() {
            self.left.current_page()
        } else if !self.right.loaded_all() {
            self.right.current_page()
        } else {
            None
        }
    }

    fn loaded_len(&self) -> usize {
        if self.left.loaded_all() {
            self.left.loaded_len() + self.right.loaded_len()
        } else {
            self.left.loaded_len()
        }
    }

    fn page_count(&self) -> usize {
        if self.left.loaded_all() {
            self.left.page_count() + self.right.page_count()
        } else {
            self.left.page_count()
        }
    }

    fn page(&self, index: usize) -> Option<&[T]> {
        let left_pages = self.left.page_count();
        if index < left_pages {
            self.left.page(index)
        } else if self.left.loaded_all() {
            self.right.page(index - left_pages)
        } else {
            None
        }
    }

    async fn load_more(&mut self) -> Result<Option<Vec<T>>, QueryError> {
        if !self.left.loaded_all() {
            self.left.load_more().await
        } else if !self.right.loaded_all() {
            self.right.load_more().await
        } else {
            Ok(None)
        }
    }

    async fn load_length(&mut self) -> Result<u64, QueryError> {
        let left = self.left.load_length().await?;
        let right = self.right.load_length().await?;
        Ok(left + right)
    }

    fn concat(self: Box<Self>, other: BoxCursor<T>) -> BoxCursor<T> {
        Box::new(ConcatCursor::new(self, other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::testing::ScriptedSource;
    use crate::pagination::{Items, QueryCursor};

    fn boxed(pages: Vec<Vec<i32>>) -> BoxCursor<i32> {
        Box::new(QueryCursor::new(Box::new(ScriptedSource::new(pages))))
    }

    #[tokio::test]
    async fn emits_left_then_right() {
        let mut chained = boxed(vec![vec![1, 2], vec![3]]).concat(boxed(vec![vec![4], vec![5]]));
        let items = Items::new(&mut *chained).collect().await.unwrap();
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert!(chained.loaded_all());
    }

    #[tokio::test]
    async fn length_requires_both_sides() {
        let mut chained = boxed(vec![vec![1, 2]]).concat(boxed(vec![vec![3, 4, 5]]));
        assert_eq!(chained.length(), None);

        chained.load_more().await.unwrap();
        // Left side known, right side still unstarted.
        assert_eq!(chained.length(), None);

        assert_eq!(chained.load_length().await.unwrap(), 5);
        assert_eq!(chained.length(), Some(5));
    }

    #[tokio::test]
    async fn load_length_equals_sum_of_sides() {
        let mut chained = boxed(vec![vec![1, 2], vec![3]]).concat(boxed(vec![vec![4, 5]]));
        assert_eq!(chained.load_length().await.unwrap(), 5);
        // Resolving lengths must not have drained either side.
        assert!(!chained.loaded_all());
    }

    #[tokio::test]
    async fn preloaded_right_side_stays_hidden_until_left_is_done() {
        let mut right = boxed(vec![vec![8, 9]]);
        right.load_more().await.unwrap();
        assert_eq!(right.page_count(), 1);

        let mut chained = boxed(vec![vec![1], vec![2]]).concat(right);

        chained.load_more().await.unwrap();
        // Right side already holds a page, but emission order wins.
        assert_eq!(chained.page_count(), 1);
        assert_eq!(chained.loaded_len(), 1);

        let items = Items::new(&mut *chained).collect().await.unwrap();
        assert_eq!(items, vec![1, 2, 8, 9]);
    }

    #[tokio::test]
    async fn current_page_forwards_the_loading_side() {
        let mut chained = boxed(vec![vec![1], vec![2]]).concat(boxed(vec![vec![3], vec![4]]));
        assert_eq!(chained.current_page(), None);

        chained.load_more().await.unwrap();
        assert_eq!(chained.current_page(), Some(0));

        // Second fetch exhausts the left side; the right side is still
        // unstarted, so there is no page index to report.
        chained.load_more().await.unwrap();
        assert_eq!(chained.current_page(), None);

        chained.load_more().await.unwrap();
        assert_eq!(chained.current_page(), Some(0));

        chained.load_more().await.unwrap();
        assert_eq!(chained.current_page(), None);
        assert!(chained.loaded_all());
    }

    #[tokio::test]
    async fn exhausted_concat_load_more_is_a_no_op() {
        let mut chained = boxed(vec![vec![1]]).concat(boxed(vec![vec![2]]));
        while chained.load_more().await.unwrap().is_some() {}
        assert!(chained.loaded_all());
        assert_eq!(chained.load_more().await.unwrap(), None);
    }
}
