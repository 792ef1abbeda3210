//! Envelope-backed page source.
//!
//! Adapts one paginated remote operation to the application layer's
//! [`PageSource`] port: each `fetch_page` call issues a single envelope
//! call with the page number stamped into `CurrentPage`, extracts the
//! operation's item list and decodes it into domain items.

use crate::mobile::endpoint::Transport;
use crate::mobile::envelope::{RequestEnvelope, call};
use async_trait::async_trait;
use neptun_application::{FetchedPage, PageSource, QueryError};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;

/// One paginated operation bound to a transport, a path, an item key
/// and a request template.
///
/// `D` is the wire record under the item key; `T` the domain item it
/// converts into. The template's `CurrentPage` is overwritten per
/// fetch; everything else is sent as-is on every page.
pub struct EnvelopePageSource<T, D> {
    transport: Arc<dyn Transport>,
    path: String,
    item_key: &'static str,
    template: RequestEnvelope,
    _marker: PhantomData<fn(D) -> T>,
}

impl<T, D> EnvelopePageSource<T, D> {
    pub fn new(
        transport: Arc<dyn Transport>,
        path: impl Into<String>,
        item_key: &'static str,
        template: RequestEnvelope,
    ) -> Self {
        Self {
            transport,
            path: path.into(),
            item_key,
            template,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T, D> PageSource<T> for EnvelopePageSource<T, D>
where
    T: From<D> + Send,
    D: DeserializeOwned + Send + Sync,
{
    async fn fetch_page(&self, page_number: u32) -> Result<FetchedPage<T>, QueryError> {
        let mut envelope = self.template.clone();
        envelope.current_page = page_number;

        let response = call(self.transport.as_ref(), &self.path, &envelope)
            .await
            .map_err(QueryError::from)?;

        let records: Vec<D> = response
            .decode_list(self.item_key)
            .map_err(QueryError::from)?;
        let total = response.total_row_count.max(0) as u64;

        Ok(FetchedPage {
            items: records.into_iter().map(T::from).collect(),
            total,
        })
    }
}
