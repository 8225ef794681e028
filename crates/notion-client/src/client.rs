//! # Notion Client
//!
//! One method per remote operation. Each method validates its arguments, sends a
//! single request through the configured [`NotionTransport`] and decodes the
//! response. Operations whose response shape is open-ended (database queries and
//! block operations) return the raw JSON.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::NotionClientConfig;
use crate::conversions::{decode_database, decode_database_list, decode_page, decode_search_results};
use crate::error::NotionResult;
use crate::identifier::{normalize_id, NotionId};
use crate::models::{Database, Page, SearchResults};
use crate::requests::{
    list_databases_request, BlockAppend, BlockChildrenQuery, BlockUpdate, DatabaseQuery,
    DatabaseUpdate, NewDatabase, NewPage, PageUpdate, SearchQuery,
};
use crate::transport::{ApiRequest, HttpTransport, NotionTransport};

/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct NotionClient {
    transport: Arc<dyn NotionTransport>,
}

impl NotionClient {
    /// Build a client backed by the HTTP transport.
    pub fn new(config: &NotionClientConfig) -> NotionResult<Self> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }

    pub fn with_transport(transport: Arc<dyn NotionTransport>) -> Self {
        Self { transport }
    }

    async fn send(&self, request: ApiRequest) -> NotionResult<Value> {
        self.transport.execute(request).await
    }

    // =========================================================================
    // Database Operations
    // =========================================================================

    /// Databases shared with the integration, most recently edited first.
    #[instrument(skip(self))]
    pub async fn list_databases(&self) -> NotionResult<Vec<Database>> {
        let raw = self.send(list_databases_request()).await?;
        let databases = decode_database_list(&raw)?;
        debug!(count = databases.len(), "Listed databases");
        Ok(databases)
    }

    #[instrument(skip(self, query), fields(database_id = %normalize_id(&query.database_id)))]
    pub async fn query_database(&self, query: &DatabaseQuery) -> NotionResult<Value> {
        self.send(query.to_request()?).await
    }

    #[instrument(skip(self, database), fields(parent_page_id = %normalize_id(&database.parent_page_id)))]
    pub async fn create_database(&self, database: &NewDatabase) -> NotionResult<Database> {
        let raw = self.send(database.to_request()?).await?;
        let created = decode_database(&raw)?;
        info!(database_id = %created.id, title = %created.title_text(), "Created database");
        Ok(created)
    }

    #[instrument(skip(self, update), fields(database_id = %normalize_id(&update.database_id)))]
    pub async fn update_database(&self, update: &DatabaseUpdate) -> NotionResult<Database> {
        let raw = self.send(update.to_request()?).await?;
        decode_database(&raw)
    }

    // =========================================================================
    // Page Operations
    // =========================================================================

    #[instrument(skip(self, page), fields(database_id = %normalize_id(&page.database_id)))]
    pub async fn create_page(&self, page: &NewPage) -> NotionResult<Page> {
        let raw = self.send(page.to_request()?).await?;
        let created = decode_page(&raw)?;
        info!(
            page_id = %created.id,
            title = created.title().as_deref().unwrap_or_default(),
            "Created page"
        );
        Ok(created)
    }

    #[instrument(skip(self, update), fields(page_id = %normalize_id(&update.page_id)))]
    pub async fn update_page(&self, update: &PageUpdate) -> NotionResult<Page> {
        let raw = self.send(update.to_request()?).await?;
        decode_page(&raw)
    }

    #[instrument(skip(self), fields(page_id = %normalize_id(page_id)))]
    pub async fn get_page(&self, page_id: &str) -> NotionResult<Page> {
        let id = NotionId::parse(page_id, "page_id")?;
        let raw = self.send(ApiRequest::get(format!("/pages/{id}"))).await?;
        decode_page(&raw)
    }

    // =========================================================================
    // Block Operations
    // =========================================================================

    /// One page of a block's children (a page id works as a block id).
    #[instrument(skip(self), fields(block_id = %normalize_id(block_id)))]
    pub async fn list_block_children(
        &self,
        block_id: &str,
        start_cursor: Option<&str>,
        page_size: Option<u32>,
    ) -> NotionResult<Value> {
        let query = BlockChildrenQuery {
            block_id: block_id.to_string(),
            start_cursor: start_cursor.map(str::to_string),
            page_size,
        };
        self.send(query.to_request()?).await
    }

    #[instrument(skip(self, append), fields(block_id = %normalize_id(&append.block_id)))]
    pub async fn append_block_children(&self, append: &BlockAppend) -> NotionResult<Value> {
        let request = append.to_request()?;
        info!(
            children = append.children.len(),
            after = append.after.as_deref().unwrap_or(""),
            "Appending blocks"
        );
        self.send(request).await
    }

    #[instrument(skip(self, update), fields(block_id = %normalize_id(&update.block_id)))]
    pub async fn update_block(&self, update: &BlockUpdate) -> NotionResult<Value> {
        let request = update.to_request()?;
        info!(block_type = %update.block_type, "Updating block");
        self.send(request).await
    }

    #[instrument(skip(self), fields(block_id = %normalize_id(block_id)))]
    pub async fn get_block(&self, block_id: &str) -> NotionResult<Value> {
        let id = NotionId::parse(block_id, "block_id")?;
        self.send(ApiRequest::get(format!("/blocks/{id}"))).await
    }

    // =========================================================================
    // Search
    // =========================================================================

    #[instrument(skip(self, query), fields(query = %query.query))]
    pub async fn search(&self, query: &SearchQuery) -> NotionResult<SearchResults> {
        let raw = self.send(query.to_request()?).await?;
        let results = decode_search_results(&raw)?;
        debug!(
            count = results.results.len(),
            has_more = results.has_more,
            "Search completed"
        );
        Ok(results)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use crate::error::{NotionError, NotionResult};
    use crate::transport::{ApiRequest, NotionTransport};

    /// In-memory transport that records requests and replays queued responses.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingTransport {
        requests: Mutex<Vec<ApiRequest>>,
        responses: Mutex<VecDeque<NotionResult<Value>>>,
    }

    impl RecordingTransport {
        pub(crate) fn respond(&self, response: NotionResult<Value>) {
            self.responses.lock().unwrap().push_back(response);
        }

        pub(crate) fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotionTransport for RecordingTransport {
        async fn execute(&self, request: ApiRequest) -> NotionResult<Value> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(NotionError::remote(500, "no response queued")))
        }
    }
}
