use crate::domain::models::{LaneMoveRequest, QuickView, SearchPayload};
use crate::domain::page::PageDocument;
use crate::error::Result;
use async_trait::async_trait;

/// Boundary to the operations console server.
///
/// Every call is scoped to the tenant the implementation was built for.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConsoleApi: Send + Sync {
    /// `GET /search?tenant_id=..&q=..`
    async fn search(&self, query: &str) -> Result<SearchPayload>;

    /// `GET /clients/{id}/quickview?tenant_id=..`
    async fn quick_view(&self, client_id: &str) -> Result<QuickView>;

    /// Form-encoded `POST {endpoint}?tenant_id=..` with one field.
    async fn move_card(&self, request: &LaneMoveRequest) -> Result<()>;

    /// Fetches and parses the page at `location`.
    async fn fetch_page(&self, location: &str) -> Result<PageDocument>;
}
