use crate::domain::model::{Credentials, HeaderOrder, Library, LoadOutcome, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    /// Writes `data` to `path` atomically and returns the final location.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn credentials(&self) -> &Credentials;
    fn api_base(&self) -> &str;
    fn header_order(&self) -> HeaderOrder;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Library>;
    async fn transform(&self, library: Library) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<LoadOutcome>;
}
