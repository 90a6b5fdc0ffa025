use crate::docx::Document;
use crate::domain::model::SenderProfile;
use crate::utils::error::{FetchError, Result};
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;

    /// Stores `data` and returns the location it was written to.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Remote template location; `None` selects the built-in template.
    fn template_url(&self) -> Option<&str>;
    fn paid_stamp_url(&self) -> Option<&str>;
    fn signature_url(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;

    fn sender_profile(&self) -> SenderProfile {
        SenderProfile::default()
    }
}

#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn fetch(&self) -> std::result::Result<Document, FetchError>;
}
