pub mod http;

use async_trait::async_trait;

use crate::app::Result;

pub use http::HttpTransport;

/// Blocking-style page transport, one request at a time.
///
/// Implementations attach the fixed identifying user agent and fail on any
/// non-200 response. Retry policy is the caller's concern.
#[async_trait]
pub trait Transport {
    async fn get(&self, url: &str) -> Result<String>;
    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String>;
}
