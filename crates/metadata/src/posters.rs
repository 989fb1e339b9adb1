use tracing::debug;

use crate::MetadataError;
use crate::provider::ImageProbe;

/// Probes image URLs with a HEAD request.
#[derive(Clone, Default)]
pub struct HttpImageProbe {
    client: reqwest::Client,
}

impl HttpImageProbe {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ImageProbe for HttpImageProbe {
    async fn exists(&self, url: &str) -> Result<bool, MetadataError> {
        let resp = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;
        debug!(status = %resp.status(), "image probe");
        Ok(resp.status().is_success())
    }
}
