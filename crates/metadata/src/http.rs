use serde::de::DeserializeOwned;
use tracing::debug;

use crate::MetadataError;

/// Single GET returning decoded JSON. 404 maps to [`MetadataError::NotFound`],
/// any other non-2xx to [`MetadataError::Provider`].
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    service: &str,
    url: &str,
    params: &[(&str, &str)],
) -> Result<T, MetadataError> {
    debug!(service, url = %url, "upstream request");

    let resp = client
        .get(url)
        .query(params)
        .send()
        .await
        .map_err(|e| MetadataError::Network(e.to_string()))?;

    if resp.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(MetadataError::NotFound);
    }

    if !resp.status().is_success() {
        return Err(MetadataError::Provider(format!(
            "{service} returned {}",
            resp.status()
        )));
    }

    resp.json()
        .await
        .map_err(|e| MetadataError::Decode(format!("{service}: {e}")))
}
