//! MDBList client: https://mdblist.com/api/

use crate::MetadataError;
use crate::http::get_json;
use crate::models::MdbListItems;
use crate::provider::ListProvider;

const BASE_URL: &str = "https://api.mdblist.com";

#[derive(Clone)]
pub struct MdbListClient {
    base_url: String,
    client: reqwest::Client,
}

impl MdbListClient {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

impl Default for MdbListClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ListProvider for MdbListClient {
    async fn list_items(
        &self,
        list_id: &str,
        api_key: &str,
    ) -> Result<MdbListItems, MetadataError> {
        let url = format!("{}/lists/{list_id}/items", self.base_url);
        get_json(
            &self.client,
            "MDBList",
            &url,
            &[("apikey", api_key), ("append_to_response", "genre,poster")],
        )
        .await
    }
}
