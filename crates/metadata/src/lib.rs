//! Upstream gateway: typed clients for TMDB, MDBList, fanart.tv, Cinemeta
//! and the poster existence probe. No business logic lives here.

pub mod fanart;
mod http;
pub mod mdblist;
pub mod models;
pub mod posters;
pub mod provider;
pub mod query;
pub mod ratings;
pub mod tmdb;

use stremeta_core::AddonError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("not found")]
    NotFound,
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<MetadataError> for AddonError {
    fn from(e: MetadataError) -> Self {
        match e {
            MetadataError::NotFound => AddonError::NotFound("upstream resource".to_string()),
            other => AddonError::Upstream(other.to_string()),
        }
    }
}
