pub mod config;
pub mod error;
pub mod stremio;
pub mod telemetry;
pub mod types;

pub use config::{CatalogChoice, UserConfig};
pub use error::AddonError;
pub use types::{AgeRating, MediaType};
