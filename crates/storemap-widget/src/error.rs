use thiserror::Error;

/// Failures reported by the map-rendering collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map could not be created in container {container_id}: {reason}")]
    Create {
        container_id: String,
        reason: String,
    },

    #[error("tile layer {url_template} could not be added: {reason}")]
    TileLayer {
        url_template: String,
        reason: String,
    },
}

/// Best-effort asset loading (icon font) failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("asset {asset} failed to load: {reason}")]
pub struct AssetError {
    pub asset: String,
    pub reason: String,
}
