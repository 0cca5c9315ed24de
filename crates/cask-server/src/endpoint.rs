/// HTTP endpoint paths served by Cask.
pub mod endpoints {
    pub const COLLECTIONS: &str = "/api/collections";
    pub const GET: &str = "/api/get";
    pub const SET: &str = "/api/set";
    pub const HEALTH: &str = "/api/health";
}

/// Query parameter names.
pub mod params {
    pub const COLLECTION: &str = "collection";
    pub const KEY: &str = "key";
    pub const CAS: &str = "cas";
}

/// Health check response.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}
