use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuggestResponse {
    pub word: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ProxyQuery {
    /// Image URL on the trusted blob host
    pub url: String,
}
