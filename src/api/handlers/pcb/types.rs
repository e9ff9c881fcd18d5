use crate::utils::validation::PcbFileInfo;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body shared by the load and validate endpoints. A missing or null
/// `file_path` is treated as empty.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PcbPathRequest {
    #[serde(default)]
    pub file_path: Option<String>,
}

impl PcbPathRequest {
    pub fn path(&self) -> &str {
        self.file_path.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoadPcbResponse {
    pub success: bool,
    pub filename: String,
    pub original_path: String,
    pub url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidatePathResponse {
    pub valid: bool,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_info: Option<PcbFileInfo>,
}
