use std::env;
use std::path::PathBuf;

/// Default allow-list of PCB extensions (lowercase, without the leading dot)
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["kicad_pcb", "pcb"];

/// Staging configuration, built once at startup and handed to the service
#[derive(Debug, Clone)]
pub struct StagingConfig {
    /// Directory holding the current staged PCB (default: "pcb_files")
    pub staging_dir: PathBuf,

    /// Fixed base name of the staged file (default: "current_pcb")
    pub staged_base_name: String,

    /// Accepted extensions, lowercase and without the leading dot
    pub allowed_extensions: Vec<String>,

    /// Maximum JSON request body in bytes (default: 64 KB)
    pub max_request_body: usize,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            staging_dir: PathBuf::from("pcb_files"),
            staged_base_name: "current_pcb".to_string(),
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            max_request_body: 64 * 1024, // 64 KB
        }
    }
}

impl StagingConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        Self {
            staging_dir: lookup("PCB_STAGING_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(default.staging_dir),

            staged_base_name: lookup("PCB_STAGED_BASE_NAME")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty() && !v.contains(['/', '\\']))
                .unwrap_or(default.staged_base_name),

            allowed_extensions: lookup("PCB_ALLOWED_EXTENSIONS")
                .map(|v| parse_extensions(&v))
                .filter(|list| !list.is_empty())
                .unwrap_or(default.allowed_extensions),

            max_request_body: lookup("MAX_REQUEST_BODY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_request_body),
        }
    }

    pub fn with_staging_dir(mut self, staging_dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = staging_dir.into();
        self
    }

    /// Case-insensitive membership test; accepts the extension with or without its dot
    pub fn is_allowed_extension(&self, extension: &str) -> bool {
        let normalized = extension.trim_start_matches('.').to_lowercase();
        !normalized.is_empty() && self.allowed_extensions.iter().any(|e| *e == normalized)
    }
}

/// Parses a comma separated extension list such as ".kicad_pcb, PCB"
pub fn parse_extensions(raw: &str) -> Vec<String> {
    let mut extensions: Vec<String> = Vec::new();
    for item in raw.split(',') {
        let ext = item.trim().trim_start_matches('.').to_lowercase();
        if !ext.is_empty() && !extensions.contains(&ext) {
            extensions.push(ext);
        }
    }
    extensions
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = StagingConfig::default();
        assert_eq!(config.staging_dir, PathBuf::from("pcb_files"));
        assert_eq!(config.staged_base_name, "current_pcb");
        assert_eq!(config.allowed_extensions, vec!["kicad_pcb", "pcb"]);
        assert_eq!(config.max_request_body, 64 * 1024);
    }

    #[test]
    fn test_lookup_overrides() {
        let config = StagingConfig::from_lookup(lookup_from(&[
            ("PCB_STAGING_DIR", "/var/tmp/boards"),
            ("PCB_STAGED_BASE_NAME", "active_board"),
            ("PCB_ALLOWED_EXTENSIONS", ".KiCad_PCB, brd"),
            ("MAX_REQUEST_BODY", "4096"),
        ]));
        assert_eq!(config.staging_dir, PathBuf::from("/var/tmp/boards"));
        assert_eq!(config.staged_base_name, "active_board");
        assert_eq!(config.allowed_extensions, vec!["kicad_pcb", "brd"]);
        assert_eq!(config.max_request_body, 4096);
    }

    #[test]
    fn test_lookup_rejects_garbage() {
        let config = StagingConfig::from_lookup(lookup_from(&[
            ("PCB_STAGING_DIR", "  "),
            ("PCB_STAGED_BASE_NAME", "../escape"),
            ("PCB_ALLOWED_EXTENSIONS", " , ."),
            ("MAX_REQUEST_BODY", "lots"),
        ]));
        let default = StagingConfig::default();
        assert_eq!(config.staging_dir, default.staging_dir);
        assert_eq!(config.staged_base_name, default.staged_base_name);
        assert_eq!(config.allowed_extensions, default.allowed_extensions);
        assert_eq!(config.max_request_body, default.max_request_body);
    }

    #[test]
    fn test_is_allowed_extension() {
        let config = StagingConfig::default();
        assert!(config.is_allowed_extension(".kicad_pcb"));
        assert!(config.is_allowed_extension("PCB"));
        assert!(config.is_allowed_extension(".KiCad_Pcb"));
        assert!(!config.is_allowed_extension(".txt"));
        assert!(!config.is_allowed_extension(""));
        assert!(!config.is_allowed_extension("."));
    }
}
