use crate::config::StagingConfig;
use serde::Serialize;
use std::path::{Component, Path};
use utoipa::ToSchema;

/// Details reported for a path that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PcbFileInfo {
    /// Final path component, e.g. "board.kicad_pcb"
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Suffix including the leading dot, in its original case
    pub extension: String,
}

/// Returns the last suffix of `path` with its leading dot (".kicad_pcb"),
/// or `None` for dotfiles, extensionless names and non UTF-8 suffixes.
pub fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{}", e))
}

/// Inspects a caller-supplied path and returns its details when it names an
/// existing regular file with an allowed extension.
///
/// Fail-closed: empty input, bad syntax, missing files, permission errors and
/// any other I/O failure all yield `None`.
pub async fn inspect_pcb_path(file_path: &str, config: &StagingConfig) -> Option<PcbFileInfo> {
    if file_path.is_empty() {
        return None;
    }

    let path = Path::new(file_path);
    let extension = dotted_extension(path).filter(|ext| config.is_allowed_extension(ext))?;

    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) => {
            tracing::debug!("Path check failed for {:?}: {}", file_path, e);
            return None;
        }
    };

    if !metadata.is_file() {
        return None;
    }

    let name = path.file_name()?.to_string_lossy().into_owned();

    Some(PcbFileInfo {
        name,
        size: metadata.len(),
        extension,
    })
}

/// True when `name` is a single plain file name that cannot resolve outside
/// the directory it is joined onto.
pub fn is_plain_file_name(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\', '\0']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, len: usize) -> String {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&vec![b'x'; len]).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_dotted_extension() {
        assert_eq!(
            dotted_extension(Path::new("/boards/board.kicad_pcb")).as_deref(),
            Some(".kicad_pcb")
        );
        assert_eq!(
            dotted_extension(Path::new("archive.tar.PCB")).as_deref(),
            Some(".PCB")
        );
        assert_eq!(dotted_extension(Path::new(".pcb")), None);
        assert_eq!(dotted_extension(Path::new("Makefile")), None);
        assert_eq!(dotted_extension(Path::new("")), None);
    }

    #[test]
    fn test_is_plain_file_name() {
        assert!(is_plain_file_name("current_pcb.kicad_pcb"));
        assert!(is_plain_file_name("weird name.pcb"));
        assert!(!is_plain_file_name(""));
        assert!(!is_plain_file_name("."));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name("../secrets.pcb"));
        assert!(!is_plain_file_name("nested/file.pcb"));
        assert!(!is_plain_file_name("..\\file.pcb"));
        assert!(!is_plain_file_name("/etc/passwd"));
    }

    #[tokio::test]
    async fn test_inspect_reports_actual_size() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "board.kicad_pcb", 1234);
        let config = StagingConfig::default();

        let info = inspect_pcb_path(&path, &config).await.unwrap();
        assert_eq!(info.name, "board.kicad_pcb");
        assert_eq!(info.size, 1234);
        assert_eq!(info.extension, ".kicad_pcb");
    }

    #[tokio::test]
    async fn test_inspect_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "LEGACY.PCB", 10);
        let config = StagingConfig::default();

        let info = inspect_pcb_path(&path, &config).await.unwrap();
        assert_eq!(info.extension, ".PCB");
        assert_eq!(info.size, 10);
    }

    #[tokio::test]
    async fn test_inspect_rejects_invalid_targets() {
        let dir = TempDir::new().unwrap();
        let config = StagingConfig::default();
        let txt = write_file(&dir, "notes.txt", 4);
        let missing = dir.path().join("missing.kicad_pcb");
        let as_dir = dir.path().join("folder.kicad_pcb");
        std::fs::create_dir(&as_dir).unwrap();

        assert!(inspect_pcb_path("", &config).await.is_none());
        assert!(inspect_pcb_path(&txt, &config).await.is_none());
        assert!(
            inspect_pcb_path(&missing.to_string_lossy(), &config)
                .await
                .is_none()
        );
        assert!(
            inspect_pcb_path(&as_dir.to_string_lossy(), &config)
                .await
                .is_none()
        );
        assert!(inspect_pcb_path("bad\0path.pcb", &config).await.is_none());
    }

    #[tokio::test]
    async fn test_inspect_wrong_extension_even_if_missing() {
        let config = StagingConfig::default();
        assert!(
            inspect_pcb_path("/definitely/not/here.txt", &config)
                .await
                .is_none()
        );
    }
}
