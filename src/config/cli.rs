use crate::domain::ports::BanSource;
use crate::utils::error::Result;
use std::path::PathBuf;

/// Reads ban exports from the local filesystem, relative to `base_path`.
#[derive(Debug, Clone)]
pub struct LocalBanSource {
    base_path: PathBuf,
}

impl LocalBanSource {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Default for LocalBanSource {
    fn default() -> Self {
        Self::new(".")
    }
}

impl BanSource for LocalBanSource {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        // 絕對路徑時 join 會直接取代 base_path
        let full_path = self.base_path.join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ImportError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_relative_and_absolute_paths() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("bans.json"), b"[]").unwrap();

        let source = LocalBanSource::new(temp_dir.path());
        assert_eq!(source.read_file("bans.json").await.unwrap(), b"[]");

        let absolute = temp_dir.path().join("bans.json");
        let source = LocalBanSource::default();
        assert_eq!(
            source.read_file(absolute.to_str().unwrap()).await.unwrap(),
            b"[]"
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let source = LocalBanSource::new(temp_dir.path());
        assert!(matches!(
            source.read_file("missing.json").await,
            Err(ImportError::IoError(_))
        ));
    }
}
