//! File discovery for finding photos in directory trees.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ProcessingConfig;

/// Discovers photo files in directories.
pub struct FileDiscovery {
    config: ProcessingConfig,
}

/// Information about a discovered file.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Full path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    /// Discover all supported photos under `root`.
    ///
    /// If `root` is a file, returns it if supported. Directories are walked
    /// recursively, skipping `exclude` (normally the output directory) so a
    /// second run does not pick up the first run's results. An `exclude`
    /// equal to `root` itself is an in-place run and prunes nothing.
    pub fn discover(&self, root: &Path, exclude: Option<&Path>) -> Vec<DiscoveredFile> {
        if root.is_file() {
            if self.is_supported(root) {
                if let Ok(meta) = std::fs::metadata(root) {
                    return vec![DiscoveredFile {
                        path: root.to_path_buf(),
                        size: meta.len(),
                    }];
                }
            }
            return vec![];
        }

        let excluded = exclude.map(|p| p.canonicalize().unwrap_or_else(|_| p.to_path_buf()));

        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| match &excluded {
                Some(ex) if entry.depth() > 0 && entry.file_type().is_dir() => {
                    let path = entry.path();
                    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
                    &canonical != ex
                }
                _ => true,
            });

        for entry in walker.filter_map(|e| e.ok()) {
            let entry_path = entry.path();
            if entry_path.is_file() && self.is_supported(entry_path) {
                if let Ok(meta) = entry.metadata() {
                    files.push(DiscoveredFile {
                        path: entry_path.to_path_buf(),
                        size: meta.len(),
                    });
                }
            }
        }

        // Sort by path for deterministic ordering
        files.sort_by(|a, b| a.path.cmp(&b.path));
        files
    }

    /// Check if a file has a supported extension (case-insensitive).
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.config
                    .supported_formats
                    .iter()
                    .any(|fmt| fmt.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    /// Get total size of all discovered files.
    pub fn total_size(files: &[DiscoveredFile]) -> u64 {
        files.iter().map(|f| f.size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, b"\xFF\xD8\xFF").unwrap();
    }

    #[test]
    fn test_is_supported() {
        let discovery = FileDiscovery::new(ProcessingConfig::default());

        assert!(discovery.is_supported(Path::new("test.jpg")));
        assert!(discovery.is_supported(Path::new("test.JPG")));
        assert!(discovery.is_supported(Path::new("test.jpeg")));
        assert!(discovery.is_supported(Path::new("IMG_0001.JpEg")));
        assert!(!discovery.is_supported(Path::new("test.png")));
        assert!(!discovery.is_supported(Path::new("test.txt")));
        assert!(!discovery.is_supported(Path::new("jpg")));
    }

    #[test]
    fn test_discover_walks_tree_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.jpg"));
        touch(&dir.path().join("nested/deeper/a.JPEG"));
        touch(&dir.path().join("notes.txt"));

        let discovery = FileDiscovery::new(ProcessingConfig::default());
        let files = discovery.discover(dir.path(), None);
        let names: Vec<_> = files
            .iter()
            .map(|f| f.path.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![PathBuf::from("b.jpg"), PathBuf::from("nested/deeper/a.JPEG")]
        );
        assert_eq!(FileDiscovery::total_size(&files), 6);
    }

    #[test]
    fn test_discover_skips_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.jpg"));
        touch(&dir.path().join("out/a.jpg"));

        let discovery = FileDiscovery::new(ProcessingConfig::default());
        let out = dir.path().join("out");
        let files = discovery.discover(dir.path(), Some(&out));
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, dir.path().join("a.jpg"));
    }

    #[test]
    fn test_discover_output_dir_equal_to_root() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.jpg"));
        touch(&dir.path().join("b.jpg"));
        touch(&dir.path().join("nested/c.jpg"));

        let discovery = FileDiscovery::new(ProcessingConfig::default());
        let files = discovery.discover(dir.path(), Some(dir.path()));
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_discover_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("single.jpg");
        touch(&photo);

        let discovery = FileDiscovery::new(ProcessingConfig::default());
        assert_eq!(discovery.discover(&photo, None).len(), 1);
        assert!(discovery
            .discover(&dir.path().join("missing.jpg"), None)
            .is_empty());
    }
}
