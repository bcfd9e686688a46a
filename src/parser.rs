use std::fs::File;
use std::io::{BufReader, Read};
use anyhow::{Result, Context};
use brotli::Decompressor;
use crate::model::{CategoryTree, Snapshot};
use crate::traits::SnapshotSource;

/// Snapshot source backed by a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: String,
}

impl FileSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl SnapshotSource for FileSource {
    fn describe(&self) -> String {
        self.path.clone()
    }

    fn load(&self) -> Result<CategoryTree> {
        parse_snapshot(&self.path)
    }
}

/// Reads a snapshot document from disk.
///
/// Files ending in `.br` are Brotli-decompressed transparently.
pub fn read_snapshot(file_path: &str) -> Result<Snapshot> {
    let file = File::open(file_path)
        .with_context(|| format!("Failed to open file: {}", file_path))?;

    let reader: Box<dyn Read> = if file_path.ends_with(".br") {
        Box::new(Decompressor::new(file, 4096))
    } else {
        Box::new(BufReader::new(file))
    };

    let snapshot: Snapshot = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse snapshot JSON: {}", file_path))?;

    tracing::debug!(
        "read snapshot {} ({} levels, {} errors)",
        file_path,
        snapshot.levels.len(),
        snapshot.errors.len()
    );
    Ok(snapshot)
}

/// Parses a snapshot file into a category tree.
///
/// # Examples
///
/// ```no_run
/// # use catlist::parse_snapshot;
/// # fn main() -> anyhow::Result<()> {
/// let tree = parse_snapshot("categories.json")?;
///
/// // Compressed snapshot (automatic decompression)
/// let tree = parse_snapshot("categories.json.br")?;
/// # Ok(())
/// # }
/// ```
pub fn parse_snapshot(file_path: &str) -> Result<CategoryTree> {
    let snapshot = read_snapshot(file_path)?;
    let tree = CategoryTree::from_snapshot(&snapshot)
        .with_context(|| format!("Invalid snapshot: {}", file_path))?;
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use crate::traits::DataView;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("catlist-parser-{}-{}", std::process::id(), name))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_parse_plain_json() -> Result<()> {
        let path = temp_path("plain.json");
        let mut file = File::create(&path)?;
        write!(
            file,
            r#"{{"levels":["Fruit"],"root":{{"children":[{{"label":"apple","rows":3}},{{"label":"pear","rows":2,"marked":2}}]}}}}"#
        )?;
        drop(file);

        let tree = FileSource::new(path.clone()).load()?;
        assert_eq!(DataView::row_count(&tree), 5);
        assert_eq!(tree.marked_rows(), 2);
        assert!(tree.errors().is_empty());

        std::fs::remove_file(&path)?;
        Ok(())
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = parse_snapshot("/nonexistent/catlist.json").unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/catlist.json"));
    }

    #[test]
    fn test_invalid_json_is_an_error() -> Result<()> {
        let path = temp_path("broken.json");
        std::fs::write(&path, "{ not json")?;
        assert!(parse_snapshot(&path).is_err());
        std::fs::remove_file(&path)?;
        Ok(())
    }
}
