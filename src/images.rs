use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// One browsable image: the original path plus the rendered bitmap, if any.
/// A transient bitmap belongs to this session and is removed when the item
/// is dropped at teardown.
#[derive(Debug)]
pub struct Item {
    pub original: PathBuf,
    pub bitmap: Option<PathBuf>,
    pub transient: bool,
}

impl Item {
    pub fn new(original: PathBuf) -> Self {
        Self {
            original,
            bitmap: None,
            transient: false,
        }
    }
}

impl Drop for Item {
    fn drop(&mut self) {
        if self.transient {
            if let Some(path) = &self.bitmap {
                let _ = fs::remove_file(path);
            }
        }
    }
}

/// Builds the item sequence: a single directory argument is listed
/// (regular files only, hidden names skipped, name-sorted); anything else
/// is treated as explicit file paths in argument order.
pub fn collect_items(paths: &[PathBuf]) -> Result<Vec<Item>> {
    if paths.len() == 1 && paths[0].is_dir() {
        return list_directory(&paths[0]);
    }
    Ok(paths.iter().cloned().map(Item::new).collect())
}

fn list_directory(dir: &Path) -> Result<Vec<Item>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("could not read directory {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files.into_iter().map(Item::new).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn directory_listing_skips_hidden_and_subdirs() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("b.png")).unwrap();
        File::create(dir.path().join("a.png")).unwrap();
        File::create(dir.path().join(".hidden.png")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let items = collect_items(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = items
            .iter()
            .map(|i| i.original.file_name().unwrap().to_owned())
            .collect();
        assert_eq!(names, ["a.png", "b.png"]);
    }

    #[test]
    fn explicit_paths_keep_argument_order() {
        let paths = [PathBuf::from("z.png"), PathBuf::from("a.png")];
        let items = collect_items(&paths).unwrap();
        assert_eq!(items[0].original, Path::new("z.png"));
        assert_eq!(items[1].original, Path::new("a.png"));
    }

    #[test]
    fn vanished_directory_falls_through_to_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nope");
        // Not `is_dir` anymore, so it is treated as an explicit file path;
        // only a directory that fails mid-read is an error.
        let items = collect_items(&[gone.clone()]).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].original, gone);
    }

    #[test]
    fn empty_directory_yields_no_items() {
        let dir = tempfile::tempdir().unwrap();
        let items = collect_items(&[dir.path().to_path_buf()]).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn dropping_a_transient_item_removes_its_bitmap() {
        let dir = tempfile::tempdir().unwrap();
        let thumb = dir.path().join("thumb.png");
        File::create(&thumb).unwrap();
        {
            let mut item = Item::new(PathBuf::from("orig.png"));
            item.bitmap = Some(thumb.clone());
            item.transient = true;
        }
        assert!(!thumb.exists());
    }

    #[test]
    fn dropping_a_non_transient_item_keeps_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let thumb = dir.path().join("keep.png");
        File::create(&thumb).unwrap();
        {
            let mut item = Item::new(PathBuf::from("orig.png"));
            item.bitmap = Some(thumb.clone());
        }
        assert!(thumb.exists());
    }
}
