/*
[INPUT]:  Picture folder path and file extension
[OUTPUT]: Sorted list of decoy picture files
[POS]:    Media layer - picture frame enumeration
[UPDATE]: When picture selection rules change
*/

use std::io;
use std::path::{Path, PathBuf};

/// List files in `folder` whose extension equals `extension` (without dot), sorted by name.
pub fn list_pictures(folder: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let wanted = extension.trim_start_matches('.');
    let mut pictures = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) == Some(wanted) {
            pictures.push(path);
        }
    }
    pictures.sort();
    Ok(pictures)
}
