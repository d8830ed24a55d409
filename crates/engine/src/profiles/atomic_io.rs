use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Writes via a sibling temp file and a rename, so a crash mid-write never
/// leaves a truncated file at the final path.
pub(crate) fn write_text_atomic(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let staging = staging_path_for(path);
    fs::write(&staging, text)?;
    promote(&staging, path)
}

fn promote(staging: &Path, final_path: &Path) -> io::Result<()> {
    match fs::remove_file(final_path) {
        Ok(()) => {}
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => {
            let _ = fs::remove_file(staging);
            return Err(error);
        }
    }

    fs::rename(staging, final_path).map_err(|error| {
        let _ = fs::remove_file(staging);
        error
    })
}

fn staging_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("record");
    match path.parent() {
        Some(parent) => parent.join(format!("{name}.new")),
        None => PathBuf::from(format!("{name}.new")),
    }
}
