//! Annotation folder access.
//!
//! Lists the well-formed XML files of a folder and reads one file into a
//! [`Record`] keyed by its file name without the extension. Inserting the
//! record is left to the [`Session`](crate::session::Session).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::AnnocatError;
use crate::record::io_voc_xml::{is_well_formed, read_record_file};
use crate::record::Record;

/// Make `dir` absolute against the current working directory.
pub fn resolve_dir(dir: &Path) -> Result<PathBuf, AnnocatError> {
    if dir.is_absolute() {
        Ok(dir.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(dir))
    }
}

/// Catalog key for a file name: the name without its final extension.
///
/// `shapes_01.xml` becomes `shapes_01`; a name without an extension is
/// returned unchanged.
pub fn record_key(file: &str) -> String {
    Path::new(file)
        .with_extension("")
        .to_string_lossy()
        .into_owned()
}

/// Names of the regular files directly inside `dir` that hold well-formed XML.
///
/// Files that cannot be read as UTF-8 text or do not parse as XML are skipped
/// with a warning. Names are sorted.
pub fn list_xml_files(dir: &Path) -> Result<Vec<String>, AnnocatError> {
    let dir = resolve_dir(dir)?;
    check_dir(&dir)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(&dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                warn!(dir = %dir.display(), %source, "failed while listing directory entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(source) => {
                warn!(path = %path.display(), %source, "error while reading file");
                continue;
            }
        };

        if !is_well_formed(&content) {
            warn!(path = %path.display(), "wrong xml syntax, skipping");
            continue;
        }

        files.push(entry.file_name().to_string_lossy().into_owned());
    }

    debug!(dir = %dir.display(), files = files.len(), "listed xml files");
    Ok(files)
}

/// Read `dir/file` and build a record keyed by [`record_key`].
pub fn load_record(dir: &Path, file: &str) -> Result<Record, AnnocatError> {
    let dir = resolve_dir(dir)?;
    let path = dir.join(file);
    let key = record_key(file);
    debug!(key = %key, path = %path.display(), "loading record");
    read_record_file(&key, &path)
}

fn check_dir(dir: &Path) -> Result<(), AnnocatError> {
    if !dir.exists() {
        return Err(AnnocatError::NotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(AnnocatError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    Ok(())
}
