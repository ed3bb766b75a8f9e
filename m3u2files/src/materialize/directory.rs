use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{info, warn};
use playlist_rs::format::Entry;

use crate::{
    materialize::{
        FolderNaming, MaterializeError, Report, TreeSink, check_component, materialize,
    },
    something_with_error_log,
};

/// Real directories and files below `root`.
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    /// Creates `root` if needed.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, MaterializeError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| MaterializeError::TargetUnavailable(root.clone(), e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TreeSink for DirectorySink {
    fn ensure_container(&mut self, container: &str) -> io::Result<()> {
        fs::create_dir_all(self.root.join(container))
    }

    fn write_leaf(&mut self, container: &str, leaf: &str, content: &str) -> io::Result<()> {
        fs::write(self.root.join(container).join(leaf), content.as_bytes())
    }
}

pub fn materialize_to_directory<'a>(
    entries: impl IntoIterator<Item = &'a Entry>,
    dir: impl Into<PathBuf>,
    naming: FolderNaming,
) -> Result<Report, MaterializeError> {
    let mut sink = DirectorySink::create(dir)?;
    info!("Materializing into directory {}", sink.root().display());
    Ok(materialize(entries, &mut sink, naming))
}

/// Removes everything inside `dir` but keeps `dir` itself.
///
/// Returns the number of removed children, or `None` when `dir` does not exist.
pub fn clear_directory(dir: impl AsRef<Path>) -> Result<Option<usize>, MaterializeError> {
    let dir = dir.as_ref();
    let unavailable = |e| MaterializeError::TargetUnavailable(dir.to_path_buf(), e);

    if !dir.exists() {
        info!("{} does not exist, nothing to clear", dir.display());
        return Ok(None);
    }

    let mut removed = 0;
    for item in fs::read_dir(dir).map_err(unavailable)? {
        let path = item.map_err(unavailable)?.path();
        if path.is_dir() {
            fs::remove_dir_all(&path).map_err(unavailable)?;
        } else {
            fs::remove_file(&path).map_err(unavailable)?;
        }
        removed += 1;
    }

    info!("Cleared {} items from {}", removed, dir.display());
    Ok(Some(removed))
}

/// Creates one folder per show title below `dir`. Titles that end up empty
/// after naming or that cannot be created are logged and passed over.
///
/// Returns the number of folders that exist afterwards.
pub fn create_show_folders<'a>(
    titles: impl IntoIterator<Item = &'a String>,
    dir: impl Into<PathBuf>,
    naming: FolderNaming,
) -> Result<usize, MaterializeError> {
    let mut sink = DirectorySink::create(dir)?;
    let mut created = 0;

    for title in titles {
        let folder = naming.apply(title);
        if let Err(reason) = check_component("folder", &folder) {
            warn!("Skipping title \"{}\": {}", title, reason);
            continue;
        }

        if sink
            .ensure_container(&folder)
            .map_err(something_with_error_log!(format!("Create folder {}", folder), ()))
            .is_ok()
        {
            created += 1;
        }
    }

    info!(
        "Created folders for {} titles in {}",
        created,
        sink.root().display()
    );
    Ok(created)
}
