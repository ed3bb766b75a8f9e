//! Persisted state shared with the selection surface.

use std::{
    collections::BTreeSet,
    error::Error,
    fmt::Display,
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, info};

pub type Selection = BTreeSet<String>;

#[derive(Debug)]
pub enum StoreError {
    Io(PathBuf, io::Error),
    Format(PathBuf, serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(path, e) => write!(f, "{}: {}", path.display(), e),
            Self::Format(path, e) => write!(f, "{} is not a list of groups: {}", path.display(), e),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(_, e) => Some(e),
            Self::Format(_, e) => Some(e),
        }
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::Io(path.to_path_buf(), e)),
    }
}

/// The saved group allowlist, empty when nothing was saved yet.
pub fn load_selection(path: impl AsRef<Path>) -> Result<Selection, StoreError> {
    let path = path.as_ref();
    let Some(content) = read_optional(path)? else {
        debug!("No selection saved at {}", path.display());
        return Ok(Selection::new());
    };

    let groups: Vec<String> =
        serde_json::from_str(&content).map_err(|e| StoreError::Format(path.to_path_buf(), e))?;
    Ok(groups.into_iter().collect())
}

/// Overwrites the saved selection.
pub fn save_selection(path: impl AsRef<Path>, selection: &Selection) -> Result<(), StoreError> {
    let path = path.as_ref();
    let content = serde_json::to_string(&selection.iter().collect::<Vec<_>>())
        .map_err(|e| StoreError::Format(path.to_path_buf(), e))?;
    fs::write(path, content).map_err(|e| StoreError::Io(path.to_path_buf(), e))?;

    info!("Saved {} groups to {}", selection.len(), path.display());
    Ok(())
}

/// Adds `groups` to the saved selection and saves it back.
pub fn add_to_selection<S: AsRef<str>>(
    path: impl AsRef<Path>,
    groups: impl IntoIterator<Item = S>,
) -> Result<Selection, StoreError> {
    let mut selection = load_selection(path.as_ref())?;
    selection.extend(
        groups
            .into_iter()
            .map(|x| x.as_ref().trim().to_owned())
            .filter(|x| !x.is_empty()),
    );
    save_selection(path, &selection)?;
    Ok(selection)
}

/// Removes `groups` from the saved selection and saves it back.
pub fn remove_from_selection<S: AsRef<str>>(
    path: impl AsRef<Path>,
    groups: impl IntoIterator<Item = S>,
) -> Result<Selection, StoreError> {
    let mut selection = load_selection(path.as_ref())?;
    for group in groups {
        selection.remove(group.as_ref().trim());
    }
    save_selection(path, &selection)?;
    Ok(selection)
}

pub fn load_source_url(path: impl AsRef<Path>) -> Result<Option<String>, StoreError> {
    Ok(read_optional(path.as_ref())?
        .map(|x| x.trim().to_owned())
        .filter(|x| !x.is_empty()))
}

pub fn save_source_url(path: impl AsRef<Path>, url: &str) -> Result<(), StoreError> {
    let path = path.as_ref();
    fs::write(path, url).map_err(|e| StoreError::Io(path.to_path_buf(), e))
}
