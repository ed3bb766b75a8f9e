use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::{self, Write},
    path::PathBuf,
};

use log::info;
use playlist_rs::format::Entry;
use smol_str::SmolStr;
use zip::{CompressionMethod, ZipWriter, result::ZipResult, write::SimpleFileOptions};

use crate::materialize::{FolderNaming, MaterializeError, Report, TreeSink, materialize};

/// A single zip file holding `{container}/{leaf}` entries.
///
/// Leaves are staged in memory and written on [`ArchiveSink::finish`], which
/// lets a later leaf of the same name replace an earlier one.
pub struct ArchiveSink {
    path: PathBuf,
    file: File,
    containers: Vec<String>,
    known_containers: HashSet<String>,
    leaves: Vec<(String, SmolStr)>,
    leaf_index: HashMap<String, usize>,
}

impl ArchiveSink {
    /// Creates or truncates the archive file.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, MaterializeError> {
        let path = path.into();
        let file =
            File::create(&path).map_err(|e| MaterializeError::TargetUnavailable(path.clone(), e))?;

        Ok(Self {
            path,
            file,
            containers: Vec::new(),
            known_containers: HashSet::new(),
            leaves: Vec::new(),
            leaf_index: HashMap::new(),
        })
    }

    fn write_archive(self) -> ZipResult<()> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut writer = ZipWriter::new(self.file);

        for container in self.containers {
            writer.add_directory(format!("{}/", container), options)?;
        }

        for (path, content) in self.leaves {
            writer.start_file(path, options)?;
            writer.write_all(content.as_bytes())?;
        }

        writer.finish()?;
        Ok(())
    }

    /// Writes the staged tree and closes the archive.
    pub fn finish(self) -> Result<(), MaterializeError> {
        let path = self.path.clone();
        let count = self.leaves.len();
        self.write_archive()
            .map_err(|e| MaterializeError::Archive(path.clone(), e))?;

        info!("Wrote {} leaves to {}", count, path.display());
        Ok(())
    }
}

impl TreeSink for ArchiveSink {
    fn ensure_container(&mut self, container: &str) -> io::Result<()> {
        if self.known_containers.insert(container.to_owned()) {
            self.containers.push(container.to_owned());
        }
        Ok(())
    }

    fn write_leaf(&mut self, container: &str, leaf: &str, content: &str) -> io::Result<()> {
        let path = format!("{}/{}", container, leaf);
        match self.leaf_index.get(&path) {
            Some(&index) => self.leaves[index].1 = SmolStr::from(content),
            None => {
                self.leaf_index.insert(path.clone(), self.leaves.len());
                self.leaves.push((path, SmolStr::from(content)));
            }
        }
        Ok(())
    }
}

pub fn materialize_to_archive<'a>(
    entries: impl IntoIterator<Item = &'a Entry>,
    archive: impl Into<PathBuf>,
    naming: FolderNaming,
) -> Result<Report, MaterializeError> {
    let mut sink = ArchiveSink::create(archive)?;
    info!("Materializing into archive {}", sink.path.display());

    let report = materialize(entries, &mut sink, naming);
    sink.finish()?;

    Ok(report)
}
