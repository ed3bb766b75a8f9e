//! Writes entries into a tree of `.strm` pointer files keyed by show name.
//!
//! The logical layout is `{show name}/{display name}.strm` with the url as
//! content, whether the tree ends up on disk ([`DirectorySink`]) or inside a
//! zip file ([`ArchiveSink`]).

use std::{error::Error, fmt::Display, io, path::PathBuf};

use log::{debug, info, warn};
use playlist_rs::{format::Entry, show_name};
use serde::Deserialize;

use crate::write_failure_with_log;

mod archive;
mod directory;
pub use archive::*;
pub use directory::*;

pub const LEAF_EXTENSION: &str = "strm";

/// Somewhere a tree of containers and leaves can be written to.
pub trait TreeSink {
    /// Creates the container if needed. Creating it twice is not an error.
    fn ensure_container(&mut self, container: &str) -> io::Result<()>;

    /// Writes `content` to `leaf` inside `container`, replacing any previous leaf of that name.
    fn write_leaf(&mut self, container: &str, leaf: &str, content: &str) -> io::Result<()>;
}

/// How show names become container names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderNaming {
    /// The show name as is
    #[default]
    Verbatim,
    /// Only alphanumerics, space, `_` and `-` are kept
    Sanitized,
}

impl FolderNaming {
    pub fn apply(&self, name: &str) -> String {
        match self {
            Self::Verbatim => name.to_owned(),
            Self::Sanitized => name
                .chars()
                .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
                .collect::<String>()
                .trim()
                .to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The named field is absent or empty
    MissingField(&'static str),
    /// The target refused the container or the leaf
    TargetWriteFailure(String),
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Missing field {}", field),
            Self::TargetWriteFailure(reason) => write!(f, "Target write failure: {}", reason),
        }
    }
}

#[derive(Debug, Default)]
pub struct Report {
    /// Number of leaves written, overwritten leaves included
    pub written: usize,
    pub skipped: Vec<(Entry, SkipReason)>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

#[derive(Debug)]
pub enum MaterializeError {
    /// The target root itself cannot be created or opened
    TargetUnavailable(PathBuf, io::Error),
    /// The archive could not be assembled
    Archive(PathBuf, zip::result::ZipError),
}

impl Display for MaterializeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TargetUnavailable(path, e) => {
                write!(f, "Target {} unavailable: {}", path.display(), e)
            }
            Self::Archive(path, e) => write!(f, "Failed to write archive {}: {}", path.display(), e),
        }
    }
}

impl Error for MaterializeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TargetUnavailable(_, e) => Some(e),
            Self::Archive(_, e) => Some(e),
        }
    }
}

/// Rejects names that would not map to exactly one path component.
fn check_component(kind: &str, name: &str) -> Result<(), SkipReason> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(SkipReason::TargetWriteFailure(format!(
            "Invalid {} name \"{}\"",
            kind, name
        )));
    }
    Ok(())
}

/// Container and leaf name for an entry.
pub fn leaf_location(entry: &Entry, naming: FolderNaming) -> Result<(String, String), SkipReason> {
    if !entry.has_display_name() {
        return Err(SkipReason::MissingField("display name"));
    }
    if !entry.has_url() {
        return Err(SkipReason::MissingField("url"));
    }

    let display_name = entry.display_name.as_deref().unwrap_or_default();
    let container = naming.apply(&show_name(display_name));
    let leaf = format!("{}.{}", display_name, LEAF_EXTENSION);
    check_component("container", &container)?;
    check_component("leaf", &leaf)?;

    Ok((container, leaf))
}

fn materialize_entry(
    entry: &Entry,
    sink: &mut impl TreeSink,
    naming: FolderNaming,
) -> Result<(), SkipReason> {
    let (container, leaf) = leaf_location(entry, naming)?;
    let url = entry.url.as_deref().unwrap_or_default();

    sink.ensure_container(&container)
        .map_err(write_failure_with_log!(format!("Create container {}", container)))?;
    sink.write_leaf(&container, &leaf, url)
        .map_err(write_failure_with_log!(format!("Write {}/{}", container, leaf)))?;

    debug!("Wrote {}/{}", container, leaf);
    Ok(())
}

/// Writes every entry to `sink` in order. Entries that cannot be written are
/// reported and skipped, they never stop the run.
pub fn materialize<'a>(
    entries: impl IntoIterator<Item = &'a Entry>,
    sink: &mut impl TreeSink,
    naming: FolderNaming,
) -> Report {
    let mut report = Report::default();

    for entry in entries {
        match materialize_entry(entry, sink, naming) {
            Ok(()) => report.written += 1,
            Err(reason) => {
                warn!("Skipping entry ({}): {}", entry, reason);
                report.skipped.push((entry.clone(), reason));
            }
        }
    }

    info!(
        "Materialized {} leaves, skipped {} entries",
        report.written,
        report.skipped.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, io};

    use playlist_rs::parse_str;

    use crate::materialize::{FolderNaming, SkipReason, TreeSink, leaf_location, materialize};

    /// Records leaves in memory, refusing containers named in `refused`
    #[derive(Default)]
    struct MemorySink {
        containers: Vec<String>,
        leaves: BTreeMap<String, String>,
        refused: Vec<&'static str>,
    }

    impl TreeSink for MemorySink {
        fn ensure_container(&mut self, container: &str) -> io::Result<()> {
            if self.refused.contains(&container) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "refused"));
            }
            if !self.containers.iter().any(|x| x == container) {
                self.containers.push(container.to_owned());
            }
            Ok(())
        }

        fn write_leaf(&mut self, container: &str, leaf: &str, content: &str) -> io::Result<()> {
            self.leaves
                .insert(format!("{}/{}", container, leaf), content.to_owned());
            Ok(())
        }
    }

    #[test]
    fn test_folder_naming() {
        assert_eq!(FolderNaming::Verbatim.apply("Who? (2020)"), "Who? (2020)");
        assert_eq!(FolderNaming::Sanitized.apply("Who? (2020)"), "Who 2020");
        assert_eq!(FolderNaming::Sanitized.apply("Ça_va - bien!"), "Ça_va - bien");
        assert_eq!(FolderNaming::Sanitized.apply("?!"), "");
    }

    #[test]
    fn test_same_show_two_leaves() {
        let entries = parse_str(
            r#"#EXTINF:-1 tvg-name="Foo S01 E01" group-title="Series"
http://x/1
#EXTINF:-1 tvg-name="Foo S01 E02 | 4K" group-title="Series"
http://x/2"#,
        )
        .entries;

        let mut sink = MemorySink::default();
        let report = materialize(&entries, &mut sink, FolderNaming::Verbatim);

        assert_eq!(report.written, 2);
        assert!(report.is_clean());
        assert_eq!(sink.containers, vec!["Foo"]);
        assert_eq!(sink.leaves.get("Foo/Foo S01 E01.strm").unwrap(), "http://x/1");
        assert_eq!(
            sink.leaves.get("Foo/Foo S01 E02 | 4K.strm").unwrap(),
            "http://x/2"
        );
    }

    #[test]
    fn test_missing_fields_skipped() {
        let entries = parse_str(
            r#"#EXTINF:-1 tvg-id="no-name"
http://x/1
#EXTINF:-1 tvg-name="Good"
http://x/2
#EXTINF:-1 tvg-name="No Url""#,
        )
        .entries;

        let mut sink = MemorySink::default();
        let report = materialize(&entries, &mut sink, FolderNaming::Verbatim);

        assert_eq!(report.written, 1);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].0.id.as_deref(), Some("no-name"));
        assert_eq!(
            report.skipped[0].1,
            SkipReason::MissingField("display name")
        );
        assert_eq!(report.skipped[1].1, SkipReason::MissingField("url"));
        assert_eq!(report.skipped[1].0.line, 5);
    }

    #[test]
    fn test_write_failure_does_not_abort() {
        let entries = parse_str(
            r#"#EXTINF:-1 tvg-name="Locked S01 E01"
http://x/1
#EXTINF:-1 tvg-name="Open"
http://x/2"#,
        )
        .entries;

        let mut sink = MemorySink {
            refused: vec!["Locked"],
            ..Default::default()
        };
        let report = materialize(&entries, &mut sink, FolderNaming::Verbatim);

        assert_eq!(report.written, 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(
            report.skipped[0].1,
            SkipReason::TargetWriteFailure(_)
        ));
        assert!(sink.leaves.contains_key("Open/Open.strm"));
    }

    #[test]
    fn test_invalid_names_rejected() {
        let entries = parse_str(
            r#"#EXTINF:-1 tvg-name="AC/DC Live"
http://x/1
#EXTINF:-1 tvg-name=" S01 E01"
http://x/2"#,
        )
        .entries;

        for entry in entries.iter() {
            assert!(matches!(
                leaf_location(entry, FolderNaming::Verbatim),
                Err(SkipReason::TargetWriteFailure(_))
            ));
        }
    }

    #[test]
    fn test_sanitized_container() {
        let entries = parse_str("#EXTINF:-1 tvg-name=\"Who? S01 E01\"\nhttp://x/1").entries;
        let (container, leaf) = leaf_location(&entries[0], FolderNaming::Sanitized).unwrap();
        assert_eq!(container, "Who");
        assert_eq!(leaf, "Who? S01 E01.strm");
    }
}
