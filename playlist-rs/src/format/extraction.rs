use std::fmt::Display;

use crate::format::Entry;

/// Non fatal observations made while extracting entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The metadata line at `line` is the last line of the document
    MissingUrl { line: usize },
    /// The line taken as url for the metadata line at `line` is blank or a directive
    SuspiciousUrl { line: usize },
}

impl Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingUrl { line } => {
                write!(f, "Metadata line {} has no following url line", line)
            }
            Self::SuspiciousUrl { line } => write!(
                f,
                "Line following metadata line {} does not look like an url",
                line
            ),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Extraction {
    /// Entries in document order, one per `#EXTINF` line
    pub entries: Vec<Entry>,
    pub warnings: Vec<Warning>,
}
