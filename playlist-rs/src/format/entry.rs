use std::fmt::Display;

use smol_str::SmolStr;

/// One playlist record: an `#EXTINF` line and the line following it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// `tvg-id`
    pub id: Option<SmolStr>,
    /// `tvg-name`, usually carrying season and episode markers
    pub display_name: Option<SmolStr>,
    /// `tvg-logo`
    pub logo_url: Option<SmolStr>,
    /// `group-title`
    pub group: Option<SmolStr>,
    /// The line after the metadata line, `None` if the metadata line was the last one
    pub url: Option<SmolStr>,
    /// The metadata line exactly as it appeared in the source
    pub extinf: SmolStr,
    /// 1-based line number of the metadata line
    pub line: usize,
}

impl Entry {
    /// Trimmed group, `None` when absent or blank.
    pub fn trimmed_group(&self) -> Option<&str> {
        self.group
            .as_deref()
            .map(str::trim)
            .filter(|x| !x.is_empty())
    }

    pub fn has_display_name(&self) -> bool {
        self.display_name.as_ref().is_some_and(|x| !x.is_empty())
    }

    pub fn has_url(&self) -> bool {
        self.url.as_ref().is_some_and(|x| !x.is_empty())
    }
}

impl Display for Entry {
    /// Short human readable description used in warnings and reports.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}", self.line)?;
        if let Some(name) = &self.display_name {
            write!(f, " name=\"{}\"", name)?;
        }
        if let Some(id) = &self.id {
            write!(f, " id=\"{}\"", id)?;
        }
        if let Some(group) = &self.group {
            write!(f, " group=\"{}\"", group)?;
        }
        Ok(())
    }
}
