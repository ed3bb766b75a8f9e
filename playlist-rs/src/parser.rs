use std::{
    error::Error,
    fmt::Display,
    io::{self, Read},
    mem::swap,
};

use smol_str::SmolStr;

use crate::format::{Entry, Extraction, Warning, attributes, directives};

pub struct Parser(Box<dyn ParserImplTrait>);

impl Parser {
    pub fn new<T: Read + 'static>(reader: T) -> Self {
        Self(Box::new(ParserImpl::new(reader)))
    }

    pub fn parse(&mut self) -> Result<(), ParseError> {
        self.0.parse()
    }

    pub fn get_result(&mut self) -> Extraction {
        self.0.get_result()
    }
}

#[derive(Debug)]
pub enum ParseError {
    /// The playlist could not be read at all, including invalid UTF-8
    SourceUnavailable(io::Error),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            Self::SourceUnavailable(e) => write!(f, "Playlist source unavailable: {}", e),
        }
    }
}
impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SourceUnavailable(e) => Some(e),
        }
    }
}
impl From<io::Error> for ParseError {
    fn from(value: io::Error) -> Self {
        Self::SourceUnavailable(value)
    }
}

trait ParserImplTrait {
    fn parse(&mut self) -> Result<(), ParseError>;
    fn get_result(&mut self) -> Extraction;
}

/// Finds the first `key="value"` in `line`.
///
/// The value runs up to the next double quote; there is no escaping. An
/// occurrence without a closing quote never matches. With `allow_empty` unset,
/// an occurrence with an empty value is passed over and the search goes on.
fn find_attribute<'a>(line: &'a str, key: &str, allow_empty: bool) -> Option<&'a str> {
    let needle = format!("{}=\"", key);
    let mut offset = 0;

    while let Some(found) = line[offset..].find(&needle) {
        let start = offset + found;
        let value = &line[start + needle.len()..];
        match value.find('"') {
            None => return None,
            Some(end) if end > 0 || allow_empty => return Some(&value[..end]),
            // empty value, keys are ascii so the next byte is a char boundary
            Some(_) => offset = start + 1,
        }
    }

    None
}

fn is_metadata_line(line: &str) -> bool {
    line.starts_with(directives::EXTINF)
}

fn parse_entry(lines: &[&str], index: usize, warnings: &mut Vec<Warning>) -> Entry {
    let metadata = lines[index];
    let line = index + 1;

    let url = lines.get(index + 1).copied();
    match url {
        None => warnings.push(Warning::MissingUrl { line }),
        Some(x) if x.trim().is_empty() || x.starts_with('#') => {
            warnings.push(Warning::SuspiciousUrl { line })
        }
        Some(_) => {}
    }

    Entry {
        id: find_attribute(metadata, attributes::TVG_ID, true).map(SmolStr::from),
        display_name: find_attribute(metadata, attributes::TVG_NAME, true).map(SmolStr::from),
        logo_url: find_attribute(metadata, attributes::TVG_LOGO, true).map(SmolStr::from),
        group: find_attribute(metadata, attributes::GROUP_TITLE, false).map(SmolStr::from),
        url: url.map(SmolStr::from),
        extinf: SmolStr::from(metadata),
        line,
    }
}

/// Extracts every `#EXTINF` record of an in-memory playlist. Never fails.
pub fn parse_str(text: impl AsRef<str>) -> Extraction {
    let lines = text
        .as_ref()
        .trim()
        .split('\n')
        .map(|x| x.strip_suffix('\r').unwrap_or(x))
        .collect::<Vec<_>>();

    let mut result = Extraction::default();
    for index in 0..lines.len() {
        if is_metadata_line(lines[index]) {
            let entry = parse_entry(&lines, index, &mut result.warnings);
            result.entries.push(entry);
        }
    }

    result
}

struct ParserImpl<T: Read + 'static> {
    reader: T,
    result: Extraction,
}

impl<T: Read + 'static> ParserImpl<T> {
    pub fn new(reader: T) -> Self {
        Self {
            reader,
            result: Extraction::default(),
        }
    }
}

impl<T: Read + 'static> ParserImplTrait for ParserImpl<T> {
    fn parse(&mut self) -> Result<(), ParseError> {
        let mut buffer = String::new();
        self.reader.read_to_string(&mut buffer)?;

        let Extraction { entries, warnings } = parse_str(buffer);
        self.result.entries.extend(entries);
        self.result.warnings.extend(warnings);

        Ok(())
    }

    fn get_result(&mut self) -> Extraction {
        let mut result = Extraction::default();
        swap(&mut self.result, &mut result);
        result
    }
}
