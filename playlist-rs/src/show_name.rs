use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::format::Entry;

pub const QUALITY_SUFFIX: &str = " | 4K";

lazy_static! {
    /// Shortest prefix followed by a `S01 E02` style marker
    static ref EPISODE_MARKER_REGEX: Regex =
        Regex::new(r"^(.*?)\sS\d{2}\sE\d{2}").expect("Regular expression error");
}

/// Derives the key grouping all episodes of one show together.
///
/// Every `" | 4K"` is removed first, then everything from the first
/// season/episode marker on is dropped. The result is trimmed.
///
/// ```
/// use playlist_rs::show_name;
///
/// assert_eq!(show_name("The Show S01 E02 | 4K"), "The Show");
/// assert_eq!(show_name("Plain Movie Title"), "Plain Movie Title");
/// ```
pub fn show_name(display_name: impl AsRef<str>) -> String {
    let name = display_name.as_ref().replace(QUALITY_SUFFIX, "");

    match EPISODE_MARKER_REGEX.captures(&name) {
        Some(captures) => captures
            .get(1)
            .map(|x| x.as_str().trim().to_owned())
            .unwrap_or_default(),
        None => name.trim().to_owned(),
    }
}

/// Sorted distinct show names of the entries carrying a display name.
pub fn unique_show_names<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> BTreeSet<String> {
    entries
        .into_iter()
        .filter_map(|x| x.display_name.as_ref())
        .map(show_name)
        .collect()
}
