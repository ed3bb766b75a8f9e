use std::fmt::Display;

use crate::format::Entry;

/// Playlist text made of the original two lines of each entry.
///
/// Lines are joined with `\n` and nothing follows the last one. An entry
/// without url contributes its metadata line only. No `#EXTM3U` header is
/// emitted.
pub struct PlaylistWriter<'a>(pub &'a [Entry]);

impl Display for PlaylistWriter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for it in self.0.iter() {
            if !first {
                writeln!(f)?;
            }
            first = false;

            write!(f, "{}", it.extinf)?;
            if let Some(url) = &it.url {
                write!(f, "\n{}", url)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{PlaylistWriter, filter, parse_str};

    #[test]
    fn test_filtered_playlist() {
        let data = r#"#EXTM3U
#EXTINF:-1 tvg-name="A" group-title="News",A
http://a
#EXTINF:-1 tvg-name="B" group-title="Kids",B
http://b
#EXTINF:-1 tvg-name="C" group-title="News",C"#;
        let entries = parse_str(data).entries;
        let filtered = filter(&entries, ["News"]);

        assert_eq!(
            PlaylistWriter(&filtered).to_string(),
            "#EXTINF:-1 tvg-name=\"A\" group-title=\"News\",A\nhttp://a\n#EXTINF:-1 tvg-name=\"C\" group-title=\"News\",C"
        );
    }

    #[test]
    fn test_reparse_keeps_entries() {
        let data = "#EXTINF:-1 tvg-id=\"1\" group-title=\"News\",A\nhttp://a\n#EXTINF:-1 tvg-id=\"2\" group-title=\"News\",B\nhttp://b";
        let entries = parse_str(data).entries;
        let text = PlaylistWriter(&entries).to_string();
        assert_eq!(text, data);
        assert_eq!(parse_str(&text).entries, entries);
    }

    #[test]
    fn test_empty() {
        assert_eq!(PlaylistWriter(&[]).to_string(), "");
    }
}
