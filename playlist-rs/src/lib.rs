//! # playlist-rs
//! A library for extracting, filtering and grouping the entries of an extended m3u playlist
//!
//! # Example
//! ```rust
//! use playlist_rs::{PlaylistWriter, filter, parse_str, show_name, unique_groups};
//!
//! // 1. Extract
//! let result = parse_str(r#"
//! #EXTM3U
//! #EXTINF:-1 tvg-id="a" tvg-name="Foo S01 E01" group-title="News",Foo
//! http://example.com/foo/1.mkv
//! #EXTINF:-1 tvg-id="b" tvg-name="Bar" group-title="Movies",Bar
//! http://example.com/bar.mkv"#);
//!
//! // 2. Group
//! assert_eq!(unique_groups(&result.entries).len(), 2);
//! let news = filter(&result.entries, ["News"]);
//! assert_eq!(show_name(news[0].display_name.as_ref().unwrap()), "Foo");
//!
//! // 3. Generate
//! println!("{}", PlaylistWriter(&news));
//! ```

mod builder;
pub mod format;
mod groups;
mod parser;
mod show_name;
pub use builder::*;
pub use groups::*;
pub use parser::*;
pub use show_name::*;
