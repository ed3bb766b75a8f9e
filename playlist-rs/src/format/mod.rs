mod entry;
mod extraction;
pub use entry::*;
pub use extraction::*;

pub mod directives {
    pub const EXTINF: &str = "#EXTINF";
}

pub mod attributes {
    pub const GROUP_TITLE: &str = "group-title";
    pub const TVG_ID: &str = "tvg-id";
    pub const TVG_NAME: &str = "tvg-name";
    pub const TVG_LOGO: &str = "tvg-logo";
}
