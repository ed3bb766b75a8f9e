use std::{
    fs::{self, File},
    io::BufReader,
    path::Path,
    sync::Arc,
};

use anyhow::{Context, Result};
use log::{info, warn};
use playlist_rs::{
    GroupSet, ParseError, Parser, PlaylistWriter, filter, format::Entry, unique_groups,
    unique_show_names,
};

use crate::{
    Config,
    materialize::{self, Report},
    store,
};

/// The extract, filter and materialize steps, wired to the configured paths.
pub struct Pipeline {
    config: Arc<Config>,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reads every entry of the playlist at `playlist_path`.
    pub fn extract(&self, playlist_path: impl AsRef<Path>) -> Result<Vec<Entry>, ParseError> {
        let path = playlist_path.as_ref();
        let file = File::open(path)?;

        let mut parser = Parser::new(BufReader::new(file));
        parser.parse()?;
        let result = parser.get_result();

        for warning in result.warnings.iter() {
            warn!("{}: {}", path.display(), warning);
        }
        info!(
            "Extracted {} entries from {}",
            result.entries.len(),
            path.display()
        );
        Ok(result.entries)
    }

    pub fn list_groups(&self, entries: &[Entry]) -> Vec<String> {
        unique_groups(entries).into_iter().collect()
    }

    pub fn list_shows(&self, entries: &[Entry]) -> Vec<String> {
        unique_show_names(entries).into_iter().collect()
    }

    pub fn filter_by_groups(&self, entries: &[Entry], groups: &GroupSet) -> Vec<Entry> {
        let result = filter(entries, groups);
        info!(
            "{} of {} entries belong to the {} selected groups",
            result.len(),
            entries.len(),
            groups.len()
        );
        result
    }

    /// Filters against the selection saved at the configured path.
    pub fn filter_with_saved_selection(&self, entries: &[Entry]) -> Result<Vec<Entry>> {
        let selection = store::load_selection(&self.config.selection_path)?;
        if selection.is_empty() {
            warn!("No groups selected, the result is empty");
        }
        Ok(self.filter_by_groups(entries, &selection))
    }

    pub fn write_filtered_playlist(&self, entries: &[Entry], path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, PlaylistWriter(entries).to_string())
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!("Filtered data has been written to {}", path.display());
        Ok(())
    }

    pub fn materialize_to_directory(
        &self,
        entries: &[Entry],
        dir: impl AsRef<Path>,
    ) -> Result<Report, materialize::MaterializeError> {
        materialize::materialize_to_directory(entries, dir.as_ref(), self.config.folder_naming)
    }

    pub fn materialize_to_archive(
        &self,
        entries: &[Entry],
        archive: impl AsRef<Path>,
    ) -> Result<Report, materialize::MaterializeError> {
        materialize::materialize_to_archive(entries, archive.as_ref(), self.config.folder_naming)
    }

    pub fn create_show_folders(
        &self,
        titles: &[String],
        dir: impl AsRef<Path>,
    ) -> Result<usize, materialize::MaterializeError> {
        materialize::create_show_folders(titles, dir.as_ref(), self.config.folder_naming)
    }

    pub fn clear_directory(
        &self,
        dir: impl AsRef<Path>,
    ) -> Result<Option<usize>, materialize::MaterializeError> {
        materialize::clear_directory(dir)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::{Config, Pipeline, materialize::FolderNaming, store};

    const PLAYLIST: &str = r#"#EXTM3U
#EXTINF:-1 tvg-id="n1" tvg-name="Daily S01 E01" tvg-logo="http://logo/n.png" group-title="News",Daily S01 E01
http://x/n1
#EXTINF:-1 tvg-id="m1" tvg-name="Film: Part 2 | 4K" group-title="Movies",Film
http://x/m1
#EXTINF:-1 tvg-id="n2" tvg-name="Daily S01 E02" group-title="News",Daily S01 E02
http://x/n2
#EXTINF:-1 tvg-id="k1" tvg-name="Cartoon" group-title="Kids",Cartoon
http://x/k1
#EXTINF:-1 tvg-id="n3" tvg-name="Late News" group-title="News",Late"#;

    fn setup(naming: FolderNaming) -> (TempDir, Pipeline) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("data.m3u"), PLAYLIST).unwrap();

        let config = Config {
            playlist_path: dir.path().join("data.m3u"),
            filtered_path: dir.path().join("data-filtered.m3u"),
            selection_path: dir.path().join("selected_groups.json"),
            source_url_path: dir.path().join("url_config.txt"),
            library_dir: dir.path().join("VOD Files"),
            archive_path: dir.path().join("VOD.zip"),
            folder_naming: naming,
            ..Default::default()
        };
        (dir, Pipeline::new(config))
    }

    #[test]
    fn test_extract_missing_source() {
        let (dir, pipeline) = setup(FolderNaming::Verbatim);
        assert!(pipeline.extract(dir.path().join("absent.m3u")).is_err());
    }

    #[test]
    fn test_full_run() {
        let (_dir, pipeline) = setup(FolderNaming::Verbatim);
        let config = pipeline.config();

        let entries = pipeline.extract(&config.playlist_path).unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(
            pipeline.list_groups(&entries),
            vec!["Kids", "Movies", "News"]
        );

        store::add_to_selection(&config.selection_path, ["News", "Movies"]).unwrap();
        let filtered = pipeline.filter_with_saved_selection(&entries).unwrap();
        assert_eq!(filtered.len(), 4);

        pipeline
            .write_filtered_playlist(&filtered, &config.filtered_path)
            .unwrap();
        let reread = pipeline.extract(&config.filtered_path).unwrap();
        assert_eq!(reread.len(), 4);
        assert_eq!(reread[0].id.as_deref(), Some("n1"));
        assert_eq!(reread[3].url, None);
        assert!(
            !fs::read_to_string(&config.filtered_path)
                .unwrap()
                .ends_with('\n')
        );

        assert_eq!(
            pipeline.list_shows(&reread),
            vec!["Daily", "Film: Part 2", "Late News"]
        );

        let report = pipeline
            .materialize_to_directory(&reread, &config.library_dir)
            .unwrap();
        assert_eq!(report.written, 3);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0.id.as_deref(), Some("n3"));
        assert!(
            config
                .library_dir
                .join("Daily")
                .join("Daily S01 E02.strm")
                .exists()
        );

        assert_eq!(
            pipeline.clear_directory(&config.library_dir).unwrap(),
            Some(2)
        );
    }

    #[test]
    fn test_empty_selection() {
        let (_dir, pipeline) = setup(FolderNaming::Verbatim);
        let entries = pipeline.extract(&pipeline.config().playlist_path).unwrap();
        assert!(pipeline.filter_with_saved_selection(&entries).unwrap().is_empty());
    }

    #[test]
    fn test_sanitized_archive() {
        let (_dir, pipeline) = setup(FolderNaming::Sanitized);
        let config = pipeline.config();
        let entries = pipeline.extract(&config.playlist_path).unwrap();

        let report = pipeline
            .materialize_to_archive(&entries, &config.archive_path)
            .unwrap();
        assert_eq!(report.written, 4);

        let titles = pipeline.list_shows(&entries);
        let created = pipeline
            .create_show_folders(&titles, &config.library_dir)
            .unwrap();
        assert_eq!(created, 4);
        assert!(config.library_dir.join("Film Part 2").is_dir());
    }
}
