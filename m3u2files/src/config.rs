use std::{fs::File, io, path::Path, path::PathBuf};

use anyhow::Result;
use log::info;
use serde::Deserialize;

use crate::materialize::FolderNaming;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Where the fetched playlist is stored and read from
    pub playlist_path: PathBuf,
    pub filtered_path: PathBuf,
    pub selection_path: PathBuf,
    /// Last url passed to `fetch`
    pub source_url_path: PathBuf,
    pub library_dir: PathBuf,
    pub archive_path: PathBuf,
    pub folder_naming: FolderNaming,
    pub http: HttpConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            playlist_path: "data.m3u".into(),
            filtered_path: "data-filtered.m3u".into(),
            selection_path: "selected_groups.json".into(),
            source_url_path: "url_config.txt".into(),
            library_dir: "VOD Files".into(),
            archive_path: "VOD.zip".into(),
            folder_naming: FolderNaming::default(),
            http: HttpConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpConfig {
    pub user_agent: Option<String>,
    pub proxy: Option<String>,
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: Some(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".into(),
            ),
            proxy: None,
            timeout_secs: 10,
        }
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let file = File::open(path.as_ref())?;
    let config: Config = serde_yaml::from_reader(file)?;
    Ok(config)
}

/// Like [`load_config`], but a missing file yields the defaults.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<Config> {
    match load_config(path.as_ref()) {
        Err(e) if is_not_found(&e) => {
            info!(
                "No config at {}, using defaults",
                path.as_ref().display()
            );
            Ok(Config::default())
        }
        other => other,
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<io::Error>()
        .is_some_and(|x| x.kind() == io::ErrorKind::NotFound)
}
