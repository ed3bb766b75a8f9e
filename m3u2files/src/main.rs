use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::info;
use m3u2files_rs::{
    Pipeline, load_config_or_default,
    materialize::Report,
    store::{self, Selection},
    transfer::{build_client, fetch_playlist},
};

#[derive(Parser, Debug)]
#[command(name = "m3u2files")]
#[command(about = "Turns the selected groups of an m3u playlist into a tree of .strm files")]
struct Args {
    /// Configuration file
    #[arg(long, env = "M3U2FILES_CONFIG", default_value = "m3u2files.yml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download the playlist, from URL or the last fetched url
    Fetch { url: Option<String> },
    /// Print the group classifications of the playlist
    Groups {
        #[arg(long)]
        playlist: Option<PathBuf>,
    },
    /// Inspect or change the saved group selection
    Select {
        #[command(subcommand)]
        action: SelectAction,
    },
    /// Write the entries of the selected groups to the filtered playlist
    Filter {
        #[arg(long)]
        playlist: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the show names of the playlist
    Shows {
        /// Defaults to the filtered playlist
        #[arg(long)]
        playlist: Option<PathBuf>,
    },
    /// Create one folder per show name
    Folders {
        /// Defaults to the filtered playlist
        #[arg(long)]
        playlist: Option<PathBuf>,
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Write .strm files into a directory or a zip archive
    Materialize {
        /// Defaults to the filtered playlist
        #[arg(long)]
        playlist: Option<PathBuf>,
        /// Directory to write, the configured library by default
        #[arg(long, group = "target")]
        dir: Option<PathBuf>,
        /// Write a zip archive instead of a directory, the configured archive by default
        #[arg(long, group = "target", num_args = 0..=1)]
        archive: Option<Option<PathBuf>>,
    },
    /// Remove everything inside the library directory
    Clear {
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum SelectAction {
    /// Print the saved selection
    Show,
    /// Replace the selection
    Set { groups: Vec<String> },
    /// Add groups to the selection
    Add { groups: Vec<String> },
    /// Remove groups from the selection
    Remove { groups: Vec<String> },
}

fn print_report(report: &Report) {
    println!(
        "Wrote {} .strm files, skipped {} entries",
        report.written,
        report.skipped.len()
    );
    for (entry, reason) in report.skipped.iter() {
        println!("  skipped {}: {}", entry, reason);
    }
}

fn print_selection(selection: &Selection) {
    for group in selection.iter() {
        println!("{}", group);
    }
}

async fn fetch(pipeline: &Pipeline, url: Option<String>) -> Result<()> {
    let config = pipeline.config();
    let url = match url {
        Some(url) => url,
        None => match store::load_source_url(&config.source_url_path)? {
            Some(url) => url,
            None => bail!("No url given and none saved yet"),
        },
    };

    store::save_source_url(&config.source_url_path, &url)?;
    let client = build_client(&config.http)?;
    let size = fetch_playlist(&client, &url, &config.playlist_path)
        .await
        .with_context(|| format!("Failed to fetch {}", url))?;

    println!(
        "Stored {} bytes in {}",
        size,
        config.playlist_path.display()
    );
    Ok(())
}

fn select(pipeline: &Pipeline, action: SelectAction) -> Result<()> {
    let path = &pipeline.config().selection_path;
    let selection = match action {
        SelectAction::Show => store::load_selection(path)?,
        SelectAction::Set { groups } => {
            let selection = groups
                .iter()
                .map(|x| x.trim().to_owned())
                .filter(|x| !x.is_empty())
                .collect::<Selection>();
            store::save_selection(path, &selection)?;
            selection
        }
        SelectAction::Add { groups } => store::add_to_selection(path, groups)?,
        SelectAction::Remove { groups } => store::remove_from_selection(path, groups)?,
    };

    print_selection(&selection);
    Ok(())
}

async fn app_entry(args: Args) -> Result<()> {
    let config = load_config_or_default(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    let pipeline = Pipeline::new(config);
    let config = pipeline.config();

    match args.command {
        Command::Fetch { url } => fetch(&pipeline, url).await?,
        Command::Groups { playlist } => {
            let entries = pipeline.extract(playlist.as_ref().unwrap_or(&config.playlist_path))?;
            for group in pipeline.list_groups(&entries) {
                println!("{}", group);
            }
        }
        Command::Select { action } => select(&pipeline, action)?,
        Command::Filter { playlist, output } => {
            let entries = pipeline.extract(playlist.as_ref().unwrap_or(&config.playlist_path))?;
            let filtered = pipeline.filter_with_saved_selection(&entries)?;
            let output = output.as_ref().unwrap_or(&config.filtered_path);
            pipeline.write_filtered_playlist(&filtered, output)?;
            println!("Wrote {} entries to {}", filtered.len(), output.display());
        }
        Command::Shows { playlist } => {
            let entries = pipeline.extract(playlist.as_ref().unwrap_or(&config.filtered_path))?;
            for show in pipeline.list_shows(&entries) {
                println!("{}", show);
            }
        }
        Command::Folders { playlist, dir } => {
            let entries = pipeline.extract(playlist.as_ref().unwrap_or(&config.filtered_path))?;
            let dir = dir.as_ref().unwrap_or(&config.library_dir);
            let created = pipeline.create_show_folders(&pipeline.list_shows(&entries), dir)?;
            println!("Created folders for {} titles in {}", created, dir.display());
        }
        Command::Materialize {
            playlist,
            dir,
            archive,
        } => {
            let entries = pipeline.extract(playlist.as_ref().unwrap_or(&config.filtered_path))?;
            let report = match archive {
                Some(archive) => {
                    let archive = archive.as_ref().unwrap_or(&config.archive_path);
                    info!("Writing archive {}", archive.display());
                    pipeline.materialize_to_archive(&entries, archive)?
                }
                None => {
                    let dir = dir.as_ref().unwrap_or(&config.library_dir);
                    info!("Writing directory {}", dir.display());
                    pipeline.materialize_to_directory(&entries, dir)?
                }
            };
            print_report(&report);
        }
        Command::Clear { dir } => {
            let dir = dir.as_ref().unwrap_or(&config.library_dir);
            match pipeline.clear_directory(dir)? {
                Some(removed) => println!("Removed {} items from {}", removed, dir.display()),
                None => println!("{} does not exist, nothing to clear", dir.display()),
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    app_entry(Args::parse()).await
}
