//! search-albums - run one album search from the command line
//!
//! Prints a ranked table (or JSON with `--json`) to stdout. Logs go to
//! stderr so output stays pipeable.

use std::path::PathBuf;
use std::sync::Arc;

use albumeo_common::config::load_config;
use albumeo_search::artwork::ArtworkUrls;
use albumeo_search::logging::init_tracing;
use albumeo_search::models::Album;
use albumeo_search::musicbrainz::MusicBrainzClient;
use albumeo_search::{CoverArtResolver, SearchOrchestrator, SearchStatus};
use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "search-albums")]
#[command(about = "Search MusicBrainz for albums from a free-text query")]
#[command(version)]
struct Args {
    /// Free-text query, e.g. "Abbey Road - The Beatles"
    query: String,

    /// Maximum number of albums (defaults to search.default_limit)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Path to TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct JsonAlbum<'a> {
    rank: usize,
    #[serde(flatten)]
    album: &'a Album,
    artwork: ArtworkUrls,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging)?;

    let limit = args
        .limit
        .unwrap_or(config.search.default_limit)
        .min(config.search.max_limit);

    let client = MusicBrainzClient::new(&config.musicbrainz)
        .context("Failed to create MusicBrainz client")?;
    let artwork = CoverArtResolver::new(&config.musicbrainz)
        .context("Failed to create cover art resolver")?;
    let orchestrator = SearchOrchestrator::from_config(Arc::new(client), &config.search);

    let outcome = orchestrator.search(&args.query, limit).await;

    if args.json {
        let albums: Vec<JsonAlbum> = outcome
            .albums
            .iter()
            .enumerate()
            .map(|(i, album)| JsonAlbum {
                rank: i + 1,
                album,
                artwork: artwork.artwork_for(&album.image_refs),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&albums)?);
    } else {
        print_table(&outcome.albums, &artwork);
    }

    match outcome.status {
        SearchStatus::BackendUnavailable => bail!("MusicBrainz could not be reached"),
        SearchStatus::EmptyQuery => bail!("Query is empty"),
        SearchStatus::NoMatches => {
            eprintln!("No albums found for \"{}\"", args.query);
            Ok(())
        }
        SearchStatus::Matched => Ok(()),
    }
}

fn print_table(albums: &[Album], artwork: &CoverArtResolver) {
    if albums.is_empty() {
        return;
    }

    let artist_width = column_width(albums.iter().map(|a| a.artist_name.as_str()), "Artist");
    let album_width = column_width(albums.iter().map(|a| a.name.as_str()), "Album");

    println!(
        "{:>4}  {:<aw$}  {:<nw$}  {:<10}  Artwork",
        "#",
        "Artist",
        "Album",
        "Date",
        aw = artist_width,
        nw = album_width
    );
    for (i, album) in albums.iter().enumerate() {
        println!(
            "{:>4}  {:<aw$}  {:<nw$}  {:<10}  {}",
            i + 1,
            truncate(&album.artist_name, artist_width),
            truncate(&album.name, album_width),
            album.release_date.as_deref().unwrap_or("-"),
            artwork.artwork_for(&album.image_refs).display_url,
            aw = artist_width,
            nw = album_width
        );
    }
}

const MAX_COLUMN_WIDTH: usize = 40;

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
        .min(MAX_COLUMN_WIDTH)
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
