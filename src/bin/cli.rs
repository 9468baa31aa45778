// Shelf Core - Audiobook library views
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use shelf_core::library::{self, ViewMode};
use shelf_core::{LibrarySnapshot, ViewConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shelf-cli")]
#[command(about = "Shelf CLI - inspect library views of a snapshot", long_about = None)]
struct Cli {
    /// Library snapshot (JSON)
    #[arg(short, long, global = true, default_value = "library.json")]
    library: PathBuf,

    /// View configuration (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Embed minified books instead of the configured projection
    #[arg(short, long, global = true)]
    minified: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter the library, e.g. `series.Tm8gU2VyaWVz` or `issues`
    Filter {
        filter_by: String,
    },
    /// Distinct authors, genres, tags, series and narrators
    Facets,
    /// Books grouped by series
    Series {
        /// Order series by their newest book instead of first appearance
        #[arg(long)]
        recent: bool,
    },
    /// Home screen shelves
    Recent {
        #[arg(value_enum)]
        shelf: Shelf,
        /// Books per shelf (defaults to the configured shelf limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Library statistics
    Stats,
    /// Encode a facet value into a filter token
    Encode {
        value: String,
    },
    /// Decode a filter token
    Decode {
        token: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Shelf {
    Added,
    InProgress,
    Finished,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport {
    #[serde(flatten)]
    durations: library::DurationStats,
    total_size: u64,
    num_issues: usize,
    genres: Vec<library::stats::GenreCount>,
    authors: Vec<library::stats::AuthorCount>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Encode { value } => {
            println!("{}", library::encode_filter_value(value));
            return Ok(());
        }
        Commands::Decode { token } => {
            println!("{}", library::decode_filter_value(token)?);
            return Ok(());
        }
        _ => {}
    }

    let config = load_config(cli.config.as_deref())?;
    let mode = if cli.minified { ViewMode::Minified } else { config.view_mode };
    let snapshot = LibrarySnapshot::load(&cli.library)
        .with_context(|| format!("Failed to load library: {}", cli.library.display()))?;
    let audiobooks = &snapshot.audiobooks;

    match cli.command {
        Commands::Filter { filter_by } => {
            let filtered = library::filter_audiobooks(audiobooks, &filter_by, &snapshot.progress)?;
            let views: Vec<_> = filtered.into_iter().map(|ab| mode.project(ab)).collect();
            print_json(&views)
        }
        Commands::Facets => print_json(&library::extract_facets(audiobooks)),
        Commands::Series { recent } => {
            let series = library::group_by_series(audiobooks, mode);
            if recent {
                print_json(&library::series_most_recently_added(series, config.shelf_limit))
            } else {
                print_json(&series)
            }
        }
        Commands::Recent { shelf, limit } => {
            let limit = limit.unwrap_or(config.shelf_limit);
            let paired = library::books_with_progress(audiobooks, &snapshot.progress);
            let views = match shelf {
                Shelf::Added => library::most_recently_added(audiobooks, limit, mode),
                Shelf::InProgress => library::most_recently_in_progress(&paired, limit, mode),
                Shelf::Finished => library::most_recently_finished(&paired, limit, mode),
            };
            print_json(&views)
        }
        Commands::Stats => print_json(&StatsReport {
            durations: library::duration_stats(audiobooks),
            total_size: library::total_size(audiobooks),
            num_issues: library::issue_count(audiobooks),
            genres: library::genre_counts(audiobooks),
            authors: library::author_counts(audiobooks),
        }),
        Commands::Encode { .. } | Commands::Decode { .. } => Ok(()),
    }
}

fn load_config(path: Option<&Path>) -> Result<ViewConfig> {
    match path {
        Some(path) => ViewConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(ViewConfig::default()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
