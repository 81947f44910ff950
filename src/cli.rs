use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "osiris")]
#[command(author, version, about = "Rename media files from regex-extracted release metadata")]
pub struct Cli {
    /// Don't modify files
    #[arg(short, long, visible_alias = "dry-run")]
    pub dryrun: bool,

    /// Don't print file names
    #[arg(short, long)]
    pub silent: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Use film output format
    #[arg(short, long)]
    pub film: bool,

    /// Output the series year
    #[arg(short = 'Y', long, visible_alias = "seriesyear", overrides_with = "no_series_year")]
    pub series_year: bool,

    #[arg(long, overrides_with = "series_year", hide = true)]
    pub no_series_year: bool,

    /// Output scene info
    #[arg(short = 'S', long, overrides_with = "no_scene")]
    pub scene: bool,

    #[arg(long, overrides_with = "scene", hide = true)]
    pub no_scene: bool,

    /// Upper-case the episode number
    #[arg(short = 'U', long, overrides_with = "no_uppercase_episode")]
    pub uppercase_episode: bool,

    #[arg(long, overrides_with = "uppercase_episode", hide = true)]
    pub no_uppercase_episode: bool,

    /// Release year override, used when none is extracted
    #[arg(short, long)]
    pub year: Option<String>,

    /// Release title override, used when none is extracted
    #[arg(short, long)]
    pub title: Option<String>,

    /// Config file (default: <config dir>/osiris/osiris.{yml,yaml,toml})
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Input regex pattern with named groups (title, year, ep, eptitle, scene)
    #[arg(short, long)]
    pub regex: Option<String>,

    /// Named regex preset from the config file
    #[arg(short, long, conflicts_with = "regex")]
    pub preset: Option<String>,

    /// Output template, e.g. "{Title} - {Episode}[ ({Scene})]"
    #[arg(short = 'T', long)]
    pub template: Option<String>,

    /// Continue with the remaining files when one fails
    #[arg(short, long)]
    pub keep_going: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Files to rename
    #[arg(required = true, value_name = "FILENAME")]
    pub filenames: Vec<PathBuf>,
}

/// `Some(true)` for `--x`, `Some(false)` for `--no-x`, `None` when neither was given.
pub fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}
