use std::path::Path;
use std::str::FromStr;

use colored::Colorize;
use tracing::Level;

use crate::core::fs::display_name;

pub fn init_logging(verbose: bool, config: &crate::config::Config) {
    let level = if verbose {
        Level::DEBUG
    } else {
        Level::from_str(&config.logs.level).unwrap_or(Level::WARN)
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn init_color(no_color: bool) {
    if no_color {
        colored::control::set_override(false);
    }
}

pub fn print_rename(from: &Path, to: &Path) {
    println!("{} {} {}", display_name(from), "->".green(), display_name(to));
}
