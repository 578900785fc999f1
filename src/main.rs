mod cli;
mod logging;

use std::path::Path;
use std::process;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use colored::*;
use dirtools::config::load_configuration;
use dirtools::{AppConfig, ContainmentScope, OsFileSystem, SearchDepth};
use dotenv::dotenv;
use tracing::error;

fn main() {
    dotenv().ok();

    let args = Cli::parse();
    let guard = logging::init_logger(args.verbose);

    let config = match load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            drop(guard);
            process::exit(1);
        }
    };

    let command = match args.command {
        Some(command) => command,
        None => {
            let _ = Cli::command().print_long_help();
            return;
        }
    };

    let code = match run(command, &config) {
        Ok(true) => 0,
        Ok(false) => 2,
        Err(err) => {
            error!("Error: {:#}", err);
            1
        }
    };
    drop(guard);
    process::exit(code);
}

/// Runs one subcommand. `Ok(false)` means the question it asked came back negative.
fn run(command: Commands, config: &AppConfig) -> anyhow::Result<bool> {
    let fs = OsFileSystem;

    match command {
        Commands::Count { dir } => {
            let count = dirtools::count_files_recursively(&fs, &dir)?;
            println!("{}", count.to_string().green());
        }
        Commands::Invert {
            parent,
            excluded,
            pattern,
        } => {
            let names =
                dirtools::invert_dir_list(&fs, &parent, excluded.as_slice(), pattern.as_deref())?;
            for name in names {
                println!("{}", name);
            }
        }
        Commands::Convert { path } => {
            let converted = dirtools::convert_unix_path_to_os_path(&path)?;
            println!("{}", converted.display());
        }
        Commands::Realpath { paths } => {
            let resolved = dirtools::symlinks_to_real_paths(&fs, paths.as_slice())?;
            for (path, real) in paths.iter().zip(resolved) {
                println!("{} -> {}", path.display(), real.display().to_string().cyan());
            }
        }
        Commands::List { dirs } => {
            for file in dirtools::recursively_list_files_in_dirs(&fs, dirs.as_slice())? {
                println!("{}", file.display());
            }
        }
        Commands::Sizes { dir } => {
            let buckets = dirtools::dir_files_keyed_by_size(&fs, &dir)?;
            for (size, paths) in buckets.iter() {
                println!("{}", format!("{} bytes", size).yellow());
                for path in paths {
                    println!("\t{}", path.display());
                }
            }
            println!(
                "{} files, {} distinct sizes, {} bytes",
                buckets.total_files(),
                buckets.distinct_sizes(),
                buckets.total_bytes()
            );
        }
        Commands::Ancestor {
            path,
            markers,
            depth,
        } => {
            let markers = if markers.is_empty() {
                config.markers.clone()
            } else {
                markers
            };
            let depth = depth.map_or(config.search_depth(), SearchDepth::from);
            match dirtools::ancestor_contains_file(&fs, &path, markers.as_slice(), depth)? {
                Some(found) => println!("{}", found.display().to_string().green()),
                None => {
                    println!("{}", "no ancestor contains a marker".red());
                    return Ok(false);
                }
            }
        }
        Commands::Lock { dir } => {
            dirtools::lock_dir(&fs, &dir)?;
        }
        Commands::Unlock { dir } => {
            dirtools::unlock_dir(&fs, &dir)?;
        }
        Commands::Contains { link, dir, exact } => {
            let scope = if exact {
                ContainmentScope::Exact
            } else {
                config.containment_scope()
            };
            let contained = dirtools::symlink_source_is_in_dir(&fs, &link, &dir, scope)
                .with_context(|| describe(&link, &dir))?;
            if contained {
                println!("{}", "yes".green());
            } else {
                println!("{}", "no".red());
                return Ok(false);
            }
        }
        Commands::PrintConfig => {
            println!("Configuration: {:?}", config);
        }
    }

    Ok(true)
}

fn describe(link: &Path, dir: &Path) -> String {
    format!("checking whether {} points into {}", link.display(), dir.display())
}
