//! Command-line interface for stdl
//! Checks, formats and converts `.stdl` scene files.
//!
//! Usage:
//!   stdl check `<path>`            - Parse a file and report errors
//!   stdl fmt `<path>` [--write]    - Print the canonical form, or rewrite the file in place
//!   stdl json `<path>`             - Print the scene as JSON

use clap::{Arg, ArgAction, ArgMatches, Command};
use stdl::io::{load_file, save_file};
use stdl::Scene;

fn main() {
    env_logger::init();

    let path_arg = || {
        Arg::new("path")
            .help("Path to the stdl file")
            .required(true)
            .index(1)
    };

    let matches = Command::new("stdl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for checking and formatting stdl scene files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("check")
                .about("Parse a file and report the first error")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("fmt")
                .about("Print the canonical form of a file")
                .arg(path_arg())
                .arg(
                    Arg::new("write")
                        .long("write")
                        .short('w')
                        .help("Rewrite the file in place instead of printing")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("json")
                .about("Print the scene as JSON")
                .arg(path_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("check", check_matches)) => {
            let path = path_of(check_matches);
            let scene = load_or_exit(path);
            println!("{}: ok ({} roots)", path, scene.roots.len());
        }
        Some(("fmt", fmt_matches)) => {
            let path = path_of(fmt_matches);
            handle_fmt_command(path, fmt_matches.get_flag("write"));
        }
        Some(("json", json_matches)) => {
            handle_json_command(path_of(json_matches));
        }
        _ => unreachable!(),
    }
}

fn path_of(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or_default()
}

fn load_or_exit(path: &str) -> Scene {
    load_file(path).unwrap_or_else(|e| {
        eprintln!("{}: {}", path, e);
        std::process::exit(1);
    })
}

/// Handle the fmt command
fn handle_fmt_command(path: &str, write: bool) {
    let scene = load_or_exit(path);
    if !write {
        print!("{}", scene);
        return;
    }
    if let Err(e) = save_file(&scene, path) {
        eprintln!("{}: {}", path, e);
        std::process::exit(1);
    }
}

/// Handle the json command
fn handle_json_command(path: &str) {
    let scene = load_or_exit(path);
    match serde_json::to_string_pretty(&scene) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            std::process::exit(1);
        }
    }
}
