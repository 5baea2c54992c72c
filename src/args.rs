use std::path::PathBuf;
use clap::{Arg, ArgMatches, Command};
use crate::config::{Args, Mode};
use crate::io::print_error;

fn command() -> Command {
    Command::new("listing-sitemap")
        .version("1.0")
        .about("Generate or incrementally extend sitemap.xml from property and request listing files.")
        .arg(
            Arg::new("root")
                .short('r')
                .long("root")
                .value_parser(clap::value_parser!(String))
                .value_name("ROOT_DIR")
                .help("Project root that relative paths are resolved against (defaults to current directory)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_parser(clap::value_parser!(String))
                .value_name("CONFIG_FILE")
                .help("JSON configuration file (defaults to sitemap.config.json under the root, if present)"),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_parser(["generate", "merge"])
                .default_value("generate")
                .help("generate rewrites the sitemap from scratch; merge appends listings missing from an existing one"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(clap::value_parser!(String))
                .value_name("OUTPUT_FILE")
                .help("Sitemap path, relative to the root unless absolute"),
        )
        .arg(
            Arg::new("base-url")
                .short('b')
                .long("base-url")
                .value_parser(clap::value_parser!(String))
                .value_name("URL")
                .help("Site origin prepended to every URL, e.g. https://example.com"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::SetTrue)
                .help("Enables verbose output"),
        )
}

/// parse command line arguments
pub fn parse_args() -> Args {
    args_from_matches(&command().get_matches())
}

fn args_from_matches(matches: &ArgMatches) -> Args {
    let root = matches
        .get_one::<String>("root")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|_| {
                print_error("Unable to determine the current directory.");
                std::process::exit(1);
            })
        });

    let mode = match matches.get_one::<String>("mode").map(String::as_str) {
        Some("merge") => Mode::Merge,
        _ => Mode::Generate,
    };

    Args {
        root,
        config: matches.get_one::<String>("config").map(PathBuf::from),
        output: matches.get_one::<String>("output").map(PathBuf::from),
        base_url: matches.get_one::<String>("base-url").cloned(),
        mode,
        verbose: matches.get_flag("verbose"),
    }
}
