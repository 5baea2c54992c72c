mod args;
mod config;
mod error;
mod io;
mod patcher;
mod scanner;
mod site_map;
mod urls;

use std::process::ExitCode;

use crate::args::parse_args;
use crate::config::{Args, Mode, SiteConfig};
use crate::error::Result;
use crate::io::{print_error, print_info};
use crate::patcher::merge_sitemap;
use crate::site_map::generate_sitemap;

fn main() -> ExitCode {
    let args = parse_args();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    if args.verbose {
        print_info("Verbose mode enabled.");
        print_info(&format!("Root directory: {}", args.root.display()));
    }

    let config = SiteConfig::resolve(args)?;

    if args.verbose {
        print_info(&format!("Base URL: {}", config.base_url));
        print_info(&format!("Sitemap file: {}", config.output.display()));
        print_info(&format!("Properties: {}", config.properties_dir.display()));
        print_info(&format!("Requests: {}", config.requests_dir.display()));
    }

    match args.mode {
        Mode::Generate => {
            let report = generate_sitemap(&config, args.verbose)?;
            println!(
                "Sitemap generated: {} static pages, {} properties, {} requests ({} URLs).",
                report.static_pages, report.properties, report.requests, report.total
            );
            println!("Written to: {}", config.output.display());
        }
        Mode::Merge => {
            let report = merge_sitemap(&config, args.verbose)?;
            if args.verbose {
                print_info(&format!("{} URLs were already present.", report.existing));
            }
            if report.added == 0 {
                println!("Sitemap merged: no new URLs.");
            } else {
                println!("Sitemap merged: {} new URLs added.", report.added);
            }
            println!("Written to: {}", config.output.display());
        }
    }

    Ok(())
}
