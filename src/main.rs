use std::fs;

use anyhow::{Result, bail};
use clap::Parser;
use log::info;

use minithumb::cli::CliArgs;
use minithumb::size::SizeSpec;
use minithumb::thumb::{ThumbOptions, collect_image_paths, generate_thumbnails, write_manifest};

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because the failure may predate
        // logger initialization
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    info!("minithumb v{}", env!("CARGO_PKG_VERSION"));

    let spec = SizeSpec::parse(&args.size);
    if spec.is_unconstrained() {
        bail!(
            "size descriptor '{}' has no recognized dimensions \
             (expected e.g. 100s, 200w, 100h, 100w50h, or full)",
            args.size
        );
    }

    if !args.output.exists() {
        fs::create_dir_all(&args.output)?;
    }

    let paths = collect_image_paths(&args.input)?;
    info!("Generating {} thumbnails...", paths.len());

    let options = ThumbOptions {
        spec,
        filter: args.filter,
        output_dir: args.output.clone(),
        suffix: args.suffix.clone(),
    };
    let records = generate_thumbnails(&paths, &options)?;
    for record in &records {
        info!("Saved {}", record.output.display());
    }

    if let Some(manifest_path) = &args.manifest {
        write_manifest(&records, manifest_path, &args.size)?;
        info!("Generated {}", manifest_path.display());
    }

    info!("Done!");

    Ok(())
}
