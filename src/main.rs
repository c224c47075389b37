use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use media_dupes::cli::{Args, ScanMode};
use media_dupes::error::ScanError;
use media_dupes::grouper;
use media_dupes::matcher;
use media_dupes::normalize::Normalizer;
use media_dupes::report;
use media_dupes::scanner;
use media_dupes::utils::format_file_size;

fn main() -> Result<(), ScanError> {
    let args = Args::parse();

    // Logs and progress bars go to stderr; only the report uses stdout.
    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = scanner::validate_root(&args.root_dir) {
        log::error!("Root path is not a directory: {:?}", args.root_dir);
        return Err(e);
    }

    log::info!("Processing root directory: {:?}", args.root_dir);

    if let Some(num_threads) = args.num_threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
        {
            log::warn!("Failed to configure thread pool: {}", e);
        }
    }

    let normalizer = Normalizer::default();
    let options = args.match_options();
    let key_strategy = args.key_strategy();
    log::info!(
        "Mode: {:?}, threshold: {}, key: {:?}",
        args.mode,
        options.threshold,
        key_strategy
    );

    // Progress bar for file discovery
    let discovery_pb = ProgressBar::new_spinner();
    discovery_pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("Failed to set discovery progress bar template"),
    );
    discovery_pb.set_message("Scanning media entries...");
    discovery_pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let scan = match args.mode {
        ScanMode::Dirs => scanner::scan_directories(&args.root_dir, &normalizer)?,
        ScanMode::Files => {
            let min_size = args.min_file_size.unwrap_or(0);
            if min_size > 0 {
                log::info!("Minimum file size: {}", format_file_size(min_size));
            }
            scanner::scan_files(&args.root_dir, &normalizer, min_size)?
        }
    };
    discovery_pb.finish_with_message(format!("Found {} entries", scan.entries.len()));

    for e in &scan.errors {
        log::warn!("Skipped entry: {}", e);
    }

    let pb = ProgressBar::new(scan.entries.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(concat!(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] ",
                "{pos}/{len} ({eta}) {msg}"
            ))
            .expect("Failed to set progress bar template")
            .progress_chars("#>-"),
    );
    pb.set_message("Comparing titles");

    let pairs = matcher::find_matches_with_progress(&scan.entries, &options, &pb);
    pb.finish_with_message("Comparison complete");

    let groups = grouper::group(&scan.entries, &pairs, key_strategy);
    report::print_groups(&groups);

    if let Some(output) = &args.output {
        report::write_json(&groups, output)?;
        println!("\nDuplicate data written to '{}'", output.display());
    }

    log::info!("--------------------");
    log::info!("Summary:");
    log::info!("Entries scanned: {}", scan.entries.len());
    log::info!("  - Scan errors: {}", scan.errors.len());
    log::info!("  - Matching pairs: {}", pairs.len());
    log::info!("  - Duplicate groups: {}", groups.len());
    log::info!("  - Paths in groups: {}", groups.member_count());
    log::info!("--------------------");

    Ok(())
}
