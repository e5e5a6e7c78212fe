//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler,
//! bootstraps directories, scans the source and runs the interactive session.

use anyhow::{Context, Result};
use std::io;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use image_sort::cli::Args;
use image_sort::config::{create_template_config, load_config_from_xml, validate_and_normalize};
use image_sort::fs_ops::{DryRunMover, FileMover, RenameMover, scan_images};
use image_sort::output::{self as out, Painter};
use image_sort::session::run_session;
use image_sort::{ArgumentError, Config, DirectoryError, TriageEngine, default_config_path, shutdown};

use crate::logging::init_tracing;

/// 128 + SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config / --init-config before logging init
    if args.print_config {
        let p = default_config_path()?;
        out::print_info(&format!("image_sort config path:\n  {}\n", p.display()));
        if p.exists() {
            out::print_info("A config file already exists at that location.");
        } else {
            out::print_info("No config file exists there yet. Run with --init-config to create a template.");
        }
        return Ok(());
    }
    if args.init_config {
        let p = default_config_path()?;
        create_template_config(&p)?;
        out::print_success(&format!("A template image_sort config was written to: {}", p.display()));
        return Ok(());
    }

    // Build config: defaults < XML file < CLI flags.
    let mut cfg = Config::default();
    if let Some(settings) = load_config_from_xml()? {
        settings.apply_to(&mut cfg);
    }
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json)
        .context("Failed to initialize logging")?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take(); // drop guard here to flush tracing_appender
            }
            if shutdown::is_busy() {
                out::print_warn("Received interrupt; finishing the current step and stopping...");
            } else {
                out::print_warn("Received interrupt; exiting.");
                std::process::exit(EXIT_INTERRUPTED);
            }
        })
        .context("failed to install signal handler")?;
    }

    debug!("Starting image_sort: {:?}", args);

    let result = triage(&mut cfg).inspect_err(log_startup_error);

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn triage(cfg: &mut Config) -> Result<()> {
    let targets = validate_and_normalize(cfg)?;
    let images = scan_images(&cfg.source_dir, cfg.max_images)?;
    if images.is_empty() {
        out::print_info(&format!("No images found in '{}'", cfg.source_dir.display()));
        return Ok(());
    }
    out::print_info(&format!("Found {} images", images.len()));

    let mover: Box<dyn FileMover> = if cfg.dry_run {
        out::print_warn("Dry-run: no files will be moved.");
        Box::new(DryRunMover)
    } else {
        Box::new(RenameMover)
    };
    let mut engine = TriageEngine::new(images, targets, cfg.history_capacity, mover);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    let summary = run_session(&mut engine, stdin.lock(), &mut stdout, Painter::detect())
        .context("terminal I/O failed")?;

    info!(
        left = summary.left,
        right = summary.right,
        skipped = summary.skipped,
        undone = summary.undone,
        errors = summary.errors,
        processed = summary.processed,
        total = summary.total,
        "Session finished"
    );
    out::print_success(&format!(
        "{} moved left, {} moved right, {} skipped, {} undone ({}/{} reviewed)",
        summary.left, summary.right, summary.skipped, summary.undone, summary.processed, summary.total
    ));
    Ok(())
}

fn log_startup_error(e: &anyhow::Error) {
    if let Some(arg) = e.downcast_ref::<ArgumentError>() {
        error!(kind = "argument", error = %arg, "Invalid arguments");
    } else if let Some(dir) = e.downcast_ref::<DirectoryError>() {
        error!(kind = "directory", error = %dir, "Directory setup failed");
    } else {
        error!(error = ?e, "Startup failed");
    }
}
