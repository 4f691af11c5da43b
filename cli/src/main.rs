use curtain_core::CurtainConfig;
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

mod cli;
mod demo;
mod error;
mod logger;

use error::CurtainResult;

fn main() -> CurtainResult<()> {
    let args = cli::parse_args();
    logger::init_logger(args.quiet, args.verbose)?;

    info!("Starting Curtain {}", curtain_core::version());

    let config = if args.use_defaults {
        CurtainConfig::default()
    } else {
        CurtainConfig::load(args.config_path.as_deref(), true)?
    };

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();

    // Ctrl+C ends the operation early; the overlay is still released
    ctrlc::set_handler(move || {
        println!("\nReceived Ctrl+C, shutting down...");
        shutdown_clone.store(true, Ordering::SeqCst);
    })?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, demo::run(&args, config, shutdown))?;

    info!("Curtain stopped");
    Ok(())
}
