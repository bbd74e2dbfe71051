//! Startup wiring example
//!
//! Resolves the build mode once, installs the matching sink, then logs
//! through it. A channel transport stands in for the crash-report backend.
//!
//! Run with: cargo run --example startup
//! Or:       FOREST_BUILD_MODE=release cargo run --example startup

use forest_logger::prelude::*;
use forest_logger::{error, info, warn};
use std::sync::Arc;

fn main() -> Result<()> {
    let config = LoggingConfig::from_env()?;
    println!("=== Forest Logger - {} build ===\n", config.mode);

    let (transport, receiver) = ChannelTransport::unbounded();
    let backend = std::thread::spawn(move || {
        for record in receiver.iter() {
            match record.to_json() {
                Ok(line) => println!("[backend] {}", line),
                Err(e) => eprintln!("[backend] unserializable record: {}", e),
            }
        }
    });

    let dispatcher = Dispatcher::new();
    install_for_mode(&dispatcher, &config, Arc::new(transport));

    info!(dispatcher, tag: "Boot", "Application started");
    warn!(dispatcher, "Cache is cold, {} entries to load", 1_024);

    let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "socket closed");
    error!(dispatcher, tag: "Net", err: io_err, "Request timed out");

    dispatcher.flush()?;
    drop(dispatcher);

    if backend.join().is_err() {
        eprintln!("backend thread panicked");
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
