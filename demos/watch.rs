//! Watch a Stream Deck and print decoded events.
//!
//! ```text
//! cargo run --example watch -- [config.toml] [--json]
//! ```
//!
//! Press Enter to stop. The flag is checked between reads, so shutdown waits
//! for at most one `read_timeout_ms`.

use deckwatch::backends::hid::HidReportSource;
use deckwatch::logger::{self, EventLogger};
use deckwatch::{Config, EventFilter, Monitor};
use hidapi::HidApi;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let config = match args.iter().find(|a| !a.starts_with("--")) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    logger::init(config.level_filter()?)?;

    let api = HidApi::new()?;
    let source = HidReportSource::open(&api, &config)?;

    let mut monitor = Monitor::new(source);
    let listener = if json { EventLogger::json() } else { EventLogger::new() };
    monitor.bus_mut().add_listener(listener, EventFilter::All);

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        std::thread::spawn(move || {
            let mut line = String::new();
            let _ = std::io::stdin().read_line(&mut line);
            stop.store(true, Ordering::Relaxed);
        });
    }

    let summary = monitor.run(&stop)?;
    println!("{summary:?}");
    Ok(())
}
