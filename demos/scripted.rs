//! Replay a scripted session without hardware.

use deckwatch::backends::virtual_input::ScriptedSource;
use deckwatch::logger;
use deckwatch::{ButtonEvent, EventFilter, Monitor};
use log::LevelFilter;
use std::sync::atomic::AtomicBool;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init(LevelFilter::Debug)?;

    let mut source = ScriptedSource::new("scripted:demo", "Demo Deck");
    source
        .push_held(&[3])
        .push_idle()
        .push_idle() // wake-up
        .push_held(&[1])
        .push_held(&[1, 2])
        .push_held(&[2])
        .push_idle()
        .push_held(&[4, 5]) // two at once: dropped with a warning
        .feed(vec![0u8; 8]); // too short: skipped

    let mut monitor = Monitor::new(source);
    monitor.bus_mut().add_listener(
        |e: &ButtonEvent| println!("(Scripted) {e}"),
        EventFilter::All,
    );

    let summary = monitor.run(&AtomicBool::new(false))?;
    println!("{summary:?}");
    Ok(())
}
