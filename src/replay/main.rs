//! Session replay tool.
//!
//! Drives a boundary controller from a recorded script of widget events
//! against an in-memory map, then prints the resulting boundary as JSON.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use perimeter::banner::{InstructionBanner, DRAW_HINT, RESIZE_HINT};
use perimeter::config::ControllerConfig;
use perimeter::surface::RecordingSurface;
use perimeter::{Boundary, BoundaryController, BoundaryEvent, ControllerState, GeoBounds};

mod script;
use script::{apply_event, load_script, SessionEvent};

#[derive(Parser, Debug)]
#[command(name = "replay")]
#[command(about = "Replay a boundary editing session against an in-memory map")]
struct Args {
    /// JSON file with the session events
    #[arg(short, long)]
    script: PathBuf,

    /// Controller config (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log every gesture
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct ReplayReport {
    state: ControllerState,
    boundary: Option<Boundary>,
    shapes_on_map: usize,
    map_locked: bool,
    /// Shown and not yet dismissed by a removal. Auto-hide timers are
    /// still pending when the report is taken.
    banner_shown: bool,
    search_bounds: Option<GeoBounds>,
    rejected: usize,
    events: Vec<BoundaryEvent>,
}

impl ReplayReport {
    fn collect(
        controller: &BoundaryController<RecordingSurface>,
        banner: &InstructionBanner,
        rejected: usize,
        events: Vec<BoundaryEvent>,
    ) -> Self {
        Self {
            state: controller.state(),
            boundary: controller.boundary().cloned(),
            shapes_on_map: controller.surface().shape_count(),
            map_locked: !controller.surface().gestures_enabled(),
            banner_shown: banner.is_visible(),
            search_bounds: controller.search_bounds(),
            rejected,
            events,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Perimeter session replay");
    info!("Script: {}", args.script.display());

    let config = match &args.config {
        Some(path) => ControllerConfig::load_from_file(path)?,
        None => ControllerConfig::default(),
    };
    let banner_delay = config.banner_delay();
    let events = load_script(&args.script)?;
    info!("Loaded {} events", events.len());

    let mut controller = BoundaryController::new(RecordingSurface::new(), config);

    let banner = InstructionBanner::new();
    let emitted = Rc::new(RefCell::new(Vec::new()));
    {
        let banner = banner.clone();
        let emitted = Rc::clone(&emitted);
        controller.on_change(move |event| {
            match event {
                BoundaryEvent::Created(_) => {
                    info!("Banner: {}", RESIZE_HINT);
                    let _ = banner.show_for(banner_delay);
                }
                BoundaryEvent::Removed(_) => banner.hide(),
                BoundaryEvent::Updated(_) => {}
            }
            emitted.borrow_mut().push(event.clone());
        });
    }

    let mut rejected = 0;
    for (i, event) in events.iter().enumerate() {
        match apply_event(&mut controller, event) {
            Ok(()) if matches!(event, SessionEvent::StartDrawing) => {
                info!("Banner: {}", DRAW_HINT);
                let _ = banner.show_for(banner_delay);
            }
            Ok(()) => {}
            Err(e) => {
                warn!("Event {} ({:?}) rejected: {}", i, event, e);
                rejected += 1;
            }
        }
        info!("After event {}: {}", i, controller.state());
    }

    let report = ReplayReport::collect(&controller, &banner, rejected, emitted.borrow().clone());
    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.map_locked {
        warn!("Script ended while drawing; the map is still gesture-locked");
    }

    Ok(())
}
