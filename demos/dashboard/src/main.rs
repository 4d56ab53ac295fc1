//! dashboard — real-time console view of the rust_fleet dispatch simulation.
//!
//! Runs the ticker for a fixed number of wall-clock seconds, prints one status
//! line per tick from a snapshot subscription, selects the first busy driver
//! and optimises its route, then prints a final fleet table.
//!
//! ```text
//! dashboard [--config fleet.json] [--seconds 20] [--interval-ms 250] [--output DIR]
//! ```
//!
//! `RUST_LOG=debug` shows every dispatch transition and route change.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use parking_lot::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fleet_core::FleetConfig;
use fleet_output::{CsvWriter, FleetOutputObserver};
use fleet_sim::{FleetHandle, FleetSnapshot, NoopObserver, SimBuilder};

// ── Defaults ──────────────────────────────────────────────────────────────────

const DEFAULT_SECONDS:       u64 = 20;
const DEFAULT_INTERVAL_MS:   u64 = 250;
const ORDER_INTERVAL_TICKS:  u64 = 12; // keep idle drivers busy

// ── Arguments ─────────────────────────────────────────────────────────────────

struct Args {
    config:   Option<PathBuf>,
    seconds:  u64,
    interval: Duration,
    output:   Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config:   None,
        seconds:  DEFAULT_SECONDS,
        interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
        output:   None,
    };

    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        let mut value = || it.next().with_context(|| format!("{flag} needs a value"));
        match flag.as_str() {
            "--config" => args.config = Some(PathBuf::from(value()?)),
            "--seconds" => args.seconds = value()?.parse().context("--seconds")?,
            "--interval-ms" => {
                args.interval = Duration::from_millis(value()?.parse().context("--interval-ms")?)
            }
            "--output" => args.output = Some(PathBuf::from(value()?)),
            other => bail!("unknown argument {other:?}"),
        }
    }
    Ok(args)
}

fn load_config(path: Option<&PathBuf>) -> Result<FleetConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
        }
        None => Ok(FleetConfig {
            order_interval_ticks: ORDER_INTERVAL_TICKS,
            ..FleetConfig::default()
        }),
    }
}

// ── Printing ──────────────────────────────────────────────────────────────────

fn print_status(snap: &FleetSnapshot) {
    let s = &snap.stats;
    println!(
        "{:>6}  active {:>2}/{:<2} idle {:>2}  delivered {:>3}/{:<3} pending {:>2}",
        snap.tick.to_string(),
        s.active_drivers,
        s.total_drivers,
        s.idle_drivers,
        s.completed_deliveries,
        s.total_deliveries,
        s.pending_deliveries,
    );
}

fn print_route(snap: &FleetSnapshot) {
    let Some(route) = snap.selected_route() else {
        return;
    };
    println!();
    println!(
        "Route {} for {} ({:.0} m, {:.0} s{})",
        route.id,
        route.driver,
        route.distance_m,
        route.duration_secs,
        if route.is_optimized { ", optimised" } else { "" },
    );
    for wp in &route.waypoints {
        println!("  {}. {:<28} {}", wp.order, wp.label, wp.location);
    }
    println!();
}

fn print_fleet(snap: &FleetSnapshot) {
    println!();
    println!(
        "{:<12} {:<8} {:<11} {:<10} {:>9}",
        "Driver", "Vehicle", "Status", "Order", "Completed"
    );
    println!("{}", "-".repeat(54));
    for d in &snap.drivers {
        let order = d
            .current_delivery
            .and_then(|id| snap.delivery(id))
            .map(|o| o.order_number.as_str())
            .unwrap_or("-");
        println!(
            "{:<12} {:<8} {:<11} {:<10} {:>9}",
            d.name,
            d.vehicle.as_str(),
            d.status.as_str(),
            order,
            d.completed_deliveries
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args()?;
    let config = load_config(args.config.as_ref())?;

    println!("=== dashboard — rust_fleet dispatch simulation ===");
    println!(
        "Drivers: {}  |  Orders: {}  |  Seed: {}  |  Dispatch every {} ticks",
        config.driver_count, config.delivery_count, config.seed, config.dispatch_interval_ticks
    );
    println!();

    // 1. Build the simulation and wrap it for real-time ticking.
    let sim = SimBuilder::new(config.clone()).build()?;
    let handle = FleetHandle::new(sim).with_interval(args.interval);
    let updates = handle.subscribe();

    // 2. Optional CSV output, shared with the ticker thread.
    let output = match &args.output {
        Some(dir) => {
            let writer = CsvWriter::new(dir)?;
            Some(Arc::new(Mutex::new(FleetOutputObserver::new(writer, &config))))
        }
        None => None,
    };
    match &output {
        Some(obs) => handle.start_with_observer(Arc::clone(obs))?,
        None => handle.start_with_observer(NoopObserver)?,
    }

    // 3. Follow the live feed.
    let deadline = Instant::now() + Duration::from_secs(args.seconds);
    let mut optimised = false;
    while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
        let Ok(snap) = updates.recv_timeout(remaining) else {
            break;
        };
        print_status(&snap);

        if optimised {
            continue;
        }
        if let Some(driver) = snap.routes.first().map(|r| r.driver) {
            handle.select_driver(Some(driver));
            print_route(&handle.snapshot());
            if handle.optimize_route(driver) {
                print_route(&handle.snapshot());
            }
            optimised = true;
        }
    }

    // 4. Stop and report.
    handle.stop();
    let last = handle.snapshot();
    info!(tick = %last.tick, "dashboard finished");
    print_fleet(&last);

    if let Some(obs) = output {
        if let Some(e) = obs.lock().take_error() {
            eprintln!("output error: {e}");
        } else if let Some(dir) = &args.output {
            println!();
            println!("CSV output written to {}", dir.display());
        }
    }

    Ok(())
}
