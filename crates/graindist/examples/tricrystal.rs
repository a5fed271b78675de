//! Distance maps for a three-grain microstructure.
//!
//! Builds a 32x32x8 tricrystal, computes all three distance classes, and
//! prints a slice of each map together with the run report.
//!
//! Run with `RUST_LOG=debug cargo run --example tricrystal` to see the
//! engine's per-channel logging.

use std::thread;

use graindist::prelude::*;
use graindist_test_utils::fixtures;
use log::info;

fn print_slice(name: &str, dims: Dims, values: &[f32], z: usize) {
    println!("{name} (z = {z}):");
    for y in (0..dims.ny()).step_by(4) {
        let row: Vec<String> = (0..dims.nx())
            .step_by(4)
            .map(|x| {
                let d = values[dims.index(x, y, z)];
                if d == UNRESOLVED {
                    "   .".to_string()
                } else {
                    format!("{d:4.1}")
                }
            })
            .collect();
        println!("  {}", row.join(" "));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let grid = fixtures::tricrystal(32, 8);
    let dims = grid.dims();
    info!("built {}x{}x{} tricrystal", dims.nx(), dims.ny(), dims.nz());

    let config = DistanceMapConfig::builder()
        .all_classes()
        .save_nearest_neighbors(true)
        .build()?;

    let (tx, rx) = crossbeam_channel::unbounded();
    let mapper = DistanceMapper::new(config)?.with_progress(tx);

    let watcher = thread::spawn(move || {
        let mut rounds = 0usize;
        for event in rx {
            match event {
                ProgressEvent::RoundCompleted { .. } => rounds += 1,
                ProgressEvent::ChannelConverged { class, sweeps, .. } => {
                    println!("{class}: converged after {sweeps} sweeps");
                }
                _ => {}
            }
        }
        rounds
    });

    let out = mapper.run(&grid)?;
    drop(mapper);
    let rounds = watcher.join().map_err(|_| "progress watcher panicked")?;

    for class in DistanceClass::ALL {
        if let Some(values) = out.distances(class) {
            print_slice(class.array_name(), dims, values, 0);
        }
    }

    println!("\n{rounds} rounds across all channels");
    for (class, report) in &out.report.channels {
        println!(
            "{class:>16}: {:>6} seeds, {:>6} resolved, max {:.2}",
            out.report.seeds(*class),
            report.resolved,
            report.max_distance
        );
    }
    println!("total {} us", out.report.total_us);
    Ok(())
}
