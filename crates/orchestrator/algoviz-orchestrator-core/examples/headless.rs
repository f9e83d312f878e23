//! Play one quicksort run headlessly and print a few frames as JSON.
//!
//! cargo run -p algoviz-orchestrator-core --example headless -- "5,3,8,1"

use serde_json::to_string_pretty;

use algoviz_algo_core::QuickSort;
use algoviz_animation_core::{CoreEvent, LoopMode};
use algoviz_orchestrator::{Visualization, VisualizationConfig};

fn main() -> anyhow::Result<()> {
    let raw = std::env::args().nth(1).unwrap_or_else(|| "5,3,8,1,9,2".into());

    let mut cfg = VisualizationConfig::default();
    cfg.animation.playback.loop_mode = LoopMode::Once;
    let mut viz = Visualization::new(QuickSort, cfg);

    let ticket = viz.set_numbers(&raw)?;
    println!("sorted: {:?}", viz.result());
    println!("scene:\n{}", to_string_pretty(viz.scene())?);
    viz.attach_headless(ticket)?;

    let mut frame = 0usize;
    loop {
        let out = viz.update(1.0 / 30.0);
        for event in &out.events {
            println!("frame {frame}: {}", serde_json::to_string(event)?);
        }
        if frame % 30 == 0 {
            println!("frame {frame} writes: {}", serde_json::to_string(&out.changes)?);
        }
        if out.events.iter().any(|e| matches!(e, CoreEvent::Completed { .. })) {
            break;
        }
        frame += 1;
    }
    Ok(())
}
