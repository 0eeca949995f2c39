use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use timeline_core::{SourceMode, TimelineConfig, TimelineGeometry, TimelineState};

/// Vertical space one entry occupies in the synthetic layout.
const ROW_HEIGHT_PX: f64 = 240.0;

#[derive(Parser, Debug)]
#[command(
    name = "timeline-cli",
    about = "Simulate a scroll sweep over an achievements JSON export."
)]
struct Args {
    /// Path to the achievements JSON file (bare array or REST list object).
    #[arg(short, long)]
    input: PathBuf,
    /// Number of scroll steps between progress 0 and 1.
    #[arg(short, long, default_value_t = 10)]
    steps: u32,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let data = std::fs::read_to_string(&args.input)
        .with_context(|| format!("could not read file {:?}", args.input))?;

    let entries = timeline_cms::entries_from_docs_str(&data)?;
    let config = TimelineConfig::default();

    // Synthetic geometry: markers evenly spaced down a bar sized to the list.
    let bar_total_height = entries.len() as f64 * ROW_HEIGHT_PX;
    let geometry = TimelineGeometry {
        bar_total_height,
        bar_top_offset: 0.0,
        marker_centers: (0..entries.len())
            .map(|index| Some(ROW_HEIGHT_PX / 2.0 + index as f64 * ROW_HEIGHT_PX))
            .collect(),
    };

    let mut state = TimelineState::new(entries.len(), SourceMode::ContainerRelative, config);

    println!("{} entries", entries.len());
    for (index, entry) in entries.iter().enumerate() {
        println!("  [{index}] {}", entry.title);
    }

    for step in 0..=args.steps {
        let progress = f64::from(step) / f64::from(args.steps.max(1));
        state.on_scroll(progress, &geometry);
        let frame = state.frame();

        let fills: Vec<String> = frame
            .fill_levels
            .iter()
            .map(|level| format!("{level:.2}"))
            .collect();
        let visible = frame
            .visible
            .iter()
            .map(|flag| if *flag { 'x' } else { '.' })
            .collect::<String>();

        println!(
            "progress {progress:.2}  fill [{}]  visible [{visible}]",
            fills.join(", ")
        );
    }

    Ok(())
}
