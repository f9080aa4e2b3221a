//! # Headless Field
//!
//! Runs a field without a window and prints a few particles every second of
//! simulated time, with a custom three-color palette and recoloring on
//! respawn.
//!
//! Run with: `cargo run --example headless`

use backdrop::prelude::*;

const FRAMES_PER_SECOND: u64 = 60;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let palette = Palette::new(vec![
        PaletteEntry::new(Vec3::new(0.9, 0.9, 0.9), 0.6),
        PaletteEntry::new(Vec3::new(0.4, 0.7, 1.0), 0.3),
        PaletteEntry::new(Vec3::new(1.0, 0.5, 0.3), 0.1),
    ]);

    let config = FieldConfig::default()
        .with_count(12)
        .with_palette(palette)
        .with_recolor_on_reset(true);

    let mut field = ParticleField::seeded(config, 2024)?;

    for second in 0..10 {
        let mut respawned = 0;
        for frame in 0..FRAMES_PER_SECOND {
            // Pretend the page scrolls down steadily.
            let scroll = (second * FRAMES_PER_SECOND + frame) as f32 * 3.0;
            respawned += field.tick(scroll).respawned;
        }

        println!(
            "t={:>2}s offset={:+.3} respawned={}",
            second + 1,
            field.vertical_offset(),
            respawned
        );
        for (slot, s) in field.snapshots().take(3).enumerate() {
            println!(
                "    #{} pos=({:+.2}, {:+.2}, {:+.2}) radius={:.4} color={}",
                slot,
                s.position.x,
                s.position.y,
                s.position.z,
                s.visual_radius(),
                s.color.0
            );
        }
    }

    Ok(())
}
