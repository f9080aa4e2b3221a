use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use backdrop::viewer::DEFAULT_PAGE_HEIGHT;
use backdrop::{FieldConfig, ParticleField, Viewer};

/// Pixels the scripted headless scroll moves per tick.
const HEADLESS_SCROLL_STEP: f32 = 4.0;

const USAGE: &str = "\
Usage: backdrop [--config PATH] [--seed N] [--page-height PX]
       backdrop --headless TICKS [--config PATH] [--seed N] [--page-height PX]
       backdrop --dump-config";

#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    seed: Option<u64>,
    headless: Option<u64>,
    page_height: Option<f32>,
    dump_config: bool,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut out = Args::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args.next().ok_or("--config needs a path")?;
                    out.config = Some(PathBuf::from(path));
                }
                "--seed" => {
                    let value = args.next().ok_or("--seed needs a number")?;
                    out.seed = Some(value.parse().map_err(|_| format!("invalid seed '{}'", value))?);
                }
                "--headless" => {
                    let value = args.next().ok_or("--headless needs a tick count")?;
                    out.headless =
                        Some(value.parse().map_err(|_| format!("invalid tick count '{}'", value))?);
                }
                "--page-height" => {
                    let value = args.next().ok_or("--page-height needs a pixel count")?;
                    let pixels: f32 =
                        value.parse().map_err(|_| format!("invalid page height '{}'", value))?;
                    if !(pixels.is_finite() && pixels >= 0.0) {
                        return Err(format!("invalid page height '{}'", value));
                    }
                    out.page_height = Some(pixels);
                }
                "--dump-config" => out.dump_config = true,
                other => return Err(format!("unknown argument '{}'", other)),
            }
        }
        Ok(out)
    }
}

/// Scroll position for tick `t`: down the page and back up again.
fn scripted_scroll(t: u64, page_height: f32) -> f32 {
    if page_height <= 0.0 {
        return 0.0;
    }
    let travel = t as f32 * HEADLESS_SCROLL_STEP;
    let period = 2.0 * page_height;
    let phase = travel % period;
    if phase <= page_height {
        phase
    } else {
        period - phase
    }
}

fn run_headless(
    config: FieldConfig,
    seed: Option<u64>,
    ticks: u64,
    page_height: f32,
) -> Result<(), Box<dyn Error>> {
    let mut field = match seed {
        Some(seed) => ParticleField::seeded(config, seed)?,
        None => ParticleField::from_entropy(config)?,
    };

    log::info!("headless run: {} particles, {} ticks", field.len(), ticks);

    let start = Instant::now();
    let mut respawned = 0;
    for t in 0..ticks {
        respawned += field.tick(scripted_scroll(t, page_height)).respawned;
    }
    let elapsed = start.elapsed();

    let (scale_sum, min_mass) = field
        .particles()
        .iter()
        .fold((0.0f32, f32::INFINITY), |(sum, min), p| (sum + p.scale, min.min(p.mass)));
    let mean_scale = if field.is_empty() { 0.0 } else { scale_sum / field.len() as f32 };

    log::info!(
        "done in {:.2?} ({:.1} µs/tick): {} respawns, mean scale {:.3}, min mass {:.4}, offset {:.3}",
        elapsed,
        elapsed.as_secs_f64() * 1e6 / ticks.max(1) as f64,
        respawned,
        mean_scale,
        min_mass,
        field.vertical_offset()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}\n\n{}", msg, USAGE);
            std::process::exit(2);
        }
    };

    if args.dump_config {
        println!("{}", FieldConfig::default().to_json()?);
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => {
            log::info!("loading config from {}", path.display());
            FieldConfig::load(path)?
        }
        None => FieldConfig::default(),
    };

    let page_height = args.page_height.unwrap_or(DEFAULT_PAGE_HEIGHT);
    if let Some(ticks) = args.headless {
        return run_headless(config, args.seed, ticks, page_height);
    }

    let mut viewer = Viewer::new(config).with_page_height(page_height);
    if let Some(seed) = args.seed {
        viewer = viewer.with_seed(seed);
    }
    viewer.run()?;
    Ok(())
}
