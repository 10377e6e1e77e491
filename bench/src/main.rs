use std::time::{Duration, Instant};

use anyhow::Context as _;
use layermode::{
    CHANNELS, LayerMode, LayerModeOp, LayerModeSettings, Roi, TileThreading, composite_image,
};
use serde_json::json;
use sha2::Digest as _;

#[derive(Clone, Debug)]
struct BenchArgs {
    width: u32,
    height: u32,
    warmup: u32,
    repeats: u32,
    opacity: f32,
    modes: Vec<LayerMode>,
    parallel: bool,
    threads: Option<usize>,
    rows_per_tile: u32,
    masked: bool,
}

struct Inputs {
    backdrop: Vec<f32>,
    source: Vec<f32>,
    mask: Vec<f32>,
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = parse_args()?;

    if args.width == 0 || args.height == 0 {
        anyhow::bail!("--width/--height must be > 0");
    }
    if args.repeats == 0 {
        anyhow::bail!("--repeats must be >= 1");
    }
    if let Some(n) = args.threads
        && n == 0
    {
        anyhow::bail!("--threads must be >= 1 when set");
    }

    let roi = Roi::new(0, 0, args.width, args.height);
    let inputs = build_inputs(roi);
    let threading = TileThreading {
        parallel: args.parallel,
        rows_per_tile: args.rows_per_tile,
        threads: args.threads,
    };

    eprintln!(
        "compositing {}x{} px, {} modes, {} repeats ({})",
        args.width,
        args.height,
        args.modes.len(),
        args.repeats,
        if args.parallel { "parallel" } else { "serial" }
    );

    let mut reports = Vec::with_capacity(args.modes.len());
    for &mode in &args.modes {
        let settings = LayerModeSettings::for_mode(mode).with_opacity(args.opacity);
        let op = LayerModeOp::new(settings).with_context(|| format!("configure {mode}"))?;
        let mask = args.masked.then_some(inputs.mask.as_slice());
        let mut output = vec![0.0; roi.pixel_count() * CHANNELS];

        for _ in 0..args.warmup {
            composite_image(
                &op,
                &inputs.backdrop,
                &inputs.source,
                mask,
                &mut output,
                roi,
                &threading,
            )
            .with_context(|| format!("warm up {mode}"))?;
        }

        let mut runs = Vec::with_capacity(args.repeats as usize);
        for _ in 0..args.repeats {
            let t0 = Instant::now();
            composite_image(
                &op,
                &inputs.backdrop,
                &inputs.source,
                mask,
                &mut output,
                roi,
                &threading,
            )
            .with_context(|| format!("composite {mode}"))?;
            runs.push(t0.elapsed());
        }
        runs.sort();

        let megapixels = roi.pixel_count() as f64 / 1e6;
        let p50 = percentile(&runs, 0.50);
        reports.push(json!({
            "mode": mode.to_string(),
            "kernel": op.kernel().name(),
            "format": op.format(),
            "p50_ms": ms(p50),
            "p90_ms": ms(percentile(&runs, 0.90)),
            "p99_ms": ms(percentile(&runs, 0.99)),
            "mpix_per_s": megapixels / p50.as_secs_f64().max(f64::EPSILON),
            "sha256": sha256_hex(&output),
        }));
    }

    let report = json!({
        "width": args.width,
        "height": args.height,
        "opacity": args.opacity,
        "masked": args.masked,
        "threading": threading,
        "modes": reports,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Smooth, deterministic gradients so digests are stable across runs and machines.
fn build_inputs(roi: Roi) -> Inputs {
    let n = roi.pixel_count();
    let wave =
        |i: usize, phase: f32| ((i as f32 * 0.013 + phase).sin() * 0.5 + 0.5).clamp(0.0, 1.0);
    Inputs {
        backdrop: (0..n * CHANNELS).map(|i| wave(i, 0.0)).collect(),
        source: (0..n * CHANNELS).map(|i| wave(i, 2.1)).collect(),
        mask: (0..n).map(|i| wave(i, 0.7)).collect(),
    }
}

fn sha256_hex(pixels: &[f32]) -> String {
    let mut hasher = sha2::Sha256::new();
    for v in pixels {
        hasher.update(v.to_le_bytes());
    }
    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let n = sorted.len();
    let rank = (p * (n as f64)).ceil().clamp(1.0, n as f64) as usize;
    sorted[rank - 1]
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn parse_args() -> anyhow::Result<BenchArgs> {
    let mut args = std::env::args().skip(1);

    let mut out = BenchArgs {
        width: 1024,
        height: 1024,
        warmup: 2,
        repeats: 20,
        opacity: 0.75,
        modes: vec![
            LayerMode::Normal,
            LayerMode::Multiply,
            LayerMode::Screen,
            LayerMode::LchHue,
            LayerMode::MultiplyLegacy,
            LayerMode::Dissolve,
            LayerMode::Erase,
            LayerMode::Replace,
        ],
        parallel: false,
        threads: None,
        rows_per_tile: 64,
        masked: false,
    };

    while let Some(a) = args.next() {
        match a.as_str() {
            "--width" => out.width = parse_u32(args.next(), "--width")?,
            "--height" => out.height = parse_u32(args.next(), "--height")?,
            "--warmup" => out.warmup = parse_u32(args.next(), "--warmup")?,
            "--repeats" => out.repeats = parse_u32(args.next(), "--repeats")?,
            "--rows-per-tile" => out.rows_per_tile = parse_u32(args.next(), "--rows-per-tile")?,
            "--opacity" => {
                let v = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("missing value for --opacity"))?;
                out.opacity = v
                    .parse::<f32>()
                    .with_context(|| format!("parse --opacity value '{v}'"))?;
            }
            "--modes" => {
                let v = args.next().ok_or_else(|| {
                    anyhow::anyhow!("missing value for --modes (comma-separated or 'all')")
                })?;
                out.modes = parse_modes(&v)?;
            }
            "--mask" => out.masked = true,
            "--parallel" => out.parallel = true,
            "--threads" => out.threads = Some(parse_usize(args.next(), "--threads")?),
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => anyhow::bail!("unknown arg '{a}' (try --help)"),
        }
    }

    Ok(out)
}

fn parse_modes(v: &str) -> anyhow::Result<Vec<LayerMode>> {
    if v == "all" {
        return Ok(LayerMode::ALL.to_vec());
    }
    v.split(',')
        .map(|name| {
            let name = name.trim();
            serde_json::from_value(json!(name))
                .with_context(|| format!("unknown layer mode '{name}'"))
        })
        .collect()
}

fn print_help() {
    eprintln!(
        r#"layermode-bench

Composites a synthetic image with a set of layer modes and prints a JSON report with
p50/p90/p99 timings and an output digest per mode.

Usage:
  cargo run -q --release
  cargo run -q --release -- --modes multiply,dissolve --repeats 50
  cargo run -q --release -- --modes all --parallel --threads 4

Args:
  --width N          (default 1024)
  --height N         (default 1024)
  --warmup N         (default 2)
  --repeats N        (default 20)
  --opacity X        (default 0.75)
  --modes LIST       comma-separated kebab-case mode names, or 'all'
  --mask             composite through a per-pixel mask
  --parallel         composite row bands on a thread pool
  --threads N        worker threads for parallel mode (default auto)
  --rows-per-tile N  rows per band (default 64)
"#
    );
}

fn parse_u32(v: Option<String>, flag: &str) -> anyhow::Result<u32> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<u32>()
        .with_context(|| format!("parse {flag} value '{v}'"))
}

fn parse_usize(v: Option<String>, flag: &str) -> anyhow::Result<usize> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<usize>()
        .with_context(|| format!("parse {flag} value '{v}'"))
}
