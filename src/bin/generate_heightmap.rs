//! Heightmap generator binary: samples a planet-scale height field to disk.
//!
//! Usage: cargo run --release --bin generate_heightmap -- [OPTIONS]
//!
//! Options:
//!   --seed <SEED>       Random seed (default: 0)
//!   --radius <METERS>   Planet radius in meters (default: 1000)
//!   --height <H>        Height scale; defaults to 2% of the radius
//!   --min <MIN>         Enable the minimum clamp at this value
//!   --octaves <N>       Octave count (default: 12)
//!   --resolution <N>    Latitude rows; longitude gets 2N (default: 512)
//!   --name <NAME>       Output directory name (default: "planet")
//!   --jobs <N>          Max parallel sampling threads (default: 4)
//!
//! Output structure:
//!   assets/heightmaps/<name>/
//!     manifest.json           # Parameters + sample statistics
//!     heightmap.png           # Equirectangular grayscale height preview

use std::path::PathBuf;
use std::time::Instant;

use serde_json::json;

use heightfield::fractal::{FractalParams, FractalSource};
use heightfield::sampling::sample_sphere;
use heightfield::source::HeightSource;

fn main() {
    heightfield::core::logging::init_timestamped();

    let args: Vec<String> = std::env::args().collect();
    let seed = parse_i32_arg(&args, "--seed").unwrap_or(0);
    let radius = parse_f32_arg(&args, "--radius").unwrap_or(1000.0);
    let height_scale = parse_f32_arg(&args, "--height").unwrap_or(radius * 0.02);
    let min = parse_f32_arg(&args, "--min");
    let octaves = parse_u32_arg(&args, "--octaves").unwrap_or(12);
    let resolution = parse_usize_arg(&args, "--resolution").unwrap_or(512);
    let name = parse_str_arg(&args, "--name").unwrap_or_else(|| "planet".to_string());
    let jobs = parse_usize_arg(&args, "--jobs").unwrap_or(4);

    rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build_global()
        .expect("Failed to configure thread pool");

    let output_dir = PathBuf::from(format!("assets/heightmaps/{}", name));

    println!("=== Heightmap Generator ===");
    println!("Name:   {}", name);
    println!("Seed:   {}", seed);
    println!("Radius: {}m, height scale {}m", radius, height_scale);
    println!("Grid:   {} x {} samples", resolution * 2, resolution);
    println!("Jobs:   {} parallel", jobs);
    println!("Output: {}", output_dir.display());
    println!();

    let params = FractalParams {
        seed,
        octaves,
        height_scale,
        min_height: min,
        ..Default::default()
    };
    let source = FractalSource::new(params.clone()).expect("Invalid noise parameters");

    let start = Instant::now();
    let map = sample_sphere(&source, radius, resolution);
    let elapsed = start.elapsed();

    let samples = map.width() * map.height();
    println!("Sampled {} positions in {:.2}s ({:.0} samples/sec)",
        samples, elapsed.as_secs_f64(),
        samples as f64 / elapsed.as_secs_f64());
    println!("Height range: {:.2}m .. {:.2}m (mean {:.2}m, envelope {:.2}m)",
        map.min(), map.max(), map.mean(),
        source.max_amplitude() * source.height_scale());

    std::fs::create_dir_all(&output_dir).expect("Failed to create output directory");

    let png_path = output_dir.join("heightmap.png");
    map.write_png(&png_path).expect("Failed to write heightmap image");

    let manifest = json!({
        "name": name,
        "radius": radius,
        "resolution": {
            "width": map.width(),
            "height": map.height(),
        },
        "params": params,
        "stats": {
            "min": map.min(),
            "max": map.max(),
            "mean": map.mean(),
        },
    });
    let manifest_path = output_dir.join("manifest.json");
    std::fs::write(&manifest_path, serde_json::to_string_pretty(&manifest).unwrap())
        .expect("Failed to write manifest");

    println!();
    println!("=== Generation Complete ===");
    println!("Image:    {}", png_path.display());
    println!("Manifest: {}", manifest_path.display());
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_i32_arg(args: &[String], flag: &str) -> Option<i32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.clone())
}
