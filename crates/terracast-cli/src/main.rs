//! Depth renderer: cast one ray per pixel at a heightfield, write the
//! normalized hit distances as a grayscale image.
//!
//! Shading, lighting and scene composition live elsewhere; this binary only
//! exercises the geometric query.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use image::GrayImage;
use log::info;
use terracast_heightfield::{HeightMap, HeightSource, Material};
use terracast_math::{Point3, Vec3};
use terracast_raytrace::{Ray, Raycast};

#[derive(Parser)]
#[command(name = "terracast", version, about = "Render a heightfield depth image")]
struct Args {
    /// Grayscale heightmap image (PNG)
    input: PathBuf,

    /// Output depth image (PNG)
    output: PathBuf,

    /// World extent along X
    #[arg(long, default_value_t = 64.0)]
    width: f64,

    /// Intensity-to-elevation scale
    #[arg(long, default_value_t = 16.0)]
    height: f64,

    /// World extent along Z
    #[arg(long, default_value_t = 64.0)]
    depth: f64,

    /// Output resolution (square, pixels)
    #[arg(long, default_value_t = 512)]
    resolution: u32,
}

/// A decoded grayscale image as a height-sample source.
struct ImageSource {
    image: GrayImage,
}

impl HeightSource for ImageSource {
    fn sample_rows(&self) -> usize {
        self.image.height() as usize
    }

    fn sample_cols(&self) -> usize {
        self.image.width() as usize
    }

    fn intensity_at(&self, row: usize, col: usize) -> f64 {
        f64::from(self.image.get_pixel(col as u32, row as u32)[0]) / 255.0
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let image = image::open(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?
        .to_luma8();
    let source = ImageSource { image };
    let map = HeightMap::new(
        &source,
        Point3::origin(),
        args.width,
        args.height,
        args.depth,
        Material::new(0),
    )?;
    info!(
        "heightfield: {}x{} cells over {}x{} world units",
        map.rows(),
        map.cols(),
        map.width(),
        map.depth()
    );

    let start = Instant::now();
    let res = args.resolution;
    let eye_y = map.aabb().max.y + args.height;
    let mut depths: Vec<Option<f64>> = Vec::with_capacity((res * res) as usize);
    let mut t_min = f64::INFINITY;
    let mut t_max = f64::NEG_INFINITY;
    for pz in 0..res {
        for px in 0..res {
            let x = (f64::from(px) + 0.5) / f64::from(res) * args.width;
            let z = (f64::from(pz) + 0.5) / f64::from(res) * args.depth;
            let ray = Ray::new(Point3::new(x, eye_y, z), Vec3::new(0.0, -1.0, 0.0));
            let t = map.find_intersection(&ray).map(|hit| hit.t);
            if let Some(t) = t {
                t_min = t_min.min(t);
                t_max = t_max.max(t);
            }
            depths.push(t);
        }
    }
    let hits = depths.iter().flatten().count();
    info!(
        "cast {} rays, {} hits, in {:?}",
        depths.len(),
        hits,
        start.elapsed()
    );

    // Near surfaces bright, far ones dark, background black
    let range = (t_max - t_min).max(f64::EPSILON);
    let mut out = GrayImage::new(res, res);
    for (i, t) in depths.iter().enumerate() {
        let value = match t {
            Some(t) => {
                let shade = 1.0 - (t - t_min) / range;
                (shade * 254.0) as u8 + 1
            }
            None => 0,
        };
        out.put_pixel(i as u32 % res, i as u32 / res, image::Luma([value]));
    }
    out.save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    Ok(())
}
