//! Equirectangular panorama rendering across a pool of row workers.
//!
//! Rows are handed out over a bounded channel and reassembled in row order,
//! so the parallel render is bit-identical to [`render_panorama_serial`].

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crossbeam_channel::{bounded, unbounded};
use glam::Vec3;
use image::{Rgba, RgbaImage};
use nebula_atmosphere::{ScatteringParams, SkyInscattering, compute_sky_inscattering};

use crate::error::SkyviewError;

/// What to render and how to map radiance to 8-bit color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSettings {
    /// Panorama width in pixels (full 360° of azimuth).
    pub width: u32,
    /// Panorama height in pixels (zenith to nadir).
    pub height: u32,
    /// Exposure applied before tonemapping.
    pub exposure: f32,
}

/// Per-panorama statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderStats {
    /// Pixels whose ray never entered the atmosphere.
    pub discarded: u64,
    /// Mean night factor over the pixels that were shaded.
    pub mean_night: f32,
}

/// A rendered panorama.
pub struct Panorama {
    /// 8-bit RGBA image; discarded pixels are fully transparent.
    pub image: RgbaImage,
    /// Statistics gathered while rendering.
    pub stats: RenderStats,
}

/// Per-row tallies, merged in row order.
#[derive(Clone, Copy, Debug, Default)]
struct RowStats {
    discarded: u64,
    shaded: u64,
    night_sum: f64,
}

/// View direction through the center of pixel `(x, y)`.
///
/// Columns sweep azimuth from +X toward +Z; rows sweep elevation from the
/// zenith down to the nadir.
pub fn pixel_direction(x: u32, y: u32, width: u32, height: u32) -> Vec3 {
    let azimuth = (x as f32 + 0.5) / width as f32 * TAU;
    let elevation = FRAC_PI_2 - (y as f32 + 0.5) / height as f32 * PI;
    Vec3::new(
        elevation.cos() * azimuth.cos(),
        elevation.sin(),
        elevation.cos() * azimuth.sin(),
    )
}

/// Exponential tonemap followed by gamma 2.2; `None` becomes transparent black.
pub fn tonemap(sky: Option<SkyInscattering>, exposure: f32) -> Rgba<u8> {
    match sky {
        Some(sky) => {
            let mapped = (Vec3::ONE - (-sky.color * exposure).exp())
                .clamp(Vec3::ZERO, Vec3::ONE)
                .powf(1.0 / 2.2)
                * 255.0;
            let [r, g, b] = mapped.round().to_array().map(|c| c as u8);
            Rgba([r, g, b, 255])
        }
        None => Rgba([0, 0, 0, 0]),
    }
}

fn render_row(
    params: &ScatteringParams,
    eye: Vec3,
    light_dir: Vec3,
    settings: &RenderSettings,
    y: u32,
) -> (Vec<Rgba<u8>>, RowStats) {
    let mut stats = RowStats::default();
    let pixels = (0..settings.width)
        .map(|x| {
            let view = pixel_direction(x, y, settings.width, settings.height);
            let sky = compute_sky_inscattering(params, eye, view, light_dir);
            match sky {
                Some(ref s) => {
                    stats.shaded += 1;
                    stats.night_sum += f64::from(s.night);
                }
                None => stats.discarded += 1,
            }
            tonemap(sky, settings.exposure)
        })
        .collect();
    (pixels, stats)
}

fn assemble(settings: &RenderSettings, rows: Vec<(Vec<Rgba<u8>>, RowStats)>) -> Panorama {
    let mut image = RgbaImage::new(settings.width, settings.height);
    let mut total = RowStats::default();

    for (y, (pixels, stats)) in rows.into_iter().enumerate() {
        for (x, pixel) in pixels.into_iter().enumerate() {
            image.put_pixel(x as u32, y as u32, pixel);
        }
        total.discarded += stats.discarded;
        total.shaded += stats.shaded;
        total.night_sum += stats.night_sum;
    }

    let mean_night = if total.shaded > 0 {
        (total.night_sum / total.shaded as f64) as f32
    } else {
        0.0
    };

    Panorama {
        image,
        stats: RenderStats {
            discarded: total.discarded,
            mean_night,
        },
    }
}

fn check_size(settings: &RenderSettings) -> Result<(), SkyviewError> {
    if settings.width == 0 || settings.height == 0 {
        return Err(SkyviewError::EmptyImage {
            width: settings.width,
            height: settings.height,
        });
    }
    Ok(())
}

/// Render on the calling thread.
pub fn render_panorama_serial(
    params: &ScatteringParams,
    eye: Vec3,
    light_dir: Vec3,
    settings: &RenderSettings,
) -> Result<Panorama, SkyviewError> {
    check_size(settings)?;
    let rows = (0..settings.height)
        .map(|y| render_row(params, eye, light_dir, settings, y))
        .collect();
    Ok(assemble(settings, rows))
}

/// Render across `threads` workers (0 = one per CPU core).
pub fn render_panorama(
    params: &ScatteringParams,
    eye: Vec3,
    light_dir: Vec3,
    settings: &RenderSettings,
    threads: usize,
) -> Result<Panorama, SkyviewError> {
    check_size(settings)?;
    let threads = match threads {
        0 => num_cpus::get(),
        n => n,
    }
    .clamp(1, settings.height as usize);

    let (task_sender, task_receiver) = bounded::<u32>(threads * 2);
    let (result_sender, result_receiver) = unbounded();

    std::thread::scope(|scope| -> Result<(), SkyviewError> {
        for _ in 0..threads {
            let receiver = task_receiver.clone();
            let sender = result_sender.clone();

            std::thread::Builder::new()
                .name("sky-row-worker".into())
                .spawn_scoped(scope, move || {
                    while let Ok(y) = receiver.recv() {
                        let row = render_row(params, eye, light_dir, settings, y);
                        if sender.send((y, row)).is_err() {
                            break;
                        }
                    }
                })
                .map_err(SkyviewError::Spawn)?;
        }
        drop(result_sender);

        for y in 0..settings.height {
            // Workers only stop once the task channel closes.
            if task_sender.send(y).is_err() {
                break;
            }
        }
        drop(task_sender);
        Ok(())
    })?;

    let mut rows: Vec<Option<(Vec<Rgba<u8>>, RowStats)>> = vec![None; settings.height as usize];
    for (y, row) in result_receiver.try_iter() {
        rows[y as usize] = Some(row);
    }
    let rows = rows.into_iter().flatten().collect::<Vec<_>>();
    tracing::debug!(threads, rows = rows.len(), "panorama rows rendered");

    Ok(assemble(settings, rows))
}
