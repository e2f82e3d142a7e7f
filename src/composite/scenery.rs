//! Backdrop pre-pass: sky, horizon bands, ground and clouds
//!
//! Purely cosmetic. It never reads the tile index and always runs before the
//! first tile pass.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use rand::seq::SliceRandom;
use rand::Rng;

use super::{blend, Frame};
use crate::assets::Scenery;

/// Horizon sits this far below the vertical center, before the user shift.
const HORIZON_DROP: i64 = 70;
const CLOUD_FADE: f32 = 0.15;
const LOW_CLOUD_FADE: f32 = 0.4;
const LOW_CLOUD_SCALE: u32 = 2;
/// Output pixels of width per high and low cloud.
const HIGH_CLOUD_SPACING: u32 = 80;
const LOW_CLOUD_SPACING: u32 = 50;
/// Clouds may start this far left of the canvas.
const CLOUD_OVERHANG: i64 = 100;
/// Cloud bands as (height above the horizon, vertical spread).
const HIGH_CLOUD_BAND: (i64, i64) = (600, 100);
const LOW_CLOUD_BAND: (i64, i64) = (350, 300);

/// Vertical pixel position of the scenery horizon.
pub(crate) fn horizon(canvas_height: u32, shift: i32) -> i64 {
    i64::from(canvas_height / 2) + HORIZON_DROP + i64::from(shift)
}

pub(super) fn paint(frame: &mut Frame<'_>, scenery: &Scenery, shift: i32) {
    let (width, height) = frame.canvas.dimensions();
    let horizon = horizon(height, shift);

    let sky = imageops::resize(&scenery.sky, width, height, FilterType::Nearest);
    blend::paste_opaque(&mut frame.canvas, &sky, 0, 0);

    for band in &scenery.bands {
        let (band_width, band_height) = band.dimensions();
        if band_width == 0 {
            continue;
        }
        let top = horizon - i64::from(band_height);
        for i in 0..width.div_ceil(band_width) {
            blend::paste(&mut frame.canvas, band, i64::from(i * band_width), top);
        }
    }

    // Ground below the horizon takes the last band's bottom-right color
    if let Some(last) = scenery.bands.last() {
        let (band_width, band_height) = last.dimensions();
        if band_width > 0 && band_height > 0 {
            let ground = *last.get_pixel(band_width - 1, band_height - 1);
            blend::fill_rect(&mut frame.canvas, 0, horizon, width, height.saturating_sub(band_height), ground);
        }
    }

    let high: Vec<RgbaImage> =
        scenery.clouds.iter().map(|cloud| blend::fade_over_white(cloud, CLOUD_FADE)).collect();
    let low: Vec<RgbaImage> = high
        .iter()
        .map(|cloud| blend::scale_alpha(&blend::scale_nearest(cloud, LOW_CLOUD_SCALE), LOW_CLOUD_FADE))
        .collect();

    let span = width + 2 * CLOUD_OVERHANG as u32;
    let mut placed = 0;
    for (clouds, count, (rise, spread)) in [
        (&high, width / HIGH_CLOUD_SPACING, HIGH_CLOUD_BAND),
        (&low, width / LOW_CLOUD_SPACING, LOW_CLOUD_BAND),
    ] {
        for _ in 0..count {
            let rng = frame.rng.rng();
            let Some(cloud) = clouds.choose(rng) else {
                break;
            };
            let x = i64::from(rng.gen_range(0..span)) - CLOUD_OVERHANG;
            let y = horizon + rng.gen_range(0..spread) - rise;
            blend::paste_color(&mut frame.canvas, cloud, x, y);
            placed += 1;
        }
    }

    log::debug!("scenery painted: horizon at {}, {} clouds", horizon, placed);
}
