//! Mask-based pasting
//!
//! All layer drawing goes through [`paste_masked`]: every destination channel,
//! alpha included, moves toward the source value by the mask's alpha,
//! `out = dst * (255 - m) / 255 + src * m / 255`. Sources may extend past the
//! canvas edge; the overhang is clipped.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

/// Paste `src` at (`x`, `y`) using `mask`'s alpha channel as the paste mask.
///
/// With `color_only`, the source is treated as opaque RGB so only the mask
/// decides coverage.
pub(crate) fn paste_masked(
    canvas: &mut RgbaImage,
    src: &RgbaImage,
    mask: &RgbaImage,
    x: i64,
    y: i64,
    color_only: bool,
) {
    let canvas_width = i64::from(canvas.width());
    let canvas_height = i64::from(canvas.height());

    for (sy, row) in src.rows().enumerate() {
        let dest_y = y + sy as i64;
        if dest_y < 0 {
            continue;
        }
        if dest_y >= canvas_height {
            break;
        }

        for (sx, pixel) in row.enumerate() {
            let dest_x = x + sx as i64;
            if dest_x < 0 {
                continue;
            }
            if dest_x >= canvas_width {
                break;
            }

            let (mx, my) = (sx as u32, sy as u32);
            let m = if mx < mask.width() && my < mask.height() { mask.get_pixel(mx, my)[3] } else { 0 };
            // Fully masked out, skip
            if m == 0 {
                continue;
            }

            let mut src_pixel = *pixel;
            if color_only {
                src_pixel[3] = 255;
            }
            let dst = canvas.get_pixel_mut(dest_x as u32, dest_y as u32);
            *dst = mask_blend(dst, &src_pixel, m);
        }
    }
}

/// Paste a sprite through its own alpha.
pub(crate) fn paste(canvas: &mut RgbaImage, sprite: &RgbaImage, x: i64, y: i64) {
    paste_masked(canvas, sprite, sprite, x, y, false);
}

/// Paste only a sprite's color channels, masked by its own alpha.
pub(crate) fn paste_color(canvas: &mut RgbaImage, sprite: &RgbaImage, x: i64, y: i64) {
    paste_masked(canvas, sprite, sprite, x, y, true);
}

/// Overwrite the covered region with `src`, alpha included.
pub(crate) fn paste_opaque(canvas: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    let canvas_width = i64::from(canvas.width());
    let canvas_height = i64::from(canvas.height());
    for (sx, sy, pixel) in src.enumerate_pixels() {
        let dest_x = x + i64::from(sx);
        let dest_y = y + i64::from(sy);
        if dest_x >= 0 && dest_y >= 0 && dest_x < canvas_width && dest_y < canvas_height {
            canvas.put_pixel(dest_x as u32, dest_y as u32, *pixel);
        }
    }
}

/// Fill a rectangle with one color, clipped to the canvas.
pub(crate) fn fill_rect(canvas: &mut RgbaImage, x: i64, y: i64, width: u32, height: u32, color: Rgba<u8>) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(width)).min(i64::from(canvas.width()));
    let y1 = (y + i64::from(height)).min(i64::from(canvas.height()));
    for py in y0..y1 {
        for px in x0..x1 {
            canvas.put_pixel(px as u32, py as u32, color);
        }
    }
}

/// A copy of `bottom` with `top`'s colors pasted through `top`'s alpha.
pub(crate) fn mix(bottom: &RgbaImage, top: &RgbaImage) -> RgbaImage {
    let mut out = bottom.clone();
    paste_color(&mut out, top, 0, 0);
    out
}

/// Scale every alpha value by `factor`.
pub(crate) fn scale_alpha(image: &RgbaImage, factor: f32) -> RgbaImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        pixel[3] = (f32::from(pixel[3]) * factor).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Fade an image: alpha scaled by `factor`, colors laid over white through the new alpha.
pub(crate) fn fade_over_white(image: &RgbaImage, factor: f32) -> RgbaImage {
    let faded = scale_alpha(image, factor);
    let mut out = RgbaImage::from_pixel(image.width(), image.height(), Rgba([255, 255, 255, 0]));
    paste_masked(&mut out, image, &faded, 0, 0, true);
    out
}

/// Integer upscale with nearest-neighbor sampling.
pub(crate) fn scale_nearest(image: &RgbaImage, factor: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    imageops::resize(image, w * factor, h * factor, FilterType::Nearest)
}

/// Per-channel mask interpolation between destination and source.
pub(crate) fn mask_blend(dst: &Rgba<u8>, src: &Rgba<u8>, mask: u8) -> Rgba<u8> {
    let m = u32::from(mask);
    let inv = 255 - m;
    let channel = |d: u8, s: u8| ((u32::from(d) * inv + u32::from(s) * m + 127) / 255) as u8;
    Rgba([
        channel(dst[0], src[0]),
        channel(dst[1], src[1]),
        channel(dst[2], src[2]),
        channel(dst[3], src[3]),
    ])
}
