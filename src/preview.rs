use std::path::Path;

use rayon::prelude::*;

use crate::error::{GenError, Result};
use crate::field::Field;

// Depth colour scale: bare bed vs. fluid-covered cells.
const DRY: [u8; 4] = [214, 214, 0, 255];
const WET: [u8; 4] = [215, 148, 39, 255];
const SHADOW: [u8; 4] = [40, 40, 40, 255];

/// Smallest edge of the preview in pixels; small meshes are upscaled.
const MIN_EDGE_PX: usize = 512;

#[inline]
fn lerp_color(a: [u8; 4], b: [u8; 4], t: f32) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t).round() as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t).round() as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t).round() as u8,
        255,
    ]
}

/// Free surface seen from above: colour by depth, shade by elevation.
/// Returns `(rgba, width, height)`; north is up.
pub fn render_surface(w_field: &Field<f64>, h_field: &Field<f64>) -> (Vec<u8>, usize, usize) {
    let scale = MIN_EDGE_PX.div_ceil(w_field.w.min(w_field.h).max(1)).max(1);
    let pw = w_field.w * scale;
    let ph = w_field.h * scale;

    let lo = w_field.min();
    let hi = w_field.max();
    let range = (hi - lo).max(1e-12);

    let mut rgba = vec![0u8; pw * ph * 4];
    rgba.par_chunks_mut(pw * 4).enumerate().for_each(|(py, row)| {
        let j = w_field.h - 1 - py / scale;
        for px in 0..pw {
            let i = px / scale;
            let base = if h_field.get(i, j) > 0.0 { WET } else { DRY };
            // Flat surfaces render at full brightness.
            let t = if hi > lo {
                ((w_field.get(i, j) - lo) / range) as f32
            } else {
                1.0
            };
            let color = lerp_color(SHADOW, base, 0.55 + 0.45 * t);
            row[px * 4..px * 4 + 4].copy_from_slice(&color);
        }
    });

    (rgba, pw, ph)
}

pub fn save_preview(path: &Path, w_field: &Field<f64>, h_field: &Field<f64>) -> Result<()> {
    let (rgba, pw, ph) = render_surface(w_field, h_field);
    image::save_buffer(path, &rgba, pw as u32, ph as u32, image::ColorType::Rgba8).map_err(|e| {
        GenError::io(path, std::io::Error::other(e))
    })
}
