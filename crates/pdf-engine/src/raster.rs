use crate::RgbaImage;
use image::imageops;

/// Dark-mode rendering: flips colour channels, keeps alpha.
pub fn invert_colors(image: &mut RgbaImage) {
    imageops::invert(image);
}

/// Pixel size of a page of `width_pt` x `height_pt` points at `scale`,
/// at least one pixel in each direction. Non-positive scales render at 1:1.
pub fn scaled_size(width_pt: f32, height_pt: f32, scale: f32) -> (u32, u32) {
    let scale = if scale > 0.0 { scale } else { 1.0 };
    let pixels = |points: f32| (points * scale).round().max(1.0) as u32;

    (pixels(width_pt), pixels(height_pt))
}
