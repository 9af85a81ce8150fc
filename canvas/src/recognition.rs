//! Floor-plan recognition: edge extraction and OCR measurement parsing.
//!
//! DESIGN
//! ======
//! The edge pipeline turns an uploaded plan photo into a clean black-on-white
//! line drawing:
//!
//!   grayscale → adaptive threshold (inverted) → morphological close →
//!   gaussian blur → Canny → dilate → invert
//!
//! Each stage is a standalone function over `GrayImage` so stages can be
//! tested in isolation. `process_with_fallback` runs the full pipeline and,
//! if the input is too small for it, degrades to a simple 4-neighbour
//! colour-difference edge detector rather than failing the upload.
//!
//! OCR itself runs out of process; this module consumes the recognised word
//! boxes, filters them to measurement-shaped text, and maps their positions
//! through the same fit transform used to letterbox the image onto the
//! canvas.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

#[cfg(test)]
#[path = "recognition_test.rs"]
mod recognition_test;

use std::sync::LazyLock;

use image::{DynamicImage, GrayImage};
use regex::Regex;
use thiserror::Error;

use crate::camera::Point;
use crate::consts::{
    CANNY_HIGH, CANNY_LOW, FALLBACK_EDGE_THRESHOLD, FIT_MARGIN, THRESHOLD_OFFSET, THRESHOLD_WINDOW,
};
use crate::plan::Measurement;

/// Number of dilate-then-erode rounds in the morphological close.
const CLOSE_ITERATIONS: u32 = 2;

/// Errors from the structured edge pipeline. All are recoverable by the
/// fallback detector.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("image {width}x{height} too small for {stage}")]
    TooSmall { stage: &'static str, width: u32, height: u32 },
}

// =============================================================
// Edge pipeline
// =============================================================

/// Run the full structured pipeline.
///
/// # Errors
///
/// Returns [`RecognitionError::TooSmall`] when either dimension is below the
/// adaptive-threshold window; callers should fall back to
/// [`fallback_edges`].
pub fn process_floorplan(img: &DynamicImage) -> Result<GrayImage, RecognitionError> {
    let gray = img.to_luma8();
    if gray.width() < THRESHOLD_WINDOW || gray.height() < THRESHOLD_WINDOW {
        return Err(RecognitionError::TooSmall {
            stage: "adaptive threshold",
            width: gray.width(),
            height: gray.height(),
        });
    }

    let bin = adaptive_threshold(&gray, THRESHOLD_WINDOW, THRESHOLD_OFFSET);
    let closed = morph_close(&bin, CLOSE_ITERATIONS);
    let blurred = gaussian_blur(&closed);
    let edges = canny(&blurred, CANNY_LOW, CANNY_HIGH);
    let thick = dilate(&edges);
    Ok(invert(&thick))
}

/// Full pipeline with graceful degradation: structured edges when the image
/// is big enough, otherwise the simple colour-difference detector.
#[must_use]
pub fn process_with_fallback(img: &DynamicImage) -> GrayImage {
    match process_floorplan(img) {
        Ok(out) => out,
        Err(RecognitionError::TooSmall { .. }) => {
            fallback_edges(img, FALLBACK_EDGE_THRESHOLD)
        }
    }
}

/// Inverted adaptive threshold: a pixel becomes foreground (255) when it is
/// darker than its local mean by more than `offset`. Dark ink on a light
/// plan comes out white on black.
#[must_use]
pub fn adaptive_threshold(gray: &GrayImage, window: u32, offset: i16) -> GrayImage {
    let (w, h) = (gray.width() as usize, gray.height() as usize);
    let src = gray.as_raw();
    let half = (window / 2) as i64;

    // Summed-area table, one extra row/column of zeros.
    let mut integral = vec![0u64; (w + 1) * (h + 1)];
    for y in 0..h {
        let mut row_sum = 0u64;
        for x in 0..w {
            row_sum += u64::from(src[y * w + x]);
            integral[(y + 1) * (w + 1) + (x + 1)] = integral[y * (w + 1) + (x + 1)] + row_sum;
        }
    }

    let area_sum = |x0: usize, y0: usize, x1: usize, y1: usize| -> u64 {
        integral[y1 * (w + 1) + x1] + integral[y0 * (w + 1) + x0]
            - integral[y0 * (w + 1) + x1]
            - integral[y1 * (w + 1) + x0]
    };

    let mut out = vec![0u8; w * h];
    for y in 0..h {
        let y0 = (y as i64 - half).max(0) as usize;
        let y1 = ((y as i64 + half + 1).min(h as i64)) as usize;
        for x in 0..w {
            let x0 = (x as i64 - half).max(0) as usize;
            let x1 = ((x as i64 + half + 1).min(w as i64)) as usize;
            let count = ((x1 - x0) * (y1 - y0)) as u64;
            let mean = (area_sum(x0, y0, x1, y1) / count.max(1)) as i16;
            let pixel = i16::from(src[y * w + x]);
            out[y * w + x] = if pixel < mean - offset { 255 } else { 0 };
        }
    }
    gray_from_vec(gray.width(), gray.height(), out)
}

/// Morphological close: `iterations` dilations followed by the same number
/// of erosions, 3x3 structuring element. Bridges small gaps in wall strokes.
#[must_use]
pub fn morph_close(bin: &GrayImage, iterations: u32) -> GrayImage {
    let mut img = bin.clone();
    for _ in 0..iterations {
        img = dilate(&img);
    }
    for _ in 0..iterations {
        img = erode(&img);
    }
    img
}

/// 5x5 binomial gaussian blur, applied separably.
#[must_use]
pub fn gaussian_blur(gray: &GrayImage) -> GrayImage {
    const KERNEL: [u32; 5] = [1, 4, 6, 4, 1];
    const KERNEL_SUM: u32 = 16;

    let (w, h) = (gray.width() as i64, gray.height() as i64);
    let src = gray.as_raw();
    let idx = |x: i64, y: i64| (y * w + x) as usize;

    // Horizontal pass.
    let mut tmp = vec![0u8; (w * h) as usize];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0u32;
            for (k, weight) in KERNEL.iter().enumerate() {
                let sx = (x + k as i64 - 2).clamp(0, w - 1);
                acc += weight * u32::from(src[idx(sx, y)]);
            }
            tmp[idx(x, y)] = (acc / KERNEL_SUM) as u8;
        }
    }

    // Vertical pass.
    let mut out = vec![0u8; (w * h) as usize];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0u32;
            for (k, weight) in KERNEL.iter().enumerate() {
                let sy = (y + k as i64 - 2).clamp(0, h - 1);
                acc += weight * u32::from(tmp[idx(x, sy)]);
            }
            out[idx(x, y)] = (acc / KERNEL_SUM) as u8;
        }
    }
    gray_from_vec(gray.width(), gray.height(), out)
}

/// Canny edge detection: Sobel gradients, non-maximum suppression along the
/// quantised gradient direction, then hysteresis from strong seeds through
/// 8-connected weak pixels.
#[must_use]
pub fn canny(gray: &GrayImage, low: f32, high: f32) -> GrayImage {
    let (w, h) = (gray.width() as i64, gray.height() as i64);
    if w < 3 || h < 3 {
        return GrayImage::new(gray.width(), gray.height());
    }
    let src = gray.as_raw();
    let idx = |x: i64, y: i64| (y * w + x) as usize;
    let at = |x: i64, y: i64| f32::from(src[idx(x.clamp(0, w - 1), y.clamp(0, h - 1))]);

    // Sobel gradients.
    let mut mag = vec![0f32; (w * h) as usize];
    let mut dir = vec![0u8; (w * h) as usize];
    for y in 0..h {
        for x in 0..w {
            let gx = -at(x - 1, y - 1) + at(x + 1, y - 1) - 2.0 * at(x - 1, y)
                + 2.0 * at(x + 1, y)
                - at(x - 1, y + 1)
                + at(x + 1, y + 1);
            let gy = -at(x - 1, y - 1) - 2.0 * at(x, y - 1) - at(x + 1, y - 1)
                + at(x - 1, y + 1)
                + 2.0 * at(x, y + 1)
                + at(x + 1, y + 1);
            mag[idx(x, y)] = gx.hypot(gy);
            dir[idx(x, y)] = quantise_direction(gx, gy);
        }
    }

    // Non-maximum suppression: keep a pixel only if it beats both
    // neighbours along its gradient direction.
    let mut thin = vec![0f32; (w * h) as usize];
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let m = mag[idx(x, y)];
            let (dx, dy) = match dir[idx(x, y)] {
                0 => (1, 0),
                1 => (1, -1),
                2 => (0, 1),
                _ => (1, 1),
            };
            if m >= mag[idx(x + dx, y + dy)] && m >= mag[idx(x - dx, y - dy)] {
                thin[idx(x, y)] = m;
            }
        }
    }

    // Hysteresis: strong pixels seed, weak pixels join when 8-connected.
    let mut out = vec![0u8; (w * h) as usize];
    let mut stack = Vec::new();
    for y in 0..h {
        for x in 0..w {
            if thin[idx(x, y)] >= high && out[idx(x, y)] == 0 {
                out[idx(x, y)] = 255;
                stack.push((x, y));
            }
            while let Some((cx, cy)) = stack.pop() {
                for ny in (cy - 1).max(0)..=(cy + 1).min(h - 1) {
                    for nx in (cx - 1).max(0)..=(cx + 1).min(w - 1) {
                        if out[idx(nx, ny)] == 0 && thin[idx(nx, ny)] >= low {
                            out[idx(nx, ny)] = 255;
                            stack.push((nx, ny));
                        }
                    }
                }
            }
        }
    }
    gray_from_vec(gray.width(), gray.height(), out)
}

/// 3x3 max filter.
#[must_use]
pub fn dilate(img: &GrayImage) -> GrayImage {
    morph_3x3(img, true)
}

/// 3x3 min filter.
#[must_use]
pub fn erode(img: &GrayImage) -> GrayImage {
    morph_3x3(img, false)
}

/// Invert: the pipeline works with white-on-black features, the canvas
/// wants dark lines on a light background.
#[must_use]
pub fn invert(img: &GrayImage) -> GrayImage {
    let out = img.as_raw().iter().map(|p| 255 - p).collect();
    gray_from_vec(img.width(), img.height(), out)
}

/// 4-neighbour per-channel colour difference. Marks a pixel as an edge
/// (black) when any channel differs from any direct neighbour by more than
/// `threshold`; everything else stays white. Output matches the structured
/// pipeline's dark-on-light convention.
#[must_use]
pub fn fallback_edges(img: &DynamicImage, threshold: u8) -> GrayImage {
    let rgba = img.to_rgba8();
    let (w, h) = (rgba.width() as i64, rgba.height() as i64);
    let src = rgba.as_raw();
    let px = |x: i64, y: i64| {
        let base = ((y * w + x) * 4) as usize;
        [src[base], src[base + 1], src[base + 2]]
    };

    let mut out = vec![255u8; (w * h) as usize];
    for y in 0..h {
        for x in 0..w {
            let here = px(x, y);
            let neighbours =
                [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)];
            let is_edge = neighbours.iter().any(|&(nx, ny)| {
                if nx < 0 || ny < 0 || nx >= w || ny >= h {
                    return false;
                }
                let there = px(nx, ny);
                here.iter()
                    .zip(there.iter())
                    .any(|(a, b)| a.abs_diff(*b) > threshold)
            });
            if is_edge {
                out[(y * w + x) as usize] = 0;
            }
        }
    }
    gray_from_vec(rgba.width(), rgba.height(), out)
}

/// Accept only the formats the upload contract promises: PNG and JPEG.
#[must_use]
pub fn supported_image(filename: &str) -> bool {
    let lower = filename.to_ascii_lowercase();
    ["png", "jpg", "jpeg"]
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

// =============================================================
// OCR measurements
// =============================================================

/// One recognised word with its bounding box in image pixel coordinates.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OcrWord {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Letterbox transform from image coordinates onto the canvas: uniform
/// scale shrunk by the fit margin, centred both ways.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl FitTransform {
    /// Fit an `image_w` x `image_h` image into a `canvas_w` x `canvas_h`
    /// viewport. Degenerate image dimensions give the identity transform.
    #[must_use]
    pub fn fit(image_w: f64, image_h: f64, canvas_w: f64, canvas_h: f64) -> Self {
        if !(image_w > 0.0 && image_h > 0.0) {
            return Self { scale: 1.0, offset_x: 0.0, offset_y: 0.0 };
        }
        let scale = (canvas_w / image_w).min(canvas_h / image_h) * FIT_MARGIN;
        Self {
            scale,
            offset_x: (canvas_w - image_w * scale) / 2.0,
            offset_y: (canvas_h - image_h * scale) / 2.0,
        }
    }

    #[must_use]
    pub fn apply(&self, x: f64, y: f64) -> Point {
        Point::new(x * self.scale + self.offset_x, y * self.scale + self.offset_y)
    }
}

/// Number followed by a length unit, with optional decimals. Built once;
/// `None` is unreachable for a literal pattern but keeps this infallible.
static MEASUREMENT_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| match Regex::new(r"(?i)\d+(\.\d+)?\s*(m|cm|ft|in|mm)\b") {
        Ok(re) => Some(re),
        Err(_) => None,
    });

/// Filter OCR words down to measurement-shaped text and map each word's
/// box centre onto the canvas through `fit`.
#[must_use]
pub fn extract_measurements(words: &[OcrWord], fit: &FitTransform) -> Vec<Measurement> {
    let Some(re) = MEASUREMENT_RE.as_ref() else {
        return Vec::new();
    };
    words
        .iter()
        .filter(|word| re.is_match(&word.text))
        .map(|word| {
            let center = fit.apply(word.x + word.width / 2.0, word.y + word.height / 2.0);
            Measurement { x: center.x, y: center.y, text: word.text.trim().to_string() }
        })
        .collect()
}

// =============================================================
// Helpers
// =============================================================

fn quantise_direction(gx: f32, gy: f32) -> u8 {
    // Quantise the gradient angle to one of four axes:
    // 0 = horizontal, 1 = 45°, 2 = vertical, 3 = 135°.
    let angle = gy.atan2(gx).to_degrees();
    let angle = if angle < 0.0 { angle + 180.0 } else { angle };
    match angle {
        a if !(22.5..157.5).contains(&a) => 0,
        a if a < 67.5 => 1,
        a if a < 112.5 => 2,
        _ => 3,
    }
}

fn morph_3x3(img: &GrayImage, max: bool) -> GrayImage {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let src = img.as_raw();
    let idx = |x: i64, y: i64| (y * w + x) as usize;

    let mut out = vec![0u8; (w * h) as usize];
    for y in 0..h {
        for x in 0..w {
            let mut acc = if max { 0u8 } else { 255u8 };
            for ny in (y - 1).max(0)..=(y + 1).min(h - 1) {
                for nx in (x - 1).max(0)..=(x + 1).min(w - 1) {
                    let v = src[idx(nx, ny)];
                    acc = if max { acc.max(v) } else { acc.min(v) };
                }
            }
            out[idx(x, y)] = acc;
        }
    }
    gray_from_vec(img.width(), img.height(), out)
}

/// Rebuild a `GrayImage` from a raw buffer. The length always matches, so
/// the empty-image arm never runs in practice.
fn gray_from_vec(width: u32, height: u32, data: Vec<u8>) -> GrayImage {
    GrayImage::from_vec(width, height, data).unwrap_or_else(|| GrayImage::new(width, height))
}
