//! Conversion between image files and floating point grids
//!
//! Grids keep the 8-bit value range (0..=255); nothing is rescaled on load.

use crate::io::error::{ReductionError, Result, file_system, invalid_input};
use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use ndarray::{Array2, Array3, Axis};
use std::path::Path;

fn open(path: &Path) -> Result<image::DynamicImage> {
    image::open(path).map_err(|e| ReductionError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load an image as a `rows × cols × 3` RGB grid
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be read or decoded
pub fn load_image(path: &Path) -> Result<Array3<f64>> {
    let rgb = open(path)?.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    let mut grid = Array3::<f64>::zeros((height, width, 3));

    for (x, y, pixel) in rgb.enumerate_pixels() {
        for (c, &value) in pixel.0.iter().enumerate() {
            if let Some(cell) = grid.get_mut((y as usize, x as usize, c)) {
                *cell = f64::from(value);
            }
        }
    }

    Ok(grid)
}

/// Load an image as a single-channel `rows × cols` map
///
/// Colour files are converted to 8-bit luma first.
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be read or decoded
pub fn load_map(path: &Path) -> Result<Array2<f64>> {
    let luma = open(path)?.to_luma8();
    let (width, height) = (luma.width() as usize, luma.height() as usize);
    let mut grid = Array2::<f64>::zeros((height, width));

    for (x, y, Luma([value])) in luma.enumerate_pixels() {
        if let Some(cell) = grid.get_mut((y as usize, x as usize)) {
            *cell = f64::from(*value);
        }
    }

    Ok(grid)
}

/// Rec. 601 luminance of an RGB grid, or the only channel of a gray one
///
/// # Errors
///
/// Returns `InvalidInput` for grids with neither one nor three channels
pub fn luminance(image: &Array3<f64>) -> Result<Array2<f64>> {
    match image.len_of(Axis(2)) {
        1 => Ok(image.index_axis(Axis(2), 0).to_owned()),
        3 => Ok(image.map_axis(Axis(2), |pixel| {
            pixel
                .iter()
                .zip([0.299, 0.587, 0.114])
                .map(|(&value, weight)| value * weight)
                .sum()
        })),
        channels => Err(invalid_input(&format!(
            "luminance needs 1 or 3 channels, got {channels}"
        ))),
    }
}

fn to_byte(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Save a one- or three-channel grid as an 8-bit image
///
/// Values are rounded and clamped to 0..=255; the format follows the file
/// extension.
///
/// # Errors
///
/// Returns an error if:
/// - The grid has neither one nor three channels or exceeds `u32` dimensions
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn export_image(image: &Array3<f64>, output_path: &Path) -> Result<()> {
    let (height, width, channels) = image.dim();
    let (w, h) = u32::try_from(width)
        .ok()
        .zip(u32::try_from(height).ok())
        .ok_or_else(|| invalid_input(&format!("image {height}x{width} is too large to save")))?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(file_system(parent, "create directory"))?;
    }

    let at = |y: u32, x: u32, c: usize| {
        image
            .get((y as usize, x as usize, c))
            .copied()
            .map_or(0, to_byte)
    };

    let saved = match channels {
        1 => {
            let buffer: GrayImage = ImageBuffer::from_fn(w, h, |x, y| Luma([at(y, x, 0)]));
            buffer.save(output_path)
        }
        3 => {
            let buffer: RgbImage =
                ImageBuffer::from_fn(w, h, |x, y| Rgb([at(y, x, 0), at(y, x, 1), at(y, x, 2)]));
            buffer.save(output_path)
        }
        _ => {
            return Err(invalid_input(&format!(
                "cannot save an image with {channels} channels"
            )));
        }
    };

    saved.map_err(|e| ReductionError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })
}
