//! Writing rendered images to disk.
//!
//! Plain-text PPM (P3) is the native format. PNG goes through the `image`
//! crate.

use crate::ImageBuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Write the image as ASCII PPM: a `P3` header, then one
/// `r g b` line per pixel, rows top to bottom.
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut writer: W) -> OutputResult<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for [r, g, b] in image.to_rgb8() {
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()?;
    Ok(())
}

/// Save as ASCII PPM.
pub fn save_ppm(image: &ImageBuffer, path: impl AsRef<Path>) -> OutputResult<()> {
    let file = File::create(path)?;
    write_ppm(image, BufWriter::new(file))
}

/// Save as 8-bit PNG.
pub fn save_png(image: &ImageBuffer, path: impl AsRef<Path>) -> OutputResult<()> {
    let raw: Vec<u8> = image.to_rgb8().into_iter().flatten().collect();
    let rgb = image::RgbImage::from_raw(image.width, image.height, raw).ok_or_else(|| {
        OutputError::UnsupportedFormat(format!(
            "{}x{} buffer does not match its pixel data",
            image.width, image.height
        ))
    })?;
    rgb.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Save the image, picking the format from the file extension.
pub fn save_image(image: &ImageBuffer, path: impl AsRef<Path>) -> OutputResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => save_ppm(image, path),
        "png" => save_png(image, path),
        other => Err(OutputError::UnsupportedFormat(if other.is_empty() {
            path.display().to_string()
        } else {
            other.to_string()
        })),
    }
}
