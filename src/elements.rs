//! Image helpers for the PDF renderer.
//!
//! Images are decoded with the [`image`] crate so that unreadable files produce
//! descriptive errors, then scaled to the width requested by the content model.

use std::path::Path;

use image::GenericImageView;

use genpdf::elements::Image;
use genpdf::error::{Context as _, Error};
use genpdf::{Alignment, Mm, Scale, Size};

use crate::model::{ImageBlock, ImageSource};

const DEFAULT_IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;

pub(crate) fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

pub(crate) fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

fn estimated_image_size(image: &image::DynamicImage, dpi: f64) -> Size {
    let (px_width, px_height) = image.dimensions();
    let width_mm = MM_PER_INCH * (px_width as f64) / dpi;
    let height_mm = MM_PER_INCH * (px_height as f64) / dpi;
    Size::new(mm_from_f64(width_mm), mm_from_f64(height_mm))
}

/// Loads an image from in-memory bytes using the [`image`] crate with descriptive errors.
pub fn decode_image_from_bytes(bytes: impl AsRef<[u8]>) -> Result<image::DynamicImage, Error> {
    image::load_from_memory(bytes.as_ref()).context("Failed to decode image from provided bytes")
}

/// Loads an image from the given path using the [`image`] crate with descriptive errors.
pub fn decode_image_from_path(path: impl AsRef<Path>) -> Result<image::DynamicImage, Error> {
    let path = path.as_ref();
    let reader = image::io::Reader::open(path)
        .with_context(|| format!("Failed to open image file {}", path.display()))?;
    reader
        .with_guessed_format()
        .context("Unable to determine image format")?
        .decode()
        .with_context(|| format!("Failed to decode image file {}", path.display()))
}

fn decode_source(source: &ImageSource) -> Result<image::DynamicImage, Error> {
    match source {
        ImageSource::Bytes(bytes) => decode_image_from_bytes(bytes),
        ImageSource::Path(path) => decode_image_from_path(path),
    }
}

/// Scale factor that brings `natural` to `width_mm`, keeping the aspect ratio.
fn width_scale(natural: Size, width_mm: Option<f64>) -> Scale {
    let natural = mm_to_f64(natural.width);
    match width_mm {
        Some(desired) if natural > f64::EPSILON => {
            let factor = desired / natural;
            Scale::new(factor, factor)
        }
        _ => Scale::new(1.0, 1.0),
    }
}

/// Converts an image block into an aligned and scaled `genpdf` image.
pub fn image_element(block: &ImageBlock, alignment: Alignment) -> Result<Image, Error> {
    let dynamic = decode_source(block.source())?;
    let natural = estimated_image_size(&dynamic, DEFAULT_IMAGE_DPI);
    let mut image = Image::from_dynamic_image(dynamic)?;
    image.set_alignment(alignment);
    image.set_scale(width_scale(natural, block.width_mm()));
    Ok(image)
}
