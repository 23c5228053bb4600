use image::{DynamicImage, GenericImageView, ImageFormat};
use log::debug;
use std::fs;
use std::path::PathBuf;

use crate::counter::ClassInstanceCounter;
use crate::error::{Error, Result};
use crate::types::{class_file_name, BoundingBox, OutputDirs, IMAGE_EXTENSION};

/// Cut the pixels of `bbox` out of `image`: columns `xmin..xmax`, rows
/// `ymin..ymax`.
///
/// An axis with no extent yields a one-pixel strip at the min coordinate,
/// so the result is never empty. Coordinates beyond the decoded image are
/// pulled back inside it, which covers annotations whose declared size
/// disagrees with the actual file.
pub fn extract_crop(image: &DynamicImage, bbox: &BoundingBox) -> DynamicImage {
    let (image_width, image_height) = image.dimensions();
    let x = clamp_origin(bbox.xmin, image_width);
    let y = clamp_origin(bbox.ymin, image_height);
    let width = clamp_extent(bbox.width(), x, image_width);
    let height = clamp_extent(bbox.height(), y, image_height);
    image.crop_imm(x, y, width, height)
}

fn clamp_origin(value: i64, dimension: u32) -> u32 {
    let upper = i64::from(dimension.saturating_sub(1));
    value.clamp(0, upper) as u32
}

fn clamp_extent(extent: i64, origin: u32, dimension: u32) -> u32 {
    let available = i64::from(dimension.saturating_sub(origin)).max(1);
    extent.clamp(1, available) as u32
}

/// Write one crop to `<output>/<class>/<class>_<index>.jpg`.
///
/// The index is drawn from `counter`, keyed by the sanitized class name so
/// that two labels sharing a directory never share a file name.
pub fn save_crop(
    image: &DynamicImage,
    bbox: &BoundingBox,
    class_label: &str,
    output_dirs: &OutputDirs,
    counter: &mut ClassInstanceCounter,
) -> Result<PathBuf> {
    let class_dir = output_dirs.class_dir(class_label);
    fs::create_dir_all(&class_dir).map_err(|e| Error::io(&class_dir, e))?;

    let class_name = class_file_name(class_label);
    let index = counter.next_index(&class_name);
    let crop_path = class_dir.join(format!("{}_{}.{}", class_name, index, IMAGE_EXTENSION));

    let crop = extract_crop(image, bbox).to_rgb8();
    crop.save_with_format(&crop_path, ImageFormat::Jpeg)
        .map_err(|e| Error::image(&crop_path, e))?;

    debug!(
        "Saved {}x{} crop to {}",
        crop.width(),
        crop.height(),
        crop_path.display()
    );
    Ok(crop_path)
}
