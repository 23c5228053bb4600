//! Read-only inspection of a dataset: clamped boxes are drawn onto an
//! in-memory copy of each image and reported through the log.

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::annotation::parse_annotation;
use crate::config::VisualizeArgs;
use crate::error::{Error, Result};
use crate::io::list_annotation_files;
use crate::types::{ObjectAnnotation, SourceDirs};

const BOX_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const LINE_WIDTH: i32 = 2;

/// One inspected image.
#[derive(Debug)]
pub struct RenderedImage {
    pub annotation_path: PathBuf,
    pub objects: Vec<ObjectAnnotation>,
    pub canvas: RgbImage,
}

/// Draw every box onto a copy of `image`. The source image is left as is.
pub fn render_boxes(image: &DynamicImage, objects: &[ObjectAnnotation]) -> RgbImage {
    let mut canvas = image.to_rgb8();
    for object in objects {
        let bbox = &object.bbox;
        let width = bbox.width().max(1) as u32;
        let height = bbox.height().max(1) as u32;
        for t in 0..LINE_WIDTH {
            let inset = 2 * t as u32;
            if width <= inset || height <= inset {
                break;
            }
            let rect = Rect::at(bbox.xmin as i32 + t, bbox.ymin as i32 + t)
                .of_size(width - inset, height - inset);
            draw_hollow_rect_mut(&mut canvas, rect, BOX_COLOR);
        }
    }
    canvas
}

/// Parse, clamp and render one annotation file. `None` when its image is missing.
pub fn inspect_annotation_file(
    source_dirs: &SourceDirs,
    annotation_path: &Path,
) -> Result<Option<RenderedImage>> {
    let source_image = source_dirs.image_for_annotation(annotation_path);
    if !source_image.is_file() {
        warn!("Image file not found: {}", source_image.display());
        return Ok(None);
    }

    let record = parse_annotation(annotation_path)?.clamped();
    let image = image::open(&source_image).map_err(|e| Error::image(&source_image, e))?;
    let canvas = render_boxes(&image, &record.objects);

    Ok(Some(RenderedImage {
        annotation_path: annotation_path.to_path_buf(),
        objects: record.objects,
        canvas,
    }))
}

/// Walk the dataset in the same order as the converter and log every box.
pub fn visualize_dataset(args: &VisualizeArgs) -> Result<usize> {
    let source_dirs = SourceDirs::new(Path::new(&args.data_dir));
    let mut files = list_annotation_files(&source_dirs.annotations_dir)?;
    if let Some(limit) = args.limit {
        files.truncate(limit);
    }

    let mut inspected = 0;
    for annotation_path in &files {
        let Some(rendered) = inspect_annotation_file(&source_dirs, annotation_path)? else {
            continue;
        };
        info!(
            "{} ({}x{}): {} objects",
            rendered.annotation_path.display(),
            rendered.canvas.width(),
            rendered.canvas.height(),
            rendered.objects.len()
        );
        for object in &rendered.objects {
            let b = &object.bbox;
            info!(
                "    {} [{}, {}, {}, {}]",
                object.class_label, b.xmin, b.ymin, b.xmax, b.ymax
            );
        }
        inspected += 1;
    }

    Ok(inspected)
}
