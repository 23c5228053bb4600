use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::annotation::parse_annotation;
use crate::counter::ClassInstanceCounter;
use crate::crop::save_crop;
use crate::error::{Error, Result};
use crate::mirror::mirror_image;
use crate::types::{OutputDirs, ProcessingStats, SourceDirs};
use crate::writer::{AnnotationSerializer, VocXmlWriter};

/// What happened to one annotation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Converted { crops: Vec<PathBuf> },
    SkippedMissingImage { image_path: PathBuf },
}

/// Run state shared by every annotation file of one conversion.
pub struct Converter {
    pub source_dirs: SourceDirs,
    pub output_dirs: OutputDirs,
    pub counter: ClassInstanceCounter,
    pub stats: ProcessingStats,
    serializer: Box<dyn AnnotationSerializer>,
}

impl Converter {
    pub fn new(data_dir: &Path, output_dir: &Path) -> Self {
        Self::with_serializer(data_dir, output_dir, Box::new(VocXmlWriter::new()))
    }

    pub fn with_serializer(
        data_dir: &Path,
        output_dir: &Path,
        serializer: Box<dyn AnnotationSerializer>,
    ) -> Self {
        Self {
            source_dirs: SourceDirs::new(data_dir),
            output_dirs: OutputDirs::new(output_dir),
            counter: ClassInstanceCounter::new(),
            stats: ProcessingStats::new(),
            serializer,
        }
    }

    /// Crop every object of one annotation file and mirror its image.
    ///
    /// A missing image is reported as [`FileOutcome::SkippedMissingImage`]
    /// before the annotation is even parsed; every other failure is an error.
    pub fn process_annotation_file(&mut self, annotation_path: &Path) -> Result<FileOutcome> {
        self.stats.total_files_processed += 1;

        let source_image = self.source_dirs.image_for_annotation(annotation_path);
        if !source_image.is_file() {
            warn!("Image file not found, skipping: {}", source_image.display());
            self.stats.skipped_missing_image += 1;
            return Ok(FileOutcome::SkippedMissingImage {
                image_path: source_image,
            });
        }

        let record = parse_annotation(annotation_path)?.clamped();
        let image = image::open(&source_image).map_err(|e| Error::image(&source_image, e))?;

        let mut crops = Vec::with_capacity(record.objects.len());
        for object in &record.objects {
            if object.bbox.is_degenerate() {
                debug!(
                    "Degenerate box {:?} for `{}` in {}",
                    object.bbox,
                    object.class_label,
                    annotation_path.display()
                );
                self.stats.degenerate_boxes += 1;
            }
            let crop_path = save_crop(
                &image,
                &object.bbox,
                &object.class_label,
                &self.output_dirs,
                &mut self.counter,
            )?;
            self.stats.record_crop(&object.class_label);
            crops.push(crop_path);
        }

        mirror_image(
            &record,
            &source_image,
            &self.source_dirs,
            &self.output_dirs,
            self.serializer.as_ref(),
        )?;
        self.stats.successful_conversions += 1;

        Ok(FileOutcome::Converted { crops })
    }
}
