use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// Defaults written for metadata that is never read from the source
pub const DEFAULT_POSE: &str = "Unspecified";
pub const DEFAULT_DATABASE: &str = "Unknown";

// Extension of source images and of the generated crops
pub const IMAGE_EXTENSION: &str = "jpg";

pub const ANNOTATIONS_DIR: &str = "Annotations";
pub const IMAGES_DIR: &str = "JPEGImages";

/// Axis-aligned box in integer pixel coordinates.
///
/// Raw boxes may lie partially outside the image; see
/// [`crate::geometry::clamp_bbox`] for the validated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

impl BoundingBox {
    pub fn new(xmin: i64, ymin: i64, xmax: i64, ymax: i64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    pub fn width(&self) -> i64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> i64 {
        self.ymax - self.ymin
    }

    /// True when the box covers no pixels on at least one axis.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}

// One labeled object of an annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectAnnotation {
    pub class_label: String,
    pub bbox: BoundingBox,
    pub pose: String,
    pub truncated: u8,
    pub difficult: u8,
}

impl ObjectAnnotation {
    pub fn new(class_label: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            class_label: class_label.into(),
            bbox,
            pose: DEFAULT_POSE.to_string(),
            truncated: 0,
            difficult: 0,
        }
    }
}

// The annotation information of one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    pub image_filename: String,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub objects: Vec<ObjectAnnotation>,
}

impl AnnotationRecord {
    /// Copy of this record with every box clamped into the image bounds.
    pub fn clamped(&self) -> AnnotationRecord {
        let objects = self
            .objects
            .iter()
            .map(|object| ObjectAnnotation {
                bbox: crate::geometry::clamp_bbox(&object.bbox, self.width, self.height),
                ..object.clone()
            })
            .collect();

        AnnotationRecord {
            objects,
            ..self.clone()
        }
    }
}

/// Input side of a dataset: `<data_dir>/Annotations` and `<data_dir>/JPEGImages`.
#[derive(Debug, Clone)]
pub struct SourceDirs {
    pub annotations_dir: PathBuf,
    pub images_dir: PathBuf,
}

impl SourceDirs {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            annotations_dir: data_dir.join(ANNOTATIONS_DIR),
            images_dir: data_dir.join(IMAGES_DIR),
        }
    }

    /// Image paired with an annotation file: same stem, `.jpg` extension.
    pub fn image_for_annotation(&self, annotation_path: &Path) -> PathBuf {
        let stem = annotation_path.file_stem().unwrap_or_default();
        self.images_dir
            .join(format!("{}.{}", stem.to_string_lossy(), IMAGE_EXTENSION))
    }

    /// Location the annotation's `filename` refers to inside the source tree.
    pub fn declared_image_path(&self, image_filename: &str) -> PathBuf {
        self.images_dir.join(image_filename)
    }
}

/// Class label made safe for use as a directory and file prefix.
pub fn class_file_name(class_label: &str) -> String {
    let name = sanitize_filename::sanitize(class_label);
    if name.is_empty() {
        "unnamed".to_string()
    } else {
        name
    }
}

/// The three parallel output namespaces under one root.
#[derive(Debug, Clone)]
pub struct OutputDirs {
    pub root: PathBuf,
    pub images_dir: PathBuf,
    pub annotations_dir: PathBuf,
}

impl OutputDirs {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            root: output_dir.to_path_buf(),
            images_dir: output_dir.join(IMAGES_DIR),
            annotations_dir: output_dir.join(ANNOTATIONS_DIR),
        }
    }

    pub fn class_dir(&self, class_label: &str) -> PathBuf {
        self.root.join(class_file_name(class_label))
    }

    pub fn mirrored_image_path(&self, image_filename: &str) -> PathBuf {
        self.images_dir.join(image_filename)
    }

    /// `Annotations/<dir of filename>/<stem of filename>.<extension>`
    pub fn mirrored_annotation_path(&self, image_filename: &str, extension: &str) -> PathBuf {
        let relative = Path::new(image_filename);
        let parent = relative.parent().unwrap_or_else(|| Path::new(""));
        let stem = relative.file_stem().unwrap_or_default();
        self.annotations_dir
            .join(parent)
            .join(format!("{}.{}", stem.to_string_lossy(), extension))
    }
}

// Struct to hold processing statistics
#[derive(Debug, Default, Clone)]
pub struct ProcessingStats {
    pub total_files_processed: usize,
    pub successful_conversions: usize,
    pub skipped_missing_image: usize,
    pub crops_written: usize,
    pub degenerate_boxes: usize,
    /// Crops per class label as written in the annotations.
    pub crops_per_class: BTreeMap<String, usize>,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_crop(&mut self, class_label: &str) {
        self.crops_written += 1;
        *self.crops_per_class.entry(class_label.to_string()).or_default() += 1;
    }

    pub fn print_summary(&self) {
        log::info!("=== Processing Summary ===");
        log::info!("Total annotation files: {}", self.total_files_processed);
        log::info!("Converted images: {}", self.successful_conversions);
        log::info!("Crops written: {}", self.crops_written);
        for (class_label, count) in &self.crops_per_class {
            log::info!("    {}: {} crops", class_label, count);
        }

        if self.skipped_missing_image > 0 {
            log::warn!(
                "Skipped (missing image file): {}",
                self.skipped_missing_image
            );
        }
        if self.degenerate_boxes > 0 {
            log::warn!(
                "Boxes collapsed by clamping (written as 1px strips): {}",
                self.degenerate_boxes
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_for_annotation_uses_stem() {
        let source = SourceDirs::new(Path::new("/data"));
        let image = source.image_for_annotation(Path::new("/data/Annotations/img001.xml"));
        assert_eq!(image, PathBuf::from("/data/JPEGImages/img001.jpg"));

        let dotted = source.image_for_annotation(Path::new("/data/Annotations/img.001.xml"));
        assert_eq!(dotted, PathBuf::from("/data/JPEGImages/img.001.jpg"));
    }

    #[test]
    fn test_mirrored_annotation_path_keeps_subdirectories() {
        let output = OutputDirs::new(Path::new("/out"));
        assert_eq!(
            output.mirrored_annotation_path("2007/img001.jpg", "xml"),
            PathBuf::from("/out/Annotations/2007/img001.xml")
        );
        assert_eq!(
            output.mirrored_annotation_path("img.001.jpg", "xml"),
            PathBuf::from("/out/Annotations/img.001.xml")
        );
        assert_eq!(
            output.mirrored_image_path("2007/img001.jpg"),
            PathBuf::from("/out/JPEGImages/2007/img001.jpg")
        );
    }

    #[test]
    fn test_class_dir_is_sanitized() {
        let output = OutputDirs::new(Path::new("/out"));
        assert_eq!(output.class_dir("cat"), PathBuf::from("/out/cat"));
        assert_eq!(output.class_dir("a/b"), PathBuf::from("/out/ab"));
        assert_eq!(output.class_dir("/"), PathBuf::from("/out/unnamed"));
    }

    #[test]
    fn test_record_crop_tallies_by_label() {
        let mut stats = ProcessingStats::new();
        stats.record_crop("a/b");
        stats.record_crop("a/b");
        stats.record_crop("cat");

        assert_eq!(stats.crops_written, 3);
        assert_eq!(stats.crops_per_class.get("a/b"), Some(&2));
        assert_eq!(stats.crops_per_class.get("ab"), None);
    }

    #[test]
    fn test_clamped_leaves_original_untouched() {
        let record = AnnotationRecord {
            image_filename: "img001.jpg".to_string(),
            width: 100,
            height: 80,
            depth: 3,
            objects: vec![ObjectAnnotation::new("cat", BoundingBox::new(-5, 10, 120, 70))],
        };

        let clamped = record.clamped();

        assert_eq!(clamped.objects[0].bbox, BoundingBox::new(0, 10, 99, 70));
        assert_eq!(record.objects[0].bbox, BoundingBox::new(-5, 10, 120, 70));
        assert_eq!(clamped.objects[0].pose, DEFAULT_POSE);
    }
}
