use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::io::is_same_location;
use crate::types::{AnnotationRecord, OutputDirs, SourceDirs};
use crate::writer::{AnnotationSerializer, OutputAnnotation};

/// Paths written for one mirrored image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirroredFiles {
    pub image_path: PathBuf,
    pub annotation_path: PathBuf,
}

/// Build the output annotation for an already clamped record.
pub fn build_output_annotation(
    record: &AnnotationRecord,
    source_dirs: &SourceDirs,
) -> OutputAnnotation {
    let declared_path = source_dirs.declared_image_path(&record.image_filename);
    let mut annotation =
        OutputAnnotation::new(&declared_path, record.width, record.height, record.depth);
    for object in &record.objects {
        annotation.add_object(&object.class_label, object.bbox);
    }
    annotation
}

/// Copy the source image into `JPEGImages/` and write the regenerated
/// annotation into `Annotations/`, both at the path recorded in `filename`.
///
/// Fails with [`Error::SameFile`] before writing anything when the mirrored
/// image would land on the source image itself.
pub fn mirror_image(
    record: &AnnotationRecord,
    source_image: &Path,
    source_dirs: &SourceDirs,
    output_dirs: &OutputDirs,
    serializer: &dyn AnnotationSerializer,
) -> Result<MirroredFiles> {
    let image_path = output_dirs.mirrored_image_path(&record.image_filename);
    let annotation_path =
        output_dirs.mirrored_annotation_path(&record.image_filename, serializer.extension());

    if is_same_location(source_image, &image_path) {
        return Err(Error::SameFile { path: image_path });
    }

    create_parent(&image_path)?;
    create_parent(&annotation_path)?;

    fs::copy(source_image, &image_path).map_err(|e| Error::io(source_image, e))?;

    let annotation = build_output_annotation(record, source_dirs);
    let content = serializer.serialize(&annotation)?;
    fs::write(&annotation_path, content).map_err(|e| Error::io(&annotation_path, e))?;

    debug!(
        "Mirrored {} -> {}",
        source_image.display(),
        image_path.display()
    );
    Ok(MirroredFiles {
        image_path,
        annotation_path,
    })
}

fn create_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) => fs::create_dir_all(parent).map_err(|e| Error::io(parent, e)),
        None => Ok(()),
    }
}
