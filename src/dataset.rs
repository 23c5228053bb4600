use log::info;
use std::path::Path;

use crate::config::Args;
use crate::conversion::Converter;
use crate::error::{Error, Result};
use crate::io::{is_same_location, list_annotation_files};
use crate::utils::{annotation_progress_bar, show_current_file};

/// Main dataset processing pipeline.
///
/// Annotation files are handled one at a time in sorted order. The first
/// fatal error stops the run; files already written stay on disk. An output
/// directory that resolves to the data directory is refused up front, since
/// mirroring would overwrite the source files.
pub fn process_dataset(args: &Args) -> Result<Converter> {
    let data_dir = Path::new(&args.data_dir);
    let output_dir = Path::new(&args.output_dir);
    if is_same_location(data_dir, output_dir) {
        return Err(Error::SameFile {
            path: output_dir.to_path_buf(),
        });
    }
    let mut converter = Converter::new(data_dir, output_dir);

    let annotation_files = list_annotation_files(&converter.source_dirs.annotations_dir)?;
    info!(
        "Found {} annotation files in {}",
        annotation_files.len(),
        converter.source_dirs.annotations_dir.display()
    );

    let pb = annotation_progress_bar(annotation_files.len() as u64);
    for annotation_path in &annotation_files {
        show_current_file(&pb, annotation_path);
        if let Err(e) = converter.process_annotation_file(annotation_path) {
            pb.abandon();
            return Err(e);
        }
        pb.inc(1);
    }
    pb.finish_with_message("done");

    converter.stats.print_summary();

    Ok(converter)
}
