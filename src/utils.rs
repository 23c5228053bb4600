use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

const ANNOTATION_BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} annotations ({eta}) {msg}";

/// Progress bar over annotation files; the message shows the file in hand.
pub fn annotation_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(ANNOTATION_BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    pb
}

pub fn show_current_file(pb: &ProgressBar, annotation_path: &Path) {
    if let Some(name) = annotation_path.file_name() {
        pb.set_message(name.to_string_lossy().into_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_progress_bar() {
        let pb = annotation_progress_bar(3);
        assert_eq!(pb.length(), Some(3));

        show_current_file(&pb, Path::new("/data/Annotations/img001.xml"));
        assert_eq!(pb.message(), "img001.xml");
        pb.inc(1);
        assert_eq!(pb.position(), 1);
    }
}
