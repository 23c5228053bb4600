use clap::Parser;

/// Crop every annotated object of a Pascal VOC dataset into per-class
/// folders and mirror the images and annotations next to them.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Dataset root containing `Annotations/` and `JPEGImages/`
    #[arg(long = "data_dir", value_name = "DIRECTORY")]
    pub data_dir: String,

    /// Root directory for class crops and the mirrored dataset
    #[arg(long = "output_dir", value_name = "DIRECTORY")]
    pub output_dir: String,
}

/// Show the clamped boxes of a Pascal VOC dataset without writing anything.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct VisualizeArgs {
    /// Dataset root containing `Annotations/` and `JPEGImages/`
    #[arg(long = "data_dir", value_name = "DIRECTORY")]
    pub data_dir: String,

    /// Accepted for parity with the converter's command line; never written to
    #[arg(long = "output_dir", value_name = "DIRECTORY")]
    pub output_dir: Option<String>,

    /// Stop after this many annotation files
    #[arg(long = "limit")]
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_require_both_directories() {
        let args = Args::try_parse_from(["voc_crop", "--data_dir", "in", "--output_dir", "out"])
            .unwrap();
        assert_eq!(args.data_dir, "in");
        assert_eq!(args.output_dir, "out");

        assert!(Args::try_parse_from(["voc_crop", "--data_dir", "in"]).is_err());
        assert!(Args::try_parse_from(["voc_crop", "--output_dir", "out"]).is_err());
    }

    #[test]
    fn test_visualize_args_optional_fields() {
        let args = VisualizeArgs::try_parse_from(["voc_visualize", "--data_dir", "in"]).unwrap();
        assert_eq!(args.output_dir, None);
        assert_eq!(args.limit, None);

        let args =
            VisualizeArgs::try_parse_from(["voc_visualize", "--data_dir", "in", "--limit", "3"])
                .unwrap();
        assert_eq!(args.limit, Some(3));
    }
}
