//! Pascal VOC annotation parsing.
//!
//! Only the fields the converter needs are read. Everything else in the
//! document (`folder`, `source`, `segmented`, per-object `pose`, ...) is
//! ignored, and the output side fills those fields with defaults.

use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Component, Path};

use crate::error::{Error, Result};
use crate::types::{AnnotationRecord, BoundingBox, ObjectAnnotation};

// `object` may be interleaved with any other child of `annotation`
#[derive(Debug, Deserialize)]
struct RawAnnotation {
    filename: String,
    size: RawSize,
    #[serde(rename = "object", default)]
    objects: Vec<RawObject>,
}

#[derive(Debug, Deserialize)]
struct RawSize {
    width: u32,
    height: u32,
    depth: u32,
}

#[derive(Debug, Deserialize)]
struct RawObject {
    name: String,
    bndbox: RawBndBox,
}

// Coordinates are sometimes written with a fractional part
#[derive(Debug, Deserialize)]
struct RawBndBox {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

/// Parse one annotation file into an [`AnnotationRecord`].
pub fn parse_annotation(path: &Path) -> Result<AnnotationRecord> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    read_annotation(BufReader::new(file), path)
}

/// Parse an annotation from any reader; `path` is only used in errors.
pub fn read_annotation<R: BufRead>(reader: R, path: &Path) -> Result<AnnotationRecord> {
    let raw: RawAnnotation = quick_xml::de::from_reader(reader).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let image_filename = raw.filename.trim().to_string();
    validate_image_filename(&image_filename, path)?;

    let objects = raw
        .objects
        .into_iter()
        .map(|object| {
            let bbox = BoundingBox::new(
                truncate_coord(object.bndbox.xmin, "xmin", path)?,
                truncate_coord(object.bndbox.ymin, "ymin", path)?,
                truncate_coord(object.bndbox.xmax, "xmax", path)?,
                truncate_coord(object.bndbox.ymax, "ymax", path)?,
            );
            Ok(ObjectAnnotation::new(object.name.trim(), bbox))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AnnotationRecord {
        image_filename,
        width: raw.size.width,
        height: raw.size.height,
        depth: raw.size.depth,
        objects,
    })
}

// Fractional coordinates truncate toward zero
fn truncate_coord(value: f64, field: &'static str, path: &Path) -> Result<i64> {
    if !value.is_finite() {
        return Err(Error::InvalidField {
            path: path.to_path_buf(),
            field,
            reason: format!("non-finite coordinate {}", value),
        });
    }
    Ok(value.trunc() as i64)
}

// The filename is joined onto output directories, so it must stay inside them
fn validate_image_filename(image_filename: &str, path: &Path) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidField {
        path: path.to_path_buf(),
        field: "filename",
        reason: reason.to_string(),
    };

    if image_filename.is_empty() {
        return Err(invalid("empty filename"));
    }

    let escapes = Path::new(image_filename)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(invalid("filename must be a relative path inside the image directory"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<annotation>
    <folder>VOC2007</folder>
    <filename>img001.jpg</filename>
    <source>
        <database>The VOC2007 Database</database>
    </source>
    <size>
        <width>100</width>
        <height>80</height>
        <depth>3</depth>
    </size>
    <segmented>0</segmented>
    <object>
        <name>cat</name>
        <pose>Left</pose>
        <truncated>1</truncated>
        <difficult>0</difficult>
        <bndbox>
            <xmin>-5</xmin>
            <ymin>10.7</ymin>
            <xmax>120</xmax>
            <ymax>70</ymax>
        </bndbox>
    </object>
    <object>
        <name>dog</name>
        <bndbox>
            <xmin>1</xmin>
            <ymin>2</ymin>
            <xmax>3</xmax>
            <ymax>4</ymax>
        </bndbox>
    </object>
</annotation>"#;

    fn parse(text: &str) -> Result<AnnotationRecord> {
        read_annotation(text.as_bytes(), Path::new("test.xml"))
    }

    #[test]
    fn test_parse_sample() {
        let record = parse(SAMPLE).unwrap();
        assert_eq!(record.image_filename, "img001.jpg");
        assert_eq!((record.width, record.height, record.depth), (100, 80, 3));
        assert_eq!(record.objects.len(), 2);

        let cat = &record.objects[0];
        assert_eq!(cat.class_label, "cat");
        assert_eq!(cat.bbox, BoundingBox::new(-5, 10, 120, 70));
        // Source pose/truncated are not carried over
        assert_eq!(cat.pose, "Unspecified");
        assert_eq!(cat.truncated, 0);

        assert_eq!(record.objects[1].class_label, "dog");
        assert_eq!(record.objects[1].bbox, BoundingBox::new(1, 2, 3, 4));
    }

    #[test]
    fn test_parse_without_objects() {
        let text = r#"<annotation>
    <filename>empty.jpg</filename>
    <size><width>10</width><height>10</height><depth>3</depth></size>
</annotation>"#;
        let record = parse(text).unwrap();
        assert!(record.objects.is_empty());
    }

    #[test]
    fn test_parse_objects_split_by_other_elements() {
        let text = r#"<annotation>
    <filename>a.jpg</filename>
    <object>
        <name>dog</name>
        <bndbox><xmin>1</xmin><ymin>2</ymin><xmax>3</xmax><ymax>4</ymax></bndbox>
    </object>
    <size><width>10</width><height>10</height><depth>3</depth></size>
    <source><database>VOC</database></source>
    <object>
        <name>cat</name>
        <bndbox><xmin>5</xmin><ymin>6</ymin><xmax>7</xmax><ymax>8</ymax></bndbox>
    </object>
</annotation>"#;
        let record = parse(text).unwrap();
        assert_eq!((record.width, record.height, record.depth), (10, 10, 3));
        let labels: Vec<_> = record.objects.iter().map(|o| o.class_label.as_str()).collect();
        assert_eq!(labels, ["dog", "cat"]);
        assert_eq!(record.objects[1].bbox, BoundingBox::new(5, 6, 7, 8));
    }

    #[test]
    fn test_parse_missing_size_fails() {
        let text = r#"<annotation><filename>a.jpg</filename></annotation>"#;
        assert!(matches!(parse(text), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_parse_malformed_xml_fails() {
        assert!(matches!(
            parse("<annotation><filename>a.jpg</filename>"),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_escaping_filename() {
        let text = r#"<annotation>
    <filename>../../etc/passwd</filename>
    <size><width>10</width><height>10</height><depth>3</depth></size>
</annotation>"#;
        assert!(matches!(
            parse(text),
            Err(Error::InvalidField {
                field: "filename",
                ..
            })
        ));
    }
}
