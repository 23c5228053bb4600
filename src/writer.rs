//! Output annotation description and its Pascal VOC XML rendering.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fmt::Display;
use std::io::{self, Cursor};
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{BoundingBox, ObjectAnnotation, DEFAULT_DATABASE};

/// Everything written into a generated annotation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputAnnotation {
    pub folder: String,
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub database: String,
    pub segmented: u8,
    pub objects: Vec<ObjectAnnotation>,
}

impl OutputAnnotation {
    /// `filename` and `folder` are taken from the last two components of
    /// `image_path`.
    pub fn new(image_path: &Path, width: u32, height: u32, depth: u32) -> Self {
        let filename = image_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let folder = image_path
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            folder,
            filename,
            width,
            height,
            depth,
            database: DEFAULT_DATABASE.to_string(),
            segmented: 0,
            objects: Vec::new(),
        }
    }

    pub fn add_object(&mut self, name: &str, bbox: BoundingBox) {
        self.objects.push(ObjectAnnotation::new(name, bbox));
    }
}

/// Turns an [`OutputAnnotation`] into the text stored on disk.
pub trait AnnotationSerializer {
    fn serialize(&self, annotation: &OutputAnnotation) -> Result<String>;

    /// Extension of the files this serializer produces.
    fn extension(&self) -> &'static str {
        "xml"
    }
}

/// Pascal VOC XML, indented by two spaces.
#[derive(Debug, Default, Clone, Copy)]
pub struct VocXmlWriter;

impl VocXmlWriter {
    pub fn new() -> Self {
        Self
    }
}

impl AnnotationSerializer for VocXmlWriter {
    fn serialize(&self, annotation: &OutputAnnotation) -> Result<String> {
        let fail = |reason: String| Error::Serialize {
            filename: annotation.filename.clone(),
            reason,
        };

        let mut xml = XmlDoc::new();
        render(&mut xml, annotation).map_err(|e| fail(e.to_string()))?;
        let mut text = xml.into_string().map_err(|e| fail(e.to_string()))?;
        text.push('\n');
        Ok(text)
    }
}

fn render(xml: &mut XmlDoc, a: &OutputAnnotation) -> io::Result<()> {
    xml.write(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    xml.start("annotation")?;
    xml.element("folder", &a.folder)?;
    xml.element("filename", &a.filename)?;

    xml.start("source")?;
    xml.element("database", &a.database)?;
    xml.end("source")?;

    xml.start("size")?;
    xml.element("width", a.width)?;
    xml.element("height", a.height)?;
    xml.element("depth", a.depth)?;
    xml.end("size")?;

    xml.element("segmented", a.segmented)?;

    for object in &a.objects {
        xml.start("object")?;
        xml.element("name", &object.class_label)?;
        xml.element("pose", &object.pose)?;
        xml.element("truncated", object.truncated)?;
        xml.element("difficult", object.difficult)?;
        xml.start("bndbox")?;
        xml.element("xmin", object.bbox.xmin)?;
        xml.element("ymin", object.bbox.ymin)?;
        xml.element("xmax", object.bbox.xmax)?;
        xml.element("ymax", object.bbox.ymax)?;
        xml.end("bndbox")?;
        xml.end("object")?;
    }

    xml.end("annotation")
}

struct XmlDoc {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlDoc {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2),
        }
    }

    fn write(&mut self, event: Event<'_>) -> io::Result<()> {
        self.writer.write_event(event)
    }

    fn start(&mut self, name: &str) -> io::Result<()> {
        self.write(Event::Start(BytesStart::new(name)))
    }

    fn end(&mut self, name: &str) -> io::Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn element(&mut self, name: &str, value: impl Display) -> io::Result<()> {
        let value = value.to_string();
        self.start(name)?;
        self.write(Event::Text(BytesText::new(&value)))?;
        self.end(name)
    }

    fn into_string(self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.writer.into_inner().into_inner())
    }
}
