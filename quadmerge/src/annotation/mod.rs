//! Point-annotation model and XML codec.
//!
//! An annotation file describes one capture frame: a `<size>` block with the
//! frame dimensions and channel depth, followed by `<object>` entries. Each
//! object carries a `<point>` with integer `<x>`/`<y>` pixel coordinates
//! plus arbitrary sibling fields (label, pose, metadata) that this module
//! never interprets and must emit unchanged.
//!
//! ```text
//! <annotation>
//!   <size><width>640</width><height>512</height><depth>3</depth></size>
//!   <object>
//!     <name>person</name>
//!     <point><x>101</x><y>285</y></point>
//!   </object>
//!   ...
//! </annotation>
//! ```

pub mod xml;

use thiserror::Error;

use crate::annotation::xml::{XmlElement, XmlError, XmlNode};

/// Channel depth recorded in a merged annotation's size block.
///
/// The merged size block describes the RGB mosaic; the thermal mosaic
/// shares the same annotation file and the same record.
pub const COMBINED_DEPTH: u32 = 3;

/// Errors that can occur while reading or writing annotation sets.
#[derive(Debug, Error)]
pub enum AnnotationError {
    /// The document is not well-formed XML.
    #[error("malformed annotation document: {0}")]
    Xml(#[from] XmlError),

    /// The document's root element is not `<annotation>`.
    #[error("root element is <{0}>, expected <annotation>")]
    UnexpectedRoot(String),

    /// An object lacks its `<point>` substructure.
    #[error("object {object_index}: missing <{field}>")]
    MissingField {
        object_index: usize,
        field: &'static str,
    },

    /// A coordinate field holds something other than an integer.
    #[error("object {object_index}: <{field}> value {value:?} is not an integer")]
    InvalidCoordinate {
        object_index: usize,
        field: &'static str,
        value: String,
    },

    /// The `<size>` block is present but unreadable.
    #[error("invalid <size> block: missing or non-numeric <{0}>")]
    InvalidSize(&'static str),
}

/// A pixel coordinate in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

/// Frame metadata carried by an annotation set's `<size>` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl FrameSize {
    /// Create frame metadata with an explicit depth.
    pub fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Frame metadata for a merged scene. Depth is always
    /// [`COMBINED_DEPTH`] regardless of which raster the set travels with.
    pub fn combined(width: u32, height: u32) -> Self {
        Self::new(width, height, COMBINED_DEPTH)
    }
}

/// One annotated object: a parsed point plus its opaque sibling fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationObject {
    element: XmlElement,
    point: Point,
}

impl AnnotationObject {
    /// Build an object from its `<object>` element.
    ///
    /// `object_index` is only used to attribute errors to a row in the
    /// source document.
    fn from_element(object_index: usize, element: XmlElement) -> Result<Self, AnnotationError> {
        let point_element =
            element
                .child("point")
                .ok_or(AnnotationError::MissingField {
                    object_index,
                    field: "point",
                })?;
        let x = parse_coordinate(object_index, point_element, "point.x", "x")?;
        let y = parse_coordinate(object_index, point_element, "point.y", "y")?;
        Ok(Self {
            element,
            point: Point { x, y },
        })
    }

    /// The object's point in its current frame.
    pub fn point(&self) -> Point {
        self.point
    }

    /// The underlying element, opaque siblings included.
    pub fn element(&self) -> &XmlElement {
        &self.element
    }

    /// Shift the point by the given offsets, rewriting both the parsed
    /// value and the `<x>`/`<y>` text in the underlying element. Sibling
    /// fields are untouched.
    pub fn translate(&mut self, dx: i64, dy: i64) {
        self.point.x += dx;
        self.point.y += dy;
        if let Some(point) = self.element.child_mut("point") {
            if let Some(x) = point.child_mut("x") {
                x.set_text(self.point.x.to_string());
            }
            if let Some(y) = point.child_mut("y") {
                y.set_text(self.point.y.to_string());
            }
        }
    }
}

fn parse_coordinate(
    object_index: usize,
    point: &XmlElement,
    label: &'static str,
    child: &'static str,
) -> Result<i64, AnnotationError> {
    let element = point.child(child).ok_or(AnnotationError::MissingField {
        object_index,
        field: label,
    })?;
    let text = element.text();
    text.trim()
        .parse()
        .map_err(|_| AnnotationError::InvalidCoordinate {
            object_index,
            field: label,
            value: text,
        })
}

/// An ordered collection of point annotations sharing one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationSet {
    frame: Option<FrameSize>,
    objects: Vec<AnnotationObject>,
}

impl AnnotationSet {
    /// Create an empty set with frame metadata.
    pub fn new(frame: FrameSize) -> Self {
        Self {
            frame: Some(frame),
            objects: Vec::new(),
        }
    }

    /// Parse a set from an annotation document.
    ///
    /// Any `<object>` lacking an integer `<point><x>`/`<y>` aborts the
    /// whole parse; there is no row-skipping.
    pub fn from_xml_str(document: &str) -> Result<Self, AnnotationError> {
        let root = xml::parse(document)?;
        if root.name != "annotation" {
            return Err(AnnotationError::UnexpectedRoot(root.name));
        }

        let frame = match root.child("size") {
            Some(size) => Some(parse_frame(size)?),
            None => None,
        };

        let mut objects = Vec::new();
        for node in root.children {
            if let XmlNode::Element(element) = node {
                if element.name == "object" {
                    objects.push(AnnotationObject::from_element(objects.len(), element)?);
                }
            }
        }

        Ok(Self { frame, objects })
    }

    /// Frame metadata, if the source document carried a `<size>` block.
    pub fn frame(&self) -> Option<FrameSize> {
        self.frame
    }

    /// Objects in document order.
    pub fn objects(&self) -> &[AnnotationObject] {
        &self.objects
    }

    /// Consume the set, yielding its objects in document order.
    pub fn into_objects(self) -> Vec<AnnotationObject> {
        self.objects
    }

    /// Append an object, preserving insertion order.
    pub fn push(&mut self, object: AnnotationObject) {
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Serialize the set: `<annotation>` with the size block first, then
    /// every object flat, in stored order.
    pub fn to_xml_string(&self) -> Result<String, AnnotationError> {
        let mut root = XmlElement::new("annotation");
        if let Some(frame) = self.frame {
            let mut size = XmlElement::new("size");
            size.push_element(XmlElement::with_text("width", frame.width.to_string()));
            size.push_element(XmlElement::with_text("height", frame.height.to_string()));
            size.push_element(XmlElement::with_text("depth", frame.depth.to_string()));
            root.push_element(size);
        }
        for object in &self.objects {
            root.push_element(object.element.clone());
        }
        Ok(xml::serialize(&root)?)
    }
}

fn parse_frame(size: &XmlElement) -> Result<FrameSize, AnnotationError> {
    Ok(FrameSize {
        width: parse_dimension(size, "width")?,
        height: parse_dimension(size, "height")?,
        depth: parse_dimension(size, "depth")?,
    })
}

fn parse_dimension(size: &XmlElement, field: &'static str) -> Result<u32, AnnotationError> {
    size.child(field)
        .and_then(|e| e.text().trim().parse().ok())
        .ok_or(AnnotationError::InvalidSize(field))
}
