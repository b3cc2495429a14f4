//! Annotation record types.
//!
//! A [`Record`] is one annotated image: its dimensions plus every labeled
//! bounding box ([`Detection`]) found in the source document. Derived
//! geometry (widths, heights, areas) is always computed from the stored
//! coordinates, so it can never go stale.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::bbox::BoundingBox;

/// Image dimensions as declared in the `<size>` element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Returns `width * height`.
    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// A single labeled bounding box within a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Detection {
    category: String,
    truncated: bool,
    difficult: bool,
    boundary: BoundingBox,
}

impl Detection {
    /// Creates a new detection.
    pub fn new(
        category: impl Into<String>,
        truncated: bool,
        difficult: bool,
        boundary: BoundingBox,
    ) -> Self {
        Self {
            category: category.into(),
            truncated,
            difficult,
            boundary,
        }
    }

    /// The category label, e.g. `"circle"`.
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn difficult(&self) -> bool {
        self.difficult
    }

    pub fn boundary(&self) -> BoundingBox {
        self.boundary
    }

    #[inline]
    pub fn width(&self) -> i64 {
        self.boundary.width()
    }

    #[inline]
    pub fn height(&self) -> i64 {
        self.boundary.height()
    }

    #[inline]
    pub fn area(&self) -> i64 {
        self.boundary.area()
    }
}

/// One annotated image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    key: String,
    filename: String,
    dimensions: Dimensions,
    detections: Vec<Detection>,
}

impl Record {
    /// Creates a new record.
    ///
    /// `key` is the catalog key (the source file name without its
    /// extension); `filename` is the image name declared inside the document.
    pub fn new(
        key: impl Into<String>,
        filename: impl Into<String>,
        dimensions: Dimensions,
        detections: Vec<Detection>,
    ) -> Self {
        Self {
            key: key.into(),
            filename: filename.into(),
            dimensions,
            detections,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.dimensions.depth
    }

    /// Returns `width * height` of the image.
    #[inline]
    pub fn area(&self) -> u64 {
        self.dimensions.area()
    }

    /// Detections in document order.
    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    /// True if any detection carries the given category (exact match).
    pub fn has_category(&self, category: &str) -> bool {
        self.detections.iter().any(|det| det.category == category)
    }

    /// True if any detection is flagged difficult. False with no detections.
    pub fn has_difficult(&self) -> bool {
        self.detections.iter().any(Detection::difficult)
    }

    /// True if any detection is flagged truncated. False with no detections.
    pub fn has_truncated(&self) -> bool {
        self.detections.iter().any(Detection::truncated)
    }
}

// Derived geometry is serialized alongside the stored fields.
impl Serialize for Detection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Detection", 7)?;
        state.serialize_field("category", &self.category)?;
        state.serialize_field("truncated", &self.truncated)?;
        state.serialize_field("difficult", &self.difficult)?;
        state.serialize_field("boundary", &self.boundary)?;
        state.serialize_field("width", &self.width())?;
        state.serialize_field("height", &self.height())?;
        state.serialize_field("area", &self.area())?;
        state.end()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Record", 5)?;
        state.serialize_field("key", &self.key)?;
        state.serialize_field("filename", &self.filename)?;
        state.serialize_field("dimensions", &self.dimensions)?;
        state.serialize_field("area", &self.area())?;
        state.serialize_field("detections", &self.detections)?;
        state.end()
    }
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bbox = self.boundary;
        writeln!(f, "Name: {}", self.category)?;
        writeln!(f, "Truncated: {}", self.truncated)?;
        writeln!(f, "Difficult: {}", self.difficult)?;
        writeln!(f, "Boundary: {{")?;
        writeln!(f, "\txmin: {},", bbox.xmin)?;
        writeln!(f, "\tymin: {},", bbox.ymin)?;
        writeln!(f, "\txmax: {},", bbox.xmax)?;
        writeln!(f, "\tymax: {}", bbox.ymax)?;
        writeln!(f, "}}")?;
        writeln!(f, "Height: {}", self.height())?;
        writeln!(f, "Width: {}", self.width())?;
        write!(f, "Area: {}", self.area())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Dimensions {
            width,
            height,
            depth,
        } = self.dimensions;

        writeln!(f, "Filename: {}", self.filename)?;
        writeln!(f, "Height: {height}")?;
        writeln!(f, "Width: {width}")?;
        writeln!(f, "Depth: {depth}")?;
        writeln!(f, "Dimension: {height} x {width}")?;
        writeln!(f, "Area: {height} x {width} = {}", self.area())?;
        writeln!(f, "Objects: [")?;
        for (idx, detection) in self.detections.iter().enumerate() {
            if idx > 0 {
                writeln!(f, ",")?;
                writeln!(f)?;
            }
            write!(f, "{detection}")?;
        }
        writeln!(f)?;
        writeln!(f, "]")
    }
}
