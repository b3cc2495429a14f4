//! Pascal VOC XML reader.
//!
//! Turns one VOC annotation document into a [`Record`]. Parsing happens in two
//! steps: raw text becomes a `roxmltree` element tree, then the tree is read
//! into a record. A missing required element or a non-integer numeric field
//! fails the whole document; no partial record is produced.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};
use tracing::debug;

use super::bbox::BoundingBox;
use super::model::{Detection, Dimensions, Record};
use crate::error::AnnocatError;

const MEMORY_PATH: &str = "<memory>";

/// Read and parse a VOC XML file into a record stored under `key`.
pub fn read_record_file(key: &str, path: &Path) -> Result<Record, AnnocatError> {
    let xml = fs::read_to_string(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => AnnocatError::NotFound {
            path: path.to_path_buf(),
        },
        _ => AnnocatError::Io(source),
    })?;
    parse_record_str(key, &xml, path)
}

/// Parse VOC XML text into a record stored under `key`.
///
/// `path` is only used for error messages.
pub fn parse_record_str(key: &str, xml: &str, path: &Path) -> Result<Record, AnnocatError> {
    let document = parse_document(xml, path)?;
    record_from_node(key, document.root_element(), path)
}

/// Parse raw text into an element tree.
pub fn parse_document<'input>(
    xml: &'input str,
    path: &Path,
) -> Result<Document<'input>, AnnocatError> {
    Document::parse(xml).map_err(|source| AnnocatError::VocXmlParse {
        path: path.to_path_buf(),
        message: source.to_string(),
    })
}

/// Returns true if `xml` is a well-formed XML document.
pub fn is_well_formed(xml: &str) -> bool {
    Document::parse(xml).is_ok()
}

/// Build a record from a parsed annotation element.
///
/// Reads `filename`, `size/{width,height,depth}` and every `object` child.
/// The `truncated` and `difficult` flags are integers; only the value 1 maps
/// to `true`.
pub fn record_from_node(
    key: &str,
    annotation: Node<'_, '_>,
    path: &Path,
) -> Result<Record, AnnocatError> {
    let filename = required_child_text(annotation, "filename", path, "<annotation>")?;

    let size = required_child_element(annotation, "size", path, "<annotation>")?;
    let width = parse_required_u32(size, "width", path, "<size>")?;
    let height = parse_required_u32(size, "height", path, "<size>")?;
    let depth = parse_required_u32(size, "depth", path, "<size>")?;

    let mut detections = Vec::new();
    for object in annotation
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "object")
    {
        detections.push(detection_from_node(object, path)?);
    }

    debug!(
        key,
        path = %path.display(),
        detections = detections.len(),
        "parsed VOC record"
    );

    Ok(Record::new(
        key,
        filename,
        Dimensions::new(width, height, depth),
        detections,
    ))
}

/// Parse VOC XML from a UTF-8 string, discarding the result.
///
/// This helper is primarily useful for testing/fuzzing parse behavior in-memory.
pub fn from_voc_xml_str(xml: &str) -> Result<(), AnnocatError> {
    parse_record_str(MEMORY_PATH, xml, Path::new(MEMORY_PATH))?;
    Ok(())
}

/// Parse VOC XML from bytes.
///
/// The input must be valid UTF-8.
pub fn from_voc_xml_slice(bytes: &[u8]) -> Result<(), AnnocatError> {
    from_voc_xml_str(decode_utf8(bytes)?)
}

/// Fuzz-only entrypoint: parse a record, then fold it into fresh stats so its
/// derived geometry is computed.
#[cfg(feature = "fuzzing")]
pub fn fuzz_record_geometry(bytes: &[u8]) -> Result<(), AnnocatError> {
    let record = parse_record_str(MEMORY_PATH, decode_utf8(bytes)?, Path::new(MEMORY_PATH))?;
    let mut stats = crate::stats::StatsAccumulator::new();
    stats.observe(&record);
    for detection in record.detections() {
        debug_assert_eq!(detection.area(), detection.width() * detection.height());
    }
    Ok(())
}

fn decode_utf8(bytes: &[u8]) -> Result<&str, AnnocatError> {
    std::str::from_utf8(bytes).map_err(|source| AnnocatError::VocXmlParse {
        path: PathBuf::from(MEMORY_PATH),
        message: format!("input is not valid UTF-8: {source}"),
    })
}

fn detection_from_node(object: Node<'_, '_>, path: &Path) -> Result<Detection, AnnocatError> {
    let name = required_child_text(object, "name", path, "<object>")?;
    let truncated = parse_required_flag(object, "truncated", path)?;
    let difficult = parse_required_flag(object, "difficult", path)?;

    let bndbox = required_child_element(object, "bndbox", path, "<object>")?;
    let xmin = parse_required_i32(bndbox, "xmin", path)?;
    let ymin = parse_required_i32(bndbox, "ymin", path)?;
    let xmax = parse_required_i32(bndbox, "xmax", path)?;
    let ymax = parse_required_i32(bndbox, "ymax", path)?;

    let boundary = BoundingBox::from_xyxy(xmin, ymin, xmax, ymax);
    if boundary.checked_area().is_none() {
        return Err(AnnocatError::VocXmlParse {
            path: path.to_path_buf(),
            message: format!(
                "<bndbox> ({xmin}, {ymin}, {xmax}, {ymax}) of '{name}' has an area outside the i64 range"
            ),
        });
    }

    Ok(Detection::new(name, truncated, difficult, boundary))
}

fn required_child_element<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<Node<'a, 'input>, AnnocatError> {
    child_element(node, tag).ok_or_else(|| AnnocatError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

fn required_child_text(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<String, AnnocatError> {
    optional_child_text(node, tag).ok_or_else(|| AnnocatError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

fn parse_required_u32(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<u32, AnnocatError> {
    let raw = required_child_text(node, tag, path, context)?;
    raw.parse::<u32>().map_err(|_| AnnocatError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("invalid <{tag}> value '{raw}' in {context}; expected u32"),
    })
}

fn parse_required_i32(node: Node<'_, '_>, tag: &str, path: &Path) -> Result<i32, AnnocatError> {
    let raw = required_child_text(node, tag, path, "<bndbox>")?;
    raw.parse::<i32>().map_err(|_| AnnocatError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("invalid <{tag}> value '{raw}' in <bndbox>; expected i32"),
    })
}

// Any integer other than 1 is false.
fn parse_required_flag(node: Node<'_, '_>, tag: &str, path: &Path) -> Result<bool, AnnocatError> {
    let raw = required_child_text(node, tag, path, "<object>")?;
    raw.parse::<i64>()
        .map(|value| value == 1)
        .map_err(|_| AnnocatError::VocXmlParse {
            path: path.to_path_buf(),
            message: format!("invalid <{tag}> value '{raw}' in <object>; expected integer"),
        })
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
}

fn optional_child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    child_element(node, tag)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}
