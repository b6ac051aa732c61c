//! roLabelImg rotated-box XML reader.
//!
//! Annotation files carry `<object>` elements, each with a `<name>` class
//! label and a `<robndbox>` holding the rotated box fields `cx`, `cy`, `w`,
//! `h`, `angle`. Objects may appear at any depth, so the converter walks the
//! whole tree rather than indexing direct children of the root.
//!
//! Geometry field text is copied verbatim into the output records: no
//! numeric parsing, no reformatting, no trimming. What the annotation tool
//! wrote is what the label file gets.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::Node;
use walkdir::WalkDir;

use crate::classes::{class_index, CLASS_NAMES};
use crate::error::ConvertError;
use crate::yolor::LabelRecord;

const XML_EXTENSION: &str = "xml";

/// Recursively collect annotation files under `src`.
///
/// Files with a `.xml` extension (case-insensitive) are kept at any depth.
/// The result is sorted by path relative to `src` so runs are deterministic.
pub fn collect_xml_files(src: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|source| ConvertError::SourceScan {
            path: src.to_path_buf(),
            message: source.to_string(),
        })?;

        if entry.file_type().is_file() && has_xml_extension(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort_by_cached_key(|path| rel_string(src, path));
    Ok(files)
}

/// Read one annotation file and convert it to yolor label records.
pub fn read_robnd_xml(path: &Path) -> Result<Vec<LabelRecord>, ConvertError> {
    let xml = fs::read_to_string(path).map_err(ConvertError::Io)?;
    records_from_str(&xml, path)
}

/// Parse annotation XML from a UTF-8 string and convert it.
///
/// This helper is primarily useful for exercising conversion behavior
/// in-memory; `path` only provides error context.
pub fn records_from_str(xml: &str, path: &Path) -> Result<Vec<LabelRecord>, ConvertError> {
    let document = roxmltree::Document::parse(xml).map_err(|source| ConvertError::XmlParse {
        path: path.to_path_buf(),
        message: source.to_string(),
    })?;

    convert_document(&document, path)
}

/// Convert a parsed annotation document to yolor label records.
///
/// Every `<object>` element found anywhere in the tree yields exactly one
/// record, in document order. A document with no objects yields an empty
/// vector. A missing `<robndbox>`, missing geometry field, missing `<name>`,
/// or unrecognized class name fails the whole conversion.
pub fn convert_document(
    document: &roxmltree::Document<'_>,
    path: &Path,
) -> Result<Vec<LabelRecord>, ConvertError> {
    let mut records = Vec::new();

    for object in document
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "object")
    {
        let robndbox = required_child_element(object, "robndbox", path, "<object>")?;

        let cx = required_child_text(robndbox, "cx", path, "<robndbox>")?;
        let cy = required_child_text(robndbox, "cy", path, "<robndbox>")?;
        let w = required_child_text(robndbox, "w", path, "<robndbox>")?;
        let h = required_child_text(robndbox, "h", path, "<robndbox>")?;
        let angle = required_child_text(robndbox, "angle", path, "<robndbox>")?;

        let name = required_child_text(object, "name", path, "<object>")?;
        let class_index = class_index(&name).ok_or_else(|| ConvertError::UnknownClass {
            path: path.to_path_buf(),
            class: name.clone(),
            known: &CLASS_NAMES,
        })?;

        records.push(LabelRecord {
            cx,
            cy,
            w,
            h,
            angle,
            class_index,
        });
    }

    Ok(records)
}

fn required_child_element<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<Node<'a, 'input>, ConvertError> {
    child_element(node, tag).ok_or_else(|| ConvertError::XmlSchema {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

fn required_child_text(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<String, ConvertError> {
    let child = required_child_element(node, tag, path, context)?;
    // text() is None for empty or element-only children; both are schema
    // errors since the record would be missing a token.
    child
        .text()
        .map(ToOwned::to_owned)
        .ok_or_else(|| ConvertError::XmlSchema {
            path: path.to_path_buf(),
            message: format!("missing text in <{tag}> under {context}"),
        })
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
}

fn has_xml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(XML_EXTENSION))
        .unwrap_or(false)
}

pub(crate) fn rel_string(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}
