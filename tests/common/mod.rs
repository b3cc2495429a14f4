#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// One `<object>` of a VOC fixture.
pub struct Obj<'a> {
    pub name: &'a str,
    pub truncated: i64,
    pub difficult: i64,
    pub bbox: (i64, i64, i64, i64),
}

impl<'a> Obj<'a> {
    pub fn new(name: &'a str, difficult: bool, truncated: bool) -> Self {
        Self {
            name,
            truncated: truncated as i64,
            difficult: difficult as i64,
            bbox: (0, 0, 10, 10),
        }
    }

    pub fn with_bbox(mut self, xmin: i64, ymin: i64, xmax: i64, ymax: i64) -> Self {
        self.bbox = (xmin, ymin, xmax, ymax);
        self
    }
}

pub fn voc_xml(filename: &str, width: u32, height: u32, objects: &[Obj<'_>]) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<annotation>\n");
    xml.push_str("  <folder>images</folder>\n");
    xml.push_str(&format!("  <filename>{filename}</filename>\n"));
    xml.push_str(&format!(
        "  <size>\n    <width>{width}</width>\n    <height>{height}</height>\n    <depth>3</depth>\n  </size>\n"
    ));
    for obj in objects {
        let (xmin, ymin, xmax, ymax) = obj.bbox;
        xml.push_str(&format!(
            "  <object>\n    <name>{}</name>\n    <pose>Unspecified</pose>\n    <truncated>{}</truncated>\n    <difficult>{}</difficult>\n    <bndbox>\n      <xmin>{xmin}</xmin>\n      <ymin>{ymin}</ymin>\n      <xmax>{xmax}</xmax>\n      <ymax>{ymax}</ymax>\n    </bndbox>\n  </object>\n",
            obj.name, obj.truncated, obj.difficult
        ));
    }
    xml.push_str("</annotation>\n");
    xml
}

pub fn write_voc(dir: &Path, file: &str, width: u32, height: u32, objects: &[Obj<'_>]) {
    fs::create_dir_all(dir).expect("create fixture dir");
    let stem = Path::new(file)
        .file_stem()
        .and_then(|s| s.to_str())
        .expect("fixture file name");
    fs::write(
        dir.join(file),
        voc_xml(&format!("{stem}.png"), width, height, objects),
    )
    .expect("write fixture");
}

/// The two-record scenario: A is small and truncated, B is wide and difficult.
pub fn write_scenario(dir: &Path) {
    write_voc(dir, "A.xml", 10, 20, &[Obj::new("circle", false, true)]);
    write_voc(dir, "B.xml", 100, 5, &[Obj::new("square", true, false)]);
}
