//! Annotation record model.
//!
//! This module defines the value types for one annotated image ([`Record`])
//! and its labeled boxes ([`Detection`]), plus the VOC XML reader that builds
//! them.
//!
//! # Example
//!
//! ```
//! use annocat::record::{BoundingBox, Detection, Dimensions, Record};
//!
//! let record = Record::new(
//!     "shapes_001",
//!     "shapes_001.png",
//!     Dimensions::new(640, 480, 3),
//!     vec![Detection::new(
//!         "circle",
//!         false,
//!         false,
//!         BoundingBox::from_xyxy(10, 20, 110, 70),
//!     )],
//! );
//!
//! assert_eq!(record.area(), 640 * 480);
//! assert_eq!(record.detections()[0].area(), 100 * 50);
//! ```

mod bbox;
pub mod io_voc_xml;
mod model;

pub use bbox::BoundingBox;
pub use model::{Detection, Dimensions, Record};
