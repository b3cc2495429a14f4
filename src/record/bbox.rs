//! Integer bounding boxes in XYXY format.

use serde::Serialize;

/// An axis-aligned bounding box in XYXY format (xmin, ymin, xmax, ymax).
///
/// Coordinates are integer pixels as they appear in VOC `<bndbox>` elements.
/// They are stored as `i32`; derived geometry is computed in `i64`, where
/// any width or height fits.
///
/// Note: This type does NOT enforce that min <= max. A box with
/// `xmin == xmax` is a valid zero-area box, and an inverted box is kept as
/// read so the caller can decide what to do with it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct BoundingBox {
    pub xmin: i32,
    pub ymin: i32,
    pub xmax: i32,
    pub ymax: i32,
}

impl BoundingBox {
    /// Creates a new bounding box from explicit coordinates.
    #[inline]
    pub fn from_xyxy(xmin: i32, ymin: i32, xmax: i32, ymax: i32) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Returns the width of the bounding box.
    ///
    /// May be negative if the box is malformed (xmax < xmin).
    #[inline]
    pub fn width(&self) -> i64 {
        i64::from(self.xmax) - i64::from(self.xmin)
    }

    /// Returns the height of the bounding box.
    ///
    /// May be negative if the box is malformed (ymax < ymin).
    #[inline]
    pub fn height(&self) -> i64 {
        i64::from(self.ymax) - i64::from(self.ymin)
    }

    /// Returns the area, or `None` when `width * height` does not fit in `i64`.
    #[inline]
    pub fn checked_area(&self) -> Option<i64> {
        self.width().checked_mul(self.height())
    }

    /// Returns the area of the bounding box.
    ///
    /// Saturates at the `i64` bounds. The VOC reader rejects boxes for which
    /// [`BoundingBox::checked_area`] is `None`, so parsed boxes always satisfy
    /// `area == width * height`.
    #[inline]
    pub fn area(&self) -> i64 {
        self.width().saturating_mul(self.height())
    }
}
