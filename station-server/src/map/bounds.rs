//! Geographic bounding boxes.

use serde::Serialize;

use crate::domain::Coordinates;

/// Axis-aligned box in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for no points.
    pub fn from_coords<'a, I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Coordinates>,
    {
        let mut iter = coords.into_iter();
        let first = iter.next()?;
        let start = Bounds {
            south: first.latitude,
            west: first.longitude,
            north: first.latitude,
            east: first.longitude,
        };
        Some(iter.fold(start, |b, c| Bounds {
            south: b.south.min(c.latitude),
            west: b.west.min(c.longitude),
            north: b.north.max(c.latitude),
            east: b.east.max(c.longitude),
        }))
    }

    /// Grow each side by `ratio` of the box's extent on that axis.
    ///
    /// A single-point box stays a point; the surface picks the zoom.
    pub fn padded(&self, ratio: f64) -> Self {
        let lat_pad = (self.north - self.south).abs() * ratio;
        let lon_pad = (self.east - self.west).abs() * ratio;
        Bounds {
            south: self.south - lat_pad,
            west: self.west - lon_pad,
            north: self.north + lat_pad,
            east: self.east + lon_pad,
        }
    }

    pub fn contains(&self, c: &Coordinates) -> bool {
        (self.south..=self.north).contains(&c.latitude)
            && (self.west..=self.east).contains(&c.longitude)
    }

    pub fn center(&self) -> Coordinates {
        Coordinates {
            latitude: (self.south + self.north) / 2.0,
            longitude: (self.west + self.east) / 2.0,
        }
    }
}
