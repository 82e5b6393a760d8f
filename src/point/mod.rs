//! Decoded points and the formats they are stored in.

mod classification;
mod format;
mod scan_direction;

pub use self::classification::Classification;
pub use self::format::Format;
pub use self::scan_direction::ScanDirection;

use crate::{Color, Transform, Vector, raw};

/// A point is the basic unit of information in las data.
///
/// Coordinates are real-world values: the stored integers with the header's scale and offset
/// already applied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// The x coordinate, as a float.
    pub x: f64,
    /// The y coordinate, as a float.
    pub y: f64,
    /// The z coordinate, as a float.
    pub z: f64,
    /// The integer representation of the pulse return magnitude.
    pub intensity: u16,
    /// The pulse return number for a given output pulse, one through seven.
    pub return_number: u8,
    /// The total number of returns for a given pulse.
    pub number_of_returns: u8,
    /// The direction at which the scanner mirror was traveling at the time of the output pulse.
    pub scan_direction: ScanDirection,
    /// True if the point is at the end of a scan.
    pub is_edge_of_flight_line: bool,
    /// The ASPRS class value, zero through 31.
    pub classification: u8,
    /// This point was created by a technique other than LiDAR collection.
    pub is_synthetic: bool,
    /// The point should be considered a model key-point.
    pub is_key_point: bool,
    /// The point should be considered withheld (i.e. it's deleted).
    pub is_withheld: bool,
    /// The angle, rounded to the nearest integer, of the output of the laser pulse.
    ///
    /// Zero degrees is nadir, -90 is to the left of the aircraft.
    pub scan_angle_rank: i8,
    /// Used at the user's discretion.
    pub user_data: u8,
    /// The file from which this point originated.
    pub point_source_id: u16,
    /// The time at which the point was acquired, for formats one and three.
    pub gps_time: Option<f64>,
    /// This point's color, for formats two and three.
    pub color: Option<Color>,
}

impl Point {
    /// Creates a point from a raw point and the header's transforms.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::{raw, Point, Transform, Vector};
    /// let raw_point = raw::Point { x: 100, y: 200, z: 300, ..Default::default() };
    /// let transform = Transform { scale: 0.01, offset: 0. };
    /// let transforms = Vector { x: transform, y: transform, z: transform };
    /// let point = Point::new(raw_point, &transforms);
    /// assert_eq!(1., point.x);
    /// ```
    pub fn new(raw_point: raw::Point, transforms: &Vector<Transform>) -> Point {
        Point {
            x: transforms.x.direct(raw_point.x),
            y: transforms.y.direct(raw_point.y),
            z: transforms.z.direct(raw_point.z),
            intensity: raw_point.intensity,
            return_number: raw_point.flags.return_number(),
            number_of_returns: raw_point.flags.number_of_returns(),
            scan_direction: raw_point.flags.scan_direction(),
            is_edge_of_flight_line: raw_point.flags.is_edge_of_flight_line(),
            classification: raw_point.flags.classification(),
            is_synthetic: raw_point.flags.is_synthetic(),
            is_key_point: raw_point.flags.is_key_point(),
            is_withheld: raw_point.flags.is_withheld(),
            scan_angle_rank: raw_point.scan_angle_rank,
            user_data: raw_point.user_data,
            point_source_id: raw_point.point_source_id,
            gps_time: raw_point.gps_time,
            color: raw_point.color,
        }
    }

    /// Returns this point's classification as an ASPRS class.
    pub fn class(&self) -> Classification {
        Classification::new(self.classification)
    }
}

/// Decodes one point record from a byte window.
///
/// The window must hold at least `format.len()` bytes; it usually comes straight out of the
/// whole-file buffer or out of a decompressor.
///
/// # Panics
///
/// Panics if the window is shorter than the format's record length.
///
/// # Examples
///
/// ```
/// use las_dataset::{decode_point, point::Format, Vector, Transform};
/// let mut window = [0u8; 20];
/// window[0..4].copy_from_slice(&150i32.to_le_bytes());
/// let transforms = Vector { x: Transform { scale: 0.01, offset: 0. }, ..Default::default() };
/// let point = decode_point(&window, &Format::new(0).unwrap(), &transforms);
/// assert_eq!(1.5, point.x);
/// ```
pub fn decode_point(window: &[u8], format: &Format, transforms: &Vector<Transform>) -> Point {
    Point::new(raw::Point::read_from(window, format), transforms)
}
