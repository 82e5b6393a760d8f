//! Raw las point records, as stored in point formats zero through three.

use crate::point::{Format, ScanDirection};
use crate::{ByteCursor, Color};

/// A raw point.
///
/// The documentation for struct members is taken from the las 1.2 spec.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// The X, Y, and Z values are stored as long integers.
    ///
    /// The X, Y, and Z values are used in conjunction with the scale values and the offset values
    /// to determine the coordinate for each point as described in the Public Header Block section.
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
    #[allow(missing_docs)]
    pub z: i32,

    /// The intensity value is the integer representation of the pulse return magnitude.
    ///
    /// This value is optional and system specific. However, it should always be included if
    /// available.
    pub intensity: u16,

    /// The two flag bytes: returns and scan flags, then classification and its flags.
    pub flags: Flags,

    /// The Scan Angle Rank is a signed one-byte number with a valid range from -90 to +90.
    ///
    /// The Scan Angle Rank is the angle (rounded to the nearest integer in the absolute value
    /// sense) at which the laser point was output from the laser system including the roll of the
    /// aircraft.
    pub scan_angle_rank: i8,

    /// This field may be used at the user's discretion.
    pub user_data: u8,

    /// This value indicates the file from which this point originated.
    ///
    /// A Point Source ID of zero implies that this point originated in this file.
    pub point_source_id: u16,

    /// The GPS Time is the double floating point time tag value at which the point was acquired.
    pub gps_time: Option<f64>,

    /// The red, green, and blue image channels associated with this point.
    pub color: Option<Color>,
}

/// The two flag bytes of a legacy point record.
///
/// | Byte | Bits | Field |
/// | ---- | ---- | ----- |
/// | 0 | 0:2 | Return number |
/// | 0 | 3:5 | Number of returns |
/// | 0 | 6 | Scan direction |
/// | 0 | 7 | Edge of flight line |
/// | 1 | 0:4 | Classification |
/// | 1 | 5 | Synthetic |
/// | 1 | 6 | Key-point |
/// | 1 | 7 | Withheld |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags(pub u8, pub u8);

impl Point {
    /// Reads a raw point from a record window.
    ///
    /// Fields sit at their las offsets: the flag bytes at 14 and 15, scan angle rank at 16, user
    /// data at 17, point source id at 18, then gps time and color as the format dictates. Bytes
    /// past the format's length are ignored.
    ///
    /// # Panics
    ///
    /// Panics if the window is shorter than `format.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::raw::Point;
    /// use las_dataset::point::Format;
    /// let mut window = [0u8; 20];
    /// window[15] = 2;
    /// let point = Point::read_from(&window, &Format::new(0).unwrap());
    /// assert_eq!(2, point.flags.classification());
    /// ```
    pub fn read_from(window: &[u8], format: &Format) -> Point {
        assert!(
            window.len() >= usize::from(format.len()),
            "a {} byte window cannot hold a record of {format}",
            window.len()
        );
        let cursor = ByteCursor::new(window);
        let gps_time = format
            .gps_time_offset()
            .map(|offset| cursor.read_f64(offset));
        let color = format.color_offset().map(|offset| {
            Color::new(
                cursor.read_u16(offset),
                cursor.read_u16(offset + 2),
                cursor.read_u16(offset + 4),
            )
        });
        Point {
            x: cursor.read_i32(0),
            y: cursor.read_i32(4),
            z: cursor.read_i32(8),
            intensity: cursor.read_u16(12),
            flags: Flags(cursor.read_u8(14), cursor.read_u8(15)),
            scan_angle_rank: cursor.read_i8(16),
            user_data: cursor.read_u8(17),
            point_source_id: cursor.read_u16(18),
            gps_time,
            color,
        }
    }
}

impl Flags {
    /// Returns the return number.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::raw::point::Flags;
    /// assert_eq!(1, Flags(1, 0).return_number());
    /// ```
    pub fn return_number(&self) -> u8 {
        self.0 & 0b111
    }

    /// Returns the number of returns.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::raw::point::Flags;
    /// assert_eq!(1, Flags(8, 0).number_of_returns());
    /// ```
    pub fn number_of_returns(&self) -> u8 {
        (self.0 >> 3) & 0b111
    }

    /// Returns the scan direction from these flags.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::raw::point::Flags;
    /// use las_dataset::point::ScanDirection;
    /// assert_eq!(ScanDirection::LeftToRight, Flags(0b0100_0000, 0).scan_direction());
    /// ```
    pub fn scan_direction(&self) -> ScanDirection {
        ScanDirection::from((self.0 >> 6) & 1 == 1)
    }

    /// Is this point the edge of a flight line?
    pub fn is_edge_of_flight_line(&self) -> bool {
        self.0 >> 7 == 1
    }

    /// Returns the classification value, the five low bits of the second byte.
    pub fn classification(&self) -> u8 {
        self.1 & 0b1_1111
    }

    /// Returns whether this point is synthetic.
    pub fn is_synthetic(&self) -> bool {
        (self.1 >> 5) & 1 == 1
    }

    /// Returns whether this point is a key point.
    pub fn is_key_point(&self) -> bool {
        (self.1 >> 6) & 1 == 1
    }

    /// Returns whether this point is withheld.
    pub fn is_withheld(&self) -> bool {
        self.1 >> 7 == 1
    }
}
