use crate::{Error, Result};
use std::fmt;

const TIME_BYTES: u16 = 8;
const COLOR_BYTES: u16 = 6;
const BASE_LEN: u16 = 20;
const COMPRESSION_MASK: u8 = 0b1100_0000;

/// Point formats are defined by the las spec.
///
/// Only the four formats that every las version understands (zero through three) are supported.
/// They differ in whether a record carries gps time, color, or both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Format {
    /// Does this point format include gps time?
    pub has_gps_time: bool,
    /// Does this point format include red, green, and blue colors?
    pub has_color: bool,
    /// Are the point records of this format compressed?
    pub is_compressed: bool,
}

impl Format {
    /// Creates a new point format from a point data format id.
    ///
    /// The two high bits are the (unofficial) laszip compression flag.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::point::Format;
    /// let format = Format::new(1).unwrap();
    /// assert!(format.has_gps_time);
    /// assert!(!format.has_color);
    ///
    /// let format = Format::new(131).unwrap();
    /// assert!(format.is_compressed);
    /// assert!(format.has_color);
    ///
    /// assert!(Format::new(4).is_err());
    /// ```
    pub fn new(n: u8) -> Result<Format> {
        let is_compressed = n & COMPRESSION_MASK != 0;
        let (has_gps_time, has_color) = match n & !COMPRESSION_MASK {
            0 => (false, false),
            1 => (true, false),
            2 => (false, true),
            3 => (true, true),
            other => return Err(Error::UnsupportedPointFormat(other)),
        };
        Ok(Format {
            has_gps_time,
            has_color,
            is_compressed,
        })
    }

    /// Returns this format's id, without the compression flag.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::point::Format;
    /// assert_eq!(3, Format::new(131).unwrap().to_u8());
    /// ```
    pub fn to_u8(&self) -> u8 {
        match (self.has_gps_time, self.has_color) {
            (false, false) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (true, true) => 3,
        }
    }

    /// Returns the minimum length of a point record of this format.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::point::Format;
    /// assert_eq!(20, Format::new(0).unwrap().len());
    /// assert_eq!(34, Format::new(3).unwrap().len());
    /// ```
    pub fn len(&self) -> u16 {
        let mut len = BASE_LEN;
        if self.has_gps_time {
            len += TIME_BYTES;
        }
        if self.has_color {
            len += COLOR_BYTES;
        }
        len
    }

    /// Returns the byte offset of gps time inside a record, if this format has it.
    pub fn gps_time_offset(&self) -> Option<usize> {
        self.has_gps_time.then_some(usize::from(BASE_LEN))
    }

    /// Returns the byte offset of the red channel inside a record, if this format has color.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::point::Format;
    /// assert_eq!(None, Format::new(1).unwrap().color_offset());
    /// assert_eq!(Some(20), Format::new(2).unwrap().color_offset());
    /// assert_eq!(Some(28), Format::new(3).unwrap().color_offset());
    /// ```
    pub fn color_offset(&self) -> Option<usize> {
        if !self.has_color {
            None
        } else if self.has_gps_time {
            Some(usize::from(BASE_LEN + TIME_BYTES))
        } else {
            Some(usize::from(BASE_LEN))
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "point format {}", self.to_u8())?;
        if self.is_compressed {
            write!(f, " (compressed)")?;
        }
        Ok(())
    }
}
