//! Raw variable length records.

use crate::{ByteCursor, Error, Result};

/// The size of a vlr header, in bytes.
pub const HEADER_SIZE: usize = 54;

/// A raw vlr that maps directly onto the las specification.
#[derive(Clone, Debug, Default, PartialEq)]
#[allow(missing_docs)]
pub struct Vlr {
    pub reserved: u16,
    pub user_id: [u8; 16],
    pub record_id: u16,
    pub record_length_after_header: u16,
    pub description: [u8; 32],
    pub data: Vec<u8>,
}

impl Vlr {
    /// Reads a raw vlr that starts at `offset`, returning it and the offset just past it.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::raw::Vlr;
    /// let mut bytes = vec![0u8; 54];
    /// bytes[2..11].copy_from_slice(b"LASF_Spec");
    /// bytes[20] = 3;
    /// bytes.extend_from_slice(&[1, 2, 3]);
    /// let (vlr, next) = Vlr::read_from(&bytes, 0).unwrap();
    /// assert_eq!(vec![1, 2, 3], vlr.data);
    /// assert_eq!(57, next);
    /// ```
    pub fn read_from(bytes: &[u8], offset: usize) -> Result<(Vlr, usize)> {
        if bytes.len() < offset + HEADER_SIZE {
            return Err(Error::Vlr(format!(
                "vlr header at byte {offset} extends past the end of the buffer"
            )));
        }
        let cursor = ByteCursor::new(bytes).window(offset, HEADER_SIZE);
        let record_length_after_header = cursor.read_u16(20);
        let start = offset + HEADER_SIZE;
        let end = start + usize::from(record_length_after_header);
        if bytes.len() < end {
            return Err(Error::Vlr(format!(
                "vlr data at byte {start} ({record_length_after_header} bytes) extends past the end of the buffer"
            )));
        }
        let vlr = Vlr {
            reserved: cursor.read_u16(0),
            user_id: cursor.array(2),
            record_id: cursor.read_u16(18),
            record_length_after_header,
            description: cursor.array(22),
            data: bytes[start..end].to_vec(),
        };
        Ok((vlr, end))
    }
}
