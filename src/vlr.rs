//! Variable length records are used to store additional metadata not defined in the header.
//!
//! Vlrs sit between the public header block and the point records. This crate decodes them but
//! only interprets one: the laszip vlr that describes how compressed points are laid out.

use crate::{Header, Result, raw, utils::ToLasStr};

/// A variable length record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vlr {
    /// The user that created this record.
    ///
    /// This value is often an official, "registered" user_id, such as "LASF_Spec" or
    /// "LASF_Projection".
    pub user_id: String,

    /// This value specifies the type of record, and depends on the user id.
    pub record_id: u16,

    /// Textual description of these data.
    pub description: String,

    /// The data themselves.
    pub data: Vec<u8>,
}

impl Vlr {
    /// Creates a vlr from a raw vlr.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::{Vlr, raw};
    /// let raw_vlr = raw::Vlr::default();
    /// let vlr = Vlr::new(raw_vlr);
    /// assert_eq!("", vlr.user_id);
    /// ```
    pub fn new(raw_vlr: raw::Vlr) -> Vlr {
        Vlr {
            user_id: raw_vlr.user_id.to_las_str().into_owned(),
            record_id: raw_vlr.record_id,
            description: raw_vlr.description.to_las_str().into_owned(),
            data: raw_vlr.data,
        }
    }

    /// Returns the total size of this vlr, header and data.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::Vlr;
    /// let vlr = Vlr { data: vec![0; 10], ..Default::default() };
    /// assert_eq!(64, vlr.len());
    /// ```
    pub fn len(&self) -> usize {
        raw::vlr::HEADER_SIZE + self.data.len()
    }

    /// Returns true if the data of this vlr is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Reads the header's declared number of vlrs, starting right after the public header block.
///
/// # Examples
///
/// ```
/// use las_dataset::{Header, vlr};
/// let mut bytes = vec![0u8; 227];
/// bytes[0..4].copy_from_slice(b"LASF");
/// bytes[24] = 1;
/// bytes[25] = 2;
/// bytes[94..96].copy_from_slice(&227u16.to_le_bytes());
/// bytes[105..107].copy_from_slice(&20u16.to_le_bytes());
/// let header = Header::read_from(&bytes).unwrap();
/// assert!(vlr::read_vlrs(&bytes, &header).unwrap().is_empty());
/// ```
pub fn read_vlrs(bytes: &[u8], header: &Header) -> Result<Vec<Vlr>> {
    let mut offset = usize::from(header.header_size());
    let mut vlrs = Vec::new();
    for _ in 0..header.number_of_vlrs() {
        let (raw_vlr, next) = raw::Vlr::read_from(bytes, offset)?;
        vlrs.push(Vlr::new(raw_vlr));
        offset = next;
    }
    Ok(vlrs)
}
