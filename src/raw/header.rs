//! Raw file metadata.

use crate::{ByteCursor, HeaderError, Result, Version};

/// The size of the header prefix shared by every las version.
pub const COMMON_HEADER_SIZE: usize = 227;

/// A las header.
///
/// The documentation for each member is taken from the las 1.2 spec, except in cases where the
/// field's usage has changed, in which case notes about its uses over versions are included.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Header {
    /// The file signature must contain the four characters “LASF”, and it is required by the LAS
    /// specification.
    pub file_signature: [u8; 4],

    /// This field should be set to a value between 1 and 65,535, inclusive.
    ///
    /// A value of zero (0) is interpreted to mean that an ID has not been assigned.
    pub file_source_id: u16,

    /// This is a bit field used to indicate certain global properties about the file.
    ///
    /// Bit zero is the GPS time type: when set, point gps times are Adjusted Standard GPS Time
    /// rather than GPS Week Time.
    pub global_encoding: u16,

    /// The four fields that comprise a complete Globally Unique Identifier (GUID) are now reserved
    /// for use as a Project Identifier (Project ID).
    pub guid: [u8; 16],

    /// The version number consists of a major and minor field.
    pub version: Version,

    /// Generally the hardware system that created the las file, or the operation (e.g. "MERGE",
    /// "EXTRACTION") that produced it.
    pub system_identifier: [u8; 32],

    /// This information is ASCII data describing the generating software itself.
    pub generating_software: [u8; 32],

    /// Day, expressed as an unsigned short, on which this file was created.
    ///
    /// Day is computed as the Greenwich Mean Time (GMT) day. January 1 is considered day 1.
    pub file_creation_day_of_year: u16,

    /// The year, expressed as a four digit number, in which the file was created.
    pub file_creation_year: u16,

    /// The size, in bytes, of the Public Header Block itself.
    pub header_size: u16,

    /// The actual number of bytes from the beginning of the file to the first field of the first
    /// point record data field.
    pub offset_to_point_data: u32,

    /// This field contains the current number of Variable Length Records.
    pub number_of_variable_length_records: u32,

    /// The point data format ID corresponds to the point data record format type.
    ///
    /// The two high bits are used by laszip to flag compressed data.
    pub point_data_format_id: u8,

    /// The size, in bytes, of the Point Data Record.
    pub point_data_record_length: u16,

    /// This field contains the total number of point records within the file.
    ///
    /// **las 1.4**: this is the legacy count, and may be zero when the real count lives in
    /// [LargeFile::number_of_point_records].
    pub number_of_point_records: u32,

    /// This field contains an array of the total point records per return.
    pub number_of_points_by_return: [u32; 5],

    /// The scale factor fields contain a double floating point value that is used to scale the
    /// corresponding X, Y, and Z long values within the point records.
    pub x_scale_factor: f64,
    #[allow(missing_docs)]
    pub y_scale_factor: f64,
    #[allow(missing_docs)]
    pub z_scale_factor: f64,

    /// The offset fields should be used to set the overall offset for the point records.
    ///
    /// Xcoordinate = (Xrecord * Xscale) + Xoffset
    pub x_offset: f64,
    #[allow(missing_docs)]
    pub y_offset: f64,
    #[allow(missing_docs)]
    pub z_offset: f64,

    /// The max and min data fields are the actual unscaled extents of the LAS point file data,
    /// specified in the coordinate system of the LAS data.
    pub max_x: f64,
    #[allow(missing_docs)]
    pub min_x: f64,
    #[allow(missing_docs)]
    pub max_y: f64,
    #[allow(missing_docs)]
    pub min_y: f64,
    #[allow(missing_docs)]
    pub max_z: f64,
    #[allow(missing_docs)]
    pub min_z: f64,

    /// **las 1.3 and 1.4**: This value provides the offset, in bytes, from the beginning of the
    /// LAS file to the first byte of the Waveform Data Package Record.
    pub start_of_waveform_data_packet_record: Option<u64>,

    #[allow(missing_docs)]
    pub evlr: Option<Evlr>,

    #[allow(missing_docs)]
    pub large_file: Option<LargeFile>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[allow(missing_docs)]
pub struct Evlr {
    /// **las 1.4**: This value provides the offset, in bytes, from the beginning of the LAS file
    /// to the first byte of the first EVLR.
    pub start_of_first_evlr: u64,

    /// **las 1.4**: This field contains the current number of EVLRs that are stored in the file
    /// after the Point Data Records.
    pub number_of_evlrs: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[allow(missing_docs)]
pub struct LargeFile {
    /// **las 1.4**: This field contains the total number of point records in the file.
    pub number_of_point_records: u64,

    /// **las 1.4**: These fields contain an array of the total point records per return, up to
    /// fifteen returns.
    pub number_of_points_by_return: [u64; 15],
}

impl Header {
    /// Reads a raw header from the start of a buffer.
    ///
    /// Fails if the buffer is shorter than 227 bytes, or shorter than 375 bytes for las 1.4, whose
    /// point counts live past the common prefix. The las 1.3 waveform offset is read only when both
    /// the declared header size and the buffer hold it. The signature is not checked here.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::raw::Header;
    /// let mut bytes = vec![0u8; 227];
    /// bytes[0..4].copy_from_slice(b"LASF");
    /// bytes[24] = 1;
    /// bytes[25] = 2;
    /// let header = Header::read_from(&bytes).unwrap();
    /// assert_eq!((1, 2), (header.version.major, header.version.minor));
    ///
    /// assert!(Header::read_from(&bytes[..200]).is_err());
    /// ```
    pub fn read_from(bytes: &[u8]) -> Result<Header> {
        if bytes.len() < COMMON_HEADER_SIZE {
            return Err(HeaderError::Truncated {
                len: bytes.len(),
                required: COMMON_HEADER_SIZE,
            }
            .into());
        }
        let cursor = ByteCursor::new(bytes);
        let version = Version::new(cursor.read_u8(24), cursor.read_u8(25));
        let required = if version.has_large_files() {
            usize::from(version.header_size())
        } else {
            COMMON_HEADER_SIZE
        };
        if bytes.len() < required {
            return Err(HeaderError::Truncated {
                len: bytes.len(),
                required,
            }
            .into());
        }

        let mut number_of_points_by_return = [0; 5];
        for (i, n) in number_of_points_by_return.iter_mut().enumerate() {
            *n = cursor.read_u32(111 + 4 * i);
        }
        let header_size = cursor.read_u16(94);
        let waveform_end = usize::from(Version::new(1, 3).header_size());
        let start_of_waveform_data_packet_record = if version.has_waveforms()
            && usize::from(header_size) >= waveform_end
            && bytes.len() >= waveform_end
        {
            Some(cursor.read_u64(227)).filter(|&n| n != 0)
        } else {
            None
        };
        let (evlr, large_file) = if version.has_large_files() {
            (
                Evlr::read_from(cursor).into_option(),
                Some(LargeFile::read_from(cursor)),
            )
        } else {
            (None, None)
        };

        Ok(Header {
            file_signature: cursor.array(0),
            file_source_id: cursor.read_u16(4),
            global_encoding: cursor.read_u16(6),
            guid: cursor.array(8),
            version,
            system_identifier: cursor.array(26),
            generating_software: cursor.array(58),
            file_creation_day_of_year: cursor.read_u16(90),
            file_creation_year: cursor.read_u16(92),
            header_size,
            offset_to_point_data: cursor.read_u32(96),
            number_of_variable_length_records: cursor.read_u32(100),
            point_data_format_id: cursor.read_u8(104),
            point_data_record_length: cursor.read_u16(105),
            number_of_point_records: cursor.read_u32(107),
            number_of_points_by_return,
            x_scale_factor: cursor.read_f64(131),
            y_scale_factor: cursor.read_f64(139),
            z_scale_factor: cursor.read_f64(147),
            x_offset: cursor.read_f64(155),
            y_offset: cursor.read_f64(163),
            z_offset: cursor.read_f64(171),
            max_x: cursor.read_f64(179),
            min_x: cursor.read_f64(187),
            max_y: cursor.read_f64(195),
            min_y: cursor.read_f64(203),
            max_z: cursor.read_f64(211),
            min_z: cursor.read_f64(219),
            start_of_waveform_data_packet_record,
            evlr,
            large_file,
        })
    }

    /// Returns true if this raw header is for compressed las data.
    ///
    /// Though this isn't part of the las spec, the two high bits of the point data format id have
    /// been used to indicate compressed data.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::raw::Header;
    /// let mut header = Header::default();
    /// assert!(!header.is_compressed());
    /// header.point_data_format_id = 131;
    /// assert!(header.is_compressed());
    /// ```
    pub fn is_compressed(&self) -> bool {
        self.point_data_format_id & 0b1100_0000 != 0
    }
}

impl Evlr {
    fn read_from(cursor: ByteCursor<'_>) -> Evlr {
        Evlr {
            start_of_first_evlr: cursor.read_u64(235),
            number_of_evlrs: cursor.read_u32(243),
        }
    }

    fn into_option(self) -> Option<Evlr> {
        if self.start_of_first_evlr == 0 && self.number_of_evlrs == 0 {
            None
        } else {
            Some(self)
        }
    }
}

impl LargeFile {
    fn read_from(cursor: ByteCursor<'_>) -> LargeFile {
        let mut number_of_points_by_return = [0; 15];
        for (i, n) in number_of_points_by_return.iter_mut().enumerate() {
            *n = cursor.read_u64(255 + 8 * i);
        }
        LargeFile {
            number_of_point_records: cursor.read_u64(247),
            number_of_points_by_return,
        }
    }
}
