//! Metadata describing the layout and interpretation of the points.
//!
//! A [Header] is decoded once, from the start of the whole-file buffer, and never changes
//! afterwards:
//!
//! ```
//! use las_dataset::Header;
//! let mut bytes = vec![0u8; 227];
//! bytes[0..4].copy_from_slice(b"LASF");
//! bytes[24] = 1;
//! bytes[25] = 2;
//! bytes[105..107].copy_from_slice(&20u16.to_le_bytes());
//! let header = Header::read_from(&bytes).unwrap();
//! assert_eq!((1, 2), (header.version().major, header.version().minor));
//! assert_eq!(0, header.number_of_points());
//! ```

use crate::{
    Bounds, GpsTimeType, HeaderError, Result, Transform, Vector, Version, point::Format, raw,
    utils::ToLasStr,
};
use chrono::NaiveDate;
use log::{Level, log};
use uuid::Uuid;

/// Metadata describing the layout, source, and interpretation of the points.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    file_source_id: u16,
    gps_time_type: GpsTimeType,
    guid: Uuid,
    version: Version,
    system_identifier: String,
    generating_software: String,
    date: Option<NaiveDate>,
    header_size: u16,
    offset_to_point_data: u32,
    number_of_vlrs: u32,
    point_format: Format,
    point_data_record_length: u16,
    number_of_points: u64,
    number_of_points_by_return: Vec<u64>,
    transforms: Vector<Transform>,
    bounds: Bounds,
    start_of_waveform_data_packet_record: Option<u64>,
    evlr: Option<raw::header::Evlr>,
}

impl Header {
    /// Decodes and validates the header at the start of a whole-file buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::{Error, Header, HeaderError};
    /// let bytes = vec![0u8; 227];
    /// assert!(matches!(
    ///     Header::read_from(&bytes),
    ///     Err(Error::MalformedHeader(HeaderError::Signature(_)))
    /// ));
    /// ```
    pub fn read_from(bytes: &[u8]) -> Result<Header> {
        let header = Header::from_raw(raw::Header::read_from(bytes)?)?;
        log!(
            Level::Debug,
            "decoded las {} header: {}, {} byte records, {} points",
            header.version,
            header.point_format,
            header.point_data_record_length,
            header.number_of_points
        );
        Ok(header)
    }

    /// Creates a validated header from a raw header.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::{raw, Header};
    /// let raw_header = raw::Header {
    ///     file_signature: raw::LASF,
    ///     point_data_record_length: 20,
    ///     ..Default::default()
    /// };
    /// let header = Header::from_raw(raw_header).unwrap();
    /// ```
    pub fn from_raw(raw_header: raw::Header) -> Result<Header> {
        if raw_header.file_signature != raw::LASF {
            return Err(HeaderError::Signature(raw_header.file_signature).into());
        }
        let point_format = Format::new(raw_header.point_data_format_id)?;
        if raw_header.point_data_record_length < point_format.len() {
            return Err(HeaderError::PointDataRecordLength {
                format: point_format,
                len: raw_header.point_data_record_length,
            }
            .into());
        }
        let (number_of_points, number_of_points_by_return) = match raw_header.large_file {
            Some(large_file) => {
                let legacy = u64::from(raw_header.number_of_point_records);
                if legacy != 0 && legacy != large_file.number_of_point_records {
                    log!(
                        Level::Warn,
                        "legacy point count ({}) disagrees with the extended point count ({}), using the extended count",
                        legacy,
                        large_file.number_of_point_records
                    );
                }
                (
                    large_file.number_of_point_records,
                    large_file.number_of_points_by_return.to_vec(),
                )
            }
            None => (
                u64::from(raw_header.number_of_point_records),
                raw_header
                    .number_of_points_by_return
                    .iter()
                    .map(|&n| u64::from(n))
                    .collect(),
            ),
        };
        let date = if raw_header.file_creation_year == 0
            || raw_header.file_creation_day_of_year == 0
        {
            None
        } else {
            NaiveDate::from_yo_opt(
                i32::from(raw_header.file_creation_year),
                u32::from(raw_header.file_creation_day_of_year),
            )
        };
        Ok(Header {
            file_source_id: raw_header.file_source_id,
            gps_time_type: raw_header.global_encoding.into(),
            guid: Uuid::from_bytes_le(raw_header.guid),
            version: raw_header.version,
            system_identifier: raw_header.system_identifier.to_las_str().into_owned(),
            generating_software: raw_header.generating_software.to_las_str().into_owned(),
            date,
            header_size: raw_header.header_size,
            offset_to_point_data: raw_header.offset_to_point_data,
            number_of_vlrs: raw_header.number_of_variable_length_records,
            point_format,
            point_data_record_length: raw_header.point_data_record_length,
            number_of_points,
            number_of_points_by_return,
            transforms: Vector {
                x: Transform {
                    scale: raw_header.x_scale_factor,
                    offset: raw_header.x_offset,
                },
                y: Transform {
                    scale: raw_header.y_scale_factor,
                    offset: raw_header.y_offset,
                },
                z: Transform {
                    scale: raw_header.z_scale_factor,
                    offset: raw_header.z_offset,
                },
            },
            bounds: Bounds {
                min: Vector {
                    x: raw_header.min_x,
                    y: raw_header.min_y,
                    z: raw_header.min_z,
                },
                max: Vector {
                    x: raw_header.max_x,
                    y: raw_header.max_y,
                    z: raw_header.max_z,
                },
            },
            start_of_waveform_data_packet_record: raw_header.start_of_waveform_data_packet_record,
            evlr: raw_header.evlr,
        })
    }

    /// Returns this header's file source id.
    ///
    /// For airborne data, this is often the flight line number.
    pub fn file_source_id(&self) -> u16 {
        self.file_source_id
    }

    /// Returns the gps time type.
    pub fn gps_time_type(&self) -> GpsTimeType {
        self.gps_time_type
    }

    /// Returns this header's project id.
    pub fn guid(&self) -> Uuid {
        self.guid
    }

    /// Returns this header's version.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::{raw, Header, Version};
    /// let header = Header::from_raw(raw::Header {
    ///     file_signature: raw::LASF,
    ///     version: Version::new(1, 3),
    ///     point_data_record_length: 20,
    ///     ..Default::default()
    /// }).unwrap();
    /// assert_eq!(Version::new(1, 3), header.version());
    /// ```
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the system identifier, with trailing nuls removed.
    pub fn system_identifier(&self) -> &str {
        &self.system_identifier
    }

    /// Returns the generating software, with trailing nuls removed.
    pub fn generating_software(&self) -> &str {
        &self.generating_software
    }

    /// Returns the file creation date, if the header holds a valid one.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Returns the size of the public header block, as declared by the header.
    pub fn header_size(&self) -> u16 {
        self.header_size
    }

    /// Returns the byte offset from the start of the file to the first point record.
    pub fn offset_to_point_data(&self) -> u32 {
        self.offset_to_point_data
    }

    /// Returns the number of variable length records between the header and the points.
    pub fn number_of_vlrs(&self) -> u32 {
        self.number_of_vlrs
    }

    /// Returns the point format.
    pub fn point_format(&self) -> &Format {
        &self.point_format
    }

    /// Returns the length of one point record, in bytes.
    ///
    /// This can be longer than the format requires, in which case the trailing bytes of each
    /// record are skipped.
    pub fn point_data_record_length(&self) -> u16 {
        self.point_data_record_length
    }

    /// Returns the declared number of points.
    ///
    /// **las 1.4**: this comes from the 64-bit count only, the legacy 32-bit count is ignored.
    pub fn number_of_points(&self) -> u64 {
        self.number_of_points
    }

    /// Returns the declared number of points by return, five entries before las 1.4 and fifteen
    /// after.
    pub fn number_of_points_by_return(&self) -> &[u64] {
        &self.number_of_points_by_return
    }

    /// Returns the scales and offsets.
    pub fn transforms(&self) -> &Vector<Transform> {
        &self.transforms
    }

    /// Returns the bounds declared by the header.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the start of the waveform data packet record, if any.
    pub fn start_of_waveform_data_packet_record(&self) -> Option<u64> {
        self.start_of_waveform_data_packet_record
    }

    /// Returns the offset of the first extended variable length record, if any.
    pub fn start_of_first_evlr(&self) -> Option<u64> {
        self.evlr.map(|evlr| evlr.start_of_first_evlr)
    }

    /// Returns the number of extended variable length records.
    pub fn number_of_evlrs(&self) -> u32 {
        self.evlr.map(|evlr| evlr.number_of_evlrs).unwrap_or(0)
    }

    /// Returns true if the point records are compressed.
    pub fn is_compressed(&self) -> bool {
        self.point_format.is_compressed
    }

    /// Returns the byte offset of the point record with this index.
    pub fn point_offset(&self, index: u64) -> u64 {
        u64::from(self.offset_to_point_data) + index * u64::from(self.point_data_record_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn raw_header() -> raw::Header {
        raw::Header {
            file_signature: raw::LASF,
            version: Version::new(1, 2),
            point_data_record_length: 20,
            x_scale_factor: 0.01,
            y_scale_factor: 0.01,
            z_scale_factor: 0.01,
            ..Default::default()
        }
    }

    #[test]
    fn bad_signature() {
        let raw_header = raw::Header {
            file_signature: *b"LASG",
            ..raw_header()
        };
        assert!(matches!(
            Header::from_raw(raw_header),
            Err(Error::MalformedHeader(HeaderError::Signature(s))) if &s == b"LASG"
        ));
    }

    #[test]
    fn unsupported_format() {
        let raw_header = raw::Header {
            point_data_format_id: 6,
            point_data_record_length: 30,
            ..raw_header()
        };
        assert!(matches!(
            Header::from_raw(raw_header),
            Err(Error::UnsupportedPointFormat(6))
        ));
    }

    #[test]
    fn short_record_length() {
        let raw_header = raw::Header {
            point_data_format_id: 3,
            point_data_record_length: 28,
            ..raw_header()
        };
        assert!(matches!(
            Header::from_raw(raw_header),
            Err(Error::MalformedHeader(HeaderError::PointDataRecordLength { len: 28, .. }))
        ));
    }

    #[test]
    fn long_record_length() {
        let raw_header = raw::Header {
            point_data_record_length: 24,
            ..raw_header()
        };
        let header = Header::from_raw(raw_header).unwrap();
        assert_eq!(24, header.point_data_record_length());
        assert_eq!(20, header.point_format().len());
    }

    #[test]
    fn legacy_counts() {
        let raw_header = raw::Header {
            number_of_point_records: 42,
            number_of_points_by_return: [40, 2, 0, 0, 0],
            ..raw_header()
        };
        let header = Header::from_raw(raw_header).unwrap();
        assert_eq!(42, header.number_of_points());
        assert_eq!(&[40, 2, 0, 0, 0], header.number_of_points_by_return());
    }

    #[test]
    fn extended_count_wins() {
        let mut number_of_points_by_return = [0; 15];
        number_of_points_by_return[14] = 7;
        let raw_header = raw::Header {
            version: Version::new(1, 4),
            number_of_point_records: 0,
            large_file: Some(raw::header::LargeFile {
                number_of_point_records: 7,
                number_of_points_by_return,
            }),
            ..raw_header()
        };
        let header = Header::from_raw(raw_header).unwrap();
        assert_eq!(7, header.number_of_points());
        assert_eq!(15, header.number_of_points_by_return().len());
        assert_eq!(7, header.number_of_points_by_return()[14]);
    }

    #[test]
    fn strings() {
        let mut raw_header = raw_header();
        raw_header.system_identifier[..5].copy_from_slice(b"MERGE");
        raw_header.generating_software[..4].copy_from_slice(b"PDAL");
        let header = Header::from_raw(raw_header).unwrap();
        assert_eq!("MERGE", header.system_identifier());
        assert_eq!("PDAL", header.generating_software());
    }

    #[test]
    fn date() {
        let raw_header = raw::Header {
            file_creation_year: 2017,
            file_creation_day_of_year: 32,
            ..raw_header()
        };
        let header = Header::from_raw(raw_header).unwrap();
        assert_eq!(NaiveDate::from_ymd_opt(2017, 2, 1), header.date());
    }

    #[test]
    fn no_day_no_date() {
        let raw_header = raw::Header {
            file_creation_year: 2017,
            ..raw_header()
        };
        assert_eq!(None, Header::from_raw(raw_header).unwrap().date());
    }

    #[test]
    fn no_year_no_date() {
        let raw_header = raw::Header {
            file_creation_day_of_year: 1,
            ..raw_header()
        };
        assert_eq!(None, Header::from_raw(raw_header).unwrap().date());
    }

    #[test]
    fn out_of_range_day_no_date() {
        let raw_header = raw::Header {
            file_creation_year: 2017,
            file_creation_day_of_year: 366,
            ..raw_header()
        };
        assert_eq!(None, Header::from_raw(raw_header).unwrap().date());
    }

    #[test]
    fn gps_time_type() {
        let raw_header = raw::Header {
            global_encoding: 1,
            ..raw_header()
        };
        assert!(
            Header::from_raw(raw_header)
                .unwrap()
                .gps_time_type()
                .is_standard()
        );
    }

    #[test]
    fn transforms_and_bounds() {
        let raw_header = raw::Header {
            x_offset: 100.,
            min_x: -1.,
            max_z: 9.,
            ..raw_header()
        };
        let header = Header::from_raw(raw_header).unwrap();
        assert_eq!(0.01, header.transforms().x.scale);
        assert_eq!(100., header.transforms().x.offset);
        assert_eq!(-1., header.bounds().min.x);
        assert_eq!(9., header.bounds().max.z);
    }

    #[test]
    fn point_offset() {
        let raw_header = raw::Header {
            offset_to_point_data: 227,
            point_data_record_length: 20,
            ..raw_header()
        };
        let header = Header::from_raw(raw_header).unwrap();
        assert_eq!(227, header.point_offset(0));
        assert_eq!(267, header.point_offset(2));
    }
}
