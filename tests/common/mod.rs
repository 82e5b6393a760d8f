//! Writes synthetic las and laz files for the integration tests.

#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

/// One point record, unscaled.
#[derive(Clone, Copy, Debug, Default)]
pub struct Record {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub intensity: u16,
    pub flags: u8,
    pub classification: u8,
    pub scan_angle_rank: i8,
    pub user_data: u8,
    pub point_source_id: u16,
    pub gps_time: f64,
    pub rgb: [u16; 3],
}

impl Record {
    pub fn xyz(x: i32, y: i32, z: i32) -> Record {
        Record {
            x,
            y,
            z,
            ..Default::default()
        }
    }
}

/// A synthetic file.
#[derive(Clone, Debug)]
pub struct Fixture {
    pub version: (u8, u8),
    pub format: u8,
    pub record_length: u16,
    pub scale: [f64; 3],
    pub offset: [f64; 3],
    pub records: Vec<Record>,
    /// Overrides the declared number of points.
    pub declared: Option<u64>,
    /// Writes this into the legacy count of las 1.4 files, instead of zero.
    pub legacy_count: u32,
    pub vlrs: Vec<(String, u16, Vec<u8>)>,
}

impl Default for Fixture {
    fn default() -> Fixture {
        Fixture {
            version: (1, 2),
            format: 0,
            record_length: 20,
            scale: [0.01; 3],
            offset: [0.; 3],
            records: Vec::new(),
            declared: None,
            legacy_count: 0,
            vlrs: Vec::new(),
        }
    }
}

pub fn format_len(format: u8) -> u16 {
    match format {
        0 => 20,
        1 => 28,
        2 => 26,
        3 => 34,
        _ => panic!("unsupported format {format}"),
    }
}

/// `n` points on a diagonal with varying intensity and classification.
pub fn diagonal(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            let n = i as i32;
            Record {
                x: n * 10,
                y: -n * 5,
                z: 1000 + n,
                intensity: (i * 37 % 65_536) as u16,
                flags: 0b0100_1001,
                classification: (i % 9) as u8,
                scan_angle_rank: (i % 30) as i8 - 15,
                user_data: (i % 256) as u8,
                point_source_id: 7,
                gps_time: 1000. + i as f64 * 0.25,
                rgb: [
                    (i % 65_536) as u16,
                    (2 * i % 65_536) as u16,
                    (3 * i % 65_536) as u16,
                ],
            }
        })
        .collect()
}

impl Fixture {
    pub fn with_format(format: u8) -> Fixture {
        Fixture {
            format,
            record_length: format_len(format),
            ..Default::default()
        }
    }

    fn header_size(&self) -> u16 {
        match self.version {
            (1, 0..=2) => 227,
            (1, 3) => 235,
            _ => 375,
        }
    }

    fn number_of_points(&self) -> u64 {
        self.declared.unwrap_or(self.records.len() as u64)
    }

    pub fn record(&self, record: &Record) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(usize::from(self.record_length));
        bytes.write_i32::<LittleEndian>(record.x).unwrap();
        bytes.write_i32::<LittleEndian>(record.y).unwrap();
        bytes.write_i32::<LittleEndian>(record.z).unwrap();
        bytes.write_u16::<LittleEndian>(record.intensity).unwrap();
        bytes.write_u8(record.flags).unwrap();
        bytes.write_u8(record.classification).unwrap();
        bytes.write_i8(record.scan_angle_rank).unwrap();
        bytes.write_u8(record.user_data).unwrap();
        bytes.write_u16::<LittleEndian>(record.point_source_id).unwrap();
        if self.format == 1 || self.format == 3 {
            bytes.write_f64::<LittleEndian>(record.gps_time).unwrap();
        }
        if self.format == 2 || self.format == 3 {
            for channel in record.rgb {
                bytes.write_u16::<LittleEndian>(channel).unwrap();
            }
        }
        bytes.resize(usize::from(self.record_length), 0);
        bytes
    }

    fn header(&self, format_id: u8, vlrs: &[(String, u16, Vec<u8>)]) -> Vec<u8> {
        let header_size = self.header_size();
        let vlr_len: usize = vlrs.iter().map(|(_, _, data)| 54 + data.len()).sum();
        let offset_to_point_data = u32::from(header_size) + vlr_len as u32;
        let number_of_points = self.number_of_points();
        let (min, max) = self.bounds();

        let mut bytes = Vec::new();
        bytes.write_all(b"LASF").unwrap();
        bytes.write_u16::<LittleEndian>(1).unwrap();
        bytes.write_u16::<LittleEndian>(0).unwrap();
        bytes.write_all(&[0; 16]).unwrap();
        bytes.write_u8(self.version.0).unwrap();
        bytes.write_u8(self.version.1).unwrap();
        bytes.write_all(&padded::<32>("las-dataset tests")).unwrap();
        bytes.write_all(&padded::<32>("common::Fixture")).unwrap();
        bytes.write_u16::<LittleEndian>(100).unwrap();
        bytes.write_u16::<LittleEndian>(2024).unwrap();
        bytes.write_u16::<LittleEndian>(header_size).unwrap();
        bytes.write_u32::<LittleEndian>(offset_to_point_data).unwrap();
        bytes.write_u32::<LittleEndian>(vlrs.len() as u32).unwrap();
        bytes.write_u8(format_id).unwrap();
        bytes.write_u16::<LittleEndian>(self.record_length).unwrap();
        if self.version >= (1, 4) {
            bytes.write_u32::<LittleEndian>(self.legacy_count).unwrap();
            for _ in 0..5 {
                bytes.write_u32::<LittleEndian>(0).unwrap();
            }
        } else {
            bytes.write_u32::<LittleEndian>(number_of_points as u32).unwrap();
            bytes.write_u32::<LittleEndian>(number_of_points as u32).unwrap();
            for _ in 0..4 {
                bytes.write_u32::<LittleEndian>(0).unwrap();
            }
        }
        for scale in self.scale {
            bytes.write_f64::<LittleEndian>(scale).unwrap();
        }
        for offset in self.offset {
            bytes.write_f64::<LittleEndian>(offset).unwrap();
        }
        for i in 0..3 {
            bytes.write_f64::<LittleEndian>(max[i]).unwrap();
            bytes.write_f64::<LittleEndian>(min[i]).unwrap();
        }
        assert_eq!(227, bytes.len());
        if self.version >= (1, 3) {
            bytes.write_u64::<LittleEndian>(0).unwrap();
        }
        if self.version >= (1, 4) {
            bytes.write_u64::<LittleEndian>(0).unwrap();
            bytes.write_u32::<LittleEndian>(0).unwrap();
            bytes.write_u64::<LittleEndian>(number_of_points).unwrap();
            bytes.write_u64::<LittleEndian>(number_of_points).unwrap();
            for _ in 0..14 {
                bytes.write_u64::<LittleEndian>(0).unwrap();
            }
        }
        assert_eq!(usize::from(header_size), bytes.len());

        for (user_id, record_id, data) in vlrs {
            bytes.write_u16::<LittleEndian>(0).unwrap();
            bytes.write_all(&padded::<16>(user_id)).unwrap();
            bytes.write_u16::<LittleEndian>(*record_id).unwrap();
            bytes.write_u16::<LittleEndian>(data.len() as u16).unwrap();
            bytes.write_all(&padded::<32>("")).unwrap();
            bytes.write_all(data).unwrap();
        }
        assert_eq!(offset_to_point_data as usize, bytes.len());
        bytes
    }

    /// The real-world bounds of the records, or zeros if there are none.
    pub fn bounds(&self) -> ([f64; 3], [f64; 3]) {
        if self.records.is_empty() {
            return ([0.; 3], [0.; 3]);
        }
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        for record in &self.records {
            for (i, n) in [record.x, record.y, record.z].into_iter().enumerate() {
                let value = self.scale[i] * f64::from(n) + self.offset[i];
                min[i] = min[i].min(value);
                max[i] = max[i].max(value);
            }
        }
        (min, max)
    }

    /// Encodes an uncompressed file.
    pub fn las(&self) -> Vec<u8> {
        let mut bytes = self.header(self.format, &self.vlrs);
        for record in &self.records {
            bytes.extend(self.record(record));
        }
        bytes
    }

    /// Encodes a laszip-compressed file.
    #[cfg(feature = "laz")]
    pub fn laz(&self) -> Vec<u8> {
        use laz::{LasZipCompressor, LazItemRecordBuilder, LazItemType, LazVlr};
        use std::io::Cursor;

        let mut items = LazItemRecordBuilder::new();
        let _ = items.add_item(LazItemType::Point10);
        if self.format == 1 || self.format == 3 {
            let _ = items.add_item(LazItemType::GpsTime);
        }
        if self.format == 2 || self.format == 3 {
            let _ = items.add_item(LazItemType::RGB12);
        }
        let laz_vlr = LazVlr::from_laz_items(items.build());
        let mut data = Cursor::new(Vec::new());
        laz_vlr.write_to(&mut data).unwrap();
        let mut vlrs = self.vlrs.clone();
        vlrs.push((
            LazVlr::USER_ID.to_string(),
            LazVlr::RECORD_ID,
            data.into_inner(),
        ));

        let header = self.header(self.format | 0x80, &vlrs);
        let mut cursor = Cursor::new(header);
        cursor.set_position(cursor.get_ref().len() as u64);
        let mut compressor = LasZipCompressor::new(cursor, laz_vlr).unwrap();
        for record in &self.records {
            compressor.compress_one(&self.record(record)).unwrap();
        }
        compressor.done().unwrap();
        compressor.into_inner().into_inner()
    }
}

fn padded<const N: usize>(s: &str) -> [u8; N] {
    let mut bytes = [0; N];
    bytes[..s.len()].copy_from_slice(s.as_bytes());
    bytes
}
