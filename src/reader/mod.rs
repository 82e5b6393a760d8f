//! Read points out of a whole-file buffer.
//!
//! The set of decode strategies is closed and known as soon as the header is decoded: plain
//! records are sliced straight out of the buffer, compressed records go through a codec session.
//!
//! ```
//! use las_dataset::Dataset;
//! let mut bytes = vec![0u8; 227];
//! bytes[0..4].copy_from_slice(b"LASF");
//! bytes[24] = 1;
//! bytes[25] = 2;
//! bytes[94..96].copy_from_slice(&227u16.to_le_bytes());
//! bytes[96..100].copy_from_slice(&227u32.to_le_bytes());
//! bytes[105..107].copy_from_slice(&20u16.to_le_bytes());
//! bytes[107..111].copy_from_slice(&1u32.to_le_bytes());
//! bytes.extend_from_slice(&[0; 20]);
//! let dataset = Dataset::from_bytes(&bytes).unwrap();
//! assert_eq!(1, dataset.points().len());
//! ```

mod las;
mod laz;

pub use self::laz::Session;

use crate::{Header, Point, Result, codec::PointCodec, dataset::Truncation};
use log::{Level, log};

pub(crate) trait ReadPoints {
    fn read_point(&mut self) -> Result<Option<Point>>;

    fn read_points(&mut self, n: u64, points: &mut Vec<Point>) -> Result<u64> {
        let mut count = 0;
        while count < n {
            if let Some(point) = self.read_point()? {
                points.push(point);
                count += 1;
            } else {
                break;
            }
        }
        Ok(count)
    }
}

/// How the point records of a file are decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Records are read in place from the buffer.
    Plain,
    /// Records are decompressed one at a time by a codec.
    Compressed,
}

impl Strategy {
    /// Picks the strategy for a header.
    pub fn for_header(header: &Header) -> Strategy {
        if header.is_compressed() {
            Strategy::Compressed
        } else {
            Strategy::Plain
        }
    }
}

pub(crate) fn point_reader<'a, C>(
    bytes: &'a [u8],
    header: &'a Header,
    codec: &C,
    truncation: Truncation,
) -> Result<Box<dyn ReadPoints + 'a>>
where
    C: PointCodec,
    C::Engine: 'a,
{
    let strategy = Strategy::for_header(header);
    log!(Level::Debug, "decoding {} with the {:?} strategy", header.point_format(), strategy);
    match strategy {
        Strategy::Plain => Ok(Box::new(las::PointReader::new(bytes, header, truncation))),
        Strategy::Compressed => {
            let session = Session::open(codec.init()?, bytes, header.point_data_record_length())?;
            Ok(Box::new(laz::PointReader::new(session, header)))
        }
    }
}
