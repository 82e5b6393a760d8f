use super::ReadPoints;
use crate::{Error, Header, Point, Result, dataset::Truncation, point::decode_point};
use log::{Level, log};

pub(crate) struct PointReader<'a> {
    bytes: &'a [u8],
    header: &'a Header,
    index: u64,
    truncation: Truncation,
    done: bool,
}

impl<'a> PointReader<'a> {
    pub(crate) fn new(bytes: &'a [u8], header: &'a Header, truncation: Truncation) -> PointReader<'a> {
        PointReader {
            bytes,
            header,
            index: 0,
            truncation,
            done: false,
        }
    }

    fn window(&self) -> Option<&'a [u8]> {
        let offset = usize::try_from(self.header.point_offset(self.index)).ok()?;
        let end = offset.checked_add(usize::from(self.header.point_data_record_length()))?;
        self.bytes.get(offset..end)
    }
}

impl ReadPoints for PointReader<'_> {
    fn read_point(&mut self) -> Result<Option<Point>> {
        if self.done || self.index >= self.header.number_of_points() {
            return Ok(None);
        }
        let Some(window) = self.window() else {
            self.done = true;
            let offset = self.header.point_offset(self.index);
            return match self.truncation {
                Truncation::Strict => Err(Error::BufferTruncated {
                    index: self.index,
                    offset,
                    record_length: self.header.point_data_record_length(),
                    buffer_length: self.bytes.len(),
                }),
                Truncation::Lenient => {
                    log!(
                        Level::Warn,
                        "point {} at byte offset {} extends past the end of the {} byte buffer, stopping after {} of {} points",
                        self.index,
                        offset,
                        self.bytes.len(),
                        self.index,
                        self.header.number_of_points()
                    );
                    Ok(None)
                }
            };
        };
        self.index += 1;
        Ok(Some(decode_point(
            window,
            self.header.point_format(),
            self.header.transforms(),
        )))
    }
}
