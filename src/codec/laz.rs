//! A [PointCodec] on top of the laz crate.

use super::{Arena, Block, CodecEngine, Pointer, PointCodec};
use crate::{Error, Header, Result, Vlr, vlr};
use laz::{LasZipDecompressor, LazVlr};
use log::{Level, log};
use std::io::{Cursor, Seek, SeekFrom};

/// Returns true if this [Vlr] is the laszip Vlr.
///
/// # Examples
///
/// ```
/// use las_dataset::{codec::laz, Vlr};
///
/// let mut vlr = Vlr::default();
/// assert!(!laz::is_laszip_vlr(&vlr));
/// vlr.user_id = "laszip encoded".to_string();
/// vlr.record_id = 22204;
/// assert!(laz::is_laszip_vlr(&vlr));
/// ```
pub fn is_laszip_vlr(vlr: &Vlr) -> bool {
    vlr.user_id == LazVlr::USER_ID && vlr.record_id == LazVlr::RECORD_ID
}

/// Decompresses laszip point data.
#[derive(Clone, Copy, Debug, Default)]
pub struct LazCodec;

/// One laszip decompression engine and its arena.
#[allow(missing_debug_implementations)]
pub struct LazEngine {
    arena: Arena,
    stream: Option<Stream>,
}

struct Stream {
    decompressor: LasZipDecompressor<'static, Cursor<Block>>,
    record_length: usize,
}

impl PointCodec for LazCodec {
    type Engine = LazEngine;

    fn init(&self) -> Result<LazEngine> {
        Ok(LazEngine {
            arena: Arena::new(),
            stream: None,
        })
    }
}

impl LazEngine {
    /// Returns the number of live blocks in this engine's arena.
    pub fn allocated(&self) -> usize {
        self.arena.allocated()
    }

    /// Returns true if a stream is open.
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }
}

impl CodecEngine for LazEngine {
    fn malloc(&mut self, len: usize) -> Result<Pointer> {
        Ok(self.arena.malloc(len))
    }

    fn free(&mut self, pointer: Pointer) {
        let _ = self.arena.free(pointer);
    }

    fn write(&mut self, pointer: Pointer, bytes: &[u8]) -> Result<()> {
        self.arena.write(pointer, bytes)
    }

    fn read(&self, pointer: Pointer, out: &mut [u8]) -> Result<()> {
        self.arena.read(pointer, out)
    }

    fn open(&mut self, pointer: Pointer, len: usize) -> Result<()> {
        if self.stream.is_some() {
            return Err(Error::CompressedStream(
                "a stream is already open on this engine".to_string(),
            ));
        }
        let block = self.arena.share(pointer)?;
        let bytes = block.as_ref().get(..len).ok_or_else(|| {
            Error::CompressedStream(format!(
                "cannot open {len} bytes from the {} byte block at {pointer}",
                block.as_ref().len()
            ))
        })?;
        let header = Header::read_from(bytes)?;
        let laz_vlr = vlr::read_vlrs(bytes, &header)?
            .iter()
            .find(|vlr| is_laszip_vlr(vlr))
            .map(|vlr| LazVlr::from_buffer(&vlr.data))
            .transpose()?
            .ok_or_else(|| Error::CompressedStream("no laszip vlr".to_string()))?;
        let mut cursor = Cursor::new(block);
        let _ = cursor.seek(SeekFrom::Start(u64::from(header.offset_to_point_data())))?;
        let decompressor = LasZipDecompressor::new(cursor, laz_vlr)?;
        self.stream = Some(Stream {
            decompressor,
            record_length: usize::from(header.point_data_record_length()),
        });
        Ok(())
    }

    fn get_point(&mut self, destination: Pointer) -> Result<()> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| Error::CompressedStream("no stream is open".to_string()))?;
        let block = self.arena.get_mut(destination)?;
        let len = block.len();
        let out = block.get_mut(..stream.record_length).ok_or_else(|| {
            Error::CompressedStream(format!(
                "a {} byte record does not fit in the {len} byte block at {destination}",
                stream.record_length
            ))
        })?;
        stream
            .decompressor
            .decompress_one(out)
            .map_err(|err| Error::CompressedStream(err.to_string()))
    }

    fn destroy(&mut self) {
        if self.stream.take().is_some() {
            log!(Level::Debug, "laszip stream destroyed");
        }
    }
}
