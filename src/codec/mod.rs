//! The boundary between the decoder and a point decompression codec.
//!
//! A codec is driven through a small, manual protocol over its own private memory arena: the
//! caller allocates blocks, writes the compressed file into one of them, opens a stream over that
//! block, and then asks for one decompressed record at a time into a second block, reading each
//! record back out. Every parse asks the [PointCodec] for a fresh [CodecEngine], so no two parses
//! ever share an arena.
//!
//! The engine is deliberately low-level. The reader wraps it in a scope guard that frees both
//! blocks and destroys the stream however decoding ends.

#[cfg(feature = "laz")]
pub mod laz;

use crate::{Error, Result};
use std::{fmt, sync::Arc};

/// The codec that compressed point data are decoded with when none is given.
#[cfg(feature = "laz")]
pub type DefaultCodec = laz::LazCodec;

/// The codec that compressed point data are decoded with when none is given.
#[cfg(not(feature = "laz"))]
pub type DefaultCodec = Unavailable;

/// Creates codec engines.
pub trait PointCodec {
    /// The engine this codec creates.
    type Engine: CodecEngine;

    /// Initializes a new, independent engine.
    fn init(&self) -> Result<Self::Engine>;
}

/// One instance of a decompression codec, with its own memory arena.
pub trait CodecEngine {
    /// Allocates a zeroed block of `len` bytes in the arena.
    fn malloc(&mut self, len: usize) -> Result<Pointer>;

    /// Releases a block. Freeing an unknown pointer is a no-op.
    fn free(&mut self, pointer: Pointer);

    /// Copies bytes into the start of a block.
    fn write(&mut self, pointer: Pointer, bytes: &[u8]) -> Result<()>;

    /// Copies the start of a block out into `out`.
    fn read(&self, pointer: Pointer, out: &mut [u8]) -> Result<()>;

    /// Opens a decompression stream over the first `len` bytes of a block.
    ///
    /// The block must hold a whole compressed file, header included.
    fn open(&mut self, pointer: Pointer, len: usize) -> Result<()>;

    /// Decompresses the next point record into the start of a block.
    fn get_point(&mut self, destination: Pointer) -> Result<()>;

    /// Closes the stream, if one is open.
    fn destroy(&mut self);
}

/// The address of a block in a codec's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pointer(pub usize);

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// A simple block allocator that codec engines can build on.
///
/// Blocks are reference counted so that a stream can keep reading a block without copying it.
/// Freed slots are reused.
#[derive(Debug, Default)]
pub struct Arena {
    blocks: Vec<Option<Arc<Vec<u8>>>>,
}

/// A shared, read-only view of an arena block.
#[derive(Clone, Debug)]
pub struct Block(Arc<Vec<u8>>);

impl AsRef<[u8]> for Block {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Arena {
    /// Creates an empty arena.
    pub fn new() -> Arena {
        Arena::default()
    }

    /// Allocates a zeroed block.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::codec::Arena;
    /// let mut arena = Arena::new();
    /// let a = arena.malloc(4);
    /// let b = arena.malloc(4);
    /// assert_ne!(a, b);
    /// assert_eq!(2, arena.allocated());
    /// ```
    pub fn malloc(&mut self, len: usize) -> Pointer {
        let block = Some(Arc::new(vec![0; len]));
        if let Some(index) = self.blocks.iter().position(Option::is_none) {
            self.blocks[index] = block;
            Pointer(index)
        } else {
            self.blocks.push(block);
            Pointer(self.blocks.len() - 1)
        }
    }

    /// Frees a block, returning true if it was allocated.
    pub fn free(&mut self, pointer: Pointer) -> bool {
        self.blocks
            .get_mut(pointer.0)
            .and_then(Option::take)
            .is_some()
    }

    /// Returns the number of live blocks.
    pub fn allocated(&self) -> usize {
        self.blocks.iter().filter(|block| block.is_some()).count()
    }

    /// Returns a block's bytes.
    pub fn get(&self, pointer: Pointer) -> Result<&[u8]> {
        self.blocks
            .get(pointer.0)
            .and_then(Option::as_ref)
            .map(|block| block.as_slice())
            .ok_or_else(|| invalid_pointer(pointer))
    }

    /// Returns a block's bytes, mutably.
    ///
    /// If a stream is still reading the block, the block is copied first.
    pub fn get_mut(&mut self, pointer: Pointer) -> Result<&mut [u8]> {
        self.blocks
            .get_mut(pointer.0)
            .and_then(Option::as_mut)
            .map(|block| Arc::make_mut(block).as_mut_slice())
            .ok_or_else(|| invalid_pointer(pointer))
    }

    /// Returns a shared view of a block.
    pub fn share(&self, pointer: Pointer) -> Result<Block> {
        self.blocks
            .get(pointer.0)
            .and_then(Option::as_ref)
            .map(|block| Block(Arc::clone(block)))
            .ok_or_else(|| invalid_pointer(pointer))
    }

    /// Copies bytes into the start of a block.
    pub fn write(&mut self, pointer: Pointer, bytes: &[u8]) -> Result<()> {
        let block = self.get_mut(pointer)?;
        if bytes.len() > block.len() {
            return Err(Error::CompressedStream(format!(
                "cannot write {} bytes into the {} byte block at {}",
                bytes.len(),
                block.len(),
                pointer
            )));
        }
        block[..bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// Copies the start of a block out.
    pub fn read(&self, pointer: Pointer, out: &mut [u8]) -> Result<()> {
        let block = self.get(pointer)?;
        if out.len() > block.len() {
            return Err(Error::CompressedStream(format!(
                "cannot read {} bytes from the {} byte block at {}",
                out.len(),
                block.len(),
                pointer
            )));
        }
        out.copy_from_slice(&block[..out.len()]);
        Ok(())
    }
}

/// A codec for builds without compression support.
///
/// Initializing it always fails with [Error::LaszipNotEnabled].
#[derive(Clone, Copy, Debug, Default)]
pub struct Unavailable;

/// The engine type of [Unavailable]; it can never be created.
#[derive(Clone, Copy, Debug)]
pub enum NoEngine {}

impl PointCodec for Unavailable {
    type Engine = NoEngine;

    fn init(&self) -> Result<NoEngine> {
        Err(Error::LaszipNotEnabled)
    }
}

impl CodecEngine for NoEngine {
    fn malloc(&mut self, _: usize) -> Result<Pointer> {
        match *self {}
    }

    fn free(&mut self, _: Pointer) {
        match *self {}
    }

    fn write(&mut self, _: Pointer, _: &[u8]) -> Result<()> {
        match *self {}
    }

    fn read(&self, _: Pointer, _: &mut [u8]) -> Result<()> {
        match *self {}
    }

    fn open(&mut self, _: Pointer, _: usize) -> Result<()> {
        match *self {}
    }

    fn get_point(&mut self, _: Pointer) -> Result<()> {
        match *self {}
    }

    fn destroy(&mut self) {
        match *self {}
    }
}

fn invalid_pointer(pointer: Pointer) -> Error {
    Error::CompressedStream(format!("no block is allocated at {pointer}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malloc_reuses_freed_slots() {
        let mut arena = Arena::new();
        let a = arena.malloc(1);
        let b = arena.malloc(1);
        assert!(arena.free(a));
        assert!(!arena.free(a));
        assert_eq!(a, arena.malloc(2));
        assert_eq!(2, arena.allocated());
        assert!(arena.free(b));
        assert_eq!(1, arena.allocated());
    }

    #[test]
    fn write_then_read() {
        let mut arena = Arena::new();
        let pointer = arena.malloc(4);
        arena.write(pointer, &[1, 2, 3]).unwrap();
        let mut out = [0; 4];
        arena.read(pointer, &mut out).unwrap();
        assert_eq!([1, 2, 3, 0], out);
    }

    #[test]
    fn write_too_long() {
        let mut arena = Arena::new();
        let pointer = arena.malloc(2);
        assert!(matches!(
            arena.write(pointer, &[1, 2, 3]),
            Err(Error::CompressedStream(_))
        ));
    }

    #[test]
    fn freed_pointer_is_invalid() {
        let mut arena = Arena::new();
        let pointer = arena.malloc(2);
        let _ = arena.free(pointer);
        assert!(arena.get(pointer).is_err());
        assert!(arena.share(pointer).is_err());
    }

    #[test]
    fn shared_block_survives_writes() {
        let mut arena = Arena::new();
        let pointer = arena.malloc(2);
        arena.write(pointer, &[1, 1]).unwrap();
        let block = arena.share(pointer).unwrap();
        arena.write(pointer, &[2, 2]).unwrap();
        assert_eq!(&[1, 1], block.as_ref());
        assert_eq!(&[2, 2], arena.get(pointer).unwrap());
    }

    #[test]
    fn unavailable() {
        assert!(matches!(
            Unavailable.init(),
            Err(Error::LaszipNotEnabled)
        ));
    }
}
