//! Typed little-endian reads at explicit offsets.

use byteorder::{ByteOrder, LittleEndian};

/// A read-only view over a byte buffer that decodes values at explicit offsets.
///
/// The cursor never owns the buffer. Callers check the buffer length once, up front, and every
/// read inside that checked window is infallible; reading past the end is a programming error and
/// panics.
///
/// # Examples
///
/// ```
/// use las_dataset::ByteCursor;
/// let cursor = ByteCursor::new(&[1, 0, 2, 0, 0, 0]);
/// assert_eq!(1, cursor.read_u16(0));
/// assert_eq!(2, cursor.read_u32(2));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor over the given bytes.
    pub fn new(bytes: &'a [u8]) -> ByteCursor<'a> {
        ByteCursor { bytes }
    }

    /// Returns the number of bytes under this cursor.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if there are no bytes under this cursor.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns a cursor over `len` bytes starting at `offset`.
    pub fn window(&self, offset: usize, len: usize) -> ByteCursor<'a> {
        ByteCursor::new(&self.bytes[offset..offset + len])
    }

    /// Returns the `len` bytes starting at `offset`.
    pub fn bytes(&self, offset: usize, len: usize) -> &'a [u8] {
        &self.bytes[offset..offset + len]
    }

    /// Copies `N` bytes starting at `offset` into an array.
    pub fn array<const N: usize>(&self, offset: usize) -> [u8; N] {
        let mut array = [0; N];
        array.copy_from_slice(&self.bytes[offset..offset + N]);
        array
    }

    #[allow(missing_docs)]
    pub fn read_u8(&self, offset: usize) -> u8 {
        self.bytes[offset]
    }

    #[allow(missing_docs)]
    pub fn read_i8(&self, offset: usize) -> i8 {
        self.bytes[offset] as i8
    }

    #[allow(missing_docs)]
    pub fn read_u16(&self, offset: usize) -> u16 {
        LittleEndian::read_u16(&self.bytes[offset..offset + 2])
    }

    #[allow(missing_docs)]
    pub fn read_u32(&self, offset: usize) -> u32 {
        LittleEndian::read_u32(&self.bytes[offset..offset + 4])
    }

    #[allow(missing_docs)]
    pub fn read_i32(&self, offset: usize) -> i32 {
        LittleEndian::read_i32(&self.bytes[offset..offset + 4])
    }

    #[allow(missing_docs)]
    pub fn read_u64(&self, offset: usize) -> u64 {
        LittleEndian::read_u64(&self.bytes[offset..offset + 8])
    }

    #[allow(missing_docs)]
    pub fn read_f64(&self, offset: usize) -> f64 {
        LittleEndian::read_f64(&self.bytes[offset..offset + 8])
    }
}
