use crate::point::Format;
use thiserror::Error;

/// Crate-specific error enum.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The public header block could not be decoded.
    #[error("malformed header: {0}")]
    MalformedHeader(#[from] HeaderError),

    /// The point data format id is not one of 0, 1, 2 or 3.
    #[error("unsupported point data format: {0}")]
    UnsupportedPointFormat(u8),

    /// A point record would extend past the end of the buffer.
    #[error(
        "point {index} at byte offset {offset} (record length {record_length}) extends past the end of the {buffer_length} byte buffer"
    )]
    BufferTruncated {
        /// The zero-based index of the point that could not be read.
        index: u64,
        /// The byte offset of that point.
        offset: u64,
        /// The point data record length.
        record_length: u16,
        /// The length of the whole-file buffer.
        buffer_length: usize,
    },

    /// The compression codec failed to initialize or signaled a corrupt stream.
    #[error("compressed stream error: {0}")]
    CompressedStream(String),

    /// The data are compressed but this crate was built without the `laz` feature.
    #[error("laszip support is not enabled")]
    LaszipNotEnabled,

    /// The projection engine rejected a definition or a coordinate.
    #[error("reprojection error: {0}")]
    Reprojection(String),

    /// The parse was cancelled between two batches.
    #[error("the parse was cancelled")]
    Cancelled,

    /// A variable length record could not be decoded.
    #[error("invalid variable length record: {0}")]
    Vlr(String),

    /// [std::io::Error]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Reasons a public header block is rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum HeaderError {
    /// The buffer is too short for the header of this version.
    #[error("the buffer has {len} bytes but the header needs {required}")]
    Truncated {
        /// Length of the buffer.
        len: usize,
        /// Bytes required to decode the header.
        required: usize,
    },

    /// The file signature was not "LASF".
    #[error("file signature must be LASF, found {0:?}")]
    Signature([u8; 4]),

    /// The point data record length is shorter than the point format demands.
    #[error("{format} requires at least {} bytes per record, header says {len}", format.len())]
    PointDataRecordLength {
        /// The point format.
        format: Format,
        /// The declared record length.
        len: u16,
    },
}

impl Error {
    /// Returns false for errors that only degrade a parse instead of aborting it.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::Error;
    /// assert!(!Error::Reprojection("out of range".to_string()).is_fatal());
    /// assert!(Error::Cancelled.is_fatal());
    /// ```
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::Reprojection(_))
    }
}

#[cfg(feature = "laz")]
impl From<laz::LasZipError> for Error {
    fn from(err: laz::LasZipError) -> Error {
        Error::CompressedStream(err.to_string())
    }
}
