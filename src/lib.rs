//! Decode [ASPRS LAS](https://www.asprs.org/committee-general/laser-las-file-format-exchange-activities.html)
//! and laszip-compressed point clouds into a single, immutable [Dataset].
//!
//! # Decoding
//!
//! Hand a whole file's bytes to [Dataset::from_bytes], or let [Dataset::from_path] read them:
//!
//! ```no_run
//! use las_dataset::Dataset;
//! let dataset = Dataset::from_path("lidar.laz").unwrap();
//! println!("{} points", dataset.statistics().total_points);
//! for point in dataset.points() {
//!     println!("({}, {}, {})", point.x, point.y, point.z);
//! }
//! ```
//!
//! A dataset carries the decoded [Header], every [Point] in record order, and [Statistics] that
//! were accumulated while decoding: bounds, intensity range, and a classification histogram.
//!
//! # Options
//!
//! Use a [Parser] to control how a buffer is decoded:
//!
//! ```
//! use las_dataset::{Parser, ParseOptions, Truncation};
//! use las_dataset::reproject::ProjectionDefinitions;
//! let options = ParseOptions::default()
//!     .with_truncation(Truncation::Strict)
//!     .with_yield_every(10_000)
//!     .with_projection(ProjectionDefinitions::to_wgs84("+proj=utm +zone=10 +datum=WGS84"));
//! let parser = Parser::new(options);
//! ```
//!
//! With a projection configured, the header's bounds are projected into a [GeoExtent]. A failed
//! projection only drops the extent, the rest of the dataset is still returned.
//!
//! # Async
//!
//! [Parser::parse_async] decodes the same way but yields to its executor every
//! [ParseOptions::yield_every] points, which is also when a [Cancellation] is checked.
//!
//! # Compression
//!
//! Laszip-compressed data are decoded through the [codec] module. The default `laz` feature
//! provides [codec::laz::LazCodec]; without it, compressed input fails with
//! [Error::LaszipNotEnabled]. Any other codec can be plugged in with [Parser::with_codec].

#![deny(missing_docs, unsafe_code)]
#![warn(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

pub mod codec;
pub mod point;
pub mod raw;
pub mod reader;
pub mod reproject;
pub mod utils;
pub mod vlr;

mod bounds;
mod color;
mod cursor;
mod dataset;
mod error;
mod gps_time_type;
mod header;
mod statistics;
mod transform;
mod vector;
mod version;

pub use crate::bounds::Bounds;
pub use crate::color::Color;
pub use crate::cursor::ByteCursor;
pub use crate::dataset::{Cancellation, Dataset, ParseOptions, Parser, Truncation};
pub use crate::error::{Error, HeaderError};
pub use crate::gps_time_type::GpsTimeType;
pub use crate::header::Header;
pub use crate::point::{Point, decode_point};
pub use crate::reproject::GeoExtent;
pub use crate::statistics::{IntensityRange, Statistics};
pub use crate::transform::Transform;
pub use crate::vector::Vector;
pub use crate::version::Version;
pub use crate::vlr::Vlr;

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;
