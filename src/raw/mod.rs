//! Raw structures that map directly onto structures as defined in the las format specification.
//!
//! These structures are "dumb": they decode bytes at their documented offsets and do the least
//! amount of validity checking. Prefer `las_dataset::Header` and `las_dataset::Point`, which
//! enforce the rules.

pub mod header;
pub mod point;
pub mod vlr;

pub use self::header::Header;
pub use self::point::Point;
pub use self::vlr::Vlr;

/// The file magic number used for all las files.
pub const LASF: [u8; 4] = *b"LASF";
