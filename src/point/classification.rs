use std::fmt;

/// ASPRS classification table for point formats zero through three.
///
/// The legacy formats keep the class in the five low bits of the classification byte, so values
/// above 31 never come out of a decoded record. They are still representable for callers that
/// carry a full byte around.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Classification {
    #[default]
    CreatedNeverClassified,
    Unclassified,
    Ground,
    LowVegetation,
    MediumVegetation,
    HighVegetation,
    Building,
    LowPoint,
    ModelKeyPoint,
    Water,
    OverlapPoints,
    Reserved(u8),
    UserDefinable(u8),
}

impl Classification {
    /// Creates a new classification.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::point::Classification;
    /// assert_eq!(Classification::Ground, Classification::new(2));
    /// assert_eq!(Classification::OverlapPoints, Classification::new(12));
    /// assert_eq!(Classification::Reserved(10), Classification::new(10));
    /// ```
    pub fn new(n: u8) -> Classification {
        match n {
            0 => Classification::CreatedNeverClassified,
            1 => Classification::Unclassified,
            2 => Classification::Ground,
            3 => Classification::LowVegetation,
            4 => Classification::MediumVegetation,
            5 => Classification::HighVegetation,
            6 => Classification::Building,
            7 => Classification::LowPoint,
            8 => Classification::ModelKeyPoint,
            9 => Classification::Water,
            12 => Classification::OverlapPoints,
            10 | 11 | 13..=31 => Classification::Reserved(n),
            _ => Classification::UserDefinable(n),
        }
    }
}

impl From<u8> for Classification {
    fn from(n: u8) -> Classification {
        Classification::new(n)
    }
}

impl From<Classification> for u8 {
    fn from(classification: Classification) -> u8 {
        match classification {
            Classification::CreatedNeverClassified => 0,
            Classification::Unclassified => 1,
            Classification::Ground => 2,
            Classification::LowVegetation => 3,
            Classification::MediumVegetation => 4,
            Classification::HighVegetation => 5,
            Classification::Building => 6,
            Classification::LowPoint => 7,
            Classification::ModelKeyPoint => 8,
            Classification::Water => 9,
            Classification::OverlapPoints => 12,
            Classification::Reserved(n) | Classification::UserDefinable(n) => n,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::CreatedNeverClassified => write!(f, "created, never classified"),
            Classification::Unclassified => write!(f, "unclassified"),
            Classification::Ground => write!(f, "ground"),
            Classification::LowVegetation => write!(f, "low vegetation"),
            Classification::MediumVegetation => write!(f, "medium vegetation"),
            Classification::HighVegetation => write!(f, "high vegetation"),
            Classification::Building => write!(f, "building"),
            Classification::LowPoint => write!(f, "low point (noise)"),
            Classification::ModelKeyPoint => write!(f, "model key-point"),
            Classification::Water => write!(f, "water"),
            Classification::OverlapPoints => write!(f, "overlap points"),
            Classification::Reserved(n) => write!(f, "reserved ({n})"),
            Classification::UserDefinable(n) => write!(f, "user definable ({n})"),
        }
    }
}
