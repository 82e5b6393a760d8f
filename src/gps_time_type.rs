/// The meaning of GPS time in the point records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GpsTimeType {
    /// GPS Week Time (the same as previous versions of LAS).
    #[default]
    Week,
    /// Standard GPS Time minus 1e9.
    Standard,
}

impl GpsTimeType {
    /// Returns true if this time type is gps standard time.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::GpsTimeType;
    /// assert!(!GpsTimeType::Week.is_standard());
    /// assert!(GpsTimeType::Standard.is_standard());
    /// ```
    pub fn is_standard(&self) -> bool {
        match *self {
            GpsTimeType::Week => false,
            GpsTimeType::Standard => true,
        }
    }
}

impl From<u16> for GpsTimeType {
    /// Reads bit zero of the header's global encoding.
    fn from(global_encoding: u16) -> GpsTimeType {
        if global_encoding & 1 == 1 {
            GpsTimeType::Standard
        } else {
            GpsTimeType::Week
        }
    }
}
