use std::fmt;

/// LAS version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// The major version, always 1 in practice.
    pub major: u8,
    /// The minor version.
    pub minor: u8,
}

impl Version {
    /// Creates a new version.
    ///
    /// # Examples
    ///
    /// ```
    /// # use las_dataset::Version;
    /// let version = Version::new(1, 2);
    /// ```
    pub fn new(major: u8, minor: u8) -> Version {
        Version { major, minor }
    }

    /// Does this version store the start of the waveform data packet record in its header?
    ///
    /// # Examples
    ///
    /// ```
    /// # use las_dataset::Version;
    /// assert!(!Version::new(1, 2).has_waveforms());
    /// assert!(Version::new(1, 3).has_waveforms());
    /// ```
    pub fn has_waveforms(&self) -> bool {
        *self >= Version::new(1, 3)
    }

    /// Does this version store point counts in 64-bit fields past the common header prefix?
    ///
    /// # Examples
    ///
    /// ```
    /// # use las_dataset::Version;
    /// assert!(!Version::new(1, 3).has_large_files());
    /// assert!(Version::new(1, 4).has_large_files());
    /// ```
    pub fn has_large_files(&self) -> bool {
        *self >= Version::new(1, 4)
    }

    /// Returns the full size of the public header block for this version.
    ///
    /// # Examples
    ///
    /// ```
    /// # use las_dataset::Version;
    /// assert_eq!(227, Version::new(1, 2).header_size());
    /// assert_eq!(235, Version::new(1, 3).header_size());
    /// assert_eq!(375, Version::new(1, 4).header_size());
    /// ```
    pub fn header_size(&self) -> u16 {
        if self.has_large_files() {
            375
        } else if self.has_waveforms() {
            235
        } else {
            227
        }
    }
}

impl From<(u8, u8)> for Version {
    fn from((major, minor): (u8, u8)) -> Version {
        Version { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
