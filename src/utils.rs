//! General-use helpers.

use std::borrow::Cow;

/// Converts bytes into a string, following las rules as far as the data allow.
///
/// Las specifies that all string fields should be ASCII and nul filled, but not all las data in
/// the wild follows these rules. Decoding stops at the first nul, invalid UTF-8 is replaced, and
/// trailing whitespace is dropped.
pub trait ToLasStr {
    /// Interprets the bytes as a string, permissively.
    ///
    /// # Examples
    ///
    /// `[u8]` implements `ToLasStr`.
    ///
    /// ```
    /// use las_dataset::utils::ToLasStr;
    /// assert_eq!("LiDAR", [76, 105, 68, 65, 82, 0, 33].to_las_str());
    /// ```
    fn to_las_str(&self) -> Cow<'_, str>;
}

impl ToLasStr for [u8] {
    fn to_las_str(&self) -> Cow<'_, str> {
        let bytes = match self.iter().position(|&n| n == 0) {
            Some(idx) => &self[..idx],
            None => self,
        };
        match String::from_utf8_lossy(bytes) {
            Cow::Borrowed(s) => Cow::Borrowed(s.trim_end()),
            Cow::Owned(s) => Cow::Owned(s.trim_end().to_string()),
        }
    }
}
