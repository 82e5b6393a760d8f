/// The red, green and blue channels of a point.
///
/// Values are normalized to 16 bits by the writer of the file, so an 8-bit camera yields values
/// that are multiples of 256.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub red: u16,

    /// Green channel.
    pub green: u16,

    /// Blue channel.
    pub blue: u16,
}

impl Color {
    /// Creates a new color.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::Color;
    /// let color = Color::new(1, 2, 3);
    /// assert_eq!(2, color.green);
    /// ```
    pub fn new(red: u16, green: u16, blue: u16) -> Color {
        Color { red, green, blue }
    }

    /// Scales the channels down to eight bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::Color;
    /// assert_eq!([255, 1, 0], Color::new(65535, 256, 255).to_rgb8());
    /// ```
    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            (self.red >> 8) as u8,
            (self.green >> 8) as u8,
            (self.blue >> 8) as u8,
        ]
    }
}
