//! Monochrome display trait for the 128x64 OLED

/// Errors that can occur while drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed
    Bus,
    /// Coordinates outside the canvas
    OutOfBounds,
}

/// Text size multiplier
///
/// Scale 1 is an 8 px text row, scale 2 is 16 px and scale 4 is 32 px.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextScale {
    Small,
    Medium,
    Large,
}

impl TextScale {
    /// Height of one text row in pixels
    pub const fn row_height(self) -> i32 {
        match self {
            TextScale::Small => 8,
            TextScale::Medium => 16,
            TextScale::Large => 32,
        }
    }
}

/// Trait for the status display
///
/// Drawing calls compose a frame off-screen; nothing is visible until
/// `present` is called.
pub trait Display {
    /// Blank the frame
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text with its top-left corner at `(x, y)`
    fn draw_text(&mut self, x: i32, y: i32, scale: TextScale, text: &str)
        -> Result<(), DisplayError>;

    /// Draw a one-pixel line between two points
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), DisplayError>;

    /// Push the composed frame to the panel
    fn present(&mut self) -> Result<(), DisplayError>;
}
