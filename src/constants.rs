//! Global constants for oled_fonts
//!
//! Consolidates the binary font layout and the font directory naming
//! convention to eliminate magic numbers throughout the codebase.

// ============================================================================
// Font File Layout
// ============================================================================

/// Size of the fixed font file header in bytes
pub const HEADER_LEN: usize = 6;

/// Header offset: glyph row width in bytes
pub const HEADER_WIDTH: usize = 0;

/// Header offset: glyph height in pixels
pub const HEADER_HEIGHT: usize = 1;

/// Header offset: code of the first encoded glyph
pub const HEADER_START_CHAR: usize = 2;

/// Header offset: number of encoded glyphs
pub const HEADER_TOTAL_CHAR: usize = 3;

/// Header offset: high component of the map width
pub const HEADER_MAP_WIDTH_HI: usize = 4;

/// Header offset: low component of the map width
pub const HEADER_MAP_WIDTH_LO: usize = 5;

/// Map width is stored as two decimal "digits": `hi * 100 + lo`
pub const MAP_WIDTH_HI_SCALE: u16 = 100;

/// Vertical pixels covered by one glyph row (one byte per column)
pub const PIXELS_PER_ROW: u8 = 8;

/// Zero bytes appended to each row of single-row fonts
pub const SINGLE_ROW_PAD: usize = 1;

// ============================================================================
// Font Directory Naming
// ============================================================================

/// Default marker/extension identifying font files in the font directory
pub const DEFAULT_FONT_EXTENSION: &str = ".bin";

/// Separator between the font number and the font name
pub const FONT_NAME_SEPARATOR: char = '_';

/// Characters stripped from the end of a filename to obtain the font name
pub const FONT_SUFFIX_LEN: usize = 4;

/// Largest font number accepted from a filename; the index has one slot per number
pub const MAX_FONT_NUMBER: usize = 255;

/// Font subdirectory name inside the data directory
pub const FONT_SUBDIR: &str = "fonts";

/// Application directory name under the user's data/config directories
pub const APP_DIR: &str = "oled-fonts";

// ============================================================================
// Helper Functions
// ============================================================================

/// Number of 8-pixel rows needed to cover `height` pixels
#[inline]
pub const fn rows_per_char(height: u8) -> usize {
    (height as usize).div_ceil(PIXELS_PER_ROW as usize)
}

/// Pad bytes appended to every row for a font with `rows_per_char` rows
#[inline]
pub const fn row_pad(rows_per_char: usize) -> usize {
    if rows_per_char == 1 {
        SINGLE_ROW_PAD
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_per_char() {
        assert_eq!(rows_per_char(0), 0);
        assert_eq!(rows_per_char(1), 1);
        assert_eq!(rows_per_char(8), 1);
        assert_eq!(rows_per_char(9), 2);
        assert_eq!(rows_per_char(16), 2);
        assert_eq!(rows_per_char(48), 6);
    }

    #[test]
    fn test_row_pad() {
        assert_eq!(row_pad(0), 0);
        assert_eq!(row_pad(1), 1);
        assert_eq!(row_pad(2), 0);
    }
}
