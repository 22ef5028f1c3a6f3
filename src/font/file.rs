//! Bitmap font file parser
//!
//! File layout:
//!
//! ```text
//! ┌───────┬────────┬───────┬───────┬────────┬────────┬──────────────────┐
//! │ width │ height │ start │ total │ map_hi │ map_lo │ glyph rows ...   │
//! └───────┴────────┴───────┴───────┴────────┴────────┴──────────────────┘
//!   0       1        2       3       4        5        6..
//! ```
//!
//! Glyph data is `total * ceil(height / 8)` rows of `width` bytes, all
//! rows of glyph 0 first, then glyph 1, and so on. Single-row fonts were
//! encoded without a right margin, so a zero byte is appended to every
//! row of those fonts on load.

use std::io::{self, Read};
use std::path::Path;

use log::debug;

use crate::constants::{
    row_pad, rows_per_char, HEADER_HEIGHT, HEADER_LEN, HEADER_MAP_WIDTH_HI,
    HEADER_MAP_WIDTH_LO, HEADER_START_CHAR, HEADER_TOTAL_CHAR, HEADER_WIDTH, MAP_WIDTH_HI_SCALE,
};
use crate::error::{FontError, FontResult, ParseError};
use crate::font::source::FontSource;

/// Decoded font header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontHeader {
    /// Glyph row width in bytes
    pub glyph_width: u8,
    /// Glyph height in pixels
    pub glyph_height: u8,
    /// Code of the first encoded glyph
    pub start_char: u8,
    /// Number of encoded glyphs
    pub total_char: u8,
    /// `hi * 100 + lo`, not a big-endian u16
    pub map_width: u16,
}

impl FontHeader {
    /// Decode the six header bytes
    pub fn from_bytes(bytes: &[u8; HEADER_LEN]) -> Self {
        Self {
            glyph_width: bytes[HEADER_WIDTH],
            glyph_height: bytes[HEADER_HEIGHT],
            start_char: bytes[HEADER_START_CHAR],
            total_char: bytes[HEADER_TOTAL_CHAR],
            map_width: bytes[HEADER_MAP_WIDTH_HI] as u16 * MAP_WIDTH_HI_SCALE
                + bytes[HEADER_MAP_WIDTH_LO] as u16,
        }
    }

    pub fn rows_per_char(&self) -> usize {
        rows_per_char(self.glyph_height)
    }

    /// Stored row width: glyph width plus the single-row pad byte
    pub fn row_width(&self) -> usize {
        self.glyph_width as usize + row_pad(self.rows_per_char())
    }

    /// Total number of rows in the file
    pub fn row_count(&self) -> usize {
        self.total_char as usize * self.rows_per_char()
    }
}

/// Glyph rows addressed by absolute row index
///
/// Rows share one buffer; every row is `row_width` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRows {
    data: Vec<u8>,
    row_width: usize,
    len: usize,
}

impl GlyphRows {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn row_width(&self) -> usize {
        self.row_width
    }

    /// Row at absolute index `key`
    pub fn get(&self, key: usize) -> FontResult<&[u8]> {
        if key >= self.len {
            return Err(FontError::IndexOutOfRange {
                index: key,
                len: self.len,
            });
        }
        let start = key * self.row_width;
        Ok(&self.data[start..start + self.row_width])
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.len).map(move |key| {
            let start = key * self.row_width;
            &self.data[start..start + self.row_width]
        })
    }
}

/// A fully loaded font
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapFont {
    header: FontHeader,
    rows: GlyphRows,
}

impl BitmapFont {
    /// Parse a font from a byte stream
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, ParseError> {
        let mut raw = [0u8; HEADER_LEN];
        let found = read_full(&mut reader, &mut raw)?;
        if found < HEADER_LEN {
            return Err(ParseError::TruncatedHeader { found });
        }
        let header = FontHeader::from_bytes(&raw);

        let width = header.glyph_width as usize;
        let row_width = header.row_width();
        let len = header.row_count();

        // Pad bytes stay zero; only the glyph bytes of each row are filled
        let mut data = vec![0u8; len * row_width];
        for index in 0..len {
            let start = index * row_width;
            let row = &mut data[start..start + width];
            if read_full(&mut reader, row)? < width {
                return Err(ParseError::TruncatedGlyphData { index });
            }
        }

        Ok(Self {
            header,
            rows: GlyphRows {
                data,
                row_width,
                len,
            },
        })
    }

    /// Open `path` through `source` and parse it
    ///
    /// The stream is dropped before returning on every path.
    pub fn load<S: FontSource + ?Sized>(source: &S, path: &Path) -> Result<Self, ParseError> {
        let reader = source.open(path).map_err(|source| ParseError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let font = Self::from_reader(reader)?;
        debug!(
            "Parsed font {}: {}x{}, {} glyphs starting at char {}",
            path.display(),
            font.header.glyph_width,
            font.header.glyph_height,
            font.header.total_char,
            font.header.start_char
        );
        Ok(font)
    }

    pub fn header(&self) -> &FontHeader {
        &self.header
    }

    pub fn width(&self) -> u8 {
        self.header.glyph_width
    }

    pub fn height(&self) -> u8 {
        self.header.glyph_height
    }

    pub fn start_char(&self) -> u8 {
        self.header.start_char
    }

    pub fn total_char(&self) -> u8 {
        self.header.total_char
    }

    pub fn map_width(&self) -> u16 {
        self.header.map_width
    }

    pub fn rows_per_char(&self) -> usize {
        self.header.rows_per_char()
    }

    pub fn row_width(&self) -> usize {
        self.rows.row_width()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &GlyphRows {
        &self.rows
    }

    /// Row at absolute index `key` (`glyph * rows_per_char + row`)
    pub fn row_at(&self, key: usize) -> FontResult<&[u8]> {
        self.rows.get(key)
    }

    /// Absolute row key for row `row` of character `code`
    pub fn key_for(&self, code: u8, row: usize) -> FontResult<usize> {
        let offset = self.glyph_offset(code)?;
        let rows_per_char = self.rows_per_char();
        if row >= rows_per_char {
            return Err(FontError::IndexOutOfRange {
                index: row,
                len: rows_per_char,
            });
        }
        Ok(offset * rows_per_char + row)
    }

    /// All rows of character `code`
    pub fn glyph(&self, code: u8) -> FontResult<Glyph<'_>> {
        let offset = self.glyph_offset(code)?;
        let rows_per_char = self.rows_per_char();
        let row_width = self.row_width();
        let start = offset * rows_per_char * row_width;
        Ok(Glyph {
            code,
            data: &self.rows.data[start..start + rows_per_char * row_width],
            row_width,
            rows_per_char,
        })
    }

    fn glyph_offset(&self, code: u8) -> FontResult<usize> {
        let start = self.header.start_char;
        let total = self.header.total_char;
        let offset = code.wrapping_sub(start) as usize;
        if code < start || offset >= total as usize {
            return Err(FontError::CharNotInFont { code, start, total });
        }
        Ok(offset)
    }
}

/// Rows of one character
#[derive(Debug, Clone, Copy)]
pub struct Glyph<'a> {
    pub code: u8,
    data: &'a [u8],
    row_width: usize,
    rows_per_char: usize,
}

impl<'a> Glyph<'a> {
    pub fn rows_per_char(&self) -> usize {
        self.rows_per_char
    }

    pub fn row_width(&self) -> usize {
        self.row_width
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> + 'a {
        let data = self.data;
        let width = self.row_width;
        (0..self.rows_per_char).map(move |row| &data[row * width..(row + 1) * width])
    }
}

/// Read until `buf` is full or the stream ends; returns bytes read
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, ParseError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => return Err(ParseError::Read { source }),
        }
    }
    Ok(filled)
}
