//! Error types
//!
//! `ParseError` covers a single font file, `FontError` everything the
//! registry and font handles can report. Non-fatal directory scan
//! conditions are `ScanWarning`s: logged and kept, never returned.

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while decoding one font file
#[derive(Debug, Error)]
pub enum ParseError {
    /// The font file could not be opened
    #[error("failed to open font file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Fewer than six header bytes were available
    #[error("truncated font header: {found} of 6 bytes")]
    TruncatedHeader { found: usize },
    /// A glyph row ended early
    #[error("truncated glyph data at row {index}")]
    TruncatedGlyphData { index: usize },
    /// Read failed for a reason other than end of file
    #[error("failed to read font data: {source}")]
    Read {
        #[source]
        source: io::Error,
    },
}

/// Registry and font handle errors
#[derive(Debug, Error)]
pub enum FontError {
    /// Filename prefix before the separator is not a font number
    #[error("invalid font number prefix {prefix:?} in {file}")]
    InvalidFontNumberPrefix {
        file: String,
        prefix: String,
        #[source]
        source: ParseIntError,
    },
    /// Filename prefix is a number, but larger than `max`
    #[error("font number {number} in {file} exceeds maximum {max}")]
    FontNumberTooLarge {
        file: String,
        number: usize,
        max: usize,
    },
    /// Filename lacks the number separator (strict scan mode only)
    #[error("malformed font filename: {file}")]
    MalformedFilename { file: String },
    /// No font is registered under this number
    #[error("no font registered with number {0}")]
    UnknownFont(usize),
    /// Character code is not encoded by the font
    #[error("character {code} not in font (first {start}, count {total})")]
    CharNotInFont { code: u8, start: u8, total: u8 },
    /// Absolute row key outside the glyph row store
    #[error("index ({index}) out of range [0,{len})")]
    IndexOutOfRange { index: usize, len: usize },
    /// Loading the font file failed
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Non-fatal condition met while scanning the font directory
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanWarning {
    #[error("font directory {} unavailable ({reason}) - check your installation", dir.display())]
    DirectoryUnavailable { dir: PathBuf, reason: String },
    #[error("no fonts found in {}", dir.display())]
    NoFontsFound { dir: PathBuf },
    #[error("invalid font file: {file}")]
    MalformedFilename { file: String },
}

pub type FontResult<T> = Result<T, FontError>;
