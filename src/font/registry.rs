//! Font registry
//!
//! Fonts live in a single directory, one file per font:
//!
//! ```text
//! <number>_<name>.bin
//! ```
//!
//! The directory is scanned once to build the number -> name index.
//! Font data is only read when a font is requested, and only the most
//! recently requested font is kept in memory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info, warn};

use crate::config::{Config, ScanMode};
use crate::constants::{
    DEFAULT_FONT_EXTENSION, FONT_NAME_SEPARATOR, FONT_SUFFIX_LEN, MAX_FONT_NUMBER,
};
use crate::error::{FontError, FontResult, ScanWarning};
use crate::font::file::BitmapFont;
use crate::font::source::{DirSource, FontSource};

/// The single cached font
#[derive(Debug)]
struct CachedFont {
    number: usize,
    font: Arc<BitmapFont>,
}

/// Index of the fonts in one directory plus a one-font cache
pub struct FontRegistry<S: FontSource = DirSource> {
    source: S,
    dir: PathBuf,
    extension: String,
    scan_mode: ScanMode,
    /// Slot `n` holds the name of font `n`, empty if unassigned.
    /// `None` until the directory has been scanned.
    index: Option<Vec<String>>,
    warnings: Vec<ScanWarning>,
    cache: Option<CachedFont>,
}

impl FontRegistry<DirSource> {
    /// Registry over a filesystem directory with default settings
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_source(DirSource, dir)
    }

    /// Registry configured from `[fonts]` settings
    pub fn from_config(config: &Config) -> Self {
        Self::with_source(DirSource, config.fonts.font_dir())
            .extension(config.fonts.extension.clone())
            .scan_mode(config.fonts.scan_mode)
    }
}

impl<S: FontSource> FontRegistry<S> {
    pub fn with_source(source: S, dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            dir: dir.into(),
            extension: DEFAULT_FONT_EXTENSION.to_string(),
            scan_mode: ScanMode::default(),
            index: None,
            warnings: Vec::new(),
            cache: None,
        }
    }

    /// Marker a directory entry must contain to count as a font file
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn scan_mode(mut self, mode: ScanMode) -> Self {
        self.scan_mode = mode;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_initialized(&self) -> bool {
        self.index.is_some()
    }

    /// Non-fatal problems met during the directory scan
    pub fn warnings(&self) -> &[ScanWarning] {
        &self.warnings
    }

    /// Number of the font currently held in the cache
    pub fn cached_number(&self) -> Option<usize> {
        self.cache.as_ref().map(|c| c.number)
    }

    /// Scan the font directory. Does nothing after the first successful scan.
    ///
    /// A missing directory, an empty directory and (in lenient mode) badly
    /// named files only produce warnings. A filename whose prefix is not a
    /// number (or is above `MAX_FONT_NUMBER`) aborts the scan. Unlike the
    /// non-fatal outcomes, a failed scan leaves the registry uninitialized,
    /// so the next call scans again and reports the error again rather than
    /// serving an empty index.
    pub fn init(&mut self) -> FontResult<()> {
        if self.index.is_some() {
            return Ok(());
        }

        self.warnings.clear();
        let index = self.scan()?;
        info!(
            "Font index built from {}: {} slots",
            self.dir.display(),
            index.len()
        );
        self.index = Some(index);
        Ok(())
    }

    fn scan(&mut self) -> FontResult<Vec<String>> {
        let entries = match self.source.list(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                self.warn(ScanWarning::DirectoryUnavailable {
                    dir: self.dir.clone(),
                    reason: e.to_string(),
                });
                return Ok(Vec::new());
            }
        };

        let font_files: Vec<String> = entries
            .into_iter()
            .filter(|name| name.contains(self.extension.as_str()))
            .collect();

        if font_files.is_empty() {
            self.warn(ScanWarning::NoFontsFound {
                dir: self.dir.clone(),
            });
            return Ok(Vec::new());
        }

        let mut index: Vec<String> = Vec::new();
        for file in font_files {
            let Some((number, name)) = parse_font_filename(&file)? else {
                if self.scan_mode == ScanMode::Strict {
                    return Err(FontError::MalformedFilename { file });
                }
                self.warn(ScanWarning::MalformedFilename { file });
                continue;
            };

            if index.len() <= number {
                index.resize(number + 1, String::new());
            }
            debug!("Indexed font {}: {} ({})", number, name, file);
            index[number] = name;
        }

        Ok(index)
    }

    fn warn(&mut self, warning: ScanWarning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Number of index slots, including unassigned ones
    pub fn count(&mut self) -> FontResult<usize> {
        self.init()?;
        Ok(self.names().len())
    }

    /// Font names by number; unassigned numbers have an empty name
    pub fn font_names(&mut self) -> FontResult<&[String]> {
        self.init()?;
        Ok(self.names())
    }

    fn names(&self) -> &[String] {
        self.index.as_deref().unwrap_or(&[])
    }

    /// Path of font `number` in the font directory
    ///
    /// An empty name marks an unassigned slot, so a file named `3_.bin`
    /// occupies slot 3 in the index but is reported as `UnknownFont(3)`.
    pub fn font_path(&mut self, number: usize) -> FontResult<PathBuf> {
        self.init()?;
        let name = match self.names().get(number) {
            Some(name) if !name.is_empty() => name,
            _ => return Err(FontError::UnknownFont(number)),
        };
        Ok(self
            .dir
            .join(format!("{}{}{}{}", number, FONT_NAME_SEPARATOR, name, self.extension)))
    }

    /// Font `number`, loading it unless it is already cached
    ///
    /// A failed load leaves the previously cached font in place.
    pub fn get_font(&mut self, number: usize) -> FontResult<Arc<BitmapFont>> {
        self.init()?;

        if let Some(cached) = &self.cache {
            if cached.number == number {
                debug!("Font {} cache hit", number);
                return Ok(Arc::clone(&cached.font));
            }
        }

        let path = self.font_path(number)?;
        let font = match BitmapFont::load(&self.source, &path) {
            Ok(font) => Arc::new(font),
            Err(e) => {
                warn!("Failed to load font {}: {}", number, e);
                return Err(e.into());
            }
        };

        info!(
            "Loaded font {} ({}x{}, {} glyphs)",
            path.display(),
            font.width(),
            font.height(),
            font.total_char()
        );

        if let Some(old) = self.cache.replace(CachedFont {
            number,
            font: Arc::clone(&font),
        }) {
            debug!("Evicted font {}", old.number);
        }
        Ok(font)
    }
}

/// Split `<number>_<name>.<ext>` into number and name
///
/// Returns `Ok(None)` when there is no separator. The name is everything
/// between the first separator and the last four characters.
fn parse_font_filename(file: &str) -> FontResult<Option<(usize, String)>> {
    let Some(sep) = file.find(FONT_NAME_SEPARATOR) else {
        return Ok(None);
    };

    let prefix = &file[..sep];
    let number = prefix
        .parse::<usize>()
        .map_err(|source| FontError::InvalidFontNumberPrefix {
            file: file.to_string(),
            prefix: prefix.to_string(),
            source,
        })?;
    if number > MAX_FONT_NUMBER {
        return Err(FontError::FontNumberTooLarge {
            file: file.to_string(),
            number,
            max: MAX_FONT_NUMBER,
        });
    }

    let name_start = sep + FONT_NAME_SEPARATOR.len_utf8();
    let name_end = file
        .char_indices()
        .rev()
        .nth(FONT_SUFFIX_LEN - 1)
        .map_or(0, |(i, _)| i);
    let name = file.get(name_start..name_end).unwrap_or_default();

    Ok(Some((number, name.to_string())))
}
