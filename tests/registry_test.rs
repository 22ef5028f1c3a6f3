//! Font registry tests against a real font directory
//!
//! Each test builds its own directory under the system temp dir.

use std::fs;
use std::path::PathBuf;

use oled_fonts::{FontError, FontRegistry, ParseError, ScanWarning};

struct FontDir {
    path: PathBuf,
}

impl FontDir {
    fn new(test: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "oled-fonts-{}-{}",
            test,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn write(&self, name: &str, data: &[u8]) -> &Self {
        fs::write(self.path.join(name), data).unwrap();
        self
    }
}

impl Drop for FontDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Serialize a font: header followed by rows without pad bytes
fn encode(header: [u8; 6], rows: &[Vec<u8>]) -> Vec<u8> {
    let mut bytes = header.to_vec();
    for row in rows {
        assert_eq!(row.len(), header[0] as usize);
        bytes.extend_from_slice(row);
    }
    bytes
}

/// Rows with distinct contents: row `i` byte `j` = `i * 7 + j`
fn pattern_rows(count: usize, width: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| (0..width).map(|j| (i * 7 + j) as u8).collect())
        .collect()
}

#[test]
fn test_capital_font_scenario() {
    let dir = FontDir::new("capital");
    let rows = pattern_rows(190, 5);
    dir.write("2_Capital.bin", &encode([5, 16, 32, 95, 0, 3], &rows));

    let mut registry = FontRegistry::new(&dir.path);
    assert_eq!(registry.count().unwrap(), 3);
    assert_eq!(registry.font_names().unwrap()[2], "Capital");
    assert_eq!(
        registry.font_path(2).unwrap(),
        dir.path.join("2_Capital.bin")
    );

    let font = registry.get_font(2).unwrap();
    assert_eq!(font.width(), 5);
    assert_eq!(font.height(), 16);
    assert_eq!(font.start_char(), b' ');
    assert_eq!(font.total_char(), 95);
    assert_eq!(font.map_width(), 3);
    assert_eq!(font.rows_per_char(), 2);
    assert_eq!(font.row_count(), 190);

    for (key, row) in rows.iter().enumerate() {
        assert_eq!(font.row_at(key).unwrap(), row.as_slice());
    }

    // 'A' is glyph 33: rows 66 and 67
    let glyph: Vec<&[u8]> = font.glyph(b'A').unwrap().rows().collect();
    assert_eq!(glyph, vec![rows[66].as_slice(), rows[67].as_slice()]);
}

#[test]
fn test_single_row_font_round_trip() {
    let dir = FontDir::new("single-row");
    let rows = pattern_rows(4, 3);
    dir.write("0_tiny.bin", &encode([3, 8, 48, 4, 1, 27], &rows));

    let mut registry = FontRegistry::new(&dir.path);
    let font = registry.get_font(0).unwrap();
    assert_eq!(font.map_width(), 127);
    assert_eq!(font.row_width(), 4);
    for (key, row) in rows.iter().enumerate() {
        let stored = font.row_at(key).unwrap();
        assert_eq!(&stored[..3], row.as_slice());
        assert_eq!(stored[3], 0);
    }
}

#[test]
fn test_row_at_rejects_out_of_range() {
    let dir = FontDir::new("range");
    dir.write("0_f.bin", &encode([2, 16, 0, 1, 0, 0], &pattern_rows(2, 2)));

    let mut registry = FontRegistry::new(&dir.path);
    let font = registry.get_font(0).unwrap();
    assert!(font.row_at(1).is_ok());
    assert!(matches!(
        font.row_at(2),
        Err(FontError::IndexOutOfRange { index: 2, len: 2 })
    ));
    assert!(font.row_at(usize::MAX).is_err());
}

#[test]
fn test_missing_directory() {
    let path = std::env::temp_dir().join(format!("oled-fonts-missing-{}", std::process::id()));
    let mut registry = FontRegistry::new(&path);

    assert_eq!(registry.count().unwrap(), 0);
    assert!(registry.font_names().unwrap().is_empty());
    assert!(matches!(
        registry.warnings(),
        [ScanWarning::DirectoryUnavailable { .. }]
    ));
}

#[test]
fn test_empty_directory() {
    let dir = FontDir::new("empty");
    dir.write("README", b"no fonts here");

    let mut registry = FontRegistry::new(&dir.path);
    assert_eq!(registry.count().unwrap(), 0);
    assert!(registry.font_names().unwrap().is_empty());
    assert!(matches!(
        registry.warnings(),
        [ScanWarning::NoFontsFound { .. }]
    ));
}

#[test]
fn test_cache_rereads_after_eviction() {
    let dir = FontDir::new("evict");
    dir.write("0_a.bin", &encode([1, 8, 65, 1, 0, 0], &[vec![0x11]]))
        .write("1_b.bin", &encode([1, 8, 65, 1, 0, 0], &[vec![0x22]]));

    let mut registry = FontRegistry::new(&dir.path);
    let a = registry.get_font(0).unwrap();
    assert_eq!(a.row_at(0).unwrap(), &[0x11, 0]);

    // Replace font 0 on disk: a cache hit must not notice
    dir.write("0_a.bin", &encode([1, 8, 65, 1, 0, 0], &[vec![0x33]]));
    assert_eq!(registry.get_font(0).unwrap().row_at(0).unwrap(), &[0x11, 0]);

    // Loading font 1 evicts font 0, so the next request reads the new file
    assert_eq!(registry.get_font(1).unwrap().row_at(0).unwrap(), &[0x22, 0]);
    assert_eq!(registry.get_font(0).unwrap().row_at(0).unwrap(), &[0x33, 0]);

    // Handles taken before eviction stay valid
    assert_eq!(a.row_at(0).unwrap(), &[0x11, 0]);
}

#[test]
fn test_deleted_font_file_keeps_cache() {
    let dir = FontDir::new("deleted");
    dir.write("0_a.bin", &encode([1, 8, 0, 1, 0, 0], &[vec![1]]))
        .write("1_b.bin", &encode([1, 8, 0, 1, 0, 0], &[vec![2]]));

    let mut registry = FontRegistry::new(&dir.path);
    registry.get_font(0).unwrap();
    fs::remove_file(dir.path.join("1_b.bin")).unwrap();

    let err = registry.get_font(1).unwrap_err();
    assert!(matches!(err, FontError::Parse(ParseError::Open { .. })));
    assert_eq!(registry.cached_number(), Some(0));
}

#[test]
fn test_truncated_glyph_data_from_disk() {
    let dir = FontDir::new("truncated");
    let mut bytes = encode([4, 16, 0, 2, 0, 0], &pattern_rows(4, 4));
    bytes.truncate(6 + 4 * 2 + 1);
    dir.write("0_cut.bin", &bytes);

    let mut registry = FontRegistry::new(&dir.path);
    let err = registry.get_font(0).unwrap_err();
    assert!(matches!(
        err,
        FontError::Parse(ParseError::TruncatedGlyphData { index: 2 })
    ));
    assert_eq!(registry.cached_number(), None);
}

#[test]
fn test_init_is_idempotent() {
    let dir = FontDir::new("idempotent");
    dir.write("0_a.bin", &encode([1, 8, 0, 1, 0, 0], &[vec![1]]));

    let mut registry = FontRegistry::new(&dir.path);
    registry.init().unwrap();
    dir.write("5_late.bin", &encode([1, 8, 0, 1, 0, 0], &[vec![1]]));
    registry.init().unwrap();

    assert_eq!(registry.count().unwrap(), 1);
    assert!(matches!(
        registry.get_font(5),
        Err(FontError::UnknownFont(5))
    ));
}

#[test]
fn test_registry_shared_across_threads() {
    use std::sync::{Arc, Mutex};

    let dir = FontDir::new("threads");
    dir.write("0_a.bin", &encode([1, 8, 0, 1, 0, 0], &[vec![1]]))
        .write("1_b.bin", &encode([2, 8, 0, 1, 0, 0], &[vec![2, 2]]));

    let registry = Arc::new(Mutex::new(FontRegistry::new(&dir.path)));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                let font = registry.lock().unwrap().get_font(i % 2).unwrap();
                font.width() as usize
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), i % 2 + 1);
    }
}
