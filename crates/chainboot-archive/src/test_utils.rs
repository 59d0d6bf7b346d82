//! Builds small zip archives in memory for tests.

use std::io::{Cursor, Write};

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

enum FixtureEntry {
    Dir(String),
    File(String, Vec<u8>),
    Stored(String, Vec<u8>),
}

/// In-memory zip builder. Entry names are written verbatim, so hostile
/// names like `../x` can be produced on purpose.
#[derive(Default)]
pub struct ZipFixture {
    entries: Vec<FixtureEntry>,
}

impl ZipFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir(mut self, name: &str) -> Self {
        self.entries.push(FixtureEntry::Dir(name.to_string()));
        self
    }

    pub fn file(mut self, name: &str, content: &[u8]) -> Self {
        self.entries
            .push(FixtureEntry::File(name.to_string(), content.to_vec()));
        self
    }

    /// Add an uncompressed file, so its bytes appear verbatim in the
    /// archive and can be tampered with.
    pub fn stored_file(mut self, name: &str, content: &[u8]) -> Self {
        self.entries
            .push(FixtureEntry::Stored(name.to_string(), content.to_vec()));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for entry in self.entries {
            match entry {
                FixtureEntry::Dir(name) => writer.add_directory(name, options).unwrap(),
                FixtureEntry::File(name, content) => {
                    writer.start_file(name, options).unwrap();
                    writer.write_all(&content).unwrap();
                }
                FixtureEntry::Stored(name, content) => {
                    let stored = options.compression_method(CompressionMethod::Stored);
                    writer.start_file(name, stored).unwrap();
                    writer.write_all(&content).unwrap();
                }
            }
        }
        writer.finish().unwrap().into_inner()
    }

    /// Write the archive to `path` and return its size.
    pub fn write_to(self, path: &std::path::Path) -> u64 {
        let bytes = self.build();
        std::fs::write(path, &bytes).unwrap();
        bytes.len() as u64
    }
}
