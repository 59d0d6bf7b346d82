use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One entry written to disk.
#[derive(Clone, Debug)]
pub struct ExtractedEntry {
    pub original_path: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    pub size: u64,
}

/// What an extraction produced.
#[derive(Clone, Debug, Default)]
pub struct ExtractReport {
    pub entry_count: usize,
    pub total_bytes: u64,
    pub entries: Vec<ExtractedEntry>,
}

impl ExtractReport {
    pub(crate) fn record(&mut self, entry: ExtractedEntry) {
        self.entry_count += 1;
        self.total_bytes += entry.size;
        self.entries.push(entry);
    }

    pub fn files(&self) -> impl Iterator<Item = &ExtractedEntry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::File)
    }
}
