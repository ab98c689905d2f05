use serde::{Deserialize, Serialize};

/// Content hashes for a single file.
///
/// All hex strings are lowercase; CRC32 is zero-padded to 8 digits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileHashes {
    pub crc32: Option<String>,
    pub md5: Option<String>,
    pub sha1: Option<String>,
}

/// One physical file belonging to a game, with its precomputed hashes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RomFile {
    pub file_name: String,
    pub file_size_bytes: u64,
    pub crc_hash: Option<String>,
    pub md5_hash: Option<String>,
    pub sha1_hash: Option<String>,
}

/// Filesystem facts for one logical game, as supplied by the walker.
///
/// A multi-file game (disc set, split ROM) carries one `RomFile` per
/// physical file; the group-level hashes cover the combined content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FsRom {
    /// File or directory name as seen on disk.
    pub fs_name: String,
    /// Directory the game lives in, relative to the library root.
    pub fs_path: String,
    pub multi: bool,
    pub files: Vec<RomFile>,

    pub crc_hash: Option<String>,
    pub md5_hash: Option<String>,
    pub sha1_hash: Option<String>,
    pub ra_hash: Option<String>,
}

impl FsRom {
    /// Combined size of all files in the group.
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.file_size_bytes).sum()
    }
}
