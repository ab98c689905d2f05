use serde::{Deserialize, Serialize};

/// A firmware/BIOS file associated with one platform.
///
/// Firmware records are produced by simple hashing; there is no
/// multi-source identification for them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Firmware {
    pub id: Option<i64>,
    pub platform_id: Option<i64>,

    pub file_path: String,
    pub file_name: String,
    pub file_name_no_tags: String,
    pub file_name_no_ext: String,
    pub file_extension: String,
    pub file_size_bytes: u64,

    pub crc_hash: Option<String>,
    pub md5_hash: Option<String>,
    pub sha1_hash: Option<String>,

    pub missing_from_fs: bool,
}
