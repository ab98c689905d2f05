use serde::{Deserialize, Serialize};

/// A save file for one game, owned by one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Save {
    pub id: Option<i64>,
    pub rom_id: i64,
    pub user_id: i64,
    /// Emulator subfolder the save was found under, if any.
    pub emulator: Option<String>,

    pub file_path: String,
    pub file_name: String,
    pub file_name_no_tags: String,
    pub file_name_no_ext: String,
    pub file_extension: String,
    pub file_size_bytes: u64,
}

/// An emulator state file for one game, owned by one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub id: Option<i64>,
    pub rom_id: i64,
    pub user_id: i64,
    pub emulator: Option<String>,

    pub file_path: String,
    pub file_name: String,
    pub file_name_no_tags: String,
    pub file_name_no_ext: String,
    pub file_extension: String,
    pub file_size_bytes: u64,
}

/// A user-captured screenshot for one game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    pub id: Option<i64>,
    pub rom_id: i64,
    pub user_id: i64,

    pub file_path: String,
    pub file_name: String,
    pub file_name_no_tags: String,
    pub file_name_no_ext: String,
    pub file_extension: String,
    pub file_size_bytes: u64,
}
