//! Core data model for the ludex library scanner.
//!
//! Everything in this crate is plain data: the canonical platform, game,
//! firmware and asset records that scans produce, the filesystem facts that
//! feed them, and the filename parsing used to derive name variants. No I/O
//! and no provider logic lives here.

pub mod assets;
pub mod firmware;
pub mod fsname;
pub mod hashes;
pub mod platform;
pub mod rom;
pub mod util;

pub use assets::{Save, Screenshot, State};
pub use firmware::Firmware;
pub use fsname::{ParsedFsName, parse_fs_name, split_extension, strip_tags};
pub use hashes::{FileHashes, FsRom, RomFile};
pub use platform::Platform;
pub use rom::Rom;
pub use util::humanize_slug;
