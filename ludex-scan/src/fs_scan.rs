//! Firmware and asset scanning.
//!
//! These scanners are pure transformations of filesystem facts into
//! records: size, derived name variants and, for firmware, content
//! hashes. No provider calls, no policy branching. The directories the
//! files live in are supplied by the caller, which owns the library's
//! path conventions.

use std::io::{self, Read};
use std::path::Path;

use async_trait::async_trait;
use sha1::Digest;

use ludex_core::{FileHashes, Firmware, Platform, Save, Screenshot, State, fsname};
use ludex_meta::FilesystemFacts;

use crate::Scanner;
use crate::error::ScanError;

const CHUNK_SIZE: usize = 64 * 1024; // 64 KB

/// Common file facts shared by every asset kind.
struct AssetFacts {
    file_path: String,
    file_name: String,
    file_name_no_tags: String,
    file_name_no_ext: String,
    file_extension: String,
    file_size_bytes: u64,
}

impl Scanner {
    /// Build a firmware record for one file under the platform's
    /// firmware directory.
    pub async fn scan_firmware(
        &self,
        platform: &Platform,
        firmware_dir: &Path,
        file_name: &str,
        prior: Option<&Firmware>,
    ) -> Result<Firmware, ScanError> {
        let path = firmware_dir.join(file_name);
        let file_size_bytes = self.fs.file_size(&path).await?;
        let hashes = self.fs.file_hashes(&path).await?;
        let parsed = fsname::parse_fs_name(file_name);

        Ok(Firmware {
            id: prior.and_then(|f| f.id),
            platform_id: platform.id,
            file_path: firmware_dir.display().to_string(),
            file_name: file_name.to_string(),
            file_name_no_tags: parsed.no_tags,
            file_name_no_ext: parsed.no_ext,
            file_extension: parsed.extension,
            file_size_bytes,
            crc_hash: hashes.crc32,
            md5_hash: hashes.md5,
            sha1_hash: hashes.sha1,
            missing_from_fs: false,
        })
    }

    /// Build a save record for one file under the user's saves directory.
    pub async fn scan_save(
        &self,
        saves_dir: &Path,
        file_name: &str,
        rom_id: i64,
        user_id: i64,
        emulator: Option<&str>,
    ) -> Result<Save, ScanError> {
        let facts = self.asset_facts(saves_dir, file_name).await?;
        Ok(Save {
            id: None,
            rom_id,
            user_id,
            emulator: emulator.map(|e| e.to_string()),
            file_path: facts.file_path,
            file_name: facts.file_name,
            file_name_no_tags: facts.file_name_no_tags,
            file_name_no_ext: facts.file_name_no_ext,
            file_extension: facts.file_extension,
            file_size_bytes: facts.file_size_bytes,
        })
    }

    /// Build a state record for one file under the user's states directory.
    pub async fn scan_state(
        &self,
        states_dir: &Path,
        file_name: &str,
        rom_id: i64,
        user_id: i64,
        emulator: Option<&str>,
    ) -> Result<State, ScanError> {
        let facts = self.asset_facts(states_dir, file_name).await?;
        Ok(State {
            id: None,
            rom_id,
            user_id,
            emulator: emulator.map(|e| e.to_string()),
            file_path: facts.file_path,
            file_name: facts.file_name,
            file_name_no_tags: facts.file_name_no_tags,
            file_name_no_ext: facts.file_name_no_ext,
            file_extension: facts.file_extension,
            file_size_bytes: facts.file_size_bytes,
        })
    }

    /// Build a screenshot record for one file under the user's
    /// screenshots directory.
    pub async fn scan_screenshot(
        &self,
        screenshots_dir: &Path,
        file_name: &str,
        rom_id: i64,
        user_id: i64,
    ) -> Result<Screenshot, ScanError> {
        let facts = self.asset_facts(screenshots_dir, file_name).await?;
        Ok(Screenshot {
            id: None,
            rom_id,
            user_id,
            file_path: facts.file_path,
            file_name: facts.file_name,
            file_name_no_tags: facts.file_name_no_tags,
            file_name_no_ext: facts.file_name_no_ext,
            file_extension: facts.file_extension,
            file_size_bytes: facts.file_size_bytes,
        })
    }

    async fn asset_facts(&self, dir: &Path, file_name: &str) -> Result<AssetFacts, ScanError> {
        let path = dir.join(file_name);
        let file_size_bytes = self.fs.file_size(&path).await?;
        let parsed = fsname::parse_fs_name(file_name);
        Ok(AssetFacts {
            file_path: dir.display().to_string(),
            file_name: file_name.to_string(),
            file_name_no_tags: parsed.no_tags,
            file_name_no_ext: parsed.no_ext,
            file_extension: parsed.extension,
            file_size_bytes,
        })
    }
}

/// Default `FilesystemFacts` backed by the local filesystem.
///
/// Hashing runs on the blocking pool so large firmware files never stall
/// the async runtime.
pub struct LocalFilesystem;

#[async_trait]
impl FilesystemFacts for LocalFilesystem {
    async fn file_size(&self, path: &Path) -> io::Result<u64> {
        let path = path.to_owned();
        tokio::task::spawn_blocking(move || std::fs::metadata(&path).map(|m| m.len()))
            .await
            .map_err(io::Error::other)?
    }

    async fn file_hashes(&self, path: &Path) -> io::Result<FileHashes> {
        let path = path.to_owned();
        tokio::task::spawn_blocking(move || {
            let file = std::fs::File::open(&path)?;
            hash_reader(file)
        })
        .await
        .map_err(io::Error::other)?
    }
}

/// Stream a reader through CRC32, MD5 and SHA1 in one pass.
pub fn hash_reader(mut reader: impl Read) -> io::Result<FileHashes> {
    let mut crc = crc32fast::Hasher::new();
    let mut md5 = md5::Context::new();
    let mut sha = sha1::Sha1::new();
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        crc.update(&buf[..n]);
        md5.consume(&buf[..n]);
        sha.update(&buf[..n]);
    }

    Ok(FileHashes {
        crc32: Some(format!("{:08x}", crc.finalize())),
        md5: Some(format!("{:x}", md5.compute())),
        sha1: Some(format!("{:x}", sha.finalize())),
    })
}
