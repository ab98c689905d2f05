//! Scan result journal.
//!
//! Collects per-entity outcomes during a scan pass and writes a
//! human-readable report. The scanner itself only emits `log` macros;
//! callers that want a persistent record feed results into a `ScanLog`.

use std::path::Path;

use ludex_core::{Platform, Rom};
use ludex_meta::{ALL_SOURCES, MetadataSource};

/// A single entry in the scan log.
#[derive(Debug, Clone)]
pub enum ScanLogEntry {
    PlatformIdentified {
        slug: String,
        fs_slug: String,
        name: String,
    },
    PlatformUnidentified {
        slug: String,
    },
    GameIdentified {
        fs_name: String,
        name: String,
        /// Sources that contributed an id to the record.
        sources: Vec<MetadataSource>,
    },
    GameUnidentified {
        fs_name: String,
        crc32: Option<String>,
        md5: Option<String>,
        sha1: Option<String>,
    },
    Error {
        fs_name: String,
        message: String,
    },
}

/// Collects scan results and writes a report file.
#[derive(Debug, Default)]
pub struct ScanLog {
    entries: Vec<ScanLogEntry>,
}

impl ScanLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: ScanLogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ScanLogEntry] {
        &self.entries
    }

    /// Record a resolved platform.
    pub fn record_platform(&mut self, platform: &Platform) {
        if platform.is_identified() || platform.tgdb_id.is_some() {
            self.add(ScanLogEntry::PlatformIdentified {
                slug: platform.slug.clone(),
                fs_slug: platform.fs_slug.clone(),
                name: platform.name.clone(),
            });
        } else {
            self.add(ScanLogEntry::PlatformUnidentified {
                slug: platform.slug.clone(),
            });
        }
    }

    /// Record a scanned game.
    pub fn record_rom(&mut self, rom: &Rom) {
        if rom.is_identified() {
            let sources = ALL_SOURCES
                .iter()
                .copied()
                .filter(|s| s.rom_id(rom).is_some())
                .collect();
            self.add(ScanLogEntry::GameIdentified {
                fs_name: rom.fs_name.clone(),
                name: rom.name.clone(),
                sources,
            });
        } else {
            self.add(ScanLogEntry::GameUnidentified {
                fs_name: rom.fs_name.clone(),
                crc32: rom.crc_hash.clone(),
                md5: rom.md5_hash.clone(),
                sha1: rom.sha1_hash.clone(),
            });
        }
    }

    pub fn summary(&self) -> ScanSummary {
        let mut summary = ScanSummary::default();
        for entry in &self.entries {
            match entry {
                ScanLogEntry::PlatformIdentified { .. } => summary.platforms_identified += 1,
                ScanLogEntry::PlatformUnidentified { .. } => summary.platforms_unidentified += 1,
                ScanLogEntry::GameIdentified { .. } => summary.games_identified += 1,
                ScanLogEntry::GameUnidentified { .. } => summary.games_unidentified += 1,
                ScanLogEntry::Error { .. } => summary.errors += 1,
            }
        }
        summary
    }

    /// Write the log to a file.
    pub fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        use std::io::Write;

        let mut file = std::fs::File::create(path)?;
        let summary = self.summary();

        writeln!(file, "=== Scan Log ===")?;
        writeln!(
            file,
            "Date: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(file)?;
        writeln!(file, "--- Summary ---")?;
        writeln!(
            file,
            "Platforms: {} identified, {} unidentified",
            summary.platforms_identified, summary.platforms_unidentified
        )?;
        writeln!(
            file,
            "Games: {} identified, {} unidentified",
            summary.games_identified, summary.games_unidentified
        )?;
        writeln!(file, "Errors: {}", summary.errors)?;
        writeln!(file)?;
        writeln!(file, "--- Details ---")?;
        writeln!(file)?;

        for entry in &self.entries {
            match entry {
                ScanLogEntry::PlatformIdentified {
                    slug,
                    fs_slug,
                    name,
                } => {
                    writeln!(file, "[PLATFORM] {slug} [{fs_slug}] -> \"{name}\"")?;
                }
                ScanLogEntry::PlatformUnidentified { slug } => {
                    writeln!(file, "[PLATFORM?] {slug} not identified")?;
                }
                ScanLogEntry::GameIdentified {
                    fs_name,
                    name,
                    sources,
                } => {
                    let names: Vec<&str> = sources.iter().map(|s| s.short_name()).collect();
                    writeln!(file, "[OK] {} -> \"{}\" ({})", fs_name, name, names.join(", "))?;
                }
                ScanLogEntry::GameUnidentified {
                    fs_name,
                    crc32,
                    md5,
                    sha1,
                } => {
                    writeln!(file, "[UNIDENTIFIED] {fs_name}")?;
                    if let Some(crc) = crc32 {
                        writeln!(file, "     CRC32: {crc}")?;
                    }
                    if let Some(md5) = md5 {
                        writeln!(file, "     MD5:   {md5}")?;
                    }
                    if let Some(sha1) = sha1 {
                        writeln!(file, "     SHA1:  {sha1}")?;
                    }
                }
                ScanLogEntry::Error { fs_name, message } => {
                    writeln!(file, "[ERROR] {fs_name}: {message}")?;
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ScanSummary {
    pub platforms_identified: usize,
    pub platforms_unidentified: usize,
    pub games_identified: usize,
    pub games_unidentified: usize,
    pub errors: usize,
}
