// src/registry/codec.rs

//! Loading and saving the registry document
//!
//! The registry is stored as JSON, gzip-compressed by default. Loading
//! accepts either form and sniffs the gzip magic bytes to tell them apart.
//! Saving writes a temporary file next to the registry and renames it into
//! place, so a failed write leaves the previous registry intact.

use super::document::RegistryDocument;
use crate::error::{Error, Result};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Permissions of a written registry file
pub const REGISTRY_MODE: u32 = 0o644;

/// Gzip stream magic: 0x1F 0x8B
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Reads and writes whole registry documents
pub trait DocumentCodec {
    /// Load a document from `path`
    fn load(&self, path: &Path) -> Result<RegistryDocument>;

    /// Write `document` to `path`, replacing whatever was there
    fn save(&self, document: &RegistryDocument, path: &Path) -> Result<()>;
}

/// JSON document codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonCodec {
    compress: bool,
}

impl JsonCodec {
    /// Codec that writes gzip-compressed JSON
    pub fn compressed() -> Self {
        Self { compress: true }
    }

    /// Codec that writes plain, pretty-printed JSON
    pub fn plain() -> Self {
        Self { compress: false }
    }

    fn decode_bytes(data: &[u8]) -> io::Result<RegistryDocument> {
        if data.starts_with(&GZIP_MAGIC) {
            let mut json = Vec::new();
            GzDecoder::new(data).read_to_end(&mut json)?;
            debug!("Decompressed gzip registry ({} bytes)", json.len());
            Ok(serde_json::from_slice(&json)?)
        } else {
            Ok(serde_json::from_slice(data)?)
        }
    }

    fn write_to<W: Write>(&self, document: &RegistryDocument, writer: W) -> io::Result<()> {
        if self.compress {
            let mut encoder = GzEncoder::new(writer, Compression::default());
            serde_json::to_writer(&mut encoder, document)?;
            encoder.finish()?.flush()
        } else {
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, document)?;
            writer.write_all(b"\n")?;
            writer.flush()
        }
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::compressed()
    }
}

impl DocumentCodec for JsonCodec {
    fn load(&self, path: &Path) -> Result<RegistryDocument> {
        let data = fs::read(path).map_err(|e| Error::filesystem(path, e))?;
        Self::decode_bytes(&data).map_err(|e| Error::filesystem(path, e))
    }

    fn save(&self, document: &RegistryDocument, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // Dropping the temp file on any early return removes it
        let mut temp = NamedTempFile::new_in(dir).map_err(|e| Error::filesystem(dir, e))?;
        self.write_to(document, BufWriter::new(temp.as_file_mut()))
            .map_err(|e| Error::filesystem(path, e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| Error::filesystem(path, e))?;

        #[cfg(unix)]
        fs::set_permissions(temp.path(), fs::Permissions::from_mode(REGISTRY_MODE))
            .map_err(|e| Error::filesystem(path, e))?;

        temp.persist(path)
            .map_err(|e| Error::filesystem(path, e.error))?;

        debug!(
            "Wrote registry with {} packages to {}",
            document.packages().len(),
            path.display()
        );
        Ok(())
    }
}
