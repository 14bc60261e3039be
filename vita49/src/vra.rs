// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
VITA Radio Archive (VRA) file format, a container for a sequence of
[`crate::Vrt`] packets with a fixed-length header and a CRC-32 trailer,
read and written through an injected [`crate::storage::StorageBackend`]
rather than a fixed in-memory buffer.
*/

use crate::storage::{self, StorageBackend};
use crate::{crc32, VitaError};

/// Frame Alignment Word opening every VRA file: ASCII `"VRAF"`.
pub const VRA_FAW: [u8; 4] = *b"VRAF";

/// Sentinel trailer value meaning "no CRC present", shared with
/// [`crate::vrl::VRL_NO_CRC`].
pub const VRA_NO_CRC: [u8; 4] = *b"VEND";

/// Fixed length, in bytes, of the VRA file header.
pub const HEADER_LENGTH: usize = 20;

/// Default (and currently only supported) VRA file format version.
pub const DEFAULT_VERSION: u8 = 1;

fn no_crc_sentinel() -> u32 {
    u32::from_be_bytes(VRA_NO_CRC)
}

/// A snapshot of a [`VraFile`]'s 20-byte header.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct VraHeader {
    version: u8,
    file_length: i64,
    crc: u32,
}

impl VraHeader {
    /// File format version. Currently only version 1 is defined.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Total file length in bytes, including header and trailer, as
    /// recorded in the header (0 if not yet written).
    pub fn file_length(&self) -> i64 {
        self.file_length
    }

    /// The CRC-32 recorded in the header, or the [`VRA_NO_CRC`] sentinel
    /// value reinterpreted as an integer if CRC checking is disabled.
    pub fn crc(&self) -> u32 {
        self.crc
    }
}

/// An open VRA archive backed by a [`StorageBackend`]: a 20-byte header,
/// a sequence of packed VRT packets, and a 4-byte CRC-32 (or no-CRC
/// sentinel) trailer.
///
/// Mirrors the teacher's `open`/`append`/`flush` lifecycle: the header's
/// length field may be written lazily (left at 0 until [`Self::flush`] is
/// called), with [`Self::file_length`] falling back to asking the backend
/// for its actual size in that case.
pub struct VraFile<'a> {
    backend: &'a mut dyn StorageBackend,
    version: u8,
    header_file_length: i64,
    crc: u32,
    has_crc: bool,
    write: bool,
    strict: bool,
}

impl<'a> VraFile<'a> {
    /// Opens a VRA archive against `backend`.
    ///
    /// If `read` is set and the backend already holds a complete header,
    /// that header is parsed (and, under `strict`, its CRC verified
    /// immediately against the rest of the backend's contents). Otherwise
    /// a fresh header is established: `set_crc` decides whether a CRC-32
    /// trailer will be written on [`Self::flush`], and if `write` is set
    /// the header is written to the backend immediately. `set_size` is
    /// accepted for symmetry with the read path but has no effect until
    /// the first `flush`, since the length is not known until then.
    pub fn open(
        backend: &'a mut dyn StorageBackend,
        read: bool,
        write: bool,
        set_size: bool,
        set_crc: bool,
        strict: bool,
    ) -> Result<Self, VitaError> {
        let _ = set_size;
        let existing_len = backend.length()?;
        if read && existing_len >= HEADER_LENGTH as i64 {
            let mut header_bytes = [0u8; HEADER_LENGTH];
            backend.read(0, &mut header_bytes)?;
            if header_bytes[0..4] != VRA_FAW {
                return Err(VitaError::InvalidLayout(
                    "missing VRAF frame alignment word".into(),
                ));
            }
            let version = header_bytes[4];
            let header_file_length = i64::from_be_bytes(header_bytes[8..16].try_into().unwrap());
            let crc = u32::from_be_bytes(header_bytes[16..20].try_into().unwrap());
            let has_crc = crc != no_crc_sentinel();
            let mut file = VraFile {
                backend,
                version,
                header_file_length,
                crc,
                has_crc,
                write,
                strict,
            };
            if strict && has_crc {
                file.verify_crc()?;
            }
            Ok(file)
        } else {
            let mut file = VraFile {
                backend,
                version: DEFAULT_VERSION,
                header_file_length: 0,
                crc: if set_crc { 0 } else { no_crc_sentinel() },
                has_crc: set_crc,
                write,
                strict,
            };
            if write {
                file.backend.write(0, &file.header_bytes())?;
            }
            Ok(file)
        }
    }

    fn header_bytes(&self) -> [u8; HEADER_LENGTH] {
        let mut out = [0u8; HEADER_LENGTH];
        out[0..4].copy_from_slice(&VRA_FAW);
        out[4] = self.version;
        out[8..16].copy_from_slice(&self.header_file_length.to_be_bytes());
        out[16..20].copy_from_slice(&self.crc.to_be_bytes());
        out
    }

    /// A snapshot of the current header fields.
    pub fn header(&self) -> VraHeader {
        VraHeader {
            version: self.version,
            file_length: self.header_file_length,
            crc: self.crc,
        }
    }

    /// Whether a CRC-32 trailer is present (as opposed to the no-CRC
    /// sentinel).
    pub fn has_crc(&self) -> bool {
        self.has_crc
    }

    /// Total file length in bytes. Falls back to asking the backend for
    /// its actual length when the header's length field hasn't been
    /// written yet (still 0, i.e. before the first [`Self::flush`]).
    pub fn file_length(&self) -> Result<i64, VitaError> {
        if self.header_file_length != 0 {
            Ok(self.header_file_length)
        } else {
            self.backend.length()
        }
    }

    /// Appends a VRT packet's wire bytes at the current end of the
    /// backing store.
    pub fn append(&mut self, packet: &crate::Vrt) -> Result<(), VitaError> {
        if !self.write {
            return Err(VitaError::ReadOnly);
        }
        let bytes = packet
            .to_bytes()
            .map_err(|e| VitaError::InvalidLayout(e.to_string()))?;
        self.backend.write(storage::EOF, &bytes)
    }

    /// Rewrites the header's length and (if enabled) CRC-32 fields from
    /// the backend's current contents, then flushes the backend.
    ///
    /// Skips rewriting the length/CRC if `force` is false and the header
    /// already has a length recorded, so repeated flushes after the file
    /// is finalized are cheap.
    pub fn flush(&mut self, force: bool) -> Result<(), VitaError> {
        if !self.write {
            return Err(VitaError::ReadOnly);
        }
        if force || self.header_file_length == 0 {
            let total_len = self.backend.length()?;
            self.header_file_length = total_len;
            if self.has_crc {
                let mut body = vec![0u8; total_len as usize];
                self.backend.read(0, &mut body)?;
                body[16..20].copy_from_slice(&[0, 0, 0, 0]);
                self.crc = crc32(&body[..body.len() - 4]);
            }
            self.backend.write(0, &self.header_bytes())?;
            if self.has_crc {
                self.backend
                    .write(total_len - 4, &self.crc.to_be_bytes())?;
            } else {
                self.backend.write(total_len - 4, &VRA_NO_CRC)?;
            }
        }
        self.backend.flush()
    }

    fn verify_crc(&mut self) -> Result<(), VitaError> {
        let total_len = self.file_length()?;
        if total_len < HEADER_LENGTH as i64 + 4 {
            return Err(VitaError::InvalidLayout(
                "file length too short for header and trailer".into(),
            ));
        }
        let mut body = vec![0u8; total_len as usize];
        self.backend.read(0, &mut body)?;
        body[16..20].copy_from_slice(&[0, 0, 0, 0]);
        let computed = crc32(&body[..body.len() - 4]);
        if computed != self.crc {
            return Err(VitaError::CRCMismatch {
                expected: self.crc,
                computed,
            });
        }
        Ok(())
    }

    /// Reads back every VRT packet currently stored in this archive.
    pub fn packets(&mut self) -> Result<Vec<crate::Vrt>, VitaError> {
        let total_len = self.file_length()?;
        if total_len < HEADER_LENGTH as i64 + 4 {
            return Ok(Vec::new());
        }
        let payload_len = total_len as usize - HEADER_LENGTH - 4;
        let mut payload = vec![0u8; payload_len];
        self.backend.read(HEADER_LENGTH as i64, &mut payload)?;
        Ok(crate::vrl::VrlPacketIter::new(&payload).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::Vrt;

    #[test]
    fn round_trip_with_crc() {
        let mut storage = MemoryStorage::new();
        {
            let mut file = VraFile::open(&mut storage, false, true, true, true, false).unwrap();
            file.append(&Vrt::new_signal_data_packet()).unwrap();
            file.append(&Vrt::new_context_packet()).unwrap();
            file.flush(true).unwrap();
        }
        let mut file = VraFile::open(&mut storage, true, false, false, false, true).unwrap();
        assert!(file.has_crc());
        assert_eq!(file.packets().unwrap().len(), 2);
    }

    #[test]
    fn round_trip_without_crc() {
        let mut storage = MemoryStorage::new();
        {
            let mut file = VraFile::open(&mut storage, false, true, true, false, false).unwrap();
            file.append(&Vrt::new_signal_data_packet()).unwrap();
            file.flush(true).unwrap();
        }
        let file = VraFile::open(&mut storage, true, false, false, false, false).unwrap();
        assert!(!file.has_crc());
    }

    #[test]
    fn file_length_falls_back_to_backend_before_first_flush() {
        let mut storage = MemoryStorage::new();
        let mut file = VraFile::open(&mut storage, false, true, true, true, false).unwrap();
        file.append(&Vrt::new_signal_data_packet()).unwrap();
        assert_eq!(file.header().file_length(), 0);
        assert_eq!(file.file_length().unwrap(), storage_len(&file));
    }

    fn storage_len(file: &VraFile) -> i64 {
        file.backend.length().unwrap()
    }

    #[test]
    fn rejects_crc_mismatch_in_strict_mode() {
        let mut storage = MemoryStorage::new();
        {
            let mut file = VraFile::open(&mut storage, false, true, true, true, false).unwrap();
            file.append(&Vrt::new_signal_data_packet()).unwrap();
            file.flush(true).unwrap();
        }
        let mut bytes = storage.into_inner();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        let mut storage = MemoryStorage::new();
        storage.write(storage::EOF, &bytes).unwrap();
        assert!(matches!(
            VraFile::open(&mut storage, true, false, false, false, true),
            Err(VitaError::CRCMismatch { .. })
        ));
    }

    #[test]
    fn append_rejected_when_opened_read_only() {
        let mut storage = MemoryStorage::new();
        {
            let mut file = VraFile::open(&mut storage, false, true, true, true, false).unwrap();
            file.append(&Vrt::new_signal_data_packet()).unwrap();
            file.flush(true).unwrap();
        }
        let mut file = VraFile::open(&mut storage, true, false, false, false, false).unwrap();
        assert!(matches!(
            file.append(&Vrt::new_signal_data_packet()),
            Err(VitaError::ReadOnly)
        ));
    }
}
