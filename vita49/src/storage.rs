// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Storage backend collaborator interface used by [`crate::vra::VraFile`] to
read and write archive bytes without this crate depending on a specific
filesystem or transport implementation.
*/

use crate::VitaError;

/// Sentinel offset meaning "append at the current end of the backing
/// store", mirroring the `EOF = -1` convention used for VRA file writes.
pub const EOF: i64 = -1;

/// A seekable byte store that a [`crate::vra::VraFile`] can read from and
/// write to. Implementations might be backed by a `std::fs::File`, an
/// in-memory buffer, or a network-attached object store.
pub trait StorageBackend {
    /// Reads up to `buf.len()` bytes starting at `offset`, returning the
    /// number of bytes actually read.
    fn read(&mut self, offset: i64, buf: &mut [u8]) -> Result<usize, VitaError>;

    /// Writes `buf` starting at `offset`. Passing [`EOF`] appends to the
    /// current end of the store.
    fn write(&mut self, offset: i64, buf: &[u8]) -> Result<(), VitaError>;

    /// Flushes any buffered writes to the backing store.
    fn flush(&mut self) -> Result<(), VitaError>;

    /// Returns the current length of the backing store, in bytes.
    fn length(&self) -> Result<i64, VitaError>;

    /// Closes the backing store, flushing any pending writes first.
    fn close(&mut self) -> Result<(), VitaError>;
}

/// An in-memory [`StorageBackend`], primarily useful for tests and for
/// building a VRA file incrementally before handing it to a real sink.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    buf: Vec<u8>,
}

impl MemoryStorage {
    /// Creates an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the backend, returning its contents.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    /// Borrows the backend's contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&mut self, offset: i64, buf: &mut [u8]) -> Result<usize, VitaError> {
        if offset < 0 {
            return Err(VitaError::OutOfRange);
        }
        let offset = offset as usize;
        if offset >= self.buf.len() {
            return Ok(0);
        }
        let n = buf.len().min(self.buf.len() - offset);
        buf[..n].copy_from_slice(&self.buf[offset..offset + n]);
        Ok(n)
    }

    fn write(&mut self, offset: i64, data: &[u8]) -> Result<(), VitaError> {
        let offset = if offset == EOF {
            self.buf.len()
        } else if offset < 0 {
            return Err(VitaError::OutOfRange);
        } else {
            offset as usize
        };
        let end = offset + data.len();
        if end > self.buf.len() {
            self.buf.resize(end, 0);
        }
        self.buf[offset..end].copy_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), VitaError> {
        Ok(())
    }

    fn length(&self) -> Result<i64, VitaError> {
        Ok(self.buf.len() as i64)
    }

    fn close(&mut self) -> Result<(), VitaError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_read_roundtrip() {
        let mut store = MemoryStorage::new();
        store.write(EOF, &[1, 2, 3, 4]).unwrap();
        store.write(EOF, &[5, 6]).unwrap();
        assert_eq!(store.length().unwrap(), 6);
        let mut buf = [0u8; 6];
        let n = store.read(0, &mut buf).unwrap();
        assert_eq!(n, 6);
        assert_eq!(buf, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn overwrite_in_place() {
        let mut store = MemoryStorage::new();
        store.write(EOF, &[0, 0, 0, 0]).unwrap();
        store.write(1, &[9, 9]).unwrap();
        assert_eq!(store.as_slice(), &[0, 9, 9, 0]);
    }
}
