//! Dump File Memory Source
//!
//! Reads a raw memory dump (a byte-for-byte copy of a region of host
//! memory) mapped at the virtual address it was captured from.

use super::MemorySource;
use crate::error::MemoryError;

use memmap2::Mmap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Raw memory dump, mapped read-only
pub struct DumpFile {
    mmap: Mmap,
    /// Virtual address of the first byte of the file
    base_address: usize,
    pub path: PathBuf,
}

impl DumpFile {
    /// Open a dump whose first byte was captured from `base_address`
    pub fn open<P: AsRef<Path>>(path: P, base_address: usize) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;

        // SAFETY: the mapping is read-only; the file is not expected to be
        // modified while the dump is inspected.
        let mmap = unsafe { Mmap::map(&file)? };

        tracing::debug!(
            "Opened dump file {:?} ({} bytes at {:#x})",
            path,
            mmap.len(),
            base_address
        );

        Ok(Self {
            mmap,
            base_address,
            path,
        })
    }

    pub fn base_address(&self) -> usize {
        self.base_address
    }

    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }

    /// Whether `address` falls inside the dumped range
    pub fn contains(&self, address: usize) -> bool {
        address >= self.base_address && address - self.base_address < self.mmap.len()
    }
}

impl MemorySource for DumpFile {
    fn read_bytes(&self, address: usize, size: usize) -> Result<Vec<u8>, MemoryError> {
        if address == 0 {
            return Err(MemoryError::NullAddress);
        }
        let out_of_bounds = || MemoryError::OutOfBounds { address, size };
        let start = address
            .checked_sub(self.base_address)
            .ok_or_else(out_of_bounds)?;
        let end = start.checked_add(size).ok_or_else(out_of_bounds)?;
        let bytes = self.mmap.get(start..end).ok_or_else(out_of_bounds)?;
        Ok(bytes.to_vec())
    }

    fn write_bytes(&self, address: usize, data: &[u8]) -> Result<(), MemoryError> {
        Err(MemoryError::ReadOnly {
            address,
            size: data.len(),
        })
    }

    fn is_live(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn dump_with(bytes: &[u8]) -> (tempfile::NamedTempFile, DumpFile) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        let dump = DumpFile::open(file.path(), 0x7000_0000).unwrap();
        (file, dump)
    }

    #[test]
    fn test_dump_reads_at_base_address() {
        let (_file, dump) = dump_with(&[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(dump.len(), 8);
        assert_eq!(dump.read_bytes(0x7000_0002, 3).unwrap(), vec![3, 4, 5]);
        assert!(dump.contains(0x7000_0007));
        assert!(!dump.contains(0x7000_0008));
    }

    #[test]
    fn test_dump_out_of_range() {
        let (_file, dump) = dump_with(&[0; 8]);
        assert!(matches!(
            dump.read_bytes(0x6fff_ffff, 2),
            Err(MemoryError::OutOfBounds { .. })
        ));
        assert!(matches!(
            dump.read_bytes(0x7000_0006, 4),
            Err(MemoryError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_dump_is_read_only() {
        let (_file, dump) = dump_with(&[0; 8]);
        assert_eq!(
            dump.write_bytes(0x7000_0000, &[1]),
            Err(MemoryError::ReadOnly {
                address: 0x7000_0000,
                size: 1
            })
        );
        assert!(!dump.is_live());
    }
}
