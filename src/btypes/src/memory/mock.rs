//! Mock Memory Source
//!
//! A byte buffer mapped at a base address. Stands in for host memory in
//! tests and when building structures offline.

use super::MemorySource;
use crate::error::MemoryError;

use std::sync::RwLock;

/// A writable in-memory buffer starting at `base_address`
pub struct MockMemorySource {
    data: RwLock<Vec<u8>>,
    base_address: usize,
}

impl MockMemorySource {
    /// Create a zeroed buffer of `size` bytes at `base_address`
    pub fn new(size: usize, base_address: usize) -> Self {
        Self::from_bytes(vec![0; size], base_address)
    }

    /// Create a buffer with existing contents
    pub fn from_bytes(data: Vec<u8>, base_address: usize) -> Self {
        Self {
            data: RwLock::new(data),
            base_address,
        }
    }

    pub fn base_address(&self) -> usize {
        self.base_address
    }

    pub fn len(&self) -> usize {
        self.data.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the whole buffer
    pub fn snapshot(&self) -> Vec<u8> {
        self.data.read().map(|d| d.clone()).unwrap_or_default()
    }

    fn range(&self, address: usize, size: usize, len: usize) -> Result<(usize, usize), MemoryError> {
        if address == 0 {
            return Err(MemoryError::NullAddress);
        }
        let out_of_bounds = MemoryError::OutOfBounds { address, size };
        let start = address
            .checked_sub(self.base_address)
            .ok_or(out_of_bounds.clone())?;
        let end = start.checked_add(size).ok_or(out_of_bounds.clone())?;
        if end > len {
            return Err(out_of_bounds);
        }
        Ok((start, end))
    }
}

impl MemorySource for MockMemorySource {
    fn read_bytes(&self, address: usize, size: usize) -> Result<Vec<u8>, MemoryError> {
        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        let (start, end) = self.range(address, size, data.len())?;
        Ok(data[start..end].to_vec())
    }

    fn write_bytes(&self, address: usize, bytes: &[u8]) -> Result<(), MemoryError> {
        let mut data = self.data.write().unwrap_or_else(|e| e.into_inner());
        let (start, end) = self.range(address, bytes.len(), data.len())?;
        data[start..end].copy_from_slice(bytes);
        Ok(())
    }

    fn is_live(&self) -> bool {
        false
    }
}
