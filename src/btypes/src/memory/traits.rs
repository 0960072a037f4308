//! Memory Source Trait

use crate::error::MemoryError;
use crate::schema::POINTER_SIZE;
use byteorder::{ByteOrder, LE};

/// Trait for reading and writing host memory
pub trait MemorySource: Send + Sync {
    /// Read bytes from a virtual address
    fn read_bytes(&self, address: usize, size: usize) -> Result<Vec<u8>, MemoryError>;

    /// Write bytes to a virtual address, immediately
    fn write_bytes(&self, address: usize, data: &[u8]) -> Result<(), MemoryError>;

    /// Check if this is a live (writable) source
    fn is_live(&self) -> bool;

    /// Read a pointer (usize) from memory
    fn read_ptr(&self, address: usize) -> Result<usize, MemoryError> {
        let bytes = self.read_bytes(address, POINTER_SIZE)?;
        Ok(LE::read_uint(&bytes, POINTER_SIZE) as usize)
    }

    /// Write a pointer (usize) to memory
    fn write_ptr(&self, address: usize, value: usize) -> Result<(), MemoryError> {
        let mut bytes = [0u8; POINTER_SIZE];
        LE::write_uint(&mut bytes, value as u64, POINTER_SIZE);
        self.write_bytes(address, &bytes)
    }

    /// Read a null-terminated string from memory
    ///
    /// Reads byte by byte so a short string near the end of a mapping does
    /// not fail on bytes past its terminator.
    fn read_cstring(&self, address: usize, max_len: usize) -> Result<String, MemoryError> {
        let mut bytes = Vec::new();
        for i in 0..max_len {
            let byte = self.read_bytes(address + i, 1)?[0];
            if byte == 0 {
                break;
            }
            bytes.push(byte);
        }
        Ok(String::from_utf8_lossy(&bytes).to_string())
    }
}
