//! In-process Memory Source
//!
//! Reads and writes the memory of the current process. This is the source
//! used when the library runs inside the host itself.

use super::MemorySource;
use crate::error::MemoryError;

/// Direct access to the current process's memory
#[derive(Debug)]
pub struct LocalMemory {
    _private: (),
}

impl LocalMemory {
    /// Create an in-process memory source.
    ///
    /// # Safety
    ///
    /// Every address later read or written through this source (directly,
    /// or through views, pointers and list walks built on it) must point to
    /// live memory of the current process that is valid for the accessed
    /// size. Addresses normally come from the host itself, which owns the
    /// memory and must keep it alive while views over it are in use.
    pub unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl MemorySource for LocalMemory {
    fn read_bytes(&self, address: usize, size: usize) -> Result<Vec<u8>, MemoryError> {
        if address == 0 {
            return Err(MemoryError::NullAddress);
        }
        let mut buffer = vec![0u8; size];
        // SAFETY: the constructor's contract makes `address..address + size`
        // readable memory of this process.
        unsafe {
            std::ptr::copy_nonoverlapping(address as *const u8, buffer.as_mut_ptr(), size);
        }
        Ok(buffer)
    }

    fn write_bytes(&self, address: usize, data: &[u8]) -> Result<(), MemoryError> {
        if address == 0 {
            return Err(MemoryError::NullAddress);
        }
        // SAFETY: as above, for writable memory.
        unsafe {
            std::ptr::copy_nonoverlapping(data.as_ptr(), address as *mut u8, data.len());
        }
        Ok(())
    }

    fn is_live(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_memory_reads_and_writes_through() {
        let mut block = Box::new([0u8; 16]);
        block[3] = 0x7f;
        let address = block.as_mut_ptr() as usize;
        let memory = unsafe { LocalMemory::new() };

        assert_eq!(memory.read_bytes(address + 3, 1).unwrap(), vec![0x7f]);
        memory.write_bytes(address + 8, &[1, 2, 3, 4]).unwrap();
        assert_eq!(block[8..12], [1, 2, 3, 4]);
        assert!(memory.is_live());
    }

    #[test]
    fn test_local_memory_rejects_null() {
        let memory = unsafe { LocalMemory::new() };
        assert_eq!(memory.read_bytes(0, 4), Err(MemoryError::NullAddress));
        assert_eq!(memory.write_bytes(0, &[1]), Err(MemoryError::NullAddress));
    }
}
