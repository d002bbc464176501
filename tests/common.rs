//! Common utilities for tests
#![allow(unused)]

use std::sync::{Arc, Mutex};

use ntfsx::{BlockDevice, Error, Result, Volume, CLUSTER_SIZE};

pub const ORANGE: &str = "\x1b[38;5;214m";
pub const RESET: &str = "\x1b[0m";

/// Provides a macro for logging messages during tests.
/// e.g. log!("placeholder") -> println!("[test] placeholder");
#[macro_export]
macro_rules! log {
    ($msg:expr, $($arg:tt)*) => {
        println!("{}[test] {}{}", crate::common::ORANGE, format!($msg, $($arg)*), crate::common::RESET)
    };
}

pub struct RamDisk {
    inner: Mutex<Vec<u8>>,
    num_blocks: usize,
}

impl RamDisk {
    /// Creates a new RamDisk with the specified number of clusters.
    pub fn new(num_blocks: usize) -> Self {
        RamDisk {
            inner: Mutex::new(vec![0u8; num_blocks * CLUSTER_SIZE]),
            num_blocks,
        }
    }

    /// Raw copy of one cluster, bypassing the filesystem.
    pub fn raw_block(&self, block_id: u32) -> Vec<u8> {
        let start = block_id as usize * CLUSTER_SIZE;
        self.inner.lock().unwrap()[start..start + CLUSTER_SIZE].to_vec()
    }

    /// Overwrites bytes at an absolute image offset.
    pub fn poke(&self, offset: usize, bytes: &[u8]) {
        self.inner.lock().unwrap()[offset..offset + bytes.len()].copy_from_slice(bytes);
    }
}

impl BlockDevice for RamDisk {
    fn num_blocks(&self) -> usize {
        self.num_blocks
    }

    fn read_block(&self, block_id: u32, buf: &mut [u8]) -> Result<()> {
        if block_id as usize >= self.num_blocks {
            return Err(Error::InvalidBlockId(block_id));
        }
        if buf.len() != CLUSTER_SIZE {
            return Err(Error::BufferSize { expected: CLUSTER_SIZE, actual: buf.len() });
        }
        let start = block_id as usize * CLUSTER_SIZE;
        let data = self.inner.lock().unwrap();
        buf.copy_from_slice(&data[start..start + CLUSTER_SIZE]);
        Ok(())
    }

    fn write_block(&self, block_id: u32, buf: &[u8]) -> Result<()> {
        if block_id as usize >= self.num_blocks {
            return Err(Error::InvalidBlockId(block_id));
        }
        if buf.len() != CLUSTER_SIZE {
            return Err(Error::BufferSize { expected: CLUSTER_SIZE, actual: buf.len() });
        }
        let start = block_id as usize * CLUSTER_SIZE;
        let mut data = self.inner.lock().unwrap();
        data[start..start + CLUSTER_SIZE].copy_from_slice(buf);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        // In a RAM disk, flushing is a no-op since data is already in memory.
        Ok(())
    }
}

/// Smallest storable volume: 32 clusters, 29 of them for data.
pub const SMALL_VOLUME: u32 = 32;

pub fn small_volume() -> (Arc<RamDisk>, Volume<RamDisk>) {
    let rd = Arc::new(RamDisk::new(SMALL_VOLUME as usize));
    let volume = Volume::format(Arc::clone(&rd), SMALL_VOLUME).unwrap();
    (rd, volume)
}

/// Printable payload so it survives lossy text decoding unchanged.
pub fn text_payload(len: usize) -> Vec<u8> {
    (0..len).map(|_| b'a' + rand::random::<u8>() % 26).collect()
}
