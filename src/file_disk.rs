//! A block device backed by a host image file.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::config::CLUSTER_SIZE;
use crate::error::{check_len, Result};
use crate::BlockDevice;

pub struct FileDisk {
    inner: Mutex<File>,
}

impl FileDisk {
    /// Opens an existing image for reading and writing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(Self::from_file(file))
    }

    /// Creates (or truncates) an image sized to hold `num_clusters` clusters.
    pub fn create(path: impl AsRef<Path>, num_clusters: u32) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        file.set_len(num_clusters as u64 * CLUSTER_SIZE as u64)?;
        Ok(Self::from_file(file))
    }

    pub fn from_file(file: File) -> Self {
        FileDisk { inner: Mutex::new(file) }
    }

    fn lock(&self) -> MutexGuard<'_, File> {
        // A poisoned lock still guards a usable handle.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl BlockDevice for FileDisk {
    fn num_blocks(&self) -> usize {
        self.lock()
            .metadata()
            .map(|m| (m.len() / CLUSTER_SIZE as u64) as usize)
            .unwrap_or(0)
    }

    /// Clusters past the end of the image read back as zeroes.
    fn read_block(&self, block_id: u32, buf: &mut [u8]) -> Result<()> {
        check_len(buf, CLUSTER_SIZE)?;
        let mut file = self.lock();
        file.seek(SeekFrom::Start(block_id as u64 * CLUSTER_SIZE as u64))?;

        let mut filled = 0;
        while filled < buf.len() {
            match file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        buf[filled..].fill(0);
        Ok(())
    }

    /// Writing past the end of the image grows it.
    fn write_block(&self, block_id: u32, buf: &[u8]) -> Result<()> {
        check_len(buf, CLUSTER_SIZE)?;
        let mut file = self.lock();
        file.seek(SeekFrom::Start(block_id as u64 * CLUSTER_SIZE as u64))?;
        file.write_all(buf)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let mut file = self.lock();
        file.flush()?;
        file.sync_data()?;
        Ok(())
    }
}
