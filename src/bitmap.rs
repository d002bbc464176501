//! The cluster allocator.
//! A single bitmap cluster tracks every cluster of the volume, bit `i` set means cluster `i` is in use.
//! The in-memory copy is the only one the volume consults, and it is written back after every change.

use log::debug;

use crate::config::*;
use crate::error::{FsError, Result};
use crate::BlockDevice;

#[derive(Debug)]
pub struct Bitmap {
    bits: Box<[u8]>,
    layout: Layout,
    total_clusters: u32,
}

fn decompose(cluster: u32) -> (usize, u8) {
    ((cluster / 8) as usize, 1 << (cluster % 8))
}

impl Bitmap {
    /// Loads the bitmap cluster of an opened volume.
    pub fn load(device: &(impl BlockDevice + ?Sized), layout: Layout, total_clusters: u32) -> Result<Self> {
        let mut bits = vec![0u8; CLUSTER_SIZE].into_boxed_slice();
        device.read_block(layout.bitmap, &mut bits)?;
        Ok(Self { bits, layout, total_clusters })
    }

    /// Writes an all-clear bitmap for a fresh volume.
    /// Reserved clusters are never marked, they are implicitly in use.
    pub fn format(device: &(impl BlockDevice + ?Sized), layout: Layout, total_clusters: u32) -> Result<Self> {
        let bitmap = Self {
            bits: vec![0u8; CLUSTER_SIZE].into_boxed_slice(),
            layout,
            total_clusters,
        };
        bitmap.persist(device)?;
        Ok(bitmap)
    }

    /// First-fit: hands out the lowest clear cluster in `data_start..total_clusters`.
    pub fn allocate(&mut self, device: &(impl BlockDevice + ?Sized)) -> Result<u32> {
        let cluster = (self.layout.data_start..self.total_clusters)
            .find(|&c| !self.bit(c))
            .ok_or(FsError::DiskFull)?;
        let (byte, mask) = decompose(cluster);
        self.bits[byte] |= mask;
        self.persist(device)?;
        debug!("allocated cluster {}", cluster);
        Ok(cluster)
    }

    /// Reserved clusters and clusters past the end of the volume always count as used.
    pub fn is_used(&self, cluster: u32) -> bool {
        self.layout.is_reserved(cluster) || cluster >= self.total_clusters || self.bit(cluster)
    }

    /// Number of allocated clusters in the data region.
    pub fn used_count(&self) -> u32 {
        (self.layout.data_start..self.total_clusters)
            .filter(|&c| self.bit(c))
            .count() as u32
    }

    pub fn free_count(&self) -> u32 {
        self.capacity() - self.used_count()
    }

    /// Number of clusters the allocator can ever hand out.
    pub fn capacity(&self) -> u32 {
        self.total_clusters.saturating_sub(self.layout.data_start)
    }

    pub fn total_clusters(&self) -> u32 {
        self.total_clusters
    }

    fn bit(&self, cluster: u32) -> bool {
        let (byte, mask) = decompose(cluster);
        self.bits[byte] & mask != 0
    }

    fn persist(&self, device: &(impl BlockDevice + ?Sized)) -> Result<()> {
        device.write_block(self.layout.bitmap, &self.bits)
    }
}
