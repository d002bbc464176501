use log::info;

use crate::config::*;
use crate::error::{check_len, FsError, Result};
use crate::BlockDevice;

/// The first sector of the image.
/// Only the magic tag and the total cluster count are stored, the layout itself is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuperBlock {
    pub total_clusters: u32,
}

impl SuperBlock {
    pub fn new(total_clusters: u32) -> Result<Self> {
        if !Self::is_storable(total_clusters) {
            return Err(FsError::InvalidGeometry(total_clusters));
        }
        Ok(Self { total_clusters })
    }

    /// The count field starts on the last magic byte, so its low byte is pinned to the tag.
    pub fn is_storable(total_clusters: u32) -> bool {
        total_clusters as u8 == MAGIC[CLUSTER_COUNT_OFFSET - MAGIC_OFFSET]
            && total_clusters <= BITMAP_BITS
    }

    pub fn decode(sector: &[u8]) -> Result<Self> {
        check_len(sector, SECTOR_SIZE)?;
        if &sector[MAGIC_OFFSET..MAGIC_OFFSET + MAGIC.len()] != MAGIC {
            return Err(FsError::CorruptVolume);
        }
        let total_clusters = read_u32(sector, CLUSTER_COUNT_OFFSET);
        if total_clusters > BITMAP_BITS {
            return Err(FsError::CorruptVolume);
        }
        Ok(Self { total_clusters })
    }

    pub fn encode(&self, sector: &mut [u8]) -> Result<()> {
        check_len(sector, SECTOR_SIZE)?;
        if !Self::is_storable(self.total_clusters) {
            return Err(FsError::InvalidGeometry(self.total_clusters));
        }
        sector.fill(0);
        sector[MAGIC_OFFSET..MAGIC_OFFSET + MAGIC.len()].copy_from_slice(MAGIC);
        write_u32(sector, CLUSTER_COUNT_OFFSET, self.total_clusters);
        Ok(())
    }
}

pub fn read_superblock<D: BlockDevice + ?Sized>(device: &D) -> Result<SuperBlock> {
    let mut buf = vec![0u8; CLUSTER_SIZE];
    device.read_block(Layout::DEFAULT.superblock, &mut buf)?;
    SuperBlock::decode(&buf[..SECTOR_SIZE])
}

/// Rewrites the first sector, leaving the rest of the superblock cluster untouched.
pub fn write_superblock<D: BlockDevice + ?Sized>(device: &D, superblock: &SuperBlock) -> Result<()> {
    let mut buf = vec![0u8; CLUSTER_SIZE];
    device.read_block(Layout::DEFAULT.superblock, &mut buf)?;
    superblock.encode(&mut buf[..SECTOR_SIZE])?;
    device.write_block(Layout::DEFAULT.superblock, &buf)?;
    device.flush()?;
    info!("superblock written: {} clusters", superblock.total_clusters);
    Ok(())
}

pub(crate) fn read_u32(buf: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

pub(crate) fn write_u32(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}
