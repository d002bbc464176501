pub const MAGIC: &[u8; 6] = b"MYSYS ";
pub const MAGIC_OFFSET: usize = 3;
pub const CLUSTER_COUNT_OFFSET: usize = 8; // Overlaps the last magic byte

pub const SECTOR_SIZE: usize = 512;
pub const CLUSTER_SIZE: usize = 4096;
pub const BITMAP_BITS: u32 = (CLUSTER_SIZE * 8) as u32; // Clusters one bitmap cluster can describe

pub const RECORD_SIZE: usize = 128;
pub const RECORDS_PER_TABLE: usize = CLUSTER_SIZE / RECORD_SIZE;
pub const NAME_LEN: usize = 32;
pub const TYPE_OFFSET: usize = 32;
pub const SIZE_OFFSET: usize = 33;
pub const FIRST_CLUSTER_OFFSET: usize = 37;

pub const CHAIN_HEADER_SIZE: usize = 4; // Next cluster index, little endian
pub const CHAIN_PAYLOAD_SIZE: usize = CLUSTER_SIZE - CHAIN_HEADER_SIZE;

/// Fixed cluster indices of the on-disk structures.
/// Everything below `data_start` is reserved and never handed out by the allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub superblock: u32,
    pub bitmap: u32,
    pub mft: u32,
    pub data_start: u32,
}

impl Layout {
    pub const DEFAULT: Layout = Layout {
        superblock: 0,
        bitmap: 1,
        mft: 2,
        data_start: 3,
    };

    pub fn is_reserved(&self, cluster: u32) -> bool {
        cluster < self.data_start
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::DEFAULT
    }
}
