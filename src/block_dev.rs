use crate::error::Result;


pub trait BlockDevice: Send + Sync {
    /// Returns the number of clusters the device currently holds.
    fn num_blocks(&self) -> usize;

    /// Reads a cluster of data from the device.
    /// buf.len() must be equal to block_size().
    fn read_block(&self, block_id: u32, buf: &mut [u8]) -> Result<()>;

    /// Writes a cluster of data to the device.
    /// buf.len() must be equal to block_size().
    fn write_block(&self, block_id: u32, buf: &[u8]) -> Result<()>;

    /// Flushes any buffered data to the underlying storage.
    fn flush(&self) -> Result<()>;

    /// Returns the size of each cluster in bytes.
    fn block_size(&self) -> usize {
        crate::config::CLUSTER_SIZE
    }
}
