use std::sync::Arc;

use log::info;

use crate::bitmap::Bitmap;
use crate::chain::{read_chain, write_chain};
use crate::config::*;
use crate::error::{FsError, Result};
use crate::mft::{Entry, MetadataTable, Record, RecordKind};
use crate::superblock::{read_superblock, write_superblock, SuperBlock};
use crate::BlockDevice;

#[derive(Debug)]
pub struct Volume<D: BlockDevice> {
    device: Arc<D>,
    superblock: SuperBlock,
    layout: Layout,
    bitmap: Bitmap,
    mft: MetadataTable,
}

impl<D: BlockDevice> Volume<D> {
    /// Lays out an empty volume of `total_clusters` clusters on the device.
    pub fn format(device: Arc<D>, total_clusters: u32) -> Result<Self> {
        let superblock = SuperBlock::new(total_clusters)?;
        let layout = Layout::DEFAULT;

        write_superblock(&*device, &superblock)?;
        let bitmap = Bitmap::format(&*device, layout, total_clusters)?;
        let mft = MetadataTable::new(&layout);
        mft.format(&*device)?;
        device.flush()?;

        info!("formatted volume of {} clusters", total_clusters);
        Ok(Self { device, superblock, layout, bitmap, mft })
    }

    /// Opens an existing volume. A missing magic tag is `CorruptVolume`.
    pub fn open(device: Arc<D>) -> Result<Self> {
        let superblock = read_superblock(&*device)?;
        let layout = Layout::DEFAULT;
        let bitmap = Bitmap::load(&*device, layout, superblock.total_clusters)?;
        let mft = MetadataTable::new(&layout);

        info!("opened volume of {} clusters, {} in use", superblock.total_clusters, bitmap.used_count());
        Ok(Self { device, superblock, layout, bitmap, mft })
    }

    // Every method below runs to completion against the device; nothing is rolled back on failure.

    pub fn list(&self) -> Result<Vec<Entry>> {
        self.mft.list(&*self.device)
    }

    pub fn add_record(&mut self, record: &Record) -> Result<usize> {
        self.mft.add(&*self.device, record)
    }

    pub fn find_file(&self, name: &str) -> Result<Option<Record>> {
        self.mft.find_file(&*self.device, name)
    }

    pub fn allocate(&mut self) -> Result<u32> {
        self.bitmap.allocate(&*self.device)
    }

    pub fn write_chain(&mut self, data: &[u8]) -> Result<u32> {
        write_chain(&*self.device, &mut self.bitmap, data)
    }

    pub fn read_chain(&self, first_cluster: u32) -> Result<Vec<u8>> {
        read_chain(&*self.device, first_cluster, self.bitmap.capacity())
    }

    /// The file's contents, cut to the size stored in its record.
    pub fn read_file(&self, record: &Record) -> Result<Vec<u8>> {
        let mut data = self.read_chain(record.first_cluster)?;
        data.truncate(record.size as usize);
        Ok(data)
    }

    /// Stores `data` as a new file named `name`.
    /// If the table turns out to be full the chain is already written and its clusters stay allocated.
    pub fn import(&mut self, name: &str, data: &[u8]) -> Result<Record> {
        let size = u32::try_from(data.len()).map_err(|_| FsError::DiskFull)?;
        let mut record = Record::new(name, RecordKind::File, size, 0)?;
        record.first_cluster = self.write_chain(data)?;
        self.add_record(&record)?;
        Ok(record)
    }

    /// Adds a directory marker backed by one zeroed cluster.
    pub fn mkdir(&mut self, name: &str) -> Result<Record> {
        let mut record = Record::new(name, RecordKind::Directory, 0, 0)?;
        let cluster = self.allocate()?;
        self.device.write_block(cluster, &[0u8; CLUSTER_SIZE])?;
        record.first_cluster = cluster;
        self.add_record(&record)?;
        Ok(record)
    }

    pub fn flush(&self) -> Result<()> {
        self.device.flush()
    }

    pub fn dump(&self) -> String {
        format!(
            "Volume {{ clusters: {}, data_start: {}, used: {}, free: {}, record_slots: {} }}",
            self.superblock.total_clusters,
            self.layout.data_start,
            self.bitmap.used_count(),
            self.bitmap.free_count(),
            self.mft.capacity(),
        )
    }

    pub fn superblock(&self) -> &SuperBlock {
        &self.superblock
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn device(&self) -> Arc<D> {
        Arc::clone(&self.device)
    }
}
