//! The metadata table: one cluster of fixed 128 byte records forming a flat namespace.
//!
//! Record layout:
//! - `0..32`  name, NUL padded (a name of exactly 32 bytes carries no terminator)
//! - `32`     kind, 0 for files and 1 for directory markers
//! - `33..37` size in bytes, little endian
//! - `37..41` first cluster of the data chain, little endian
//!
//! A slot whose first byte is 0 is free. Slots are never released.

use std::borrow::Cow;

use log::debug;

use crate::config::*;
use crate::error::{check_len, FsError, Result};
use crate::superblock::{read_u32, write_u32};
use crate::BlockDevice;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    File = 0,
    Directory = 1,
}

impl From<u8> for RecordKind {
    /// Any non-zero kind byte is treated as a directory marker.
    fn from(raw: u8) -> Self {
        match raw {
            0 => RecordKind::File,
            _ => RecordKind::Directory,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub name: [u8; NAME_LEN],
    pub kind: RecordKind,
    pub size: u32,
    pub first_cluster: u32,
}

impl Record {
    /// Names longer than `NAME_LEN` bytes are cut short.
    pub fn new(name: &str, kind: RecordKind, size: u32, first_cluster: u32) -> Result<Self> {
        let bytes = name.as_bytes();
        if bytes.first().is_none_or(|&b| b == 0) {
            return Err(FsError::InvalidName);
        }
        let len = bytes.len().min(NAME_LEN);
        let mut padded = [0u8; NAME_LEN];
        padded[..len].copy_from_slice(&bytes[..len]);
        Ok(Self { name: padded, kind, size, first_cluster })
    }

    pub fn name_bytes(&self) -> &[u8] {
        let end = self.name.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
        &self.name[..end]
    }

    pub fn name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.name_bytes())
    }

    pub fn name_eq(&self, name: &str) -> bool {
        self.name_bytes() == name.as_bytes()
    }

    pub fn is_file(&self) -> bool {
        self.kind == RecordKind::File
    }

    /// Returns `None` for a free slot.
    pub fn decode(slot: &[u8]) -> Result<Option<Self>> {
        check_len(slot, RECORD_SIZE)?;
        if slot[0] == 0 {
            return Ok(None);
        }
        let mut name = [0u8; NAME_LEN];
        name.copy_from_slice(&slot[..NAME_LEN]);
        Ok(Some(Self {
            name,
            kind: RecordKind::from(slot[TYPE_OFFSET]),
            size: read_u32(slot, SIZE_OFFSET),
            first_cluster: read_u32(slot, FIRST_CLUSTER_OFFSET),
        }))
    }

    pub fn encode(&self, slot: &mut [u8]) -> Result<()> {
        check_len(slot, RECORD_SIZE)?;
        slot.fill(0);
        slot[..NAME_LEN].copy_from_slice(&self.name);
        slot[TYPE_OFFSET] = self.kind as u8;
        write_u32(slot, SIZE_OFFSET, self.size);
        write_u32(slot, FIRST_CLUSTER_OFFSET, self.first_cluster);
        Ok(())
    }
}

/// A record together with the byte offset of its slot inside the table cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub offset: usize,
    pub record: Record,
}

#[derive(Debug, Clone, Copy)]
pub struct MetadataTable {
    cluster: u32,
}

impl MetadataTable {
    pub fn new(layout: &Layout) -> Self {
        Self { cluster: layout.mft }
    }

    pub fn capacity(&self) -> usize {
        RECORDS_PER_TABLE
    }

    /// Writes an empty table.
    pub fn format(&self, device: &(impl BlockDevice + ?Sized)) -> Result<()> {
        device.write_block(self.cluster, &[0u8; CLUSTER_SIZE])
    }

    /// All used slots, in slot order.
    pub fn list(&self, device: &(impl BlockDevice + ?Sized)) -> Result<Vec<Entry>> {
        let table = self.load(device)?;
        let mut entries = Vec::new();
        for (i, slot) in table.chunks_exact(RECORD_SIZE).enumerate() {
            if let Some(record) = Record::decode(slot)? {
                entries.push(Entry { offset: i * RECORD_SIZE, record });
            }
        }
        Ok(entries)
    }

    /// Stores `record` in the first free slot and returns the slot's offset.
    pub fn add(&self, device: &(impl BlockDevice + ?Sized), record: &Record) -> Result<usize> {
        let mut table = self.load(device)?;
        let (i, slot) = table
            .chunks_exact_mut(RECORD_SIZE)
            .enumerate()
            .find(|(_, slot)| slot[0] == 0)
            .ok_or(FsError::DirectoryFull)?;
        record.encode(slot)?;
        let offset = i * RECORD_SIZE;
        device.write_block(self.cluster, &table)?;
        debug!("record '{}' stored at offset {}", record.name(), offset);
        Ok(offset)
    }

    /// First file record named `name`. Directory markers never match.
    pub fn find_file(&self, device: &(impl BlockDevice + ?Sized), name: &str) -> Result<Option<Record>> {
        Ok(self
            .list(device)?
            .into_iter()
            .map(|entry| entry.record)
            .find(|record| record.is_file() && record.name_eq(name)))
    }

    fn load(&self, device: &(impl BlockDevice + ?Sized)) -> Result<Vec<u8>> {
        let mut table = vec![0u8; CLUSTER_SIZE];
        device.read_block(self.cluster, &mut table)?;
        Ok(table)
    }
}
