//! Cluster chains: a byte sequence spread over linked data clusters.
//! Every cluster starts with the little endian index of the next one, 0 marks the end.
//! The last payload is zero padded, so the logical length lives in the owning record.

use log::{debug, trace};

use crate::bitmap::Bitmap;
use crate::config::*;
use crate::error::{FsError, Result};
use crate::superblock::{read_u32, write_u32};
use crate::BlockDevice;

/// Number of clusters a chain of `len` bytes occupies.
/// An empty sequence still takes one cluster.
pub fn chain_len(len: usize) -> usize {
    len.div_ceil(CHAIN_PAYLOAD_SIZE).max(1)
}

/// Writes `data` to freshly allocated clusters and returns the first one.
/// Each cluster is written once, as soon as the index of its successor is known.
pub fn write_chain(
    device: &(impl BlockDevice + ?Sized),
    bitmap: &mut Bitmap,
    data: &[u8],
) -> Result<u32> {
    let mut chunks = data.chunks(CHAIN_PAYLOAD_SIZE);
    let mut chunk = chunks.next().unwrap_or(&[]);
    let first = bitmap.allocate(device)?;
    let mut current = first;
    let mut block = vec![0u8; CLUSTER_SIZE];

    loop {
        block.fill(0);
        block[CHAIN_HEADER_SIZE..CHAIN_HEADER_SIZE + chunk.len()].copy_from_slice(chunk);
        match chunks.next() {
            Some(next_chunk) => {
                let next = bitmap.allocate(device)?;
                write_u32(&mut block, 0, next);
                device.write_block(current, &block)?;
                current = next;
                chunk = next_chunk;
            }
            None => {
                device.write_block(current, &block)?;
                break;
            }
        }
    }

    debug!("wrote {} bytes as chain {}..={}", data.len(), first, current);
    Ok(first)
}

/// Concatenates the payload of every cluster from `first` to the terminating one.
/// The result is always a whole number of payloads long.
/// `limit` bounds the walk, a chain visiting more clusters than that must loop.
pub fn read_chain(device: &(impl BlockDevice + ?Sized), first: u32, limit: u32) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut block = vec![0u8; CLUSTER_SIZE];
    let mut current = first;
    let mut visited = 0u32;

    while current != 0 {
        if visited == limit {
            return Err(FsError::CorruptChain(first));
        }
        device.read_block(current, &mut block)?;
        let next = read_u32(&block, 0);
        trace!("chain {}: cluster {} -> {}", first, current, next);
        out.extend_from_slice(&block[CHAIN_HEADER_SIZE..]);
        visited += 1;
        current = next;
    }

    Ok(out)
}
