//! NTFSX is a minimal filesystem living inside one flat image file.
//! No hierarchy, no deletion, no permissions and a single writer.
//!
//! Linear layout, one 4096 byte cluster each:
//! - Cluster 0: Superblock (magic tag at bytes 3..9, cluster count at bytes 8..12)
//! - Cluster 1: Cluster bitmap
//! - Cluster 2: Metadata table ("MFT"), 32 records of 128 bytes
//! - Cluster 3..: Data clusters, linked into chains
//!
//! Layers (from bottom to top):
//! 1. Block Device: cluster granular access to the image.     | `FileDisk`, or user implemented
//! 2. Superblock / Bitmap: volume geometry and allocation.    | Fs implemented
//! 3. Metadata table / Chains: records and their data.        | Fs implemented
//! 4. Volume: the interface the command dispatcher talks to.  | Fs implemented
//! 5. Shell: the interactive command set.                     | Fs implemented

mod config;
mod block_dev;
mod file_disk;
mod superblock;
mod bitmap;
mod mft;
mod chain;
mod fs;
mod shell;
mod error;

pub use block_dev::BlockDevice;
pub use file_disk::FileDisk;
pub use config::*;
pub use superblock::*;
pub use bitmap::Bitmap;
pub use mft::*;
pub use chain::*;
pub use fs::*;
pub use shell::*;
pub use error::FsError as Error;
pub use error::Result;
