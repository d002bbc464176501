mod common;

use std::sync::Arc;

use common::{RamDisk, SMALL_VOLUME};
use ntfsx::{Bitmap, BlockDevice, Error, Layout, Volume};

fn count_ones(bytes: &[u8]) -> u32 {
    bytes.iter().map(|b| b.count_ones()).sum()
}

#[test]
fn test_first_fit_order() {
    let rd = RamDisk::new(SMALL_VOLUME as usize);
    let mut bitmap = Bitmap::format(&rd, Layout::DEFAULT, SMALL_VOLUME).unwrap();
    for expected in 3..10 {
        assert_eq!(bitmap.allocate(&rd).unwrap(), expected);
    }
}

#[test]
fn test_reserved_clusters_never_allocated() {
    let rd = RamDisk::new(SMALL_VOLUME as usize);
    let mut bitmap = Bitmap::format(&rd, Layout::DEFAULT, SMALL_VOLUME).unwrap();
    assert!(bitmap.is_used(0));
    assert!(bitmap.is_used(1));
    assert!(bitmap.is_used(2));
    assert!(!bitmap.is_used(3));

    let mut seen = Vec::new();
    while let Ok(cluster) = bitmap.allocate(&rd) {
        assert!(cluster >= 3 && cluster < SMALL_VOLUME);
        assert!(!seen.contains(&cluster), "cluster {} handed out twice", cluster);
        seen.push(cluster);
    }
    assert_eq!(seen.len(), 29);
}

#[test]
fn test_disk_full() {
    let rd = RamDisk::new(SMALL_VOLUME as usize);
    let mut bitmap = Bitmap::format(&rd, Layout::DEFAULT, SMALL_VOLUME).unwrap();
    for _ in 0..bitmap.capacity() {
        bitmap.allocate(&rd).unwrap();
    }
    assert_eq!(bitmap.free_count(), 0);
    assert!(matches!(bitmap.allocate(&rd), Err(Error::DiskFull)));
}

#[test]
fn test_write_through() {
    let rd = RamDisk::new(SMALL_VOLUME as usize);
    let mut bitmap = Bitmap::format(&rd, Layout::DEFAULT, SMALL_VOLUME).unwrap();
    for n in 1..=5 {
        bitmap.allocate(&rd).unwrap();
        let persisted = rd.raw_block(1);
        assert_eq!(count_ones(&persisted), n);
        // Reserved bits stay clear on disk.
        assert_eq!(persisted[0] & 0b111, 0);
    }
}

#[test]
fn test_reload_continues_after_used() {
    let rd = Arc::new(RamDisk::new(SMALL_VOLUME as usize));
    let mut volume = Volume::format(Arc::clone(&rd), SMALL_VOLUME).unwrap();
    assert_eq!(volume.allocate().unwrap(), 3);
    assert_eq!(volume.allocate().unwrap(), 4);
    drop(volume);

    let mut volume = Volume::open(Arc::clone(&rd)).unwrap();
    assert_eq!(volume.bitmap().used_count(), 2);
    assert_eq!(volume.allocate().unwrap(), 5);
}

#[test]
fn test_fills_holes_first() {
    let rd = RamDisk::new(SMALL_VOLUME as usize);
    let mut raw = vec![0u8; rd.block_size()];
    raw[0] = 0b0111_1000; // clusters 3..=6 already taken
    raw[1] = 0b0000_0001; // cluster 8 taken, 7 free
    rd.write_block(1, &raw).unwrap();

    let mut bitmap = Bitmap::load(&rd, Layout::DEFAULT, SMALL_VOLUME).unwrap();
    assert_eq!(bitmap.used_count(), 5);
    assert_eq!(bitmap.allocate(&rd).unwrap(), 7);
    assert_eq!(bitmap.allocate(&rd).unwrap(), 9);
}
