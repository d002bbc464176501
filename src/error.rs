use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("not an NTFSX volume")]
    CorruptVolume,
    #[error("disk full")]
    DiskFull,
    #[error("metadata table full")]
    DirectoryFull,
    #[error("invalid record name")]
    InvalidName,
    #[error("cluster {0} is out of range")]
    InvalidBlockId(u32),
    #[error("buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("cannot store a volume of {0} clusters")]
    InvalidGeometry(u32),
    #[error("cluster chain starting at {0} does not terminate")]
    CorruptChain(u32),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = core::result::Result<T, FsError>;

/// Rejects buffers whose length differs from what an encoder or device expects.
pub(crate) fn check_len(buf: &[u8], expected: usize) -> Result<()> {
    if buf.len() != expected {
        return Err(FsError::BufferSize { expected, actual: buf.len() });
    }
    Ok(())
}
