//! The command dispatcher behind the interactive session.
//! Commands are whitespace separated and case sensitive:
//! `dir`, `type <name>`, `mkdir <name>`, `copy <host path>` and `exit`.

use std::io::Write;
use std::path::Path;

use log::warn;

use crate::error::{FsError, Result};
use crate::fs::Volume;
use crate::BlockDevice;

pub const USAGE: &str = "Commands: dir type mkdir copy exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell<D: BlockDevice> {
    volume: Volume<D>,
    cwd: String, // Shown in the prompt only, the namespace is flat
}

impl<D: BlockDevice> Shell<D> {
    pub fn new(volume: Volume<D>) -> Self {
        Self { volume, cwd: String::from("/") }
    }

    pub fn prompt(&self) -> String {
        format!("{}> ", self.cwd)
    }

    /// Runs one input line. Errors from the volume end the session.
    pub fn execute(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => {}
            ["exit", ..] => return Ok(Flow::Exit),
            ["dir", ..] => self.dir(out)?,
            ["type", name, ..] => self.type_file(name, out)?,
            ["mkdir", name, ..] => {
                self.volume.mkdir(name)?;
            }
            ["copy", path, ..] => self.copy(path)?,
            _ => {
                warn!("unrecognised command: {:?}", line.trim());
                writeln!(out, "{}", USAGE)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn dir(&self, out: &mut impl Write) -> Result<()> {
        for entry in self.volume.list()? {
            let record = entry.record;
            if record.is_file() {
                writeln!(out, "{:<20} {}", record.name(), record.size)?;
            } else {
                writeln!(out, "{:<20} <DIR>", record.name())?;
            }
        }
        Ok(())
    }

    /// A missing file prints nothing.
    fn type_file(&self, name: &str, out: &mut impl Write) -> Result<()> {
        if let Some(record) = self.volume.find_file(name)? {
            let data = self.volume.read_file(&record)?;
            writeln!(out, "{}", String::from_utf8_lossy(&data))?;
        }
        Ok(())
    }

    fn copy(&mut self, path: &str) -> Result<()> {
        let name = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or(FsError::InvalidName)?;
        let data = std::fs::read(path)?;
        self.volume.import(&name, &data)?;
        Ok(())
    }

    pub fn volume(&self) -> &Volume<D> {
        &self.volume
    }

    pub fn into_volume(self) -> Volume<D> {
        self.volume
    }
}
