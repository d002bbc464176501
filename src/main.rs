use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Arg, Command};
use ntfsx::{FileDisk, Flow, Shell, Volume};

fn main() -> Result<()> {
    env_logger::init();

    let matches = Command::new("ntfsx")
        .about("interactive shell over an NTFSX image")
        .version(clap::crate_version!())
        .arg(Arg::new("IMAGE").required(true).help("image file to open"))
        .get_matches();

    let image = matches.get_one::<String>("IMAGE").unwrap();

    let disk = FileDisk::open(image).with_context(|| format!("failed to open {}", image))?;
    let volume = Volume::open(Arc::new(disk)).with_context(|| format!("failed to mount {}", image))?;
    let mut shell = Shell::new(volume);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        write!(stdout, "{}", shell.prompt())?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            break;
        }
        match shell.execute(&line, &mut stdout).context("command failed")? {
            Flow::Continue => {}
            Flow::Exit => break,
        }
    }

    shell.volume().flush()?;
    Ok(())
}
