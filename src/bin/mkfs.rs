use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, Command};
use ntfsx::{FileDisk, SuperBlock, Volume};

fn main() -> Result<()> {
    env_logger::init();

    let matches = Command::new("ntfsx-mkfs")
        .about("create an empty NTFSX image")
        .version(clap::crate_version!())
        .arg(Arg::new("IMAGE").required(true).help("image file to create"))
        .arg(
            Arg::new("clusters")
                .long("clusters")
                .short('c')
                .value_parser(value_parser!(u32))
                .default_value("32")
                .help("total clusters, the low byte must be 0x20 (32, 288, 544, ...)"),
        )
        .get_matches();

    let image = matches.get_one::<String>("IMAGE").unwrap();
    let clusters = *matches.get_one::<u32>("clusters").unwrap();

    if !SuperBlock::is_storable(clusters) {
        bail!("cannot store a cluster count of {} (low byte must be 0x20, at most 32768)", clusters);
    }

    let disk = FileDisk::create(image, clusters).with_context(|| format!("failed to create {}", image))?;
    let volume = Volume::format(Arc::new(disk), clusters).context("failed to format image")?;
    eprintln!("{}: {}", image, volume.dump());
    Ok(())
}
