use std::{
    fs,
    io::{self, Read},
};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use x11hash::Stage;

#[derive(Parser)]
#[command(
    name = "x11sum",
    version,
    about = "Print X11 digests of files or standard input"
)]
struct Cli {
    /// Inputs to hash; `-` or nothing reads standard input
    inputs: Vec<String>,

    /// Print the 64-byte output of a single primitive instead of the X11 digest
    #[arg(long)]
    stage: Option<Stage>,

    /// Treat each input as a hex string rather than a file path
    #[arg(long)]
    hex: bool,

    /// Print digests byte-reversed, the way block hashes are displayed
    #[arg(long)]
    reverse: bool,

    /// Also print every intermediate stage output
    #[arg(long)]
    trace: bool,
}

fn read_input(name: &str, hex_input: bool) -> Result<Vec<u8>> {
    if hex_input {
        return hex::decode(name).with_context(|| format!("invalid hex input `{}`", name));
    }
    if name == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read standard input")?;
        return Ok(buf);
    }
    fs::read(name).with_context(|| format!("failed to read {}", name))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let inputs = if cli.inputs.is_empty() {
        vec!["-".to_string()]
    } else {
        cli.inputs.clone()
    };

    for name in &inputs {
        let data = read_input(name, cli.hex)?;
        info!("hashing {} ({} bytes)", name, data.len());

        if cli.trace {
            x11hash::digest_with(&data, |stage, state| {
                println!("{}  {}:{}", hex::encode(state), name, stage)
            });
        }

        let mut out = match cli.stage {
            Some(stage) => stage.compute(&data).to_vec(),
            None => x11hash::digest(&data).to_vec(),
        };
        if cli.reverse {
            out.reverse();
        }
        println!("{}  {}", hex::encode(&out), name);
    }

    Ok(())
}
