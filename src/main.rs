//! # flipdot CLI
//!
//! Command-line interface for flip-dot panels.
//!
//! ## Usage
//!
//! ```bash
//! # List available patterns
//! flipdot patterns
//!
//! # Show a pattern on a 28x7 board
//! flipdot --device /dev/ttyUSB0 show checker
//!
//! # Queue to two boards, then show both at once
//! flipdot --device /dev/ttyUSB0 --address 01 show --queue border
//! flipdot --device /dev/ttyUSB0 --address 02 show --queue diagonal
//! flipdot --device /dev/ttyUSB0 refresh
//!
//! # Print the frame without sending it
//! flipdot --size xy5-7x7 frame fill
//!
//! # Send packed column bytes
//! flipdot --size 7x7 columns 7f 41 41 41 41 41 7f
//! ```
//!
//! Without `--device` (or with `--baud 0`) the panel runs in debug mode and
//! logs frames instead of writing them.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use log::{LevelFilter, info};

use flipdot_panel::{
    Address, Panel, PanelConfig, PanelError,
    panel::{Glyphs, PanelGeometry},
    protocol::{
        address::{parse_hex_bytes, to_hex},
        frame,
    },
    render::patterns,
};

/// flipdot - Flip-dot panel utility
#[derive(Parser, Debug)]
#[command(name = "flipdot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    panel: PanelArgs,

    /// More log output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct PanelArgs {
    /// JSON panel config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Panel size: preset name (xy5-28x7) or WIDTHxHEIGHT
    #[arg(long, global = true)]
    size: Option<String>,

    /// Serial device path (omit for debug mode)
    #[arg(long, global = true)]
    device: Option<String>,

    /// Baud rate (0 for debug mode)
    #[arg(long, global = true)]
    baud: Option<u32>,

    /// Panel address as hex bytes, e.g. "01" (omit to broadcast)
    #[arg(long, global = true)]
    address: Option<String>,

    /// Render dots as ASCII instead of emoji
    #[arg(long, global = true)]
    ascii: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Draw a pattern and send it to the panel
    Show {
        /// Pattern name (see `patterns`)
        pattern: String,

        /// Store on the panel without displaying it
        #[arg(long)]
        queue: bool,
    },

    /// Make every panel display what it has queued
    Refresh,

    /// Print the frame for a pattern without sending it
    Frame {
        /// Pattern name (see `patterns`)
        pattern: String,

        /// Encode as a queue frame instead of a refresh frame
        #[arg(long)]
        queue: bool,
    },

    /// Send packed column bytes (hex, one per column)
    Columns {
        /// Column bytes, row 0 in the highest used bit
        #[arg(required = true)]
        bytes: Vec<String>,

        /// Store on the panel without displaying it
        #[arg(long)]
        queue: bool,
    },

    /// List available patterns
    Patterns,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), PanelError> {
    let glyphs = if cli.panel.ascii {
        Glyphs::ASCII
    } else {
        Glyphs::DOTS
    };
    let config = resolve_config(&cli.panel)?;

    match cli.command {
        Commands::Patterns => {
            println!("Available patterns:");
            for name in patterns::list_patterns() {
                println!("  {}", name);
            }
        }

        Commands::Frame { pattern, queue } => {
            let mut panel = Panel::debug(config.width, config.height)?
                .with_address(config.address.clone())
                .with_glyphs(glyphs);
            draw_pattern(&mut panel, &pattern)?;

            let bytes = panel.frame(!queue)?;
            let parts = frame::inspect(&bytes)?;
            println!("{}", to_hex(&bytes));
            println!(
                "command 0x{:02x} ({}), address {}, {} payload bytes",
                parts.command,
                if parts.refresh { "refresh" } else { "queue" },
                to_hex(&parts.address),
                parts.payload.len()
            );
            print!("{}", panel.render());
        }

        Commands::Show { pattern, queue } => {
            let mut panel = config.open()?.with_glyphs(glyphs);
            draw_pattern(&mut panel, &pattern)?;
            deliver(&mut panel, queue)?;
            panel.close()?;
            info!("Sent {} to {}", pattern, panel.address());
        }

        Commands::Columns { bytes, queue } => {
            let mut column_bytes = Vec::with_capacity(bytes.len());
            for arg in &bytes {
                column_bytes.extend(parse_hex_bytes(arg)?);
            }
            let mut panel = config.open()?.with_glyphs(glyphs);
            panel.bitmap_mut().fill_columns(&column_bytes);
            deliver(&mut panel, queue)?;
            panel.close()?;
        }

        Commands::Refresh => {
            let mut panel = config.open()?.with_glyphs(glyphs);
            panel.send_raw(&frame::refresh_all())?;
            panel.close()?;
        }
    }

    Ok(())
}

/// Config file first, then command-line overrides.
fn resolve_config(args: &PanelArgs) -> Result<PanelConfig, PanelError> {
    let mut config = match &args.config {
        Some(path) => PanelConfig::load(path)?,
        None => PanelConfig::default(),
    };
    if let Some(size) = &args.size {
        config = config.with_geometry(PanelGeometry::parse(size)?);
    }
    if let Some(device) = &args.device {
        config.device = device.clone();
    }
    if let Some(baud) = args.baud {
        config.baud = baud;
    }
    if let Some(address) = &args.address {
        config.address = Address::parse(address)?;
    }
    Ok(config)
}

fn draw_pattern(panel: &mut Panel, name: &str) -> Result<(), PanelError> {
    let pattern = patterns::by_name(name).ok_or_else(|| {
        PanelError::Config(format!(
            "Unknown pattern '{}'. Run `flipdot patterns` to see available options.",
            name
        ))
    })?;
    patterns::draw(pattern.as_ref(), panel.bitmap_mut());
    Ok(())
}

/// Queue or send, surfacing errors either way.
fn deliver(panel: &mut Panel, queue: bool) -> Result<(), PanelError> {
    if queue { panel.try_queue() } else { panel.send() }
}
