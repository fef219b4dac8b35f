mod cli;
mod snapshot;

use anyhow::Result;

use halftone_engine::logging::{init_logging, LoggingConfig};
use halftone_ui::popover::DEFAULT_HIGHLIGHT;
use halftone_ui::prelude::*;

fn main() -> Result<()> {
    let args = cli::parse();

    let logging = match &args.log_level {
        Some(filter) => LoggingConfig::default().with_filter(filter.as_str()),
        None => LoggingConfig::default(),
    };
    init_logging(logging);

    let props = args.avatar_props();

    if let Some(path) = &args.snapshot {
        snapshot::write_png(&props.to_config(), args.pixel_ratio, args.time, path)?;
        return Ok(());
    }

    // Startup banner, printed before the window opens.
    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║            HALFTONE  v0.1              ║");
    println!("  ║   wgpu renderer  ·  dithered sphere    ║");
    println!("  ╠════════════════════════════════════════╣");
    println!("  ║  C       swap avatar colors            ║");
    println!("  ╚════════════════════════════════════════╝");
    println!();

    let accent = parse_hex(DEFAULT_HIGHLIGHT)?;
    let alternate = props.clone().color_front(accent);

    Application::new().avatar(props).alternate(alternate).run()
}
