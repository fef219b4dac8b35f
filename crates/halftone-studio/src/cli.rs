use std::path::PathBuf;

use clap::Parser;

use halftone_engine::coords::ColorRgba;
use halftone_engine::sphere::DEFAULT_SIZE;
use halftone_ui::avatar::AvatarProps;
use halftone_ui::color::parse_color;

/// Halftone: a portfolio page with a live dithered-sphere avatar.
#[derive(Parser, Debug)]
#[command(name = "halftone", version, about)]
pub struct Args {
    /// Avatar edge length in logical pixels.
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    pub size: f32,

    /// Dot color: `#RRGGBB[AA]` or `r,g,b[,a]` floats.
    #[arg(long, value_parser = parse_color)]
    pub front: Option<ColorRgba>,

    /// Background color behind the dots, same formats as --front.
    #[arg(long, value_parser = parse_color)]
    pub back: Option<ColorRgba>,

    /// Render one frame on the CPU to this PNG instead of opening a window.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Animation time in seconds for --snapshot.
    #[arg(long, default_value_t = 0.0)]
    pub time: f32,

    /// Device pixel ratio for --snapshot.
    #[arg(long, default_value_t = 2.0)]
    pub pixel_ratio: f32,

    /// Log filter override (env_logger syntax).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    pub fn avatar_props(&self) -> AvatarProps {
        let mut props = AvatarProps::new().size(self.size).class_name("avatar");
        if let Some(c) = self.front {
            props = props.color_front(c);
        }
        if let Some(c) = self.back {
            props = props.color_back(c);
        }
        props
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["halftone"]).unwrap();
        assert_eq!(args.size, 44.0);
        assert_eq!(args.pixel_ratio, 2.0);
        assert!(args.snapshot.is_none());
        assert_eq!(args.avatar_props().to_config().name(), "avatar");
    }

    #[test]
    fn colors_parse_in_both_forms() {
        let args =
            Args::try_parse_from(["halftone", "--front", "#FF757A", "--back", "0,0,0,0.5"]).unwrap();
        let config = args.avatar_props().to_config();
        assert_eq!(config.color_front.r, 1.0);
        assert_eq!(config.color_back, ColorRgba::new(0.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn bad_color_is_rejected() {
        assert!(Args::try_parse_from(["halftone", "--front", "#12"]).is_err());
    }
}
