//! Halftone UI: the portfolio page around the dithered-sphere avatar.
//!
//! ```rust,ignore
//! use halftone_ui::prelude::*;
//!
//! Application::new()
//!     .avatar(AvatarProps::new().size(44.0).class_name("avatar"))
//!     .run();
//! ```

pub mod app;
pub mod avatar;
pub mod color;
pub mod page;
pub mod popover;

pub use app::Application;

/// Everything needed to build the page.
pub mod prelude {
    pub use crate::app::Application;
    pub use crate::avatar::{Avatar, AvatarProps};
    pub use crate::color::{parse_color, parse_hex, ColorParseError};
    pub use crate::page::{PageLayout, ProfilePage};
    pub use crate::popover::{
        LogoProps, PopoverContent, PopoverLink, PopoverLinkProps, PopoverStyle, UnderlineStyle,
    };

    pub use halftone_engine::coords::{ColorRgba, Rect, Vec2};
}
