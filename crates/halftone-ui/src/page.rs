use halftone_engine::coords::{Rect, Vec2};

/// Static profile copy shown next to and under the avatar.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePage {
    pub name: String,
    pub title: String,
    pub bio: Vec<String>,
}

impl Default for ProfilePage {
    fn default() -> Self {
        Self {
            name: "Cameron Simony".to_string(),
            title: "Lead Product Designer at Kajabi".to_string(),
            bio: vec![
                "I'm currently a Lead Product Designer at Kajabi where I've driven & evolved the \
                 core platform experience over the last 8 years. I've designed the moments that \
                 define our product: 0–1 launches, systems that scale, and AI frameworks that \
                 change how people build businesses."
                    .to_string(),
                "I've also been a design partner to founders and startups at Iverson where I \
                 advise on product strategy and craft next-gen product experiences."
                    .to_string(),
            ],
        }
    }
}

/// Centred single-column layout, in logical px.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageLayout {
    pub max_width: f32,
    pub padding_x: f32,
    pub padding_y: f32,
    /// Vertical padding from `wide_from` upwards.
    pub padding_y_wide: f32,
    pub wide_from: f32,
    /// Height of the name + title block the avatar is centred against.
    pub header_height: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            max_width: 692.0,
            padding_x: 24.0,
            padding_y: 48.0,
            padding_y_wide: 64.0,
            wide_from: 640.0,
            // Two 16 px lines at 1.625 leading, pulled together by 4 px.
            header_height: 48.0,
        }
    }
}

impl PageLayout {
    /// Content column for a window `viewport_width` wide.
    pub fn column(&self, viewport_width: f32) -> Rect {
        let outer = viewport_width.min(self.max_width).max(0.0);
        let left = ((viewport_width - outer) * 0.5).max(0.0);
        let top = if viewport_width >= self.wide_from {
            self.padding_y_wide
        } else {
            self.padding_y
        };
        let inner = (outer - 2.0 * self.padding_x).max(0.0);
        Rect::new(left + self.padding_x, top, inner, self.header_height)
    }

    /// Avatar square: start of the column, vertically centred on the header.
    pub fn avatar_origin(&self, viewport_width: f32, edge: f32) -> Vec2 {
        let column = self.column(viewport_width);
        Vec2::new(
            column.origin.x,
            column.origin.y + (self.header_height - edge) * 0.5,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_copy() {
        let page = ProfilePage::default();
        assert_eq!(page.name, "Cameron Simony");
        assert_eq!(page.title, "Lead Product Designer at Kajabi");
        assert_eq!(page.bio.len(), 2);
        assert!(page.bio[1].contains("Iverson"));
    }

    #[test]
    fn column_is_centred_and_capped() {
        let layout = PageLayout::default();
        let c = layout.column(1000.0);
        assert_eq!(c.origin, Vec2::new(154.0 + 24.0, 64.0));
        assert_eq!(c.size.x, 692.0 - 48.0);
    }

    #[test]
    fn narrow_windows_use_compact_padding() {
        let layout = PageLayout::default();
        let c = layout.column(400.0);
        assert_eq!(c.origin, Vec2::new(24.0, 48.0));
        assert_eq!(c.size.x, 352.0);
    }

    #[test]
    fn avatar_centred_on_header() {
        let layout = PageLayout::default();
        assert_eq!(layout.avatar_origin(400.0, 44.0), Vec2::new(24.0, 50.0));
    }
}
