use std::time::{Duration, Instant};

use halftone_engine::coords::{ColorRgba, Rect, Vec2};

use crate::color::parse_hex;

pub const DEFAULT_HIGHLIGHT: &str = "#FF757A";
pub const DEFAULT_UNDERLINE_SPACING: &str = "2px";
pub const DEFAULT_VERTICAL_ALIGN: &str = "-2px";
pub const DEFAULT_UNDERLINE_WIDTH: &str = "calc(100% + 2px)";

/// Popover fade/slide duration.
pub const TRANSITION: Duration = Duration::from_millis(150);

/// Resting dot colour of the underline: `#a3a3a3` at 0.7 alpha.
pub const UNDERLINE_DOT: ColorRgba = ColorRgba::new(163.0 / 255.0, 163.0 / 255.0, 163.0 / 255.0, 0.7);

#[derive(Debug, Clone, PartialEq)]
pub struct LogoProps {
    pub src: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopoverContent {
    pub image_src: String,
    pub image_alt: String,
    pub background: Option<String>,
    pub glow: Option<String>,
}

/// Inline logo link that previews an image card on hover.
///
/// Length fields keep their CSS spelling; see [`css_px`] and
/// [`resolve_width`] for the accepted forms.
#[derive(Debug, Clone, PartialEq)]
pub struct PopoverLinkProps {
    pub href: String,
    pub logo: LogoProps,
    pub popover: PopoverContent,
    pub highlight_color: String,
    pub underline_spacing: String,
    pub vertical_align: String,
    pub underline_width: String,
}

impl PopoverLinkProps {
    pub fn new(href: impl Into<String>, logo: LogoProps, popover: PopoverContent) -> Self {
        Self {
            href: href.into(),
            logo,
            popover,
            highlight_color: DEFAULT_HIGHLIGHT.to_string(),
            underline_spacing: DEFAULT_UNDERLINE_SPACING.to_string(),
            vertical_align: DEFAULT_VERTICAL_ALIGN.to_string(),
            underline_width: DEFAULT_UNDERLINE_WIDTH.to_string(),
        }
    }

    pub fn highlight_color(mut self, color: impl Into<String>) -> Self {
        self.highlight_color = color.into();
        self
    }

    pub fn underline_spacing(mut self, spacing: impl Into<String>) -> Self {
        self.underline_spacing = spacing.into();
        self
    }

    pub fn vertical_align(mut self, align: impl Into<String>) -> Self {
        self.vertical_align = align.into();
        self
    }

    pub fn underline_width(mut self, width: impl Into<String>) -> Self {
        self.underline_width = width.into();
        self
    }
}

// ── CSS lengths ───────────────────────────────────────────────────────────

/// Parses `"<n>px"` or a bare number.
pub fn css_px(value: &str) -> Option<f32> {
    let v = value.trim();
    v.strip_suffix("px").unwrap_or(v).trim().parse().ok()
}

/// Resolves a width against `base`: `"<n>px"`, `"<n>%"` or
/// `"calc(<n>% ± <m>px)"`.
pub fn resolve_width(value: &str, base: f32) -> Option<f32> {
    let v = value.trim();
    if let Some(inner) = v.strip_prefix("calc(").and_then(|s| s.strip_suffix(')')) {
        let (pct, rest) = inner.split_once('%')?;
        let pct: f32 = pct.trim().parse().ok()?;
        let rest = rest.trim();
        let offset = if let Some(px) = rest.strip_prefix('+') {
            css_px(px)?
        } else if let Some(px) = rest.strip_prefix('-') {
            -css_px(px)?
        } else if rest.is_empty() {
            0.0
        } else {
            return None;
        };
        return Some(base * pct / 100.0 + offset);
    }
    if let Some(pct) = v.strip_suffix('%') {
        return pct.trim().parse::<f32>().ok().map(|p| base * p / 100.0);
    }
    css_px(v)
}

// ── easing ────────────────────────────────────────────────────────────────

/// CSS `ease-out`, i.e. `cubic-bezier(0, 0, 0.58, 1)`.
pub fn ease_out(t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let (x1, y1, x2, y2) = (0.0f32, 0.0f32, 0.58f32, 1.0f32);
    let bezier = |p1: f32, p2: f32, s: f32| {
        let u = 1.0 - s;
        3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
    };

    // x(s) is monotonic on [0, 1]; bisect for s with x(s) = t.
    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    for _ in 0..32 {
        let mid = 0.5 * (lo + hi);
        if bezier(x1, x2, mid) < t {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    bezier(y1, y2, 0.5 * (lo + hi))
}

// ── state ─────────────────────────────────────────────────────────────────

/// Visual state of the preview card.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PopoverStyle {
    pub opacity: f32,
    /// Downward offset in logical px.
    pub translate_y: f32,
    /// Blur radius in logical px.
    pub blur: f32,
}

impl PopoverStyle {
    pub const HIDDEN: Self = Self { opacity: 0.0, translate_y: 8.0, blur: 16.0 };
    pub const SHOWN: Self = Self { opacity: 1.0, translate_y: 0.0, blur: 0.0 };

    fn lerp(a: Self, b: Self, t: f32) -> Self {
        let mix = |x: f32, y: f32| x + (y - x) * t;
        Self {
            opacity: mix(a.opacity, b.opacity),
            translate_y: mix(a.translate_y, b.translate_y),
            blur: mix(a.blur, b.blur),
        }
    }
}

/// Underline dot colours with their cross-fade already applied to alpha.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UnderlineStyle {
    pub resting: ColorRgba,
    pub highlight: ColorRgba,
}

#[derive(Debug, Copy, Clone)]
struct Transition {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
}

impl Transition {
    fn linear(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = now.saturating_duration_since(self.start).as_secs_f32() / self.duration.as_secs_f32();
        t.clamp(0.0, 1.0)
    }

    fn value(&self, now: Instant) -> f32 {
        let t = self.linear(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * ease_out(t)
    }
}

/// Hover state machine of one popover link.
pub struct PopoverLink {
    props: PopoverLinkProps,
    highlight: ColorRgba,
    rect: Rect,
    hovered: bool,
    transition: Option<Transition>,
}

impl PopoverLink {
    /// Creates a link whose logo occupies `rect` (logical px).
    pub fn new(props: PopoverLinkProps, rect: Rect) -> Self {
        let highlight = parse_hex(&props.highlight_color).unwrap_or_else(|e| {
            log::warn!("{}: {e}; using {DEFAULT_HIGHLIGHT}", props.href);
            parse_hex(DEFAULT_HIGHLIGHT).unwrap_or(ColorRgba::white())
        });
        Self {
            props,
            highlight,
            rect,
            hovered: false,
            transition: None,
        }
    }

    pub fn props(&self) -> &PopoverLinkProps {
        &self.props
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.rect.contains(p)
    }

    /// Pointer enter/leave. Returns whether the hover state changed.
    ///
    /// A reversal mid-transition starts from the current value and takes a
    /// proportionally shorter time.
    pub fn set_hovered(&mut self, hovered: bool, now: Instant) -> bool {
        if hovered == self.hovered {
            return false;
        }
        let from = self.progress(now);
        let to = if hovered { 1.0 } else { 0.0 };
        let distance = (to - from).abs();
        self.hovered = hovered;
        self.transition = Some(Transition {
            from,
            to,
            start: now,
            duration: if distance >= 1.0 { TRANSITION } else { TRANSITION.mul_f32(distance) },
        });
        log::debug!("{}: hover {}", self.props.href, if hovered { "on" } else { "off" });
        true
    }

    /// 0 = hidden, 1 = shown.
    pub fn progress(&self, now: Instant) -> f32 {
        match &self.transition {
            Some(t) => t.value(now),
            None if self.hovered => 1.0,
            None => 0.0,
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.transition.is_some_and(|t| t.linear(now) < 1.0)
    }

    pub fn popover_style(&self, now: Instant) -> PopoverStyle {
        PopoverStyle::lerp(PopoverStyle::HIDDEN, PopoverStyle::SHOWN, self.progress(now))
    }

    pub fn underline_style(&self, now: Instant) -> UnderlineStyle {
        let p = self.progress(now);
        let mut resting = UNDERLINE_DOT;
        resting.a *= 1.0 - p;
        let mut highlight = self.highlight;
        highlight.a *= p;
        UnderlineStyle { resting, highlight }
    }

    /// Underline rect below the logo, sized by the CSS-style props.
    pub fn underline_rect(&self) -> Rect {
        let logo_w = self.props.logo.width as f32;
        let width = resolve_width(&self.props.underline_width, logo_w).unwrap_or(logo_w);
        let spacing = css_px(&self.props.underline_spacing).unwrap_or(0.0);
        Rect::new(self.rect.origin.x, self.rect.max().y + spacing, width, 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props() -> PopoverLinkProps {
        PopoverLinkProps::new(
            "https://example.com",
            LogoProps { src: "logo.svg".into(), alt: "Example".into(), width: 60, height: 16 },
            PopoverContent {
                image_src: "card.png".into(),
                image_alt: "Preview".into(),
                background: None,
                glow: None,
            },
        )
    }

    fn link() -> PopoverLink {
        PopoverLink::new(props(), Rect::new(10.0, 20.0, 60.0, 16.0))
    }

    // ── props ─────────────────────────────────────────────────────────────

    #[test]
    fn props_defaults() {
        let p = props();
        assert_eq!(p.highlight_color, "#FF757A");
        assert_eq!(p.underline_spacing, "2px");
        assert_eq!(p.vertical_align, "-2px");
        assert_eq!(p.underline_width, "calc(100% + 2px)");
    }

    #[test]
    fn css_lengths() {
        assert_eq!(css_px("2px"), Some(2.0));
        assert_eq!(css_px("-2px"), Some(-2.0));
        assert_eq!(css_px("3"), Some(3.0));
        assert_eq!(css_px("wide"), None);
        assert_eq!(resolve_width("calc(100% + 2px)", 60.0), Some(62.0));
        assert_eq!(resolve_width("calc(50% - 4px)", 60.0), Some(26.0));
        assert_eq!(resolve_width("50%", 60.0), Some(30.0));
        assert_eq!(resolve_width("12px", 60.0), Some(12.0));
    }

    #[test]
    fn underline_sits_below_logo() {
        let r = link().underline_rect();
        assert_eq!(r, Rect::new(10.0, 38.0, 62.0, 2.0));
    }

    #[test]
    fn invalid_highlight_falls_back() {
        let l = PopoverLink::new(props().highlight_color("nope"), Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(l.highlight, parse_hex(DEFAULT_HIGHLIGHT).unwrap());
    }

    // ── easing ────────────────────────────────────────────────────────────

    #[test]
    fn ease_out_endpoints_and_shape() {
        assert!(ease_out(0.0).abs() < 1e-4);
        assert!((ease_out(1.0) - 1.0).abs() < 1e-4);
        // Front-loaded: more than half done at the midpoint.
        assert!(ease_out(0.5) > 0.6);
        assert!(ease_out(0.25) < ease_out(0.5));
    }

    // ── hover ─────────────────────────────────────────────────────────────

    #[test]
    fn starts_hidden() {
        let l = link();
        let now = Instant::now();
        assert_eq!(l.popover_style(now), PopoverStyle::HIDDEN);
        assert_eq!(l.underline_style(now).resting, UNDERLINE_DOT);
        assert_eq!(l.underline_style(now).highlight.a, 0.0);
    }

    #[test]
    fn hover_shows_after_transition() {
        let mut l = link();
        let t0 = Instant::now();
        assert!(l.set_hovered(true, t0));
        assert!(!l.set_hovered(true, t0));

        assert!(l.is_animating(t0 + Duration::from_millis(50)));
        let mid = l.popover_style(t0 + Duration::from_millis(75));
        assert!(mid.opacity > 0.0 && mid.opacity < 1.0);

        let done = t0 + TRANSITION;
        assert!(!l.is_animating(done));
        assert_eq!(l.popover_style(done), PopoverStyle::SHOWN);
        let underline = l.underline_style(done);
        assert_eq!(underline.resting.a, 0.0);
        assert_eq!(underline.highlight, parse_hex("#FF757A").unwrap());
    }

    #[test]
    fn leave_mid_transition_reverses_from_current_value() {
        let mut l = link();
        let t0 = Instant::now();
        l.set_hovered(true, t0);
        let t1 = t0 + Duration::from_millis(75);
        let at_leave = l.progress(t1);

        l.set_hovered(false, t1);
        assert!((l.progress(t1) - at_leave).abs() < 1e-5);
        assert_eq!(l.progress(t1 + TRANSITION), 0.0);
        assert_eq!(l.popover_style(t1 + TRANSITION), PopoverStyle::HIDDEN);
    }

    #[test]
    fn hit_test_uses_logo_rect() {
        let l = link();
        assert!(l.contains(Vec2::new(10.0, 20.0)));
        assert!(!l.contains(Vec2::new(70.0, 20.0)));
    }
}
