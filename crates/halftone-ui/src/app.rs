use std::time::Instant;

use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use halftone_engine::coords::{ColorRgba, Rect, Vec2};
use halftone_engine::core::{App as EngineApp, AppControl, EventCtx, FrameCtx};
use halftone_engine::device::GpuInit;
use halftone_engine::render::SurfaceCompositor;
use halftone_engine::sphere::GpuSphereBackend;
use halftone_engine::window::{CursorIcon, Runtime, RuntimeConfig};

use crate::avatar::{Avatar, AvatarProps};
use crate::page::{PageLayout, ProfilePage};
use crate::popover::{PopoverLink, PopoverLinkProps, TRANSITION};

/// Page background, neutral-950.
const BACKGROUND: ColorRgba = ColorRgba::new(10.0 / 255.0, 10.0 / 255.0, 10.0 / 255.0, 1.0);

// ── Application ───────────────────────────────────────────────────────────

/// Portfolio page application builder.
///
/// ```rust,ignore
/// Application::new()
///     .title("Cameron Simony")
///     .avatar(AvatarProps::new().color_front([1.0, 1.0, 1.0, 1.0]))
///     .run();
/// ```
pub struct Application {
    title: String,
    width: f64,
    height: f64,
    background: ColorRgba,
    page: ProfilePage,
    layout: PageLayout,
    avatar: AvatarProps,
    alternate: Option<AvatarProps>,
    links: Vec<(PopoverLinkProps, Rect)>,
}

impl Application {
    pub fn new() -> Self {
        let page = ProfilePage::default();
        Self {
            title: page.name.clone(),
            width: 740.0,
            height: 820.0,
            background: BACKGROUND,
            page,
            layout: PageLayout::default(),
            avatar: AvatarProps::new(),
            alternate: None,
            links: Vec::new(),
        }
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Initial window size in logical px.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn background(mut self, color: impl Into<ColorRgba>) -> Self {
        self.background = color.into();
        self
    }

    pub fn page(mut self, page: ProfilePage) -> Self {
        self.page = page;
        self
    }

    pub fn avatar(mut self, props: AvatarProps) -> Self {
        self.avatar = props;
        self
    }

    /// Second avatar configuration; the `C` key swaps between the two.
    pub fn alternate(mut self, props: AvatarProps) -> Self {
        self.alternate = Some(props);
        self
    }

    /// Adds a popover link whose logo sits at `rect` (logical px).
    pub fn link(mut self, props: PopoverLinkProps, rect: Rect) -> Self {
        self.links.push((props, rect));
        self
    }

    /// Starts the event loop. Never returns.
    pub fn run(self) -> ! {
        let config = RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
            transparent: self.background.a < 1.0,
        };
        let state = PageState::new(self);
        if let Err(e) = Runtime::run(config, GpuInit::default(), state) {
            log::error!("halftone runtime error: {e:#}");
            std::process::exit(1);
        }
        std::process::exit(0);
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── PageState ─────────────────────────────────────────────────────────────

/// Implements `halftone_engine::core::App` for the page.
///
/// Popover links are tracked as state only: hover changes update each link's
/// transition and the cursor, but no popover card is drawn, so they never
/// request frames. The avatar is the only animated element.
struct PageState {
    background: ColorRgba,
    layout: PageLayout,
    presets: Vec<AvatarProps>,
    active: usize,
    avatar: Avatar,
    mounted: bool,
    links: Vec<PopoverLink>,
    compositor: SurfaceCompositor,
}

impl PageState {
    fn new(app: Application) -> Self {
        log::info!("{} | {}", app.page.name, app.page.title);

        let mut presets = vec![app.avatar];
        presets.extend(app.alternate);
        let avatar = Avatar::new(&presets[0]);
        let links = app
            .links
            .into_iter()
            .map(|(props, rect)| PopoverLink::new(props, rect))
            .collect();

        Self {
            background: app.background,
            layout: app.layout,
            presets,
            active: 0,
            avatar,
            mounted: false,
            links,
            compositor: SurfaceCompositor::new(),
        }
    }

    /// Applies a pointer position to every link.
    fn update_hover(&mut self, pointer: Option<Vec2>, now: Instant) {
        for link in &mut self.links {
            let inside = pointer.is_some_and(|p| link.contains(p));
            if link.set_hovered(inside, now) {
                let target = link.popover_style(now + TRANSITION);
                log::debug!(
                    "{}: popover -> opacity {:.0} y {:.0} blur {:.0}",
                    link.props().href,
                    target.opacity,
                    target.translate_y,
                    target.blur
                );
            }
        }
    }

    fn cycle_avatar(&mut self, ctx: &mut EventCtx<'_, '_>) {
        if self.presets.len() < 2 || !self.mounted {
            return;
        }
        self.active = (self.active + 1) % self.presets.len();
        let config = self.presets[self.active].to_config();
        let mut backend = GpuSphereBackend::new(ctx.gpu);
        self.avatar
            .instance_mut()
            .reconfigure(config, &mut backend, ctx.frames, Instant::now());
    }
}

impl EngineApp for PageState {
    fn on_window_event(&mut self, ctx: &mut EventCtx<'_, '_>, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(ctx.window.scale_factor() as f64);
                let pointer = Vec2::new(logical.x, logical.y);
                let over_link = self.links.iter().any(|l| l.contains(pointer));
                ctx.window.set_cursor(if over_link {
                    CursorIcon::Pointer
                } else {
                    CursorIcon::Default
                });

                self.update_hover(Some(pointer), Instant::now());
                AppControl::Continue
            }

            WindowEvent::CursorLeft { .. } => {
                self.update_hover(None, Instant::now());
                AppControl::Continue
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && !event.repeat
                    && event.physical_key == PhysicalKey::Code(KeyCode::KeyC) =>
            {
                self.cycle_avatar(ctx);
                AppControl::Redraw
            }

            WindowEvent::CloseRequested => {
                let mut backend = GpuSphereBackend::new(ctx.gpu);
                self.avatar.instance_mut().unmount(&mut backend, ctx.frames);
                AppControl::Continue
            }

            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let now = ctx.time.now;
        let (viewport_w, _) = ctx.window.logical_size();

        {
            let mut backend = GpuSphereBackend::new(ctx.gpu);

            if !self.mounted {
                self.mounted = true;
                let dpr = ctx.window.scale_factor();
                self.avatar
                    .instance_mut()
                    .mount(&mut backend, ctx.frames, dpr, now);
            }

            while let Some(handle) = ctx.frames.pop_due() {
                self.avatar
                    .instance_mut()
                    .on_frame(&mut backend, ctx.frames, handle, now);
            }
        }

        let edge = self.avatar.instance().config().size;
        self.avatar
            .place(self.layout.avatar_origin(viewport_w, edge));

        let compositor = &mut self.compositor;
        let layers: Vec<_> = self.avatar.layer().into_iter().collect();
        ctx.render(self.background, |rctx, target| {
            compositor.render(rctx, target, &layers);
        })
    }
}
