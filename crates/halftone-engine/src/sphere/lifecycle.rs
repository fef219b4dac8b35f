use std::time::Instant;

use crate::animation::{AnimationHandle, FrameScheduler};
use crate::time::Stopwatch;

use super::backend::SphereBackend;
use super::config::{RenderSurface, SphereConfig};
use super::error::SetupError;
use super::uniforms::SphereUniforms;

/// Observable lifecycle phase of a [`SphereInstance`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SpherePhase {
    Uninitialized,
    Compiling,
    /// Setup failed. Terminal until the instance is reconfigured.
    Failed,
    Running,
    Disposed,
}

enum State<P> {
    Uninitialized,
    Compiling,
    Failed(SetupError),
    Running(Running<P>),
    Disposed,
}

struct Running<P> {
    program: P,
    surface: RenderSurface,
    pending: Option<AnimationHandle>,
    stopwatch: Stopwatch,
}

/// One mounted dithered sphere.
///
/// Owns exactly one program and at most one outstanding frame request. The
/// backend and the frame scheduler are passed into each transition rather
/// than stored, so the instance never outlives the GPU context it draws with.
///
/// ```text
/// Uninitialized ─mount─▶ Compiling ─┬─▶ Running ─frame─▶ Running
///                                   └─▶ Failed
/// Running ─unmount─▶ Disposed
/// Running | Failed ─reconfigure─▶ Disposed ─▶ Uninitialized ─▶ Compiling …
/// ```
///
/// Disposed is terminal for `mount`; only `reconfigure` re-enters the chain.
pub struct SphereInstance<P> {
    config: SphereConfig,
    pixel_ratio: f32,
    state: State<P>,
}

impl<P> SphereInstance<P> {
    pub fn new(config: SphereConfig) -> Self {
        Self {
            config: config.sanitized(),
            pixel_ratio: 1.0,
            state: State::Uninitialized,
        }
    }

    pub fn config(&self) -> &SphereConfig {
        &self.config
    }

    pub fn phase(&self) -> SpherePhase {
        match self.state {
            State::Uninitialized => SpherePhase::Uninitialized,
            State::Compiling => SpherePhase::Compiling,
            State::Failed(_) => SpherePhase::Failed,
            State::Running(_) => SpherePhase::Running,
            State::Disposed => SpherePhase::Disposed,
        }
    }

    /// The setup error of a failed instance.
    pub fn error(&self) -> Option<&SetupError> {
        match &self.state {
            State::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn program(&self) -> Option<&P> {
        match &self.state {
            State::Running(r) => Some(&r.program),
            _ => None,
        }
    }

    pub fn surface(&self) -> Option<RenderSurface> {
        match &self.state {
            State::Running(r) => Some(r.surface),
            _ => None,
        }
    }

    /// The outstanding frame request, if any.
    pub fn pending_frame(&self) -> Option<AnimationHandle> {
        match &self.state {
            State::Running(r) => r.pending,
            _ => None,
        }
    }

    /// Runs the initialization protocol and schedules the first frame.
    ///
    /// Nothing is drawn synchronously; the first frame arrives through the
    /// scheduler. Setup errors are logged and park the instance in
    /// [`SpherePhase::Failed`]. Only an uninitialized instance mounts; any
    /// other phase, including disposed, is left as is.
    pub fn mount<B, S>(
        &mut self,
        backend: &mut B,
        scheduler: &mut S,
        pixel_ratio: f32,
        now: Instant,
    ) -> SpherePhase
    where
        B: SphereBackend<Program = P>,
        S: FrameScheduler,
    {
        match self.state {
            State::Uninitialized => {}
            _ => {
                log::warn!("{}: mount while {:?}; ignored", self.config.name(), self.phase());
                return self.phase();
            }
        }

        self.pixel_ratio = pixel_ratio;
        self.transition(State::Compiling);

        let surface = RenderSurface::square(self.config.size, pixel_ratio);
        match backend.create_program(&surface, self.config.name()) {
            Ok(program) => {
                let pending = Some(scheduler.request_frame());
                log::info!(
                    "{}: mounted {}x{} @{}x",
                    self.config.name(),
                    surface.width,
                    surface.height,
                    surface.pixel_ratio
                );
                self.transition(State::Running(Running {
                    program,
                    surface,
                    pending,
                    stopwatch: Stopwatch::started_at(now),
                }));
            }
            Err(e) => {
                log::error!("{}: setup failed: {e}", self.config.name());
                self.transition(State::Failed(e));
            }
        }
        self.phase()
    }

    /// Handles a due frame callback.
    ///
    /// Only the instance's own pending handle is honoured: the frame computes
    /// uniforms, draws, and requests the next frame. Returns whether a frame
    /// was drawn.
    pub fn on_frame<B, S>(
        &mut self,
        backend: &mut B,
        scheduler: &mut S,
        handle: AnimationHandle,
        now: Instant,
    ) -> bool
    where
        B: SphereBackend<Program = P>,
        S: FrameScheduler,
    {
        let State::Running(running) = &mut self.state else {
            return false;
        };
        if running.pending != Some(handle) {
            return false;
        }

        running.pending = None;
        let uniforms = SphereUniforms::new(
            &self.config,
            &running.surface,
            running.stopwatch.elapsed_secs(now),
        );
        backend.draw(&mut running.program, &uniforms);
        running.pending = Some(scheduler.request_frame());
        true
    }

    /// Tears the instance down: the pending frame is cancelled first, then
    /// the program is released. Idempotent.
    pub fn unmount<B, S>(&mut self, backend: &mut B, scheduler: &mut S)
    where
        B: SphereBackend<Program = P>,
        S: FrameScheduler,
    {
        match std::mem::replace(&mut self.state, State::Disposed) {
            State::Running(running) => {
                if let Some(handle) = running.pending {
                    scheduler.cancel_frame(handle);
                }
                backend.release(running.program);
                log::info!("{}: unmounted", self.config.name());
            }
            State::Disposed => return,
            _ => {}
        }
        log::debug!("{}: -> Disposed", self.config.name());
    }

    /// Applies a new configuration by destroying and recreating the instance.
    ///
    /// An identical configuration is a no-op, except on a failed instance,
    /// where reconfiguring is the retry path. An instance that was never
    /// mounted only stores the new configuration. Returns whether the
    /// instance was rebuilt.
    pub fn reconfigure<B, S>(
        &mut self,
        config: SphereConfig,
        backend: &mut B,
        scheduler: &mut S,
        now: Instant,
    ) -> bool
    where
        B: SphereBackend<Program = P>,
        S: FrameScheduler,
    {
        let config = config.sanitized();
        let failed = matches!(self.state, State::Failed(_));
        if config == self.config && !failed {
            return false;
        }

        self.config = config;
        match self.state {
            State::Running(_) | State::Failed(_) => {
                self.unmount(backend, scheduler);
                self.transition(State::Uninitialized);
                self.mount(backend, scheduler, self.pixel_ratio, now);
                true
            }
            _ => false,
        }
    }

    fn transition(&mut self, next: State<P>) {
        self.state = next;
        log::debug!("{}: -> {:?}", self.config.name(), self.phase());
    }
}

impl<P> Drop for SphereInstance<P> {
    fn drop(&mut self) {
        if matches!(self.state, State::Running(_)) {
            log::warn!(
                "{}: dropped while running; GPU objects freed without unmount",
                self.config.name()
            );
        }
    }
}
