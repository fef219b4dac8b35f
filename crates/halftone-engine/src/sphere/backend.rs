use super::config::RenderSurface;
use super::error::SetupError;
use super::uniforms::SphereUniforms;

/// GPU seam of the sphere renderer.
///
/// A backend turns a surface into a compiled program, draws frames with it
/// and releases it. [`SphereInstance`](super::SphereInstance) drives the
/// lifecycle; backends hold no per-instance state of their own, so every
/// call to `create_program` yields a fresh, unshared program.
pub trait SphereBackend {
    type Program;

    /// Runs the initialization protocol for one mount: context checks,
    /// stage compilation, link, quad upload, uniform binding, surface sizing
    /// and blend state.
    fn create_program(
        &mut self,
        surface: &RenderSurface,
        label: &str,
    ) -> Result<Self::Program, SetupError>;

    /// Clears the program's surface and draws one frame.
    fn draw(&mut self, program: &mut Self::Program, uniforms: &SphereUniforms);

    /// Releases every GPU object owned by the program.
    fn release(&mut self, program: Self::Program);
}
