use halftone_engine::coords::{ColorRgba, Rect, Vec2};
use halftone_engine::render::CompositeLayer;
use halftone_engine::sphere::{SphereConfig, SphereInstance, SphereProgram, DEFAULT_SIZE};

/// Instantiation properties of the avatar.
///
/// Every field is optional; unset fields take the sphere defaults (44 px,
/// opaque white dots on a transparent background).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvatarProps {
    pub size: Option<f32>,
    /// Tag for logs and GPU labels.
    pub class_name: Option<String>,
    pub color_front: Option<[f32; 4]>,
    pub color_back: Option<[f32; 4]>,
}

impl AvatarProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = Some(name.into());
        self
    }

    pub fn color_front(mut self, color: impl Into<ColorRgba>) -> Self {
        self.color_front = Some(color.into().to_array());
        self
    }

    pub fn color_back(mut self, color: impl Into<ColorRgba>) -> Self {
        self.color_back = Some(color.into().to_array());
        self
    }

    /// Resolves the props into a sphere configuration.
    pub fn to_config(&self) -> SphereConfig {
        let mut config = SphereConfig::default();
        if let Some(size) = self.size {
            config = config.with_size(size);
        }
        if let Some(c) = self.color_front {
            config = config.with_color_front(c);
        }
        if let Some(c) = self.color_back {
            config = config.with_color_back(c);
        }
        if let Some(name) = &self.class_name {
            config = config.with_label(name.clone());
        }
        config
    }

    /// Edge of the square element in logical px.
    pub fn edge(&self) -> f32 {
        self.size.unwrap_or(DEFAULT_SIZE)
    }
}

/// A placed sphere element: a square of `size` logical px at `origin`.
pub struct Avatar<P = SphereProgram> {
    origin: Vec2,
    instance: SphereInstance<P>,
}

impl<P> Avatar<P> {
    pub fn new(props: &AvatarProps) -> Self {
        Self {
            origin: Vec2::zero(),
            instance: SphereInstance::new(props.to_config()),
        }
    }

    pub fn place(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    /// Element rect in logical px. The edge follows the active config.
    pub fn rect(&self) -> Rect {
        Rect::square(self.origin, self.instance.config().size)
    }

    pub fn instance(&self) -> &SphereInstance<P> {
        &self.instance
    }

    pub fn instance_mut(&mut self) -> &mut SphereInstance<P> {
        &mut self.instance
    }
}

impl Avatar<SphereProgram> {
    /// Compositor layer for the running sphere; `None` while not running.
    pub fn layer(&self) -> Option<CompositeLayer<'_>> {
        self.instance.program().map(|program| CompositeLayer {
            view: program.view(),
            rect: self.rect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_props_resolve_to_sphere_defaults() {
        assert_eq!(AvatarProps::new().to_config(), SphereConfig::default());
        assert_eq!(AvatarProps::new().edge(), 44.0);
    }

    #[test]
    fn props_override_defaults() {
        let props = AvatarProps::new()
            .size(64.0)
            .class_name("hero")
            .color_front([0.0, 0.0, 0.0, 1.0])
            .color_back([1.0, 1.0, 1.0, 0.5]);
        let config = props.to_config();

        assert_eq!(config.size, 64.0);
        assert_eq!(config.name(), "hero");
        assert_eq!(config.color_front, ColorRgba::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(config.color_back, ColorRgba::new(1.0, 1.0, 1.0, 0.5));
    }

    #[test]
    fn element_is_a_square_at_its_origin() {
        let mut avatar: Avatar<()> = Avatar::new(&AvatarProps::new().size(50.0));
        avatar.place(Vec2::new(24.0, 50.0));
        assert_eq!(avatar.rect(), Rect::new(24.0, 50.0, 50.0, 50.0));
    }
}
