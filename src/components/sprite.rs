use bevy_ecs::prelude::Component;

/// Sprite is identified by a texture key and its natural size in world units.
///
/// The size is the unscaled size of the artwork; [`Scale`](super::scale::Scale)
/// multiplies it at draw time. Layout code (parallax wrap length, sticker
/// board sizing) reads it as "size metadata".
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub tex_key: String,
    pub width: f32,
    pub height: f32,
}

impl Sprite {
    pub fn new(tex_key: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            tex_key: tex_key.into(),
            width,
            height,
        }
    }
}
