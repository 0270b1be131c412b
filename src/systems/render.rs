//! Draw list construction.
//!
//! [`render_system`] collects every entity with a [`Sprite`], computes its
//! world rectangle from [`GlobalTransform2D`] (or the local transform for
//! entities that have none yet), culls it against the camera, sorts by
//! sorting layer then [`ZIndex`] and presents the list on the [`Display`].

use bevy_ecs::prelude::*;
use bevy_math::Vec2;

use crate::components::globaltransform2d::GlobalTransform2D;
use crate::components::layer::SortingLayer;
use crate::components::mapposition::MapPosition;
use crate::components::scale::Scale;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::resources::camera2d::SceneCamera;
use crate::resources::display::{Display, DrawCommand};
use crate::resources::worldtime::WorldTime;

/// Whether a sprite rectangle centered at `center` overlaps the camera view.
pub fn overlaps_view(camera: &SceneCamera, center: Vec2, size: Vec2) -> bool {
    let half = size * 0.5;
    let view_half = Vec2::new(camera.half_width, camera.half_height);
    let d = (center - camera.position).abs();
    d.x <= half.x + view_half.x && d.y <= half.y + view_half.y
}

pub fn render_system(
    time: Res<WorldTime>,
    camera: Res<SceneCamera>,
    display: Option<ResMut<Display>>,
    sprites: Query<(
        Entity,
        &Sprite,
        Option<&GlobalTransform2D>,
        Option<&MapPosition>,
        Option<&Scale>,
        Option<&SortingLayer>,
        Option<&ZIndex>,
    )>,
) {
    let Some(mut display) = display else {
        return;
    };

    let mut to_draw: Vec<(usize, DrawCommand)> = sprites
        .iter()
        .filter_map(|(entity, sprite, global, local, scale, layer, z)| {
            let (position, world_scale) = match (global, local) {
                (Some(gt), _) => (gt.position, gt.scale),
                (None, Some(p)) => (p.pos, scale.map_or(Vec2::ONE, |s| s.scale)),
                (None, None) => return None,
            };
            let size = Vec2::new(sprite.width, sprite.height) * world_scale.abs();
            if !overlaps_view(&camera, position, size) {
                return None;
            }
            let sorting_layer = layer.map(|l| l.0.clone());
            let rank = display.layer_rank(sorting_layer.as_deref());
            Some((
                rank,
                DrawCommand {
                    entity,
                    tex_key: sprite.tex_key.clone(),
                    position,
                    size,
                    sorting_layer,
                    z: z.map_or(0, |z| z.0),
                },
            ))
        })
        .collect();

    to_draw.sort_by_key(|(rank, cmd)| (*rank, cmd.z));
    display.present(time.frame, to_draw.into_iter().map(|(_, cmd)| cmd).collect());
}
