//! Integration tests for the parent-child hierarchy: transform propagation and
//! recursive layer assignment.
//!
//! # Usage
//!
//! ```sh
//! cargo test --test hierarchy_integration
//! ```

use bevy_ecs::hierarchy::{ChildOf, Children};
use bevy_ecs::prelude::*;
use bevy_math::Vec2;

use stickertrain::components::globaltransform2d::GlobalTransform2D;
use stickertrain::components::layer::{LayerRequest, RenderLayer, SortingLayer};
use stickertrain::components::mapposition::MapPosition;
use stickertrain::components::scale::Scale;
use stickertrain::resources::prefabs::PrefabStore;
use stickertrain::systems::layers::apply_layer_requests;
use stickertrain::systems::propagate_transforms::propagate_transforms;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn tick_propagate(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(propagate_transforms);
    schedule.run(world);
}

fn tick_layers(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(apply_layer_requests);
    schedule.run(world);
}

fn sorting_layer(world: &World, entity: Entity) -> Option<String> {
    world.get::<SortingLayer>(entity).map(|l| l.0.clone())
}

// =============================================================================
// Transform propagation
// =============================================================================

#[test]
fn globaltransform2d_default_values() {
    let gt = GlobalTransform2D::default();
    assert!(approx_eq(gt.position.x, 0.0));
    assert!(approx_eq(gt.position.y, 0.0));
    assert!(approx_eq(gt.scale.x, 1.0));
    assert!(approx_eq(gt.scale.y, 1.0));
}

#[test]
fn propagate_standalone_root_mirrors_local() {
    let mut world = World::new();
    let root = world
        .spawn((
            MapPosition::new(12.0, -3.0),
            Scale::new(2.0, 2.0),
            GlobalTransform2D::default(),
        ))
        .id();

    tick_propagate(&mut world);

    let gt = world.get::<GlobalTransform2D>(root).unwrap();
    assert!(approx_eq(gt.position.x, 12.0));
    assert!(approx_eq(gt.position.y, -3.0));
    assert!(approx_eq(gt.scale.x, 2.0));
}

#[test]
fn propagate_single_child_position_only() {
    let mut world = World::new();
    let parent = world
        .spawn((MapPosition::new(100.0, 100.0), GlobalTransform2D::default()))
        .id();
    let child = world
        .spawn((
            MapPosition::new(40.0, 0.0),
            ChildOf(parent),
            GlobalTransform2D::default(),
        ))
        .id();
    world.flush();

    tick_propagate(&mut world);

    let gt = world.get::<GlobalTransform2D>(child).unwrap();
    assert!(
        approx_eq(gt.position.x, 140.0),
        "Child world X: expected 140, got {}",
        gt.position.x
    );
    assert!(approx_eq(gt.position.y, 100.0));
    assert!(approx_eq(gt.scale.x, 1.0));
}

#[test]
fn propagate_child_offset_is_scaled_by_parent() {
    let mut world = World::new();
    let board = world
        .spawn((
            MapPosition::new(-8.0, 0.0),
            Scale::uniform(2.0),
            GlobalTransform2D::default(),
        ))
        .id();
    let sticker = world
        .spawn((
            MapPosition::new(1.5, -2.0),
            Scale::uniform(0.5),
            ChildOf(board),
            GlobalTransform2D::default(),
        ))
        .id();
    world.flush();

    tick_propagate(&mut world);

    let gt = world.get::<GlobalTransform2D>(sticker).unwrap();
    assert!(approx_eq(gt.position.x, -5.0));
    assert!(approx_eq(gt.position.y, -4.0));
    assert!(approx_eq(gt.scale.x, 1.0));
}

#[test]
fn propagate_grandchild_composes_whole_chain() {
    let mut world = World::new();
    let root = world
        .spawn((MapPosition::new(10.0, 0.0), Scale::uniform(2.0)))
        .id();
    let mid = world
        .spawn((MapPosition::new(1.0, 1.0), Scale::uniform(3.0), ChildOf(root)))
        .id();
    let leaf = world
        .spawn((MapPosition::new(1.0, 0.0), ChildOf(mid)))
        .id();
    world.flush();

    // First pass inserts missing GlobalTransform2D components.
    tick_propagate(&mut world);
    tick_propagate(&mut world);

    let gt = world.get::<GlobalTransform2D>(leaf).unwrap();
    // mid: (12, 2) scale 6; leaf: 12 + 1 * 6 = 18
    assert!(approx_eq(gt.position.x, 18.0), "got {}", gt.position.x);
    assert!(approx_eq(gt.position.y, 2.0));
    assert!(approx_eq(gt.scale.x, 6.0));
}

#[test]
fn propagate_follows_parent_movement() {
    let mut world = World::new();
    let parent = world
        .spawn((MapPosition::new(0.0, 0.0), GlobalTransform2D::default()))
        .id();
    let child = world
        .spawn((
            MapPosition::new(2.0, 0.0),
            ChildOf(parent),
            GlobalTransform2D::default(),
        ))
        .id();
    world.flush();
    tick_propagate(&mut world);

    world.get_mut::<MapPosition>(parent).unwrap().pos.x = -10.0;
    tick_propagate(&mut world);

    let gt = world.get::<GlobalTransform2D>(child).unwrap();
    assert!(approx_eq(gt.position.x, -8.0));
}

#[test]
fn reparented_child_uses_new_parent() {
    let mut world = World::new();
    let a = world
        .spawn((MapPosition::new(0.0, 0.0), GlobalTransform2D::default()))
        .id();
    let b = world
        .spawn((MapPosition::new(50.0, 0.0), GlobalTransform2D::default()))
        .id();
    let child = world
        .spawn((
            MapPosition::new(1.0, 0.0),
            ChildOf(a),
            GlobalTransform2D::default(),
        ))
        .id();
    world.flush();
    tick_propagate(&mut world);
    assert!(approx_eq(
        world.get::<GlobalTransform2D>(child).unwrap().position.x,
        1.0
    ));

    world.entity_mut(child).insert(ChildOf(b));
    world.flush();
    tick_propagate(&mut world);

    assert!(approx_eq(
        world.get::<GlobalTransform2D>(child).unwrap().position.x,
        51.0
    ));
    assert!(world.get::<Children>(a).is_none_or(|c| c.is_empty()));
}

// =============================================================================
// Layer requests
// =============================================================================

#[test]
fn layer_request_applies_to_whole_tree() {
    let mut world = World::new();
    let root = world
        .spawn((MapPosition::new(0.0, 0.0), LayerRequest::new("Ground")))
        .id();
    let child = world
        .spawn((MapPosition::new(0.0, 1.0), ChildOf(root)))
        .id();
    let grandchild = world
        .spawn((MapPosition::new(0.0, 1.0), ChildOf(child)))
        .id();
    world.flush();

    tick_layers(&mut world);

    for entity in [root, child, grandchild] {
        assert_eq!(sorting_layer(&world, entity).as_deref(), Some("Ground"));
        assert_eq!(
            world.get::<RenderLayer>(entity).map(|l| l.0.as_str()),
            Some("Ground")
        );
    }
    assert!(world.get::<LayerRequest>(root).is_none());
}

#[test]
fn later_parts_do_not_inherit_without_new_request() {
    let mut world = World::new();
    let root = world.spawn((MapPosition::new(0.0, 0.0), LayerRequest::new("Sky"))).id();
    tick_layers(&mut world);

    let late = world
        .spawn((MapPosition::new(0.0, 0.0), ChildOf(root)))
        .id();
    world.flush();
    tick_layers(&mut world);

    assert_eq!(sorting_layer(&world, root).as_deref(), Some("Sky"));
    assert!(sorting_layer(&world, late).is_none());
}

#[test]
fn new_request_overrides_previous_layer() {
    let mut world = World::new();
    let root = world.spawn((MapPosition::new(0.0, 0.0), LayerRequest::new("Ground"))).id();
    tick_layers(&mut world);

    world.entity_mut(root).insert(LayerRequest::new("Board"));
    tick_layers(&mut world);

    assert_eq!(sorting_layer(&world, root).as_deref(), Some("Board"));
}

#[test]
fn prefab_parts_take_root_layer() {
    let mut world = World::new();
    let store = PrefabStore::builtin();
    let flower = {
        let mut commands = world.commands();
        let e = store
            .instantiate(&mut commands, "flower", Vec2::new(28.0, -10.0))
            .unwrap();
        commands.entity(e).insert(LayerRequest::new("Ground"));
        e
    };
    world.flush();

    tick_layers(&mut world);

    let parts: Vec<Entity> = world.get::<Children>(flower).unwrap().iter().collect();
    assert_eq!(parts.len(), 2);
    for part in parts {
        assert_eq!(sorting_layer(&world, part).as_deref(), Some("Ground"));
    }
}
