//! Engine tick integration tests for growth, scrolling, stations, drift, TTL
//! and the misc spawner.
//!
//! Each test builds a minimal world, runs one system (or a short chain) for a
//! number of frames and checks the resulting components.

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::ScheduleSystem;
use bevy_math::Vec2;

use stickertrain::components::category::ObjectCategory;
use stickertrain::components::growth::Growth;
use stickertrain::components::layer::LayerRequest;
use stickertrain::components::mapposition::MapPosition;
use stickertrain::components::miscspawner::{MiscSpawner, SpawnEntry};
use stickertrain::components::parallax::ParallaxLayer;
use stickertrain::components::passingobject::{PassingObject, PassingState};
use stickertrain::components::scale::Scale;
use stickertrain::components::scroller::{BackgroundScroller, ScrollState};
use stickertrain::components::sprite::Sprite;
use stickertrain::components::sticker::StickerDrift;
use stickertrain::components::ttl::Ttl;
use stickertrain::components::tween::Easing;
use stickertrain::events::station::StationArrivedEvent;
use stickertrain::resources::camera2d::SceneCamera;
use stickertrain::resources::collector::StickerCollector;
use stickertrain::resources::input::ButtonPad;
use stickertrain::resources::prefabs::PrefabStore;
use stickertrain::resources::spawner::{ObjectSpawner, SpawnRng};
use stickertrain::resources::worldtime::WorldTime;
use stickertrain::systems::miscspawner::misc_spawner_system;
use stickertrain::systems::parallax::{init_parallax_layers, parallax_system};
use stickertrain::systems::passingobject::passing_object_system;
use stickertrain::systems::scroller::scroller_system;
use stickertrain::systems::spawner::object_growth_system;
use stickertrain::systems::sticker::sticker_drift_system;
use stickertrain::systems::ttl::ttl_system;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world(delta: f32) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime {
        delta,
        ..Default::default()
    });
    world.insert_resource(SceneCamera::default());
    world.insert_resource(PrefabStore::builtin());
    world.insert_resource(SpawnRng::with_seed(7));
    world
}

fn tick<M>(world: &mut World, frames: usize, systems: impl IntoScheduleConfigs<ScheduleSystem, M>) {
    let mut schedule = Schedule::default();
    schedule.add_systems(systems);
    for _ in 0..frames {
        schedule.run(world);
    }
}

fn count<C: Component>(world: &mut World) -> usize {
    world.query::<&C>().iter(world).count()
}

#[derive(Resource, Default)]
struct Arrivals(Vec<Entity>);

// =============================================================================
// Growth
// =============================================================================

fn growing_world(delta: f32) -> (World, Entity) {
    let mut world = make_world(delta);
    let mut pad = ButtonPad::default();
    pad.apply_frame([true, false, false, false, false]);
    world.insert_resource(pad);

    let cow = world
        .spawn((Growth::new(1.0, 3.0), Scale::uniform(1.0)))
        .id();
    let mut spawner = ObjectSpawner::default();
    spawner.record_spawn(ObjectCategory::Cow, cow);
    world.insert_resource(spawner);
    (world, cow)
}

#[test]
fn held_button_grows_linearly() {
    let (mut world, cow) = growing_world(0.25);
    tick(&mut world, 4, object_growth_system);
    let scale = world.get::<Scale>(cow).unwrap();
    assert!(approx_eq(scale.scale.x, 2.0), "got {}", scale.scale.x);
    assert!(approx_eq(scale.scale.y, 2.0));
}

#[test]
fn growth_is_capped_at_max_scale() {
    let (mut world, cow) = growing_world(0.5);
    tick(&mut world, 20, object_growth_system);
    assert!(approx_eq(world.get::<Scale>(cow).unwrap().scale.x, 3.0));
}

#[test]
fn growth_skipped_while_background_paused() {
    let (mut world, cow) = growing_world(0.25);
    let mut scroller = BackgroundScroller::new(2.0, 5.0);
    scroller.set_pause(true);
    world.spawn(scroller);

    tick(&mut world, 4, object_growth_system);
    assert!(approx_eq(world.get::<Scale>(cow).unwrap().scale.x, 1.0));
}

#[test]
fn released_button_stops_growth() {
    let (mut world, cow) = growing_world(0.25);
    tick(&mut world, 2, object_growth_system);
    world
        .resource_mut::<ButtonPad>()
        .apply_frame([false; 5]);
    tick(&mut world, 4, object_growth_system);
    assert!(approx_eq(world.get::<Scale>(cow).unwrap().scale.x, 1.5));
}

#[test]
fn despawned_growing_instance_is_forgotten() {
    let (mut world, cow) = growing_world(0.25);
    world.despawn(cow);
    tick(&mut world, 1, object_growth_system);
    assert!(
        world
            .resource::<ObjectSpawner>()
            .growing(ObjectCategory::Cow)
            .is_none()
    );
}

// =============================================================================
// Background scroller
// =============================================================================

#[test]
fn scroller_spawns_passing_object_each_interval() {
    let mut world = make_world(0.25);
    let bg = world
        .spawn(BackgroundScroller::new(2.0, 1.0).with_passing("station", 5.0, Vec2::new(10.0, 0.0)))
        .id();

    tick(&mut world, 3, scroller_system);
    assert_eq!(count::<PassingObject>(&mut world), 0);

    tick(&mut world, 1, scroller_system);
    let mut q = world.query::<(&PassingObject, &MapPosition, &Ttl, &LayerRequest)>();
    let (passing, pos, ttl, layer) = q.single(&world).unwrap();
    assert_eq!(passing.background, Some(bg));
    assert_eq!(passing.state, PassingState::Approaching);
    assert!(approx_eq(pos.pos.x, 10.0));
    assert!(approx_eq(ttl.remaining, 15.0));
    assert_eq!(layer.0, "Station");

    tick(&mut world, 4, scroller_system);
    assert_eq!(count::<PassingObject>(&mut world), 2);
}

#[test]
fn scroller_does_not_spawn_while_paused() {
    let mut world = make_world(0.25);
    let mut scroller = BackgroundScroller::new(2.0, 1.0);
    scroller.set_pause(true);
    world.spawn(scroller);

    tick(&mut world, 40, scroller_system);
    assert_eq!(count::<PassingObject>(&mut world), 0);
}

#[test]
fn timed_pause_eases_back_to_idle() {
    let mut world = make_world(0.25);
    let mut scroller = BackgroundScroller::new(4.0, 100.0).with_easing(Easing::Linear, 2.0);
    scroller.pause_for(1.0);
    let bg = world.spawn(scroller).id();

    tick(&mut world, 3, scroller_system);
    assert!(world.get::<BackgroundScroller>(bg).unwrap().is_paused());

    tick(&mut world, 1, scroller_system);
    let s = world.get::<BackgroundScroller>(bg).unwrap();
    assert!(matches!(s.state, ScrollState::Easing { .. }));
    assert!(approx_eq(s.current_speed(), 0.0));

    tick(&mut world, 4, scroller_system);
    let s = world.get::<BackgroundScroller>(bg).unwrap();
    assert!(approx_eq(s.current_speed(), 2.0));

    tick(&mut world, 4, scroller_system);
    let s = world.get::<BackgroundScroller>(bg).unwrap();
    assert_eq!(s.state, ScrollState::Idle);
    assert!(approx_eq(s.current_speed(), 4.0));
}

// =============================================================================
// Passing objects
// =============================================================================

fn station_world() -> (World, Entity, Entity) {
    let mut world = make_world(1.0 / 60.0);
    world.init_resource::<Arrivals>();
    world.add_observer(|trigger: On<StationArrivedEvent>, mut arrivals: ResMut<Arrivals>| {
        arrivals.0.push(trigger.event().station);
    });
    let bg = world
        .spawn(BackgroundScroller::new(2.0, 1000.0).with_easing(Easing::QuadIn, 2.0))
        .id();
    let station = world
        .spawn((
            MapPosition::new(10.0, 0.0),
            PassingObject::new(5.0, 5.0, Some(bg)),
        ))
        .id();
    (world, bg, station)
}

#[test]
fn passing_object_stops_once_at_center() {
    let (mut world, bg, station) = station_world();

    let mut frames = 0;
    while !world.get::<PassingObject>(station).unwrap().has_paused() {
        tick(&mut world, 1, passing_object_system);
        frames += 1;
        assert!(frames < 300, "station never reached the center");
    }

    let x = world.get::<MapPosition>(station).unwrap().pos.x;
    assert!((-0.36..=0.01).contains(&x), "stopped at {}", x);
    assert!(world.get::<BackgroundScroller>(bg).unwrap().is_paused());
    assert_eq!(world.resource::<Arrivals>().0, vec![station]);

    // Held for the pause duration without moving.
    tick(&mut world, 120, passing_object_system);
    assert!(world.get::<PassingObject>(station).unwrap().is_paused());
    assert!(approx_eq(world.get::<MapPosition>(station).unwrap().pos.x, x));

    tick(&mut world, 200, passing_object_system);
    let passing = world.get::<PassingObject>(station).unwrap();
    assert_eq!(passing.state, PassingState::Departed);
    let scroller = world.get::<BackgroundScroller>(bg).unwrap();
    assert!(matches!(scroller.state, ScrollState::Easing { .. }));

    tick(&mut world, 60, passing_object_system);
    assert!(world.get::<MapPosition>(station).unwrap().pos.x < x - 4.0);
    assert_eq!(world.resource::<Arrivals>().0.len(), 1);
}

#[test]
fn background_resumes_when_station_is_removed_mid_pause() {
    let (mut world, bg, station) = station_world();

    let mut frames = 0;
    while !world.get::<PassingObject>(station).unwrap().has_paused() {
        tick(&mut world, 1, (scroller_system, passing_object_system).chain());
        frames += 1;
        assert!(frames < 300, "station never reached the center");
    }
    assert!(world.get::<BackgroundScroller>(bg).unwrap().is_paused());

    world.despawn(station);
    tick(&mut world, 240, (scroller_system, passing_object_system).chain());
    assert!(world.get::<BackgroundScroller>(bg).unwrap().is_paused());

    // Five second pause at 60 fps, plus a little slack.
    tick(&mut world, 70, (scroller_system, passing_object_system).chain());
    let scroller = world.get::<BackgroundScroller>(bg).unwrap();
    assert!(!scroller.is_paused(), "state {:?}", scroller.state);
    assert!(matches!(scroller.state, ScrollState::Easing { .. }));
}

#[test]
fn timed_station_pause_runs_full_cycle_back_to_idle() {
    let (mut world, bg, station) = station_world();

    // ~2 s to the center, 5 s stopped, 2 s easing.
    tick(&mut world, 600, (scroller_system, passing_object_system).chain());

    assert_eq!(
        world.get::<PassingObject>(station).unwrap().state,
        PassingState::Departed
    );
    let scroller = world.get::<BackgroundScroller>(bg).unwrap();
    assert_eq!(scroller.state, ScrollState::Idle);
    assert!(approx_eq(scroller.current_speed(), 2.0));
}

#[test]
fn fast_passing_object_jumping_the_window_still_stops() {
    let mut world = make_world(0.5);
    world.init_resource::<Arrivals>();
    world.add_observer(|trigger: On<StationArrivedEvent>, mut arrivals: ResMut<Arrivals>| {
        arrivals.0.push(trigger.event().station);
    });
    let bg = world.spawn(BackgroundScroller::new(2.0, 1000.0)).id();
    let station = world
        .spawn((
            MapPosition::new(10.0, 0.0),
            PassingObject::new(12.0, 1.0, Some(bg)),
        ))
        .id();

    tick(&mut world, 3, passing_object_system);
    assert!(world.get::<PassingObject>(station).unwrap().has_paused());
    assert_eq!(world.resource::<Arrivals>().0.len(), 1);
}

#[test]
fn passing_object_without_background_still_arrives() {
    let mut world = make_world(1.0 / 60.0);
    world.init_resource::<Arrivals>();
    world.add_observer(|trigger: On<StationArrivedEvent>, mut arrivals: ResMut<Arrivals>| {
        arrivals.0.push(trigger.event().station);
    });
    let station = world
        .spawn((MapPosition::new(2.0, 0.0), PassingObject::new(5.0, 1.0, None)))
        .id();

    tick(&mut world, 60, passing_object_system);
    assert!(world.get::<PassingObject>(station).unwrap().has_paused());
    assert_eq!(world.resource::<Arrivals>().0, vec![station]);
}

// =============================================================================
// Sticker drift
// =============================================================================

fn drifting(world: &mut World, x: f32) -> Entity {
    world
        .spawn((
            MapPosition::new(x, 0.0),
            StickerDrift::new(10.0, 0.0).with_collect_x(-40.0),
        ))
        .id()
}

#[test]
fn stickers_are_collected_in_exit_order() {
    let mut world = make_world(0.25);
    world.init_resource::<StickerCollector>();
    let a = drifting(&mut world, -39.0);
    let b = drifting(&mut world, -30.0);
    let c = drifting(&mut world, -35.0);

    tick(&mut world, 6, sticker_drift_system);

    assert_eq!(world.resource::<StickerCollector>().collected(), &[a, c, b]);
    for e in [a, b, c] {
        assert!(world.get::<StickerDrift>(e).is_none());
        assert!(world.get_entity(e).is_ok());
    }
}

#[test]
fn sticker_exactly_on_threshold_is_not_collected() {
    let mut world = make_world(0.25);
    world.init_resource::<StickerCollector>();
    drifting(&mut world, -37.5);

    tick(&mut world, 1, sticker_drift_system);
    assert!(world.resource::<StickerCollector>().is_empty());
}

#[test]
fn drift_accelerates_over_time() {
    let mut world = make_world(0.5);
    world.init_resource::<StickerCollector>();
    let e = world
        .spawn((MapPosition::new(0.0, 0.0), StickerDrift::new(2.0, 1.0)))
        .id();

    tick(&mut world, 2, sticker_drift_system);
    // speeds 2.5 then 3.0 over half a second each
    assert!(approx_eq(world.get::<MapPosition>(e).unwrap().pos.x, -2.75));
}

#[test]
fn drift_stops_while_paused() {
    let mut world = make_world(0.25);
    world.init_resource::<StickerCollector>();
    let mut scroller = BackgroundScroller::new(2.0, 5.0);
    scroller.set_pause(true);
    world.spawn(scroller);
    let e = drifting(&mut world, -39.0);

    tick(&mut world, 10, sticker_drift_system);
    assert!(approx_eq(world.get::<MapPosition>(e).unwrap().pos.x, -39.0));
    assert!(world.resource::<StickerCollector>().is_empty());
}

// =============================================================================
// TTL
// =============================================================================

#[test]
fn ttl_despawns_entity_and_children() {
    let mut world = make_world(0.5);
    let parent = world.spawn(Ttl::new(1.0)).id();
    let child = world.spawn(ChildOf(parent)).id();

    tick(&mut world, 1, ttl_system);
    assert!(world.get_entity(parent).is_ok());

    tick(&mut world, 1, ttl_system);
    assert!(world.get_entity(parent).is_err());
    assert!(world.get_entity(child).is_err());
}

// =============================================================================
// Misc spawner
// =============================================================================

#[test]
fn misc_spawner_places_prop_with_ttl() {
    let mut world = make_world(0.25);
    world.spawn(MiscSpawner::new(
        vec![SpawnEntry::new("tractor", Vec2::new(30.0, -12.0)).with_ttl(5.0)],
        1.0,
    ));

    tick(&mut world, 3, misc_spawner_system);
    assert_eq!(count::<Ttl>(&mut world), 0);

    tick(&mut world, 1, misc_spawner_system);
    let mut q = world.query::<(&Sprite, &MapPosition, &Ttl, &LayerRequest)>();
    let (sprite, pos, ttl, layer) = q.single(&world).unwrap();
    assert_eq!(sprite.tex_key, "tractor");
    assert_eq!(pos.pos, Vec2::new(30.0, -12.0));
    assert!(approx_eq(ttl.remaining, 5.0));
    assert_eq!(layer.0, "Ground");
}

#[test]
fn misc_spawner_without_entries_does_nothing() {
    let mut world = make_world(1.0);
    world.spawn(MiscSpawner::new(Vec::new(), 1.0));
    tick(&mut world, 5, misc_spawner_system);
    assert_eq!(count::<Sprite>(&mut world), 0);
}

#[test]
fn misc_spawner_skips_unknown_prefab() {
    let mut world = make_world(1.0);
    world.spawn(MiscSpawner::new(
        vec![SpawnEntry::new("zeppelin", Vec2::ZERO)],
        1.0,
    ));
    tick(&mut world, 3, misc_spawner_system);
    assert_eq!(count::<Sprite>(&mut world), 0);
}

// =============================================================================
// Parallax
// =============================================================================

#[test]
fn parallax_length_comes_from_sprite_width() {
    let mut world = make_world(0.1);
    let with_sprite = world
        .spawn((
            MapPosition::new(0.0, 0.0),
            Sprite::new("hills", 40.0, 10.0),
            Scale::new(1.5, 1.0),
            ParallaxLayer::new(0.0, 1.0, 0.5, 1.0),
        ))
        .id();
    let without = world
        .spawn((MapPosition::new(0.0, 0.0), ParallaxLayer::new(0.0, 1.0, 0.5, 1.0)))
        .id();

    tick(&mut world, 1, init_parallax_layers);

    assert!(approx_eq(world.get::<ParallaxLayer>(with_sprite).unwrap().length, 60.0));
    assert!(approx_eq(world.get::<ParallaxLayer>(without).unwrap().length, 10.0));
}

#[test]
fn scroller_layer_stands_still_while_paused() {
    let mut world = make_world(0.5);
    let mut scroller = BackgroundScroller::new(2.0, 100.0);
    scroller.set_pause(true);
    let ground = world
        .spawn((
            MapPosition::new(0.0, -10.0),
            ParallaxLayer::new(0.0, 40.0, 0.0, 2.0),
            scroller,
        ))
        .id();
    let sky = world
        .spawn((MapPosition::new(0.0, 5.0), ParallaxLayer::new(0.0, 40.0, 0.0, 1.0)))
        .id();

    tick(&mut world, 2, parallax_system);

    assert!(approx_eq(world.get::<MapPosition>(ground).unwrap().pos.x, 0.0));
    assert!(approx_eq(world.get::<MapPosition>(sky).unwrap().pos.x, -1.0));

    world
        .get_mut::<BackgroundScroller>(ground)
        .unwrap()
        .set_pause(false);
    tick(&mut world, 2, parallax_system);
    assert!(approx_eq(world.get::<MapPosition>(ground).unwrap().pos.x, -2.0));
}
