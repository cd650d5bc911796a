use after_dark::{
    config::CityConfig,
    data_structures::scene_graph::{Scene, SceneGraph},
    glyph::GlyphBackdrop,
    layout::Viewport,
    world::World,
};

use crate::common::test_utils::{self, RecordingFont, THUMBNAIL};

mod common;

#[test]
fn scene_holds_exactly_the_live_meshes() {
    let config = test_utils::config();
    let font = test_utils::real_font();
    let mut scene = SceneGraph::new();
    let world = World::generate(THUMBNAIL, &config, &mut scene, Some(&font), &mut test_utils::rng());

    assert_eq!(world.lanes.len(), 12);
    assert!(!world.buildings.is_empty());
    assert_eq!(world.backdrop.cells.len(), 10 * 3);
    assert_eq!(scene.len(), world.live_mesh_count());
}

#[test]
fn same_seed_same_city() {
    let config = test_utils::config();
    let mut a = SceneGraph::new();
    let mut b = SceneGraph::new();
    let first = World::generate(THUMBNAIL, &config, &mut a, None, &mut test_utils::rng());
    let second = World::generate(THUMBNAIL, &config, &mut b, None, &mut test_utils::rng());
    assert_eq!(first, second);
}

#[test]
fn resize_twice_matches_resize_once() {
    let config = test_utils::config();
    let font = RecordingFont::new();
    let mut rng = test_utils::rng();
    let mut scene = SceneGraph::new();
    let mut world = World::generate(
        Viewport::new(300.0, 90.0),
        &config,
        &mut scene,
        Some(&font),
        &mut rng,
    );

    world.rebuild(THUMBNAIL, &config, &mut scene, Some(&font), &mut rng);
    let once = (world.lanes.clone(), world.backdrop.cells.len());
    world.rebuild(THUMBNAIL, &config, &mut scene, Some(&font), &mut rng);
    let twice = (world.lanes.clone(), world.backdrop.cells.len());

    assert_eq!(once, twice);
    assert_eq!(world.viewport, THUMBNAIL);
    assert_eq!(scene.len(), world.live_mesh_count());
    for building in &world.buildings {
        let lane = &world.lanes[building.lane];
        assert!(building.origin.x >= lane.left && building.origin.x < lane.right);
    }
}

#[test]
fn teardown_removes_everything() {
    let config = test_utils::config();
    let font = RecordingFont::new();
    let mut scene = SceneGraph::new();
    let mut world = World::generate(THUMBNAIL, &config, &mut scene, Some(&font), &mut test_utils::rng());
    let live = world.live_mesh_count();

    assert_eq!(world.teardown(&mut scene), live);
    assert!(scene.is_empty());
    assert_eq!(world.live_mesh_count(), 0);
    assert!(world.lanes.is_empty());
    assert_eq!(scene.drain_removed().len(), live);
}

#[test]
fn missing_font_drops_only_text() {
    let config = test_utils::config();
    let mut scene = SceneGraph::new();
    let world = World::generate(THUMBNAIL, &config, &mut scene, None, &mut test_utils::rng());

    assert!(world.backdrop.cells.is_empty());
    assert!(world.buildings.iter().all(|b| b.meshes.label.is_none()));
    assert!(world.buildings.iter().all(|b| b.live_mesh_count() == 9));
}

#[test]
fn labels_can_be_switched_off() {
    let config = CityConfig {
        labels: false,
        ..test_utils::config()
    };
    let font = RecordingFont::new();
    let mut scene = SceneGraph::new();
    let world = World::generate(THUMBNAIL, &config, &mut scene, Some(&font), &mut test_utils::rng());

    assert!(world.buildings.iter().all(|b| b.meshes.label.is_none()));
    assert!(!world.backdrop.cells.is_empty());
}

#[test]
fn glyphs_cycle_through_the_string_row_major() {
    let config = test_utils::config();
    let font = RecordingFont::new();
    let mut scene = SceneGraph::new();
    let backdrop = GlyphBackdrop::populate(test_utils::DESKTOP, &config, &mut scene, Some(&font));

    assert_eq!((backdrop.columns, backdrop.rows), (30, 20));
    assert_eq!(backdrop.cells.len(), 600);
    let letters: Vec<char> = "SKYLINE".chars().collect();
    for (index, cell) in backdrop.cells.iter().enumerate() {
        assert_eq!(index, cell.row * backdrop.columns + cell.column);
        assert_eq!(cell.ch, letters[index % letters.len()]);
    }
    // Row 1 starts 30 characters in.
    assert_eq!(backdrop.cells[30].ch, 'Y');

    // Each distinct character is turned into geometry once.
    assert_eq!(font.requests().len(), 7);
    assert_eq!(scene.len(), 2 * 600);
}

#[test]
fn glyph_and_shadow_share_a_cell() {
    let config = test_utils::config();
    let font = test_utils::real_font();
    let mut scene = SceneGraph::new();
    let backdrop = GlyphBackdrop::populate(THUMBNAIL, &config, &mut scene, Some(&font));

    let pitch = config.glyph_pitch * config.camera_zoom;
    let left = -THUMBNAIL.width * config.camera_zoom / 2.0;
    let top = -THUMBNAIL.height * config.camera_zoom / 2.0;
    for cell in &backdrop.cells {
        let glyph = scene.transform(cell.glyph.expect("glyph")).expect("live glyph");
        let shadow = scene.transform(cell.shadow.expect("shadow")).expect("live shadow");
        assert!((glyph.position.x - (left + cell.column as f32 * pitch)).abs() < 1e-4);
        assert!((glyph.position.z - (top + cell.row as f32 * pitch)).abs() < 1e-4);
        assert!(glyph.position.y > shadow.position.y);
        assert_eq!(shadow.position.y, 0.0);
        assert!(shadow.scale.z < glyph.scale.z);
        assert_eq!(glyph.rotation, shadow.rotation);
    }
}

#[test]
fn advancing_keeps_scene_and_world_in_step() {
    let config = test_utils::config();
    let font = RecordingFont::new();
    let mut scene = SceneGraph::new();
    let mut world = World::generate(
        test_utils::DESKTOP,
        &CityConfig {
            building_height: after_dark::config::Span::new(5.0, 25.0),
            ..config.clone()
        },
        &mut scene,
        Some(&font),
        &mut test_utils::rng(),
    );
    assert_eq!(world.lanes.len(), 80);

    let mut live = world.live_mesh_count();
    for _ in 0..3 {
        let stats = world.advance(&mut scene, &config);
        assert_eq!(stats.visited(), live);
        let now = world.live_mesh_count();
        assert_eq!(now, live - stats.retired);
        assert_eq!(scene.len(), now);
        live = now;
    }
}
