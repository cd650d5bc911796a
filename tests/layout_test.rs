use after_dark::{
    data_structures::scene_graph::{Scene, SceneGraph},
    layout::{Viewport, compute_lanes, lane_count, layout_buildings, plan_lane},
};

use crate::common::test_utils::{self, DESKTOP, RecordingFont, THUMBNAIL};

mod common;

#[test]
fn desktop_viewport_has_eighty_lanes() {
    let config = test_utils::config();
    assert_eq!(lane_count(DESKTOP, &config), 80);

    let lanes = compute_lanes(DESKTOP, &config);
    assert_eq!(lanes.len(), 80);
    assert_eq!(lanes[0].z, -80.0);
    assert_eq!(lanes[1].z - lanes[0].z, config.lane_height);
    assert!(lanes.iter().all(|lane| lane.left == -300.0 && lane.right == 300.0));
}

#[test]
fn partial_band_still_gets_a_lane() {
    let config = test_utils::config();
    assert_eq!(lane_count(Viewport::new(100.0, 95.0), &config), 10);
    assert_eq!(lane_count(Viewport::new(100.0, 0.0), &config), 0);
}

#[test]
fn every_lane_is_covered_from_its_left_bound() {
    let config = test_utils::config();
    let mut rng = test_utils::rng();
    for lane in compute_lanes(DESKTOP, &config) {
        let lots = plan_lane(&lane, &config, DESKTOP.width, &mut rng);
        assert!(!lots.is_empty());
        assert_eq!(lots[0].x, lane.left);

        let covered: f32 = lots.iter().map(|lot| lot.advance()).sum();
        assert!(covered >= lane.span() - 1e-3);

        for pair in lots.windows(2) {
            assert!(pair[1].x > pair[0].x);
            assert!((pair[1].x - pair[0].x - pair[0].advance()).abs() < 1e-3);
        }
        // Only the cursor before the last lot is inside the lane.
        assert!(lots.iter().all(|lot| lot.x >= lane.left && lot.x < lane.right));
    }
}

#[test]
fn lot_dimensions_stay_in_range() {
    let config = test_utils::config();
    let mut rng = test_utils::rng();
    let gap = config.gap(DESKTOP.width);
    for lane in compute_lanes(DESKTOP, &config) {
        for lot in plan_lane(&lane, &config, DESKTOP.width, &mut rng) {
            assert!((5.0..=25.0).contains(&lot.dims.width));
            assert!((20.0..=70.0).contains(&lot.dims.height));
            assert!((10.0..=25.0).contains(&lot.dims.depth));
            assert!(lot.gap >= gap.lower() && lot.gap <= gap.upper());
        }
    }
}

#[test]
fn zero_width_viewport_places_nothing() {
    let config = test_utils::config();
    let mut rng = test_utils::rng();
    let viewport = Viewport::new(0.0, 50.0);
    let lanes = compute_lanes(viewport, &config);
    assert_eq!(lanes.len(), 5);
    for lane in &lanes {
        assert!(plan_lane(lane, &config, viewport.width, &mut rng).is_empty());
    }
}

#[test]
fn buildings_register_their_twins() {
    let config = test_utils::config();
    let mut rng = test_utils::rng();
    let mut scene = SceneGraph::new();
    let lanes = compute_lanes(THUMBNAIL, &config);

    let buildings = layout_buildings(&lanes, THUMBNAIL, &config, &mut scene, None, &mut rng);
    assert!(!buildings.is_empty());
    for building in &buildings {
        assert_eq!(building.live_mesh_count(), 9);
        assert!(building.meshes.label.is_none());
        assert_eq!(building.origin.y, building.dims.height / 2.0);
        assert_eq!(building.origin.z, lanes[building.lane].z);
        for id in building.meshes.live() {
            let transform = scene.transform(id).expect("twin is in the scene");
            assert_eq!(transform.position, building.origin);
        }
    }
    assert_eq!(scene.len(), 9 * buildings.len());
}

#[test]
fn labels_show_the_rounded_height() {
    let config = test_utils::config();
    let mut rng = test_utils::rng();
    let mut scene = SceneGraph::new();
    let font = RecordingFont::new();
    let lanes = compute_lanes(THUMBNAIL, &config);

    let buildings =
        layout_buildings(&lanes, THUMBNAIL, &config, &mut scene, Some(&font), &mut rng);
    let expected: Vec<String> = buildings
        .iter()
        .map(|building| format!("{:.0}", building.dims.height))
        .collect();
    assert_eq!(font.requests(), expected);
    assert!(buildings.iter().all(|b| b.meshes.label.is_some()));
    assert_eq!(scene.len(), 10 * buildings.len());
}
