// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Click resolution, selection and the active marker overlay.

use approx::assert_relative_eq;
use atlas_dry_tests::{
    canvas_click, markers, overlay_click, payload_for, pointer_at, rendered_cluster,
    rendered_marker, HookCall, MapFixture,
};
use atlas_geo::{LngLat, LngLatBounds};
use atlas_map_codec::EngineCall;
use atlas_map_port::{Cursor, EaseToOptions, MarkerId, ScreenPoint};
use atlas_markable::{MarkableError, Marker, MARKER_SOURCE, MOUNT_SUBSCRIPTIONS};

fn at(x: f64, y: f64) -> ScreenPoint {
    ScreenPoint::new(x, y)
}

fn three_markers() -> MapFixture {
    MapFixture::loaded(
        markers(&[(1, 10.0, 10.0), (2, 20.0, 20.0), (3, 30.0, 30.0)]),
        false,
    )
    .unwrap()
}

#[test]
fn clicking_a_marker_mounts_one_overlay_at_its_coordinate() {
    let mut f = three_markers();
    f.engine.stub_hit(at(5.0, 5.0), rendered_marker(2, [20.0, 20.0]));
    f.send(canvas_click(5.0, 5.0)).unwrap();

    assert_eq!(f.map.active_marker_id(), Some(&MarkerId::from(2)));
    assert_eq!(f.engine.count("overlay.mount"), 1);
    assert_eq!(
        f.engine.overlays(),
        vec![(LngLat::new(20.0, 20.0), Some(payload_for(&MarkerId::from(2))))]
    );
}

#[test]
fn marker_click_eases_above_the_marker() {
    let mut f = three_markers();
    f.engine.set_camera(LngLat::new(0.0, 0.0), 2.0);
    f.engine.stub_hit(at(1.0, 1.0), rendered_marker(1, [10.0, 10.0]));
    f.send(canvas_click(1.0, 1.0)).unwrap();

    let eases = f.engine.calls_labeled("easeTo");
    assert_eq!(eases.len(), 1);
    let EngineCall::EaseTo {
        options: EaseToOptions {
            center: Some(center),
            zoom: None,
        },
        tag,
    } = eases[0]
    else {
        unreachable!("easeTo log entry");
    };
    assert!(!tag.user);
    assert_relative_eq!(center.lng, 10.0);
    assert_relative_eq!(center.lat, 30.0);
}

#[test]
fn selection_republishes_the_source_with_one_active_feature() {
    let mut f = three_markers();
    f.engine.stub_hit(at(1.0, 1.0), rendered_marker(3, [30.0, 30.0]));
    f.send(canvas_click(1.0, 1.0)).unwrap();

    let data = f.engine.source_data(MARKER_SOURCE).unwrap();
    assert_eq!(data.len(), 3);
    let active: Vec<_> = data.active().map(|feat| feat.id.clone()).collect();
    assert_eq!(active, vec![MarkerId::from(3)]);
}

#[test]
fn empty_click_deselects_and_removes_the_overlay() {
    let mut f = three_markers();
    f.engine.stub_hit(at(1.0, 1.0), rendered_marker(1, [10.0, 10.0]));
    f.send(canvas_click(1.0, 1.0)).unwrap();
    f.send(canvas_click(50.0, 50.0)).unwrap();

    assert_eq!(f.map.active_marker_id(), None);
    assert!(!f.map.is_overlay_mounted());
    assert_eq!(f.engine.live_overlays(), 0);
    assert_eq!(f.engine.count("overlay.unmount"), 1);
    let data = f.engine.source_data(MARKER_SOURCE).unwrap();
    assert_eq!(data.active().count(), 0);
}

#[test]
fn switching_markers_moves_the_existing_overlay() {
    let mut f = three_markers();
    f.engine.stub_hit(at(1.0, 1.0), rendered_marker(1, [10.0, 10.0]));
    f.engine.stub_hit(at(2.0, 2.0), rendered_marker(2, [20.0, 20.0]));
    f.send(canvas_click(1.0, 1.0)).unwrap();
    f.send(canvas_click(2.0, 2.0)).unwrap();

    assert_eq!(f.engine.count("addOverlay"), 1);
    assert_eq!(f.engine.live_overlays(), 1);
    assert_eq!(
        f.engine.overlays(),
        vec![(LngLat::new(20.0, 20.0), Some(payload_for(&MarkerId::from(2))))]
    );
}

#[test]
fn cluster_click_deselects_and_fits_known_members() {
    let mut f = three_markers();
    f.engine.stub_hit(at(1.0, 1.0), rendered_marker(1, [10.0, 10.0]));
    f.send(canvas_click(1.0, 1.0)).unwrap();

    f.engine.stub_hit(
        at(9.0, 9.0),
        rendered_cluster(
            [25.0, 25.0],
            &[MarkerId::from(2), MarkerId::from(3), MarkerId::from(99)],
        ),
    );
    f.send(canvas_click(9.0, 9.0)).unwrap();

    assert_eq!(f.map.active_marker_id(), None);
    assert_eq!(f.engine.live_overlays(), 0);
    let fits = f.engine.calls_labeled("fitBounds");
    assert_eq!(fits.len(), 1);
    assert!(matches!(
        fits[0],
        EngineCall::FitBounds { bounds, .. }
            if bounds == LngLatBounds::from_corners(LngLat::new(20.0, 20.0), LngLat::new(30.0, 30.0))
    ));
}

#[test]
fn cluster_of_unknown_markers_fits_nothing() {
    let mut f = three_markers();
    f.engine
        .stub_hit(at(9.0, 9.0), rendered_cluster([0.0, 0.0], &[MarkerId::from(42)]));
    f.send(canvas_click(9.0, 9.0)).unwrap();
    assert_eq!(f.engine.count("fitBounds"), 0);
}

#[test]
fn markers_win_over_clusters_at_the_same_point() {
    let mut f = three_markers();
    f.engine
        .stub_hit(at(1.0, 1.0), rendered_cluster([0.0, 0.0], &[MarkerId::from(2)]));
    f.engine.stub_hit(at(1.0, 1.0), rendered_marker(1, [10.0, 10.0]));
    f.send(canvas_click(1.0, 1.0)).unwrap();
    assert_eq!(f.map.active_marker_id(), Some(&MarkerId::from(1)));
    assert_eq!(f.engine.count("fitBounds"), 0);
}

#[test]
fn overlay_clicks_do_not_change_selection() {
    let mut f = three_markers();
    f.engine.stub_hit(at(1.0, 1.0), rendered_marker(1, [10.0, 10.0]));
    f.send(canvas_click(1.0, 1.0)).unwrap();
    f.send(overlay_click(50.0, 50.0)).unwrap();

    assert_eq!(f.map.active_marker_id(), Some(&MarkerId::from(1)));
    assert!(f.map.is_overlay_mounted());
    let clicks = f
        .hooks
        .calls()
        .into_iter()
        .filter(|c| *c == HookCall::Click)
        .count();
    assert_eq!(clicks, 2);
}

#[test]
fn removing_the_active_marker_clears_selection_and_overlay() {
    let mut f = three_markers();
    f.engine.stub_hit(at(1.0, 1.0), rendered_marker(2, [20.0, 20.0]));
    f.send(canvas_click(1.0, 1.0)).unwrap();

    f.map
        .set_markers(markers(&[(1, 10.0, 10.0), (3, 30.0, 30.0)]))
        .unwrap();
    assert_eq!(f.map.active_marker_id(), None);
    assert_eq!(f.engine.live_overlays(), 0);
    let data = f.engine.source_data(MARKER_SOURCE).unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data.active().count(), 0);
}

#[test]
fn moving_the_active_marker_moves_its_overlay() {
    let mut f = three_markers();
    f.engine.stub_hit(at(1.0, 1.0), rendered_marker(2, [20.0, 20.0]));
    f.send(canvas_click(1.0, 1.0)).unwrap();

    f.map
        .set_markers(markers(&[(1, 10.0, 10.0), (2, 21.0, 20.0), (3, 30.0, 30.0)]))
        .unwrap();
    assert_eq!(f.engine.count("overlay.setLngLat"), 1);
    assert_eq!(f.engine.count("overlay.mount"), 1);
    assert_eq!(f.engine.overlays()[0].0, LngLat::new(21.0, 20.0));
}

#[test]
fn payload_changes_refresh_the_active_overlay_without_remounting() {
    let mut f = three_markers();
    f.engine.stub_hit(at(1.0, 1.0), rendered_marker(1, [10.0, 10.0]));
    f.send(canvas_click(1.0, 1.0)).unwrap();

    f.map
        .set_markers(vec![Marker::new(1, [10.0, 10.0], "m1", "revised".to_owned())])
        .unwrap();
    assert_eq!(f.map.active_marker_id(), Some(&MarkerId::from(1)));
    assert_eq!(
        f.engine.overlays(),
        vec![(LngLat::new(10.0, 10.0), Some("revised".to_owned()))]
    );
    assert_eq!(f.engine.count("overlay.mount"), 1);
    assert_eq!(f.engine.count("overlay.unmount"), 0);
}

#[test]
fn failed_republish_still_removes_the_overlay_of_a_dropped_marker() {
    let mut f = three_markers();
    f.engine.stub_hit(at(1.0, 1.0), rendered_marker(2, [20.0, 20.0]));
    f.send(canvas_click(1.0, 1.0)).unwrap();

    f.engine.set_fail_on_set_data(true);
    let err = f
        .map
        .set_markers(markers(&[(1, 10.0, 10.0), (3, 30.0, 30.0)]))
        .unwrap_err();
    assert!(matches!(err, MarkableError::Engine(_)));
    assert_eq!(f.map.active_marker_id(), None);
    assert!(!f.map.is_overlay_mounted());
    assert_eq!(f.engine.live_overlays(), 0);
}

#[test]
fn failed_republish_on_click_still_runs_the_click_hook() {
    let mut f = three_markers();
    f.engine.stub_hit(at(1.0, 1.0), rendered_marker(1, [10.0, 10.0]));
    f.send(canvas_click(1.0, 1.0)).unwrap();

    f.engine.set_fail_on_set_data(true);
    assert!(f.send(canvas_click(50.0, 50.0)).is_err());
    assert_eq!(f.map.active_marker_id(), None);
    assert_eq!(f.engine.live_overlays(), 0);
    let clicks = f
        .hooks
        .calls()
        .into_iter()
        .filter(|c| *c == HookCall::Click)
        .count();
    assert_eq!(clicks, 2);
}

#[test]
fn stale_marker_hits_deselect() {
    let mut f = three_markers();
    f.engine.stub_hit(at(1.0, 1.0), rendered_marker(77, [0.0, 0.0]));
    f.send(canvas_click(1.0, 1.0)).unwrap();
    assert_eq!(f.map.active_marker_id(), None);
    assert_eq!(f.engine.count("addOverlay"), 0);
}

#[test]
fn hovering_markers_toggles_the_pointer_cursor() {
    let mut f = three_markers();
    f.engine.stub_hit(at(1.0, 1.0), rendered_marker(1, [10.0, 10.0]));
    f.engine
        .stub_hit(at(2.0, 2.0), rendered_cluster([0.0, 0.0], &[MarkerId::from(2)]));

    f.send(pointer_at(1.0, 1.0)).unwrap();
    assert_eq!(f.engine.cursor(), Cursor::Pointer);
    f.send(pointer_at(2.0, 2.0)).unwrap();
    assert_eq!(f.engine.cursor(), Cursor::Pointer);
    f.send(pointer_at(3.0, 3.0)).unwrap();
    assert_eq!(f.engine.cursor(), Cursor::Default);
    assert_eq!(f.engine.count("setCursor"), 2);
}

#[test]
fn unmount_with_active_overlay_removes_it_once_and_leaks_nothing() {
    let mut f = three_markers();
    f.engine.stub_hit(at(1.0, 1.0), rendered_marker(1, [10.0, 10.0]));
    f.send(canvas_click(1.0, 1.0)).unwrap();

    let engine = f.engine.clone();
    drop(f);

    assert_eq!(engine.count("overlay.remove"), 1);
    assert!(engine.active_subscriptions().is_empty());
    assert!(engine.is_removed());
    assert_eq!(
        engine.count("unsubscribe"),
        engine.count("subscribe"),
        "every subscription is released"
    );
    assert!(engine.count("subscribe") >= MOUNT_SUBSCRIPTIONS.len());
}
