// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Mounting, loading, camera props, hooks and teardown.

use atlas_dry_tests::{markers, HookCall, MapFixture};
use atlas_geo::LngLat;
use atlas_map_codec::{EngineCall, MockEngineFactory};
use atlas_map_port::{EventKind, MapError, MapEvent, MoveTag, RawMove};
use atlas_markable::{
    CameraMove, MapHooks, MarkableError, MarkableMap, MarkableMapConfig, CLUSTER_LAYER,
    MARKER_LAYER, MARKER_SOURCE,
};

#[test]
fn missing_container_is_a_fatal_mount_error() {
    let factory = MockEngineFactory::new();
    let err = MarkableMap::<_, String>::mount(
        &factory,
        None,
        MarkableMapConfig::default(),
        String::clone,
        MapHooks::default(),
    )
    .unwrap_err();
    assert!(matches!(err, MarkableError::Mount(MapError::ContainerUnavailable)));
    assert!(factory.handle().calls().is_empty());
}

#[test]
fn invalid_config_is_rejected_before_mounting() {
    let factory = MockEngineFactory::new();
    let mut config = MarkableMapConfig::<String>::default();
    config.zoom = -1.0;
    let err = MarkableMap::mount(
        &factory,
        Some(&atlas_map_port::ContainerRef("map".into())),
        config,
        String::clone,
        MapHooks::default(),
    )
    .unwrap_err();
    assert!(matches!(err, MarkableError::Config(_)));
    assert!(factory.handle().calls().is_empty());
}

#[test]
fn updates_before_load_are_deferred_to_setup() {
    let mut f = MapFixture::mount(MarkableMapConfig::default()).unwrap();
    f.map.set_markers(markers(&[(1, 1.0, 1.0), (2, 2.0, 2.0)])).unwrap();
    assert_eq!(f.engine.count("setData"), 0);

    f.send(MapEvent::Load).unwrap();
    assert_eq!(f.engine.count("addSource"), 1);
    assert_eq!(f.engine.layer_ids(), vec![CLUSTER_LAYER.to_owned(), MARKER_LAYER.to_owned()]);
    assert_eq!(f.engine.source_data(MARKER_SOURCE).unwrap().len(), 2);
    assert_eq!(f.engine.count("setData"), 1);
    assert!(f.engine.active_subscriptions().contains(&EventKind::PointerMove));
}

#[test]
fn load_runs_setup_once_then_calls_the_hook() {
    let mut f = MapFixture::mount(MarkableMapConfig::default()).unwrap();
    f.send(MapEvent::Load).unwrap();
    f.send(MapEvent::Load).unwrap();
    assert_eq!(f.engine.count("addSource"), 1);
    assert_eq!(f.hooks.calls(), vec![HookCall::MapLoad]);

    let labels: Vec<_> = f.engine.calls().iter().map(EngineCall::label).collect();
    let data = labels.iter().position(|l| *l == "setData").unwrap();
    let layers = labels.iter().rposition(|l| *l == "addLayer").unwrap();
    assert!(layers < data, "source is filled after its layers exist");
}

#[test]
fn set_view_only_moves_what_differs() {
    let mut f = MapFixture::loaded(Vec::new(), false).unwrap();
    f.engine.clear_calls();
    let (center, zoom) = f.engine.camera();

    f.map.set_view(center, zoom);
    assert!(f.engine.calls().is_empty());

    f.map.set_view(center, zoom + 1.0);
    assert_eq!(
        f.engine.calls(),
        vec![EngineCall::SetZoom {
            zoom: zoom + 1.0,
            tag: MoveTag::PROGRAMMATIC
        }]
    );

    f.map.set_view(LngLat::new(5.0, 5.0), zoom + 1.0);
    assert_eq!(f.engine.count("setCenter"), 1);
    assert_eq!(f.engine.count("setZoom"), 1);
}

#[test]
fn move_hooks_report_user_intent() {
    let mut f = MapFixture::loaded(Vec::new(), false).unwrap();
    f.send(MapEvent::MoveStart(RawMove { user: None })).unwrap();
    f.send(MapEvent::MoveEnd(RawMove { user: Some(false) })).unwrap();

    let moves: Vec<bool> = f
        .hooks
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            HookCall::MoveStart(CameraMove { user_action, .. })
            | HookCall::MoveEnd(CameraMove { user_action, .. }) => Some(user_action),
            _ => None,
        })
        .collect();
    assert_eq!(moves, vec![true, false]);
}

#[test]
fn events_after_unmount_are_ignored() {
    let mut f = MapFixture::loaded(markers(&[(1, 1.0, 1.0)]), false).unwrap();
    f.map.unmount();
    let before = f.engine.calls().len();

    f.send(MapEvent::MoveEnd(RawMove::default())).unwrap();
    f.map.set_markers(markers(&[(2, 2.0, 2.0)])).unwrap();
    f.map.set_view(LngLat::new(9.0, 9.0), 3.0);
    f.map.unmount();

    assert_eq!(f.engine.calls().len(), before);
    assert_eq!(f.engine.count("remove"), 1);
}

#[test]
fn unmount_before_load_is_safe() {
    let f = MapFixture::mount(MarkableMapConfig::default()).unwrap();
    let engine = f.engine.clone();
    drop(f);
    assert!(engine.is_removed());
    assert!(engine.active_subscriptions().is_empty());
    assert_eq!(engine.count("overlay.remove"), 0);
}
