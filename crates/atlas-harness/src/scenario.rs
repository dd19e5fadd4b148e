// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scenario format and replay.

use std::path::Path;

use anyhow::{Context, Result};
use atlas_geo::{LngLat, LngLatBounds};
use atlas_map_codec::{
    decode_rendered_feature, encode_layer, encode_source, EngineCall, MockEngine,
    MockEngineFactory, MockHandle,
};
use atlas_map_port::{
    ClickEvent, ContainerRef, EventOrigin, MapEvent, MarkerId, PointerEvent, RawMove, ScreenPoint,
};
use atlas_markable::{MapHooks, MarkableMap, MarkableMapConfig, Marker, MARKER_SOURCE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Payload type used for markers in scenarios; overlay content is its JSON text.
pub type Payload = Value;

/// A scripted run.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Scenario {
    /// Container id; `null` simulates a missing container.
    #[serde(default = "default_container")]
    pub container: Option<String>,
    /// Component configuration.
    #[serde(default)]
    pub config: MarkableMapConfig<Payload>,
    /// Steps, applied in order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[allow(clippy::unnecessary_wraps)]
fn default_container() -> Option<String> {
    Some("map".into())
}

/// A stubbed hit-test result.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StubHit {
    /// Layer the feature is rendered in.
    pub layer: String,
    /// GeoJSON point feature as the engine would return it.
    pub feature: Value,
}

/// One scenario step.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", deny_unknown_fields)]
pub enum Step {
    /// Replace the markers.
    SetMarkers {
        /// New marker list.
        markers: Vec<Marker<Payload>>,
    },
    /// Apply a camera center and zoom.
    SetView {
        /// Center.
        center: LngLat,
        /// Zoom.
        zoom: f64,
    },
    /// Toggle auto-fit.
    SetAutoFit {
        /// New setting.
        enabled: bool,
    },
    /// Deliver the load event.
    Load,
    /// Make features hit-testable at a canvas point.
    StubHits {
        /// Canvas point.
        point: [f64; 2],
        /// Features at that point.
        hits: Vec<StubHit>,
    },
    /// Click at a canvas point.
    Click {
        /// Canvas point.
        point: [f64; 2],
        /// The click bubbled up from overlay content.
        #[serde(default)]
        overlay: bool,
    },
    /// Move the pointer.
    PointerMove {
        /// Canvas point.
        point: [f64; 2],
    },
    /// Deliver a move-start event.
    MoveStart {
        /// Move tag, absent for gestures.
        #[serde(default)]
        user: Option<bool>,
    },
    /// Deliver a move-end event.
    MoveEnd {
        /// Move tag, absent for gestures.
        #[serde(default)]
        user: Option<bool>,
    },
    /// Tear the component down.
    Unmount,
}

impl Step {
    /// The `op` tag of this step.
    pub fn op(&self) -> &'static str {
        match self {
            Self::SetMarkers { .. } => "setMarkers",
            Self::SetView { .. } => "setView",
            Self::SetAutoFit { .. } => "setAutoFit",
            Self::Load => "load",
            Self::StubHits { .. } => "stubHits",
            Self::Click { .. } => "click",
            Self::PointerMove { .. } => "pointerMove",
            Self::MoveStart { .. } => "moveStart",
            Self::MoveEnd { .. } => "moveEnd",
            Self::Unmount => "unmount",
        }
    }
}

/// One engine call attributed to the step that caused it; step 0 is mounting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CallRow {
    /// Step index, 1-based.
    pub step: usize,
    /// Step op, or `mount`.
    pub op: String,
    /// Engine call label.
    pub call: String,
    /// Call arguments.
    pub detail: String,
}

/// Outcome of a replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Every engine call, in order.
    pub calls: Vec<CallRow>,
    /// Active marker after the last step.
    pub active_marker: Option<String>,
    /// Overlays alive after the last step.
    pub live_overlays: usize,
    /// Marker source after the last step, as a GeoJSON source.
    pub source: Value,
    /// Registered layers after the last step, as style JSON.
    pub layers: Vec<Value>,
}

/// Reads and parses a scenario file.
pub fn load(path: &Path) -> Result<Scenario> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario {}", path.display()))?;
    parse(&text).with_context(|| format!("invalid scenario {}", path.display()))
}

/// Parses scenario JSON.
pub fn parse(text: &str) -> Result<Scenario> {
    let scenario: Scenario = serde_json::from_str(text)?;
    scenario.config.validate()?;
    Ok(scenario)
}

fn point(p: [f64; 2]) -> ScreenPoint {
    ScreenPoint::new(p[0], p[1])
}

fn fmt_lnglat(p: LngLat) -> String {
    format!("[{}, {}]", p.lng, p.lat)
}

fn fmt_bounds(b: LngLatBounds) -> String {
    format!("[{}, {}]", fmt_lnglat(b.sw()), fmt_lnglat(b.ne()))
}

/// Human-readable arguments of an engine call.
pub fn describe(call: &EngineCall) -> String {
    match call {
        EngineCall::Create { container, options } => {
            format!("{} center={} zoom={}", container.0, fmt_lnglat(options.center), options.zoom)
        }
        EngineCall::SetCenter { center, tag } => format!("{} user={}", fmt_lnglat(*center), tag.user),
        EngineCall::SetZoom { zoom, tag } => format!("{zoom} user={}", tag.user),
        EngineCall::EaseTo { options, tag } => format!(
            "center={} user={}",
            options.center.map_or_else(|| "-".to_owned(), fmt_lnglat),
            tag.user
        ),
        EngineCall::FitBounds { bounds, tag, .. } => {
            format!("{} user={}", fmt_bounds(*bounds), tag.user)
        }
        EngineCall::Subscribe { kind, id } => format!("{kind:?} #{}", id.0),
        EngineCall::Unsubscribe { id } => format!("#{}", id.0),
        EngineCall::AddSource { id } | EngineCall::AddLayer { id } => id.clone(),
        EngineCall::SetSourceData { id, features } => format!("{id} features={features}"),
        EngineCall::SetCursor(cursor) => format!("{cursor:?}"),
        EngineCall::AddOverlay { overlay, at } | EngineCall::OverlaySetLngLat { overlay, at } => {
            format!("#{overlay} {}", fmt_lnglat(*at))
        }
        EngineCall::OverlayMount { overlay, content }
        | EngineCall::OverlayUpdate { overlay, content } => format!("#{overlay} {content}"),
        EngineCall::OverlayUnmount { overlay } | EngineCall::OverlayRemove { overlay } => {
            format!("#{overlay}")
        }
        EngineCall::Remove => String::new(),
    }
}

fn drain(handle: &MockHandle, step: usize, op: &str, rows: &mut Vec<CallRow>) {
    rows.extend(handle.calls().iter().map(|call| CallRow {
        step,
        op: op.to_owned(),
        call: call.label().to_owned(),
        detail: describe(call),
    }));
    handle.clear_calls();
}

fn hooks() -> MapHooks<MockEngine> {
    MapHooks::default()
        .on_click(|click| info!(x = click.point.x, y = click.point.y, "onClick"))
        .on_map_load(|_| info!("onMapLoad"))
        .on_move_start(|m| info!(user_action = m.user_action, "onMoveStart"))
        .on_move_end(|m| info!(user_action = m.user_action, zoom = m.view.zoom, "onMoveEnd"))
}

/// Mounts the component and applies every step.
pub fn run(scenario: Scenario) -> Result<Report> {
    let factory = MockEngineFactory::new();
    let handle = factory.handle();
    let container = scenario.container.map(ContainerRef);
    let mut map = MarkableMap::mount(
        &factory,
        container.as_ref(),
        scenario.config,
        Value::to_string,
        hooks(),
    )
    .context("mount failed")?;

    let mut rows = Vec::new();
    drain(&handle, 0, "mount", &mut rows);

    for (index, step) in scenario.steps.into_iter().enumerate() {
        let n = index + 1;
        let op = step.op();
        apply(&mut map, &handle, step).with_context(|| format!("step {n} ({op}) failed"))?;
        drain(&handle, n, op, &mut rows);
    }

    Ok(Report {
        calls: rows,
        active_marker: map.active_marker_id().map(MarkerId::to_string),
        live_overlays: handle.live_overlays(),
        source: handle
            .source(MARKER_SOURCE)
            .map_or(Value::Null, |spec| encode_source(&spec)),
        layers: handle
            .layer_ids()
            .iter()
            .filter_map(|id| handle.layer(id))
            .map(|layer| encode_layer(&layer))
            .collect(),
    })
}

fn apply(map: &mut MarkableMap<MockEngine, Payload>, handle: &MockHandle, step: Step) -> Result<()> {
    match step {
        Step::SetMarkers { markers } => map.set_markers(markers)?,
        Step::SetView { center, zoom } => map.set_view(center, zoom),
        Step::SetAutoFit { enabled } => map.set_auto_fit(enabled),
        Step::Load => map.handle_event(MapEvent::Load)?,
        Step::StubHits { point: at, hits } => {
            for hit in hits {
                let feature = decode_rendered_feature(&hit.layer, &hit.feature)
                    .with_context(|| format!("bad feature for layer {}", hit.layer))?;
                handle.stub_hit(point(at), feature);
            }
        }
        Step::Click { point: at, overlay } => map.handle_event(MapEvent::Click(ClickEvent {
            point: point(at),
            lng_lat: LngLat::new(0.0, 0.0),
            origin: if overlay {
                EventOrigin::Overlay
            } else {
                EventOrigin::Canvas
            },
        }))?,
        Step::PointerMove { point: at } => map.handle_event(MapEvent::PointerMove(PointerEvent {
            point: point(at),
        }))?,
        Step::MoveStart { user } => map.handle_event(MapEvent::MoveStart(RawMove { user }))?,
        Step::MoveEnd { user } => map.handle_event(MapEvent::MoveEnd(RawMove { user }))?,
        Step::Unmount => map.unmount(),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ops_are_rejected() {
        assert!(parse(r#"{"steps": [{"op": "teleport"}]}"#).is_err());
    }

    #[test]
    fn mount_calls_are_attributed_to_step_zero() {
        let report = run(parse(r#"{"steps": [{"op": "load"}]}"#).unwrap()).unwrap();
        assert_eq!(report.calls[0].step, 0);
        assert_eq!(report.calls[0].call, "create");
        assert!(report
            .calls
            .iter()
            .any(|row| row.step == 1 && row.call == "addSource"));
        assert_eq!(report.layers.len(), 2);
        assert_eq!(report.source["type"], "geojson");
        assert_eq!(report.source["clusterRadius"], 60);
    }

    #[test]
    fn missing_container_fails() {
        let err = run(parse(r#"{"container": null}"#).unwrap()).unwrap_err();
        assert!(format!("{err:#}").contains("container"));
    }
}
