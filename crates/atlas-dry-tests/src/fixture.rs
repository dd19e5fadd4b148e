// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! A mounted component over the mock engine.

use std::sync::{Arc, Mutex};

use atlas_map_codec::{MockEngine, MockEngineFactory, MockHandle};
use atlas_map_port::{ContainerRef, MapEvent};
use atlas_markable::{CameraMove, MapHooks, MarkableError, MarkableMap, MarkableMapConfig, Marker};

/// One recorded hook invocation.
#[derive(Clone, Debug, PartialEq)]
pub enum HookCall {
    /// `on_click`.
    Click,
    /// `on_map_load`.
    MapLoad,
    /// `on_move_start`.
    MoveStart(CameraMove),
    /// `on_move_end`.
    MoveEnd(CameraMove),
}

/// Shared, ordered log of hook invocations.
#[derive(Clone, Debug, Default)]
pub struct HookLog {
    inner: Arc<Mutex<Vec<HookCall>>>,
}

impl HookLog {
    fn push(&self, call: HookCall) {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(call);
    }

    /// Recorded calls, in order.
    pub fn calls(&self) -> Vec<HookCall> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Hooks that record into this log.
    pub fn hooks(&self) -> MapHooks<MockEngine> {
        let (click, load, start, end) = (self.clone(), self.clone(), self.clone(), self.clone());
        MapHooks::default()
            .on_click(move |_| click.push(HookCall::Click))
            .on_map_load(move |_| load.push(HookCall::MapLoad))
            .on_move_start(move |m: &CameraMove| start.push(HookCall::MoveStart(*m)))
            .on_move_end(move |m: &CameraMove| end.push(HookCall::MoveEnd(*m)))
    }
}

/// A `MarkableMap<MockEngine, String>` whose overlay content is the payload itself.
#[derive(Debug)]
pub struct MapFixture {
    /// The component under test.
    pub map: MarkableMap<MockEngine, String>,
    /// Inspection handle on the engine.
    pub engine: MockHandle,
    /// Hook invocations.
    pub hooks: HookLog,
}

impl MapFixture {
    /// Mounts a component with `config` in container `"map"`.
    pub fn mount(config: MarkableMapConfig<String>) -> Result<Self, MarkableError> {
        let factory = MockEngineFactory::new();
        let hooks = HookLog::default();
        let map = MarkableMap::mount(
            &factory,
            Some(&ContainerRef("map".into())),
            config,
            String::clone,
            hooks.hooks(),
        )?;
        Ok(Self {
            map,
            engine: factory.handle(),
            hooks,
        })
    }

    /// Mounts a component showing `markers` and delivers the load event.
    pub fn loaded(markers: Vec<Marker<String>>, auto_fit: bool) -> Result<Self, MarkableError> {
        let mut fixture = Self::mount(MarkableMapConfig::with_markers(markers).auto_fit(auto_fit))?;
        fixture.map.handle_event(MapEvent::Load)?;
        Ok(fixture)
    }

    /// Forwards an engine event.
    pub fn send(&mut self, event: MapEvent) -> Result<(), MarkableError> {
        self.map.handle_event(event)
    }
}
