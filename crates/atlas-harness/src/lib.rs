// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Atlas marker-map scenario harness.
//!
//! Replays scripted prop updates and engine events against a `MarkableMap`
//! mounted on `MockEngine`, recording which engine calls each step caused.

pub mod cli;
pub mod scenario;
