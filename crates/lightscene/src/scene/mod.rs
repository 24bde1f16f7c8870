//! Scene store and frame-stepped scheduling.
//!
//! Purpose
//! - `Scene` owns screens, lights, angle arcs and indicators in id-addressed
//!   slots. A spotlight refers to its screen by `ScreenId`; the screen can be
//!   moved, detached or removed without the spotlight noticing until the next
//!   recompute.
//! - `Scheduler` advances a logical clock. Each tick runs every discrete
//!   `Animation` (normalised progress) and then every `Continual` task
//!   (elapsed `dt`), both in insertion order.
//! - `ScreenTracker` is the only coupling between a screen and a spotlight:
//!   while it is scheduled the cone follows the screen; once removed the cone
//!   stays frozen.
//!
//! Code cross-refs: `light::{DirectionalLightField, RadialLightField, Screen}`.

mod anims;
mod scheduler;
mod store;
mod tasks;

pub use anims::{
    DimLight, LightTarget, MoveSpotlight, RotateScreen, ShiftScreen, SwitchCfg, SwitchOff,
    SwitchOn, UpdateIndicator,
};
pub use scheduler::{Animation, Continual, Scheduler, TaskId};
pub use store::{ArcId, IndicatorId, LightId, Scene, ScreenId, SpotlightId};
pub use tasks::{AngleTracker, IndicatorTracker, ScreenTracker};

#[cfg(test)]
mod tests;
