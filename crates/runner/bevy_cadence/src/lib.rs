//! Bevy integration for cadence.
//!
//! [`CadencePlugin`] inserts a [`CadenceRunner`] non-send resource and ticks
//! it from `Update` with Bevy's frame delta. Commands are `!Send`, so systems
//! that schedule work take `NonSend<CadenceRunner>`.

use bevy::log::error;
use bevy::prelude::*;
use cadence_runner::{Runner, RunnerConfig};

pub use cadence_core;
pub use cadence_runner;

/// The runner driven by [`CadencePlugin`].
pub struct CadenceRunner(pub Runner);

#[derive(Default)]
pub struct CadencePlugin {
    pub config: RunnerConfig,
}

impl Plugin for CadencePlugin {
    fn build(&self, app: &mut App) {
        let runner = match Runner::new(self.config.clone()) {
            Ok(runner) => runner,
            Err(err) => {
                error!("invalid cadence config ({err}), using defaults");
                Runner::default()
            }
        };
        app.insert_non_send_resource(CadenceRunner(runner))
            .add_systems(Update, drive_cadence_runner);
    }
}

pub fn drive_cadence_runner(runner: NonSend<CadenceRunner>, time: Res<Time>) {
    if let Err(err) = runner.0.update(f64::from(time.delta_seconds())) {
        error!("cadence tick failed: {err}");
    }
}
