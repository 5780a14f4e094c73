use bevy::prelude::*;

use crate::blueprint::CityBlueprint;
use crate::city_config::{CityConfig, ValidatedConfig};
use crate::pipeline::{generate_city, CancelToken};

/// Request a new city. Ignored unless the generator is idle.
#[derive(Event, Debug, Clone)]
pub struct GenerateCityEvent {
    pub config: CityConfig,
}

/// Sent once a blueprint has been stored in [`CurrentBlueprint`].
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityGeneratedEvent {
    pub seed: u64,
}

/// Busy/idle flag guarding the single in-flight generation.
#[derive(Resource, Debug, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    /// Accepted this frame; runs on the next update.
    Pending(ValidatedConfig),
    Running,
}

impl GenerationState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GenerationState::Idle)
    }
}

/// The most recent finished blueprint.
#[derive(Resource, Debug, Default)]
pub struct CurrentBlueprint(pub Option<CityBlueprint>);

/// Token for the pending or running generation. Replaced on every accepted
/// request, so cancelling only affects the current run.
#[derive(Resource, Debug, Default)]
pub struct GenerationCancel(pub CancelToken);

pub struct GenerationPlugin;

impl Plugin for GenerationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GenerationState>()
            .init_resource::<CurrentBlueprint>()
            .init_resource::<GenerationCancel>()
            .add_event::<GenerateCityEvent>()
            .add_event::<CityGeneratedEvent>()
            .add_systems(
                Update,
                (run_pending_generation, accept_generate_requests).chain(),
            );
    }
}

fn accept_generate_requests(
    mut events: EventReader<GenerateCityEvent>,
    mut state: ResMut<GenerationState>,
    mut cancel: ResMut<GenerationCancel>,
) {
    for event in events.read() {
        if !state.is_idle() {
            warn!("City generation already in progress, dropping request");
            continue;
        }
        match event.config.validate() {
            Ok(config) => {
                cancel.0 = CancelToken::new();
                *state = GenerationState::Pending(config);
            }
            Err(e) => warn!("Rejected city configuration: {e}"),
        }
    }
}

fn run_pending_generation(
    mut state: ResMut<GenerationState>,
    cancel: Res<GenerationCancel>,
    mut current: ResMut<CurrentBlueprint>,
    mut generated: EventWriter<CityGeneratedEvent>,
) {
    if !matches!(*state, GenerationState::Pending(_)) {
        return;
    }
    let GenerationState::Pending(config) = std::mem::replace(&mut *state, GenerationState::Running)
    else {
        return;
    };

    match generate_city(&config, &cancel.0) {
        Ok(blueprint) => {
            let seed = blueprint.seed;
            current.0 = Some(blueprint);
            generated.send(CityGeneratedEvent { seed });
        }
        Err(e) => warn!("City generation failed: {e}"),
    }
    *state = GenerationState::Idle;
}
