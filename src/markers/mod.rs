//! Asynchronous marker loading for the world map.
//!
//! One fetch is issued whenever the map view becomes active. The request runs
//! on the compute task pool and is polled each frame; a resolved collection
//! replaces the previous one atomically (never appends).
//!
//! Every in-flight task is tagged with the fetch generation current when it
//! was spawned. Navigating away from the map bumps the generation, so a late
//! resolution from a dead view is recognized and dropped instead of writing
//! stale state.

mod fetch;

pub use fetch::{MarkerFeature, MarkerFetchResult};

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use futures_lite::future;

use crate::config::AppConfig;
use crate::interaction::Route;

/// View state for the fetched marker collection.
///
/// Owned exclusively by the map view; nothing else writes it.
#[derive(Resource, Default)]
pub struct WorldMarkers {
    /// The current collection. Empty until the first fetch resolves.
    pub markers: Vec<MarkerFeature>,
    /// Whether a fetch is currently in flight
    pub is_fetching: bool,
    /// Error message if the last fetch failed
    pub error: Option<String>,
}

/// Monotonic counter invalidating in-flight fetches.
#[derive(Resource, Default)]
pub struct FetchGeneration(u64);

impl FetchGeneration {
    pub fn current(&self) -> u64 {
        self.0
    }

    pub fn bump(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }
}

/// Background task for one marker fetch, tagged with its generation.
#[derive(Component)]
struct MarkerFetchTask {
    task: Task<MarkerFetchResult>,
    generation: u64,
}

/// Issues the fetch when the map route becomes active and invalidates
/// in-flight work when it stops being active.
///
/// Change detection fires on the first frame too, which doubles as the
/// initial on-mount fetch.
fn route_fetch_guard(
    mut commands: Commands,
    route: Res<Route>,
    config: Res<AppConfig>,
    mut generation: ResMut<FetchGeneration>,
    mut state: ResMut<WorldMarkers>,
) {
    if !route.is_changed() {
        return;
    }

    // Any route change orphans whatever is still in flight.
    let current = generation.bump();

    if !matches!(*route, Route::Map) {
        state.is_fetching = false;
        return;
    }

    state.is_fetching = true;
    state.error = None;

    let base_url = config.api_base_url();
    let task_pool = AsyncComputeTaskPool::get();
    let task = task_pool.spawn(async move { fetch::fetch_world_markers(&base_url) });

    commands.spawn(MarkerFetchTask {
        task,
        generation: current,
    });
}

/// Polls in-flight fetch tasks and publishes resolved collections.
fn poll_marker_fetch(
    mut commands: Commands,
    generation: Res<FetchGeneration>,
    mut state: ResMut<WorldMarkers>,
    mut tasks: Query<(Entity, &mut MarkerFetchTask)>,
) {
    for (entity, mut fetch_task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut fetch_task.task)) else {
            continue;
        };

        commands.entity(entity).despawn();

        if fetch_task.generation != generation.current() {
            debug!(
                "Dropping stale marker fetch (generation {} != {})",
                fetch_task.generation,
                generation.current()
            );
            continue;
        }

        state.is_fetching = false;
        match (result.markers, result.error) {
            (Some(markers), _) => {
                info!("Loaded {} world markers", markers.len());
                state.markers = markers;
                state.error = None;
            }
            (None, error) => {
                warn!(
                    "World marker fetch failed: {}",
                    error.as_deref().unwrap_or("unknown error")
                );
                state.error = error;
            }
        }
    }
}

pub struct MarkersPlugin;

impl Plugin for MarkersPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldMarkers>()
            .init_resource::<FetchGeneration>()
            .add_systems(Update, (route_fetch_guard, poll_marker_fetch));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_starts_at_zero() {
        let generation = FetchGeneration::default();
        assert_eq!(generation.current(), 0);
    }

    #[test]
    fn test_generation_bump_is_monotonic() {
        let mut generation = FetchGeneration::default();
        let first = generation.bump();
        let second = generation.bump();
        assert!(second > first);
        assert_eq!(generation.current(), second);
    }

    #[test]
    fn test_world_markers_default_is_empty_and_clean() {
        let state = WorldMarkers::default();
        assert!(state.markers.is_empty());
        assert!(!state.is_fetching);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_marker_replacement_is_atomic() {
        // A resolved fetch replaces the whole collection, never appends.
        let mut state = WorldMarkers::default();
        state.markers = vec![
            MarkerFeature {
                id: "old-1".to_string(),
                lon: 0.0,
                lat: 0.0,
                country: "Oldland".to_string(),
                count: 1,
            },
            MarkerFeature {
                id: "old-2".to_string(),
                lon: 1.0,
                lat: 1.0,
                country: "Oldland".to_string(),
                count: 2,
            },
        ];

        let fresh = vec![MarkerFeature {
            id: "new-1".to_string(),
            lon: 2.0,
            lat: 2.0,
            country: "Newland".to_string(),
            count: 3,
        }];
        state.markers = fresh;

        assert_eq!(state.markers.len(), 1);
        assert_eq!(state.markers[0].id, "new-1");
    }
}
