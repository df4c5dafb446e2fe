//! Geocoder field: resolve `lat, lng` input or an address, then center the map on it
//! or hand it to the drawing tool as if the map had been clicked there.

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use futures_lite::future;
use serde::Deserialize;

use crate::geo::LatLng;
use crate::map::{CenterMapRequest, MapSurface};

use super::controller::MapController;

/// Address search endpoint (OpenStreetMap Nominatim)
pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocodeAction {
    /// Recenter the map on the location
    Center,
    /// Pass the location to the drawing tool's click handler
    Draw,
}

#[derive(Message)]
pub struct GeocodeRequest {
    pub query: String,
    pub action: GeocodeAction,
}

#[derive(Resource, Default)]
pub struct GeocoderState {
    /// Text typed in the geocoder field
    pub query: String,
    pub is_searching: bool,
    pub error: Option<String>,
    /// Description of the last resolved location
    pub last_found: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

pub struct GeocodeResult {
    pub action: GeocodeAction,
    pub location: Result<(LatLng, String), String>,
}

#[derive(Component)]
pub struct GeocodeTask(pub Task<GeocodeResult>);

/// First usable place of a search response
pub fn first_place(places: &[NominatimPlace]) -> Option<(LatLng, String)> {
    places.iter().find_map(|place| {
        let lat = place.lat.parse().ok()?;
        let lng = place.lon.parse().ok()?;
        Some((LatLng::new(lat, lng), place.display_name.clone()))
    })
}

/// Look an address up (blocking; run on a task pool)
pub fn geocode_address(address: &str) -> Result<(LatLng, String), String> {
    let response = ureq::get(NOMINATIM_URL)
        .set("User-Agent", "geodrawer-geocoder")
        .query("format", "json")
        .query("limit", "1")
        .query("q", address)
        .call()
        .map_err(|e| format!("Address search failed: {}", e))?;

    let places: Vec<NominatimPlace> = response
        .into_json()
        .map_err(|e| format!("Failed to parse search results: {}", e))?;

    first_place(&places).ok_or_else(|| format!("No location found for \"{}\"", address))
}

fn apply_location(
    action: GeocodeAction,
    location: LatLng,
    controller: &mut MapController,
    surface: &mut MapSurface,
    center_events: &mut MessageWriter<CenterMapRequest>,
) {
    center_events.write(CenterMapRequest { center: location });
    if action == GeocodeAction::Draw && controller.click(surface, location).is_none() {
        debug!("geodrawer: no drawing tool selected, location only centered");
    }
}

pub fn start_geocode_system(
    mut commands: Commands,
    mut events: MessageReader<GeocodeRequest>,
    mut state: ResMut<GeocoderState>,
    mut controller: ResMut<MapController>,
    mut surface: ResMut<MapSurface>,
    mut center_events: MessageWriter<CenterMapRequest>,
) {
    for event in events.read() {
        let query = event.query.trim();
        if query.is_empty() {
            continue;
        }

        // Coordinates are used as they are
        if let Some(location) = LatLng::parse(query) {
            state.error = None;
            state.last_found = Some(format!("{:.5}, {:.5}", location.lat, location.lng));
            apply_location(
                event.action,
                location,
                &mut controller,
                &mut surface,
                &mut center_events,
            );
            continue;
        }

        if state.is_searching {
            warn!("geodrawer: address search already in progress");
            continue;
        }

        state.is_searching = true;
        state.error = None;
        let address = query.to_string();
        let action = event.action;
        let task = AsyncComputeTaskPool::get().spawn(async move {
            GeocodeResult {
                action,
                location: geocode_address(&address),
            }
        });
        commands.spawn(GeocodeTask(task));
    }
}

pub fn poll_geocode_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut GeocodeTask)>,
    mut state: ResMut<GeocoderState>,
    mut controller: ResMut<MapController>,
    mut surface: ResMut<MapSurface>,
    mut center_events: MessageWriter<CenterMapRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            state.is_searching = false;

            match result.location {
                Ok((location, label)) => {
                    info!("geodrawer: geocoded {:?} to {:?}", label, location);
                    state.last_found = Some(label);
                    apply_location(
                        result.action,
                        location,
                        &mut controller,
                        &mut surface,
                        &mut center_events,
                    );
                }
                Err(error) => {
                    warn!("{}", error);
                    state.error = Some(error);
                }
            }

            commands.entity(entity).despawn();
        }
    }
}
