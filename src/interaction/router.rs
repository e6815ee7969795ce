//! The pure interaction core: marker events in, effect descriptions out.
//!
//! Rendering emits explicit event objects; this module maps each one to at
//! most one side effect without touching any state itself. The systems in
//! `interaction::mod` execute the effects.

use crate::markers::MarkerFeature;

use super::route::Route;

/// A marker interaction, decoupled from the input backend that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerEvent {
    Entered { id: String },
    Left,
    Clicked { id: String },
}

/// The one side effect an event maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteEffect {
    SetTooltip(String),
    ClearTooltip,
    Navigate(String),
}

/// Tooltip label for a marker. Unstructured display text; the `:` separator
/// is not escaped when it appears in a country name.
pub fn tooltip_label(marker: &MarkerFeature) -> String {
    format!("{}:{}", marker.country, marker.count)
}

/// Map one marker event to its effect.
///
/// An event naming an id that is no longer in the collection (the set was
/// replaced between render and dispatch) produces no effect.
pub fn route_marker_event(event: &MarkerEvent, markers: &[MarkerFeature]) -> Option<RouteEffect> {
    let find = |id: &str| markers.iter().find(|m| m.id == id);

    match event {
        MarkerEvent::Entered { id } => find(id).map(|m| RouteEffect::SetTooltip(tooltip_label(m))),
        MarkerEvent::Left => Some(RouteEffect::ClearTooltip),
        MarkerEvent::Clicked { id } => {
            find(id).map(|m| RouteEffect::Navigate(Route::detail_path(&m.country)))
        }
    }
}
