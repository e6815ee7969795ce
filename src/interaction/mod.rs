//! Marker interaction wiring: messages from the renderer, effects applied to
//! the tooltip slot and the route.
//!
//! The renderer never mutates state; it emits `MarkerHovered`/`MarkerLeft`/
//! `MarkerClicked` messages. The systems here feed them through the pure
//! router and execute the resulting effects.

mod route;
mod router;

pub use route::Route;
pub use router::{route_marker_event, tooltip_label, MarkerEvent, RouteEffect};

use bevy::prelude::*;

use crate::config::RememberCountryRequest;
use crate::markers::WorldMarkers;

/// Pointer entered a marker glyph.
#[derive(Message)]
pub struct MarkerHovered {
    pub id: String,
}

/// Pointer left the marker it was hovering.
#[derive(Message)]
pub struct MarkerLeft;

/// Primary click on a marker glyph.
#[derive(Message)]
pub struct MarkerClicked {
    pub id: String,
}

/// Path-based navigation request, from marker clicks or UI buttons.
#[derive(Message)]
pub struct NavigateRequest {
    pub path: String,
}

/// The externally-owned hover text slot. Empty means no tooltip.
#[derive(Resource, Default)]
pub struct TooltipSlot {
    text: String,
}

impl TooltipSlot {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn publish(&mut self, text: String) {
        self.text = text;
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

/// Feeds marker messages through the pure router and applies the effects.
fn apply_marker_events(
    mut hovered: MessageReader<MarkerHovered>,
    mut left: MessageReader<MarkerLeft>,
    mut clicked: MessageReader<MarkerClicked>,
    markers: Res<WorldMarkers>,
    mut tooltip: ResMut<TooltipSlot>,
    mut navigate: MessageWriter<NavigateRequest>,
) {
    let events = hovered
        .read()
        .map(|m| MarkerEvent::Entered { id: m.id.clone() })
        .chain(left.read().map(|_| MarkerEvent::Left))
        .chain(clicked.read().map(|m| MarkerEvent::Clicked { id: m.id.clone() }));

    for event in events {
        match route_marker_event(&event, &markers.markers) {
            Some(RouteEffect::SetTooltip(text)) => tooltip.publish(text),
            Some(RouteEffect::ClearTooltip) => tooltip.clear(),
            Some(RouteEffect::Navigate(path)) => {
                navigate.write(NavigateRequest { path });
            }
            None => {}
        }
    }
}

/// Resolves navigation requests into the route resource.
fn apply_navigation(
    mut requests: MessageReader<NavigateRequest>,
    mut route: ResMut<Route>,
    mut tooltip: ResMut<TooltipSlot>,
    mut remember: MessageWriter<RememberCountryRequest>,
) {
    for request in requests.read() {
        let next = Route::parse(&request.path);
        if let Route::Detail { country } = &next {
            remember.write(RememberCountryRequest {
                country: country.clone(),
            });
        }

        if *route != next {
            info!("Navigating to {}", request.path);
            tooltip.clear();
            *route = next;
        }
    }
}

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Route>()
            .init_resource::<TooltipSlot>()
            .add_message::<MarkerHovered>()
            .add_message::<MarkerLeft>()
            .add_message::<MarkerClicked>()
            .add_message::<NavigateRequest>()
            .add_systems(
                Update,
                (
                    apply_marker_events,
                    apply_navigation.run_if(on_message::<NavigateRequest>),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooltip_slot_starts_empty() {
        let slot = TooltipSlot::default();
        assert!(slot.is_empty());
        assert_eq!(slot.text(), "");
    }

    #[test]
    fn test_tooltip_slot_publish_and_clear() {
        let mut slot = TooltipSlot::default();
        slot.publish("Japan:12".to_string());
        assert_eq!(slot.text(), "Japan:12");

        slot.clear();
        assert!(slot.is_empty());
    }
}
