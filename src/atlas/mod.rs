//! Static geography: the bundled world atlas and the featured-country set.
//!
//! Both are immutable for the lifetime of the process. The atlas is parsed
//! once at startup from GeoJSON compiled into the binary; the highlight set
//! is a constant table. Nothing here ever re-fetches or mutates.

mod catalog;
mod highlight;

pub use catalog::{CountryPolygon, WorldAtlas};
pub use highlight::{HighlightSet, FEATURED_COUNTRIES};

use bevy::prelude::*;

/// Startup system that parses the bundled atlas into the resource.
fn load_atlas_system(mut atlas: ResMut<WorldAtlas>) {
    match catalog::parse_bundled_atlas() {
        Ok(polygons) => {
            info!("Loaded world atlas with {} countries", polygons.len());
            atlas.replace(polygons);
        }
        Err(e) => {
            // A broken bundled atlas leaves the map empty but never crashes
            // the rest of the application.
            error!("Failed to parse bundled world atlas: {}", e);
        }
    }
}

pub struct AtlasPlugin;

impl Plugin for AtlasPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldAtlas>()
            .init_resource::<HighlightSet>()
            .add_systems(Startup, load_atlas_system);
    }
}
