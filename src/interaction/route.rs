//! Application routing: path strings in, typed routes out.
//!
//! The app keeps the original site's path shapes (`/` for the map,
//! `/detail?country=...` for the detail view) so navigation stays a plain
//! string contract between the UI and the router.

use bevy::prelude::*;

/// The active view.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Map,
    Detail {
        country: String,
    },
}

impl Route {
    /// Build the detail path for a country, percent-encoding the query value.
    pub fn detail_path(country: &str) -> String {
        format!("/detail?country={}", encode_query_value(country))
    }

    /// Parse a path into a route. Unknown paths fall back to the map.
    pub fn parse(path: &str) -> Route {
        let (path, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };

        if path != "/detail" {
            return Route::Map;
        }

        let country = query
            .into_iter()
            .flat_map(|q| q.split('&'))
            .find_map(|pair| pair.strip_prefix("country="))
            .map(decode_query_value);

        match country {
            Some(country) if !country.is_empty() => Route::Detail { country },
            _ => Route::Map,
        }
    }
}

/// True for RFC 3986 unreserved characters, which pass through unencoded.
fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

/// Percent-encode a query value.
pub fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        if is_unreserved(byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}

/// Decode a percent-encoded query value. Malformed escapes are kept verbatim
/// rather than dropped, so a bad path still shows something recognizable.
pub fn decode_query_value(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            if let (Some(hi), Some(lo)) = (
                bytes.get(i + 1).and_then(|b| (*b as char).to_digit(16)),
                bytes.get(i + 2).and_then(|b| (*b as char).to_digit(16)),
            ) {
                decoded.push((hi * 16 + lo) as u8);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}
