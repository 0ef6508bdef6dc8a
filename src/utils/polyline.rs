//! Codec de polilíneas codificadas
//!
//! Formato de delta con signo, 5 decimales de punto fijo y caracteres ASCII
//! desplazados en 63. Es el formato que devuelve el optimizador en
//! `routes[].geometry` cuando se pide geometría (`options.g = true`).

use crate::models::route::LatLng;

const PRECISION: f64 = 100_000.0;
const CHAR_OFFSET: i64 = 63;
const CONTINUATION_BIT: i64 = 0x20;
const CHUNK_MASK: i64 = 0x1f;
// Más allá de este desplazamiento el valor ya no cabe en un i64.
const MAX_SHIFT: u32 = 60;

/// Decodifica una polilínea en pares `[lat, lng]`.
///
/// Cada iteración consume al menos un byte, por lo que el recorrido está
/// acotado por la longitud de la entrada. Una coordenada truncada al final
/// se descarta.
pub fn decode_polyline(encoded: &str) -> Vec<LatLng> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut coordinates = Vec::with_capacity(bytes.len() / 4);

    while index < bytes.len() {
        let Some(d_lat) = next_value(bytes, &mut index) else {
            break;
        };
        let Some(d_lng) = next_value(bytes, &mut index) else {
            break;
        };

        lat = lat.wrapping_add(d_lat);
        lng = lng.wrapping_add(d_lng);

        coordinates.push([lat as f64 / PRECISION, lng as f64 / PRECISION]);
    }

    coordinates
}

/// Codifica pares `[lat, lng]` en el mismo formato que lee `decode_polyline`.
pub fn encode_polyline(coordinates: &[LatLng]) -> String {
    let mut encoded = String::with_capacity(coordinates.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for [lat, lng] in coordinates {
        let lat = (lat * PRECISION).round() as i64;
        let lng = (lng * PRECISION).round() as i64;

        push_value(lat - prev_lat, &mut encoded);
        push_value(lng - prev_lng, &mut encoded);

        prev_lat = lat;
        prev_lng = lng;
    }

    encoded
}

fn next_value(bytes: &[u8], index: &mut usize) -> Option<i64> {
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let byte = i64::from(*bytes.get(*index)?) - CHAR_OFFSET;
        *index += 1;

        if shift <= MAX_SHIFT {
            result |= (byte & CHUNK_MASK) << shift;
        }
        shift += 5;

        if byte < CONTINUATION_BIT {
            break;
        }
    }

    Some(if result & 1 == 1 { !(result >> 1) } else { result >> 1 })
}

fn push_value(value: i64, out: &mut String) {
    let mut value = if value < 0 { !(value << 1) } else { value << 1 };

    while value >= CONTINUATION_BIT {
        out.push(char::from(((CONTINUATION_BIT | (value & CHUNK_MASK)) + CHAR_OFFSET) as u8));
        value >>= 5;
    }
    out.push(char::from((value + CHAR_OFFSET) as u8));
}
