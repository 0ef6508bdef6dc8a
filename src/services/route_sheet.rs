//! Hoja de ruta en texto plano
//!
//! Texto listo para compartir por mensajería: encabezado con salida,
//! distancia y tiempo, link de Google Maps con todas las paradas y la lista
//! numerada en orden de visita.

use crate::models::route::RouteEnvelope;
use crate::models::stop::{Stop, StopType};
use crate::models::stop_list::StopList;
use crate::utils::time::format_day_seconds;

const MAPS_DIR_URL: &str = "https://www.google.com/maps/dir/";
const SHARE_URL: &str = "https://wa.me/?text=";

fn stop_icon(stop: &Stop) -> &'static str {
    if stop.is_depot {
        return "🏭";
    }
    match stop.stop_type {
        StopType::Supplier => "📦",
        StopType::Client => "👤",
    }
}

/// Link multi-parada: depósito, paradas en orden de visita, depósito.
pub fn google_maps_link(stops: &StopList) -> Option<String> {
    if stops.is_empty() {
        return None;
    }

    let depot = stops.depot();
    let points: Vec<String> = depot
        .into_iter()
        .chain(stops.sorted_by_order().into_iter().filter(|s| !s.is_depot))
        .chain(depot)
        .map(|s| format!("{},{}", s.lat, s.lng))
        .collect();

    Some(format!("{}{}", MAPS_DIR_URL, points.join("/")))
}

pub fn build_route_sheet(stops: &StopList, route: Option<&RouteEnvelope>, start_time: &str) -> String {
    let mut text = String::from("🚀 *HOJA DE RUTA OPTIMIZADA*\n");

    if let Some(route) = route {
        text.push_str(&format!("📅 Salida: {} hs\n", start_time));
        text.push_str(&format!("📏 Distancia: {:.1} km\n", route.distance_km()));
        text.push_str(&format!("⏱️ Tiempo est.: {} min\n\n", route.duration_minutes()));
    }

    if let Some(link) = google_maps_link(stops) {
        text.push_str(&format!("🗺️ *ABRIR GPS:* {}\n\n", link));
    }

    text.push_str("📋 *PARADAS:*\n");
    for (i, stop) in stops.sorted_by_order().into_iter().enumerate() {
        text.push_str(&format!("*{}.* {} {}\n", i + 1, stop_icon(stop), stop.short_address()));
        if let Some(window) = stop.time_window.as_ref().filter(|w| !w.start.is_empty()) {
            text.push_str(&format!("   ⏰ {} - {}\n", window.start, window.end));
        }
        if let Some(arrival) = stop.arrival {
            text.push_str(&format!("   🕒 Llegada est.: {}\n", format_day_seconds(arrival)));
        }
    }

    text
}

/// URL para abrir la hoja en WhatsApp
pub fn share_url(sheet: &str) -> String {
    format!("{}{}", SHARE_URL, urlencoding::encode(sheet))
}
