//! Plain-text hourly and daily tables.

use zipcast_core::{ForecastEntry, ForecastSchedule, Mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Span {
    Hourly,
    Daily,
}

pub fn schedule(location: &str, mode: Mode, schedule: &ForecastSchedule) -> String {
    let mut out = format!("{location}  [{mode}]\n");

    section(&mut out, "Next 24 hours", Span::Hourly, &schedule.hourly);
    section(&mut out, "Next 7 days", Span::Daily, &schedule.daily);
    out
}

fn section(out: &mut String, title: &str, span: Span, entries: &[ForecastEntry]) {
    out.push_str(&format!("\n{title}\n"));
    if entries.is_empty() {
        out.push_str("  No weather data available\n");
        return;
    }

    for entry in entries {
        out.push_str(&format!("  {}\n", row(span, entry)));
    }
}

fn row(span: Span, entry: &ForecastEntry) -> String {
    let when = match (span, entry.local_time()) {
        (Span::Hourly, Some(t)) => t.format("%H:%M").to_string(),
        (Span::Daily, Some(t)) => t.format("%a %b %e").to_string(),
        (_, None) => entry.timestamp.clone(),
    };

    let mut line = format!(
        "{when:<10} {:<14} {:>4}°C",
        entry.condition().description(),
        entry.temperature_celsius.round()
    );

    // Zero readings are left out, same as missing ones.
    if let Some(h) = entry.humidity_percent.filter(|h| *h > 0.0) {
        line.push_str(&format!("  Humidity: {h}%"));
    }
    if let Some(w) = entry.wind_speed_kmh.filter(|w| *w > 0.0) {
        line.push_str(&format!("  Wind: {} km/h", w.round()));
    }
    if let Some(p) = entry.precipitation_mm.filter(|p| *p > 0.0) {
        line.push_str(&format!("  Rain: {p}mm"));
    }

    line
}
