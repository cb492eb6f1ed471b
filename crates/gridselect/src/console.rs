//! Colored console output for selection solves.
//!
//! Provides a `tracing` layer that renders solve start/end events.
//! Initialized on the first [`crate::solve`] call when the `console`
//! feature is enabled.

use std::io::{self, Write};
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes console output.
///
/// Safe to call multiple times; only the first call has effect. A global
/// subscriber installed elsewhere is left in place.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = match "gridselect_solver=info".parse() {
            Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
            Err(_) => EnvFilter::from_default_env(),
        };

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SelectionConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats selection events with colors.
pub struct SelectionConsoleLayer;

impl<S: Subscriber> Layer<S> for SelectionConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("gridselect_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    backend: Option<String>,
    status: Option<String>,
    rows: Option<u64>,
    cols: Option<u64>,
    budget: Option<f64>,
    selected: Option<u64>,
    total_benefit: Option<f64>,
    total_cost: Option<f64>,
    non_binary: Option<u64>,
    duration_ms: Option<u64>,
    limit_ms: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "backend" => self.backend = Some(s),
            "status" => self.status = Some(s),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "backend" => self.backend = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "rows" => self.rows = Some(value),
            "cols" => self.cols = Some(value),
            "selected" => self.selected = Some(value),
            "non_binary" => self.non_binary = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "limit_ms" => self.limit_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "budget" => self.budget = Some(value),
            "total_benefit" => self.total_benefit = Some(value),
            "total_cost" => self.total_cost = Some(value),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref() {
        Some("solve_start") => format_solve_start(v),
        Some("solve_end") => format_solve_end(v),
        Some("timeout") => format_timeout(v),
        _ => String::new(),
    }
}

fn format_solve_start(v: &EventVisitor) -> String {
    let rows = v.rows.unwrap_or(0);
    let cols = v.cols.unwrap_or(0);

    format!(
        "{} {} {} grid ({}), budget ({}), backend ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Selector]".bright_cyan(),
        format!("{rows}x{cols}").bright_yellow(),
        format_number(v.budget).bright_yellow(),
        v.backend.as_deref().unwrap_or("unknown").white().bold(),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("unknown");
    let mut output = format!(
        "{} {} {} Solve ended: status ({}), time spent ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Selector]".bright_cyan(),
        format_status(status),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    );

    if let Some(selected) = v.selected {
        output.push_str(&format!(
            ", selected ({}), benefit ({}), cost ({}), non-binary ({})",
            selected.to_string().bright_magenta().bold(),
            format_number(v.total_benefit).white(),
            format_number(v.total_cost).white(),
            v.non_binary.unwrap_or(0).to_string().yellow(),
        ));
    }
    output
}

fn format_timeout(v: &EventVisitor) -> String {
    format!(
        "{} {} {} Backend exceeded its time limit ({})",
        timestamp().bright_black(),
        "WARN".bright_yellow(),
        "[Selector]".bright_cyan(),
        format_duration_ms(v.limit_ms.unwrap_or(0)).yellow(),
    )
}

fn format_status(status: &str) -> String {
    match status {
        "optimal" => status.bright_green().bold().to_string(),
        "inaccurate" => status.yellow().to_string(),
        _ => status.bright_red().to_string(),
    }
}

fn format_number(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |x| format!("{x:.3}"))
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_format() {
        assert_eq!(format_duration_ms(12), "12ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let visitor = EventVisitor {
            event: Some("formulated".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor).is_empty());
    }

    #[test]
    fn test_solve_end_without_outcome() {
        let visitor = EventVisitor {
            event: Some("solve_end".to_string()),
            status: Some("infeasible".to_string()),
            duration_ms: Some(3),
            ..EventVisitor::default()
        };
        let line = format_event(&visitor);
        assert!(line.contains("Solve ended"));
        assert!(line.contains("infeasible"));
        assert!(!line.contains("selected"));
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
