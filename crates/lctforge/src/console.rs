//! Colorful console output for motherboard passes.
//!
//! Provides a custom `tracing` layer that formats pass summaries and
//! validator findings with colors.

use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// `RUST_LOG` overrides the default `lctforge_tmb=info` filter.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("lctforge_tmb=info,lctforge_config=warn"));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(TmbConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let version_line = format!(
        "lctforge v{} - CSC trigger motherboard emulation",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", version_line.bright_cyan().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats motherboard events with colors.
pub struct TmbConsoleLayer;

impl<S: Subscriber> Layer<S> for TmbConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        if !target.starts_with("lctforge_") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(*metadata.level(), &visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    message: Option<String>,
    event: Option<String>,
    chamber: Option<String>,
    alcts: Option<u64>,
    clcts: Option<u64>,
    matched: Option<u64>,
    single_sided: Option<u64>,
    lcts: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "message" => self.message = Some(s),
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "chamber" => self.chamber = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "alcts" => self.alcts = Some(value),
            "clcts" => self.clcts = Some(value),
            "matched" => self.matched = Some(value),
            "single_sided" => self.single_sided = Some(value),
            "lcts" => self.lcts = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = Some(value.to_string()),
            "event" => self.event = Some(value.to_string()),
            "chamber" => self.chamber = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(level: Level, v: &EventVisitor) -> String {
    if v.event.as_deref() == Some("pass_end") {
        return format_pass_end(v);
    }
    match level {
        Level::ERROR => format_finding("ERROR".bright_red().to_string(), v),
        Level::WARN => format_finding("WARN".yellow().to_string(), v),
        _ => String::new(),
    }
}

fn chamber_tag(v: &EventVisitor) -> String {
    format!("[{}]", v.chamber.as_deref().unwrap_or("TMB"))
}

fn format_pass_end(v: &EventVisitor) -> String {
    format!(
        "{} {} {} ALCTs ({}), CLCTs ({}), matched ({}), single-sided ({}), LCTs ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        chamber_tag(v).bright_cyan(),
        v.alcts.unwrap_or(0).yellow(),
        v.clcts.unwrap_or(0).yellow(),
        v.matched.unwrap_or(0).bright_green(),
        v.single_sided.unwrap_or(0).bright_magenta(),
        v.lcts.unwrap_or(0).white().bold()
    )
}

fn format_finding(level: String, v: &EventVisitor) -> String {
    format!(
        "{} {} {} {}",
        timestamp().bright_black(),
        level,
        chamber_tag(v).bright_cyan(),
        v.message.as_deref().unwrap_or("")
    )
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
