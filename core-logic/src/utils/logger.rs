use chrono::Local;
use nu_ansi_term::{Color, Style};
use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields},
    prelude::*,
    registry::LookupSpan,
    Layer,
};

pub fn setup_logger() -> Option<WorkerGuard> {
    // Create logs directory
    std::fs::create_dir_all("logs").ok();

    let file_appender = tracing_appender::rolling::hourly("logs", "depined");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // File layer: INFO for poll_result, WARN for others
    let file_filter = tracing_subscriber::filter::Targets::new()
        .with_target("poll_result", tracing::Level::INFO)
        .with_default(tracing::Level::WARN);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .event_format(FileFormatter)
        .with_filter(file_filter);

    // Console layer: everything at INFO and up, colorized
    let console_filter =
        tracing_subscriber::filter::Targets::new().with_default(tracing::Level::INFO);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .event_format(TerminalFormatter)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    // Return guard - MUST be kept alive by caller
    Some(guard)
}

// --- Formatters ---

struct MessageVisitor {
    message: String,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

fn level_style(level: &Level) -> (&'static str, Style) {
    match *level {
        Level::ERROR => ("[ERROR]", Style::new().fg(Color::LightRed).bold()),
        Level::WARN => ("[WARN]", Style::new().fg(Color::Yellow)),
        Level::INFO => ("[INFO]", Style::new().fg(Color::LightCyan)),
        Level::DEBUG => ("[DEBUG]", Style::new().fg(Color::LightMagenta)),
        _ => ("[TRACE]", Style::new().fg(Color::White)),
    }
}

pub struct TerminalFormatter;

impl<S, N> FormatEvent<S, N> for TerminalFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let (tag, style) = level_style(event.metadata().level());

        let mut msg_visitor = MessageVisitor {
            message: String::new(),
        };
        event.record(&mut msg_visitor);

        write!(
            writer,
            "{} {} {}",
            Style::new().fg(Color::DarkGray).paint(format!("[ {} ]", timestamp)),
            style.paint(tag),
            style.paint(msg_visitor.message)
        )?;
        writeln!(writer)
    }
}

pub struct FileFormatter;

impl<S, N> FormatEvent<S, N> for FileFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let level = event.metadata().level();

        write!(writer, "{} [{}] ", timestamp, level)?;

        let mut msg_visitor = MessageVisitor {
            message: String::new(),
        };
        event.record(&mut msg_visitor);
        writeln!(writer, "{}", msg_visitor.message)
    }
}
