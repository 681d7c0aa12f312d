use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::sync::Mutex;

use tracing::field::Field;
// Alias for tracing macros
pub use tracing::trace_span as trace_span;
pub use tracing::debug_span as debug_span;
pub use tracing::info_span as info_span;
pub use tracing::warn_span as warn_span;
pub use tracing::error_span as error_span;

// Alias for logger macros
pub use tracing::trace as trace;
pub use tracing::debug as debug;
pub use tracing::info as info;
pub use tracing::warn as warn;
pub use tracing::error as error;
use tracing_subscriber::Layer;


/// Struct to store custom fields in a span.
#[derive(Debug)]
pub(crate) struct CustomFieldStorage(pub(crate) BTreeMap<String, serde_json::Value>);

/// Struct to visit all of the fields in a message event.
pub(crate) struct JsonVisitor<'a>(pub(crate) &'a mut BTreeMap<String, serde_json::Value>);

impl tracing::field::Visit for JsonVisitor<'_> {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.0.insert(
            field.name().to_string(),
            serde_json::json!(value.to_string()),
        );
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.insert(
            field.name().to_string(),
            serde_json::json!(format!("{:?}", value)),
        );
    }
}


/// Format the fields of an event other than its message as `{ key: value, ... }`.
pub(crate) fn format_fields(fields: &BTreeMap<String, serde_json::Value>) -> String {
    let other_fields: Vec<String> = fields.iter()
        .filter(|(key, _)| key.as_str() != "message")
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect();
    if other_fields.is_empty() {
        String::new()
    } else {
        format!("{{ {} }}", other_fields.join(", "))
    }
}

/// Format a colored line for the console.
pub(crate) fn format_console_line(date: &str, level: &tracing::Level, target: &str, message: &str, fields: &str) -> String {
    let color = match *level {
        tracing::Level::TRACE => "30",
        tracing::Level::DEBUG => "34",
        tracing::Level::INFO  => "32",
        tracing::Level::WARN  => "33",
        tracing::Level::ERROR => "31",
    };
    format!("\x1b[30m{}\x1b[0m \x1b[{}m[{}]\t{} : {} {}\x1b[0m", date, color, level.as_str(), target, message, fields)
}

/// Format a raw line for the log file.
pub(crate) fn format_file_line(date: &str, level: &tracing::Level, target: &str, message: &str, fields: &str) -> String {
    format!("{}\t[{}]\t{}\t:\t{} {}", date, level.as_str(), target, message, fields)
        .trim_end()
        .to_string()
}


/// Layer printing every event to the console and appending it to a log file.
pub struct LoggerLayer {
    file: Mutex<File>,
}

impl LoggerLayer {
    /// Create the layer. The log file is created, or cleared when it already exists.
    pub fn new(file_name: &str) -> std::io::Result<Self> {
        let file = File::create(file_name)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S> Layer<S> for LoggerLayer
where
    S: tracing::Subscriber,
    S: for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        id: &tracing::span::Id,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let Some(span) = ctx.span(id) else { return; };

        // Get the fields
        let mut fields = BTreeMap::new();
        let mut visitor = JsonVisitor(&mut fields);
        attrs.record(&mut visitor);

        // Store the fields in the span
        let mut extensions = span.extensions_mut();
        match extensions.get_mut::<CustomFieldStorage>() {
            Some(storage) => storage.0.extend(fields),
            None => extensions.insert(CustomFieldStorage(fields)),
        }
    }

    fn on_record(
        &self,
        id: &tracing::span::Id,
        values: &tracing::span::Record<'_>,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let Some(span) = ctx.span(id) else { return; };

        // Add the new data to the stored fields
        let mut extensions_mut = span.extensions_mut();
        if let Some(storage) = extensions_mut.get_mut::<CustomFieldStorage>() {
            let mut visitor = JsonVisitor(&mut storage.0);
            values.record(&mut visitor);
        }
    }

    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        // Discard the noise of the log bridge and of the polling backend
        if event.metadata().target().starts_with("log") || event.metadata().target().starts_with("polling::epoll") {
            return;
        }

        // Fields of the parent spans, outermost first
        let mut fields = BTreeMap::new();
        if let Some(scope) = ctx.event_scope(event) {
            for span in scope.from_root() {
                if let Some(storage) = span.extensions().get::<CustomFieldStorage>() {
                    for (key, value) in &storage.0 {
                        fields.insert(format!("{}.{}", span.metadata().name(), key), value.clone());
                    }
                }
            }
        }

        // Fields of the event itself
        let mut visitor = JsonVisitor(&mut fields);
        event.record(&mut visitor);

        let message = fields.get("message")
            .and_then(|message| message.as_str())
            .unwrap_or_default()
            .to_string();
        let other_fields = format_fields(&fields);
        let level = event.metadata().level();
        let target = event.metadata().target();

        let date = chrono::Local::now().format("%H:%M:%S:%3f").to_string();
        println!("{}", format_console_line(&date, level, target, &message, &other_fields));

        // Write to file sync
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{}", format_file_line(&date, level, target, &message, &other_fields));
        }
    }
}
