use std::{collections::BTreeMap, fs::{File, OpenOptions}, io::{Read, Write}, sync::{Mutex, OnceLock}};
use regex::Regex;
use tracing::span;
use tracing_subscriber::Layer;

use crate::log::{CustomFieldStorage, JsonVisitor};


fn now_nanos() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|duration| duration.as_nanos())
        .unwrap_or_default()
}

/// Numeric id of the current thread, read from its debug representation.
fn current_thread_id() -> u64 {
    static THREAD_ID: OnceLock<Regex> = OnceLock::new();
    let regex = THREAD_ID.get_or_init(|| Regex::new(r"ThreadId\((\d+)\)").expect("valid thread id regex"));

    let thread_str = format!("{:?}", std::thread::current().id());
    regex.captures(&thread_str)
        .and_then(|captures| captures[1].parse::<u64>().ok())
        .unwrap_or_default()
}


/// Layer writing the duration of every span to a chrome trace file (`chrome://tracing`).
/// Only active in debug builds.
pub struct TracingLayer {
    file: Option<Mutex<File>>,
}

impl TracingLayer {
    pub fn new(file_name: &str) -> std::io::Result<Self> {
        // Check if production
        if !cfg!(debug_assertions) {
            return Ok(Self { file: None });
        }

        // Write the header
        let mut file = File::create(file_name)?;
        file.write_all(b"{\"traceEvents\":[\n")?;

        Ok(Self {
            file: Some(Mutex::new(file)),
        })
    }

    /// Terminate the trace file so that it is valid JSON.
    pub fn close(file_name: &str) -> std::io::Result<()> {
        // Check if production
        if !cfg!(debug_assertions) {
            return Ok(());
        }

        // Remove the last comma
        let mut contents = String::new();
        OpenOptions::new().read(true).open(file_name)?.read_to_string(&mut contents)?;
        if contents.ends_with(",\n") {
            contents.truncate(contents.len() - 2);
        }
        contents.push_str("\n]}\n");
        std::fs::write(file_name, contents)
    }
}


impl<S> Layer<S> for TracingLayer
where
    S: tracing::Subscriber,
    S: for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>
{
    fn on_new_span(
        &self,
        attrs: &span::Attributes<'_>,
        id: &span::Id,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let Some(span) = ctx.span(id) else { return; };

        // Get the fields
        let mut fields = BTreeMap::new();
        let mut visitor = JsonVisitor(&mut fields);
        attrs.record(&mut visitor);

        // Thread and start time, as strings to avoid overflow
        fields.insert("thread_id".to_string(), serde_json::json!(current_thread_id()));
        fields.insert("start".to_string(), serde_json::json!(now_nanos().to_string()));

        // The logger layer may have stored the span fields already
        let mut extensions = span.extensions_mut();
        match extensions.get_mut::<CustomFieldStorage>() {
            Some(storage) => storage.0.extend(fields),
            None => extensions.insert(CustomFieldStorage(fields)),
        }
    }

    fn on_close(&self, id: span::Id, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let Some(file) = &self.file else { return; };
        let Some(span) = ctx.span(&id) else { return; };
        let extensions = span.extensions();
        let Some(storage) = extensions.get::<CustomFieldStorage>() else { return; };

        // Get duration
        let start = storage.0.get("start")
            .and_then(|start| start.as_str())
            .and_then(|start| start.parse::<u128>().ok())
            .unwrap_or_default();
        let dur = now_nanos().saturating_sub(start) / 1000;

        let data = serde_json::json!({
            "name": format!("{}::{}", span.metadata().target(), span.metadata().name()),
            "cat": span.metadata().level().as_str(),
            "ph": "X",
            "pid": 1,
            "tid": storage.0.get("thread_id"),
            "ts": (start / 1000) as u64,
            "dur": dur as u64,
            "args": storage.0,
        });

        if let Ok(mut file) = file.lock() {
            let _ = writeln!(file, "{},", data);
        }
    }
}
