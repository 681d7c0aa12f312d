use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::LoggerLayer;

pub struct Logger {
    #[allow(dead_code)]
    tracing_file_name: String,
}

impl Logger {
    /// Create a new logger instance.
    /// This must be called once before any other logging function.
    /// 
    /// # Arguments
    /// 
    /// * `log_file_name` - The name of the file to write the log data to.
    /// * `tracing_file_name` - The name of the file to write the span timings to (only with the `tracing` feature).
    /// 
    /// # Errors
    /// 
    /// Fails when one of the output files cannot be created.
    pub fn new(log_file_name: &str, tracing_file_name: &str) -> std::io::Result<Self> {
        // Custom logger layer
        let logger_layer = LoggerLayer::new(log_file_name)?;

        #[cfg(feature = "tracing")]
        {
            // Custom tracing layer
            let tracing_layer = crate::TracingLayer::new(tracing_file_name)?;
            tracing_subscriber::registry()
                .with(tracing_layer)
                .with(logger_layer)
                .init();
        }

        #[cfg(not(feature = "tracing"))]
        tracing_subscriber::registry()
            .with(logger_layer)
            .init();

        Ok(Self {
            tracing_file_name: tracing_file_name.to_string(),
        })
    }

    /// Close the logger instance.
    /// This must be called once after all other logging functions.
    pub fn close(&self) {
        // Write the footer
        #[cfg(feature = "tracing")]
        if let Err(err) = crate::TracingLayer::close(&self.tracing_file_name) {
            eprintln!("Could not close trace file {}: {}", self.tracing_file_name, err);
        }
    }
}
