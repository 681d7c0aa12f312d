mod log;
mod subscriber;
mod throw;
#[cfg(feature = "tracing")]
mod tracer;

pub use log::*;
pub use subscriber::*;
pub use tracing;
#[cfg(feature = "tracing")]
pub use tracer::*;
