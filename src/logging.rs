use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogFormat;

/// Install the global subscriber. Logs go to stderr; stdout is reserved for the event.
pub fn init(level: &str, format: LogFormat) {
  let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
  let registry = tracing_subscriber::registry().with(filter);

  let result = match format {
    LogFormat::Text => registry
      .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
      .try_init(),
    LogFormat::Json => registry
      .with(fmt::layer().json().with_writer(std::io::stderr).with_current_span(true))
      .try_init(),
  };

  if let Err(e) = result {
    eprintln!("[logging] subscriber already installed: {}", e);
  }
}
