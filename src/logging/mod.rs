//! Logging infrastructure - structured tracing for heap operations
//!
//! Design: Uses `tracing` for structured, contextual logging with:
//! - Configurable log levels via environment variables
//! - Zero-cost when disabled
//! - JSON or human-readable console output

use once_cell::sync::OnceCell;
use std::io;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

pub use tracing::{debug, error, info, trace, warn};

/// Global logging state
static LOGGER_INITIALIZED: OnceCell<()> = OnceCell::new();

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default log level
    pub level: Level,
    /// Enable JSON format (vs human-readable)
    pub json_format: bool,
    /// Show span events (enter/exit)
    pub show_spans: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json_format: false,
            show_spans: false,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // FREEHEAP_LOG_LEVEL: trace, debug, info, warn, error
        if let Ok(level_str) = std::env::var("FREEHEAP_LOG_LEVEL") {
            config.level = match level_str.to_lowercase().as_str() {
                "trace" => Level::TRACE,
                "debug" => Level::DEBUG,
                "info" => Level::INFO,
                "warn" => Level::WARN,
                "error" => Level::ERROR,
                _ => Level::INFO,
            };
        }

        // FREEHEAP_LOG_JSON: enable JSON format
        config.json_format = std::env::var("FREEHEAP_LOG_JSON").is_ok();

        // FREEHEAP_LOG_SPANS: show span events
        config.show_spans = std::env::var("FREEHEAP_LOG_SPANS").is_ok();

        config
    }

    /// Create quiet config (errors only)
    pub fn quiet() -> Self {
        Self {
            level: Level::ERROR,
            json_format: false,
            show_spans: false,
        }
    }

    /// Create verbose config (per-operation trace events)
    pub fn verbose() -> Self {
        Self {
            level: Level::TRACE,
            json_format: false,
            show_spans: true,
        }
    }
}

/// Initialize logging with configuration from the environment
pub fn init() {
    init_with_config(LogConfig::from_env());
}

/// Initialize logging with custom configuration
pub fn init_with_config(config: LogConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "freeheap={}",
                config.level.as_str().to_lowercase()
            ))
        });

        let span_events = if config.show_spans {
            FmtSpan::ENTER | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let registry = tracing_subscriber::registry().with(env_filter);

        if config.json_format {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(io::stdout)
                        .with_span_events(span_events)
                        .with_target(true),
                )
                .init();
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_writer(io::stdout)
                        .with_span_events(span_events)
                        .with_target(true),
                )
                .init();
        }
    });
}

/// Check if logging is initialized
pub fn is_initialized() -> bool {
    LOGGER_INITIALIZED.get().is_some()
}

// ============================================================================
// Heap-specific logging functions
// ============================================================================

/// Log a successful allocation
#[inline]
pub fn log_allocation(size: usize, address: usize) {
    trace!(
        event = "allocation",
        size_bytes = size,
        address = address,
        "block allocated"
    );
}

/// Log a completed deallocation (after coalescing)
#[inline]
pub fn log_deallocation(address: usize) {
    trace!(
        event = "deallocation",
        address = address,
        "block freed and coalesced"
    );
}

/// Log a failed allocation (no free block large enough)
#[inline]
pub fn log_exhaustion(requested: usize) {
    debug!(
        event = "exhaustion",
        requested_bytes = requested,
        "no free block large enough"
    );
}
