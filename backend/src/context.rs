use crate::config::Config;
use crate::detector::PlaceholderDetector;
use std::sync::Arc;

/// Shared application context, injected into handlers as `web::Data`.
///
/// Cross-cutting capabilities (configuration, the detection client) travel
/// through this handle explicitly; nothing in the request path reaches for a
/// process-wide singleton.
pub struct AppContext {
    pub config: Config,
    pub detector: Arc<dyn PlaceholderDetector>,
}
