pub mod claude;
pub mod noop;
pub mod prompt_builder;

use crate::application::config::AiConfig;
use crate::domain::ports::enricher::ClusterEnricher;

use self::claude::ClaudeCliEnricher;
use self::noop::NoopEnricher;

/// Create the cluster enricher selected by configuration.
///
/// Returns [`NoopEnricher`] when AI is disabled or the provider is unknown.
#[must_use]
pub fn create_enricher(config: &AiConfig) -> Box<dyn ClusterEnricher> {
    if !config.enabled {
        return Box::new(NoopEnricher::new());
    }
    match config.provider.trim() {
        "claude-cli" => Box::new(ClaudeCliEnricher::new(
            config.model.clone(),
            config.cooldown_secs,
            config.timeout_secs,
        )),
        "noop" => Box::new(NoopEnricher::new()),
        _ => {
            tracing::warn!(
                provider = %config.provider,
                "unknown AI provider, falling back to noop"
            );
            Box::new(NoopEnricher::new())
        }
    }
}
