use std::sync::Arc;
use std::time::Duration;

use rishta_agent::llm::{ChatCompletionsClient, LlmError};
use rishta_agent::runtime::AgentRuntime;
use rishta_agent::tools::{FindMatchesTool, SendWhatsAppTool, ToolRegistry};
use rishta_core::config::{AppConfig, ConfigError, LoadOptions};
use rishta_core::{default_roster, CandidateDirectory, CategoryPolicy};
use rishta_messaging::UltraMsgGateway;
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub directory: Arc<CandidateDirectory>,
    pub agent_runtime: Arc<AgentRuntime>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("chat client construction failed: {0}")]
    LlmClient(#[source] LlmError),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );
    config.validate()?;

    let api_key = config.llm.api_key.clone().ok_or_else(|| {
        BootstrapError::Config(ConfigError::Validation("llm.api_key is required".to_string()))
    })?;

    let category_policy = if config.matching.strict_categories {
        CategoryPolicy::Strict
    } else {
        CategoryPolicy::Lenient
    };
    let directory = Arc::new(CandidateDirectory::new(default_roster(), category_policy));

    let chat_client = ChatCompletionsClient::new(
        config.llm.base_url.clone(),
        api_key,
        config.llm.model.clone(),
        Duration::from_secs(config.llm.timeout_secs),
    )
    .map_err(BootstrapError::LlmClient)?;

    let gateway = Arc::new(UltraMsgGateway::from_config(&config.messaging));

    let mut tools = ToolRegistry::default();
    tools.register(FindMatchesTool::new(directory.clone()));
    tools.register(SendWhatsAppTool::new(gateway));

    let agent_runtime = Arc::new(AgentRuntime::new(Arc::new(chat_client), tools));

    info!(
        event_name = "system.bootstrap.ready",
        correlation_id = "bootstrap",
        roster_size = directory.len(),
        strict_categories = config.matching.strict_categories,
        "application bootstrap complete"
    );

    Ok(Application { config, directory, agent_runtime })
}

#[cfg(test)]
mod tests {
    use rishta_core::config::{ConfigOverrides, LoadOptions};

    use crate::bootstrap::bootstrap;

    fn valid_overrides() -> LoadOptions {
        LoadOptions {
            overrides: ConfigOverrides {
                llm_api_key: Some("test-api-key".to_string()),
                messaging_instance_id: Some("instance1".to_string()),
                messaging_token: Some("token-value".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        }
    }

    #[test]
    fn bootstrap_fails_fast_without_required_credentials() {
        let result = bootstrap(LoadOptions::default());

        let message = result.err().expect("bootstrap should fail").to_string();
        assert!(message.contains("llm.api_key"));
    }

    #[test]
    fn bootstrap_wires_the_roster_and_runtime() {
        let app = bootstrap(valid_overrides()).expect("bootstrap should succeed");

        assert_eq!(app.directory.len(), 11);
        assert!(!app.config.matching.strict_categories);
    }
}
