use crate::config::types::{
    Config, ExplorationConfig, OutputConfig, RendererConfig, SourceConfig, UserAgentConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_renderer_config(&config.renderer)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_exploration_config(&config.exploration)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the profile source settings
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url must use http or https, got '{}'",
            config.base_url
        )));
    }

    // Profile URLs are built as base + "/" + script, so a trailing slash doubles up
    if config.base_url.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base_url must not end with '/', got '{}'",
            config.base_url
        )));
    }

    if config.author_page_script.trim().is_empty() {
        return Err(ConfigError::Validation(
            "author_page_script cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates renderer timing
fn validate_renderer_config(config: &RendererConfig) -> Result<(), ConfigError> {
    if config.wait_timeout_secs < 1 || config.wait_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "wait_timeout_secs must be between 1 and 300, got {}",
            config.wait_timeout_secs
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates exploration limits
fn validate_exploration_config(config: &ExplorationConfig) -> Result<(), ConfigError> {
    if config.max_authors < 1 {
        return Err(ConfigError::Validation(format!(
            "max_authors must be >= 1, got {}",
            config.max_authors
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    if config.bibtex_path.is_empty() {
        return Err(ConfigError::Validation(
            "bibtex_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let (local, domain) = match email.split_once('@') {
        Some(parts) if !parts.1.contains('@') => parts,
        _ => {
            return Err(ConfigError::Validation(format!(
                "Invalid email format: '{}'",
                email
            )))
        }
    };

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
