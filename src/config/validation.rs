use super::Config;
use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - Port cannot be zero
/// - Provider base URLs must start with http:// or https://
/// - Model identifier and data file cannot be empty
/// - max_tokens must be positive, temperature within 0.0..=2.0
/// - Schedule hour/minute must be a valid time of day
/// - If log file path is provided, it cannot be empty and its parent directory must be creatable
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    if config.port == 0 {
        return Err(AppError::config_error("Port cannot be zero"));
    }

    for (name, url) in [
        ("Sports API base URL", &config.rugby_api_base_url),
        ("AI API base URL", &config.ai_api_base_url),
    ] {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AppError::config_error(format!(
                "{name} must start with http:// or https:// (got '{url}')"
            )));
        }
    }

    if config.ai_model.trim().is_empty() {
        return Err(AppError::config_error("AI model cannot be empty"));
    }

    if config.data_file.trim().is_empty() {
        return Err(AppError::config_error("Data file path cannot be empty"));
    }

    if config.max_tokens == 0 {
        return Err(AppError::config_error("max_tokens must be greater than zero"));
    }

    if !(0.0..=2.0).contains(&config.temperature) {
        return Err(AppError::config_error("temperature must be between 0.0 and 2.0"));
    }

    for (name, schedule) in [
        ("roundup_schedule", &config.roundup_schedule),
        ("vlog_schedule", &config.vlog_schedule),
    ] {
        if !schedule.is_valid() {
            return Err(AppError::config_error(format!(
                "{name} has an invalid time of day ({schedule})"
            )));
        }
    }

    if let Some(log_path) = &config.log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        // Check if parent directory exists or can be created
        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
