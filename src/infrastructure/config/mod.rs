use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use validator::Validate;

use crate::domain::app_config::AppConfig;
use crate::domain::error::{AppError, Result};

pub const CONFIG_FILE: &str = "bulk_import.toml";
pub const ENV_PREFIX: &str = "BULK_IMPORT_";

pub struct ConfigService {
    figment: Figment,
}

impl ConfigService {
    /// Defaults, then `bulk_import.toml`, then `BULK_IMPORT_*` variables.
    pub fn new() -> Self {
        Self::from_figment(
            Figment::from(Serialized::defaults(AppConfig::default()))
                .merge(Toml::file(CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn load(&self) -> Result<AppConfig> {
        let config: AppConfig = self
            .figment
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;

        config
            .validate()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("BULK_IMPORT_API_URL", "https://backend.example.com/v1");
            jail.set_env("BULK_IMPORT_PREVIEW_ROWS", "10");

            let config = ConfigService::new().load().unwrap();
            assert_eq!(config.api_url, "https://backend.example.com/v1");
            assert_eq!(config.preview_rows, 10);
            assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
            Ok(())
        });
    }

    #[test]
    fn test_toml_file_is_merged() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                    listen_addr = "0.0.0.0:9000"
                    request_timeout_secs = 5
                "#,
            )?;

            let config = ConfigService::new().load().unwrap();
            assert_eq!(config.listen_addr, "0.0.0.0:9000");
            assert_eq!(config.request_timeout_secs, 5);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("BULK_IMPORT_MAX_UPLOAD_BYTES", "0");
            let err = ConfigService::new().load().unwrap_err();
            assert!(matches!(err, AppError::ConfigError(_)));
            Ok(())
        });
    }
}
