use bluefin_core::PolicyConfig;

use crate::error::Result;
use crate::export::DEFAULT_EXPORT_NAME;
use crate::services::AppServices;

/// Settings shared by every frontend (HTTP UI, CLI).
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub policy: PolicyConfig,
    pub default_export_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            policy: PolicyConfig::default(),
            default_export_name: DEFAULT_EXPORT_NAME.to_string(),
        }
    }
}

/// Application state shared by frontend backends. Cloning shares the same
/// report session.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        config.policy.validate()?;
        let services = AppServices::new(&config);
        Ok(Self { config, services })
    }
}
