use serde::{Deserialize, Serialize};
use serde_valid::Validate;

/// Stored device configuration from `GET /api/config`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeviceConfig {
    pub device_name: String,
    pub wifi_ssid: String,
    /// Backing store the device is using ("sd", "nvs", ...)
    pub storage: String,
}

/// Initial setup form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct SetupForm {
    #[validate(max_length = 32)]
    pub device_name: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 32)]
    pub wifi_ssid: String,
    #[validate(max_length = 64)]
    pub wifi_pass: String,
}

/// Settings form; empty strings mean "leave unchanged"
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct SettingsForm {
    #[validate(max_length = 32)]
    pub device_name: String,
    #[validate(max_length = 32)]
    pub wifi_ssid: String,
    #[validate(max_length = 64)]
    pub wifi_pass: String,
    pub timezone: String,
    pub font_size: crate::types::FontSizePreset,
}

/// `POST /api/config` body; absent keys leave the stored value untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveConfigRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wifi_ssid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wifi_pass: Option<String>,
}

impl SaveConfigRequest {
    /// Build a partial request from form fields, dropping empty ones
    pub fn from_fields(device_name: &str, wifi_ssid: &str, wifi_pass: &str) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            device_name: non_empty(device_name),
            wifi_ssid: non_empty(wifi_ssid),
            wifi_pass: non_empty(wifi_pass),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.device_name.is_none() && self.wifi_ssid.is_none() && self.wifi_pass.is_none()
    }
}
