use serde::{Deserialize, Serialize};

use crate::commands::timer::TimerOutput;
use crate::types::*;

/// Events that can happen in the app, grouped by domain
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Event {
    Router(RouterEvent),
    Setup(SetupEvent),
    Widgets(WidgetsEvent),
    Settings(SettingsEvent),
    Ui(UiEvent),
}

/// Routing and setup gating
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum RouterEvent {
    /// App start: check device status, then route the given URL fragment
    Initialize { fragment: String },
    /// Browser hash change
    HashChanged { fragment: String },
    /// Navigation link click
    Navigate { section: Section },

    // HTTP responses (internal events, skipped from serialization)
    #[serde(skip)]
    StatusResponse(Result<DeviceStatus, String>),
}

/// Initial device setup (WiFi scan, setup form, connection check)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum SetupEvent {
    ScanNetworks,
    SaveSetup { form: SetupForm },
    CancelConnectionCheck,

    // Internal events
    #[serde(skip)]
    ScanNetworksResponse(Result<Vec<WifiNetwork>, String>),
    #[serde(skip)]
    SaveSetupResponse(Result<(), String>),
    #[serde(skip)]
    ConnectionCheckTimer(TimerOutput),
    #[serde(skip)]
    ConnectionCheckStatus(Result<DeviceStatus, String>),
}

/// Widget selection and per-widget configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum WidgetsEvent {
    Load,
    SelectWidget { widget_id: String },
    LoadWidgetConfig { widget_id: String },
    SaveClockConfig { config: ClockConfig },
    SaveTimerConfig { config: TimerConfig },
    SaveWeatherConfig { zip_code: String, temp_unit: TempUnit },

    // Internal events
    #[serde(skip)]
    WidgetListResponse(Result<Vec<WidgetInfo>, String>),
    #[serde(skip)]
    ActiveWidgetResponse(Result<ActiveWidget, String>),
    #[serde(skip)]
    SelectWidgetResponse(Result<(), String>),
    #[serde(skip)]
    ClockConfigResponse(Result<ClockConfig, String>),
    #[serde(skip)]
    TimerConfigResponse(Result<TimerConfig, String>),
    #[serde(skip)]
    SaveClockConfigResponse(Result<(), String>),
    #[serde(skip)]
    SaveTimerConfigResponse(Result<(), String>),
    #[serde(skip)]
    WeatherZipResponse(Result<WeatherZipCode, String>),
    #[serde(skip)]
    WeatherTempUnitResponse(Result<WeatherTempUnit, String>),
    #[serde(skip)]
    SaveWeatherZipResponse {
        result: Result<(), String>,
        temp_unit: TempUnit,
    },
    #[serde(skip)]
    SaveWeatherTempUnitResponse(Result<(), String>),
}

/// Device settings (name/WiFi, timezone, font size, factory reset)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    Load,
    Save { form: SettingsForm },
    FactoryReset,

    // Internal events
    #[serde(skip)]
    DeviceConfigResponse(Result<DeviceConfig, String>),
    #[serde(skip)]
    TimezoneResponse(Result<TimezoneConfig, String>),
    #[serde(skip)]
    FontSizeResponse(Result<FontSizeConfig, String>),
    #[serde(skip)]
    SaveDeviceConfigResponse {
        result: Result<(), String>,
        timezone: String,
        font_size: FontSizePreset,
    },
    #[serde(skip)]
    SetTimezoneResponse {
        result: Result<(), String>,
        font_size: FontSizePreset,
    },
    #[serde(skip)]
    SetFontSizeResponse(Result<(), String>),
    #[serde(skip)]
    FactoryResetResponse(Result<(), String>),
}

/// UI actions
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ClearError,
    ClearSuccess,
    /// The shell failed to fetch/inject a section's markup
    SectionLoadFailed { section: Section, error: String },
}
