use serde::{Deserialize, Serialize};

use crate::types::*;

/// Application Model - the complete state
/// Also serves as the ViewModel when serialized
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Model {
    // Routing state
    pub setup_complete: bool,
    pub current_section: Section,
    pub visible_sections: Vec<Section>,
    /// Fragment requested before the initial status check resolved
    pub pending_fragment: Option<String>,

    // Device state
    pub status: Option<DeviceStatus>,

    // Setup section state
    pub networks: Option<Vec<WifiNetwork>>,
    pub is_scanning: bool,
    pub scan_error: Option<String>,
    pub setup_saved: bool,
    pub saved_device_name: Option<String>,
    pub saved_wifi_ssid: Option<String>,

    // Connection check state (post-setup polling)
    pub connection_check_state: ConnectionCheckState,
    /// Id of the currently armed connection check timer; ticks carrying any
    /// other id are stale and ignored
    pub connection_check_timer: Option<u32>,
    pub timer_seq: u32,

    // Widgets section state
    pub widgets: Option<Vec<WidgetInfo>>,
    pub active_widget: Option<String>,
    pub clock_config: Option<ClockConfig>,
    pub timer_config: Option<TimerConfig>,
    pub weather_zip_code: Option<String>,
    pub weather_temp_unit: Option<TempUnit>,

    // Settings section state
    pub device_config: Option<DeviceConfig>,
    pub timezone: Option<String>,
    pub font_size: Option<FontSizePreset>,
    pub factory_reset_in_progress: bool,

    // UI state
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    /// Markup loading failure for the current section, reported by the shell
    pub section_error: Option<String>,
}

impl Model {
    /// Start a loading operation (sets is_loading=true, clears error)
    pub fn start_loading(&mut self) {
        self.is_loading = true;
        self.error_message = None;
    }

    /// Stop loading and clear error
    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.error_message = None;
    }

    /// Set an error message and stop loading
    pub fn set_error(&mut self, error: String) {
        self.is_loading = false;
        self.error_message = Some(error);
    }

    /// Set an error message, stop loading, and return a render command
    pub fn set_error_and_render(
        &mut self,
        error: String,
    ) -> crux_core::Command<crate::Effect, crate::events::Event> {
        self.set_error(error);
        crux_core::render::render()
    }

    /// Clear the error message without affecting the loading state.
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Allocate a fresh timer id, invalidating any previously armed timer
    pub fn next_timer_id(&mut self) -> u32 {
        self.timer_seq += 1;
        self.connection_check_timer = Some(self.timer_seq);
        self.timer_seq
    }

    /// Whether a fired timer id belongs to the currently armed timer
    pub fn is_current_timer(&self, id: u32) -> bool {
        self.connection_check_timer == Some(id)
    }
}
