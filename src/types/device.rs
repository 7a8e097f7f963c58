use serde::{Deserialize, Serialize};

/// How many status polls to attempt after a setup save before giving up
pub const CONNECTION_CHECK_MAX_ATTEMPTS: u32 = 30;
/// Delay between connection check polls
pub const CONNECTION_CHECK_INTERVAL_MS: u32 = 1000;

/// Device status as reported by `GET /api/status`
///
/// Every field is defaulted so a partial or legacy payload still parses;
/// a missing `setup_complete` in particular must read as "not set up".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeviceStatus {
    pub sta_connecting: bool,
    pub sta_connected: bool,
    pub sta_ip: String,
    pub device_name: String,
    pub wifi_ssid: String,
    pub setup_complete: bool,
}

impl DeviceStatus {
    /// Whether the device has joined a network and holds an address
    pub fn is_attached(&self) -> bool {
        self.sta_connected && !self.sta_ip.is_empty()
    }
}

/// State of the post-setup connection check
///
/// `Polling` is the only state in which timer ticks issue status fetches;
/// every other state is terminal for the current run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionCheckState {
    #[default]
    Idle,
    Polling {
        attempt: u32,
    },
    Connected {
        ip: String,
    },
    TimedOut {
        reason: String,
    },
    Cancelled,
}

impl ConnectionCheckState {
    pub fn is_polling(&self) -> bool {
        matches!(self, Self::Polling { .. })
    }
}
