use serde::{Deserialize, Serialize};

/// One access point from `GET /api/scan`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WifiNetwork {
    pub ssid: String,
    pub rssi: i32,
    /// Auth mode as reported by the radio; 0 is an open network
    #[serde(default)]
    pub auth: u8,
}

/// Order scan results strongest-first and collapse duplicate SSIDs
/// (multi-AP networks show up once, with their best signal).
pub fn sort_and_dedup(mut networks: Vec<WifiNetwork>) -> Vec<WifiNetwork> {
    networks.sort_by(|a, b| b.rssi.cmp(&a.rssi));

    let mut seen = std::collections::HashSet::new();
    networks.retain(|n| seen.insert(n.ssid.clone()));
    networks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(ssid: &str, rssi: i32) -> WifiNetwork {
        WifiNetwork {
            ssid: ssid.to_string(),
            rssi,
            auth: 3,
        }
    }

    #[test]
    fn sorts_strongest_first() {
        let sorted = sort_and_dedup(vec![
            network("a", -70),
            network("b", -40),
            network("c", -55),
        ]);

        let ssids: Vec<&str> = sorted.iter().map(|n| n.ssid.as_str()).collect();
        assert_eq!(ssids, vec!["b", "c", "a"]);
    }

    #[test]
    fn duplicate_ssids_keep_strongest() {
        let sorted = sort_and_dedup(vec![
            network("mesh", -80),
            network("other", -60),
            network("mesh", -45),
        ]);

        assert_eq!(sorted.len(), 2);
        assert_eq!(sorted[0].ssid, "mesh");
        assert_eq!(sorted[0].rssi, -45);
    }

    #[test]
    fn empty_scan_stays_empty() {
        assert!(sort_and_dedup(Vec::new()).is_empty());
    }
}
