//! Source telemetry store

use crate::catalog::ScreenId;
use multifuel_protocol::{SourcePayload, SourceStatus};

/// Last known telemetry of one source
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SourceState {
    pub status: SourceStatus,
    /// Volts
    pub voltage: f32,
    /// Amps
    pub current: f32,
    /// Watts
    pub power: f32,
    /// State of charge, percent
    pub percentage: f32,
    /// Degrees Celsius
    pub temperature: f32,
    pub has_temperature_sensor: bool,
    pub has_charge_estimate: bool,
}

impl Default for SourceState {
    fn default() -> Self {
        Self::new(SourceStatus::NotFound)
    }
}

impl SourceState {
    /// Zeroed telemetry with the given status
    pub const fn new(status: SourceStatus) -> Self {
        Self {
            status,
            voltage: 0.0,
            current: 0.0,
            power: 0.0,
            percentage: 0.0,
            temperature: 0.0,
            has_temperature_sensor: false,
            has_charge_estimate: false,
        }
    }

    /// Overwrite with a `GET_SOURCE` response
    pub fn apply(&mut self, payload: &SourcePayload) {
        self.status = SourceStatus::from_byte(payload.status);
        self.voltage = payload.voltage();
        self.current = payload.current();
        self.power = payload.power();
        self.percentage = payload.percentage as f32;
        self.temperature = payload.temperature();
        self.has_temperature_sensor = payload.has_temperature_sensor();
        self.has_charge_estimate = payload.has_charge_estimate();
    }
}

/// Aggregates shown on the summary screen
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SummaryStats {
    /// Sources currently enabled
    pub active_inputs: u8,
    /// Hottest sensor reading, 0 without sensors
    pub max_temperature: f32,
    /// Largest current among enabled sources
    pub max_current: f32,
}

/// Telemetry for every screen
#[derive(Debug, Clone)]
pub struct SourceStore {
    states: [SourceState; ScreenId::COUNT],
}

impl Default for SourceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceStore {
    /// All sources not found; the main screen starts with no sources
    pub fn new() -> Self {
        let mut states = [SourceState::default(); ScreenId::COUNT];
        states[ScreenId::Main.index()] = SourceState::new(SourceStatus::NoSources);
        Self { states }
    }

    /// Get the state of a screen
    pub fn get(&self, screen: ScreenId) -> &SourceState {
        &self.states[screen.index()]
    }

    /// Apply a response for `screen`
    pub fn update(&mut self, screen: ScreenId, payload: &SourcePayload) {
        self.states[screen.index()].apply(payload);
    }

    /// Aggregate over all source screens
    pub fn summary(&self) -> SummaryStats {
        let mut stats = SummaryStats::default();
        for state in ScreenId::ALL
            .iter()
            .filter(|screen| screen.is_source())
            .map(|screen| self.get(*screen))
        {
            if state.has_temperature_sensor && state.temperature > stats.max_temperature {
                stats.max_temperature = state.temperature;
            }
            if state.status == SourceStatus::Enabled {
                stats.active_inputs += 1;
                if state.current > stats.max_current {
                    stats.max_current = state.current;
                }
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(screen: ScreenId, status: SourceStatus) -> SourcePayload {
        SourcePayload {
            screen_id: screen.as_u8(),
            status: status.to_byte(),
            flags: SourcePayload::FLAG_TEMPERATURE,
            percentage: 50,
            centivolts: 1250,
            centiamps: 430,
            watts: 54,
            decidegrees: 312,
        }
    }

    #[test]
    fn test_initial_state() {
        let store = SourceStore::new();
        assert_eq!(store.get(ScreenId::Lipo).status, SourceStatus::NotFound);
        assert_eq!(store.get(ScreenId::Main).status, SourceStatus::NoSources);
        assert_eq!(store.get(ScreenId::Lipo).voltage, 0.0);
    }

    #[test]
    fn test_apply_payload() {
        let mut store = SourceStore::new();
        store.update(ScreenId::Solar, &payload(ScreenId::Solar, SourceStatus::Enabled));

        let state = store.get(ScreenId::Solar);
        assert_eq!(state.status, SourceStatus::Enabled);
        assert!((state.voltage - 12.5).abs() < 1e-4);
        assert!((state.current - 4.3).abs() < 1e-4);
        assert!((state.temperature - 31.2).abs() < 1e-4);
        assert!(state.has_temperature_sensor);
        assert!(!state.has_charge_estimate);
    }

    #[test]
    fn test_summary_counts_enabled_sources() {
        let mut store = SourceStore::new();
        store.update(ScreenId::Solar, &payload(ScreenId::Solar, SourceStatus::Enabled));
        let mut hot = payload(ScreenId::Lipo, SourceStatus::DisabledOverTemperature);
        hot.decidegrees = 650;
        hot.centiamps = 9000;
        store.update(ScreenId::Lipo, &hot);

        let stats = store.summary();
        assert_eq!(stats.active_inputs, 1);
        assert!((stats.max_temperature - 65.0).abs() < 1e-4);
        // Disabled source current does not count
        assert!((stats.max_current - 4.3).abs() < 1e-4);
    }
}
