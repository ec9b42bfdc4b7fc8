// Hardware Switcher Mirror
// Simulated link to a physical production switcher. Produces snapshots the
// switcher engine stores passively; it never drives PGM/PVW itself.

use chrono::Local;

use crate::models::{HardwareSwitcherState, SyncStatus, Tally};

pub struct HardwareSwitcherEngine {
    state: HardwareSwitcherState,
}

impl HardwareSwitcherEngine {
    pub fn new(model: &str) -> Self {
        Self {
            state: HardwareSwitcherState {
                model: model.to_string(),
                ..Default::default()
            },
        }
    }

    pub fn snapshot(&self) -> HardwareSwitcherState {
        self.state.clone()
    }

    pub fn connect(&mut self, model: &str) {
        self.state.connected = true;
        self.state.model = model.to_string();
        self.state.sync_status = SyncStatus::Synced;
        log::info!("Hardware switcher connected: {}", model);
    }

    pub fn disconnect(&mut self) {
        self.state.connected = false;
        self.state.sync_status = SyncStatus::Offline;
        self.state.tally = Tally::default();
        log::info!("Hardware switcher disconnected");
    }

    /// A cut performed on the device: the fader flips end to end
    pub fn simulate_external_cut(&mut self) {
        self.state.fader_position = if self.state.fader_position == 0 { 100 } else { 0 };
        self.state.last_external_action = format!("CUT @ {}", Local::now().timestamp_millis());
        log::debug!("External action: {}", self.state.last_external_action);
    }

    pub fn set_fader(&mut self, position: u8) {
        self.state.fader_position = position.min(100);
    }

    pub fn update_tally(&mut self, pgm: Vec<u32>, pvw: Vec<u32>) {
        self.state.tally = Tally { pgm, pvw };
    }

    /// Compare the device's PGM tally with the input the app expects on air.
    /// Only meaningful while connected.
    pub fn reconcile(&mut self, expected_pgm_input: Option<u32>) -> SyncStatus {
        if !self.state.connected {
            self.state.sync_status = SyncStatus::Offline;
            return self.state.sync_status;
        }
        let agrees = match expected_pgm_input {
            Some(input) => self.state.tally.pgm.contains(&input),
            None => self.state.tally.pgm.is_empty(),
        };
        self.state.sync_status = if agrees { SyncStatus::Synced } else { SyncStatus::Conflict };
        if !agrees {
            log::warn!(
                "Hardware tally {:?} disagrees with expected PGM input {:?}",
                self.state.tally.pgm, expected_pgm_input
            );
        }
        self.state.sync_status
    }
}
