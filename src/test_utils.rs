//! Shared test helpers
//!
//! A fake service-manager gateway plus record constructors, so the session
//! core can be exercised without a systemd instance.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::registry::UnitRecord;
use crate::systemd::{Gateway, GatewayError, UnitAction};

/// Build a minimal unit record for tests.
pub(crate) fn unit(name: &str, active_state: &str, sub_state: &str) -> UnitRecord {
    UnitRecord {
        name: name.to_string(),
        load_state: "loaded".to_string(),
        active_state: active_state.to_string(),
        sub_state: sub_state.to_string(),
        description: format!("{name} description"),
    }
}

/// In-memory gateway with scriptable results and call counters.
#[derive(Default)]
pub(crate) struct FakeGateway {
    units: Mutex<Vec<UnitRecord>>,
    /// Error returned by the next `control` calls, if set.
    control_error: Mutex<Option<GatewayError>>,
    /// When true, `list_units` fails with `QueryFailed`.
    fail_list: Mutex<bool>,
    list_calls: AtomicUsize,
    control_calls: AtomicUsize,
}

impl FakeGateway {
    pub fn with_units(units: Vec<UnitRecord>) -> Self {
        Self {
            units: Mutex::new(units),
            ..Self::default()
        }
    }

    pub fn set_units(&self, units: Vec<UnitRecord>) {
        *self.units.lock().unwrap() = units;
    }

    pub fn fail_next_control(&self, error: GatewayError) {
        *self.control_error.lock().unwrap() = Some(error);
    }

    pub fn set_fail_list(&self, fail: bool) {
        *self.fail_list.lock().unwrap() = fail;
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn control_call_count(&self) -> usize {
        self.control_calls.load(Ordering::SeqCst)
    }
}

impl Gateway for FakeGateway {
    fn list_units(&self) -> Result<Vec<UnitRecord>, GatewayError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_list.lock().unwrap() {
            return Err(GatewayError::QueryFailed("scripted failure".to_string()));
        }
        Ok(self.units.lock().unwrap().clone())
    }

    fn control(&self, _unit: &str, _action: UnitAction) -> Result<(), GatewayError> {
        self.control_calls.fetch_add(1, Ordering::SeqCst);
        match self.control_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
