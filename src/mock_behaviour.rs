//! This module provides ways to tweak mocked storages, so that they can return errors on some tests

use std::error::Error;

/// This stores some behaviour tweaks, that describe how a mocked storage will behave during a given test
///
/// So that a functions fails _n_ times after _m_ initial successes, set `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every action will be allowed
    pub is_suspended: bool,

    // From the KeyValueStorage trait
    pub get_behaviour: (u32, u32),
    pub set_behaviour: (u32, u32),
    pub remove_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All actions will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            get_behaviour: (0, n_fails),
            set_behaviour: (0, n_fails),
            remove_behaviour: (0, n_fails),
        }
    }

    /// Only writes (`set` and `remove`) will fail, for `n_fails` times
    pub fn fail_writes(n_fails: u32) -> Self {
        Self {
            set_behaviour: (0, n_fails),
            remove_behaviour: (0, n_fails),
            ..Self::default()
        }
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_get(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.get_behaviour, "get")
    }
    pub fn can_set(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.set_behaviour, "set")
    }
    pub fn can_remove(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.remove_behaviour, "remove")
    }
}


/// Decide whether a storage operation described by `(remaining successes, remaining failures)` may run.
///
/// Successes are used up first, then failures. Once both are exhausted, every operation is allowed.
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), Box<dyn Error>> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 = value.0 - 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else {
        if remaining_failures > 0 {
            value.1 = value.1 - 1;
            log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
            Err(format!("Mocked behaviour requires this {} to fail this time. ({:?})", descr, value).into())
        } else {
            log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
            Ok(())
        }
    }
}
