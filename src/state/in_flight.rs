// SPDX-License-Identifier: MPL-2.0

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Tracks which posts have a reaction request outstanding so a second click
/// does not send a duplicate request. Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    keys: Arc<Mutex<HashSet<String>>>,
}

impl InFlight {
    fn keys(&self) -> MutexGuard<'_, HashSet<String>> {
        self.keys.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Claim `key`. Returns `None` while another ticket for it is alive.
    pub fn try_begin(&self, key: &str) -> Option<InFlightTicket> {
        if !self.keys().insert(key.to_string()) {
            return None;
        }
        Some(InFlightTicket {
            keys: Arc::clone(&self.keys),
            key: key.to_string(),
        })
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.keys().contains(key)
    }
}

/// Releases its key when dropped.
#[derive(Debug)]
pub struct InFlightTicket {
    keys: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for InFlightTicket {
    fn drop(&mut self) {
        self.keys
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_claim_waits_for_release() {
        let guard = InFlight::default();
        let ticket = guard.try_begin("p1").unwrap();
        assert!(guard.is_pending("p1"));
        assert!(guard.try_begin("p1").is_none());
        assert!(guard.try_begin("p2").is_some());

        drop(ticket);
        assert!(!guard.is_pending("p1"));
        assert!(guard.try_begin("p1").is_some());
    }

    #[test]
    fn test_clones_share_claims() {
        let guard = InFlight::default();
        let other = guard.clone();
        let _ticket = guard.try_begin("p1").unwrap();
        assert!(other.try_begin("p1").is_none());
    }
}
