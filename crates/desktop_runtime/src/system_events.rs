//! Bounded audit trail of app lifecycle actions shown in the taskbar activity flyout.

use std::collections::VecDeque;

use desktop_app_contract::AppIcon;
use platform_host::clock_time_at;
use serde::{Deserialize, Serialize};

/// Number of events retained; older events are dropped first.
pub const SYSTEM_EVENT_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemEvent {
    /// Wall-clock `HH:MM` at the time of the event.
    pub time: String,
    pub app: String,
    pub icon: AppIcon,
    pub action: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemEventLog {
    events: VecDeque<SystemEvent>,
}

impl SystemEventLog {
    pub fn record(&mut self, app: &str, icon: &AppIcon, action: &str, unix_ms: u64) {
        if self.events.len() == SYSTEM_EVENT_LIMIT {
            self.events.pop_front();
        }
        self.events.push_back(SystemEvent {
            time: clock_time_at(unix_ms).hh_mm(),
            app: app.to_string(),
            icon: icon.clone(),
            action: action.to_string(),
            timestamp: unix_ms,
        });
    }

    /// Events oldest first.
    pub fn events(&self) -> impl DoubleEndedIterator<Item = &SystemEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
