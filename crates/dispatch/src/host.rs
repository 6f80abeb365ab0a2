use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use shared::{
    domain::TargetId,
    protocol::{Coordinates, TouchPoint},
};
use tracing::debug;

pub const NATIVE_TOUCH_LIST_ENV: &str = "FAKETOUCH_NATIVE_TOUCH_LIST";
pub const TOUCH_LIST_QUIRK_ENV: &str = "FAKETOUCH_TOUCH_LIST_QUIRK";

static DETECTED: OnceLock<HostCapabilities> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostCapabilities {
    pub native_touch_list: bool,
    /// Known-broken native touch lists.
    pub touch_list_quirk: bool,
}

impl HostCapabilities {
    /// Probed on first call and cached for the rest of the process.
    pub fn detected() -> Self {
        *DETECTED.get_or_init(|| {
            let detected = Self {
                native_touch_list: env_flag(NATIVE_TOUCH_LIST_ENV),
                touch_list_quirk: env_flag(TOUCH_LIST_QUIRK_ENV),
            };
            debug!(?detected, "probed host capabilities");
            detected
        })
    }

    pub fn prefers_native_touch_list(self) -> bool {
        self.native_touch_list && !self.touch_list_quirk
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| parse_flag(&value))
        .unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Must produce the same field values as the structural list.
pub trait TouchListFactory: Send + Sync {
    fn create_touch(&self, target: &TargetId, identifier: usize, x: i64, y: i64) -> TouchPoint;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralTouchList;

impl TouchListFactory for StructuralTouchList {
    fn create_touch(&self, target: &TargetId, identifier: usize, x: i64, y: i64) -> TouchPoint {
        TouchPoint {
            identifier,
            position: Coordinates::at(x, y),
            target: target.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quirk_suppresses_native_touch_lists() {
        let host = HostCapabilities {
            native_touch_list: true,
            touch_list_quirk: true,
        };
        assert!(!host.prefers_native_touch_list());
        assert!(HostCapabilities {
            touch_list_quirk: false,
            ..host
        }
        .prefers_native_touch_list());
    }

    #[test]
    fn flag_values_are_case_insensitive() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" 1 "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn detection_is_cached() {
        assert_eq!(HostCapabilities::detected(), HostCapabilities::detected());
    }
}
