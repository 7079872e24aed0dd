//! Device action dispatch
//!
//! Quick-dial side actions next to the emergency button: place a call, share
//! the current location, capture an evidence photo. All of them are
//! fire-and-forget mocks; the sequencer never consumes their result and no
//! real device integration exists behind them.

use std::time::Duration;

use serde::Serialize;
use tokio::time::sleep;
use tracing::{debug, info};

/// A quick-dial emergency contact
#[derive(Debug, Clone, Serialize)]
pub struct EmergencyContact {
    pub name: &'static str,
    pub number: &'static str,
}

/// The contact table shown alongside the emergency button
pub fn emergency_contacts() -> Vec<EmergencyContact> {
    vec![
        EmergencyContact { name: "Police", number: "100" },
        EmergencyContact { name: "Medical", number: "108" },
        EmergencyContact { name: "Tourist Helpline", number: "1363" },
    ]
}

/// Side actions the host can trigger independently of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceAction {
    /// Dial the primary emergency contact
    Call,
    /// Share the current location with emergency contacts
    Locate,
    /// Capture an evidence photo
    Photo,
}

impl DeviceAction {
    /// Look up an action by its URL name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "call" => Some(Self::Call),
            "locate" => Some(Self::Locate),
            "photo" => Some(Self::Photo),
            _ => None,
        }
    }

    /// Human-readable label for responses and logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Call => "emergency call",
            Self::Locate => "location share",
            Self::Photo => "evidence photo",
        }
    }
}

/// Perform a device action. Fire-and-forget: callers spawn this and move on.
pub async fn dispatch_device_action(action: DeviceAction) {
    debug!("Dispatching {}", action.label());

    // Simulated device latency
    sleep(Duration::from_millis(250)).await;

    match action {
        DeviceAction::Call => {
            let contacts = emergency_contacts();
            let primary = &contacts[0];
            info!("Placing call to {} ({})", primary.name, primary.number);
        }
        DeviceAction::Locate => {
            info!("Sharing current location with emergency contacts");
        }
        DeviceAction::Photo => {
            info!("Capturing evidence photo");
        }
    }
}
