use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric command handle assigned by the host. Zero means "unassigned" /
/// "failed"; only positive handles are runnable.
pub type CommandId = i32;

// ---------------------------------------------------------------------------
// ActionDescriptor
// ---------------------------------------------------------------------------

/// What the host needs to register one action: a stable symbolic id and the
/// name shown in its command list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub command_id: &'static str,
    pub display_name: &'static str,
}

// ---------------------------------------------------------------------------
// ActionKind
// ---------------------------------------------------------------------------

/// The four actions the bridge exposes, in dispatch priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    LaunchUi,
    BakeLtc,
    ToggleArtnet,
    ToggleOsc,
}

impl ActionKind {
    pub const COUNT: usize = 4;

    pub fn all() -> &'static [ActionKind] {
        &[
            ActionKind::LaunchUi,
            ActionKind::BakeLtc,
            ActionKind::ToggleArtnet,
            ActionKind::ToggleOsc,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Symbolic command id registered with the host.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::LaunchUi => "_REATC_MAIN",
            ActionKind::BakeLtc => "_REATC_BAKE_LTC",
            ActionKind::ToggleArtnet => "_REATC_TOGGLE_ARTNET",
            ActionKind::ToggleOsc => "_REATC_TOGGLE_OSC",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ActionKind::LaunchUi => "ReaTC: Launch/toggle UI",
            ActionKind::BakeLtc => "ReaTC: Regions to LTC",
            ActionKind::ToggleArtnet => "ReaTC: Toggle Art-Net output",
            ActionKind::ToggleOsc => "ReaTC: Toggle OSC output",
        }
    }

    pub fn descriptor(self) -> ActionDescriptor {
        ActionDescriptor {
            command_id: self.as_str(),
            display_name: self.display_name(),
        }
    }

    /// The toggle output this action controls, if any.
    pub fn toggle_output(self) -> Option<ToggleOutput> {
        match self {
            ActionKind::ToggleArtnet => Some(ToggleOutput::Artnet),
            ActionKind::ToggleOsc => Some(ToggleOutput::Osc),
            _ => None,
        }
    }

    /// The script slot this action runs, if any.
    pub fn script_slot(self) -> Option<ScriptSlot> {
        match self {
            ActionKind::LaunchUi => Some(ScriptSlot::Ui),
            ActionKind::BakeLtc => Some(ScriptSlot::Bake),
            _ => None,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActionKind {
    type Err = crate::error::BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "_REATC_MAIN" => Ok(ActionKind::LaunchUi),
            "_REATC_BAKE_LTC" => Ok(ActionKind::BakeLtc),
            "_REATC_TOGGLE_ARTNET" => Ok(ActionKind::ToggleArtnet),
            "_REATC_TOGGLE_OSC" => Ok(ActionKind::ToggleOsc),
            _ => Err(crate::error::BridgeError::UnknownAction(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ScriptSlot
// ---------------------------------------------------------------------------

/// Logical index into the fixed list of two external scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptSlot {
    Ui,
    Bake,
}

impl ScriptSlot {
    pub const COUNT: usize = 2;

    pub fn all() -> &'static [ScriptSlot] {
        &[ScriptSlot::Ui, ScriptSlot::Bake]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScriptSlot::Ui => "ui",
            ScriptSlot::Bake => "bake",
        }
    }
}

impl fmt::Display for ScriptSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ToggleOutput
// ---------------------------------------------------------------------------

/// The two toggleable outputs mirrored through the shared state store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutput {
    Artnet,
    Osc,
}

impl ToggleOutput {
    /// Key the external script writes its current on/off state under.
    pub fn state_key(self) -> &'static str {
        match self {
            ToggleOutput::Artnet => "artnet",
            ToggleOutput::Osc => "osc",
        }
    }

    /// Key the bridge writes the one-shot toggle request under.
    pub fn command_key(self) -> &'static str {
        match self {
            ToggleOutput::Artnet => "toggle_artnet",
            ToggleOutput::Osc => "toggle_osc",
        }
    }
}

impl fmt::Display for ToggleOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.state_key())
    }
}

// ---------------------------------------------------------------------------
// ToggleQuery
// ---------------------------------------------------------------------------

/// Answer to a host toggle-state query. `NotOurs` tells the host to consult
/// other sources for the display state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleQuery {
    On,
    Off,
    NotOurs,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
