use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};
use crate::host::Host;
use crate::types::{CommandId, ScriptSlot};

// ---------------------------------------------------------------------------
// ScriptCache
// ---------------------------------------------------------------------------

/// Lazily resolved command handles for the two external scripts. Resolution
/// registers the script with the host as a side effect; `release_all` undoes
/// that at unload. Only successful handles are cached, so a failed resolution
/// is retried on the next trigger.
#[derive(Debug, Default)]
pub struct ScriptCache {
    ids: [CommandId; ScriptSlot::COUNT],
}

impl ScriptCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runnable handle for a slot, resolving it on first use.
    pub fn resolve(
        &mut self,
        host: &dyn Host,
        config: &BridgeConfig,
        slot: ScriptSlot,
    ) -> Result<CommandId> {
        let cached = self.ids[slot.index()];
        if cached > 0 {
            return Ok(cached);
        }

        let path = config.script_path(&host.resource_path(), slot);
        let id = host.register_script(true, &path);
        if id <= 0 {
            tracing::warn!(slot = %slot, path = %path.display(), "script registration rejected");
            return Err(BridgeError::ScriptUnresolved(slot));
        }

        tracing::debug!(slot = %slot, id, "script resolved");
        self.ids[slot.index()] = id;
        Ok(id)
    }

    pub fn resolved(&self, slot: ScriptSlot) -> bool {
        self.ids[slot.index()] > 0
    }

    /// Unregister every resolved script and reset the cache. Best effort:
    /// the host's answer is ignored.
    pub fn release_all(&mut self, host: &dyn Host, config: &BridgeConfig) {
        for slot in ScriptSlot::all() {
            if self.ids[slot.index()] > 0 {
                let path = config.script_path(&host.resource_path(), *slot);
                host.register_script(false, &path);
                self.ids[slot.index()] = 0;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
