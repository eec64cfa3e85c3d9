use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};
use crate::host::{CallbackKind, Capability, CommandHandler, Host, HostHandshake, API_VERSION};
use crate::registry::ActionHandles;
use crate::scripts::ScriptCache;
use crate::types::{ActionKind, CommandId, ScriptSlot, ToggleOutput, ToggleQuery};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Bridge
// ---------------------------------------------------------------------------

/// An active bridge instance. Constructed by [`Bridge::load`] once the host
/// handshake checks out; the host then drives it through [`CommandHandler`]
/// until it calls [`Bridge::unload`]. All handles and caches live here, not
/// in process-wide state, so a reload starts from a clean slate.
pub struct Bridge {
    host: Arc<dyn Host>,
    config: BridgeConfig,
    actions: ActionHandles,
    scripts: ScriptCache,
    diagnostics: bool,
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge").finish_non_exhaustive()
    }
}

impl Bridge {
    /// Validate the handshake, check required capabilities, and register the
    /// action surface. Any failure returns an error and the bridge stays
    /// unloaded; partial registrations are not rolled back because the host
    /// tears the whole bridge down on a failed load.
    pub fn load(
        host: Arc<dyn Host>,
        handshake: &HostHandshake,
        config: BridgeConfig,
    ) -> Result<Self> {
        if handshake.api_version != API_VERSION {
            return Err(BridgeError::HostIncompatible {
                expected: API_VERSION,
                got: handshake.api_version,
            });
        }

        for capability in Capability::required() {
            if !host.supports(*capability) {
                return Err(BridgeError::CapabilityMissing(*capability));
            }
        }

        let actions = ActionHandles::register(host.as_ref())?;

        for kind in [CallbackKind::CommandHook, CallbackKind::ToggleQuery] {
            if !host.install_callback(kind) {
                return Err(BridgeError::CallbackRejected(kind));
            }
        }

        tracing::info!(
            main = actions.id(ActionKind::LaunchUi),
            bake = actions.id(ActionKind::BakeLtc),
            artnet = actions.id(ActionKind::ToggleArtnet),
            osc = actions.id(ActionKind::ToggleOsc),
            "bridge active"
        );

        Ok(Self {
            diagnostics: host.supports(Capability::Diagnostics),
            host,
            config,
            actions,
            scripts: ScriptCache::new(),
        })
    }

    /// Unregister any resolved scripts and go back to unloaded. Cleanup is
    /// best effort and never fails.
    pub fn unload(mut self) {
        self.scripts
            .release_all(self.host.as_ref(), &self.config);
        tracing::info!("bridge unloaded");
    }

    /// Host-assigned handle for one of the registered actions.
    pub fn action_id(&self, kind: ActionKind) -> CommandId {
        self.actions.id(kind)
    }

    fn run_script(&mut self, slot: ScriptSlot) {
        match self.scripts.resolve(self.host.as_ref(), &self.config, slot) {
            Ok(id) => self.host.run_command(id, 0),
            Err(err) => {
                // Matched actions stay "handled"; the failure is diagnosed only.
                tracing::warn!(slot = %slot, error = %err, "script action dropped");
                self.diag(&format!("ReaTC: cannot run {} script", slot));
            }
        }
    }

    fn request_toggle(&self, output: ToggleOutput) {
        tracing::debug!(output = %output, "toggle requested");
        self.host.write_state(
            &self.config.command_section,
            output.command_key(),
            "1",
            self.config.persist_commands,
        );
    }

    fn diag(&self, message: &str) {
        if self.diagnostics {
            self.host.log(message);
        }
    }
}

impl CommandHandler for Bridge {
    fn try_handle(&mut self, command: CommandId) -> bool {
        let Some(kind) = self.actions.kind_of(command) else {
            return false;
        };
        if let Some(slot) = kind.script_slot() {
            self.run_script(slot);
        } else if let Some(output) = kind.toggle_output() {
            self.request_toggle(output);
        }
        true
    }

    fn query_toggle(&self, command: CommandId) -> ToggleQuery {
        let output = match self
            .actions
            .kind_of(command)
            .and_then(ActionKind::toggle_output)
        {
            Some(output) => output,
            None => return ToggleQuery::NotOurs,
        };

        let value = self
            .host
            .read_state(&self.config.state_section, output.state_key());
        match value {
            Some(v) if v.starts_with('1') => ToggleQuery::On,
            _ => ToggleQuery::Off,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
