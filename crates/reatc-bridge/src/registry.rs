use crate::error::{BridgeError, Result};
use crate::host::Host;
use crate::types::{ActionKind, CommandId};

// ---------------------------------------------------------------------------
// ActionHandles
// ---------------------------------------------------------------------------

/// Host-assigned handles for the four registered actions. Filled exactly once
/// at load; inside the dispatch callbacks the handle is the only identity
/// available, so all lookups go through this table.
#[derive(Debug, Clone, Copy)]
pub struct ActionHandles {
    ids: [CommandId; ActionKind::COUNT],
}

impl ActionHandles {
    /// Register every action with the host. A zero handle aborts: the bridge
    /// must not go active with an unregistered action.
    pub fn register(host: &dyn Host) -> Result<Self> {
        let mut ids = [0; ActionKind::COUNT];
        for kind in ActionKind::all() {
            let id = host.register_action(&kind.descriptor());
            if id == 0 {
                return Err(BridgeError::ActionRegistrationFailed(*kind));
            }
            ids[kind.index()] = id;
        }
        Ok(Self { ids })
    }

    pub fn id(&self, kind: ActionKind) -> CommandId {
        self.ids[kind.index()]
    }

    /// Which action a host command handle belongs to, if any. Compared in
    /// fixed priority order; handles are unique so order only affects
    /// comparison count.
    pub fn kind_of(&self, id: CommandId) -> Option<ActionKind> {
        ActionKind::all()
            .iter()
            .copied()
            .find(|kind| self.ids[kind.index()] == id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
