use crate::types::{ActionDescriptor, CommandId, ToggleQuery};
use std::fmt;
use std::path::{Path, PathBuf};

/// Host API revision this bridge is built against. A handshake carrying any
/// other value aborts loading before side effects are attempted.
pub const API_VERSION: u32 = 0x20E;

// ---------------------------------------------------------------------------
// Handshake
// ---------------------------------------------------------------------------

/// Version record the host hands over when it loads the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostHandshake {
    pub api_version: u32,
}

impl HostHandshake {
    pub fn current() -> Self {
        Self {
            api_version: API_VERSION,
        }
    }
}

// ---------------------------------------------------------------------------
// Capability / CallbackKind
// ---------------------------------------------------------------------------

/// Named host operations the bridge depends on. All but `Diagnostics` are
/// mandatory at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    RunCommand,
    ResourcePath,
    ScriptRegistry,
    StateRead,
    StateWrite,
    StateDelete,
    Diagnostics,
}

impl Capability {
    pub fn required() -> &'static [Capability] {
        &[
            Capability::RunCommand,
            Capability::ResourcePath,
            Capability::ScriptRegistry,
            Capability::StateRead,
            Capability::StateWrite,
            Capability::StateDelete,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::RunCommand => "run_command",
            Capability::ResourcePath => "resource_path",
            Capability::ScriptRegistry => "script_registry",
            Capability::StateRead => "state_read",
            Capability::StateWrite => "state_write",
            Capability::StateDelete => "state_delete",
            Capability::Diagnostics => "diagnostics",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two callbacks the bridge installs into the host's dispatch tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackKind {
    CommandHook,
    ToggleQuery,
}

impl CallbackKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CallbackKind::CommandHook => "command_hook",
            CallbackKind::ToggleQuery => "toggle_query",
        }
    }
}

impl fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// Capability provider injected at load and dropped at unload. All calls are
/// synchronous and assumed fast; the host drives the bridge on a single
/// thread.
pub trait Host {
    /// Run a previously resolved command.
    fn run_command(&self, id: CommandId, flag: i32);

    /// Base directory for host-managed resources (scripts live below it).
    fn resource_path(&self) -> PathBuf;

    /// Add (`true`) or remove (`false`) a script registration for the given
    /// path. Returns the assigned command handle; zero or negative means the
    /// registration was rejected.
    fn register_script(&self, add: bool, path: &Path) -> CommandId;

    /// Write a value into the shared state store.
    fn write_state(&self, section: &str, key: &str, value: &str, persist: bool);

    /// Read a value from the shared state store. `None` when unset.
    fn read_state(&self, section: &str, key: &str) -> Option<String>;

    /// Remove a key from the shared state store.
    fn delete_state(&self, section: &str, key: &str, persist: bool);

    /// Register a named action. Zero means the host rejected it.
    fn register_action(&self, descriptor: &ActionDescriptor) -> CommandId;

    /// Install one of the bridge's callbacks into the host dispatch table.
    fn install_callback(&self, kind: CallbackKind) -> bool;

    /// Capability presence probe, checked once at load.
    fn supports(&self, capability: Capability) -> bool;

    /// Host-side diagnostic line. Only called when `Diagnostics` is
    /// supported.
    fn log(&self, message: &str);
}

// ---------------------------------------------------------------------------
// CommandHandler
// ---------------------------------------------------------------------------

/// The surface the host holds once the bridge is active. `try_handle` is
/// invoked for every triggered command; `query_toggle` when the host renders
/// toggle indicators.
pub trait CommandHandler {
    /// Returns true when the command belongs to this bridge and was acted
    /// on. False tells the host to continue normal dispatch.
    fn try_handle(&mut self, command: CommandId) -> bool;

    /// Current display state for a toggle command.
    fn query_toggle(&self, command: CommandId) -> ToggleQuery;
}

// ---------------------------------------------------------------------------
// Fake host (unit tests)
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    /// Recording in-memory host. Action handles are assigned sequentially
    /// from `next_action_id`; setting it to zero makes every registration
    /// fail. `script_id` is handed out (and incremented) per successful
    /// script registration; zero or negative simulates rejection.
    pub struct FakeHost {
        pub resource_dir: PathBuf,
        pub missing: Vec<Capability>,
        pub reject_callbacks: bool,
        pub next_action_id: Cell<CommandId>,
        pub script_id: Cell<CommandId>,
        pub store: RefCell<HashMap<(String, String), String>>,
        pub actions: RefCell<Vec<&'static str>>,
        pub callbacks: RefCell<Vec<CallbackKind>>,
        pub script_calls: RefCell<Vec<(bool, PathBuf)>>,
        pub run_calls: RefCell<Vec<(CommandId, i32)>>,
        pub writes: RefCell<Vec<(String, String, String, bool)>>,
        pub logs: RefCell<Vec<String>>,
    }

    impl FakeHost {
        pub fn new() -> Self {
            Self {
                resource_dir: PathBuf::from("/opt/host"),
                missing: Vec::new(),
                reject_callbacks: false,
                next_action_id: Cell::new(101),
                script_id: Cell::new(9001),
                store: RefCell::new(HashMap::new()),
                actions: RefCell::new(Vec::new()),
                callbacks: RefCell::new(Vec::new()),
                script_calls: RefCell::new(Vec::new()),
                run_calls: RefCell::new(Vec::new()),
                writes: RefCell::new(Vec::new()),
                logs: RefCell::new(Vec::new()),
            }
        }

        /// Seed the shared store the way the external script would.
        pub fn set_state(&self, section: &str, key: &str, value: &str) {
            self.store
                .borrow_mut()
                .insert((section.to_string(), key.to_string()), value.to_string());
        }

        pub fn add_calls(&self) -> usize {
            self.script_calls.borrow().iter().filter(|(a, _)| *a).count()
        }

        pub fn remove_calls(&self) -> usize {
            self.script_calls.borrow().iter().filter(|(a, _)| !*a).count()
        }
    }

    impl Host for FakeHost {
        fn run_command(&self, id: CommandId, flag: i32) {
            self.run_calls.borrow_mut().push((id, flag));
        }

        fn resource_path(&self) -> PathBuf {
            self.resource_dir.clone()
        }

        fn register_script(&self, add: bool, path: &Path) -> CommandId {
            self.script_calls
                .borrow_mut()
                .push((add, path.to_path_buf()));
            if !add {
                return 0;
            }
            let id = self.script_id.get();
            if id > 0 {
                self.script_id.set(id + 1);
            }
            id
        }

        fn write_state(&self, section: &str, key: &str, value: &str, persist: bool) {
            self.writes.borrow_mut().push((
                section.to_string(),
                key.to_string(),
                value.to_string(),
                persist,
            ));
            self.set_state(section, key, value);
        }

        fn read_state(&self, section: &str, key: &str) -> Option<String> {
            self.store
                .borrow()
                .get(&(section.to_string(), key.to_string()))
                .cloned()
        }

        fn delete_state(&self, section: &str, key: &str, _persist: bool) {
            self.store
                .borrow_mut()
                .remove(&(section.to_string(), key.to_string()));
        }

        fn register_action(&self, descriptor: &ActionDescriptor) -> CommandId {
            self.actions.borrow_mut().push(descriptor.command_id);
            let id = self.next_action_id.get();
            if id > 0 {
                self.next_action_id.set(id + 1);
            }
            id
        }

        fn install_callback(&self, kind: CallbackKind) -> bool {
            self.callbacks.borrow_mut().push(kind);
            !self.reject_callbacks
        }

        fn supports(&self, capability: Capability) -> bool {
            !self.missing.contains(&capability)
        }

        fn log(&self, message: &str) {
            self.logs.borrow_mut().push(message.to_string());
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_is_optional() {
        assert!(!Capability::required().contains(&Capability::Diagnostics));
        assert_eq!(Capability::required().len(), 6);
    }

    #[test]
    fn current_handshake_matches_api_version() {
        assert_eq!(HostHandshake::current().api_version, API_VERSION);
    }
}
