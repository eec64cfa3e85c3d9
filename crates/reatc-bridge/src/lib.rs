//! In-process bridge between a host's action dispatch and the ReaTC
//! companion scripts, with the host's namespaced key-value store as the
//! transport. The host loads the bridge with [`Bridge::load`], holds it as a
//! [`CommandHandler`], and drops it via [`Bridge::unload`].

pub mod bridge;
pub mod config;
pub mod error;
pub mod host;
pub mod registry;
pub mod scripts;
pub mod types;

pub use bridge::Bridge;
pub use config::BridgeConfig;
pub use error::{BridgeError, Result};
pub use host::{CallbackKind, Capability, CommandHandler, Host, HostHandshake, API_VERSION};
pub use types::{ActionKind, CommandId, ScriptSlot, ToggleOutput, ToggleQuery};
