use crate::error::Result;
use crate::types::ScriptSlot;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// BridgeConfig
// ---------------------------------------------------------------------------

/// Shared-state namespaces and script locations. Defaults match what the
/// companion scripts expect; a config file only needs the fields it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Namespace the bridge writes one-shot command flags into.
    #[serde(default = "default_command_section")]
    pub command_section: String,
    /// Namespace the external script reports toggle state into.
    #[serde(default = "default_state_section")]
    pub state_section: String,
    /// Script directory relative to the host resource path.
    #[serde(default = "default_script_dir")]
    pub script_dir: String,
    #[serde(default = "default_ui_script")]
    pub ui_script: String,
    #[serde(default = "default_bake_script")]
    pub bake_script: String,
    /// Whether command flags survive a host restart. Off: a stale toggle
    /// request must not fire on the next session.
    #[serde(default)]
    pub persist_commands: bool,
}

fn default_command_section() -> String {
    "ReaTC_CMD".to_string()
}

fn default_state_section() -> String {
    "ReaTC_STATE".to_string()
}

fn default_script_dir() -> String {
    "Scripts/ReaTC".to_string()
}

fn default_ui_script() -> String {
    "reatc.lua".to_string()
}

fn default_bake_script() -> String {
    "reatc_regions_to_ltc.lua".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            command_section: default_command_section(),
            state_section: default_state_section(),
            script_dir: default_script_dir(),
            ui_script: default_ui_script(),
            bake_script: default_bake_script(),
            persist_commands: false,
        }
    }
}

impl BridgeConfig {
    /// Load from a YAML file. An absent file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        let config: BridgeConfig = serde_yaml::from_str(&data)?;
        Ok(config)
    }

    pub fn script_file(&self, slot: ScriptSlot) -> &str {
        match slot {
            ScriptSlot::Ui => &self.ui_script,
            ScriptSlot::Bake => &self.bake_script,
        }
    }

    /// Full path of a script slot under the host resource directory.
    pub fn script_path(&self, resource_root: &Path, slot: ScriptSlot) -> PathBuf {
        resource_root.join(&self.script_dir).join(self.script_file(slot))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.command_section, "ReaTC_CMD");
        assert_eq!(config.state_section, "ReaTC_STATE");
        assert_eq!(config.ui_script, "reatc.lua");
        assert_eq!(config.bake_script, "reatc_regions_to_ltc.lua");
        assert!(!config.persist_commands);
    }

    #[test]
    fn load_absent_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = BridgeConfig::load(&dir.path().join("missing.yaml")).unwrap();
        assert_eq!(config.command_section, "ReaTC_CMD");
    }

    #[test]
    fn load_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bridge.yaml");
        std::fs::write(&path, "command_section: MY_CMD\npersist_commands: true\n").unwrap();

        let config = BridgeConfig::load(&path).unwrap();
        assert_eq!(config.command_section, "MY_CMD");
        assert!(config.persist_commands);
        assert_eq!(config.state_section, "ReaTC_STATE");
        assert_eq!(config.script_dir, "Scripts/ReaTC");
    }

    #[test]
    fn load_invalid_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bridge.yaml");
        std::fs::write(&path, "command_section: [unterminated").unwrap();
        assert!(BridgeConfig::load(&path).is_err());
    }

    #[test]
    fn script_paths() {
        let config = BridgeConfig::default();
        let root = Path::new("/opt/host");
        assert_eq!(
            config.script_path(root, ScriptSlot::Ui),
            PathBuf::from("/opt/host/Scripts/ReaTC/reatc.lua")
        );
        assert_eq!(
            config.script_path(root, ScriptSlot::Bake),
            PathBuf::from("/opt/host/Scripts/ReaTC/reatc_regions_to_ltc.lua")
        );
    }
}
