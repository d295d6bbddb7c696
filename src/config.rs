//! Machine configuration.
//!
//! Configuration is plain data: it can be built in code or deserialized from
//! JSON supplied by the embedding application.
//!
//! ```rust
//! use stateful::config::{ForcedJumpPolicy, MachineConfig};
//!
//! let config = MachineConfig::from_json_str(r#"{ "name": "door", "forced_jump": "reject" }"#)
//!     .unwrap();
//!
//! assert_eq!(config.name, "door");
//! assert_eq!(config.forced_jump, ForcedJumpPolicy::Reject);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default machine name used in logs and snapshots.
pub const DEFAULT_MACHINE_NAME: &str = "state-machine";

/// Errors that can occur when loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse machine config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Machine name must not be empty")]
    EmptyName,
}

/// What a forced jump does when no state is active yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForcedJumpPolicy {
    /// Skip the exit hook (there is nothing to exit) and enter the target.
    #[default]
    SkipExit,

    /// Refuse the jump with [`FsmError::NoCurrentState`](crate::FsmError::NoCurrentState).
    Reject,
}

/// Settings of a [`StateMachine`](crate::StateMachine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MachineConfig {
    /// Name attached to every log event of the machine.
    pub name: String,

    /// Behavior of `set_current_state` before the machine has started.
    pub forced_jump: ForcedJumpPolicy,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MACHINE_NAME.to_string(),
            forced_jump: ForcedJumpPolicy::default(),
        }
    }
}

impl MachineConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn forced_jump(mut self, policy: ForcedJumpPolicy) -> Self {
        self.forced_jump = policy;
        self
    }

    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_fields() {
        let config = MachineConfig::from_json_str("{}").unwrap();

        assert_eq!(config, MachineConfig::default());
        assert_eq!(config.name, DEFAULT_MACHINE_NAME);
        assert_eq!(config.forced_jump, ForcedJumpPolicy::SkipExit);
    }

    #[test]
    fn policy_uses_kebab_case() {
        let config = MachineConfig::from_json_str(r#"{ "forced_jump": "skip-exit" }"#).unwrap();
        assert_eq!(config.forced_jump, ForcedJumpPolicy::SkipExit);

        let json = serde_json::to_string(&ForcedJumpPolicy::Reject).unwrap();
        assert_eq!(json, "\"reject\"");
    }

    #[test]
    fn blank_name_is_rejected() {
        let result = MachineConfig::from_json_str(r#"{ "name": "  " }"#);
        assert!(matches!(result, Err(ConfigError::EmptyName)));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = MachineConfig::from_json_str(r#"{ "name": "door", "history": true }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn builder_style_setters() {
        let config = MachineConfig::named("door").forced_jump(ForcedJumpPolicy::Reject);

        assert_eq!(config.name, "door");
        assert_eq!(config.forced_jump, ForcedJumpPolicy::Reject);
        assert!(config.validate().is_ok());
    }
}
