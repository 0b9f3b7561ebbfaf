//! # Server Configuration
//!
//! Loaded once at startup from an optional TOML file, then patched by CLI
//! flags. Every field has a default, so an empty file is a valid config.

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;

use gridduel_shared::constants::{
    BOOSTED_DAMAGE, DIE_SIDES, HEAL_AMOUNT, MAX_CLIENTS, MAX_HP, MAX_POWER_UPS, SERVER_PORT,
    SPAWN_CHANCE,
};
use gridduel_shared::GRID_SIZE;

use crate::error::ConfigError;

/// Default per-client outbound queue depth.
pub const OUTBOUND_BUFFER: usize = 64;

/// Tunable gameplay numbers.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameRules {
    /// Maximum (and starting) hit points of a unit.
    pub max_hp: u32,
    /// Damage of a boosted attack.
    pub boosted_damage: u32,
    /// HP restored by a heal power-up.
    pub heal_amount: u32,
    /// Probability of a spawn attempt after each turn.
    pub spawn_chance: f64,
    /// Cap on active power-ups.
    pub max_power_ups: usize,
    /// Faces on a combat die.
    pub die_sides: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            max_hp: MAX_HP,
            boosted_damage: BOOSTED_DAMAGE,
            heal_amount: HEAL_AMOUNT,
            spawn_chance: SPAWN_CHANCE,
            max_power_ups: MAX_POWER_UPS,
            die_sides: DIE_SIDES,
        }
    }
}

/// Server configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address the gateway listens on.
    pub bind_address: SocketAddr,
    /// Maximum number of simultaneously connected clients.
    pub max_clients: usize,
    /// Per-client outbound queue depth before the client is dropped.
    pub outbound_buffer: usize,
    /// RNG seed. Entropy is used when absent.
    pub seed: Option<u64>,
    /// Gameplay numbers.
    pub rules: GameRules,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], SERVER_PORT)),
            max_clients: MAX_CLIENTS,
            outbound_buffer: OUTBOUND_BUFFER,
            seed: None,
            rules: GameRules::default(),
        }
    }
}

impl ServerConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`ServerConfig::from_toml`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Two players must always fit.
        if self.max_clients < 2 {
            return Err(ConfigError::Invalid(format!(
                "max_clients must be at least 2, got {}",
                self.max_clients
            )));
        }
        if self.outbound_buffer == 0 {
            return Err(ConfigError::Invalid("outbound_buffer must be at least 1".into()));
        }
        let rules = &self.rules;
        if !(0.0..=1.0).contains(&rules.spawn_chance) {
            return Err(ConfigError::Invalid(format!(
                "rules.spawn_chance must be within [0, 1], got {}",
                rules.spawn_chance
            )));
        }
        if rules.max_hp == 0 {
            return Err(ConfigError::Invalid("rules.max_hp must be at least 1".into()));
        }
        if rules.die_sides == 0 {
            return Err(ConfigError::Invalid("rules.die_sides must be at least 1".into()));
        }
        if rules.max_power_ups > GRID_SIZE * GRID_SIZE - 2 {
            return Err(ConfigError::Invalid(format!(
                "rules.max_power_ups must leave room for both units, got {}",
                rules.max_power_ups
            )));
        }
        Ok(())
    }
}
