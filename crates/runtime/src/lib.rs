//! Tick driver and collaborator adapters for the actor verb engine.
//!
//! This crate owns everything around `sim-core` that a host application needs
//! to run a level: the frame clock, the timer scheduler, the RNG seed, and the
//! dialog protocol that lets a level link retry after the player saves.
//! Consumers embed [`Simulation`] and feed it frame deltas and verbs.
//!
//! Modules are organized by responsibility:
//! - [`simulation`] hosts the tick driver
//! - [`config`] loads runtime configuration from TOML and the environment
//! - [`host`] provides ready-made collaborators that log or record requests
//! - [`error`] unifies the failures surfaced by the runtime API
pub mod config;
pub mod error;
pub mod host;
pub mod simulation;

pub use config::{ConfigError, ConfigLoader, RuntimeConfig};
pub use error::{Result, RuntimeError};
pub use host::{HostRequest, LoggingHost, RecordingHost};
pub use simulation::{Simulation, TickReport};
