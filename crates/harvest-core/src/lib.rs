//! Session clock, tick cycle, and orchestration for the Harvest farm
//! simulation.
//!
//! This crate owns everything time-dependent: the per-tick transition,
//! win/loss evaluation, the state container that serializes ticks and
//! player commands, and the real-time loop that drives it.
//!
//! # Modules
//!
//! - [`clock`] -- Tick counter of one session.
//! - [`config`] -- Configuration loading from `harvest-config.yaml` into
//!   strongly-typed structs.
//! - [`controller`] -- [`FarmController`], the single owner of a session's
//!   state, and the [`FarmEvent`] stream it publishes.
//! - [`operator`] -- Pause, resume, speed, stop, and session bounds.
//! - [`outcome`] -- Win and loss predicates and the sticky latch.
//! - [`runner`] -- The async session loop.
//! - [`tick`] -- The per-tick growth, expiry, and arrival transition.
//!
//! [`FarmController`]: controller::FarmController
//! [`FarmEvent`]: controller::FarmEvent

pub mod clock;
pub mod config;
pub mod controller;
pub mod operator;
pub mod outcome;
pub mod runner;
pub mod tick;
