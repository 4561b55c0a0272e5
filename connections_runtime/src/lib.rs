#![forbid(unsafe_code)]

//! Connections — Runtime
//!
//! Wraps the deterministic kernel with persistence, streak tracking,
//! daily-session orchestration, share text and fun facts.
//!
//! No game rules live here. Transitions and invariants are delegated to
//! the kernel; this crate only reacts to what the kernel reports.

pub mod error;
pub mod store;
pub mod proto_types;
pub mod file_store;
pub mod progress;
pub mod streaks;
pub mod clock;
pub mod config;
pub mod share;
pub mod facts;
pub mod session;
