//! Soul Engine - Risk Assessment & Persistent State
//!
//! This crate implements the assessment and state core of the Soul mental
//! health companion: emotion risk scoring, DASS-42 scoring, crisis detection,
//! streak and XP tracking, and durable per-user state with atomic updates and
//! corruption recovery.
//!
//! # Layout
//!
//! - `domain` - Pure scoring rules and aggregates
//! - `ports` - Storage and collaborator interfaces
//! - `adapters` - JSON file storage, HTTP/mock collaborators, Markdown reports
//! - `application` - Command and query handlers
//! - `config` - Environment-driven configuration and logging setup

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
