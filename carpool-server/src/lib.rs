//! Carpool matching server.
//!
//! Given a set of drivers heading to a shared office and a companion
//! waiting somewhere along the way, finds the driver and meeting point
//! that minimise how far the companion has to go.

pub mod config;
pub mod domain;
pub mod graph;
pub mod matcher;
pub mod web;
