//! Omni Coach - productivity coaching backend.
//!
//! Plans each day around the user's calendar and tasks, listens for
//! check-ins and drift, answers with nudges, and turns the week into an
//! Omni Score with badges and insights.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
