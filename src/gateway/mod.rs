//! Orchestration layer: the per-cycle dispatcher and the components it
//! drives (activity indicator, bit timing reconfigurator), their
//! configuration, and an async harness around the cycle.
pub mod activity;
pub mod config;
pub mod dispatcher;
pub mod reconfigure;
pub mod runner;
