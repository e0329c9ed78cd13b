//! Core state store of TrafficFlow Pro.
//!
//! All domain data (routes, emergency vehicles, priority corridors, traffic
//! signals, multi-modal journeys, simulations, reports) lives in memory in a
//! single [`store::TrafficStore`]. Mutations happen through synchronous
//! actions and simulated-latency asynchronous actions; a whitelisted subset
//! of the state is snapshotted to local storage after every mutation and
//! merged back over fresh seed data at startup.

pub mod config;
pub mod export;
pub mod model;
pub mod persistence;
pub mod seed;
pub mod store;
