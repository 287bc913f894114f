//! Transit route finder for a community-built voxel rail network.
//!
//! A web service that answers: "what is the fastest way from this station
//! to that one?" over a map-published network of lines, interchanges, and
//! walkable gaps.

pub mod alias;
pub mod cache;
pub mod domain;
pub mod graph;
pub mod map;
pub mod overrides;
pub mod planner;
pub mod snapshot;
pub mod web;
