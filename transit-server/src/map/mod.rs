//! Upstream map data source.
//!
//! The transit mod's online map exposes the whole network as one JSON
//! document: stations (with interchange links), routes (ordered platform
//! stops with per-segment travel milliseconds), and placed positions.
//! This module fetches it, validates it, and produces the immutable
//! [`RawNetworkModel`] everything downstream consumes.

mod client;
mod convert;
mod error;
mod mock;
mod model;
mod types;

pub use client::{MapClient, MapClientConfig, MapSource};
pub use convert::convert;
pub use error::{MapError, ParseError};
pub use mock::{MockMapSource, sample_network};
pub use model::RawNetworkModel;
pub use types::{MapData, MapResponse, RouteDto, RouteStopDto, StationDto};
