//! The routable transit graph and its builder.

mod build;
mod types;

pub use build::{
    BuildConfig, BuildError, DEFAULT_CHANGE_PENALTY_SECS, DEFAULT_MAX_WILD_DISTANCE, GraphBuilder,
    TRANSFER_WALK_SPEED, WILD_WALK_SPEED,
};
pub use types::{EdgeKind, GraphEdge, NodeIdx, Platform, TransitGraph};
