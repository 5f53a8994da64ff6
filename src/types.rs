//! Shared types and enums used across SARPROJ.
//! Includes `ProjectionDirection`, `CollisionPolicy` and `QuicklookKind`.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which way an image travels through the lookup rasters.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionDirection {
    /// Slant-range image gathered onto the ground-projected grid.
    SlantToGround,
    /// Ground-projected image scattered back onto the slant-range grid.
    GroundToSlant,
}

impl std::fmt::Display for ProjectionDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectionDirection::SlantToGround => write!(f, "slant_to_ground"),
            ProjectionDirection::GroundToSlant => write!(f, "ground_to_slant"),
        }
    }
}

/// Tie-break applied when several ground pixels scatter onto the same
/// slant-range pixel.
#[derive(
    Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The last contribution in row-major ground order wins.
    #[default]
    LastWrite,
    /// Average of the finite contributions.
    Mean,
}

impl std::fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollisionPolicy::LastWrite => write!(f, "last_write"),
            CollisionPolicy::Mean => write!(f, "mean"),
        }
    }
}

/// Physical quantity shown by a quicklook; selects the colour ramp.
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuicklookKind {
    Biomass,
    Height,
}

impl std::fmt::Display for QuicklookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuicklookKind::Biomass => write!(f, "biomass"),
            QuicklookKind::Height => write!(f, "height"),
        }
    }
}
