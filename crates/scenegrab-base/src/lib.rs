use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Stable identity of a scene node.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Below this magnitude a length or a ray/plane denominator counts as zero.
    pub linear: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self { linear: 1.0e-9 }
    }
}

impl Tolerance {
    pub fn is_zero(&self, value: f64) -> bool {
        value.abs() <= self.linear
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown scene node: {0}")]
    UnknownNode(NodeId),
    #[error("invalid collaborator: {0}")]
    InvalidCollaborator(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
