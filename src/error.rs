use thiserror::Error as ThisError;

use crate::node::NodeId;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("graph has no nodes")]
    EmptyGraph,
    #[error("invalid sample size: requested {requested} of {available} nodes")]
    InvalidSampleSize { requested: usize, available: usize },
    #[error("start node {0} is not in the sampled node set")]
    InvalidStartNode(NodeId),
    #[error("no path from {from} to {to}")]
    NoPath { from: NodeId, to: NodeId },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }
}
