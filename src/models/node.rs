use serde::{Deserialize, Serialize};
use crate::constants::DEFAULT_PLATFORM_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeType {
    Station,
    Interchange,
    Depot,
    Junction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub node_type: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<u32>,
}

impl Node {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            node_type,
            platforms: None,
        }
    }

    #[must_use]
    pub fn with_platforms(mut self, platforms: u32) -> Self {
        self.platforms = Some(platforms);
        self
    }

    /// Platform count used for capacity, falling back to the network default
    #[must_use]
    pub fn platform_count(&self) -> u32 {
        self.platforms.unwrap_or(DEFAULT_PLATFORM_COUNT)
    }

    #[must_use]
    pub fn is_interchange(&self) -> bool {
        matches!(self.node_type, NodeType::Interchange)
    }
}
