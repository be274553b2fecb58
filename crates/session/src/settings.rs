use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A network node endpoint the console can target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub chain_id: String,
    pub url: String,
    pub default: bool,
}

/// Node registry. Same single-default invariant as accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsStore {
    pub nodes: Vec<Node>,
}

impl SettingsStore {
    /// Registry seeded for a fresh session: the stock testnet and mainnet
    /// nodes, testnet preselected.
    #[must_use]
    pub fn stock() -> Self {
        Self {
            nodes: vec![
                Node {
                    chain_id: "T".to_string(),
                    url: "https://testnodes.wavesnodes.com/".to_string(),
                    default: true,
                },
                Node {
                    chain_id: "W".to_string(),
                    url: "https://nodes.wavesplatform.com/".to_string(),
                    default: false,
                },
            ],
        }
    }

    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn remove_node(&mut self, index: usize) -> bool {
        if index >= self.nodes.len() {
            return false;
        }
        self.nodes.remove(index);
        true
    }

    /// Reassigns every node's default flag in one pass; only the node at
    /// `index` ends up marked.
    pub fn set_default_node(&mut self, index: usize) {
        for (i, node) in self.nodes.iter_mut().enumerate() {
            node.default = i == index;
        }
    }

    #[must_use]
    pub fn default_node(&self) -> Option<&Node> {
        self.nodes.iter().find(|node| node.default)
    }

    /// Environment injected into the scripting console: the default node's
    /// endpoint and chain id, or an empty mapping without a default node.
    #[must_use]
    pub fn console_env(&self) -> BTreeMap<String, String> {
        let Some(node) = self.default_node() else {
            return BTreeMap::new();
        };
        BTreeMap::from([
            ("API_BASE".to_string(), node.url.clone()),
            ("CHAIN_ID".to_string(), node.chain_id.clone()),
        ])
    }
}
