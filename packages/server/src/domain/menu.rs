//! Menu tree engine.
//!
//! The menu is authored as a nested tree ([`MenuNodeConfig`]) and flattened
//! once at startup into an id-indexed table ([`MenuTree`]). Every lookup after
//! that is a single hash-map access; nothing walks the tree per request.

use std::collections::HashMap;

use serde::Deserialize;

use super::error::MenuError;
use super::value_object::MenuNodeId;

/// Author-facing menu configuration (nested, tagged by `type`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MenuNodeConfig {
    Link {
        id: String,
        label: String,
        #[serde(alias = "link")]
        url: String,
    },
    Submenu {
        id: String,
        label: String,
        #[serde(default, alias = "submenu")]
        children: Vec<MenuNodeConfig>,
    },
    Info {
        id: String,
        label: String,
        #[serde(default)]
        text: String,
    },
    Image {
        id: String,
        label: String,
        #[serde(alias = "image_path")]
        image: String,
    },
}

impl MenuNodeConfig {
    fn id(&self) -> &str {
        match self {
            Self::Link { id, .. }
            | Self::Submenu { id, .. }
            | Self::Info { id, .. }
            | Self::Image { id, .. } => id,
        }
    }
}

/// How to treat an id that appears more than once in the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateIdPolicy {
    /// First definition in document order wins; later ones are skipped
    #[default]
    FirstWins,
    /// Any duplicate aborts the build
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuNodeType {
    Link,
    Submenu,
    Info,
    Image,
}

impl MenuNodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Submenu => "submenu",
            Self::Info => "info",
            Self::Image => "image",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuNodeKind {
    Link { url: String },
    /// Children are referenced by id; all of them are present in the index
    Submenu { children: Vec<MenuNodeId> },
    Info { text: String },
    Image { image_path: String },
}

/// Immutable indexed menu node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    pub id: MenuNodeId,
    pub label: String,
    pub kind: MenuNodeKind,
}

impl MenuNode {
    pub fn node_type(&self) -> MenuNodeType {
        match self.kind {
            MenuNodeKind::Link { .. } => MenuNodeType::Link,
            MenuNodeKind::Submenu { .. } => MenuNodeType::Submenu,
            MenuNodeKind::Info { .. } => MenuNodeType::Info,
            MenuNodeKind::Image { .. } => MenuNodeType::Image,
        }
    }

    pub fn entry(&self) -> MenuEntry {
        MenuEntry {
            id: self.id.clone(),
            label: self.label.clone(),
            node_type: self.node_type(),
        }
    }
}

/// Shallow `{id, label, type}` projection; never carries children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: MenuNodeId,
    pub label: String,
    pub node_type: MenuNodeType,
}

/// What a visitor is shown after selecting a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuView {
    Link {
        label: String,
        url: String,
    },
    Submenu {
        id: MenuNodeId,
        label: String,
        children: Vec<MenuEntry>,
    },
    Info {
        label: String,
        text: String,
    },
    Image {
        label: String,
        image_path: String,
    },
}

/// Result of [`MenuTree::build`]
#[derive(Debug)]
pub struct MenuBuild {
    pub tree: MenuTree,
    /// Ids whose later definitions were skipped, in encounter order
    pub skipped_duplicates: Vec<MenuNodeId>,
}

/// Flat, read-only menu index
#[derive(Debug, Clone, Default)]
pub struct MenuTree {
    top_level: Vec<MenuNodeId>,
    nodes: HashMap<MenuNodeId, MenuNode>,
}

impl MenuTree {
    /// Flatten `config` into the index.
    ///
    /// Nodes are visited depth-first in document order. Under
    /// [`DuplicateIdPolicy::FirstWins`] a node whose id is already taken is
    /// dropped together with its subtree and left out of its parent's
    /// children, so every listed id resolves to the node that was displayed.
    pub fn build(
        config: Vec<MenuNodeConfig>,
        policy: DuplicateIdPolicy,
    ) -> Result<MenuBuild, MenuError> {
        let mut tree = MenuTree::default();
        let mut skipped = Vec::new();

        for node in config {
            if let Some(id) = tree.index(node, policy, &mut skipped)? {
                tree.top_level.push(id);
            }
        }

        Ok(MenuBuild {
            tree,
            skipped_duplicates: skipped,
        })
    }

    fn index(
        &mut self,
        config: MenuNodeConfig,
        policy: DuplicateIdPolicy,
        skipped: &mut Vec<MenuNodeId>,
    ) -> Result<Option<MenuNodeId>, MenuError> {
        let id = MenuNodeId::new(config.id().to_string())?;
        if self.nodes.contains_key(&id) {
            return match policy {
                DuplicateIdPolicy::Reject => Err(MenuError::DuplicateId(id.as_str().to_string())),
                DuplicateIdPolicy::FirstWins => {
                    skipped.push(id);
                    Ok(None)
                }
            };
        }

        let (label, kind, children) = match config {
            MenuNodeConfig::Link { label, url, .. } => (label, MenuNodeKind::Link { url }, None),
            MenuNodeConfig::Submenu {
                label, children, ..
            } => (
                label,
                MenuNodeKind::Submenu {
                    children: Vec::new(),
                },
                Some(children),
            ),
            MenuNodeConfig::Info { label, text, .. } => {
                (label, MenuNodeKind::Info { text: text.trim().to_string() }, None)
            }
            MenuNodeConfig::Image { label, image, .. } => (
                label,
                MenuNodeKind::Image { image_path: image },
                None,
            ),
        };

        // Claim the id before descending so a child reusing its parent's id
        // counts as a duplicate.
        self.nodes.insert(
            id.clone(),
            MenuNode {
                id: id.clone(),
                label,
                kind,
            },
        );

        if let Some(children) = children {
            let mut child_ids = Vec::with_capacity(children.len());
            for child in children {
                if let Some(child_id) = self.index(child, policy, skipped)? {
                    child_ids.push(child_id);
                }
            }
            if let Some(MenuNode {
                kind: MenuNodeKind::Submenu { children },
                ..
            }) = self.nodes.get_mut(&id)
            {
                *children = child_ids;
            }
        }

        Ok(Some(id))
    }

    /// Top-level `{id, label, type}` list in configuration order
    pub fn lookup_top_level(&self) -> Vec<MenuEntry> {
        self.top_level
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .map(MenuNode::entry)
            .collect()
    }

    pub fn lookup_by_id(&self, id: &str) -> Result<&MenuNode, MenuError> {
        MenuNodeId::new(id.to_string())
            .ok()
            .and_then(|id| self.nodes.get(&id))
            .ok_or_else(|| MenuError::NotFound(id.to_string()))
    }

    /// Typed projection of `node` (one level of children for submenus)
    pub fn view(&self, node: &MenuNode) -> MenuView {
        match &node.kind {
            MenuNodeKind::Link { url } => MenuView::Link {
                label: node.label.clone(),
                url: url.clone(),
            },
            MenuNodeKind::Submenu { children } => MenuView::Submenu {
                id: node.id.clone(),
                label: node.label.clone(),
                children: children
                    .iter()
                    .filter_map(|id| self.nodes.get(id))
                    .map(MenuNode::entry)
                    .collect(),
            },
            MenuNodeKind::Info { text } => MenuView::Info {
                label: node.label.clone(),
                text: text.clone(),
            },
            MenuNodeKind::Image { image_path } => MenuView::Image {
                label: node.label.clone(),
                image_path: image_path.clone(),
            },
        }
    }

    /// Number of indexed nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
