//! Navigation menu items. Menus have their own recursive item model,
//! separate from element children.

use crate::id_generator::IdGenerator;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuItemKind {
    #[default]
    Link,
    /// Heading of a mega-menu column; its children are the column's links
    Column,
    PromoImage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub link: String,
    #[serde(rename = "type", default)]
    pub kind: MenuItemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn link(id: impl Into<String>, label: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            link: link.into(),
            kind: MenuItemKind::Link,
            image: None,
            children: Vec::new(),
        }
    }

    pub fn column(id: impl Into<String>, label: impl Into<String>, children: Vec<MenuItem>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            link: String::new(),
            kind: MenuItemKind::Column,
            image: None,
            children,
        }
    }

    pub fn promo_image(
        id: impl Into<String>,
        label: impl Into<String>,
        link: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            link: link.into(),
            kind: MenuItemKind::PromoImage,
            image: Some(image.into()),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<MenuItem>) -> Self {
        self.children = children;
        self
    }

    /// Copy of this item and its descendants with freshly minted ids
    pub fn reissue(&self, ids: &mut IdGenerator) -> MenuItem {
        MenuItem {
            id: ids.new_id(),
            label: self.label.clone(),
            link: self.link.clone(),
            kind: self.kind,
            image: self.image.clone(),
            children: self.children.iter().map(|c| c.reissue(ids)).collect(),
        }
    }
}
