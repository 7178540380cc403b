//! UseCase: メニューの参照（HTTP API 用）

use std::sync::Arc;

use crate::domain::{MenuEntry, MenuTree, MenuView};

use super::error::GetMenuNodeError;

pub struct GetMenuUseCase {
    menu: Arc<MenuTree>,
}

impl GetMenuUseCase {
    pub fn new(menu: Arc<MenuTree>) -> Self {
        Self { menu }
    }

    pub fn top_level(&self) -> Vec<MenuEntry> {
        self.menu.lookup_top_level()
    }

    pub fn node(&self, node_id: &str) -> Result<MenuView, GetMenuNodeError> {
        self.menu
            .lookup_by_id(node_id)
            .map(|node| self.menu.view(node))
            .map_err(|_| GetMenuNodeError::NotFound(node_id.to_string()))
    }
}
