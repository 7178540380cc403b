//! UseCase: メニュー操作
//!
//! 選択のたびに ID で独立に検索します（サーバー側はナビゲーション状態を持たない）。
//! 見つからない ID はビジターにだけ `not_found` notice を返し、
//! オペレーターには成功した選択だけが通知されます。

use std::sync::Arc;

use genkan_shared::time::Clock;

use crate::domain::{
    DisplayName, MenuEntry, MenuTree, MenuView, Message, NoticeKind, OutboundEvent,
    SessionId, SessionRepository, Timestamp,
};

use super::{error::NavigateMenuError, router::BroadcastRouter};

const OPTION_NOT_FOUND: &str = "Option not found.";

pub struct NavigateMenuUseCase {
    session_repository: Arc<dyn SessionRepository>,
    router: Arc<BroadcastRouter>,
    menu: Arc<MenuTree>,
    clock: Arc<dyn Clock>,
}

impl NavigateMenuUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        router: Arc<BroadcastRouter>,
        menu: Arc<MenuTree>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            session_repository,
            router,
            menu,
            clock,
        }
    }

    /// メニュー項目（トップレベル・サブメニューとも）を選択
    pub async fn select_option(
        &self,
        session_id: SessionId,
        node_id: String,
    ) -> Result<MenuView, NavigateMenuError> {
        self.session_repository.touch(&session_id).await;

        let node = match self.menu.lookup_by_id(&node_id) {
            Ok(node) => node,
            Err(e) => {
                tracing::debug!("Session '{}' selected an unknown option: {}", session_id, e);
                self.router
                    .notify(&session_id, NoticeKind::NotFound, OPTION_NOT_FOUND)
                    .await;
                return Err(NavigateMenuError::OptionNotFound(node_id));
            }
        };

        let view = self.menu.view(node);
        self.router
            .deliver_to_session(&session_id, OutboundEvent::ShowMenuNode(view.clone()))
            .await;

        let name = self.display_name(&session_id).await;
        let notice = Message::system_notice(
            format!("{name} selected '{}'", node.label),
            Timestamp::new(self.clock.now_utc()),
        );
        self.router.relay_to_operators(&session_id, notice).await;

        Ok(view)
    }

    /// トップレベルメニューを再表示
    pub async fn return_to_main_menu(&self, session_id: SessionId) -> Vec<MenuEntry> {
        self.session_repository.touch(&session_id).await;

        let entries = self.menu.lookup_top_level();
        self.router
            .deliver_to_session(&session_id, OutboundEvent::ShowMenu(entries.clone()))
            .await;
        entries
    }

    async fn display_name(&self, session_id: &SessionId) -> DisplayName {
        self.session_repository
            .get(session_id)
            .await
            .map(|session| session.display_name)
            .unwrap_or_else(DisplayName::guest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TranscriptRepository;
    use crate::usecase::test_support::{Harness, sid};

    fn create_usecase(harness: &Harness) -> NavigateMenuUseCase {
        NavigateMenuUseCase::new(
            harness.store.clone(),
            harness.router.clone(),
            harness.menu.clone(),
            harness.clock.clone(),
        )
    }

    #[tokio::test]
    async fn test_select_unknown_option() {
        // テスト項目: 存在しない ID はビジターにだけ not_found notice が届き、トランスクリプトは変化しない
        // given (前提条件):
        let harness = Harness::new();
        let usecase = create_usecase(&harness);
        let mut visitor = harness.connect_visitor("s1", "Ana").await;
        let mut operator = harness.connect_operator("op").await;

        // when (操作):
        let result = usecase
            .select_option(sid("s1"), "does_not_exist".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(NavigateMenuError::OptionNotFound("does_not_exist".to_string()))
        );
        let events = visitor.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["type"], "notice");
        assert_eq!(events[0]["kind"], "not_found");
        assert!(operator.drain().is_empty());
        assert!(harness.store.fetch(&sid("s1")).await.is_empty());
    }

    #[tokio::test]
    async fn test_select_submenu_returns_one_level() {
        // テスト項目: サブメニューの選択で直下の子だけが返る
        // given (前提条件):
        let harness = Harness::new();
        let usecase = create_usecase(&harness);
        let mut visitor = harness.connect_visitor("s1", "Ana").await;
        let mut operator = harness.connect_operator("op").await;

        // when (操作):
        let view = usecase
            .select_option(sid("s1"), "menu_asp".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert!(matches!(view, MenuView::Submenu { ref children, .. } if children.len() == 2));
        let events = visitor.drain();
        assert_eq!(events[0]["type"], "show_submenu");
        assert_eq!(events[0]["parent_id"], "menu_asp");
        assert_eq!(events[0]["parent_label"], "Aspirantes");
        assert_eq!(events[0]["submenu"][0]["type"], "info");

        let relayed = operator.drain();
        assert_eq!(relayed.len(), 1);
        assert_eq!(relayed[0]["message"]["text"], "Ana selected 'Aspirantes'");
    }

    #[tokio::test]
    async fn test_select_each_leaf_type() {
        // テスト項目: 種類ごとに対応する show_* イベントが届く
        // given (前提条件):
        let harness = Harness::new();
        let usecase = create_usecase(&harness);
        let mut visitor = harness.connect_visitor("s1", "Ana").await;
        let cases = [
            ("menu_ambar", "show_link", "url", "https://ambar.example"),
            ("asp_info", "show_info", "text", "Bring your ID."),
            ("menu_map", "show_image", "image_path", "/static/map.png"),
        ];

        for (id, expected_type, field, value) in cases {
            // when (操作):
            usecase.select_option(sid("s1"), id.to_string()).await.unwrap();

            // then (期待する結果):
            let events = visitor.drain();
            assert_eq!(events.len(), 1, "{id}");
            assert_eq!(events[0]["type"], expected_type);
            assert_eq!(events[0][field], value);
        }
    }

    #[tokio::test]
    async fn test_return_to_main_menu() {
        // テスト項目: メインメニューに戻るとトップレベル一覧が再送される
        // given (前提条件):
        let harness = Harness::new();
        let usecase = create_usecase(&harness);
        let mut visitor = harness.connect_visitor("s1", "Ana").await;

        // when (操作):
        let entries = usecase.return_to_main_menu(sid("s1")).await;

        // then (期待する結果):
        assert_eq!(entries.len(), 3);
        let events = visitor.drain();
        assert_eq!(events[0]["type"], "show_menu");
        assert_eq!(events[0]["menu"].as_array().unwrap().len(), 3);
    }
}
