//! ユースケースのテスト用フィクスチャ
//!
//! 実際の `InMemorySessionStore` と `WebSocketMessagePusher` を組み合わせ、
//! 各チャンネルに届いた JSON フレームを検証できるようにします。

use std::sync::Arc;

use tokio::sync::mpsc;

use genkan_shared::time::{Clock, FixedClock};

use crate::{
    domain::{DisplayName, DuplicateIdPolicy, MenuTree, SessionId, SessionRepository},
    infrastructure::{
        menu_loader::parse_menu_configuration, message_pusher::WebSocketMessagePusher,
        repository::InMemorySessionStore,
    },
};

use super::{admin_sync::AdminSyncUseCase, router::BroadcastRouter};

pub const TEST_NOW: i64 = 1_700_000_000;

pub const TEST_MENU: &str = r#"[
    {"id": "menu_ambar", "type": "link", "label": "AMBAR", "url": "https://ambar.example"},
    {"id": "menu_asp", "type": "submenu", "label": "Aspirantes", "children": [
        {"id": "asp_info", "type": "info", "label": "Requisitos", "text": "Bring your ID."},
        {"id": "asp_link", "type": "link", "label": "Registro", "url": "https://registro.example"}
    ]},
    {"id": "menu_map", "type": "image", "label": "Mapa", "image": "/static/map.png"}
]"#;

pub fn sid(value: &str) -> SessionId {
    SessionId::new(value.to_string()).unwrap()
}

/// テスト用の受信チャンネル
pub struct TestChannel {
    pub session_id: SessionId,
    rx: mpsc::UnboundedReceiver<String>,
}

impl TestChannel {
    /// これまでに届いたフレームをすべて取り出す
    pub fn drain(&mut self) -> Vec<serde_json::Value> {
        let mut events = Vec::new();
        while let Ok(frame) = self.rx.try_recv() {
            events.push(serde_json::from_str(&frame).unwrap());
        }
        events
    }

    /// 送信側（pusher に登録された sender）が破棄されたか
    pub fn is_closed(&mut self) -> bool {
        matches!(
            self.rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        )
    }
}

pub struct Harness {
    pub clock: Arc<dyn Clock>,
    pub store: Arc<InMemorySessionStore>,
    pub router: Arc<BroadcastRouter>,
    pub admin_sync: Arc<AdminSyncUseCase>,
    pub menu: Arc<MenuTree>,
}

impl Harness {
    pub fn new() -> Self {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::from_unix_seconds(TEST_NOW));
        let store = Arc::new(InMemorySessionStore::new(clock.clone()));
        let router = Arc::new(BroadcastRouter::new(Arc::new(WebSocketMessagePusher::new())));
        let admin_sync = Arc::new(AdminSyncUseCase::new(store.clone(), router.clone()));
        let menu = Arc::new(parse_menu_configuration(TEST_MENU, DuplicateIdPolicy::FirstWins).unwrap());

        Self {
            clock,
            store,
            router,
            admin_sync,
            menu,
        }
    }

    /// チャンネルだけを登録（名前未登録の接続）
    pub async fn connect(&self, id: &str) -> TestChannel {
        let (tx, rx) = mpsc::unbounded_channel();
        self.router.register_client(sid(id), tx).await;
        TestChannel {
            session_id: sid(id),
            rx,
        }
    }

    /// 接続してレジストリにも登録済みのビジター
    pub async fn connect_visitor(&self, id: &str, name: &str) -> TestChannel {
        let channel = self.connect(id).await;
        self.store
            .register(sid(id), DisplayName::new(name.to_string()).unwrap())
            .await;
        channel
    }

    /// 接続してオペレーターとして購読済みのチャンネル
    pub async fn connect_operator(&self, id: &str) -> TestChannel {
        let channel = self.connect(id).await;
        assert!(self.router.subscribe_operator(&sid(id)).await);
        channel
    }
}
