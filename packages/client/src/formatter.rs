//! Render server events for the terminal.

use genkan_server::infrastructure::dto::websocket::{
    MenuEntryDto, MessageDto, NoticeKindDto, ServerEvent, SessionSummaryDto, SummaryStateDto,
};
use genkan_shared::time::parse_rfc3339_utc;

const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format any decoded server event
    pub fn format_event(event: &ServerEvent) -> String {
        match event {
            ServerEvent::Connected { session_id } => {
                format!("\nConnected (session {})\n", session_id)
            }
            ServerEvent::Message { message } => format!("\n{}\n", Self::format_message(message)),
            ServerEvent::ChatHistory {
                session_id,
                messages,
            } => Self::format_history(session_id, messages),
            ServerEvent::MessageAdmin {
                session_id,
                message,
            } => format!("\n<{}> {}\n", session_id, Self::format_message(message)),
            ServerEvent::UpdateSessionList { sessions } => Self::format_session_list(sessions),
            ServerEvent::ShowMenu { menu } => Self::format_entries("Menu", menu),
            ServerEvent::ShowSubmenu {
                parent_label,
                submenu,
                ..
            } => {
                let mut output = Self::format_entries(parent_label, submenu);
                output.push_str("(/main to go back)\n");
                output
            }
            ServerEvent::ShowLink { label, url } => format!("\n{}: {}\n", label, url),
            ServerEvent::ShowInfo { label, text } => format!("\n{}\n  {}\n", label, text),
            ServerEvent::ShowImage { label, image_path } => {
                format!("\n{}: image at {}\n", label, image_path)
            }
            ServerEvent::Notice { kind, text } => {
                let marker = match kind {
                    NoticeKindDto::Validation => "!",
                    NoticeKindDto::NotFound => "?",
                };
                format!("\n{} {}\n", marker, text)
            }
            ServerEvent::SummaryStatus { state, message } => {
                let state = match state {
                    SummaryStateDto::Pending => "pending",
                    SummaryStateDto::Sent => "sent",
                    SummaryStateDto::Failed => "failed",
                };
                format!("\nSummary {}: {}\n", state, message)
            }
        }
    }

    /// One transcript line: `[HH:MM:SS] sender: text`
    pub fn format_message(message: &MessageDto) -> String {
        let time = parse_rfc3339_utc(&message.timestamp)
            .map(|dt| dt.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| message.timestamp.clone());

        let mut line = format!("[{}] {}: {}", time, message.sender, message.text);
        if let Some(audio_url) = &message.audio_url {
            if !message.text.is_empty() {
                line.push(' ');
            }
            line.push_str(&format!("(audio: {})", audio_url));
        }
        line
    }

    fn format_history(session_id: &str, messages: &[MessageDto]) -> String {
        let mut output = format!("\n\n{}\nTranscript of {}:\n", RULE, session_id);
        if messages.is_empty() {
            output.push_str("(No messages)\n");
        }
        for message in messages {
            output.push_str(&Self::format_message(message));
            output.push('\n');
        }
        output.push_str(RULE);
        output.push('\n');
        output
    }

    fn format_session_list(sessions: &[SessionSummaryDto]) -> String {
        let mut output = format!("\n\n{}\nActive sessions:\n", RULE);
        if sessions.is_empty() {
            output.push_str("(No active sessions)\n");
        }
        for session in sessions {
            output.push_str(&format!("{} - {}\n", session.session_id, session.name));
        }
        output.push_str(RULE);
        output.push('\n');
        output
    }

    fn format_entries(title: &str, entries: &[MenuEntryDto]) -> String {
        let mut output = format!("\n{}:\n", title);
        for entry in entries {
            output.push_str(&format!("  {:<16} {} [{}]\n", entry.id, entry.label, entry.r#type));
        }
        output
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when decoding fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn message(sender: &str, text: &str, audio_url: Option<&str>) -> MessageDto {
        MessageDto {
            message_id: "m-1".to_string(),
            text: text.to_string(),
            timestamp: "2023-01-01T09:30:15+00:00".to_string(),
            sender: sender.to_string(),
            audio_url: audio_url.map(str::to_string),
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_format_message_with_time() {
        // テスト項目: メッセージが時刻・送信者・本文で表示される
        // given (前提条件):
        let event = ServerEvent::Message {
            message: message("Ana", "hola", None),
        };

        // when (操作):
        let result = MessageFormatter::format_event(&event);

        // then (期待する結果):
        assert!(result.contains("[09:30:15] Ana: hola"));
    }

    #[test]
    fn test_format_audio_message() {
        // テスト項目: 音声メッセージは URL が表示される
        // given (前提条件):
        let dto = message("Genbot", "", Some("/static/audio/welcome.mp3"));

        // when (操作):
        let result = MessageFormatter::format_message(&dto);

        // then (期待する結果):
        assert_eq!(result, "[09:30:15] Genbot: (audio: /static/audio/welcome.mp3)");
    }

    #[test]
    fn test_format_unparseable_timestamp_is_kept() {
        // テスト項目: 解釈できないタイムスタンプはそのまま表示される
        // given (前提条件):
        let mut dto = message("Ana", "hi", None);
        dto.timestamp = "yesterday".to_string();

        // when (操作):
        let result = MessageFormatter::format_message(&dto);

        // then (期待する結果):
        assert_eq!(result, "[yesterday] Ana: hi");
    }

    #[test]
    fn test_format_admin_relay_shows_session() {
        // テスト項目: オペレーター向け中継にはセッション ID が付く
        // given (前提条件):
        let event = ServerEvent::MessageAdmin {
            session_id: "abc".to_string(),
            message: message("Ana", "help", None),
        };

        // when (操作):
        let result = MessageFormatter::format_event(&event);

        // then (期待する結果):
        assert!(result.contains("<abc> [09:30:15] Ana: help"));
    }

    #[test]
    fn test_format_empty_session_list() {
        // テスト項目: セッションが空の場合、適切なメッセージが表示される
        // given (前提条件):
        let event = ServerEvent::UpdateSessionList { sessions: vec![] };

        // when (操作):
        let result = MessageFormatter::format_event(&event);

        // then (期待する結果):
        assert!(result.contains("Active sessions:"));
        assert!(result.contains("(No active sessions)"));
    }

    #[test]
    fn test_format_submenu_lists_entries() {
        // テスト項目: サブメニューは各項目と戻り方が表示される
        // given (前提条件):
        let event = ServerEvent::ShowSubmenu {
            parent_id: "menu_asp".to_string(),
            parent_label: "Aspirantes".to_string(),
            submenu: vec![MenuEntryDto {
                id: "asp_info".to_string(),
                label: "Requisitos".to_string(),
                r#type: "info".to_string(),
            }],
        };

        // when (操作):
        let result = MessageFormatter::format_event(&event);

        // then (期待する結果):
        assert!(result.contains("Aspirantes:"));
        assert!(result.contains("asp_info"));
        assert!(result.contains("Requisitos [info]"));
        assert!(result.contains("/main"));
    }

    #[test]
    fn test_format_notice_and_summary_status() {
        // テスト項目: notice と summary_status が種別付きで表示される
        // given (前提条件):
        let notice = ServerEvent::Notice {
            kind: NoticeKindDto::NotFound,
            text: "Option not found.".to_string(),
        };
        let status = ServerEvent::SummaryStatus {
            state: SummaryStateDto::Failed,
            message: "no history".to_string(),
        };

        // when (操作):
        let notice = MessageFormatter::format_event(&notice);
        let status = MessageFormatter::format_event(&status);

        // then (期待する結果):
        assert!(notice.contains("? Option not found."));
        assert!(status.contains("Summary failed: no history"));
    }

    #[test]
    fn test_format_raw_message() {
        // テスト項目: 生メッセージが正しくフォーマットされる
        // given (前提条件):
        let text = "unknown message format";

        // when (操作):
        let result = MessageFormatter::format_raw_message(text);

        // then (期待する結果):
        assert!(result.contains("unknown message format"));
        assert!(result.contains("Received:"));
    }
}
