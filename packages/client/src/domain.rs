//! Domain logic for client-side operations.
//!
//! Pure functions without side effects, so they can be tested directly.

use genkan_server::infrastructure::dto::websocket::ClientEvent;

use crate::error::ClientError;

/// Who is on the other end of the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Visitor { name: String },
    Operator,
}

impl Role {
    /// Readline prompt for this role
    pub fn prompt(&self) -> String {
        match self {
            Role::Visitor { name } => format!("{}> ", name),
            Role::Operator => "operator> ".to_string(),
        }
    }

    /// Events sent right after every (re)connection
    pub fn handshake(&self) -> Vec<ClientEvent> {
        match self {
            Role::Visitor { name } => vec![ClientEvent::RegisterName {
                name: Some(name.clone()),
            }],
            Role::Operator => vec![ClientEvent::OperatorSubscribe],
        }
    }
}

/// Check if the client should exit immediately based on the error type.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::InvalidUrl(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visitor_handshake_registers_name() {
        // テスト項目: ビジターは接続直後に名前を登録する
        // given (前提条件):
        let role = Role::Visitor {
            name: "Ana".to_string(),
        };

        // when (操作):
        let events = role.handshake();

        // then (期待する結果):
        assert_eq!(
            events,
            vec![ClientEvent::RegisterName {
                name: Some("Ana".to_string())
            }]
        );
        assert_eq!(role.prompt(), "Ana> ");
    }

    #[test]
    fn test_operator_handshake_subscribes() {
        // テスト項目: オペレーターは接続直後に購読を開始する
        // given (前提条件):
        let role = Role::Operator;

        // when (操作):
        let events = role.handshake();

        // then (期待する結果):
        assert_eq!(events, vec![ClientEvent::OperatorSubscribe]);
    }

    #[test]
    fn test_should_exit_immediately_with_invalid_url() {
        // テスト項目: InvalidUrl エラーの場合、即座に終了すべきと判定される
        // given (前提条件):
        let error = ClientError::InvalidUrl("ws://".to_string());

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(result);
        assert!(!should_attempt_reconnect(&error, 0, 5));
    }

    #[test]
    fn test_should_attempt_reconnect_within_limit() {
        // テスト項目: 再接続回数が上限未満の場合、再接続すべきと判定される
        // given (前提条件):
        let error = ClientError::ConnectionLost;

        // when (操作):
        let result = should_attempt_reconnect(&error, 4, 5);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_attempt_reconnect_at_limit() {
        // テスト項目: 再接続回数が上限に達した場合、再接続すべきではないと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("refused".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 5, 5);

        // then (期待する結果):
        assert!(!result);
    }
}
