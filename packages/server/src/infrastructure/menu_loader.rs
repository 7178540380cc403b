//! Menu configuration loader.
//!
//! Reads the nested JSON menu file at startup and builds the flat
//! [`MenuTree`] index. The file is an array of nodes tagged by `type`:
//!
//! ```json
//! [
//!   {"id": "menu_ambar", "type": "link", "label": "AMBAR", "url": "https://..."},
//!   {"id": "menu_asp", "type": "submenu", "label": "Aspirantes", "children": [...]}
//! ]
//! ```

use std::path::Path;

use thiserror::Error;

use crate::domain::{DuplicateIdPolicy, MenuError, MenuNodeConfig, MenuTree};

#[derive(Debug, Error)]
pub enum MenuLoadError {
    #[error("failed to read menu file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid menu configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Menu(#[from] MenuError),
}

/// Load and index the menu file at `path`
pub fn load_menu_configuration(
    path: impl AsRef<Path>,
    policy: DuplicateIdPolicy,
) -> Result<MenuTree, MenuLoadError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| MenuLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let tree = parse_menu_configuration(&raw, policy)?;
    tracing::info!(
        "Loaded {} menu node(s) from '{}'",
        tree.len(),
        path.display()
    );
    Ok(tree)
}

/// Parse menu JSON and build the index; skipped duplicates are logged
pub fn parse_menu_configuration(
    raw: &str,
    policy: DuplicateIdPolicy,
) -> Result<MenuTree, MenuLoadError> {
    let config: Vec<MenuNodeConfig> = serde_json::from_str(raw)?;
    let build = MenuTree::build(config, policy)?;

    for id in &build.skipped_duplicates {
        tracing::warn!(
            "Duplicate menu id '{}' skipped; the first definition is kept",
            id
        );
    }

    Ok(build.tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MenuNodeKind, MenuNodeType};

    fn bundled_menu_path() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/menu.json")
    }

    #[test]
    fn test_load_bundled_menu() {
        // テスト項目: 同梱のメニュー設定を読み込める
        // given (前提条件):
        let path = bundled_menu_path();

        // when (操作):
        let tree = load_menu_configuration(&path, DuplicateIdPolicy::FirstWins).unwrap();

        // then (期待する結果):
        let top: Vec<String> = tree
            .lookup_top_level()
            .into_iter()
            .map(|entry| entry.id.as_str().to_string())
            .collect();
        assert_eq!(
            top,
            vec!["menu_ambar", "menu_asp", "menu_ofe", "menu_est", "menu_map"]
        );
        assert_eq!(
            tree.lookup_by_id("menu_map").unwrap().node_type(),
            MenuNodeType::Image
        );
    }

    #[test]
    fn test_bundled_menu_keeps_first_duplicate() {
        // テスト項目: 同梱設定の重複 ID は最初の定義が採用される
        // given (前提条件):
        let raw = std::fs::read_to_string(bundled_menu_path()).unwrap();
        let config: Vec<MenuNodeConfig> = serde_json::from_str(&raw).unwrap();

        // when (操作):
        let build = MenuTree::build(config, DuplicateIdPolicy::FirstWins).unwrap();

        // then (期待する結果):
        let skipped: Vec<&str> = build
            .skipped_duplicates
            .iter()
            .map(|id| id.as_str())
            .collect();
        assert!(skipped.contains(&"sistemas_reticula"));
        assert!(skipped.contains(&"tic_reticula"));
        assert!(build.tree.lookup_by_id("sistemas_reticula").is_ok());
    }

    #[test]
    fn test_bundled_menu_rejected_under_strict_policy() {
        // テスト項目: 厳格モードでは同梱設定の重複 ID でエラーになる
        // given (前提条件):
        let path = bundled_menu_path();

        // when (操作):
        let result = load_menu_configuration(&path, DuplicateIdPolicy::Reject);

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(MenuLoadError::Menu(MenuError::DuplicateId(_)))
        ));
    }

    #[test]
    fn test_parse_accepts_legacy_field_names() {
        // テスト項目: link / submenu / image_path の別名キーを受け付ける
        // given (前提条件):
        let raw = r#"[
            {"id": "a", "type": "link", "label": "A", "link": "https://a.example"},
            {"id": "b", "type": "submenu", "label": "B", "submenu": [
                {"id": "c", "type": "image", "label": "C", "image_path": "/static/c.png"}
            ]}
        ]"#;

        // when (操作):
        let tree = parse_menu_configuration(raw, DuplicateIdPolicy::FirstWins).unwrap();

        // then (期待する結果):
        assert_eq!(tree.len(), 3);
        assert_eq!(
            tree.lookup_by_id("a").unwrap().kind,
            MenuNodeKind::Link {
                url: "https://a.example".to_string()
            }
        );
        assert!(tree.lookup_by_id("c").is_ok());
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        // テスト項目: 不正な JSON はパースエラーになる
        // given (前提条件):
        let raw = r#"[{"id": "a", "type": "carousel", "label": "A"}]"#;

        // when (操作):
        let result = parse_menu_configuration(raw, DuplicateIdPolicy::FirstWins);

        // then (期待する結果):
        assert!(matches!(result, Err(MenuLoadError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        // テスト項目: 存在しないファイルは Io エラーになる
        // given (前提条件):
        let path = "does/not/exist/menu.json";

        // when (操作):
        let result = load_menu_configuration(path, DuplicateIdPolicy::FirstWins);

        // then (期待する結果):
        assert!(matches!(result, Err(MenuLoadError::Io { .. })));
    }
}
