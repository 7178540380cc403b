//! インメモリ実装（プロセス再起動でデータは失われる）

pub mod session;

pub use session::InMemorySessionStore;
