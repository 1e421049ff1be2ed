//! InMemory Repository 実装
//!
//! プロセスの生存期間だけ保持される。再起動すると空に戻る。

mod connection;
mod history;

pub use connection::InMemoryConnectionRepository;
pub use history::InMemoryMessageHistoryRepository;
