//! # JinjiBase インフラ層
//!
//! データベースアクセスとパスワードハッシュの実装を提供する。
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL 接続プールの作成とマイグレーション
//! - [`repository`] - 従業員リポジトリ（トレイト + PostgreSQL 実装）
//! - [`password`] - Argon2id によるパスワードハッシュ・検証
//! - [`error`] - インフラ層エラー定義
//! - [`mock`] - テスト用インメモリリポジトリ（`test-utils` feature）

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod password;
pub mod repository;

pub use error::InfraError;
