//! # インフラ層エラー定義
//!
//! データベースやパスワードハッシュ処理で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **エラーの変換**: `sqlx::Error` を `#[from]` でラップ
//! - **ドメインエラーとの分離**: インフラ固有のエラーを明示
//! - **メッセージは英語**: API 層の catch-all がメッセージをそのまま
//!   レスポンスに含めるため、ユーザー可視の文言として扱う

use thiserror::Error;

/// インフラ層で発生するエラー
///
/// データベースクエリやハッシュ計算の失敗を表現する。
/// API 層でこのエラーを受け取り、500 レスポンスに変換する。
#[derive(Debug, Error)]
pub enum InfraError {
   /// データベースエラー
   ///
   /// SQL クエリの実行失敗、接続エラー、制約違反など。
   #[error("database error: {0}")]
   Database(#[from] sqlx::Error),

   /// パスワードハッシュエラー
   ///
   /// ハッシュ生成の失敗、不正なハッシュ形式など。
   #[error("password hash error: {0}")]
   Hash(String),

   /// 予期しないエラー
   ///
   /// 上記に分類できない予期しないエラー。
   /// 永続化されたデータがドメインの不変条件を満たさない場合など。
   #[error("unexpected error: {0}")]
   Unexpected(String),
}

impl InfraError {
   /// パスワードハッシュエラーを生成する
   pub fn hash(msg: impl Into<String>) -> Self {
      Self::Hash(msg.into())
   }

   /// 予期しないエラーを生成する
   pub fn unexpected(msg: impl Into<String>) -> Self {
      Self::Unexpected(msg.into())
   }
}
