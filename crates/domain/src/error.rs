//! # ドメイン層エラー定義
//!
//! 値オブジェクト生成時のバリデーション違反を表現するエラー型。
//!
//! ## 設計方針
//!
//! - **thiserror 活用**: `#[error(...)]` マクロでエラーメッセージを自動生成
//! - **メッセージは API 契約**: `Validation` のメッセージはそのまま
//!   フィールド別エラーレスポンスに載るため、英語の契約文言を保持する

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// 値オブジェクトの生成時に検出されるバリデーション違反を表現する。
/// API 層でフィールド名 → メッセージのマップに変換される。
#[derive(Debug, Error)]
pub enum DomainError {
   /// バリデーションエラー
   ///
   /// メッセージはクライアントにそのまま返されるため、
   /// プレフィックスを付けずに保持する。
   #[error("{0}")]
   Validation(String),
}
