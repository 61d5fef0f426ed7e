//! # パスワード
//!
//! パスワード関連の値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`PlainPassword`] | 平文パスワード | 登録時の入力値 |
//! | [`PasswordHash`] | パスワードハッシュ | 永続化用のハッシュ値 |
//! | [`PasswordVerifyResult`] | 検証結果 | パスワード検証の成否 |
//!
//! 平文パスワードは登録経路でのみ存在し、永続化される前に必ず
//! ハッシュへ変換される。更新経路はパスワードに触れない。

use crate::DomainError;

/// パスワードの最小文字数
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// 平文パスワード（登録時の入力値）
///
/// ユーザーが入力したパスワードをラップする。
/// 生成時に最小文字数を検証し、不正な値の存在を型レベルで排除する。
///
/// # セキュリティ
///
/// Debug 出力ではパスワードの値をマスクする。
#[derive(Clone)]
pub struct PlainPassword(String);

impl std::fmt::Debug for PlainPassword {
   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      f.debug_tuple("PlainPassword").field(&"[REDACTED]").finish()
   }
}

impl PlainPassword {
   /// パスワードを作成する
   ///
   /// # バリデーション
   ///
   /// - 空文字列ではない
   /// - [`PASSWORD_MIN_LENGTH`] 文字以上
   ///
   /// # エラー
   ///
   /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
   /// メッセージはそのまま API のフィールドエラーとして返される。
   pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
      let value = value.into();

      if value.is_empty() {
         return Err(DomainError::Validation("Password is required".to_string()));
      }

      if value.chars().count() < PASSWORD_MIN_LENGTH {
         return Err(DomainError::Validation(format!(
            "Password must be at least {PASSWORD_MIN_LENGTH} characters"
         )));
      }

      Ok(Self(value))
   }

   /// 文字列参照を取得する
   pub fn as_str(&self) -> &str {
      &self.0
   }
}

/// パスワードハッシュ（永続化用）
///
/// Argon2id でハッシュ化されたパスワード文字列をラップする。
/// データベースに保存される形式。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
   /// ハッシュ文字列からインスタンスを作成する
   ///
   /// 主にデータベースからの復元時に使用する。
   pub fn new(hash: impl Into<String>) -> Self {
      Self(hash.into())
   }

   /// 文字列参照を取得する
   pub fn as_str(&self) -> &str {
      &self.0
   }

   /// 所有権を持つ文字列に変換する
   pub fn into_string(self) -> String {
      self.0
   }
}

/// パスワード検証結果
///
/// パスワード検証の成否を表す列挙型。
/// bool ではなく専用の型を使うことで、意図が明確になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVerifyResult {
   /// パスワードが一致した
   Match,
   /// パスワードが一致しなかった
   Mismatch,
}

impl PasswordVerifyResult {
   /// 一致したかどうかを返す
   pub fn is_match(&self) -> bool {
      matches!(self, Self::Match)
   }

   /// 一致しなかったかどうかを返す
   pub fn is_mismatch(&self) -> bool {
      matches!(self, Self::Mismatch)
   }
}

impl From<bool> for PasswordVerifyResult {
   fn from(matched: bool) -> Self {
      if matched { Self::Match } else { Self::Mismatch }
   }
}
