//! # 従業員
//!
//! 従業員エンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 要件 |
//! |---|------------|------|
//! | [`Employee`] | 従業員 | 氏名・メールアドレス・ロールを持つレコード |
//! | [`EmployeeId`] | 従業員 ID | ストアが採番する数値 ID（不変・一意） |
//! | [`Email`] | メールアドレス | 形式検証あり、ストアレベルで一意 |
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: EmployeeId は i64 をラップし、型安全性を確保
//! - **不変性**: エンティティフィールドは不変、変更は `with_details` 経由
//! - **バリデーション**: 値オブジェクトの生成時に検証ロジックを実行。
//!   メッセージは API のフィールドエラーとしてそのまま返されるため英語

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{DomainError, password::PasswordHash};

/// メールアドレスの最大文字数（RFC 5321）
pub const EMAIL_MAX_LENGTH: usize = 254;

/// 従業員 ID（一意識別子）
///
/// ストア（BIGSERIAL）が採番する数値をラップする。
/// Newtype パターンで型安全性を確保。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct EmployeeId(i64);

impl EmployeeId {
   /// 既存の数値から従業員 ID を作成する
   pub fn from_i64(value: i64) -> Self {
      Self(value)
   }

   /// 内部の i64 値を取得する
   pub fn as_i64(&self) -> i64 {
      self.0
   }
}

/// メールアドレス（値オブジェクト）
///
/// 生成時にバリデーションを実行し、不正な値の作成を防ぐ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
   /// メールアドレスを作成する
   ///
   /// # バリデーション
   ///
   /// - 空文字列ではない
   /// - `local@domain` の形式であること（両側が空でない）
   /// - 最大 [`EMAIL_MAX_LENGTH`] 文字
   ///
   /// # エラー
   ///
   /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
   pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
      let value = value.into();

      if value.trim().is_empty() {
         return Err(DomainError::Validation("Email is required".to_string()));
      }

      // 基本的な構造検証: local@domain の形式であること
      let Some((local, domain)) = value.split_once('@') else {
         return Err(DomainError::Validation(
            "Email should be valid".to_string(),
         ));
      };

      if local.is_empty() || domain.is_empty() {
         return Err(DomainError::Validation(
            "Email should be valid".to_string(),
         ));
      }

      if value.len() > EMAIL_MAX_LENGTH {
         return Err(DomainError::Validation(format!(
            "Email must not exceed {EMAIL_MAX_LENGTH} characters"
         )));
      }

      Ok(Self(value))
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

impl std::fmt::Display for Email {
   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      write!(f, "{}", self.0)
   }
}

/// 新規従業員の作成パラメータ
///
/// ID 採番前の従業員データ。リポジトリの `insert` が受け取り、
/// ストアが採番した ID とあわせて [`Employee`] として返す。
#[derive(Debug, Clone)]
pub struct NewEmployee {
   pub first_name:    String,
   pub last_name:     String,
   pub email:         Email,
   pub password_hash: PasswordHash,
   pub role:          Option<String>,
   /// 作成時刻（呼び出し元から注入）
   pub now:           DateTime<Utc>,
}

/// 従業員エンティティ
///
/// # 不変条件
///
/// - `id` はストアが採番し、生成後は不変
/// - `email` はストアレベルで一意
/// - `password_hash` は作成経路の完了後、常にハッシュ値（平文は保持しない）
/// - 更新は氏名・メールアドレス・ロールのみ（パスワードと ID には触れない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
   id:            EmployeeId,
   first_name:    String,
   last_name:     String,
   email:         Email,
   password_hash: PasswordHash,
   role:          Option<String>,
   created_at:    DateTime<Utc>,
   updated_at:    DateTime<Utc>,
}

impl Employee {
   /// 採番済み ID と作成パラメータから従業員を作成する
   ///
   /// リポジトリの `insert` が、ストアの採番結果とあわせて呼び出す。
   pub fn new(id: EmployeeId, new: NewEmployee) -> Self {
      Self {
         id,
         first_name: new.first_name,
         last_name: new.last_name,
         email: new.email,
         password_hash: new.password_hash,
         role: new.role,
         created_at: new.now,
         updated_at: new.now,
      }
   }

   /// 既存のデータから従業員を復元する（データベースから取得時）
   #[allow(clippy::too_many_arguments)]
   pub fn from_db(
      id: EmployeeId,
      first_name: String,
      last_name: String,
      email: Email,
      password_hash: PasswordHash,
      role: Option<String>,
      created_at: DateTime<Utc>,
      updated_at: DateTime<Utc>,
   ) -> Self {
      Self {
         id,
         first_name,
         last_name,
         email,
         password_hash,
         role,
         created_at,
         updated_at,
      }
   }

   // Getter メソッド

   pub fn id(&self) -> EmployeeId {
      self.id
   }

   pub fn first_name(&self) -> &str {
      &self.first_name
   }

   pub fn last_name(&self) -> &str {
      &self.last_name
   }

   pub fn email(&self) -> &Email {
      &self.email
   }

   pub fn password_hash(&self) -> &PasswordHash {
      &self.password_hash
   }

   pub fn role(&self) -> Option<&str> {
      self.role.as_deref()
   }

   pub fn created_at(&self) -> DateTime<Utc> {
      self.created_at
   }

   pub fn updated_at(&self) -> DateTime<Utc> {
      self.updated_at
   }

   // ビジネスロジックメソッド

   /// 氏名・メールアドレス・ロールを上書きした新しいインスタンスを返す
   ///
   /// パスワードと ID には触れない（更新経路の方針）。
   pub fn with_details(
      self,
      first_name: String,
      last_name: String,
      email: Email,
      role: Option<String>,
      now: DateTime<Utc>,
   ) -> Self {
      Self {
         first_name,
         last_name,
         email,
         role,
         updated_at: now,
         ..self
      }
   }
}
