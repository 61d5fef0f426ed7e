//! # パスワードハッシュ
//!
//! Argon2id によるパスワードのハッシュ化と検証を提供する。
//!
//! ハッシュ化は従業員の登録経路で一度だけ行われる。検証は現在の
//! HTTP 操作からは呼ばれないが、ハッシュと対になるインターフェース
//! として提供する。

use argon2::{
   Argon2,
   Params,
   PasswordHasher as _,
   PasswordVerifier as _,
   password_hash::{PasswordHash as Argon2PasswordHash, SaltString, rand_core::OsRng},
};
use jinjibase_domain::password::{PasswordHash, PasswordVerifyResult, PlainPassword};

use crate::InfraError;

/// パスワードのハッシュ化と検証を担当するトレイト
pub trait PasswordHasher: Send + Sync {
   /// 平文パスワードをハッシュ化する
   ///
   /// # Errors
   ///
   /// - ハッシュ生成に失敗した場合
   fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError>;

   /// パスワードを検証する
   ///
   /// # Errors
   ///
   /// - 不正なハッシュ形式の場合
   fn verify(
      &self,
      password: &PlainPassword,
      hash: &PasswordHash,
   ) -> Result<PasswordVerifyResult, InfraError>;
}

/// Argon2id によるパスワードハッシュの実装
///
/// OWASP 推奨パラメータ（RFC 9106）を使用:
/// - Memory: 64 MB
/// - Iterations: 1
/// - Parallelism: 1
pub struct Argon2PasswordHasher {
   argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
   pub fn new() -> Self {
      let params = Params::new(
         65536, // memory (KB) = 64 MB
         1,     // iterations
         1,     // parallelism
         None,  // output length (default: 32)
      )
      .expect("Argon2 パラメータが不正です");

      Self {
         argon2: Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
      }
   }
}

impl Default for Argon2PasswordHasher {
   fn default() -> Self {
      Self::new()
   }
}

impl PasswordHasher for Argon2PasswordHasher {
   fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
      let salt = SaltString::generate(&mut OsRng);
      let hash = self
         .argon2
         .hash_password(password.as_str().as_bytes(), &salt)
         .map_err(|e| InfraError::hash(e.to_string()))?;

      Ok(PasswordHash::new(hash.to_string()))
   }

   fn verify(
      &self,
      password: &PlainPassword,
      hash: &PasswordHash,
   ) -> Result<PasswordVerifyResult, InfraError> {
      let parsed = Argon2PasswordHash::new(hash.as_str())
         .map_err(|e| InfraError::hash(format!("不正なハッシュ形式: {e}")))?;

      let matched = self
         .argon2
         .verify_password(password.as_str().as_bytes(), &parsed)
         .is_ok();

      Ok(PasswordVerifyResult::from(matched))
   }
}

#[cfg(test)]
mod tests {
   use rstest::rstest;

   use super::*;

   #[rstest]
   fn test_ハッシュは平文と異なるargon2id形式になる() {
      let hasher = Argon2PasswordHasher::new();
      let password = PlainPassword::new("secret123").unwrap();

      let hash = hasher.hash(&password).unwrap();

      assert_ne!(hash.as_str(), "secret123");
      assert!(hash.as_str().starts_with("$argon2id$"));
   }

   #[rstest]
   fn test_ハッシュしたパスワードを検証できる() {
      let hasher = Argon2PasswordHasher::new();
      let password = PlainPassword::new("secret123").unwrap();

      let hash = hasher.hash(&password).unwrap();
      let result = hasher.verify(&password, &hash).unwrap();

      assert!(result.is_match());
   }

   #[rstest]
   fn test_異なるパスワードは検証に失敗する() {
      let hasher = Argon2PasswordHasher::new();
      let password = PlainPassword::new("secret123").unwrap();
      let other = PlainPassword::new("wrongpass").unwrap();

      let hash = hasher.hash(&password).unwrap();
      let result = hasher.verify(&other, &hash).unwrap();

      assert!(result.is_mismatch());
   }

   #[rstest]
   fn test_同じパスワードでもソルトによりハッシュは毎回異なる() {
      let hasher = Argon2PasswordHasher::new();
      let password = PlainPassword::new("secret123").unwrap();

      let first = hasher.hash(&password).unwrap();
      let second = hasher.hash(&password).unwrap();

      assert_ne!(first.as_str(), second.as_str());
   }

   #[rstest]
   fn test_不正なハッシュ形式はエラー() {
      let hasher = Argon2PasswordHasher::new();
      let password = PlainPassword::new("secret123").unwrap();
      let invalid_hash = PasswordHash::new("not-a-valid-hash");

      let result = hasher.verify(&password, &invalid_hash);

      assert!(result.is_err());
   }
}
