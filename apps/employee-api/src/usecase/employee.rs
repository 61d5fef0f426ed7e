//! 従業員管理ユースケース

use std::sync::Arc;

use jinjibase_domain::{
   clock::Clock,
   employee::{Email, Employee, EmployeeId, NewEmployee},
   password::PlainPassword,
};
use jinjibase_infra::{password::PasswordHasher, repository::EmployeeRepository};

use crate::error::ApiError;

/// 従業員作成の入力
///
/// ハンドラ層で構造バリデーション済み。
#[derive(Debug)]
pub struct CreateEmployeeInput {
   pub first_name: String,
   pub last_name:  String,
   pub email:      Email,
   pub password:   PlainPassword,
   pub role:       Option<String>,
}

/// 従業員更新の入力
///
/// パスワードは更新経路の対象外のため、そもそも入力に含めない。
#[derive(Debug)]
pub struct UpdateEmployeeInput {
   pub first_name: String,
   pub last_name:  String,
   pub email:      Email,
   pub role:       Option<String>,
}

/// 従業員管理ユースケース
pub struct EmployeeUseCaseImpl {
   employee_repository: Arc<dyn EmployeeRepository>,
   password_hasher:     Arc<dyn PasswordHasher>,
   clock:               Arc<dyn Clock>,
}

impl EmployeeUseCaseImpl {
   pub fn new(
      employee_repository: Arc<dyn EmployeeRepository>,
      password_hasher: Arc<dyn PasswordHasher>,
      clock: Arc<dyn Clock>,
   ) -> Self {
      Self {
         employee_repository,
         password_hasher,
         clock,
      }
   }

   /// 従業員を作成する
   ///
   /// 1. 平文パスワードをハッシュ化
   /// 2. employees テーブルに挿入（ID はストアが採番）
   /// 3. 採番済みのレコードを返す
   ///
   /// メールアドレスの重複は事前チェックせず、ストアの UNIQUE 制約に
   /// 委譲する。衝突時は `ApiError::Database` として 500 になる。
   pub async fn create(&self, input: CreateEmployeeInput) -> Result<Employee, ApiError> {
      let password_hash = self.password_hasher.hash(&input.password)?;

      let new = NewEmployee {
         first_name: input.first_name,
         last_name: input.last_name,
         email: input.email,
         password_hash,
         role: input.role,
         now: self.clock.now(),
      };

      let employee = self.employee_repository.insert(&new).await?;

      Ok(employee)
   }

   /// 全従業員を取得する
   ///
   /// フィルタ・ページネーションなし。
   pub async fn list(&self) -> Result<Vec<Employee>, ApiError> {
      Ok(self.employee_repository.find_all().await?)
   }

   /// ID で従業員を取得する
   pub async fn get_by_id(&self, id: EmployeeId) -> Result<Employee, ApiError> {
      self
         .employee_repository
         .find_by_id(id)
         .await?
         .ok_or_else(|| ApiError::NotFound(format!("Employee not found with id: {id}")))
   }

   /// 従業員の氏名・メールアドレス・ロールを更新する
   ///
   /// パスワードと ID には触れない。
   pub async fn update(
      &self,
      id: EmployeeId,
      input: UpdateEmployeeInput,
   ) -> Result<Employee, ApiError> {
      let employee = self
         .employee_repository
         .find_by_id(id)
         .await?
         .ok_or_else(|| ApiError::NotFound(format!("Employee not found with id: {id}")))?;

      let updated = employee.with_details(
         input.first_name,
         input.last_name,
         input.email,
         input.role,
         self.clock.now(),
      );

      self.employee_repository.update(&updated).await?;

      Ok(updated)
   }

   /// 従業員を削除する
   ///
   /// 存在しない ID をサイレントな no-op にしないため、
   /// 削除前に存在チェックを行う。
   pub async fn delete(&self, id: EmployeeId) -> Result<(), ApiError> {
      if self.employee_repository.find_by_id(id).await?.is_none() {
         return Err(ApiError::NotFound(format!("Employee not found with id: {id}")));
      }

      self.employee_repository.delete(id).await?;

      Ok(())
   }

   /// 複数の従業員を一括削除する
   ///
   /// 存在しない ID は無視する（ベストエフォート）。削除件数は
   /// 呼び出し元には返さず、ログにのみ残す。
   pub async fn delete_many(&self, ids: Vec<EmployeeId>) -> Result<(), ApiError> {
      let deleted = self.employee_repository.delete_many(&ids).await?;

      tracing::debug!("一括削除: 指定 {} 件中 {} 件を削除", ids.len(), deleted);

      Ok(())
   }
}
