//! # EmployeeRepository
//!
//! 従業員レコードの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **ID 採番はストアに委譲**: `insert` は BIGSERIAL が採番した ID を
//!   `RETURNING` で受け取り、エンティティとして返す
//! - **一意制約はストアに委譲**: メールアドレスの重複は `employees.email`
//!   の UNIQUE 制約で検出される（事前チェックは行わない）
//! - **更新はパスワード列に触れない**: UPDATE 文の SET 句に password を
//!   含めないことで、更新経路の方針を SQL レベルでも強制する

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jinjibase_domain::{
   employee::{Email, Employee, EmployeeId, NewEmployee},
   password::PasswordHash,
};
use sqlx::PgPool;

use crate::error::InfraError;

/// 従業員リポジトリトレイト
///
/// 従業員レコードの永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
   /// ID で従業員を検索
   ///
   /// # 戻り値
   ///
   /// - `Ok(Some(employee))`: 従業員が見つかった場合
   /// - `Ok(None)`: 従業員が見つからない場合
   /// - `Err(_)`: データベースエラー
   async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, InfraError>;

   /// 全従業員を取得
   ///
   /// フィルタ・ページネーションなし。ID 順で返す。
   async fn find_all(&self) -> Result<Vec<Employee>, InfraError>;

   /// メールアドレスで従業員を検索
   ///
   /// メールアドレスの一意性を支えるための検索機能。
   /// 現在の HTTP 操作からは呼ばれない（重複チェックはストアの
   /// UNIQUE 制約に委譲している）。
   async fn find_by_email(&self, email: &Email) -> Result<Option<Employee>, InfraError>;

   /// 従業員を挿入し、採番された ID を含むエンティティを返す
   async fn insert(&self, new: &NewEmployee) -> Result<Employee, InfraError>;

   /// 従業員の氏名・メールアドレス・ロールを更新する
   ///
   /// パスワード列には触れない。
   async fn update(&self, employee: &Employee) -> Result<(), InfraError>;

   /// ID を指定して従業員を削除する
   ///
   /// 存在チェックは呼び出し元（ユースケース層）の責務。
   async fn delete(&self, id: EmployeeId) -> Result<(), InfraError>;

   /// 複数の ID を一括削除する
   ///
   /// 存在しない ID は無視する（ベストエフォート）。
   /// 実際に削除された行数を返す。
   async fn delete_many(&self, ids: &[EmployeeId]) -> Result<u64, InfraError>;
}

/// PostgreSQL 実装の EmployeeRepository
#[derive(Debug, Clone)]
pub struct PostgresEmployeeRepository {
   pool: PgPool,
}

impl PostgresEmployeeRepository {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

/// employees テーブルの行
///
/// ドメインエンティティへの復元時に値オブジェクトの検証を通す。
/// 検証に失敗した場合（永続化データの破損）は `InfraError::Unexpected`。
#[derive(sqlx::FromRow)]
struct EmployeeRow {
   id:         i64,
   first_name: String,
   last_name:  String,
   email:      String,
   password:   String,
   role:       Option<String>,
   created_at: DateTime<Utc>,
   updated_at: DateTime<Utc>,
}

impl EmployeeRow {
   fn into_domain(self) -> Result<Employee, InfraError> {
      let EmployeeRow {
         id,
         first_name,
         last_name,
         email,
         password,
         role,
         created_at,
         updated_at,
      } = self;

      Ok(Employee::from_db(
         EmployeeId::from_i64(id),
         first_name,
         last_name,
         Email::new(email).map_err(|e| InfraError::unexpected(e.to_string()))?,
         PasswordHash::new(password),
         role,
         created_at,
         updated_at,
      ))
   }
}

const SELECT_COLUMNS: &str =
   "SELECT id, first_name, last_name, email, password, role, created_at, updated_at \
    FROM employees";

#[async_trait]
impl EmployeeRepository for PostgresEmployeeRepository {
   async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, InfraError> {
      let row = sqlx::query_as::<_, EmployeeRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
         .bind(id.as_i64())
         .fetch_optional(&self.pool)
         .await?;

      row.map(EmployeeRow::into_domain).transpose()
   }

   async fn find_all(&self) -> Result<Vec<Employee>, InfraError> {
      let rows = sqlx::query_as::<_, EmployeeRow>(&format!("{SELECT_COLUMNS} ORDER BY id"))
         .fetch_all(&self.pool)
         .await?;

      rows.into_iter().map(EmployeeRow::into_domain).collect()
   }

   async fn find_by_email(&self, email: &Email) -> Result<Option<Employee>, InfraError> {
      let row = sqlx::query_as::<_, EmployeeRow>(&format!("{SELECT_COLUMNS} WHERE email = $1"))
         .bind(email.as_str())
         .fetch_optional(&self.pool)
         .await?;

      row.map(EmployeeRow::into_domain).transpose()
   }

   async fn insert(&self, new: &NewEmployee) -> Result<Employee, InfraError> {
      let id: i64 = sqlx::query_scalar(
         r#"
            INSERT INTO employees
                (first_name, last_name, email, password, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id
            "#,
      )
      .bind(&new.first_name)
      .bind(&new.last_name)
      .bind(new.email.as_str())
      .bind(new.password_hash.as_str())
      .bind(&new.role)
      .bind(new.now)
      .fetch_one(&self.pool)
      .await?;

      Ok(Employee::new(EmployeeId::from_i64(id), new.clone()))
   }

   async fn update(&self, employee: &Employee) -> Result<(), InfraError> {
      // password 列は意図的に SET 句に含めない
      sqlx::query(
         r#"
            UPDATE employees
            SET first_name = $1, last_name = $2, email = $3, role = $4, updated_at = $5
            WHERE id = $6
            "#,
      )
      .bind(employee.first_name())
      .bind(employee.last_name())
      .bind(employee.email().as_str())
      .bind(employee.role())
      .bind(employee.updated_at())
      .bind(employee.id().as_i64())
      .execute(&self.pool)
      .await?;

      Ok(())
   }

   async fn delete(&self, id: EmployeeId) -> Result<(), InfraError> {
      sqlx::query("DELETE FROM employees WHERE id = $1")
         .bind(id.as_i64())
         .execute(&self.pool)
         .await?;

      Ok(())
   }

   async fn delete_many(&self, ids: &[EmployeeId]) -> Result<u64, InfraError> {
      if ids.is_empty() {
         return Ok(0);
      }

      let raw_ids: Vec<i64> = ids.iter().map(|id| id.as_i64()).collect();

      let result = sqlx::query("DELETE FROM employees WHERE id = ANY($1)")
         .bind(&raw_ids)
         .execute(&self.pool)
         .await?;

      Ok(result.rows_affected())
   }
}
