//! # 従業員ハンドラ
//!
//! 従業員管理の REST API を提供する。
//!
//! ## エンドポイント
//!
//! - `POST /employees/register` - 従業員登録（201）
//! - `GET /employees` - 従業員一覧（200）
//! - `GET /employees/{id}` - 従業員詳細（200）
//! - `PUT /employees/{id}` - 従業員更新（200、パスワードは対象外）
//! - `DELETE /employees/{id}` - 従業員削除（204）
//! - `POST /employees/batch/delete` - 従業員一括削除（204）
//!
//! 一括削除が DELETE ではなく POST なのは、ボディ付き DELETE を
//! 扱えないトランスポート層があるため。

use std::{collections::BTreeMap, sync::Arc};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use jinjibase_domain::{
   employee::{Email, Employee, EmployeeId},
   password::PlainPassword,
};
use serde::{Deserialize, Serialize};

use crate::{
   error::{ApiError, ApiJson, ApiPath},
   usecase::{CreateEmployeeInput, EmployeeUseCaseImpl, UpdateEmployeeInput},
};

/// 従業員 API の共有状態
pub struct EmployeeState {
   pub usecase: EmployeeUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 従業員の登録・更新リクエスト
///
/// 全フィールドを `Option` で受け、欠落は構造バリデーションで
/// フィールド別エラーとして報告する（デシリアライズエラーにしない）。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
   pub first_name: Option<String>,
   pub last_name:  Option<String>,
   pub email:      Option<String>,
   pub password:   Option<String>,
   pub role:       Option<String>,
}

/// 従業員 DTO
///
/// `password` には保存されたハッシュが入る（登録時の平文は返らない）。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
   pub id:         i64,
   pub first_name: String,
   pub last_name:  String,
   pub email:      String,
   pub password:   String,
   pub role:       Option<String>,
   pub created_at: String,
   pub updated_at: String,
}

impl From<&Employee> for EmployeeDto {
   fn from(employee: &Employee) -> Self {
      Self {
         id:         employee.id().as_i64(),
         first_name: employee.first_name().to_string(),
         last_name:  employee.last_name().to_string(),
         email:      employee.email().as_str().to_string(),
         password:   employee.password_hash().as_str().to_string(),
         role:       employee.role().map(|r| r.to_string()),
         created_at: employee.created_at().to_rfc3339(),
         updated_at: employee.updated_at().to_rfc3339(),
      }
   }
}

// --- 構造バリデーション ---

/// ペイロードの構造バリデーション
///
/// 全フィールドを検査し、違反をフィールド名 → メッセージのマップに
/// 集約する（最初の違反で打ち切らない）。ユースケース層には
/// 検証済みの値オブジェクトのみが渡る。
///
/// 更新経路もこの関数を使う。パスワードは更新では無視されるが、
/// バリデーション自体は登録と同じ基準で行う。
fn validate_payload(payload: EmployeePayload) -> Result<CreateEmployeeInput, ApiError> {
   let mut errors = BTreeMap::new();

   let first_name = payload
      .first_name
      .map(|v| v.trim().to_string())
      .filter(|v| !v.is_empty());
   if first_name.is_none() {
      errors.insert(
         "firstName".to_string(),
         "First name is required".to_string(),
      );
   }

   let last_name = payload
      .last_name
      .map(|v| v.trim().to_string())
      .filter(|v| !v.is_empty());
   if last_name.is_none() {
      errors.insert("lastName".to_string(), "Last name is required".to_string());
   }

   let email = match Email::new(payload.email.unwrap_or_default()) {
      Ok(email) => Some(email),
      Err(e) => {
         errors.insert("email".to_string(), e.to_string());
         None
      }
   };

   let password = match PlainPassword::new(payload.password.unwrap_or_default()) {
      Ok(password) => Some(password),
      Err(e) => {
         errors.insert("password".to_string(), e.to_string());
         None
      }
   };

   if !errors.is_empty() {
      return Err(ApiError::Validation(errors));
   }

   let (Some(first_name), Some(last_name), Some(email), Some(password)) =
      (first_name, last_name, email, password)
   else {
      return Err(ApiError::Validation(errors));
   };

   Ok(CreateEmployeeInput {
      first_name,
      last_name,
      email,
      password,
      role: payload.role,
   })
}

// --- ハンドラ ---

/// POST /employees/register
///
/// 従業員を登録する。パスワードは保存前にハッシュ化される。
///
/// ## レスポンス
///
/// - `201 Created`: 採番済み ID を含む従業員
/// - `400 Bad Request`: 構造バリデーション失敗（フィールド別マップ）
pub async fn create_employee(
   State(state): State<Arc<EmployeeState>>,
   ApiJson(payload): ApiJson<EmployeePayload>,
) -> Result<impl IntoResponse, ApiError> {
   let input = validate_payload(payload)?;

   let employee = state.usecase.create(input).await?;

   Ok((StatusCode::CREATED, Json(EmployeeDto::from(&employee))))
}

/// GET /employees
///
/// 全従業員を取得する。フィルタ・ページネーションなし。
pub async fn list_employees(
   State(state): State<Arc<EmployeeState>>,
) -> Result<impl IntoResponse, ApiError> {
   let employees = state.usecase.list().await?;

   let items: Vec<EmployeeDto> = employees.iter().map(EmployeeDto::from).collect();

   Ok((StatusCode::OK, Json(items)))
}

/// GET /employees/{id}
///
/// ID で従業員を取得する。
///
/// ## レスポンス
///
/// - `200 OK`: 従業員
/// - `404 Not Found`: 従業員が見つからない
pub async fn get_employee(
   State(state): State<Arc<EmployeeState>>,
   ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
   let employee = state.usecase.get_by_id(EmployeeId::from_i64(id)).await?;

   Ok((StatusCode::OK, Json(EmployeeDto::from(&employee))))
}

/// PUT /employees/{id}
///
/// 従業員の氏名・メールアドレス・ロールを更新する。
/// ペイロードにパスワードが含まれていても無視される。
///
/// ## レスポンス
///
/// - `200 OK`: 更新後の従業員
/// - `400 Bad Request`: 構造バリデーション失敗
/// - `404 Not Found`: 従業員が見つからない
pub async fn update_employee(
   State(state): State<Arc<EmployeeState>>,
   ApiPath(id): ApiPath<i64>,
   ApiJson(payload): ApiJson<EmployeePayload>,
) -> Result<impl IntoResponse, ApiError> {
   let CreateEmployeeInput {
      first_name,
      last_name,
      email,
      password: _,
      role,
   } = validate_payload(payload)?;

   let employee = state
      .usecase
      .update(
         EmployeeId::from_i64(id),
         UpdateEmployeeInput {
            first_name,
            last_name,
            email,
            role,
         },
      )
      .await?;

   Ok((StatusCode::OK, Json(EmployeeDto::from(&employee))))
}

/// DELETE /employees/{id}
///
/// 従業員を削除する。
///
/// ## レスポンス
///
/// - `204 No Content`: 削除成功
/// - `404 Not Found`: 従業員が見つからない
pub async fn delete_employee(
   State(state): State<Arc<EmployeeState>>,
   ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
   state.usecase.delete(EmployeeId::from_i64(id)).await?;

   Ok(StatusCode::NO_CONTENT)
}

/// POST /employees/batch/delete
///
/// ID のリストを受け取り、該当する従業員を一括削除する。
/// 存在しない ID は無視する（部分失敗は報告しない）。
///
/// ## レスポンス
///
/// - `204 No Content`: 削除成功（全 ID が存在しなくても成功）
/// - `400 Bad Request`: ボディが ID の配列でない
pub async fn delete_employees(
   State(state): State<Arc<EmployeeState>>,
   ApiJson(ids): ApiJson<Vec<i64>>,
) -> Result<impl IntoResponse, ApiError> {
   let ids: Vec<EmployeeId> = ids.into_iter().map(EmployeeId::from_i64).collect();

   state.usecase.delete_many(ids).await?;

   Ok(StatusCode::NO_CONTENT)
}
