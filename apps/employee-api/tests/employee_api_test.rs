//! # 従業員 API 統合テスト
//!
//! ルーター全体をインメモリリポジトリで駆動し、HTTP レベルの契約
//! （ステータスコード・ボディ形式・エラー変換）を検証する。

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
   Router,
   body::{Body, to_bytes},
   http::{Request, StatusCode, header},
};
use jinjibase_domain::{
   clock::SystemClock,
   employee::{Email, Employee, EmployeeId, NewEmployee},
};
use jinjibase_employee_api::{app, handler::EmployeeState, usecase::EmployeeUseCaseImpl};
use jinjibase_infra::{
   InfraError,
   mock::MockEmployeeRepository,
   password::Argon2PasswordHasher,
   repository::EmployeeRepository,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

/// インメモリリポジトリを使ったテスト用アプリケーションを構築する
fn test_app() -> Router {
   app_with_repository(Arc::new(MockEmployeeRepository::new()))
}

fn app_with_repository(repository: Arc<dyn EmployeeRepository>) -> Router {
   let usecase = EmployeeUseCaseImpl::new(
      repository,
      Arc::new(Argon2PasswordHasher::new()),
      Arc::new(SystemClock),
   );
   app(Arc::new(EmployeeState { usecase }))
}

/// JSON ボディ付きのリクエストを送信する
async fn send_json(
   app: &Router,
   method: &str,
   uri: &str,
   body: &Value,
) -> (StatusCode, Option<Value>) {
   send_raw(app, method, uri, &body.to_string()).await
}

/// 生のボディ文字列でリクエストを送信する（壊れた JSON のテスト用）
async fn send_raw(
   app: &Router,
   method: &str,
   uri: &str,
   body: &str,
) -> (StatusCode, Option<Value>) {
   let request = Request::builder()
      .method(method)
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap();

   dispatch(app, request).await
}

/// ボディなしのリクエストを送信する
async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Option<Value>) {
   let request = Request::builder()
      .method(method)
      .uri(uri)
      .body(Body::empty())
      .unwrap();

   dispatch(app, request).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, Option<Value>) {
   let response = app.clone().oneshot(request).await.unwrap();
   let status = response.status();

   let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
   let body = if bytes.is_empty() {
      None
   } else {
      Some(serde_json::from_slice(&bytes).expect("レスポンスボディは JSON であること"))
   };

   (status, body)
}

fn register_payload() -> Value {
   json!({
      "firstName": "A",
      "lastName":  "B",
      "email":     "a@b.com",
      "password":  "secret123",
      "role":      "dev"
   })
}

async fn register(app: &Router, email: &str) -> Value {
   let mut payload = register_payload();
   payload["email"] = json!(email);
   let (status, body) = send_json(app, "POST", "/employees/register", &payload).await;
   assert_eq!(status, StatusCode::CREATED);
   body.unwrap()
}

// --- 正常系 ---

#[tokio::test]
async fn test_エンドツーエンドのライフサイクル() {
   let app = test_app();

   // 登録: 201、数値 ID、パスワードはハッシュ化済み
   let (status, body) = send_json(&app, "POST", "/employees/register", &register_payload()).await;
   assert_eq!(status, StatusCode::CREATED);
   let created = body.unwrap();
   assert!(created["id"].is_i64());
   assert_eq!(created["firstName"], "A");
   assert_eq!(created["lastName"], "B");
   assert_eq!(created["email"], "a@b.com");
   assert_eq!(created["role"], "dev");
   assert_ne!(created["password"], "secret123");

   let id = created["id"].as_i64().unwrap();

   // 取得: 200、登録時と同じレコード
   let (status, body) = send(&app, "GET", &format!("/employees/{id}")).await;
   assert_eq!(status, StatusCode::OK);
   assert_eq!(body.unwrap(), created);

   // 更新: 200、firstName とロールが変わる
   let (status, body) = send_json(
      &app,
      "PUT",
      &format!("/employees/{id}"),
      &json!({
         "firstName": "A2",
         "lastName":  "B",
         "email":     "a@b.com",
         "password":  "secret123",
         "role":      "lead"
      }),
   )
   .await;
   assert_eq!(status, StatusCode::OK);
   let updated = body.unwrap();
   assert_eq!(updated["firstName"], "A2");
   assert_eq!(updated["role"], "lead");
   assert_eq!(updated["id"], json!(id));

   // 削除: 204、ボディなし
   let (status, body) = send(&app, "DELETE", &format!("/employees/{id}")).await;
   assert_eq!(status, StatusCode::NO_CONTENT);
   assert!(body.is_none());

   // 削除後の取得: 404
   let (status, _) = send(&app, "GET", &format!("/employees/{id}")).await;
   assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_一覧は登録した全従業員を返す() {
   let app = test_app();
   register(&app, "a@example.com").await;
   register(&app, "b@example.com").await;

   let (status, body) = send(&app, "GET", "/employees").await;

   assert_eq!(status, StatusCode::OK);
   let employees = body.unwrap();
   assert_eq!(employees.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_更新はペイロードにパスワードがあっても無視する() {
   let app = test_app();
   let created = register(&app, "a@example.com").await;
   let id = created["id"].as_i64().unwrap();
   let hash_before = created["password"].clone();

   let (status, body) = send_json(
      &app,
      "PUT",
      &format!("/employees/{id}"),
      &json!({
         "firstName": "A",
         "lastName":  "B",
         "email":     "a@example.com",
         "password":  "differentpass99",
         "role":      "dev"
      }),
   )
   .await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body.unwrap()["password"], hash_before);

   // 再取得してもハッシュは変わっていない
   let (_, body) = send(&app, "GET", &format!("/employees/{id}")).await;
   assert_eq!(body.unwrap()["password"], hash_before);
}

#[tokio::test]
async fn test_一括削除は存在しないidが混ざっても204を返す() {
   let app = test_app();
   let first = register(&app, "a@example.com").await;
   let second = register(&app, "b@example.com").await;
   let first_id = first["id"].as_i64().unwrap();

   let (status, body) = send_json(
      &app,
      "POST",
      "/employees/batch/delete",
      &json!([first_id, 99999]),
   )
   .await;

   assert_eq!(status, StatusCode::NO_CONTENT);
   assert!(body.is_none());

   // 存在した方だけが消えている
   let (_, body) = send(&app, "GET", "/employees").await;
   let remaining = body.unwrap();
   assert_eq!(remaining.as_array().unwrap().len(), 1);
   assert_eq!(remaining[0]["id"], second["id"]);
}

#[tokio::test]
async fn test_ヘルスチェック() {
   let app = test_app();

   let (status, body) = send(&app, "GET", "/health").await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body.unwrap()["status"], "healthy");
}

// --- エラー変換 ---

#[tokio::test]
async fn test_存在しないidの取得は契約どおりの404ボディ() {
   let app = test_app();

   let (status, body) = send(&app, "GET", "/employees/99999").await;

   assert_eq!(status, StatusCode::NOT_FOUND);
   assert_eq!(
      body.unwrap(),
      json!({ "error": "Employee not found with id: 99999" })
   );
}

#[tokio::test]
async fn test_存在しないidの更新は404で新規作成しない() {
   let app = test_app();

   let (status, body) = send_json(&app, "PUT", "/employees/99999", &register_payload()).await;

   assert_eq!(status, StatusCode::NOT_FOUND);
   assert_eq!(
      body.unwrap(),
      json!({ "error": "Employee not found with id: 99999" })
   );

   // レコードは作成されていない
   let (_, body) = send(&app, "GET", "/employees").await;
   assert_eq!(body.unwrap().as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_存在しないidの削除は404() {
   let app = test_app();

   let (status, body) = send(&app, "DELETE", "/employees/99999").await;

   assert_eq!(status, StatusCode::NOT_FOUND);
   assert_eq!(
      body.unwrap(),
      json!({ "error": "Employee not found with id: 99999" })
   );
}

#[tokio::test]
async fn test_不正なメールと短いパスワードはフィールドマップの400() {
   let app = test_app();

   let (status, body) = send_json(
      &app,
      "POST",
      "/employees/register",
      &json!({
         "firstName": "A",
         "lastName":  "B",
         "email":     "not-an-email",
         "password":  "short",
         "role":      "dev"
      }),
   )
   .await;

   assert_eq!(status, StatusCode::BAD_REQUEST);
   assert_eq!(
      body.unwrap(),
      json!({
         "email":    "Email should be valid",
         "password": "Password must be at least 8 characters"
      })
   );
}

#[tokio::test]
async fn test_空のペイロードは全必須フィールドを報告する() {
   let app = test_app();

   let (status, body) = send_json(&app, "POST", "/employees/register", &json!({})).await;

   assert_eq!(status, StatusCode::BAD_REQUEST);
   assert_eq!(
      body.unwrap(),
      json!({
         "firstName": "First name is required",
         "lastName":  "Last name is required",
         "email":     "Email is required",
         "password":  "Password is required"
      })
   );
}

#[tokio::test]
async fn test_壊れたjsonは固定メッセージの400() {
   let app = test_app();

   let (status, body) = send_raw(&app, "POST", "/employees/register", "{ not json").await;

   assert_eq!(status, StatusCode::BAD_REQUEST);
   assert_eq!(
      body.unwrap(),
      json!({ "error": "Invalid JSON format. Please check your request body." })
   );
}

#[tokio::test]
async fn test_一括削除に配列以外を渡すと固定メッセージの400() {
   let app = test_app();

   // 配列の代わりにオブジェクト
   let (status, body) = send_json(&app, "POST", "/employees/batch/delete", &json!({})).await;

   assert_eq!(status, StatusCode::BAD_REQUEST);
   assert_eq!(
      body.unwrap(),
      json!({ "error": "Invalid JSON format. Please check your request body." })
   );
}

#[tokio::test]
async fn test_数値でないパスidもjsonの500になる() {
   let app = test_app();

   let (status, body) = send(&app, "GET", "/employees/abc").await;

   assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
   let error = body.unwrap()["error"].as_str().unwrap().to_string();
   assert!(error.starts_with("An unexpected error occurred: "));
}

// --- 予期しない失敗の変換 ---

/// すべての操作が失敗するリポジトリ（ストア障害の再現用）
struct FailingEmployeeRepository;

fn store_down() -> InfraError {
   InfraError::unexpected("connection refused")
}

#[async_trait]
impl EmployeeRepository for FailingEmployeeRepository {
   async fn find_by_id(&self, _id: EmployeeId) -> Result<Option<Employee>, InfraError> {
      Err(store_down())
   }

   async fn find_all(&self) -> Result<Vec<Employee>, InfraError> {
      Err(store_down())
   }

   async fn find_by_email(&self, _email: &Email) -> Result<Option<Employee>, InfraError> {
      Err(store_down())
   }

   async fn insert(&self, _new: &NewEmployee) -> Result<Employee, InfraError> {
      Err(store_down())
   }

   async fn update(&self, _employee: &Employee) -> Result<(), InfraError> {
      Err(store_down())
   }

   async fn delete(&self, _id: EmployeeId) -> Result<(), InfraError> {
      Err(store_down())
   }

   async fn delete_many(&self, _ids: &[EmployeeId]) -> Result<u64, InfraError> {
      Err(store_down())
   }
}

#[tokio::test]
async fn test_ストア障害はラップされたメッセージの500になる() {
   let app = app_with_repository(Arc::new(FailingEmployeeRepository));

   let (status, body) = send(&app, "GET", "/employees").await;

   assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
   assert_eq!(
      body.unwrap(),
      json!({ "error": "An unexpected error occurred: unexpected error: connection refused" })
   );
}
