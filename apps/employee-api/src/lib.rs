//! # Employee API ライブラリ
//!
//! ルーター構築とハンドラ・ユースケースを公開する。
//! テストがルーターを直接駆動できるよう、main から分離している。

pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;

use std::sync::Arc;

use axum::{
   Router,
   routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handler::{
   EmployeeState,
   create_employee,
   delete_employee,
   delete_employees,
   get_employee,
   health_check,
   list_employees,
   update_employee,
};

/// アプリケーションのルーターを構築する
///
/// ## ルート
///
/// | メソッド | パス | ハンドラ |
/// |---------|------|---------|
/// | GET | /health | ヘルスチェック |
/// | POST | /employees/register | 従業員登録 |
/// | GET | /employees | 従業員一覧 |
/// | GET | /employees/{id} | 従業員詳細 |
/// | PUT | /employees/{id} | 従業員更新 |
/// | DELETE | /employees/{id} | 従業員削除 |
/// | POST | /employees/batch/delete | 従業員一括削除 |
pub fn app(state: Arc<EmployeeState>) -> Router {
   Router::new()
      .route("/health", get(health_check))
      .route("/employees/register", post(create_employee))
      .route("/employees", get(list_employees))
      .route(
         "/employees/{id}",
         get(get_employee).put(update_employee).delete(delete_employee),
      )
      .route("/employees/batch/delete", post(delete_employees))
      .with_state(state)
      .layer(TraceLayer::new_for_http())
}
