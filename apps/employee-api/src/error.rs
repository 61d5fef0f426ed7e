//! # Employee API エラー定義
//!
//! API で発生するすべての失敗を分類し、HTTP レスポンスへ変換する。
//!
//! ## 設計方針
//!
//! - **失敗種別ごとにバリアントを分ける**: 将来の失敗種別が誤った
//!   ステータスコードにフォールバックしないよう、分類を型で明示する
//! - **変換箇所は一つ**: `IntoResponse` 実装がステータスコードと
//!   ボディ形式を決める唯一の場所。ハンドラ・ユースケースは分類済みの
//!   エラーを返すだけで、自前の try/catch は持たない
//! - **すべての失敗が JSON になる**: axum の extractor rejection も
//!   [`ApiJson`] / [`ApiPath`] で同じ列挙型に合流させる
//!
//! ## 失敗種別と HTTP ステータスの対応
//!
//! | バリアント | ステータス | ボディ |
//! |-----------|-----------|--------|
//! | `Validation` | 400 | フィールド名 → メッセージのマップ |
//! | `MalformedPayload` | 400 | `{"error": "Invalid JSON format. ..."}` |
//! | `NotFound` | 404 | `{"error": "<メッセージ>"}` |
//! | `Database` / `Unexpected` | 500 | `{"error": "An unexpected error occurred: <メッセージ>"}` |

use std::collections::BTreeMap;

use axum::{
   Json,
   extract::{FromRequest, FromRequestParts, Request, rejection::JsonRejection},
   http::{StatusCode, request::Parts},
   response::{IntoResponse, Response},
};
use jinjibase_infra::InfraError;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// 単一メッセージのエラーレスポンスボディ
///
/// `{ "error": "<メッセージ>" }` 形式。
#[derive(Debug, Serialize)]
pub struct ErrorBody {
   pub error: String,
}

impl ErrorBody {
   pub fn new(error: impl Into<String>) -> Self {
      Self {
         error: error.into(),
      }
   }
}

/// Employee API で発生するエラー
///
/// ハンドラとユースケースの戻り値に使用する。
/// 発生箇所ではエラーを分類するだけで、レスポンスへの変換は
/// [`IntoResponse`] 実装に一任する。
#[derive(Debug, Error)]
pub enum ApiError {
   /// 構造バリデーション失敗
   ///
   /// ペイロードが必須・形式・長さの制約を満たさない場合。
   /// フィールド名 → メッセージのマップをそのままボディとして返す。
   #[error("validation failed")]
   Validation(BTreeMap<String, String>),

   /// ペイロードの解析失敗
   ///
   /// JSON 構文が壊れている、またはコンテナ型が期待と異なる場合。
   #[error("Invalid JSON format. Please check your request body.")]
   MalformedPayload,

   /// リソースが見つからない
   ///
   /// ユースケース層が意図的に発生させるドメイン失敗。
   /// メッセージはそのままレスポンスに載る。
   #[error("{0}")]
   NotFound(String),

   /// インフラ層エラー（データベース等）
   #[error(transparent)]
   Database(#[from] InfraError),

   /// 予期しないエラー
   ///
   /// 分類できない失敗の受け皿。extractor の想定外 rejection を含む。
   #[error("{0}")]
   Unexpected(String),
}

impl IntoResponse for ApiError {
   fn into_response(self) -> Response {
      match self {
         ApiError::Validation(errors) => {
            (StatusCode::BAD_REQUEST, Json(errors)).into_response()
         }
         ApiError::MalformedPayload => (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new(
               "Invalid JSON format. Please check your request body.",
            )),
         )
            .into_response(),
         ApiError::NotFound(message) => {
            (StatusCode::NOT_FOUND, Json(ErrorBody::new(message))).into_response()
         }
         ApiError::Database(e) => {
            tracing::error!("データベースエラー: {e}");
            (
               StatusCode::INTERNAL_SERVER_ERROR,
               Json(ErrorBody::new(format!("An unexpected error occurred: {e}"))),
            )
               .into_response()
         }
         ApiError::Unexpected(message) => {
            tracing::error!("予期しないエラー: {message}");
            (
               StatusCode::INTERNAL_SERVER_ERROR,
               Json(ErrorBody::new(format!(
                  "An unexpected error occurred: {message}"
               ))),
            )
               .into_response()
         }
      }
   }
}

/// JSON ボディ extractor
///
/// `axum::Json` の rejection を [`ApiError::MalformedPayload`] に変換する。
/// 構文エラーもコンテナ型の不一致も同じ固定メッセージになる。
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
   Json<T>: FromRequest<S, Rejection = JsonRejection>,
   S: Send + Sync,
{
   type Rejection = ApiError;

   async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
      match Json::<T>::from_request(req, state).await {
         Ok(Json(value)) => Ok(Self(value)),
         Err(rejection) => {
            tracing::debug!("JSON ボディの解析に失敗: {rejection}");
            Err(ApiError::MalformedPayload)
         }
      }
   }
}

/// パスパラメータ extractor
///
/// `axum::extract::Path` の rejection を [`ApiError::Unexpected`] に変換する。
/// 解析できないパス ID もプレーンテキストではなく JSON の 500 になる。
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
   T: DeserializeOwned + Send,
   S: Send + Sync,
{
   type Rejection = ApiError;

   async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
      match axum::extract::Path::<T>::from_request_parts(parts, state).await {
         Ok(axum::extract::Path(value)) => Ok(Self(value)),
         Err(rejection) => Err(ApiError::Unexpected(rejection.to_string())),
      }
   }
}
