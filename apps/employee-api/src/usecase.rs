//! # ユースケース
//!
//! 従業員管理のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - リポジトリとハッシュ実装には trait 経由で依存し、テストでは
//!   インメモリモックを注入する
//! - 構造バリデーションはハンドラ層で完了している前提。ユースケースは
//!   検証済みの値オブジェクトのみを受け取る

pub mod employee;

pub use employee::{CreateEmployeeInput, EmployeeUseCaseImpl, UpdateEmployeeInput};
