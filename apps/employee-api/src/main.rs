//! # Employee API サーバー
//!
//! 従業員レコードの CRUD を提供する REST サービス。
//!
//! ## 役割
//!
//! - **従業員管理**: 登録・一覧・取得・更新・削除・一括削除
//! - **パスワードハッシュ**: 登録時に Argon2id でハッシュ化して永続化
//! - **エラー変換**: すべての失敗を一箇所で JSON レスポンスに分類
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `APP_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `APP_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! DATABASE_URL=postgres://localhost/jinjibase cargo run -p jinjibase-employee-api
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use jinjibase_domain::clock::SystemClock;
use jinjibase_employee_api::{
   app,
   config::AppConfig,
   handler::EmployeeState,
   usecase::EmployeeUseCaseImpl,
};
use jinjibase_infra::{
   db,
   password::Argon2PasswordHasher,
   repository::PostgresEmployeeRepository,
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Employee API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // トレーシング初期化
   tracing_subscriber::registry()
      .with(
         tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,jinjibase=debug".into()),
      )
      .with(tracing_subscriber::fmt::layer())
      .init();

   // 設定読み込み
   let config = AppConfig::from_env().context("設定の読み込みに失敗しました")?;

   tracing::info!(
      "Employee API サーバーを起動します: {}:{}",
      config.host,
      config.port
   );

   // データベース接続プールを作成
   let pool = db::create_pool(&config.database_url)
      .await
      .context("データベース接続に失敗しました")?;
   tracing::info!("データベースに接続しました");

   // マイグレーション適用
   db::run_migrations(&pool)
      .await
      .context("マイグレーションの適用に失敗しました")?;
   tracing::info!("マイグレーションを適用しました");

   // 依存コンポーネントを初期化
   let employee_repository = Arc::new(PostgresEmployeeRepository::new(pool));
   let password_hasher = Arc::new(Argon2PasswordHasher::new());
   let clock = Arc::new(SystemClock);
   let usecase = EmployeeUseCaseImpl::new(employee_repository, password_hasher, clock);
   let state = Arc::new(EmployeeState { usecase });

   // サーバー起動
   let addr: SocketAddr = format!("{}:{}", config.host, config.port)
      .parse()
      .context("アドレスのパースに失敗しました")?;

   let listener = TcpListener::bind(addr).await?;
   tracing::info!("Employee API サーバーが起動しました: {}", addr);

   axum::serve(listener, app(state)).await?;

   Ok(())
}
