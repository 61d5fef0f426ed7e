//! # Employee API 設定
//!
//! 環境変数からサーバーの設定を読み込む。

use std::env;

use anyhow::Context as _;

/// Employee API サーバーの設定
#[derive(Debug, Clone)]
pub struct AppConfig {
   /// バインドアドレス
   pub host: String,
   /// ポート番号
   pub port: u16,
   /// データベース接続 URL
   pub database_url: String,
}

impl AppConfig {
   /// 環境変数から設定を読み込む
   ///
   /// | 変数名 | 必須 | 説明 |
   /// |--------|------|------|
   /// | `APP_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
   /// | `APP_PORT` | No | ポート番号（デフォルト: `3000`） |
   /// | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
   pub fn from_env() -> anyhow::Result<Self> {
      Ok(Self {
         host: env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
         port: env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("APP_PORT は有効なポート番号である必要があります")?,
         database_url: env::var("DATABASE_URL")
            .context("DATABASE_URL が設定されていません")?,
      })
   }
}
