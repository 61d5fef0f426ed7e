//! # Clock（時刻プロバイダ）
//!
//! 従業員レコードの `created_at` / `updated_at` に入る時刻を提供する。
//! ユースケース層が `Utc::now()` を直接呼ぶとタイムスタンプの検証が
//! できないため、トレイト経由で注入する。

use chrono::{DateTime, Utc};

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Utc>;
}

/// 実際のシステム時刻を返す実装
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Utc> {
      Utc::now()
   }
}

/// 固定時刻を返すテスト用実装
///
/// 登録・更新のタイムスタンプをテストで決定的にするために使う。
pub struct FixedClock {
   now: DateTime<Utc>,
}

impl FixedClock {
   pub fn new(now: DateTime<Utc>) -> Self {
      Self { now }
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Utc> {
      self.now
   }
}
