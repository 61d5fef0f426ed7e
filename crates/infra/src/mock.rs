//! # テスト用モックリポジトリ
//!
//! ユースケース・ハンドラテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! jinjibase-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{
   Arc,
   Mutex,
   atomic::{AtomicI64, Ordering},
};

use async_trait::async_trait;
use jinjibase_domain::employee::{Email, Employee, EmployeeId, NewEmployee};

use crate::{error::InfraError, repository::EmployeeRepository};

/// インメモリ実装の EmployeeRepository
///
/// BIGSERIAL の採番を `AtomicI64` で模倣する。
#[derive(Clone)]
pub struct MockEmployeeRepository {
   employees: Arc<Mutex<Vec<Employee>>>,
   next_id:   Arc<AtomicI64>,
}

impl Default for MockEmployeeRepository {
   fn default() -> Self {
      Self::new()
   }
}

impl MockEmployeeRepository {
   pub fn new() -> Self {
      Self {
         employees: Arc::new(Mutex::new(Vec::new())),
         next_id:   Arc::new(AtomicI64::new(1)),
      }
   }

   /// 現在格納されている従業員数を返す
   pub fn len(&self) -> usize {
      self.employees.lock().unwrap().len()
   }

   /// 従業員が格納されていないかを返す
   pub fn is_empty(&self) -> bool {
      self.len() == 0
   }
}

#[async_trait]
impl EmployeeRepository for MockEmployeeRepository {
   async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, InfraError> {
      Ok(self
         .employees
         .lock()
         .unwrap()
         .iter()
         .find(|e| e.id() == id)
         .cloned())
   }

   async fn find_all(&self) -> Result<Vec<Employee>, InfraError> {
      Ok(self.employees.lock().unwrap().clone())
   }

   async fn find_by_email(&self, email: &Email) -> Result<Option<Employee>, InfraError> {
      Ok(self
         .employees
         .lock()
         .unwrap()
         .iter()
         .find(|e| e.email() == email)
         .cloned())
   }

   async fn insert(&self, new: &NewEmployee) -> Result<Employee, InfraError> {
      let id = EmployeeId::from_i64(self.next_id.fetch_add(1, Ordering::SeqCst));
      let employee = Employee::new(id, new.clone());
      self.employees.lock().unwrap().push(employee.clone());
      Ok(employee)
   }

   async fn update(&self, employee: &Employee) -> Result<(), InfraError> {
      let mut employees = self.employees.lock().unwrap();
      if let Some(pos) = employees.iter().position(|e| e.id() == employee.id()) {
         employees[pos] = employee.clone();
      }
      Ok(())
   }

   async fn delete(&self, id: EmployeeId) -> Result<(), InfraError> {
      self.employees.lock().unwrap().retain(|e| e.id() != id);
      Ok(())
   }

   async fn delete_many(&self, ids: &[EmployeeId]) -> Result<u64, InfraError> {
      let mut employees = self.employees.lock().unwrap();
      let before = employees.len();
      employees.retain(|e| !ids.contains(&e.id()));
      Ok((before - employees.len()) as u64)
   }
}

#[cfg(test)]
mod tests {
   use chrono::Utc;
   use jinjibase_domain::password::PasswordHash;
   use pretty_assertions::assert_eq;

   use super::*;

   fn new_employee(email: &str) -> NewEmployee {
      NewEmployee {
         first_name:    "Taro".to_string(),
         last_name:     "Yamada".to_string(),
         email:         Email::new(email).unwrap(),
         password_hash: PasswordHash::new("$argon2id$v=19$dummy"),
         role:          Some("dev".to_string()),
         now:           Utc::now(),
      }
   }

   #[tokio::test]
   async fn test_insertは連番のidを採番する() {
      let repo = MockEmployeeRepository::new();

      let first = repo.insert(&new_employee("a@example.com")).await.unwrap();
      let second = repo.insert(&new_employee("b@example.com")).await.unwrap();

      assert_eq!(first.id().as_i64(), 1);
      assert_eq!(second.id().as_i64(), 2);
   }

   #[tokio::test]
   async fn test_find_by_emailで検索できる() {
      let repo = MockEmployeeRepository::new();
      repo.insert(&new_employee("a@example.com")).await.unwrap();

      let found = repo
         .find_by_email(&Email::new("a@example.com").unwrap())
         .await
         .unwrap();

      assert!(found.is_some());
   }

   #[tokio::test]
   async fn test_delete_manyは存在しないidを無視する() {
      let repo = MockEmployeeRepository::new();
      let kept = repo.insert(&new_employee("a@example.com")).await.unwrap();
      let removed = repo.insert(&new_employee("b@example.com")).await.unwrap();

      let deleted = repo
         .delete_many(&[removed.id(), EmployeeId::from_i64(999)])
         .await
         .unwrap();

      assert_eq!(deleted, 1);
      assert!(repo.find_by_id(kept.id()).await.unwrap().is_some());
      assert!(repo.find_by_id(removed.id()).await.unwrap().is_none());
   }
}
