//! In-Memory User Store Implementation

use dashmap::DashMap;
use std::sync::{Arc, Mutex};

use crate::application::ports::{UserStoreError, UserStorePort};
use crate::domain::{User, UserPatch};

/// 内存用户存储
///
/// 显式存储对象，生命周期与进程一致
pub struct InMemoryUserStore {
    users: DashMap<i64, User>,
    /// id 分配与插入必须是一个原子步骤，并发创建共用这把锁
    create_lock: Mutex<()>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            create_lock: Mutex::new(()),
        }
    }

    /// 创建带演示数据的存储
    pub fn with_seed_data() -> Self {
        let store = Self::new();
        store
            .users
            .insert(1, User::new(1, "John Doe", "john@example.com"));
        store
            .users
            .insert(2, User::new(2, "Jane Smith", "jane@example.com"));
        store
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 当前最大 id + 1（空存储时为 1）
    fn next_id(&self) -> i64 {
        self.users
            .iter()
            .map(|entry| *entry.key())
            .max()
            .map(|max| max + 1)
            .unwrap_or(1)
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStorePort for InMemoryUserStore {
    fn list(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by_key(|u| u.id);
        users
    }

    fn get(&self, id: i64) -> Result<User, UserStoreError> {
        self.users
            .get(&id)
            .map(|u| u.clone())
            .ok_or(UserStoreError::NotFound(id))
    }

    fn create(&self, name: String, email: String) -> User {
        // 扫描最大 id 与插入之间不允许其他创建插队
        let _guard = self
            .create_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let id = self.next_id();
        let user = User::new(id, name, email);
        self.users.insert(id, user.clone());
        tracing::info!(user_id = id, "User created");
        user
    }

    fn update(&self, id: i64, patch: UserPatch) -> Result<User, UserStoreError> {
        let mut user = self
            .users
            .get_mut(&id)
            .ok_or(UserStoreError::NotFound(id))?;
        patch.apply(&mut user);
        tracing::debug!(user_id = id, "User updated");
        Ok(user.clone())
    }

    fn delete(&self, id: i64) -> Result<User, UserStoreError> {
        self.users
            .remove(&id)
            .map(|(_, user)| {
                tracing::info!(user_id = id, "User deleted");
                user
            })
            .ok_or(UserStoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_data() {
        let store = InMemoryUserStore::with_seed_data();
        let users = store.list();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "John Doe");
        assert_eq!(users[1].email, "jane@example.com");
    }

    #[test]
    fn test_create_assigns_max_id_plus_one() {
        let store = InMemoryUserStore::with_seed_data();
        let user = store.create("Alice".to_string(), "alice@example.com".to_string());
        assert_eq!(user.id, 3);

        // 删除中间记录后依然从最大 id 递增
        store.delete(3).unwrap();
        store.delete(1).unwrap();
        let user = store.create("Bob".to_string(), "bob@example.com".to_string());
        assert_eq!(user.id, 3);
    }

    #[test]
    fn test_create_on_empty_store_starts_at_one() {
        let store = InMemoryUserStore::new();
        let user = store.create("Alice".to_string(), "alice@example.com".to_string());
        assert_eq!(user.id, 1);
    }

    #[test]
    fn test_get_missing_user() {
        let store = InMemoryUserStore::with_seed_data();
        assert!(matches!(store.get(99), Err(UserStoreError::NotFound(99))));
    }

    #[test]
    fn test_update_patches_only_provided_fields() {
        let store = InMemoryUserStore::with_seed_data();
        let patch = UserPatch {
            name: None,
            email: Some("john.doe@example.com".to_string()),
        };

        let updated = store.update(1, patch).unwrap();
        assert_eq!(updated.name, "John Doe");
        assert_eq!(updated.email, "john.doe@example.com");
    }

    #[test]
    fn test_concurrent_creates_allocate_unique_ids() {
        let store = Arc::new(InMemoryUserStore::new());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        store.create(
                            format!("user-{}-{}", t, i),
                            format!("user-{}-{}@example.com", t, i),
                        );
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let users = store.list();
        assert_eq!(users.len(), 400);

        // id 连续无重复
        let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, (1..=400).collect::<Vec<i64>>());
    }

    #[test]
    fn test_delete_returns_removed_record() {
        let store = InMemoryUserStore::with_seed_data();
        let removed = store.delete(2).unwrap();
        assert_eq!(removed.name, "Jane Smith");
        assert_eq!(store.list().len(), 1);
        assert!(store.delete(2).is_err());
    }
}
