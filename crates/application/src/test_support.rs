//! In-memory fakes implementing the persistence and crypto ports for
//! service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use rosterly_core::AppResult;
use rosterly_domain::{Role, ShiftId, UserId};

use crate::auth_service::{TokenClaims, TokenCodec};
use crate::shift_service::{
    NewShift, ShiftAssignee, ShiftChanges, ShiftQuery, ShiftRecord, ShiftRepository,
    ShiftWithAssignee,
};
use crate::user_service::{NewUser, PasswordHasher, UserChanges, UserRecord, UserRepository};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Builds a user record whose password hash matches [`FakePasswordHasher`].
pub fn user_record(id: i64, email: &str, role: Role, password: &str) -> UserRecord {
    let now = Utc::now();
    UserRecord {
        id: UserId::new(id),
        name: format!("User {id}"),
        email: email.to_owned(),
        role,
        password_hash: format!("fakehash:{password}"),
        created_at: now,
        updated_at: now,
    }
}

/// Deterministic stand-in for the adaptive password hasher.
pub struct FakePasswordHasher;

impl PasswordHasher for FakePasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        Ok(format!("fakehash:{password}"))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        Ok(hash == format!("fakehash:{password}"))
    }
}

/// In-memory user repository.
#[derive(Clone, Default)]
pub struct FakeUserRepository {
    users: Arc<Mutex<HashMap<i64, UserRecord>>>,
    next_id: Arc<AtomicI64>,
}

impl FakeUserRepository {
    /// Seeds a user record.
    pub fn insert(&self, record: UserRecord) {
        let id = record.id.as_i64();
        self.next_id.fetch_max(id, Ordering::SeqCst);
        lock(&self.users).insert(id, record);
    }

    /// Replaces the stored role for a user, simulating an out-of-band
    /// promotion or demotion.
    pub fn set_role(&self, id: i64, role: Role) {
        if let Some(record) = lock(&self.users).get_mut(&id) {
            record.role = role;
        }
    }
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        Ok(lock(&self.users)
            .values()
            .find(|record| record.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        Ok(lock(&self.users).get(&user_id.as_i64()).cloned())
    }

    async fn list(&self) -> AppResult<Vec<UserRecord>> {
        let mut records: Vec<UserRecord> = lock(&self.users).values().cloned().collect();
        records.sort_by_key(|record| record.id.as_i64());
        Ok(records)
    }

    async fn create(&self, user: &NewUser) -> AppResult<UserRecord> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        let record = UserRecord {
            id: UserId::new(id),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            password_hash: user.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        lock(&self.users).insert(id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        user_id: UserId,
        changes: &UserChanges,
    ) -> AppResult<Option<UserRecord>> {
        let mut users = lock(&self.users);
        let Some(record) = users.get_mut(&user_id.as_i64()) else {
            return Ok(None);
        };

        if let Some(ref name) = changes.name {
            record.name = name.clone();
        }
        if let Some(ref email) = changes.email {
            record.email = email.clone();
        }
        if let Some(role) = changes.role {
            record.role = role;
        }
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn delete(&self, user_id: UserId) -> AppResult<bool> {
        Ok(lock(&self.users).remove(&user_id.as_i64()).is_some())
    }
}

/// Token codec that records issued claims instead of signing them.
#[derive(Clone, Default)]
pub struct FakeTokenCodec {
    issued: Arc<Mutex<HashMap<String, TokenClaims>>>,
    counter: Arc<AtomicI64>,
}

impl TokenCodec for FakeTokenCodec {
    fn issue(&self, claims: &TokenClaims) -> AppResult<String> {
        let token = format!("token-{}", self.counter.fetch_add(1, Ordering::SeqCst));
        lock(&self.issued).insert(token.clone(), claims.clone());
        Ok(token)
    }

    fn validate(&self, token: &str) -> Option<TokenClaims> {
        lock(&self.issued).get(token).cloned()
    }
}

/// In-memory shift repository. Assignee projections are synthesized from
/// the assigned user id.
#[derive(Clone, Default)]
pub struct FakeShiftRepository {
    shifts: Arc<Mutex<HashMap<i64, ShiftRecord>>>,
    next_id: Arc<AtomicI64>,
}

fn assignee_for(user_id: UserId) -> ShiftAssignee {
    ShiftAssignee {
        id: user_id,
        name: format!("User {user_id}"),
        email: format!("user{user_id}@example.com"),
        role: Role::Employee,
    }
}

fn with_assignee(shift: ShiftRecord) -> ShiftWithAssignee {
    let assignee = assignee_for(shift.user_id);
    ShiftWithAssignee { shift, assignee }
}

#[async_trait]
impl ShiftRepository for FakeShiftRepository {
    async fn list(&self, query: &ShiftQuery) -> AppResult<Vec<ShiftWithAssignee>> {
        let mut shifts: Vec<ShiftRecord> = lock(&self.shifts)
            .values()
            .filter(|shift| query.from.is_none_or(|from| shift.start_time >= from))
            .filter(|shift| query.to.is_none_or(|to| shift.start_time <= to))
            .filter(|shift| query.assignee.is_none_or(|assignee| shift.user_id == assignee))
            .cloned()
            .collect();
        shifts.sort_by_key(|shift| shift.start_time);

        Ok(shifts.into_iter().map(with_assignee).collect())
    }

    async fn find_by_id(&self, shift_id: ShiftId) -> AppResult<Option<ShiftWithAssignee>> {
        Ok(lock(&self.shifts)
            .get(&shift_id.as_i64())
            .cloned()
            .map(with_assignee))
    }

    async fn create(&self, shift: &NewShift) -> AppResult<ShiftWithAssignee> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        let record = ShiftRecord {
            id: ShiftId::new(id),
            name: shift.name.clone(),
            start_time: shift.start_time,
            end_time: shift.end_time,
            user_id: shift.user_id,
            created_at: now,
            updated_at: now,
        };
        lock(&self.shifts).insert(id, record.clone());
        Ok(with_assignee(record))
    }

    async fn update(
        &self,
        shift_id: ShiftId,
        changes: &ShiftChanges,
    ) -> AppResult<Option<ShiftWithAssignee>> {
        let mut shifts = lock(&self.shifts);
        let Some(record) = shifts.get_mut(&shift_id.as_i64()) else {
            return Ok(None);
        };

        if let Some(ref name) = changes.name {
            record.name = name.clone();
        }
        if let Some(start_time) = changes.start_time {
            record.start_time = start_time;
        }
        if let Some(end_time) = changes.end_time {
            record.end_time = end_time;
        }
        if let Some(user_id) = changes.user_id {
            record.user_id = user_id;
        }
        record.updated_at = Utc::now();

        Ok(Some(with_assignee(record.clone())))
    }

    async fn delete(&self, shift_id: ShiftId) -> AppResult<bool> {
        Ok(lock(&self.shifts).remove(&shift_id.as_i64()).is_some())
    }
}
