//! The in-memory user registry.
//!
//! [`UserRegistry`] holds the ordered sequence of records and the counter
//! that assigns ids. Records keep insertion order. The counter only moves
//! forward, so an id is never handed out twice even after its record is
//! deleted.
//!
//! The registry itself is not synchronized. Callers that share it across
//! tasks must hold a single lock around each operation so that the
//! check-then-mutate steps of create, update, and delete run as one unit.

use std::collections::BTreeSet;

use roster_types::{NewUser, User, UserId, UserPatch};
use tracing::{debug, info};

use crate::error::RegistryError;

/// Errors raised when a seed would break the registry invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeedError {
    /// Two seed records share an id.
    #[error("duplicate seed user id {0}")]
    DuplicateId(UserId),

    /// Two seed records share an email.
    #[error("duplicate seed user email {0}")]
    DuplicateEmail(String),

    /// The configured counter would hand out an id already in the seed.
    #[error("seed next_id {next_id} must be greater than the largest seed id {max_id}")]
    StaleNextId {
        /// The configured counter value.
        next_id: UserId,
        /// The largest id present in the seed.
        max_id: UserId,
    },

    /// A seed id sits at the top of the id space, leaving no room to grow.
    #[error("seed leaves no room for new user ids")]
    IdSpaceExhausted,
}

/// Ordered user records plus the monotonic id counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRegistry {
    users: Vec<User>,
    next_id: UserId,
}

impl UserRegistry {
    /// Create an empty registry whose first record will get id 1.
    pub const fn new() -> Self {
        Self {
            users: Vec::new(),
            next_id: UserId::FIRST,
        }
    }

    /// Create a registry pre-populated with `users`.
    ///
    /// When `next_id` is `None` the counter starts one past the largest
    /// seed id (or at 1 for an empty seed).
    ///
    /// # Errors
    ///
    /// Returns a [`SeedError`] if seed ids or emails repeat, or if the
    /// counter would collide with a seed id.
    pub fn with_seed(users: Vec<User>, next_id: Option<UserId>) -> Result<Self, SeedError> {
        let mut ids = BTreeSet::new();
        let mut emails = BTreeSet::new();
        for user in &users {
            if !ids.insert(user.id) {
                return Err(SeedError::DuplicateId(user.id));
            }
            if !emails.insert(user.email.as_str()) {
                return Err(SeedError::DuplicateEmail(user.email.clone()));
            }
        }

        let next_id = match (ids.last().copied(), next_id) {
            (None, Some(next_id)) => next_id,
            (None, None) => UserId::FIRST,
            (Some(max_id), Some(next_id)) if next_id <= max_id => {
                return Err(SeedError::StaleNextId { next_id, max_id });
            }
            (Some(_), Some(next_id)) => next_id,
            (Some(max_id), None) => max_id.next().ok_or(SeedError::IdSpaceExhausted)?,
        };

        Ok(Self { users, next_id })
    }

    /// All records in insertion order.
    pub fn list(&self) -> &[User] {
        &self.users
    }

    /// Records whose name or email contains `term`, ignoring case.
    ///
    /// An empty term returns every record.
    pub fn search(&self, term: &str) -> Vec<User> {
        if term.is_empty() {
            return self.users.clone();
        }
        let needle = term.to_lowercase();
        self.users
            .iter()
            .filter(|user| user.matches_lowercase(&needle))
            .cloned()
            .collect()
    }

    /// Append a new record and advance the counter.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Validation`] if `name`, `email`, or `age` is missing.
    /// - [`RegistryError::Conflict`] if the email is already registered
    ///   (exact, case-sensitive comparison).
    /// - [`RegistryError::IdSpaceExhausted`] if the counter cannot advance.
    pub fn create(&mut self, input: NewUser) -> Result<User, RegistryError> {
        let (Some(name), Some(email), Some(age)) = (input.name, input.email, input.age) else {
            return Err(RegistryError::missing_fields());
        };

        if self.users.iter().any(|user| user.email == email) {
            return Err(RegistryError::duplicate_email(&email));
        }

        let id = self.next_id;
        let next_id = id.next().ok_or(RegistryError::IdSpaceExhausted)?;

        let user = User {
            id,
            name,
            email,
            age,
        };
        self.users.push(user.clone());
        self.next_id = next_id;

        debug!(%id, %next_id, "user created");
        Ok(user)
    }

    /// Apply a partial update to the record with `id`.
    ///
    /// Fields that are absent or `null` in the patch keep their current
    /// value. The new email is not checked against other records.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Validation`] if `patch` is `None` (no body at all).
    ///   This is checked before the id lookup.
    /// - [`RegistryError::NotFound`] if no record has `id`.
    pub fn update(&mut self, id: UserId, patch: Option<UserPatch>) -> Result<User, RegistryError> {
        let patch = patch.ok_or_else(RegistryError::missing_body)?;

        let user = self
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or(RegistryError::NotFound(id))?;
        let noop = patch.is_noop();

        if let Some(name) = patch.name.into_option() {
            user.name = name;
        }
        if let Some(email) = patch.email.into_option() {
            user.email = email;
        }
        if let Some(age) = patch.age.into_option() {
            user.age = age;
        }

        info!(%id, noop, "user updated");
        Ok(user.clone())
    }

    /// Remove the record with `id` and return it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no record has `id`.
    pub fn delete(&mut self, id: UserId) -> Result<User, RegistryError> {
        let position = self
            .users
            .iter()
            .position(|user| user.id == id)
            .ok_or(RegistryError::NotFound(id))?;
        let removed = self.users.remove(position);

        info!(%id, remaining = self.users.len(), "user deleted");
        Ok(removed)
    }

    /// The id the next created record will receive.
    pub const fn next_id(&self) -> UserId {
        self.next_id
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the registry holds no records.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use roster_types::PatchField;

    use super::*;

    fn user(id: u64, name: &str, email: &str, age: i64) -> User {
        User {
            id: UserId::new(id),
            name: name.to_owned(),
            email: email.to_owned(),
            age,
        }
    }

    fn new_user(name: &str, email: &str, age: i64) -> NewUser {
        NewUser {
            name: Some(name.to_owned()),
            email: Some(email.to_owned()),
            age: Some(age),
        }
    }

    fn ana_registry() -> UserRegistry {
        UserRegistry::with_seed(vec![user(1, "Ana", "ana@x.com", 30)], Some(UserId::new(2))).unwrap()
    }

    #[test]
    fn create_assigns_counter_and_appends() {
        let mut registry = ana_registry();
        let created = registry.create(new_user("Bob", "bob@x.com", 25)).unwrap();

        assert_eq!(created, user(2, "Bob", "bob@x.com", 25));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.next_id(), UserId::new(3));
        assert_eq!(registry.list().last(), Some(&created));
    }

    #[test]
    fn create_rejects_each_missing_field() {
        let inputs = [
            NewUser { name: None, ..new_user("Bob", "bob@x.com", 25) },
            NewUser { email: None, ..new_user("Bob", "bob@x.com", 25) },
            NewUser { age: None, ..new_user("Bob", "bob@x.com", 25) },
            NewUser::default(),
        ];
        for input in inputs {
            let mut registry = ana_registry();
            let before = registry.clone();
            let err = registry.create(input).unwrap_err();
            assert_eq!(err, RegistryError::missing_fields());
            assert_eq!(registry, before);
        }
    }

    #[test]
    fn create_rejects_duplicate_email() {
        let mut registry = ana_registry();
        let before = registry.clone();

        let err = registry.create(new_user("Other Ana", "ana@x.com", 40)).unwrap_err();

        assert_eq!(err, RegistryError::Conflict("Email ana@x.com already exists.".to_owned()));
        assert_eq!(registry, before);
    }

    #[test]
    fn duplicate_email_check_is_case_sensitive() {
        let mut registry = ana_registry();
        assert!(registry.create(new_user("Ana Two", "ANA@x.com", 40)).is_ok());
    }

    #[test]
    fn ids_are_never_reused_after_delete() {
        let mut registry = ana_registry();
        let bob = registry.create(new_user("Bob", "bob@x.com", 25)).unwrap();
        registry.delete(bob.id).unwrap();

        let carla = registry.create(new_user("Carla", "carla@x.com", 41)).unwrap();

        assert!(carla.id > bob.id);
        assert_eq!(carla.id, UserId::new(3));
    }

    #[test]
    fn create_at_top_of_id_space_fails_without_mutation() {
        let mut registry = UserRegistry::with_seed(Vec::new(), Some(UserId::new(u64::MAX))).unwrap();
        let err = registry.create(new_user("Bob", "bob@x.com", 25)).unwrap_err();
        assert_eq!(err, RegistryError::IdSpaceExhausted);
        assert!(registry.is_empty());
    }

    #[test]
    fn search_empty_term_returns_all() {
        let mut registry = ana_registry();
        registry.create(new_user("Bob", "bob@x.com", 25)).unwrap();
        assert_eq!(registry.search(""), registry.list().to_vec());
    }

    #[test]
    fn search_matches_name_or_email_ignoring_case() {
        let mut registry = ana_registry();
        registry.create(new_user("Bob", "bob@work.org", 25)).unwrap();

        let by_name = registry.search("AN");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name.first().map(|u| u.id), Some(UserId::new(1)));

        let by_email = registry.search("WORK");
        assert_eq!(by_email.first().map(|u| u.id), Some(UserId::new(2)));
    }

    #[test]
    fn search_without_match_is_empty() {
        assert!(ana_registry().search("zzz").is_empty());
    }

    #[test]
    fn update_only_age() {
        let mut registry = ana_registry();
        let patch = UserPatch {
            age: PatchField::Value(31),
            ..UserPatch::default()
        };

        let updated = registry.update(UserId::new(1), Some(patch)).unwrap();

        assert_eq!(updated, user(1, "Ana", "ana@x.com", 31));
        assert_eq!(registry.list().first(), Some(&updated));
    }

    #[test]
    fn update_null_fields_keep_current_values() {
        let mut registry = ana_registry();
        let patch = UserPatch {
            name: PatchField::Null,
            email: PatchField::Null,
            age: PatchField::Null,
        };

        let updated = registry.update(UserId::new(1), Some(patch)).unwrap();

        assert_eq!(updated, user(1, "Ana", "ana@x.com", 30));
    }

    #[test]
    fn update_empty_patch_is_accepted() {
        let mut registry = ana_registry();
        let updated = registry.update(UserId::new(1), Some(UserPatch::default())).unwrap();
        assert_eq!(updated, user(1, "Ana", "ana@x.com", 30));
    }

    #[test]
    fn update_does_not_recheck_email_uniqueness() {
        let mut registry = ana_registry();
        let bob = registry.create(new_user("Bob", "bob@x.com", 25)).unwrap();
        let patch = UserPatch {
            email: PatchField::Value("ana@x.com".to_owned()),
            ..UserPatch::default()
        };

        let updated = registry.update(bob.id, Some(patch)).unwrap();

        assert_eq!(updated.email, "ana@x.com");
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut registry = ana_registry();
        let before = registry.clone();
        let err = registry.update(UserId::new(99), Some(UserPatch::default())).unwrap_err();
        assert_eq!(err, RegistryError::NotFound(UserId::new(99)));
        assert_eq!(registry, before);
    }

    #[test]
    fn update_without_body_fails_before_lookup() {
        let mut registry = ana_registry();
        assert_eq!(
            registry.update(UserId::new(99), None).unwrap_err(),
            RegistryError::missing_body()
        );
        assert_eq!(
            registry.update(UserId::new(1), None).unwrap_err(),
            RegistryError::missing_body()
        );
    }

    #[test]
    fn delete_then_delete_again() {
        let mut registry = ana_registry();
        let removed = registry.delete(UserId::new(1)).unwrap();

        assert_eq!(removed.name, "Ana");
        assert!(registry.is_empty());
        assert_eq!(
            registry.delete(UserId::new(1)).unwrap_err(),
            RegistryError::NotFound(UserId::new(1))
        );
    }

    #[test]
    fn seed_defaults_counter_past_largest_id() {
        let registry = UserRegistry::with_seed(
            vec![user(3, "C", "c@x.com", 1), user(7, "G", "g@x.com", 2)],
            None,
        )
        .unwrap();
        assert_eq!(registry.next_id(), UserId::new(8));
    }

    #[test]
    fn empty_seed_starts_at_first_id() {
        let registry = UserRegistry::with_seed(Vec::new(), None).unwrap();
        assert_eq!(registry.next_id(), UserId::FIRST);
        assert_eq!(registry, UserRegistry::new());
    }

    #[test]
    fn seed_rejects_broken_invariants() {
        let dup_id = UserRegistry::with_seed(
            vec![user(1, "A", "a@x.com", 1), user(1, "B", "b@x.com", 2)],
            None,
        );
        assert_eq!(dup_id.unwrap_err(), SeedError::DuplicateId(UserId::new(1)));

        let dup_email = UserRegistry::with_seed(
            vec![user(1, "A", "a@x.com", 1), user(2, "B", "a@x.com", 2)],
            None,
        );
        assert_eq!(dup_email.unwrap_err(), SeedError::DuplicateEmail("a@x.com".to_owned()));

        let stale = UserRegistry::with_seed(vec![user(5, "A", "a@x.com", 1)], Some(UserId::new(5)));
        assert_eq!(
            stale.unwrap_err(),
            SeedError::StaleNextId {
                next_id: UserId::new(5),
                max_id: UserId::new(5),
            }
        );

        let full = UserRegistry::with_seed(vec![user(u64::MAX, "A", "a@x.com", 1)], None);
        assert_eq!(full.unwrap_err(), SeedError::IdSpaceExhausted);
    }
}
