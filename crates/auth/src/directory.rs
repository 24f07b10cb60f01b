use chrono::{DateTime, Utc};

use autoshop_core::{DomainError, DomainResult};

use crate::user::User;

/// The set of known users, looked up by case-insensitive id.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    /// Build a directory. A repeated id (ignoring case) keeps the first user.
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        let mut directory = Self::default();
        for user in users {
            if directory.find(user.user_id().as_str()).is_some() {
                tracing::warn!(user_id = %user.user_id(), "duplicate user id skipped");
                continue;
            }
            directory.users.push(user);
        }
        directory
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.user_id().matches(user_id))
    }

    /// Check credentials and return the authenticated user.
    ///
    /// Unknown ids and wrong passwords fail the same way. Admins get their login
    /// stamped with `at`.
    pub fn authenticate(
        &mut self,
        user_id: &str,
        password: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<&mut User> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.user_id().matches(user_id))
            .filter(|u| u.verify_password(password))
            .ok_or(DomainError::InvalidCredentials)?;

        if let User::Admin(admin) = user {
            admin.record_login(at);
        }
        tracing::info!(user_id = %user.user_id(), access = %user.access_level(), "user authenticated");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::{Admin, Customer};
    use autoshop_core::UserId;

    fn directory() -> UserDirectory {
        UserDirectory::new([
            User::from(Admin::new(UserId::new("admin").unwrap(), "admin", "Administrator")),
            User::from(
                Customer::new(UserId::new("Cathy").unwrap(), "cathy", "Cathy Customer")
                    .with_contact("123 Main St", "555-1234"),
            ),
        ])
    }

    #[test]
    fn authenticate_matches_user_id_case_insensitively() {
        let mut users = directory();
        let user = users.authenticate("CATHY", "cathy", Utc::now()).unwrap();
        assert_eq!(user.name(), "Cathy Customer");
    }

    #[test]
    fn wrong_password_or_unknown_user_is_invalid_credentials() {
        let mut users = directory();
        assert_eq!(
            users.authenticate("cathy", "CATHY", Utc::now()).unwrap_err(),
            DomainError::InvalidCredentials
        );
        assert_eq!(
            users.authenticate("nobody", "cathy", Utc::now()).unwrap_err(),
            DomainError::InvalidCredentials
        );
    }

    #[test]
    fn admin_login_is_stamped() {
        let mut users = directory();
        let at = Utc::now();
        match users.authenticate("Admin", "admin", at).unwrap() {
            User::Admin(admin) => assert_eq!(admin.last_login_at(), Some(at)),
            other => panic!("expected admin, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_ids_keep_first_user() {
        let users = UserDirectory::new([
            User::from(Customer::new(UserId::new("sam").unwrap(), "a", "First")),
            User::from(Customer::new(UserId::new("SAM").unwrap(), "b", "Second")),
        ]);
        assert_eq!(users.len(), 1);
        assert_eq!(users.find("sam").unwrap().name(), "First");
    }
}
