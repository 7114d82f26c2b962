//! User account management service.

use std::sync::Arc;

use validator::ValidateEmail;

use crate::domain::entities::{NewUser, NewUserRecord, User, UserRecordChanges, UserUpdate};
use crate::domain::password::PasswordHasher;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

pub const NAME_MAX_LEN: usize = 100;
pub const EMAIL_MAX_LEN: usize = 255;

/// Service for creating, updating, deleting and reading users.
///
/// Enforces:
/// - Name: 1-100 characters, not blank
/// - Email: valid address, at most 255 characters, unique across users
///   regardless of case
///
/// Names and emails are stored exactly as submitted.
/// - Password: non-empty (hashed before it reaches the repository)
/// - Existence of the target user on update, delete and lookup
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NameValidation`], [`AppError::EmailValidation`] or
    /// [`AppError::PasswordValidation`] if a field is invalid.
    /// Returns [`AppError::EmailAlreadyExists`] if the email is taken.
    /// Returns [`AppError::Internal`] on storage or hashing errors.
    pub async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        validate_name(&new_user.name)?;
        validate_email(&new_user.email)?;
        validate_password(&new_user.password)?;

        if self
            .repository
            .find_by_email(&new_user.email)
            .await?
            .is_some()
        {
            return Err(AppError::email_already_exists(&new_user.email));
        }

        let password_hash = self.hasher.hash(&new_user.password).await?;

        let user = self
            .repository
            .create(NewUserRecord {
                name: new_user.name,
                email: new_user.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    /// Overwrites name and email, and the password when one is supplied.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UserNotExist`] if no user has this id.
    /// Returns a validation error if a field is invalid.
    /// Returns [`AppError::EmailAlreadyExists`] if the email belongs to another user.
    /// Returns [`AppError::Internal`] on storage or hashing errors.
    pub async fn update(&self, id: i64, update: UserUpdate) -> Result<User, AppError> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(AppError::user_not_exist(id));
        }

        validate_name(&update.name)?;
        validate_email(&update.email)?;
        if let Some(password) = &update.password {
            validate_password(password)?;
        }

        if let Some(owner) = self.repository.find_by_email(&update.email).await?
            && owner.id != id
        {
            return Err(AppError::email_already_exists(&update.email));
        }

        let password_hash = match &update.password {
            Some(password) => Some(self.hasher.hash(password).await?),
            None => None,
        };

        let user = self
            .repository
            .update(
                id,
                UserRecordChanges {
                    name: update.name,
                    email: update.email,
                    password_hash,
                },
            )
            .await?
            .ok_or_else(|| AppError::user_not_exist(id))?;

        tracing::info!(user_id = user.id, "User updated");
        Ok(user)
    }

    /// Deletes a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UserNotExist`] if no user has this id.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::user_not_exist(id));
        }

        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Retrieves a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UserNotExist`] if no user has this id.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_by_id(&self, id: i64) -> Result<User, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::user_not_exist(id))
    }

    /// Lists all users ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_all(&self) -> Result<Vec<User>, AppError> {
        self.repository.list().await
    }

    /// Checks that the underlying store is reachable.
    pub async fn health_check(&self) -> bool {
        self.repository.health_check().await
    }
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() || name.chars().count() > NAME_MAX_LEN {
        return Err(AppError::name_validation(format!(
            "name must be between 1 and {NAME_MAX_LEN} characters"
        )));
    }

    Ok(())
}

fn validate_email(email: &str) -> Result<(), AppError> {
    if email.len() > EMAIL_MAX_LEN {
        return Err(AppError::email_validation(format!(
            "email must be at most {EMAIL_MAX_LEN} characters"
        )));
    }

    if !email.validate_email() {
        return Err(AppError::email_validation("invalid email format"));
    }

    Ok(())
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.is_empty() {
        return Err(AppError::password_validation("password must not be empty"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::password::MockPasswordHasher;
    use crate::domain::repositories::MockUserRepository;
    use chrono::Utc;

    fn create_test_user(id: i64, name: &str, email: &str) -> User {
        User::new(
            id,
            name.to_string(),
            email.to_string(),
            "hashed".to_string(),
            Utc::now(),
            Utc::now(),
        )
    }

    fn new_user(name: &str, email: &str, password: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn hasher() -> MockPasswordHasher {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .returning(|p| Ok(format!("hashed:{p}")));
        hasher
    }

    fn service(repo: MockUserRepository, hasher: MockPasswordHasher) -> UserService {
        UserService::new(Arc::new(repo), Arc::new(hasher))
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_email()
            .withf(|email| email == "Ana@X.com")
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_create()
            .withf(|record| {
                record.name == "  Ana "
                    && record.email == "Ana@X.com"
                    && record.password_hash == "hashed:secret"
            })
            .times(1)
            .returning(|record| Ok(create_test_user(1, &record.name, &record.email)));

        let service = service(mock_repo, hasher());

        let user = service
            .create(new_user("  Ana ", "Ana@X.com", "secret"))
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.name, "  Ana ");
        assert_eq!(user.email, "Ana@X.com");
    }

    #[tokio::test]
    async fn test_create_user_email_taken() {
        let mut mock_repo = MockUserRepository::new();

        let existing = create_test_user(3, "Bob", "ana@x.com");
        mock_repo
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo.expect_create().never();

        let service = service(mock_repo, MockPasswordHasher::new());

        let result = service.create(new_user("Ana", "ana@x.com", "p")).await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::EmailAlreadyExists { .. }
        ));
    }

    #[tokio::test]
    async fn test_create_user_invalid_email() {
        let service = service(MockUserRepository::new(), MockPasswordHasher::new());

        let result = service.create(new_user("Ana", "not-an-email", "p")).await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::EmailValidation { .. }
        ));
    }

    #[tokio::test]
    async fn test_create_user_blank_name() {
        let service = service(MockUserRepository::new(), MockPasswordHasher::new());

        let result = service.create(new_user("   ", "ana@x.com", "p")).await;

        assert!(matches!(result.unwrap_err(), AppError::NameValidation { .. }));
    }

    #[tokio::test]
    async fn test_create_user_name_too_long() {
        let service = service(MockUserRepository::new(), MockPasswordHasher::new());
        let name = "a".repeat(NAME_MAX_LEN + 1);

        let result = service.create(new_user(&name, "ana@x.com", "p")).await;

        assert!(matches!(result.unwrap_err(), AppError::NameValidation { .. }));
    }

    #[tokio::test]
    async fn test_create_user_empty_password() {
        let service = service(MockUserRepository::new(), MockPasswordHasher::new());

        let result = service.create(new_user("Ana", "ana@x.com", "")).await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::PasswordValidation { .. }
        ));
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_id()
            .withf(|id| *id == 99)
            .times(1)
            .returning(|_| Ok(None));
        mock_repo.expect_update().never();

        let service = service(mock_repo, MockPasswordHasher::new());

        let result = service
            .update(
                99,
                UserUpdate {
                    name: "Ana".to_string(),
                    email: "ana@x.com".to_string(),
                    password: None,
                },
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::UserNotExist { .. }));
    }

    #[tokio::test]
    async fn test_update_user_keeps_password_when_absent() {
        let mut mock_repo = MockUserRepository::new();

        let current = create_test_user(1, "Ana", "ana@x.com");
        let owner = current.clone();
        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(current.clone())));
        mock_repo
            .expect_find_by_email()
            .returning(move |_| Ok(Some(owner.clone())));
        mock_repo
            .expect_update()
            .withf(|id, changes| *id == 1 && changes.password_hash.is_none())
            .times(1)
            .returning(|id, changes| Ok(Some(create_test_user(id, &changes.name, &changes.email))));

        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().never();

        let service = service(mock_repo, hasher);

        let user = service
            .update(
                1,
                UserUpdate {
                    name: "Ana Maria".to_string(),
                    email: "ana@x.com".to_string(),
                    password: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(user.name, "Ana Maria");
    }

    #[tokio::test]
    async fn test_update_user_hashes_new_password() {
        let mut mock_repo = MockUserRepository::new();

        let current = create_test_user(1, "Ana", "ana@x.com");
        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(current.clone())));
        mock_repo.expect_find_by_email().returning(|_| Ok(None));
        mock_repo
            .expect_update()
            .withf(|_, changes| changes.password_hash.as_deref() == Some("hashed:new-secret"))
            .times(1)
            .returning(|id, changes| Ok(Some(create_test_user(id, &changes.name, &changes.email))));

        let service = service(mock_repo, hasher());

        let result = service
            .update(
                1,
                UserUpdate {
                    name: "Ana".to_string(),
                    email: "ana.new@x.com".to_string(),
                    password: Some("new-secret".to_string()),
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_user_email_owned_by_other_user() {
        let mut mock_repo = MockUserRepository::new();

        let current = create_test_user(1, "Ana", "ana@x.com");
        let other = create_test_user(2, "Bob", "bob@x.com");
        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(current.clone())));
        mock_repo
            .expect_find_by_email()
            .returning(move |_| Ok(Some(other.clone())));
        mock_repo.expect_update().never();

        let service = service(mock_repo, MockPasswordHasher::new());

        let result = service
            .update(
                1,
                UserUpdate {
                    name: "Ana".to_string(),
                    email: "bob@x.com".to_string(),
                    password: None,
                },
            )
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::EmailAlreadyExists { .. }
        ));
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo.expect_delete().times(1).returning(|_| Ok(false));

        let service = service(mock_repo, MockPasswordHasher::new());

        let result = service.delete_by_id(5).await;

        assert!(matches!(result.unwrap_err(), AppError::UserNotExist { .. }));
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_delete()
            .withf(|id| *id == 5)
            .times(1)
            .returning(|_| Ok(true));

        let service = service(mock_repo, MockPasswordHasher::new());

        assert!(service.delete_by_id(5).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = service(mock_repo, MockPasswordHasher::new());

        let result = service.get_by_id(1).await;

        assert!(matches!(result.unwrap_err(), AppError::UserNotExist { .. }));
    }

    #[tokio::test]
    async fn test_get_all() {
        let mut mock_repo = MockUserRepository::new();

        let users = vec![
            create_test_user(1, "Ana", "ana@x.com"),
            create_test_user(2, "Bob", "bob@x.com"),
        ];
        mock_repo
            .expect_list()
            .times(1)
            .returning(move || Ok(users.clone()));

        let service = service(mock_repo, MockPasswordHasher::new());

        let list = service.get_all().await.unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[1].email, "bob@x.com");
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("Ana@X.COM").is_ok());
        assert!(validate_email("ana@").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name(" Ana ").is_ok());
        assert!(validate_name(&"a".repeat(NAME_MAX_LEN)).is_ok());
        assert!(validate_name(" \t ").is_err());
        assert!(validate_name(&"a".repeat(NAME_MAX_LEN + 1)).is_err());
    }
}
