//! User Data

use crate::{
    domain::users::{errors::UsersServiceError, records::UserUuid},
    validation::{non_blank, normalise_email},
};

/// Passwords shorter than this are rejected at signup.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// New User Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    /// Trim the name, normalise the email and check the password length.
    ///
    /// # Errors
    ///
    /// Returns [`UsersServiceError::InvalidData`] describing the first invalid field.
    pub fn validated(self) -> Result<Self, UsersServiceError> {
        let name = non_blank(&self.name)
            .ok_or(UsersServiceError::InvalidData("name is required"))?
            .to_string();

        let email = normalise_email(&self.email)
            .ok_or(UsersServiceError::InvalidData("a valid email is required"))?;

        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(UsersServiceError::InvalidData(
                "password must be at least 6 characters",
            ));
        }

        Ok(Self {
            uuid: self.uuid,
            name,
            email,
            password: self.password,
        })
    }
}

/// Login Credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user() -> NewUser {
        NewUser {
            uuid: UserUuid::new(),
            name: " Ada ".to_string(),
            email: " Ada@Example.COM ".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[test]
    fn validated_normalises_name_and_email() -> Result<(), UsersServiceError> {
        let user = new_user().validated()?;

        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");

        Ok(())
    }

    #[test]
    fn validated_rejects_short_password() {
        let result = NewUser {
            password: "12345".to_string(),
            ..new_user()
        }
        .validated();

        assert!(matches!(result, Err(UsersServiceError::InvalidData(_))));
    }

    #[test]
    fn validated_rejects_malformed_email() {
        let result = NewUser {
            email: "not-an-email".to_string(),
            ..new_user()
        }
        .validated();

        assert!(matches!(result, Err(UsersServiceError::InvalidData(_))));
    }

    #[test]
    fn validated_rejects_blank_name() {
        let result = NewUser {
            name: "  ".to_string(),
            ..new_user()
        }
        .validated();

        assert!(matches!(result, Err(UsersServiceError::InvalidData(_))));
    }
}
