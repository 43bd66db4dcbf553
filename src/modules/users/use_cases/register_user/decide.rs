// Pure validation for user registration. No input or output.

use crate::modules::users::core::user::NewUser;
use crate::modules::users::use_cases::register_user::command::RegisterUser;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("username is required")]
    MissingUsername,

    #[error("email is required")]
    MissingEmail,

    #[error("email must contain '@'")]
    InvalidEmail,
}

pub fn decide_register(command: RegisterUser) -> Result<NewUser, DecideError> {
    let username = command.username.trim();
    let email = command.email.trim();
    if username.is_empty() {
        return Err(DecideError::MissingUsername);
    }
    if email.is_empty() {
        return Err(DecideError::MissingEmail);
    }
    if !email.contains('@') {
        return Err(DecideError::InvalidEmail);
    }
    Ok(NewUser {
        username: username.to_string(),
        email: email.to_string(),
        created_at: command.registered_at,
    })
}
