//! User account command handlers.

mod authenticate_user;
mod register_user;

pub use authenticate_user::{
    AuthenticateUserCommand, AuthenticateUserHandler, AuthenticateUserOutcome,
    AuthenticateUserResult,
};
pub use register_user::{RegisterUserCommand, RegisterUserHandler, RegisterUserResult};
