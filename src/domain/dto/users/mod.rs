pub mod request;
pub mod response;

pub use request::{EmailCheckRequest, LoginRequest, RegisterUserRequest};
pub use response::UserResponse;
