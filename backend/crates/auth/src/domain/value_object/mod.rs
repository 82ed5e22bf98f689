//! Value Objects

pub mod email;
pub mod user_name;
pub mod user_password;
pub mod user_role;

pub use email::Email;
pub use user_name::UserName;
pub use user_password::{RawPassword, UserPassword};
pub use user_role::Role;
