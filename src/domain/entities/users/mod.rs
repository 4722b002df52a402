//! Users Entity Module

pub mod user;
pub mod user_full_info;

pub use user::User;
pub use user_full_info::UserFullInfo;
