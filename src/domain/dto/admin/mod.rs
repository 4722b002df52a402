pub mod request;
pub mod response;

pub use request::{DeleteUserQuery, PaginationRequest, RoleAssignRequest};
pub use response::{DeleteUserResponse, RoleAssignResponse, UsersListResponse};
