pub mod role_repo;

pub use role_repo::RoleRepository;
