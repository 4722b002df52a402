pub mod admin_repo;

pub use admin_repo::AdminRepository;
