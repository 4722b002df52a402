//! 관리자 서비스 모듈

pub mod admin_service;

pub use admin_service::AdminService;
