//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 유스케이스는 단계 파이프라인([`steps`])으로 구성되고, 보상 동작으로 감싸 실행됩니다.
//! 모든 서비스는 애플리케이션 시작 시 한 번 만들어져
//! [`AppState`](crate::state::AppState)를 통해 핸들러에 공유됩니다.
//!
//! # Modules
//!
//! - [`auth`] - 자격 증명, 토큰, 로그인, 갱신, 역할 검사
//! - [`users`] - 가입, 프로필
//! - [`admin`] - 사용자 목록/삭제/역할 변경
//! - [`steps`] - 파이프라인 단계와 컴포지션 컨텍스트

pub mod admin;
pub mod auth;
pub mod steps;
pub mod users;
