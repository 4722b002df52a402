//! # Core Module
//!
//! 유스케이스 실행을 위한 핵심 구성 요소를 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`pipeline`] - 단계 파이프라인 엔진
//! - **Step**: 컨텍스트와 결과를 받아 한 가지 일을 하는 단계
//! - **Pipeline**: 순서가 정해진 단계 목록을 실행하는 단일 드라이버 루프
//! - 첫 번째 실패에서 중단하며 이후 단계는 실행하지 않습니다
//!
//! ### [`compensation`] - 보상 동작
//! - **Compensation**: 백업 생성/삭제/복원 인터페이스
//! - **run_compensated**: 파이프라인 실패 시 백업 시점으로 복원
//!
//! ## 의존성 주입
//!
//! 전역 레지스트리 없이, 애플리케이션 시작 시 만든 `Arc` 핸들을
//! 각 서비스 생성자에 명시적으로 넘깁니다 ([`crate::state::AppState`] 참고).

pub mod compensation;
pub mod pipeline;

pub use compensation::{BackupId, Compensation, NoopCompensation, run_compensated};
pub use pipeline::{Pipeline, Step};
