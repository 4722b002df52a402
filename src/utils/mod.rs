//! 공통 유틸리티 함수 모듈
//!
//! - [`string_utils`] - 요청 문자열 정리용 serde 보조 함수

pub mod string_utils;
