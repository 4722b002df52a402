//! # 계정 파이프라인 단계
//!
//! 가입, 로그인(패스워드/Google), 토큰 갱신 파이프라인을 구성하는 단계들입니다.
//! 모든 단계는 요청마다 새로 만드는 [`UserComposition`]을 공유하고,
//! 결과로 [`TokenPair`](crate::domain::models::TokenPair)를 채웁니다.
//!
//! | 유스케이스 | 단계 순서 |
//! |-----------|-----------|
//! | 가입 | CheckUserAbsent → HashPassword → SaveUser → SaveProfile → AssignDefaultRole → IssueTokens |
//! | 로그인 | FetchUser → VerifyPassword → IssueTokens |
//! | Google 로그인 | FetchFederatedIdentity → FetchUser → SaveUser → SaveProfile → AssignDefaultRole → IssueTokens |
//! | 토큰 갱신 | ExtractRefreshSubject → FetchUser → VerifyStoredRefreshToken → IssueTokens |
//!
//! Google 로그인에서 기존 사용자가 있으면 SaveUser/SaveProfile/AssignDefaultRole은
//! 아무 일도 하지 않고 다음 단계로 넘어갑니다.

pub mod composition;
pub mod federated_steps;
pub mod token_steps;
pub mod user_steps;

pub use composition::{AccountRequest, UserComposition};
pub use federated_steps::FetchFederatedIdentityStep;
pub use token_steps::{ExtractRefreshSubjectStep, IssueTokensStep, VerifyStoredRefreshTokenStep};
pub use user_steps::{
    AssignDefaultRoleStep, CheckUserAbsentStep, FetchUserStep, HashPasswordStep, SaveProfileStep,
    SaveUserStep, VerifyPasswordStep,
};
