//! 단계(Step) 파이프라인 엔진
//!
//! 하나의 유스케이스를 여러 단계로 나누고, 순서가 정해진 단계 목록을
//! 하나의 드라이버 루프가 차례로 실행합니다.
//!
//! ## 실행 규칙
//!
//! - 각 단계는 요청마다 새로 만드는 컨텍스트 `C`와 결과 `R`을 변경 가능한 참조로 받습니다.
//! - 첫 번째 실패에서 즉시 중단하며, 이후 단계는 실행되지 않습니다.
//! - "기존 사용자가 이미 있으면 건너뛰기" 같은 분기는 단계 스스로 `Ok(())`를
//!   반환하는 방식으로 처리합니다. 드라이버는 분기를 알지 못합니다.
//!
//! ```rust,ignore
//! let pipeline = Pipeline::new("signup")
//!     .then(CheckUserAbsentStep::new(user_repo.clone()))
//!     .then(HashPasswordStep::new(cost))
//!     .then(SaveUserStep::new(user_repo.clone()));
//!
//! let mut context = UserComposition::from_signup(request);
//! let mut tokens = TokenPair::default();
//! pipeline.run(&mut context, &mut tokens).await?;
//! ```

use async_trait::async_trait;

use crate::errors::AppResult;

/// 파이프라인의 한 단계
#[async_trait]
pub trait Step<C, R>: Send + Sync {
    /// 로그에 남는 단계 이름
    fn name(&self) -> &'static str;

    async fn execute(&self, context: &mut C, result: &mut R) -> AppResult<()>;
}

/// 순서가 보장되는 단계 목록과 드라이버
pub struct Pipeline<C, R> {
    name: &'static str,
    steps: Vec<Box<dyn Step<C, R>>>,
}

impl<C, R> Pipeline<C, R>
where
    C: Send,
    R: Send,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: Vec::new(),
        }
    }

    /// 단계를 목록 끝에 추가합니다.
    pub fn then(mut self, step: impl Step<C, R> + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// 모든 단계를 순서대로 실행합니다.
    ///
    /// # Errors
    ///
    /// 처음 실패한 단계의 에러를 그대로 반환합니다.
    pub async fn run(&self, context: &mut C, result: &mut R) -> AppResult<()> {
        for step in &self.steps {
            log::debug!("[{}] {} 실행", self.name, step.name());

            if let Err(e) = step.execute(context, result).await {
                log::warn!("[{}] {} 단계 실패: {}", self.name, step.name(), e);
                return Err(e);
            }
        }

        Ok(())
    }
}
