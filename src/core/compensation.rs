//! 보상 동작(Compensating Action)
//!
//! 여러 단계에 걸쳐 쓰기를 하는 유스케이스는 트랜잭션 대신 실행 전 백업과
//! 실패 시 복원으로 롤백을 근사합니다. 백업 방식은 [`Compensation`] trait 뒤에 숨겨져
//! 있어, 실제 트랜잭션 기반 구현으로 교체해도 파이프라인 코드는 바뀌지 않습니다.
//!
//! ## 실행 흐름
//!
//! ```text
//! create_backup ──실패──▶ InternalError (아무 것도 쓰지 않은 상태)
//!      │
//!   pipeline.run
//!      ├─ 성공 ─▶ delete_backup ──실패──▶ InternalError
//!      └─ 실패 ─▶ restore_and_delete
//!                   ├─ 성공 ─▶ 원래 에러 반환
//!                   └─ 실패 ─▶ InternalError (복원 실패가 원래 에러를 대체)
//! ```

use async_trait::async_trait;

use crate::core::pipeline::Pipeline;
use crate::errors::{AppError, AppResult};

/// 요청 단위 백업 식별자
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupId(String);

impl BackupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BackupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
pub trait Compensation: Send + Sync {
    async fn create_backup(&self) -> AppResult<BackupId>;

    async fn delete_backup(&self, backup: &BackupId) -> AppResult<()>;

    /// 백업 시점의 상태로 저장소를 되돌립니다.
    async fn restore(&self, backup: &BackupId) -> AppResult<()>;

    /// 복원 후 백업을 삭제합니다. 삭제 실패는 경고만 남깁니다.
    async fn restore_and_delete(&self, backup: &BackupId) -> AppResult<()> {
        self.restore(backup).await?;

        if let Err(e) = self.delete_backup(backup).await {
            log::warn!("복원 후 백업 삭제 실패 ({}): {}", backup, e);
        }

        Ok(())
    }
}

/// 아무 것도 하지 않는 보상 구현 (백업 비활성화 시 사용)
pub struct NoopCompensation;

#[async_trait]
impl Compensation for NoopCompensation {
    async fn create_backup(&self) -> AppResult<BackupId> {
        Ok(BackupId::new("noop"))
    }

    async fn delete_backup(&self, _backup: &BackupId) -> AppResult<()> {
        Ok(())
    }

    async fn restore(&self, _backup: &BackupId) -> AppResult<()> {
        Ok(())
    }
}

/// 백업 → 파이프라인 실행 → 복원 또는 백업 삭제
///
/// # Errors
///
/// * 파이프라인의 원래 에러 - 복원에 성공한 경우
/// * `AppError::InternalError` - 백업 생성, 복원, 백업 삭제가 실패한 경우
pub async fn run_compensated<C, R>(
    compensation: &dyn Compensation,
    pipeline: &Pipeline<C, R>,
    context: &mut C,
    result: &mut R,
) -> AppResult<()>
where
    C: Send,
    R: Send,
{
    let backup = compensation
        .create_backup()
        .await
        .map_err(|e| AppError::InternalError(format!("백업 생성 실패: {}", e)))?;

    match pipeline.run(context, result).await {
        Ok(()) => compensation
            .delete_backup(&backup)
            .await
            .map_err(|e| AppError::InternalError(format!("백업 삭제 실패: {}", e))),
        Err(original) => {
            if let Err(restore_error) = compensation.restore_and_delete(&backup).await {
                log::error!(
                    "❌ 복원 실패 ({}): {} / 원래 에러: {}",
                    backup,
                    restore_error,
                    original
                );
                return Err(AppError::InternalError(format!(
                    "복원 실패: {}",
                    restore_error
                )));
            }

            Err(original)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::tests::CountingStep;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    /// 호출 순서를 기록하고 실패 지점을 주입할 수 있는 보상 구현
    #[derive(Default)]
    struct RecordingCompensation {
        calls: Mutex<Vec<&'static str>>,
        fail_create: bool,
        fail_restore: bool,
        fail_delete: bool,
    }

    impl RecordingCompensation {
        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Compensation for RecordingCompensation {
        async fn create_backup(&self) -> AppResult<BackupId> {
            self.record("create");
            if self.fail_create {
                return Err(AppError::DatabaseError("disk full".to_string()));
            }
            Ok(BackupId::new("b1"))
        }

        async fn delete_backup(&self, _backup: &BackupId) -> AppResult<()> {
            self.record("delete");
            if self.fail_delete {
                return Err(AppError::DatabaseError("unlink failed".to_string()));
            }
            Ok(())
        }

        async fn restore(&self, _backup: &BackupId) -> AppResult<()> {
            self.record("restore");
            if self.fail_restore {
                return Err(AppError::DatabaseError("restore failed".to_string()));
            }
            Ok(())
        }
    }

    fn pipeline(fail: bool, calls: Arc<AtomicUsize>) -> Pipeline<(), ()> {
        let step = if fail {
            CountingStep::failing(calls)
        } else {
            CountingStep::ok(calls)
        };
        Pipeline::new("compensated").then(step)
    }

    #[actix_web::test]
    async fn test_success_deletes_backup() {
        let compensation = RecordingCompensation::default();
        let outcome = run_compensated(&compensation, &pipeline(false, Arc::default()), &mut (), &mut ()).await;

        assert!(outcome.is_ok());
        assert_eq!(compensation.calls(), vec!["create", "delete"]);
    }

    #[actix_web::test]
    async fn test_failure_restores_and_returns_original_error() {
        let compensation = RecordingCompensation::default();
        let outcome = run_compensated(&compensation, &pipeline(true, Arc::default()), &mut (), &mut ()).await;

        match outcome {
            Err(AppError::InternalError(msg)) => assert!(msg.contains("instrumented failure")),
            other => panic!("expected original error, got {:?}", other),
        }
        assert_eq!(compensation.calls(), vec!["create", "restore", "delete"]);
    }

    #[actix_web::test]
    async fn test_restore_failure_replaces_original_error() {
        let compensation = RecordingCompensation {
            fail_restore: true,
            ..Default::default()
        };
        let outcome = run_compensated(&compensation, &pipeline(true, Arc::default()), &mut (), &mut ()).await;

        match outcome {
            Err(AppError::InternalError(msg)) => assert!(msg.contains("복원 실패")),
            other => panic!("expected restore failure, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_backup_failure_prevents_any_step() {
        let steps = Arc::new(AtomicUsize::new(0));
        let compensation = RecordingCompensation {
            fail_create: true,
            ..Default::default()
        };
        let outcome = run_compensated(&compensation, &pipeline(false, steps.clone()), &mut (), &mut ()).await;

        assert!(matches!(outcome, Err(AppError::InternalError(_))));
        assert_eq!(steps.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn test_delete_failure_after_success_is_server_error() {
        let compensation = RecordingCompensation {
            fail_delete: true,
            ..Default::default()
        };
        let outcome = run_compensated(&compensation, &pipeline(false, Arc::default()), &mut (), &mut ()).await;

        assert!(matches!(outcome, Err(AppError::InternalError(_))));
    }

    #[actix_web::test]
    async fn test_noop_compensation_is_transparent() {
        let outcome = run_compensated(&NoopCompensation, &pipeline(true, Arc::default()), &mut (), &mut ()).await;
        assert!(matches!(outcome, Err(AppError::InternalError(msg)) if msg.contains("instrumented")));
    }
}
