//! 사용자 조회/생성 단계

use async_trait::async_trait;

use crate::{
    core::Step,
    domain::{
        entities::{Role, User},
        models::TokenPair,
    },
    errors::{AppError, AppResult},
    repositories::{ProfileRepository, RoleRepository, UserRepository},
    services::auth::credentials,
    services::steps::{AccountRequest, UserComposition},
};

/// 가입 요청의 사용자명/이메일이 이미 사용 중이면 중단합니다.
pub struct CheckUserAbsentStep {
    users: UserRepository,
}

impl CheckUserAbsentStep {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }
}

#[async_trait]
impl Step<UserComposition, TokenPair> for CheckUserAbsentStep {
    fn name(&self) -> &'static str {
        "CheckUserAbsent"
    }

    async fn execute(&self, context: &mut UserComposition, _: &mut TokenPair) -> AppResult<()> {
        let AccountRequest::Signup(request) = &context.request else {
            return Err(context.unexpected(self.name()));
        };

        let found = self
            .users
            .get_user_by_username_or_email(Some(&request.username), Some(&request.email))
            .await?;

        if found.is_some() {
            return Err(AppError::ConflictError(
                "이미 사용 중인 사용자명 또는 이메일입니다".to_string(),
            ));
        }

        Ok(())
    }
}

/// 가입 패스워드를 해시하고 새 사용자를 컨텍스트에 올립니다.
pub struct HashPasswordStep {
    cost: u32,
}

impl HashPasswordStep {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

#[async_trait]
impl Step<UserComposition, TokenPair> for HashPasswordStep {
    fn name(&self) -> &'static str {
        "HashPassword"
    }

    async fn execute(&self, context: &mut UserComposition, _: &mut TokenPair) -> AppResult<()> {
        let AccountRequest::Signup(request) = &context.request else {
            return Err(context.unexpected(self.name()));
        };

        let hash = credentials::hash_password(&request.password, self.cost).await?;
        context.new_user = Some(User::new_local(
            request.username.clone(),
            request.email.clone(),
            hash,
        ));

        Ok(())
    }
}

/// 요청 종류에 맞는 키로 기존 사용자를 조회합니다.
///
/// - 로그인: 사용자명 또는 이메일, 없으면 `NotFound`
/// - Google: 제공자 이메일, 없으면 새 사용자 경로로 진행.
///   이메일이 다른 사용자가 그 이메일을 사용자명으로 쓰고 있으면 `ConflictError`
/// - 토큰 갱신: 리프레시 토큰 subject, 없으면 `NotFound`
pub struct FetchUserStep {
    users: UserRepository,
}

impl FetchUserStep {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    /// 새 Google 사용자의 사용자명은 이메일이므로 두 키를 모두 확인합니다.
    async fn find_federated(&self, email: &str) -> AppResult<Option<User>> {
        if let Some(user) = self.users.get_user_by_email(email).await? {
            return Ok(Some(user));
        }

        if let Some(owner) = self.users.get_user_by_name(email).await? {
            log::warn!("⚠️ Google 이메일이 다른 계정의 사용자명과 겹칩니다 (id {})", owner.id);
            return Err(AppError::ConflictError(
                "이미 사용 중인 사용자명입니다".to_string(),
            ));
        }

        Ok(None)
    }
}

#[async_trait]
impl Step<UserComposition, TokenPair> for FetchUserStep {
    fn name(&self) -> &'static str {
        "FetchUser"
    }

    async fn execute(&self, context: &mut UserComposition, _: &mut TokenPair) -> AppResult<()> {
        let found = match &context.request {
            AccountRequest::Login(request) => {
                let user = self
                    .users
                    .get_user_by_username_or_email(request.username.as_deref(), request.email.as_deref())
                    .await?;
                Some(user.ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?)
            }
            AccountRequest::Google { .. } => {
                let email = context
                    .new_user
                    .as_ref()
                    .map(|u| u.email.clone())
                    .ok_or_else(|| AppError::InternalError("제공자 사용자 정보가 없습니다".to_string()))?;
                self.find_federated(&email).await?
            }
            AccountRequest::Refresh { .. } => {
                let subject = context
                    .subject_id
                    .ok_or_else(|| AppError::InternalError("토큰 subject가 없습니다".to_string()))?;
                let user = self.users.get_user_by_id(subject).await?;
                Some(user.ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?)
            }
            AccountRequest::Signup(_) => return Err(context.unexpected(self.name())),
        };

        context.existing_user = found;
        Ok(())
    }
}

/// 로그인 패스워드를 저장된 해시와 비교합니다.
pub struct VerifyPasswordStep;

#[async_trait]
impl Step<UserComposition, TokenPair> for VerifyPasswordStep {
    fn name(&self) -> &'static str {
        "VerifyPassword"
    }

    async fn execute(&self, context: &mut UserComposition, _: &mut TokenPair) -> AppResult<()> {
        let AccountRequest::Login(request) = &context.request else {
            return Err(context.unexpected(self.name()));
        };
        let user = context
            .existing_user
            .as_ref()
            .ok_or_else(|| AppError::InternalError("검증할 사용자가 없습니다".to_string()))?;

        // Google 사용자는 패스워드가 없습니다
        if !user.can_authenticate_with_password()
            || !credentials::verify_password(&user.password, &request.password).await?
        {
            return Err(AppError::AuthenticationError(
                "사용자명 또는 비밀번호가 올바르지 않습니다".to_string(),
            ));
        }

        Ok(())
    }
}

/// 새 사용자를 저장하고 ID를 기록합니다. 기존 사용자가 있으면 건너뜁니다.
pub struct SaveUserStep {
    users: UserRepository,
}

impl SaveUserStep {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }
}

#[async_trait]
impl Step<UserComposition, TokenPair> for SaveUserStep {
    fn name(&self) -> &'static str {
        "SaveUser"
    }

    async fn execute(&self, context: &mut UserComposition, _: &mut TokenPair) -> AppResult<()> {
        if context.existing_user.is_some() {
            return Ok(());
        }

        let user = context.new_user_mut()?;
        user.id = self.users.create_user(user).await?;
        log::info!("👤 새 사용자 생성: {} (id {})", user.username, user.id);

        Ok(())
    }
}

/// 새 사용자의 프로필을 만듭니다. 닉네임은 사용자명입니다.
pub struct SaveProfileStep {
    profiles: ProfileRepository,
}

impl SaveProfileStep {
    pub fn new(profiles: ProfileRepository) -> Self {
        Self { profiles }
    }
}

#[async_trait]
impl Step<UserComposition, TokenPair> for SaveProfileStep {
    fn name(&self) -> &'static str {
        "SaveProfile"
    }

    async fn execute(&self, context: &mut UserComposition, _: &mut TokenPair) -> AppResult<()> {
        if context.existing_user.is_some() {
            return Ok(());
        }

        let user = context.new_user_mut()?;
        self.profiles.create_profile(user.id, &user.username).await?;
        Ok(())
    }
}

/// 새 사용자에게 기본 역할 `user`를 부여합니다.
pub struct AssignDefaultRoleStep {
    roles: RoleRepository,
}

impl AssignDefaultRoleStep {
    pub fn new(roles: RoleRepository) -> Self {
        Self { roles }
    }
}

#[async_trait]
impl Step<UserComposition, TokenPair> for AssignDefaultRoleStep {
    fn name(&self) -> &'static str {
        "AssignDefaultRole"
    }

    async fn execute(&self, context: &mut UserComposition, _: &mut TokenPair) -> AppResult<()> {
        if context.existing_user.is_some() {
            return Ok(());
        }

        let user = context.new_user_mut()?;
        self.roles.create_role(user.id, Role::User).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::memory_database;
    use crate::domain::dto::{LoginRequest, SignupRequest};

    fn signup_request(username: &str, email: &str) -> AccountRequest {
        AccountRequest::Signup(SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
        })
    }

    #[actix_web::test]
    async fn test_check_user_absent_detects_either_key() {
        let db = memory_database().await;
        let users = UserRepository::new(db);
        users
            .create_user(&User::new_local("alice".into(), "alice@example.com".into(), "h".into()))
            .await
            .unwrap();
        let step = CheckUserAbsentStep::new(users);

        let mut tokens = TokenPair::default();
        let mut same_email = UserComposition::new(signup_request("other", "alice@example.com"));
        let mut same_name = UserComposition::new(signup_request("alice", "other@example.com"));
        let mut fresh = UserComposition::new(signup_request("bob", "bob@example.com"));

        assert!(matches!(
            step.execute(&mut same_email, &mut tokens).await,
            Err(AppError::ConflictError(_))
        ));
        assert!(matches!(
            step.execute(&mut same_name, &mut tokens).await,
            Err(AppError::ConflictError(_))
        ));
        assert!(step.execute(&mut fresh, &mut tokens).await.is_ok());
    }

    #[actix_web::test]
    async fn test_hash_password_builds_new_user() {
        let mut context = UserComposition::new(signup_request("bob", "bob@example.com"));
        HashPasswordStep::new(4)
            .execute(&mut context, &mut TokenPair::default())
            .await
            .unwrap();

        let user = context.new_user.unwrap();
        assert_eq!(user.username, "bob");
        assert!(user.password.starts_with("$2"));
    }

    #[actix_web::test]
    async fn test_steps_reject_unexpected_request() {
        let mut context = UserComposition::new(AccountRequest::Refresh {
            refresh_token: "t".into(),
        });
        let result = VerifyPasswordStep.execute(&mut context, &mut TokenPair::default()).await;
        assert!(matches!(result, Err(AppError::InternalError(_))));
    }

    #[actix_web::test]
    async fn test_verify_password_rejects_federated_user() {
        let mut context = UserComposition::new(AccountRequest::Login(LoginRequest {
            email: Some("g@example.com".into()),
            password: "anything".into(),
            ..Default::default()
        }));
        context.existing_user = Some(User::new_federated("g@example.com".into()));

        let result = VerifyPasswordStep.execute(&mut context, &mut TokenPair::default()).await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn test_federated_fetch_refuses_username_owned_by_other_account() {
        let db = memory_database().await;
        let users = UserRepository::new(db);
        let owner = users
            .create_user(&User::new_local("g@example.com".into(), "owner@example.com".into(), "h".into()))
            .await
            .unwrap();
        let step = FetchUserStep::new(users.clone());

        let mut context = UserComposition::new(AccountRequest::Google { code: "c".into() });
        context.new_user = Some(User::new_federated("g@example.com".into()));
        let result = step.execute(&mut context, &mut TokenPair::default()).await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
        assert!(context.existing_user.is_none());
        let stored = users.get_user_by_id(owner).await.unwrap().unwrap();
        assert_eq!(stored.email, "owner@example.com");
    }

    #[actix_web::test]
    async fn test_federated_fetch_matches_by_email() {
        let db = memory_database().await;
        let users = UserRepository::new(db);
        let id = users
            .create_user(&User::new_local("carol".into(), "g@example.com".into(), "h".into()))
            .await
            .unwrap();

        let mut context = UserComposition::new(AccountRequest::Google { code: "c".into() });
        context.new_user = Some(User::new_federated("g@example.com".into()));
        FetchUserStep::new(users)
            .execute(&mut context, &mut TokenPair::default())
            .await
            .unwrap();

        assert_eq!(context.existing_user.map(|u| u.id), Some(id));
    }

    #[actix_web::test]
    async fn test_create_steps_skip_existing_user() {
        let db = memory_database().await;
        let mut context = UserComposition::new(AccountRequest::Google { code: "c".into() });
        context.existing_user = Some(User::new_federated("g@example.com".into()));
        // 저장된 적 없는 사용자라 실행되면 외래 키 위반으로 실패합니다
        context.new_user = Some(User::new_federated("g@example.com".into()));

        let mut tokens = TokenPair::default();
        SaveProfileStep::new(ProfileRepository::new(db.clone()))
            .execute(&mut context, &mut tokens)
            .await
            .unwrap();
        AssignDefaultRoleStep::new(RoleRepository::new(db))
            .execute(&mut context, &mut tokens)
            .await
            .unwrap();
    }
}
