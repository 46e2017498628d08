//! Service layer tests
//!
//! 覆盖短链接创建与解析、登录 upsert、bearer 认证以及书签归属校验。

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use jsonwebtoken::Algorithm;
use linkmark::api::jwt::JwtService;
use linkmark::config::{DatabaseConfig, ShortenerConfig};
use linkmark::errors::{LinkmarkError, Result};
use linkmark::services::{
    AuthService, BookmarkService, CodeGenerator, IdentityVerifier, ShortCodeAllocator, UrlService,
};
use linkmark::storage::{BookmarkPatch, NewBookmark, SeaOrmStorage, StorageFactory, UserProfile};
use tempfile::TempDir;

// =============================================================================
// 测试环境
// =============================================================================

async fn create_temp_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    let temp_dir = TempDir::new().expect("创建临时目录失败");
    let db_path = temp_dir.path().join("services_test.db");
    let config = DatabaseConfig {
        database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
        ..Default::default()
    };
    let storage = StorageFactory::create(&config)
        .await
        .expect("创建存储失败");
    (storage, temp_dir)
}

fn shortener_config() -> ShortenerConfig {
    ShortenerConfig {
        base_url: "https://lnk.test/".into(),
        ..Default::default()
    }
}

/// 假身份校验器：`good:<email>:<name>` 视为有效令牌
struct FakeVerifier;

#[async_trait]
impl IdentityVerifier for FakeVerifier {
    async fn verify(&self, token: &str) -> Result<UserProfile> {
        let mut parts = token.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("good"), Some(email), name) => Ok(UserProfile {
                email: email.to_string(),
                name: name.map(str::to_string),
                picture: None,
            }),
            _ => Err(LinkmarkError::unauthorized("Invalid Google token")),
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// 按顺序返回给定短码，用完后重复最后一个
fn scripted_codes(codes: &[&str]) -> CodeGenerator {
    let codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
    let next = AtomicUsize::new(0);
    Arc::new(move |_: usize| {
        let i = next.fetch_add(1, Ordering::SeqCst).min(codes.len() - 1);
        codes[i].clone()
    })
}

fn auth_service(storage: Arc<SeaOrmStorage>) -> AuthService {
    let jwt = Arc::new(JwtService::new("test-secret", Algorithm::HS256, 60));
    AuthService::new(storage, Arc::new(FakeVerifier), jwt)
}

// =============================================================================
// 短链接
// =============================================================================

#[tokio::test]
async fn test_create_short_url_normalizes_and_starts_at_zero() {
    let (storage, _dir) = create_temp_storage().await;
    let service = UrlService::new(storage, &shortener_config());

    let record = service
        .create_short_url("https://example.com", None)
        .await
        .unwrap();

    assert_eq!(record.original_url, "https://example.com/");
    assert_eq!(record.clicks, 0);
    assert_eq!(record.short_code.len(), 6);
    assert!(record.short_code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(
        service.short_url(&record.short_code),
        format!("https://lnk.test/{}", record.short_code)
    );
}

#[tokio::test]
async fn test_create_short_url_rejects_invalid_urls() {
    let (storage, _dir) = create_temp_storage().await;
    let service = UrlService::new(storage, &shortener_config());

    for bad in ["", "not a url", "ftp://example.com/file", "javascript:alert(1)"] {
        let err = service.create_short_url(bad, None).await.unwrap_err();
        assert!(
            matches!(err, LinkmarkError::Validation { .. }),
            "expected validation error for {:?}, got {:?}",
            bad,
            err
        );
        assert_eq!(err.field(), Some("original_url"));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creation_yields_unique_codes() {
    let (storage, _dir) = create_temp_storage().await;
    let service = Arc::new(UrlService::new(storage, &shortener_config()));

    let mut handles = Vec::new();
    for i in 0..30 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .create_short_url(&format!("https://example.com/{}", i), None)
                .await
        }));
    }

    let mut codes = HashSet::new();
    for handle in handles {
        let record = handle.await.unwrap().unwrap();
        assert!(codes.insert(record.short_code));
    }
    assert_eq!(codes.len(), 30);
}

#[tokio::test]
async fn test_resolve_counts_and_info_does_not() {
    let (storage, _dir) = create_temp_storage().await;
    let service = UrlService::new(storage, &shortener_config());
    let record = service
        .create_short_url("https://example.com/page", None)
        .await
        .unwrap();

    assert_eq!(service.resolve(&record.short_code).await.unwrap().clicks, 1);
    assert_eq!(service.resolve(&record.short_code).await.unwrap().clicks, 2);
    assert_eq!(service.info(&record.short_code).await.unwrap().clicks, 2);

    let err = service.resolve("nope42").await.unwrap_err();
    assert!(matches!(err, LinkmarkError::LinkNotFound(_)));
}

#[tokio::test]
async fn test_owner_listing_excludes_anonymous() {
    let (storage, _dir) = create_temp_storage().await;
    let auth = auth_service(storage.clone());
    let service = UrlService::new(storage, &shortener_config());
    let user = auth.login("good:owner@example.com:Owner").await.unwrap().user;

    let mine = service
        .create_short_url("https://mine.example.com", Some(user.id))
        .await
        .unwrap();
    service
        .create_short_url("https://anon.example.com", None)
        .await
        .unwrap();

    let listed = service.list_for_owner(user.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].short_code, mine.short_code);
}

#[tokio::test]
async fn test_allocator_respects_length() {
    let (storage, _dir) = create_temp_storage().await;
    let allocator = ShortCodeAllocator::new(storage, 10, 16);

    let code = allocator.allocate().await.unwrap();
    assert_eq!(code.len(), allocator.code_length());
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[tokio::test]
async fn test_allocator_zero_budget_is_exhausted() {
    let (storage, _dir) = create_temp_storage().await;
    let allocator = ShortCodeAllocator::new(storage, 6, 0);

    let err = allocator.allocate().await.unwrap_err();
    assert!(matches!(err, LinkmarkError::CodeSpaceExhausted(_)));
}

#[tokio::test]
async fn test_allocator_skips_existing_code() {
    let (storage, _dir) = create_temp_storage().await;
    storage
        .insert_url("Taken1", "https://example.com/", None)
        .await
        .unwrap()
        .unwrap();

    let allocator = ShortCodeAllocator::new(storage, 6, 16)
        .with_generator(scripted_codes(&["Taken1", "Fresh1"]));
    assert_eq!(allocator.allocate().await.unwrap(), "Fresh1");
}

#[tokio::test]
async fn test_insert_collision_regenerates_code() {
    let (storage, _dir) = create_temp_storage().await;
    storage
        .insert_url("Taken1", "https://first.example.com/", None)
        .await
        .unwrap()
        .unwrap();

    // 不做预查询时，撞码只能在插入阶段由唯一索引发现
    let allocator = ShortCodeAllocator::new(storage.clone(), 6, 16)
        .with_generator(scripted_codes(&["Taken1", "Fresh1"]))
        .without_existence_check();
    let service = UrlService::with_allocator(storage.clone(), allocator, "https://lnk.test/");

    let record = service
        .create_short_url("https://second.example.com", None)
        .await
        .unwrap();
    assert_eq!(record.short_code, "Fresh1");
    assert_eq!(record.original_url, "https://second.example.com/");

    let original = storage.get_url_by_code("Taken1").await.unwrap().unwrap();
    assert_eq!(original.original_url, "https://first.example.com/");
}

#[tokio::test]
async fn test_insert_collisions_exhaust_budget() {
    let (storage, _dir) = create_temp_storage().await;
    storage
        .insert_url("Taken1", "https://example.com/", None)
        .await
        .unwrap()
        .unwrap();

    let allocator = ShortCodeAllocator::new(storage.clone(), 6, 3)
        .with_generator(scripted_codes(&["Taken1"]))
        .without_existence_check();
    let service = UrlService::with_allocator(storage, allocator, "https://lnk.test");

    let err = service
        .create_short_url("https://other.example.com", None)
        .await
        .unwrap_err();
    assert!(matches!(err, LinkmarkError::CodeSpaceExhausted(_)));
}

// =============================================================================
// 登录与认证
// =============================================================================

#[tokio::test]
async fn test_login_upserts_and_issues_token() {
    let (storage, _dir) = create_temp_storage().await;
    let auth = auth_service(storage);

    let first = auth.login("good:grace@example.com:Grace").await.unwrap();
    let second = auth
        .login("good:grace@example.com:Grace Hopper")
        .await
        .unwrap();

    assert_eq!(first.user.id, second.user.id);
    assert_eq!(second.user.name.as_deref(), Some("Grace Hopper"));
    assert_ne!(first.access_token, second.access_token);

    let resolved = auth.authenticate(&second.access_token).await.unwrap();
    assert_eq!(resolved.id, first.user.id);
    // 旧 token 在过期前依然有效
    assert_eq!(
        auth.authenticate(&first.access_token).await.unwrap().id,
        first.user.id
    );
}

#[tokio::test]
async fn test_login_rejects_invalid_identity_token() {
    let (storage, _dir) = create_temp_storage().await;
    let auth = auth_service(storage.clone());

    let err = auth.login("forged").await.unwrap_err();
    assert!(matches!(err, LinkmarkError::Unauthorized(_)));
    assert!(storage.find_user_by_email("forged").await.unwrap().is_none());
}

#[tokio::test]
async fn test_authenticate_rejects_garbage_and_deleted_users() {
    let (storage, _dir) = create_temp_storage().await;
    let auth = auth_service(storage.clone());

    let err = auth.authenticate("not-a-jwt").await.unwrap_err();
    assert!(matches!(err, LinkmarkError::Unauthorized(_)));

    let outcome = auth.login("good:gone@example.com").await.unwrap();
    storage.delete_user(outcome.user.id).await.unwrap();

    let err = auth.authenticate(&outcome.access_token).await.unwrap_err();
    assert!(matches!(err, LinkmarkError::Unauthorized(_)));
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let (storage, _dir) = create_temp_storage().await;
    let auth = auth_service(storage);
    let user = auth.login("good:sec@example.com").await.unwrap().user;

    let foreign = JwtService::new("another-secret", Algorithm::HS256, 60)
        .issue_access_token(user.id, &user.email)
        .unwrap();
    let err = auth.authenticate(&foreign).await.unwrap_err();
    assert!(matches!(err, LinkmarkError::Unauthorized(_)));
}

// =============================================================================
// 书签
// =============================================================================

#[tokio::test]
async fn test_bookmark_service_validates_and_scopes() {
    let (storage, _dir) = create_temp_storage().await;
    let auth = auth_service(storage.clone());
    let service = BookmarkService::new(storage);

    let owner = auth.login("good:owner@example.com").await.unwrap().user;
    let other = auth.login("good:other@example.com").await.unwrap().user;

    let err = service
        .create(
            owner.id,
            NewBookmark {
                url: "   ".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.field(), Some("url"));

    let mark = service
        .create(
            owner.id,
            NewBookmark {
                url: "https://example.com".into(),
                title: Some("Example".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let err = service
        .update(
            mark.id,
            other.id,
            BookmarkPatch {
                title: Some(Some("hijacked".into())),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LinkmarkError::NotFound(_)));

    let err = service.delete(mark.id, other.id).await.unwrap_err();
    assert!(matches!(err, LinkmarkError::NotFound(_)));

    let err = service
        .update(
            mark.id,
            owner.id,
            BookmarkPatch {
                url: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.field(), Some("url"));

    assert_eq!(
        service.fetch_owned(mark.id, owner.id).await.unwrap().title.as_deref(),
        Some("Example")
    );

    service.delete(mark.id, owner.id).await.unwrap();
    let err = service.fetch_owned(mark.id, owner.id).await.unwrap_err();
    assert!(matches!(err, LinkmarkError::NotFound(_)));
}
