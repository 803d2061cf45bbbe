//! 密码哈希功能单元测试
//!
//! 测试 Argon2id 密码哈希、验证和长度策略

use linkvault::auth::password::PasswordHasher;

mod common;
use common::{create_test_config, test_hasher};

#[test]
fn test_password_hash_and_verify() {
    let hasher = test_hasher();
    let password = "password123";

    let hash = hasher.hash(password).expect("Hashing should succeed");

    assert!(hash.starts_with("$argon2id$"));
    assert!(hasher.verify(password, &hash));
    assert!(!hasher.verify("password124", &hash));
}

#[test]
fn test_hash_contains_configured_params() {
    let config = create_test_config();
    let hasher = PasswordHasher::from_config(&config.security).unwrap();

    let hash = hasher.hash("password123").unwrap();

    assert!(hash.contains("m=1024,t=1,p=1"));
}

#[test]
fn test_same_password_different_hashes() {
    let hasher = test_hasher();

    let first = hasher.hash("same-password").unwrap();
    let second = hasher.hash("same-password").unwrap();

    assert_ne!(first, second);
    assert!(hasher.verify("same-password", &first));
    assert!(hasher.verify("same-password", &second));
}

#[test]
fn test_verify_with_hash_from_other_params() {
    // 参数写在 PHC 字符串里，校验不依赖当前哈希器的配置
    let strong = PasswordHasher::with_params(2048, 2, 1).unwrap();
    let hash = strong.hash("password123").unwrap();

    assert!(test_hasher().verify("password123", &hash));
}

#[test]
fn test_verify_malformed_hash() {
    let hasher = test_hasher();

    assert!(!hasher.verify("password123", ""));
    assert!(!hasher.verify("password123", "not-a-phc-string"));
    assert!(!hasher.verify("password123", "$2b$12$abcdefghijklmnopqrstuv"));
}

#[test]
fn test_unicode_password() {
    let hasher = test_hasher();
    let password = "密码密码密码密码";

    let hash = hasher.hash(password).unwrap();

    assert!(hasher.verify(password, &hash));
    assert!(PasswordHasher::validate_password_policy(password, 8).is_ok());
}

#[test]
fn test_password_policy_min_length() {
    assert!(PasswordHasher::validate_password_policy("1234567", 8).is_err());
    assert!(PasswordHasher::validate_password_policy("12345678", 8).is_ok());
    assert!(PasswordHasher::validate_password_policy("", 8).is_err());
}

#[test]
fn test_invalid_params_refused() {
    assert!(PasswordHasher::with_params(1024, 0, 1).is_err());
    assert!(PasswordHasher::with_params(1024, 1, 0).is_err());
}
