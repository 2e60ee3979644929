//! 兼容旧账号库的密码摘要：SHA-256，无盐，小写十六进制。
//!
//! 只用于校验已有记录，新凭据不应继续使用这种方案。

use sha2::{Digest, Sha256};

use crate::error::AuthError;
use crate::utils::constant_time_eq;

pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// 校验明文密码，区分“未设置密码”和“密码不匹配”
///
/// 存储的摘要大小写不敏感。
pub fn check_password(plaintext: &str, stored_hash: Option<&str>) -> Result<(), AuthError> {
    let stored = match stored_hash {
        Some(h) if !h.is_empty() => h,
        _ => return Err(AuthError::NoPasswordSet),
    };

    // hex 解码本身忽略大小写；非法或长度不对的记录不可能匹配
    let expected = match hex::decode(stored) {
        Ok(bytes) => bytes,
        Err(_) => return Err(AuthError::PasswordMismatch),
    };
    let actual = Sha256::digest(plaintext.as_bytes());

    if constant_time_eq(&actual, &expected) {
        Ok(())
    } else {
        Err(AuthError::PasswordMismatch)
    }
}

pub fn verify_password(plaintext: &str, stored_hash: Option<&str>) -> bool {
    check_password(plaintext, stored_hash).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn hash_is_deterministic_lowercase_hex() {
        let a = hash_password("hunter2");
        let b = hash_password("hunter2");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn hash_matches_known_digest() {
        assert_eq!(
            hash_password("password"),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
        assert_eq!(
            hash_password(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn verifies_own_hash() {
        for p in ["password", "", "пароль", "with spaces and 🎮"] {
            assert!(verify_password(p, Some(&hash_password(p))), "{p}");
        }
    }

    #[test]
    fn stored_hash_is_case_insensitive() {
        let upper = hash_password("Secret1").to_uppercase();
        assert!(verify_password("Secret1", Some(&upper)));
    }

    #[test]
    fn empty_or_absent_hash_never_verifies() {
        assert!(!verify_password("anything", Some("")));
        assert!(!verify_password("anything", None));
        assert!(!verify_password("", None));
        assert_matches!(check_password("x", None), Err(AuthError::NoPasswordSet));
        assert_matches!(check_password("x", Some("")), Err(AuthError::NoPasswordSet));
    }

    #[test]
    fn wrong_password_is_a_mismatch() {
        let stored = hash_password("right");
        assert_matches!(
            check_password("wrong", Some(&stored)),
            Err(AuthError::PasswordMismatch)
        );
    }

    #[test]
    fn garbage_record_is_a_mismatch() {
        assert_matches!(
            check_password("x", Some("not-hex")),
            Err(AuthError::PasswordMismatch)
        );
        // 截断的摘要
        let short = &hash_password("x")[..32];
        assert_matches!(check_password("x", Some(short)), Err(AuthError::PasswordMismatch));
    }
}
