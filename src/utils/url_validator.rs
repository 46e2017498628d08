//! URL 验证模块
//!
//! 只接受带主机名的 http/https 地址，返回规范化后的序列化结果。

use url::Url;

/// URL 验证错误
#[derive(Debug, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    InvalidProtocol(String),
    InvalidFormat(String),
    MissingHost,
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::InvalidProtocol(proto) => write!(
                f,
                "Invalid protocol: {}. Only http:// and https:// are allowed",
                proto
            ),
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
            Self::MissingHost => write!(f, "URL must include a host"),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// 校验并规范化 URL
///
/// 返回 `url` crate 的序列化结果，例如 `https://example.com` 变为 `https://example.com/`。
pub fn normalize_url(raw: &str) -> Result<String, UrlValidationError> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    let lower = raw.to_lowercase();

    // javascript: / data: / file: 等一律按非 http(s) 协议拒绝
    if !lower.starts_with("http://") && !lower.starts_with("https://") {
        let proto = lower
            .split(':')
            .next()
            .map(|s| format!("{}:", s))
            .unwrap_or_default();
        return Err(UrlValidationError::InvalidProtocol(proto));
    }

    let parsed = Url::parse(raw).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed.to_string()),
        _ => Err(UrlValidationError::MissingHost),
    }
}
