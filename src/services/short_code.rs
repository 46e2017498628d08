//! 短码分配
//!
//! 从 62 个字母数字中均匀抽取固定长度的短码，已被占用或与保留路由重名时重新生成。
//! 最终唯一性由 `urls.short_code` 唯一索引保证，插入时的冲突由调用方计入同一配额重试。

use std::sync::Arc;

use tracing::warn;

use crate::errors::{LinkmarkError, Result};
use crate::storage::SeaOrmStorage;
use crate::utils::generate_random_code;

/// 与路由同名的短码会被路由遮挡，不能分配
pub const RESERVED_CODES: &[&str] = &["health", "shorten", "my-urls", "info", "auth", "bookmarks"];

pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// 一次创建请求内的生成次数配额
#[derive(Debug)]
pub struct AttemptBudget {
    used: u32,
    max: u32,
}

impl AttemptBudget {
    pub fn new(max: u32) -> Self {
        Self { used: 0, max }
    }

    /// 消耗一次配额，耗尽时返回错误
    pub fn consume(&mut self) -> Result<()> {
        if self.used >= self.max {
            return Err(LinkmarkError::code_space_exhausted(format!(
                "Could not allocate a unique short code after {} attempts",
                self.max
            )));
        }
        self.used += 1;
        Ok(())
    }

    pub fn used(&self) -> u32 {
        self.used
    }
}

/// 短码来源，参数为短码长度
pub type CodeGenerator = Arc<dyn Fn(usize) -> String + Send + Sync>;

pub struct ShortCodeAllocator {
    storage: Arc<SeaOrmStorage>,
    code_length: usize,
    max_attempts: u32,
    generator: CodeGenerator,
    check_existing: bool,
}

impl ShortCodeAllocator {
    pub fn new(storage: Arc<SeaOrmStorage>, code_length: usize, max_attempts: u32) -> Self {
        Self {
            storage,
            code_length,
            max_attempts,
            generator: Arc::new(generate_random_code),
            check_existing: true,
        }
    }

    /// 替换短码来源
    pub fn with_generator(mut self, generator: CodeGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// 跳过分配前的存在性查询，只依赖插入时的唯一索引判重
    pub fn without_existence_check(mut self) -> Self {
        self.check_existing = false;
        self
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    pub fn budget(&self) -> AttemptBudget {
        AttemptBudget::new(self.max_attempts)
    }

    /// 分配一个当前未被占用的短码
    pub async fn allocate(&self) -> Result<String> {
        let mut budget = self.budget();
        self.allocate_within(&mut budget).await
    }

    /// 在给定配额内分配短码
    pub async fn allocate_within(&self, budget: &mut AttemptBudget) -> Result<String> {
        loop {
            budget.consume()?;
            let code = (self.generator)(self.code_length);

            if is_reserved(&code) {
                warn!("Generated short code '{}' collides with a reserved route, regenerating", code);
                continue;
            }

            if self.check_existing && self.storage.code_exists(&code).await? {
                warn!(
                    "Short code collision on '{}' (attempt {}), regenerating",
                    code,
                    budget.used()
                );
                continue;
            }

            return Ok(code);
        }
    }
}
