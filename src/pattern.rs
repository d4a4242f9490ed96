// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 模式编译模块
//!
//! 负责把调用方注册的模式字符串转换为可匹配的形式：
//! 1. 规范化：模式与请求路径去掉首尾空白，统一补齐开头与结尾的 `/`，空模式视为根模式 `/`。
//! 2. 精确查找：不含正则元字符的模式可以直接参与 O(1) 的字符串查找。
//! 3. 正则匹配：所有模式都会编译为首尾锚定、大小写不敏感、非贪婪的正则。
//!
//! 模式中的括号分组就是参数语法，例如 `/user/([0-9]+)`，不存在 `:id` 之类的占位符。

use log::error;
use regex::{Regex, RegexBuilder};

use crate::{
    exception::Exception,
    param::{PATH_SEPARATOR, ROOT_PATTERN},
};

/// 出现任意一个即认为模式需要走正则匹配
const REGEX_METACHARACTERS: [char; 14] = [
    '\\', '.', '+', '*', '?', '(', ')', '|', '[', ']', '{', '}', '^', '$',
];

/// 规范化注册的模式，与 `normalize_path` 的规则保持一致。
///
/// 空白模式变为根模式；去掉首尾空白；以字面量开头的模式保证以单个 `/` 开头；
/// 最后补齐结尾的 `/`。以正则结构（如 `(.*)`）开头的模式保持原样。
pub fn normalize_pattern(pattern: &str) -> String {
    let trimmed = pattern.trim();
    if trimmed.is_empty() {
        return ROOT_PATTERN.to_string();
    }
    let mut normalized = String::with_capacity(trimmed.len() + 2);
    if trimmed.starts_with(&REGEX_METACHARACTERS[..]) {
        normalized.push_str(trimmed);
    } else {
        normalized.push(PATH_SEPARATOR);
        normalized.push_str(trimmed.trim_start_matches(PATH_SEPARATOR));
    }
    if !normalized.ends_with(PATH_SEPARATOR) {
        normalized.push(PATH_SEPARATOR);
    }
    normalized
}

/// 规范化分发时的请求路径：保证以单个 `/` 开头并以 `/` 结尾。
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return ROOT_PATTERN.to_string();
    }
    let mut normalized = String::with_capacity(trimmed.len() + 2);
    normalized.push(PATH_SEPARATOR);
    normalized.push_str(trimmed.trim_start_matches(PATH_SEPARATOR));
    if !normalized.ends_with(PATH_SEPARATOR) {
        normalized.push(PATH_SEPARATOR);
    }
    normalized
}

/// 模式不含正则元字符时，可直接作为精确查找的键
pub fn is_literal(pattern: &str) -> bool {
    !pattern.contains(&REGEX_METACHARACTERS[..])
}

/// 编译完成的路由模式。
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// 规范化后的模式，同时是路由表中的键
    source: String,
    /// 首尾锚定的匹配器
    regex: Regex,
    literal: bool,
}

impl CompiledPattern {
    /// 规范化并编译模式。
    ///
    /// 模式本身会先单独编译一次，避免 `)(` 这类不成对的括号被锚定包装"修复"。
    ///
    /// # 错误处理
    /// 正则语法错误在注册阶段以 `Exception::PatternError` 返回，不会延迟到分发阶段。
    pub fn compile(pattern: &str) -> Result<Self, Exception> {
        let source = normalize_pattern(pattern);

        build_regex(&source, &source)?;
        let regex = build_regex(&source, &format!("^(?:{})$", source))?;

        Ok(Self {
            literal: is_literal(&source),
            source,
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_literal(&self) -> bool {
        self.literal
    }

    /// 整个路径是否被该模式完整匹配
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// 匹配成功时返回除整体匹配外的全部捕获组。
    ///
    /// 未参与匹配的可选分组以空字符串占位，保证参数位置不变。
    pub fn captures(&self, path: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(path)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
        )
    }
}

fn build_regex(source: &str, expr: &str) -> Result<Regex, Exception> {
    RegexBuilder::new(expr)
        .case_insensitive(true)
        .swap_greed(true)
        .build()
        .map_err(|e| {
            error!("路由模式编译失败：{}，错误：{}", source, e);
            Exception::PatternError {
                pattern: source.to_string(),
                reason: e.to_string(),
            }
        })
}
