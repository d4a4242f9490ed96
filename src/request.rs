// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 分发请求上下文
//!
//! 传输层负责读取原始请求，本模块只接收已经提取好的方法、路径与标头，
//! 并据此构建一次分发所需的临时上下文：
//! 1. 方法统一转为小写。
//! 2. `POST` 请求可通过覆盖标头改写为其他方法。
//! 3. 路径按路由表相同的规则规范化。

use log::{debug, warn};

use crate::{
    config::RouterConfig,
    param::{RouteMethod, OVERRIDABLE_METHOD},
    pattern::normalize_path,
};

/// 一次分发使用的方法与路径。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// 小写的请求方法，已应用方法覆盖
    method: String,
    /// 规范化后的路径
    path: String,
}

impl Request {
    /// 不含任何标头的请求，方法转为小写、路径规范化。
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            method: method.trim().to_lowercase(),
            path: normalize_path(path),
        }
    }

    /// 从传输层给出的各部分构建请求。
    ///
    /// # 参数
    /// * `method` - 传输层的原始请求方法。
    /// * `path` - 请求路径，可能带有查询字符串。
    /// * `headers` - 标头 `(名称, 值)` 列表，名称大小写不敏感。
    /// * `config` - 决定是否接受覆盖标头、按什么顺序查找、是否去掉查询字符串。
    pub fn from_parts<'a, I>(method: &str, path: &str, headers: I, config: &RouterConfig) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let path = if config.strip_query() {
            strip_query(path)
        } else {
            path
        };
        let request = Self::new(method, path);
        if !config.method_override() {
            return request;
        }

        let headers: Vec<(&str, &str)> = headers.into_iter().collect();
        let value = config.override_headers().iter().find_map(|name| {
            headers
                .iter()
                .find(|(key, _)| key.trim().eq_ignore_ascii_case(name))
                .map(|(_, value)| *value)
        });
        match value {
            Some(v) => request.with_override(v),
            None => request,
        }
    }

    /// 应用方法覆盖。只有 `post` 请求会被改写，空值会被忽略。
    pub fn with_override(mut self, value: &str) -> Self {
        let value = value.trim();
        if self.method != OVERRIDABLE_METHOD {
            debug!("忽略方法覆盖：{} 请求不允许改写为 {}", self.method, value);
            return self;
        }
        if value.is_empty() {
            warn!("方法覆盖标头的值为空，保持原方法 {}", self.method);
            return self;
        }
        debug!("方法覆盖：{} -> {}", self.method, value.to_lowercase());
        self.method = value.to_lowercase();
        self
    }
}

// --- Getter 访问器实现 ---

impl Request {
    /// 获取小写的请求方法
    pub fn method(&self) -> &str {
        &self.method
    }

    /// 获取规范化后的路径
    pub fn path(&self) -> &str {
        &self.path
    }

    /// 请求方法对应的路由方法；不在可注册集合中时为 `None`
    pub fn route_method(&self) -> Option<RouteMethod> {
        self.method.parse().ok()
    }
}

/// 去掉 `?` 之后的查询字符串与 `#` 之后的片段
fn strip_query(path: &str) -> &str {
    match path.find(&['?', '#'][..]) {
        Some(i) => &path[..i],
        None => path,
    }
}
