// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 路由参数与常量模块
//!
//! 该模块定义了路由器在注册与分发阶段共用的常量和数据结构，包括：
//! - 路由方法（含通配的 `any`）的强类型枚举。
//! - 兜底路由（"not found"）的根模式。
//! - 方法覆盖（Method Override）相关的默认标头名。

use lazy_static::lazy_static;
use serde_derive::Serialize;

use crate::exception::Exception;

use std::{fmt, str::FromStr};

/// 兜底路由使用的根模式。必须以 `any` 方法注册。
pub const ROOT_PATTERN: &str = "/";

/// 路径分隔符，同时也是规范化后模式与路径的结尾字符
pub const PATH_SEPARATOR: char = '/';

/// 只有该方法的请求才允许通过标头覆盖为其他方法
pub const OVERRIDABLE_METHOD: &str = "post";

/// 方法覆盖标头的默认值，按优先级排列
pub const DEFAULT_OVERRIDE_HEADERS: [&str; 2] = ["X-HTTP-Method-Override", "X-HTTP-Method"];

lazy_static! {
    /// 全部可注册的路由方法，顺序即 `methods_for_pattern` 的返回顺序。
    pub static ref ROUTE_METHODS: Vec<RouteMethod> = {
        vec![
            RouteMethod::Any,
            RouteMethod::Get,
            RouteMethod::Post,
            RouteMethod::Put,
            RouteMethod::Delete,
            RouteMethod::Head,
            RouteMethod::Options,
            RouteMethod::Patch,
        ]
    };
}

/// 可用于注册路由的方法集合。
///
/// `Any` 并不是真实的 HTTP 方法：以它注册的路由在任意请求方法下都会作为
/// 候选参与匹配。该集合只在注册阶段使用，分发阶段的方法字符串不做校验。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMethod {
    /// 匹配任意请求方法
    #[default]
    Any,
    /// 获取资源
    Get,
    /// 提交数据或执行操作
    Post,
    /// 替换资源
    Put,
    /// 删除资源
    Delete,
    /// 获取资源的元数据（不包含响应体）
    Head,
    /// 查询服务器支持的选项
    Options,
    /// 局部修改资源
    Patch,
}

impl RouteMethod {
    /// 返回小写的方法名，与规范化后的请求方法直接可比
    pub fn as_str(&self) -> &'static str {
        match *self {
            RouteMethod::Any => "any",
            RouteMethod::Get => "get",
            RouteMethod::Post => "post",
            RouteMethod::Put => "put",
            RouteMethod::Delete => "delete",
            RouteMethod::Head => "head",
            RouteMethod::Options => "options",
            RouteMethod::Patch => "patch",
        }
    }
}

impl FromStr for RouteMethod {
    type Err = Exception;

    /// 大小写不敏感地解析方法名
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ROUTE_METHODS
            .iter()
            .find(|m| m.as_str() == lower)
            .copied()
            .ok_or_else(|| Exception::UnsupportedRouteMethod(s.to_string()))
    }
}

impl fmt::Display for RouteMethod {
    /// 将枚举格式化为 HTTP 标准大写方法名
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}
