// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # Exception 模块
//!
//! 该模块定义了路由器在注册、分发与加载配置时可能返回的各类异常情况。
//!
//! ## 设计意图
//! - **注册期错误**：模式无法编译、方法名不在可注册集合中，都在注册时同步返回。
//! - **分发期错误**：唯一的致命情况是缺少兜底路由，代表调用方的配置错误而非请求错误。
//! - **未匹配不是错误**：存在兜底路由时，未匹配的请求正常返回兜底处理器的结果。

use std::fmt;

/// 路由器操作失败的原因。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exception {
    /// 注册的模式无法编译为合法的正则表达式。
    PatternError {
        /// 规范化后的模式
        pattern: String,
        /// 正则引擎给出的错误描述
        reason: String,
    },
    /// 分发时没有以 `any` 方法注册的根模式兜底路由。
    ConfigurationError,
    /// 注册时使用了固定集合之外的方法名。
    UnsupportedRouteMethod(String),
    /// 配置文件无法读取或解析。
    ConfigFileError(String),
}

use Exception::*;

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError { pattern, reason } => {
                write!(f, "Invalid route pattern `{}`: {}", pattern, reason)
            }
            ConfigurationError => write!(f, "No \"not found\" route registered"),
            UnsupportedRouteMethod(m) => write!(f, "Unsupported route method: {}", m),
            ConfigFileError(e) => write!(f, "Couldn't load router config: {}", e),
        }
    }
}

impl std::error::Error for Exception {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = PatternError {
            pattern: "/a(/".to_string(),
            reason: "unclosed group".to_string(),
        };
        assert!(e.to_string().contains("/a(/"));
        assert!(e.to_string().contains("unclosed group"));
        assert_eq!(
            ConfigurationError.to_string(),
            "No \"not found\" route registered"
        );
        assert!(UnsupportedRouteMethod("trace".into())
            .to_string()
            .ends_with("trace"));
    }
}
