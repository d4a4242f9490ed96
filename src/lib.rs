// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # routekit
//!
//! 一个极简的 HTTP 请求路由器：把 `(方法, 路径)` 映射到预先注册的处理器，
//! 结合字面量精确查找与正则模式匹配，并返回处理器的调用结果。
//! 它只是嵌入在请求处理进程中的分发层，读取请求与写出响应都由调用方负责。

pub mod config;
pub mod exception;
pub mod handler;
pub mod param;
pub mod pattern;
pub mod request;
pub mod router;
pub mod shared;
pub mod table;

pub use config::RouterConfig;
pub use exception::Exception;
pub use handler::{Handler, SharedHandler};
pub use param::RouteMethod;
pub use pattern::CompiledPattern;
pub use request::Request;
pub use router::{MatchKind, Resolved, Router};
pub use shared::SharedRouter;
pub use table::RouteTable;
