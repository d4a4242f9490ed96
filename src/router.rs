// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 路由分发模块
//!
//! `Router` 把路由表、模式编译与分发算法组合在一起。一次分发按以下顺序进行，
//! 命中即终止：
//! 1. 当前方法下的精确匹配，以空参数调用。
//! 2. `any` 方法下的精确匹配，以空参数调用。
//! 3. 依次在当前方法、`any` 方法下按注册顺序进行正则匹配，
//!    以捕获组作为位置参数调用第一个命中的处理器。
//! 4. 调用 `any` 方法下的根模式兜底路由；不存在时返回 `Exception::ConfigurationError`。
//!
//! 处理器的返回值原样透传给调用方。

use log::{debug, error, info, warn};

use crate::{
    config::RouterConfig,
    exception::Exception,
    handler::SharedHandler,
    param::{RouteMethod, ROOT_PATTERN},
    pattern::CompiledPattern,
    request::Request,
    table::RouteTable,
};

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// 命中的路由类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// 字面量键命中，记录命中时所在的方法
    Exact(RouteMethod),
    /// 正则命中，记录命中时所在的方法
    Pattern(RouteMethod),
    /// 没有任何路由命中，使用兜底路由
    Fallback,
}

/// 已选定但尚未调用的处理器及其位置参数。
pub struct Resolved<R> {
    handler: SharedHandler<R>,
    params: Vec<String>,
    kind: MatchKind,
}

impl<R> Resolved<R> {
    /// 以捕获组调用处理器
    pub fn invoke(&self) -> R {
        self.handler.call(&self.params)
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn kind(&self) -> MatchKind {
        self.kind
    }
}

/// 基于正则的请求路由器。
///
/// `R` 是处理器的返回值类型。注册应在启动阶段完成，分发只需要 `&self`；
/// 需要在运行期同时注册和分发时使用 [`crate::SharedRouter`]。
pub struct Router<R> {
    table: RouteTable<R>,
    config: RouterConfig,
    /// 分发编号，仅用于日志追踪
    next_id: AtomicU64,
}

impl<R> Router<R> {
    pub fn new() -> Self {
        Self::with_config(RouterConfig::new())
    }

    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            table: RouteTable::new(),
            config,
            next_id: AtomicU64::new(0),
        }
    }

    /// 注册一条路由。
    ///
    /// 模式会补齐结尾的 `/`，空模式即根模式。同一 `(method, pattern)` 再次注册时
    /// 覆盖原处理器，并保留原来的匹配顺序。
    ///
    /// # 错误处理
    /// 模式不是合法正则时返回 `Exception::PatternError`，路由表保持不变。
    pub fn register<F>(
        &mut self,
        pattern: &str,
        handler: F,
        method: RouteMethod,
    ) -> Result<&mut Self, Exception>
    where
        F: Fn(&[String]) -> R + Send + Sync + 'static,
    {
        self.register_handler(pattern, Arc::new(handler), method)
    }

    /// 注册任意实现了 `Handler` 的处理器，例如控制器对象
    pub fn register_handler(
        &mut self,
        pattern: &str,
        handler: SharedHandler<R>,
        method: RouteMethod,
    ) -> Result<&mut Self, Exception> {
        let compiled = CompiledPattern::compile(pattern)?;
        let source = compiled.source().to_string();
        if self.table.insert(method, compiled, handler) {
            info!("覆盖路由：{} {}", method, source);
        } else {
            info!("注册路由：{} {}", method, source);
        }
        Ok(self)
    }

    /// 注册在任意方法下生效的路由
    pub fn any<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, Exception>
    where
        F: Fn(&[String]) -> R + Send + Sync + 'static,
    {
        self.register(pattern, handler, RouteMethod::Any)
    }

    pub fn get<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, Exception>
    where
        F: Fn(&[String]) -> R + Send + Sync + 'static,
    {
        self.register(pattern, handler, RouteMethod::Get)
    }

    pub fn post<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, Exception>
    where
        F: Fn(&[String]) -> R + Send + Sync + 'static,
    {
        self.register(pattern, handler, RouteMethod::Post)
    }

    pub fn put<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, Exception>
    where
        F: Fn(&[String]) -> R + Send + Sync + 'static,
    {
        self.register(pattern, handler, RouteMethod::Put)
    }

    pub fn delete<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, Exception>
    where
        F: Fn(&[String]) -> R + Send + Sync + 'static,
    {
        self.register(pattern, handler, RouteMethod::Delete)
    }

    pub fn head<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, Exception>
    where
        F: Fn(&[String]) -> R + Send + Sync + 'static,
    {
        self.register(pattern, handler, RouteMethod::Head)
    }

    pub fn options<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, Exception>
    where
        F: Fn(&[String]) -> R + Send + Sync + 'static,
    {
        self.register(pattern, handler, RouteMethod::Options)
    }

    pub fn patch<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, Exception>
    where
        F: Fn(&[String]) -> R + Send + Sync + 'static,
    {
        self.register(pattern, handler, RouteMethod::Patch)
    }

    /// 删除路由。路由不存在时什么也不做，永远不会失败。
    pub fn unregister(&mut self, pattern: &str, method: RouteMethod) -> &mut Self {
        if self.table.remove(method, pattern) {
            info!("删除路由：{} {}", method, pattern);
        }
        self
    }

    /// 可以处理该路径的全部方法（含 `any`），用于响应 OPTIONS 探测
    pub fn methods_for_pattern(&self, pattern: &str) -> Vec<RouteMethod> {
        self.table.methods_for_pattern(pattern)
    }

    /// 检查兜底路由是否已注册，便于在启动阶段提前发现配置错误
    pub fn validate(&self) -> Result<(), Exception> {
        if self.table.exact(RouteMethod::Any, ROOT_PATTERN).is_some() {
            Ok(())
        } else {
            Err(Exception::ConfigurationError)
        }
    }

    pub fn table(&self) -> &RouteTable<R> {
        &self.table
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// 选出处理该请求的处理器，但不调用它。
    pub fn resolve(&self, request: &Request) -> Result<Resolved<R>, Exception> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let path = request.path();
        let current = request.route_method();
        debug!("[ID{}]开始分发：{} {}", id, request.method(), path);

        // 1. 精确匹配：先当前方法，再 any
        for method in candidates(current) {
            if let Some(handler) = self.table.exact(method, path) {
                debug!("[ID{}]精确匹配：{} {}", id, method, path);
                return Ok(Resolved {
                    handler: Arc::clone(handler),
                    params: Vec::new(),
                    kind: MatchKind::Exact(method),
                });
            }
        }

        // 2. 正则匹配：同样的顺序，各方法内按注册顺序
        for method in candidates(current) {
            if let Some((handler, params)) = self.table.scan(method, path) {
                debug!("[ID{}]模式匹配：{} {}，参数：{:?}", id, method, path, params);
                return Ok(Resolved {
                    handler: Arc::clone(handler),
                    params,
                    kind: MatchKind::Pattern(method),
                });
            }
        }

        // 3. 兜底路由
        match self.table.exact(RouteMethod::Any, ROOT_PATTERN) {
            Some(handler) => {
                warn!("[ID{}]没有路由匹配 {} {}，使用兜底路由", id, request.method(), path);
                Ok(Resolved {
                    handler: Arc::clone(handler),
                    params: Vec::new(),
                    kind: MatchKind::Fallback,
                })
            }
            None => {
                error!("[ID{}]没有路由匹配 {} {}，且未注册兜底路由", id, request.method(), path);
                Err(Exception::ConfigurationError)
            }
        }
    }

    /// 分发已构建好的请求，并返回处理器的结果
    pub fn dispatch_request(&self, request: &Request) -> Result<R, Exception> {
        self.resolve(request).map(|resolved| resolved.invoke())
    }

    /// 以方法和路径分发，没有标头因此不会发生方法覆盖，路径按配置处理
    pub fn dispatch(&self, method: &str, path: &str) -> Result<R, Exception> {
        self.dispatch_with_headers(method, path, std::iter::empty())
    }

    /// 以方法、路径和标头分发，按配置应用方法覆盖与查询字符串处理
    pub fn dispatch_with_headers<'a, I>(
        &self,
        method: &str,
        path: &str,
        headers: I,
    ) -> Result<R, Exception>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let request = Request::from_parts(method, path, headers, &self.config);
        self.dispatch_request(&request)
    }
}

impl<R> Default for Router<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// 依次尝试的方法：当前方法（若可注册）然后是 any
fn candidates(current: Option<RouteMethod>) -> Vec<RouteMethod> {
    match current {
        Some(method) if method != RouteMethod::Any => vec![method, RouteMethod::Any],
        _ => vec![RouteMethod::Any],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> Router<String> {
        let mut router = Router::new();
        router
            .any("/", |_: &[String]| "Not found.".to_string())
            .unwrap()
            .get("/home", |_: &[String]| "Homepage".to_string())
            .unwrap()
            .head("/user/([0-9]+)", |p: &[String]| format!("user {}", p[0]))
            .unwrap();
        router
    }

    #[test]
    fn test_dispatch_exact() {
        assert_eq!(router().dispatch("GET", "/home").unwrap(), "Homepage");
        assert_eq!(router().dispatch("get", "/home/").unwrap(), "Homepage");
    }

    #[test]
    fn test_dispatch_fallback() {
        assert_eq!(router().dispatch("GET", "/unknown/").unwrap(), "Not found.");
        assert_eq!(router().dispatch("POST", "/home").unwrap(), "Not found.");
    }

    #[test]
    fn test_dispatch_pattern_with_capture() {
        assert_eq!(router().dispatch("HEAD", "/user/123").unwrap(), "user 123");
    }

    #[test]
    fn test_missing_fallback() {
        let router: Router<String> = Router::new();
        assert_eq!(router.validate(), Err(Exception::ConfigurationError));
        assert_eq!(
            router.dispatch("GET", "/anything").unwrap_err(),
            Exception::ConfigurationError
        );
    }

    #[test]
    fn test_resolve_kinds() {
        let router = router();
        let r = router.resolve(&Request::new("GET", "/home")).unwrap();
        assert_eq!(r.kind(), MatchKind::Exact(RouteMethod::Get));
        assert!(r.params().is_empty());

        let r = router.resolve(&Request::new("HEAD", "/user/7")).unwrap();
        assert_eq!(r.kind(), MatchKind::Pattern(RouteMethod::Head));
        assert_eq!(r.params(), &["7".to_string()]);

        let r = router.resolve(&Request::new("GET", "/nope")).unwrap();
        assert_eq!(r.kind(), MatchKind::Fallback);
        assert_eq!(r.invoke(), "Not found.");
    }

    #[test]
    fn test_register_invalid_pattern_leaves_table_untouched() {
        let mut router = router();
        let before = router.table().len();
        let err = router
            .get("/broken/([0-9]+", |_: &[String]| String::new())
            .err()
            .unwrap();
        assert!(matches!(err, Exception::PatternError { .. }));
        assert_eq!(router.table().len(), before);
    }

    #[test]
    fn test_empty_pattern_is_fallback() {
        let mut router = Router::new();
        router.any("", |_: &[String]| 0).unwrap();
        router.any("/test", |_: &[String]| 1).unwrap();
        assert!(router.validate().is_ok());
        assert_eq!(router.dispatch("GET", "/test").unwrap(), 1);
        assert_eq!(router.dispatch("GET", "/other").unwrap(), 0);
    }

    #[test]
    fn test_candidates() {
        assert_eq!(
            candidates(Some(RouteMethod::Put)),
            vec![RouteMethod::Put, RouteMethod::Any]
        );
        assert_eq!(candidates(Some(RouteMethod::Any)), vec![RouteMethod::Any]);
        assert_eq!(candidates(None), vec![RouteMethod::Any]);
    }
}
