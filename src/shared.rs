// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 可并发共享的路由器
//!
//! 注册与分发需要在运行期共存时，用读写锁包装 `Router`：
//! - 分发只持有读锁，可以有任意多个并发读者。
//! - 注册与删除持有写锁，结构变更期间排斥所有读者与写者。
//!
//! 处理器在释放读锁之后才被调用，因此处理器内部也可以安全地注册新路由。

use log::warn;

use crate::{
    config::RouterConfig,
    exception::Exception,
    handler::SharedHandler,
    param::RouteMethod,
    request::Request,
    router::Router,
};

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// `Arc<RwLock<Router<R>>>` 的轻量包装，克隆只增加引用计数。
pub struct SharedRouter<R> {
    inner: Arc<RwLock<Router<R>>>,
}

impl<R> Clone for SharedRouter<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> From<Router<R>> for SharedRouter<R> {
    fn from(router: Router<R>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(router)),
        }
    }
}

impl<R> SharedRouter<R> {
    pub fn new() -> Self {
        Router::new().into()
    }

    pub fn with_config(config: RouterConfig) -> Self {
        Router::with_config(config).into()
    }

    // 持锁期间 panic 的线程不会留下半完成的路由表结构，因此直接取回内部数据
    fn read(&self) -> RwLockReadGuard<'_, Router<R>> {
        self.inner.read().unwrap_or_else(|e| {
            warn!("路由表读锁已中毒，继续使用");
            PoisonError::into_inner(e)
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Router<R>> {
        self.inner.write().unwrap_or_else(|e| {
            warn!("路由表写锁已中毒，继续使用");
            PoisonError::into_inner(e)
        })
    }

    pub fn register<F>(&self, pattern: &str, handler: F, method: RouteMethod) -> Result<(), Exception>
    where
        F: Fn(&[String]) -> R + Send + Sync + 'static,
    {
        self.write().register(pattern, handler, method).map(|_| ())
    }

    pub fn register_handler(
        &self,
        pattern: &str,
        handler: SharedHandler<R>,
        method: RouteMethod,
    ) -> Result<(), Exception> {
        self.write()
            .register_handler(pattern, handler, method)
            .map(|_| ())
    }

    pub fn unregister(&self, pattern: &str, method: RouteMethod) {
        self.write().unregister(pattern, method);
    }

    pub fn methods_for_pattern(&self, pattern: &str) -> Vec<RouteMethod> {
        self.read().methods_for_pattern(pattern)
    }

    pub fn validate(&self) -> Result<(), Exception> {
        self.read().validate()
    }

    /// 在读锁内选出处理器，释放读锁后再调用
    pub fn dispatch_request(&self, request: &Request) -> Result<R, Exception> {
        let resolved = self.read().resolve(request)?;
        Ok(resolved.invoke())
    }

    pub fn dispatch(&self, method: &str, path: &str) -> Result<R, Exception> {
        self.dispatch_with_headers(method, path, std::iter::empty())
    }

    pub fn dispatch_with_headers<'a, I>(
        &self,
        method: &str,
        path: &str,
        headers: I,
    ) -> Result<R, Exception>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let request = {
            let router = self.read();
            Request::from_parts(method, path, headers, router.config())
        };
        self.dispatch_request(&request)
    }
}

impl<R> Default for SharedRouter<R> {
    fn default() -> Self {
        Self::new()
    }
}
