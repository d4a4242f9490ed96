// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 路由表
//!
//! 按方法分桶保存 `(模式, 处理器)`，每个桶内保持注册顺序。
//! 同一方法下的相同模式只保留最后一次注册的处理器，但位置沿用第一次注册时的位置。

use crate::{
    handler::SharedHandler,
    param::{RouteMethod, ROUTE_METHODS},
    pattern::{normalize_path, normalize_pattern, CompiledPattern},
};

use std::{collections::HashMap, fmt};

struct RouteEntry<R> {
    pattern: CompiledPattern,
    handler: SharedHandler<R>,
}

/// 单个方法下的全部路由
struct MethodRoutes<R> {
    entries: Vec<RouteEntry<R>>,
    /// 字面量模式 -> `entries` 下标
    exact: HashMap<String, usize>,
}

impl<R> MethodRoutes<R> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            exact: HashMap::new(),
        }
    }

    fn position(&self, source: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.pattern.source() == source)
    }

    fn reindex(&mut self) {
        self.exact = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.pattern.is_literal())
            .map(|(i, e)| (e.pattern.source().to_string(), i))
            .collect();
    }
}

/// 方法 -> 有序路由列表的映射。
pub struct RouteTable<R> {
    routes: HashMap<RouteMethod, MethodRoutes<R>>,
}

impl<R> RouteTable<R> {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// 插入或覆盖一条路由。返回 `true` 表示覆盖了已有的同键路由。
    pub fn insert(
        &mut self,
        method: RouteMethod,
        pattern: CompiledPattern,
        handler: SharedHandler<R>,
    ) -> bool {
        let bucket = self.routes.entry(method).or_insert_with(MethodRoutes::new);
        match bucket.position(pattern.source()) {
            Some(i) => {
                bucket.entries[i].handler = handler;
                true
            }
            None => {
                if pattern.is_literal() {
                    bucket
                        .exact
                        .insert(pattern.source().to_string(), bucket.entries.len());
                }
                bucket.entries.push(RouteEntry { pattern, handler });
                false
            }
        }
    }

    /// 删除一条路由，不存在时什么也不做。返回是否真的删除了路由。
    pub fn remove(&mut self, method: RouteMethod, pattern: &str) -> bool {
        let source = normalize_pattern(pattern);
        let Some(bucket) = self.routes.get_mut(&method) else {
            return false;
        };
        match bucket.position(&source) {
            Some(i) => {
                bucket.entries.remove(i);
                bucket.reindex();
                if bucket.entries.is_empty() {
                    self.routes.remove(&method);
                }
                true
            }
            None => false,
        }
    }

    /// 以规范化路径作为字面量键查找
    pub fn exact(&self, method: RouteMethod, path: &str) -> Option<&SharedHandler<R>> {
        let bucket = self.routes.get(&method)?;
        bucket.exact.get(path).map(|&i| &bucket.entries[i].handler)
    }

    /// 按注册顺序逐个尝试正则匹配，返回第一个命中的处理器及其捕获组
    pub fn scan(&self, method: RouteMethod, path: &str) -> Option<(&SharedHandler<R>, Vec<String>)> {
        self.routes.get(&method)?.entries.iter().find_map(|e| {
            e.pattern
                .captures(path)
                .map(|params| (&e.handler, params))
        })
    }

    /// 已精确注册该模式的方法，或模式能完整匹配该路径的方法。
    ///
    /// 结果按 `RouteMethod` 声明顺序排列；空白输入返回空列表。
    pub fn methods_for_pattern(&self, pattern: &str) -> Vec<RouteMethod> {
        if pattern.trim().is_empty() {
            return Vec::new();
        }
        let path = normalize_path(pattern);
        ROUTE_METHODS
            .iter()
            .copied()
            .filter(|method| {
                self.routes.get(method).is_some_and(|bucket| {
                    bucket
                        .entries
                        .iter()
                        .any(|e| e.pattern.source() == path || e.pattern.is_match(&path))
                })
            })
            .collect()
    }

    pub fn contains(&self, method: RouteMethod, pattern: &str) -> bool {
        let source = normalize_pattern(pattern);
        self.routes
            .get(&method)
            .is_some_and(|bucket| bucket.position(&source).is_some())
    }

    /// 某个方法下已注册的模式，按注册顺序
    pub fn patterns(&self, method: RouteMethod) -> Vec<&str> {
        self.routes
            .get(&method)
            .map(|bucket| bucket.entries.iter().map(|e| e.pattern.source()).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.routes.values().map(|b| b.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R> Default for RouteTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for RouteTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for method in ROUTE_METHODS.iter() {
            if let Some(bucket) = self.routes.get(method) {
                let patterns: Vec<&str> =
                    bucket.entries.iter().map(|e| e.pattern.source()).collect();
                map.entry(&method.as_str(), &patterns);
            }
        }
        map.finish()
    }
}
