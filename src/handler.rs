// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 处理器抽象
//!
//! 路由表只保存统一的 `SharedHandler<R>`，无论背后是普通函数、闭包，
//! 还是捕获了控制器对象的方法调用。处理器的返回值由分发器原样透传。

use std::sync::Arc;

/// 路由命中后执行的单次调用单元。
///
/// `params` 为正则捕获组按出现顺序组成的位置参数（不含整体匹配）。
/// 精确匹配与兜底路由总是以空参数调用。
pub trait Handler<R>: Send + Sync {
    fn call(&self, params: &[String]) -> R;
}

impl<R, F> Handler<R> for F
where
    F: Fn(&[String]) -> R + Send + Sync,
{
    fn call(&self, params: &[String]) -> R {
        self(params)
    }
}

/// 路由表中存放的处理器引用
pub type SharedHandler<R> = Arc<dyn Handler<R>>;
