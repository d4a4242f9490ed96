// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 路由演示控制台
//!
//! 从标准输入逐行读取 `METHOD /path [override]`，交给路由器分发并打印处理器的结果。
//! 读取请求与写出响应本不属于路由器的职责，这里用控制台代替传输层：
//! - 日志系统由 log4rs 初始化，优先读取 `config/log4rs.yaml`
//! - 路由器配置从 `config/router.toml` 读取，缺失时使用默认配置
//! - OPTIONS 请求会以 JSON 列出可以处理该路径的方法

use log::{error, info, warn, LevelFilter};
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use routekit::{Exception, RouteMethod, RouterConfig, SharedRouter};

use std::{
    io::{self, BufRead},
    process,
    sync::Arc,
};

const LOG_CONFIG: &str = "config/log4rs.yaml";
const ROUTER_CONFIG: &str = "config/router.toml";

/// 以对象方法作为处理器的示例
struct Controller {
    name: String,
}

impl Controller {
    fn example(&self, _params: &[String]) -> String {
        format!("{} example", self.name)
    }
}

fn main() {
    // 1. 初始化日志系统
    init_logger();

    // 2. 加载路由器配置
    let config = match RouterConfig::from_toml(ROUTER_CONFIG) {
        Ok(config) => {
            info!("配置文件已载入");
            config
        }
        Err(e) => {
            warn!("{}，使用默认配置", e);
            RouterConfig::new()
        }
    };

    // 3. 注册路由，兜底路由缺失属于配置错误，启动阶段就退出
    let router = SharedRouter::with_config(config);
    if let Err(e) = register_routes(&router).and_then(|_| router.validate()) {
        error!("路由注册失败：{}", e);
        process::exit(1);
    }
    info!("路由注册完成，输入 help 查看用法");

    // 4. 主循环：每一行就是一次分发
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("读取标准输入失败：{}", e);
                break;
            }
        };
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [] => continue,
            ["stop"] => {
                info!("收到停机指令，正在退出...");
                break;
            }
            ["help"] => print_help(),
            [method, path] => print_result(router.dispatch(method, path)),
            [method, path, method_override] => {
                let headers = [("X-HTTP-Method-Override", *method_override)];
                print_result(router.dispatch_with_headers(method, path, headers))
            }
            _ => println!("无效的命令：{}", line.trim()),
        }
    }
}

fn register_routes(router: &SharedRouter<String>) -> Result<(), Exception> {
    router.register(
        "/example",
        |_: &[String]| "Example.".to_string(),
        RouteMethod::Any,
    )?;
    router.register("/", |_: &[String]| "Not found.".to_string(), RouteMethod::Any)?;
    router.register("/home", |_: &[String]| "Homepage".to_string(), RouteMethod::Get)?;
    router.register(
        "/user/([0-9]+)",
        |params: &[String]| match params.first().map(String::as_str) {
            Some("123") => "HTTP/1.1 200 OK".to_string(),
            _ => "HTTP/1.1 404 Not Found".to_string(),
        },
        RouteMethod::Head,
    )?;

    let controller = Arc::new(Controller {
        name: "Controller".to_string(),
    });
    router.register(
        "/controller/example",
        move |params: &[String]| controller.example(params),
        RouteMethod::Any,
    )?;

    // OPTIONS 探测：列出该路径上可用的方法
    let probe = router.clone();
    router.register(
        "(.*)",
        move |params: &[String]| {
            let path = params.first().map(String::as_str).unwrap_or_default();
            let methods = probe.methods_for_pattern(path);
            serde_json::to_string(&methods).unwrap_or_else(|e| {
                error!("无法序列化方法列表：{}", e);
                "[]".to_string()
            })
        },
        RouteMethod::Options,
    )?;
    Ok(())
}

fn init_logger() {
    if log4rs::init_file(LOG_CONFIG, Default::default()).is_ok() {
        return;
    }
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}",
        )))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info));
    match config {
        Ok(config) => {
            if let Err(e) = log4rs::init_config(config) {
                eprintln!("无法初始化日志系统：{}", e);
            }
        }
        Err(e) => eprintln!("无法构建日志配置：{}", e),
    }
}

fn print_result(result: Result<String, Exception>) {
    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!("分发失败：{}", e);
            println!("error: {}", e);
        }
    }
}

fn print_help() {
    println!("== Router Help ==");
    println!("METHOD PATH            - 分发一次请求，例如 GET /home");
    println!("METHOD PATH OVERRIDE   - 携带方法覆盖标头，例如 POST /item DELETE");
    println!("stop                   - 退出");
    println!("help                   - 显示此帮助信息");
    println!("=================");
}
