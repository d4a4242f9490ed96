// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

#[cfg(test)]
mod concurrency_tests {
    //! # 并发分发测试
    //!
    //! 多个线程同时分发，同时主线程不断注册与删除路由，验证读写锁约束下
    //! 每次分发都能得到一个合法结果。

    use routekit::{RouteMethod, SharedRouter};

    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
        thread,
    };

    #[test]
    fn test_concurrent_dispatch_while_registering() {
        let router: SharedRouter<String> = SharedRouter::new();
        router
            .register("/", |_: &[String]| "Not found.".to_string(), RouteMethod::Any)
            .unwrap();
        router
            .register(
                "/user/([0-9]+)",
                |p: &[String]| format!("user {}", p[0]),
                RouteMethod::Get,
            )
            .unwrap();

        let mut handles = vec![];
        for worker in 0..8 {
            let router = router.clone();
            handles.push(thread::spawn(move || {
                for i in 0..200 {
                    let user = router.dispatch("GET", &format!("/user/{}", i)).unwrap();
                    assert_eq!(user, format!("user {}", i));

                    let dynamic = router.dispatch("GET", "/dynamic").unwrap();
                    assert!(
                        dynamic == "Not found." || dynamic == "dynamic",
                        "worker {} got {}",
                        worker,
                        dynamic
                    );
                }
            }));
        }

        for _ in 0..100 {
            router
                .register("/dynamic", |_: &[String]| "dynamic".to_string(), RouteMethod::Get)
                .unwrap();
            router.unregister("/dynamic", RouteMethod::Get);
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_handlers_run_concurrently() {
        let router: SharedRouter<usize> = SharedRouter::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        router
            .register(
                "/",
                move |_: &[String]| counter.fetch_add(1, Ordering::SeqCst),
                RouteMethod::Any,
            )
            .unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let router = router.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        router.dispatch("GET", "/missing").unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 200);
    }
}
