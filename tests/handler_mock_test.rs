// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

#[cfg(test)]
mod handler_mock_tests {
    //! # 处理器调用测试
    //!
    //! 用 mockall 模拟控制器对象，精确验证处理器收到的位置参数与调用次数。

    use mockall::mock;
    use routekit::{Handler, RouteMethod, Router};

    use std::sync::Arc;

    mock! {
        pub Controller {}
        impl Handler<String> for Controller {
            fn call(&self, params: &[String]) -> String;
        }
    }

    #[test]
    fn test_handler_receives_captures_positionally() {
        let mut controller = MockController::new();
        controller
            .expect_call()
            .withf(|params| params.len() == 2 && params[0] == "42" && params[1] == "edit")
            .times(1)
            .returning(|params| format!("user {} {}", params[0], params[1]));

        let mut router: Router<String> = Router::new();
        router.any("/", |_: &[String]| "Not found.".to_string()).unwrap();
        router
            .register_handler("/user/([0-9]+)/([a-z]+)", Arc::new(controller), RouteMethod::Get)
            .unwrap();

        assert_eq!(router.dispatch("GET", "/user/42/edit").unwrap(), "user 42 edit");
    }

    /// 精确匹配命中时，模式处理器不会被调用
    #[test]
    fn test_pattern_handler_not_called_on_exact_match() {
        let mut pattern = MockController::new();
        pattern.expect_call().never();

        let mut exact = MockController::new();
        exact
            .expect_call()
            .withf(|params| params.is_empty())
            .times(1)
            .returning(|_| "exact".to_string());

        let mut router: Router<String> = Router::new();
        router.any("/", |_: &[String]| "Not found.".to_string()).unwrap();
        router
            .register_handler("/user/([0-9]+)", Arc::new(pattern), RouteMethod::Get)
            .unwrap()
            .register_handler("/user/42", Arc::new(exact), RouteMethod::Get)
            .unwrap();

        assert_eq!(router.dispatch("GET", "/user/42").unwrap(), "exact");
    }

    /// 兜底处理器以空参数调用，返回值原样透传
    #[test]
    fn test_fallback_called_without_params() {
        let mut fallback = MockController::new();
        fallback
            .expect_call()
            .withf(|params| params.is_empty())
            .times(2)
            .returning(|_| "Not found.".to_string());

        let mut router: Router<String> = Router::new();
        router
            .register_handler("", Arc::new(fallback), RouteMethod::Any)
            .unwrap();

        assert_eq!(router.dispatch("GET", "/a").unwrap(), "Not found.");
        assert_eq!(router.dispatch("DELETE", "/b/c").unwrap(), "Not found.");
    }
}
