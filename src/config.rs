// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

use log::{error, warn};
use serde_derive::Deserialize;
use serde_derive::Serialize;

use std::fs;

use crate::{exception::Exception, param::DEFAULT_OVERRIDE_HEADERS};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RouterConfig {
    #[serde(default = "default_method_override")]
    method_override: bool,
    #[serde(default = "default_override_headers")]
    override_headers: Vec<String>,
    #[serde(default)]
    strip_query: bool,
}

fn default_method_override() -> bool {
    true
}

fn default_override_headers() -> Vec<String> {
    DEFAULT_OVERRIDE_HEADERS.iter().map(|h| h.to_string()).collect()
}

impl RouterConfig {
    pub fn new() -> Self {
        Self {
            method_override: default_method_override(),
            override_headers: default_override_headers(),
            strip_query: false,
        }
    }

    // 从文件读取
    pub fn from_toml(filename: &str) -> Result<Self, Exception> {
        let str_val = fs::read_to_string(filename).map_err(|e| {
            error!("无法读取配置文件 {}：{}", filename, e);
            Exception::ConfigFileError(format!("{}: {}", filename, e))
        })?;
        Self::from_toml_str(&str_val)
    }

    // 从字符串解析
    pub fn from_toml_str(str_val: &str) -> Result<Self, Exception> {
        let mut raw_config: RouterConfig = toml::from_str(str_val).map_err(|e| {
            error!("无法成功从配置文件构建配置对象：{}", e);
            Exception::ConfigFileError(e.to_string())
        })?;
        raw_config.override_headers.retain(|h| !h.trim().is_empty());
        if raw_config.method_override && raw_config.override_headers.is_empty() {
            warn!("method_override已开启，但override_headers为空，方法覆盖将不会生效。");
        }
        Ok(raw_config)
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RouterConfig {
    pub fn method_override(&self) -> bool {
        self.method_override
    }

    pub fn override_headers(&self) -> &[String] {
        &self.override_headers
    }

    pub fn strip_query(&self) -> bool {
        self.strip_query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = RouterConfig::from_toml_str("").unwrap();
        assert_eq!(config, RouterConfig::new());
        assert!(config.method_override());
        assert_eq!(
            config.override_headers(),
            &["X-HTTP-Method-Override".to_string(), "X-HTTP-Method".to_string()]
        );
        assert!(!config.strip_query());
    }

    #[test]
    fn test_custom_values() {
        let config = RouterConfig::from_toml_str(
            r#"
            method_override = true
            override_headers = ["X-Method", " "]
            strip_query = true
            "#,
        )
        .unwrap();
        assert_eq!(config.override_headers(), &["X-Method".to_string()]);
        assert!(config.strip_query());
    }

    #[test]
    fn test_invalid_toml() {
        match RouterConfig::from_toml_str("strip_query = \"yes\"") {
            Err(Exception::ConfigFileError(_)) => {}
            other => panic!("Expected ConfigFileError, got {:?}", other),
        }
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "strip_query = true").unwrap();
        let config = RouterConfig::from_toml(file.path().to_str().unwrap()).unwrap();
        assert!(config.strip_query());
        assert!(config.method_override());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            RouterConfig::from_toml("/definitely/not/here.toml"),
            Err(Exception::ConfigFileError(_))
        ));
    }
}
