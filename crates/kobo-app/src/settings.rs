//! # 配置加载
//!
//! 按优先级从低到高合并：内置默认值 → `config/default.toml` →
//! `KOBO_CONFIG` 指向的文件 → `KOBO_*` 环境变量 → 旧版环境变量
//! (`API_URL` / `BITNOB_SECRET_KEY`)。

use std::path::Path;

use config::{Config, ConfigError, Environment, File, Map};
use kobo_core::config::AppConfig;

/// 指定额外配置文件的环境变量
const CONFIG_FILE_VAR: &str = "KOBO_CONFIG";
/// 旧版部署使用的 payout 基础地址
const LEGACY_API_URL_VAR: &str = "API_URL";
/// 旧版部署使用的服务商 secret key
const LEGACY_SECRET_VAR: &str = "BITNOB_SECRET_KEY";

/// 从当前工作目录下的 `config/` 与进程环境变量加载配置
pub fn load() -> Result<AppConfig, ConfigError> {
    build(Path::new("config"), std::env::vars().collect())
}

/// # Summary
/// 以给定的配置目录与环境变量快照构建 `AppConfig`。
///
/// # Arguments
/// * `config_dir` - 存放 `default.toml` 的目录，文件可不存在
/// * `env` - 环境变量快照
///
/// # Returns
/// 合并后的配置；文件格式错误或字段类型不匹配时返回 `ConfigError`。
/// 凭证缺失不是错误，留到请求时再以配置错误的形式暴露。
pub fn build(config_dir: &Path, env: Map<String, String>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder()
        .add_source(File::from(config_dir.join("default.toml")).required(false));

    if let Some(path) = non_blank(&env, CONFIG_FILE_VAR) {
        builder = builder.add_source(File::from(Path::new(&path)).required(true));
    }

    builder
        .add_source(
            Environment::with_prefix("KOBO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(Some(env.clone())),
        )
        .set_override_option("provider.payout_api_url", non_blank(&env, LEGACY_API_URL_VAR))?
        .set_override_option("provider.secret_key", non_blank(&env, LEGACY_SECRET_VAR))?
        .build()?
        .try_deserialize()
}

fn non_blank(env: &Map<String, String>, key: &str) -> Option<String> {
    env.get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kobo_core::config::{DEFAULT_CARDS_API_URL, DEFAULT_TRADE_API_URL};
    use std::fs;

    fn env(pairs: &[(&str, &str)]) -> Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_any_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = build(dir.path(), Map::new()).unwrap();

        assert_eq!(config.server.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.provider.trade_api_url, DEFAULT_TRADE_API_URL);
        assert_eq!(config.provider.cards_api_url, DEFAULT_CARDS_API_URL);
        assert_eq!(config.provider.payout_api_url, None);
        assert_eq!(config.provider.secret_key, None);
        assert_eq!(config.payout.settlement_amount, 100000);
        assert_eq!(config.swap.amount, 200);
    }

    #[test]
    fn test_legacy_variables_are_honoured() {
        let dir = tempfile::tempdir().unwrap();
        let config = build(
            dir.path(),
            env(&[
                ("API_URL", "https://sandbox.provider.test/api/v1"),
                ("BITNOB_SECRET_KEY", "sk_legacy"),
            ]),
        )
        .unwrap();

        assert_eq!(
            config.provider.payout_api_url(),
            Some("https://sandbox.provider.test/api/v1")
        );
        assert_eq!(config.provider.secret_key(), Some("sk_legacy"));
        // trade 地址不受 API_URL 影响
        assert_eq!(config.provider.trade_api_url, DEFAULT_TRADE_API_URL);
    }

    #[test]
    fn test_precedence_file_then_env_then_legacy() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
[server]
port = 9000

[provider]
payout_api_url = "https://file.provider.test"
secret_key = "sk_file"

[swap]
amount = 500
"#,
        )
        .unwrap();

        let config = build(
            dir.path(),
            env(&[
                ("KOBO_SERVER__PORT", "9100"),
                ("KOBO_PROVIDER__SECRET_KEY", "sk_env"),
                ("BITNOB_SECRET_KEY", "sk_legacy"),
                ("API_URL", "   "),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.swap.amount, 500);
        assert_eq!(config.provider.secret_key(), Some("sk_legacy"));
        // 空白的旧版变量不覆盖文件中的值
        assert_eq!(
            config.provider.payout_api_url(),
            Some("https://file.provider.test")
        );
    }

    #[test]
    fn test_explicit_config_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let result = build(
            dir.path(),
            env(&[("KOBO_CONFIG", missing.to_str().unwrap())]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_config_file_overrides_default_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[logging]\nlevel = \"warn\"\n").unwrap();
        let extra = dir.path().join("prod.toml");
        fs::write(&extra, "[logging]\nlevel = \"debug\"\ndirectory = \"/tmp/kobo\"\n").unwrap();

        let config = build(
            dir.path(),
            env(&[("KOBO_CONFIG", extra.to_str().unwrap())]),
        )
        .unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.directory.as_deref(), Some("/tmp/kobo"));
    }
}
