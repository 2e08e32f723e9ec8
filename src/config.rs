pub mod log;

use crate::collection::DEF_PAGE_SIZE;
use config;
use serde::Deserialize;
use std::env;

const DEF_CATALOG_PATH: &str = "data/catalog.json";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    catalog: String,
    page_size: usize,
    logger: Option<log::Config>,
}

impl AppConfig {
    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn logger(&self) -> Option<&log::Config> {
        self.logger.as_ref()
    }
}

/// 실행 환경에 따라 .env 파일을 로드한다.
pub fn load_dotenv() {
    let env_filename = env::var("RUN_MODE")
        .map(|env| format!(".env.{}", env))
        .unwrap_or_else(|_| ".env".into());

    dotenvy::from_filename(env_filename).ok();
}

/// `config/{RUN_MODE}.json` 파일과 `CATALOG_` 으로 시작하는 환경 변수로 설정을 읽는다.
/// 설정 파일이 없을 경우 기본값을 사용한다.
pub fn load_config() -> Result<AppConfig, config::ConfigError> {
    let env = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
    let config = config::Config::builder()
        .set_default("catalog", DEF_CATALOG_PATH)?
        .set_default("page_size", DEF_PAGE_SIZE as u64)?
        .add_source(config::File::with_name(&format!("config/{}.json", env)).required(false))
        .add_source(config::Environment::with_prefix("CATALOG"))
        .build()?;

    config.try_deserialize()
}
