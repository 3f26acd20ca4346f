use serde::Deserialize;
use std::env;
use std::env::VarError;

mod logging;

/// 실행 환경에 따라 .env 파일을 로드한다.
pub fn load_dotenv() {
    let env_filename = env::var("RUN_MODE")
        .map(|env| format!(".env.{}", env))
        .unwrap_or_else(|_| ".env".into());

    dotenvy::from_filename(env_filename).ok();
}

/// 위시리스트 저장 파일을 둘 기본 디렉토리
const DEFAULT_STORE_DIR: &'static str = ".book-catalog";

#[derive(Debug, Deserialize)]
pub struct Api {
    /// 도서 목록 API 엔드포인트 URL로 설정하지 않을 경우 기본 Gutendex 엔드포인트가 사용 된다.
    endpoint: Option<String>,
}

impl Api {
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

#[derive(Debug, Deserialize)]
pub struct Store {
    /// 키-값 저장 파일을 둘 디렉토리
    dir: Option<String>,

    /// 위시리스트를 저장할 키
    wishlist_key: Option<String>,
}

impl Store {
    pub fn dir(&self) -> &str {
        self.dir.as_deref().unwrap_or(DEFAULT_STORE_DIR)
    }

    pub fn wishlist_key(&self) -> Option<&str> {
        self.wishlist_key.as_deref()
    }
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    api: Api,
    store: Store,
}

impl AppConfig {
    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}

pub fn load_config() -> Result<AppConfig, config::ConfigError> {
    let env = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
    let config = config::Config::builder()
        .add_source(config::File::with_name(&format!("config/{}.json", env)))
        .build()?;

    config.try_deserialize()
}

/// 프로그램에서 사용할 로깅 옵션을 설정한다.
pub fn set_global_logging_config() -> Result<(), VarError> {
    let dir = env::var("LOGGER_DIR")?;
    let name = env::var("LOGGER_FILE_NAME")?;

    let keep = env::var("LOGGER_KEEP")
        .map(|v| Some(v.parse::<usize>().unwrap()))
        .unwrap_or_else(|_| None);
    let level = env::var("LOGGER_LEVEL")
        .map(|v| Some(v))
        .unwrap_or_else(|_| None);
    let rotation = env::var("LOGGER_ROTATION")
        .map(|v| Some(v))
        .unwrap_or_else(|_| None);

    let options = logging::Config {
        dir,
        name,
        keep,
        level,
        rotation,
    };

    logging::set_global_logging_config(&options);
    Ok(())
}
