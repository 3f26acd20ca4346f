use crate::catalog::Catalog;
use crate::configs::AppConfig;
use crate::item::repo::{FileStore, StoreWishlistRepository, DEFAULT_WISHLIST_KEY};
use crate::provider::api::gutendex;
use std::fmt;
use std::fmt::Formatter;

pub mod catalog;
pub mod configs;
pub mod item;
pub mod provider;
pub mod render;

#[derive(Debug)]
pub enum ArgumentError {
    InvalidArgument(String),
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub struct Argument {
    /// 시작 페이지 번호로 전달하지 않을 경우 첫 페이지부터 시작한다.
    pub page: Option<u32>,
}

impl Argument {
    pub fn new(arguments: &[String]) -> Result<Self, ArgumentError> {
        if arguments.len() < 2 {
            return Ok(Self { page: None });
        }

        let page = arguments[1].parse::<u32>()
            .map_err(|e| ArgumentError::InvalidArgument(format!("Invalid page number: {}", e)))?;
        if page < 1 {
            return Err(ArgumentError::InvalidArgument("page must be greater than or equal to 1".to_string()));
        }

        Ok(Self { page: Some(page) })
    }
}

/// 설정을 받아 카탈로그 컨트롤러를 생성한다.
pub fn create_catalog(config: &AppConfig) -> Catalog {
    let client = match config.api().endpoint() {
        Some(endpoint) => gutendex::Client::with_endpoint(endpoint),
        None => gutendex::new_client(),
    };

    let store = FileStore::new(config.store().dir());
    let key = config.store().wishlist_key().unwrap_or(DEFAULT_WISHLIST_KEY);
    let wishlist = StoreWishlistRepository::with_key(store, key);

    Catalog::new(Box::new(client), Box::new(wishlist))
}
