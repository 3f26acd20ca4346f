use crate::item::Book;

pub mod gutendex;

/// API 클라이언트 사용 중 발생한 에러 열거
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    InvalidBaseUrl,
    RequestFailed(String),
    ResponseTextExtractionFailed(String),
    ResponseParseFailed(String),
}

/// 도서 목록 API의 응답 한 페이지
///
/// # Description
/// `previous`와 `next`는 API가 반환하는 커서 URL 그대로를 가지며
/// 해당 방향의 페이지가 없을 경우 `None`이 된다.
#[derive(Debug, Clone)]
pub struct Page {
    pub total_count: u64,
    pub previous: Option<String>,
    pub next: Option<String>,
    pub results: Vec<Book>,
}

impl Page {
    pub fn empty() -> Self {
        Page {
            total_count: 0,
            previous: None,
            next: None,
            results: Vec::new(),
        }
    }
}

/// 도서 목록 API 클라이언트
pub trait Client {

    /// 도서 목록의 기본 엔드포인트 URL을 반환 한다.
    fn endpoint(&self) -> &str;

    /// 전달 받은 URL에서 도서 목록 한 페이지를 조회 한다.
    /// URL은 기본 엔드포인트이거나 이전 응답의 `previous`/`next` 커서 URL이어야 한다.
    fn get_books(&self, url: &str) -> Result<Page, ClientError>;
}
