use crate::item::{Author, Book, BookBuilder};
use crate::provider;
use crate::provider::api::ClientError;
use reqwest::{blocking, Url};
use serde::Deserialize;
use std::collections::HashMap;

/// Gutendex 도서 목록 API 엔드포인트 URL
const GUTENDEX_API_ENDPOINT: &'static str = "https://gutendex.com/books";
/// API 요청의 기본 타임아웃 시간(초)
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Gutendex API 응답을 표현하는 구조체
#[derive(Debug, Deserialize)]
pub struct GutendexResponse {
    /// 전체 결과 수
    #[serde(rename = "count")]
    pub count: u64,
    /// 다음 페이지 커서 URL
    #[serde(rename = "next")]
    pub next: Option<String>,
    /// 이전 페이지 커서 URL
    #[serde(rename = "previous")]
    pub previous: Option<String>,
    /// 도서 아이템 목록
    #[serde(rename = "results")]
    pub results: Vec<BookItem>,
}

/// 개별 도서 정보를 표현하는 구조체
#[derive(Debug, Deserialize)]
pub struct BookItem {
    /// 도서 아이디
    #[serde(rename = "id")]
    pub id: u64,
    /// 도서 제목
    #[serde(rename = "title")]
    pub title: String,
    /// 저자 목록
    #[serde(rename = "authors", default)]
    pub authors: Vec<PersonItem>,
    /// 주제 분류 목록
    #[serde(rename = "subjects", default)]
    pub subjects: Vec<String>,
    /// 포맷별 리소스 URL (MIME 타입 -> URL)
    #[serde(rename = "formats", default)]
    pub formats: HashMap<String, String>,
}

/// 저자 정보를 표현하는 구조체
#[derive(Debug, Deserialize)]
pub struct PersonItem {
    /// 저자명
    #[serde(rename = "name")]
    pub name: String,
    /// 출생 연도
    #[serde(rename = "birth_year")]
    pub birth_year: Option<i32>,
    /// 사망 연도
    #[serde(rename = "death_year")]
    pub death_year: Option<i32>,
}

impl BookItem {
    fn to_book_builder(&self) -> BookBuilder {
        let mut builder = BookBuilder::new()
            .id(self.id)
            .title(self.title.clone());

        for author in &self.authors {
            builder = builder.add_author(
                Author::with_years(author.name.clone(), author.birth_year, author.death_year));
        }
        for subject in &self.subjects {
            builder = builder.add_subject(subject.clone());
        }
        for (mime, url) in &self.formats {
            builder = builder.add_format(mime.clone(), url.clone());
        }

        builder
    }
}

/// Gutendex API 클라이언트
pub struct Client {
    endpoint: String,
}

pub fn new_client() -> Client {
    Client {
        endpoint: GUTENDEX_API_ENDPOINT.to_owned(),
    }
}

impl Client {
    pub fn with_endpoint<S: Into<String>>(endpoint: S) -> Self {
        Client { endpoint: endpoint.into() }
    }
}

impl provider::api::Client for Client {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn get_books(&self, url: &str) -> Result<provider::api::Page, ClientError> {
        let client = blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
            .build()
            .map_err(|e| ClientError::RequestFailed(format!("클라이언트 생성 실패: {}", e)))?;

        let url = Url::parse(url).map_err(|_| ClientError::InvalidBaseUrl)?;
        let response = client.get(url)
            .send()
            .map_err(|err| ClientError::RequestFailed(err.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::RequestFailed(format!("HTTP 오류: {}", response.status())));
        }

        let text = response.text()
            .map_err(|err| ClientError::ResponseTextExtractionFailed(err.to_string()))?;

        let parsed_response = serde_json::from_str::<GutendexResponse>(&text)
            .map_err(|err| ClientError::ResponseParseFailed(err.to_string()))?;

        let books = parsed_response.results.iter()
            .map(|item| item.to_book_builder().build())
            .collect::<Result<Vec<Book>, _>>()
            .map_err(|err| ClientError::ResponseParseFailed(err.to_string()))?;

        Ok(provider::api::Page {
            total_count: parsed_response.count,
            previous: parsed_response.previous,
            next: parsed_response.next,
            results: books,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "count": 76543,
        "next": "https://gutendex.com/books/?page=2",
        "previous": null,
        "results": [
            {
                "id": 2600,
                "title": "War and Peace",
                "authors": [{"name": "Tolstoy, Leo", "birth_year": 1828, "death_year": 1910}],
                "subjects": ["Historical fiction", "War stories"],
                "formats": {"image/jpeg": "https://www.gutenberg.org/cache/epub/2600/pg2600.cover.medium.jpg"}
            },
            {
                "id": 158,
                "title": "Emma",
                "authors": [],
                "subjects": [],
                "formats": {}
            }
        ]
    }"#;

    #[test]
    fn response_deserializes_with_null_previous() {
        let parsed = serde_json::from_str::<GutendexResponse>(SAMPLE).unwrap();

        assert_eq!(parsed.count, 76543);
        assert_eq!(parsed.previous, None);
        assert_eq!(parsed.next, Some("https://gutendex.com/books/?page=2".to_string()));
        assert_eq!(parsed.results.len(), 2);
    }

    #[test]
    fn book_item_maps_to_domain_book() {
        let parsed = serde_json::from_str::<GutendexResponse>(SAMPLE).unwrap();

        let book = parsed.results[0].to_book_builder().build().unwrap();
        assert_eq!(book.id(), 2600);
        assert_eq!(book.title(), "War and Peace");
        assert_eq!(book.first_author_name(), "Tolstoy, Leo");
        assert_eq!(book.authors()[0].birth_year(), Some(1828));
        assert_eq!(book.authors()[0].death_year(), Some(1910));
        assert_eq!(book.subjects(), &["Historical fiction".to_string(), "War stories".to_string()]);
        assert_eq!(book.cover_url(), "https://www.gutenberg.org/cache/epub/2600/pg2600.cover.medium.jpg");
    }

    #[test]
    fn empty_fields_fall_back_to_sentinels() {
        let parsed = serde_json::from_str::<GutendexResponse>(SAMPLE).unwrap();

        let book = parsed.results[1].to_book_builder().build().unwrap();
        assert_eq!(book.first_author_name(), crate::item::UNKNOWN_AUTHOR);
        assert_eq!(book.subjects_label(), crate::item::NO_SUBJECTS);
        assert_eq!(book.cover_url(), crate::item::FALLBACK_COVER_URL);
    }
}
