pub mod repo;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Item 모듈에서 사용할 에러 열거
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    /// 필수 데이터가 입력 되지 않음
    RequireArgumentMissing(String),
}

impl Display for ItemError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// 저자 정보가 없는 도서에 표시할 기본 저자명
pub const UNKNOWN_AUTHOR: &'static str = "Unknown author";
/// 주제 정보가 없는 도서에 표시할 기본 문구
pub const NO_SUBJECTS: &'static str = "No subjects listed";
/// 표지 이미지를 찾을 때 사용하는 포맷 키
pub const COVER_FORMAT_KEY: &'static str = "image/jpeg";
/// 표지 이미지가 없는 도서에 사용할 대체 이미지 URL
pub const FALLBACK_COVER_URL: &'static str = "https://www.gutenberg.org/cache/epub/1342/pg1342.cover.medium.jpg";
/// 도서 상세 페이지의 기본 URL
const DETAIL_URL_PREFIX: &'static str = "https://www.gutenberg.org/ebooks/";

/// 도서 저자
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Author {
    name: String,
    birth_year: Option<i32>,
    death_year: Option<i32>,
}

impl Author {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            birth_year: None,
            death_year: None,
        }
    }

    pub fn with_years<S: Into<String>>(name: S, birth_year: Option<i32>, death_year: Option<i32>) -> Self {
        Self {
            name: name.into(),
            birth_year,
            death_year,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_year(&self) -> Option<i32> {
        self.birth_year
    }

    pub fn death_year(&self) -> Option<i32> {
        self.death_year
    }
}

/// 도서의 포맷 데이터 타입
/// MIME 타입 문자열을 키로, 해당 포맷의 리소스 URL을 값으로 가진다.
pub type Formats = HashMap<String, String>;

/// 도서
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Book {
    id: u64,
    title: String,
    authors: Vec<Author>,
    subjects: Vec<String>,
    formats: Formats,
}

impl Book {
    pub fn builder() -> BookBuilder {
        BookBuilder::new()
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn formats(&self) -> &Formats {
        &self.formats
    }

    /// 첫 번째 저자의 이름을 반환 한다. 저자 정보가 없을 경우 [`UNKNOWN_AUTHOR`]를 반환 한다.
    pub fn first_author_name(&self) -> &str {
        self.authors.first()
            .map(|author| author.name())
            .unwrap_or(UNKNOWN_AUTHOR)
    }

    /// 도서의 주제들을 콤마로 연결한 문자열로 반환 한다. 주제 정보가 없을 경우 [`NO_SUBJECTS`]를 반환 한다.
    pub fn subjects_label(&self) -> String {
        if self.subjects.is_empty() {
            NO_SUBJECTS.to_owned()
        } else {
            self.subjects.join(", ")
        }
    }

    /// 표지 이미지 URL을 반환 한다. [`COVER_FORMAT_KEY`] 포맷이 없을 경우 [`FALLBACK_COVER_URL`]를 반환 한다.
    pub fn cover_url(&self) -> &str {
        self.formats.get(COVER_FORMAT_KEY)
            .map(|url| url.as_str())
            .unwrap_or(FALLBACK_COVER_URL)
    }

    /// 도서 상세 페이지의 URL을 반환 한다.
    pub fn detail_url(&self) -> String {
        format!("{}{}", DETAIL_URL_PREFIX, self.id)
    }
}

impl AsRef<Book> for Book {
    fn as_ref(&self) -> &Book {
        self
    }
}

/// Book 빌더
#[derive(Debug, Clone, Default)]
pub struct BookBuilder {
    id: Option<u64>,
    title: Option<String>,
    authors: Vec<Author>,
    subjects: Vec<String>,
    formats: Formats,
}

impl BookBuilder {
    pub fn new() -> Self {
        BookBuilder::default()
    }

    pub fn id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn add_author(mut self, author: Author) -> Self {
        self.authors.push(author);
        self
    }

    pub fn add_subject<S: Into<String>>(mut self, subject: S) -> Self {
        self.subjects.push(subject.into());
        self
    }

    pub fn add_format<K: Into<String>, V: Into<String>>(mut self, mime: K, url: V) -> Self {
        self.formats.insert(mime.into(), url.into());
        self
    }

    pub fn build(self) -> Result<Book, ItemError> {
        let id = self.id.ok_or_else(||
            ItemError::RequireArgumentMissing("id is required".to_string()))?;
        let title = self.title.ok_or_else(||
            ItemError::RequireArgumentMissing("title is required".to_string()))?;

        Ok(Book {
            id,
            title,
            authors: self.authors,
            subjects: self.subjects,
            formats: self.formats,
        })
    }
}

/// 위시리스트 저장 항목
///
/// # Description
/// 위시리스트에 담은 시점의 도서 데이터를 값 그대로 복사하여 저장한다.
/// 이후 API 응답에서 도서 데이터가 바뀌더라도 저장 된 항목은 영향을 받지 않는다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistEntry {
    book: Book,
    added_at: chrono::NaiveDateTime,
}

impl WishlistEntry {
    pub fn new(book: Book) -> Self {
        Self {
            book,
            added_at: chrono::Local::now().naive_local(),
        }
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn book_id(&self) -> u64 {
        self.book.id()
    }

    pub fn added_at(&self) -> chrono::NaiveDateTime {
        self.added_at
    }
}

/// 위시리스트 저장소
pub trait WishlistRepository {

    /// 저장 된 모든 위시리스트 항목을 가져온다. 저장 된 데이터가 없을 경우 빈 리스트를 반환 한다.
    fn get_all(&self) -> Vec<WishlistEntry>;

    /// 전달 받은 위시리스트 전체를 저장소에 덮어쓰고 저장 된 항목 수를 반환 한다.
    /// 변경 된 항목만 따로 저장하지 않고 항상 컬렉션 전체를 저장한다.
    fn save_all(&self, entries: &[WishlistEntry]) -> usize;

    /// 전달 받은 도서 아이디가 위시리스트에 존재하는지 확인 한다.
    fn contains(&self, book_id: u64) -> bool {
        self.get_all().iter().any(|e| e.book_id() == book_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book_with(authors: Vec<Author>, subjects: Vec<&str>) -> Book {
        let mut builder = Book::builder()
            .id(1)
            .title("War and Peace");
        for author in authors {
            builder = builder.add_author(author);
        }
        for subject in subjects {
            builder = builder.add_subject(subject);
        }
        builder.build().unwrap()
    }

    #[test]
    fn builder_requires_id_and_title() {
        let missing_id = Book::builder().title("Emma").build();
        assert_eq!(missing_id, Err(ItemError::RequireArgumentMissing("id is required".to_string())));

        let missing_title = Book::builder().id(1).build();
        assert_eq!(missing_title, Err(ItemError::RequireArgumentMissing("title is required".to_string())));
    }

    #[test]
    fn first_author_name_falls_back_to_sentinel() {
        let book = book_with(vec![], vec![]);
        assert_eq!(book.first_author_name(), UNKNOWN_AUTHOR);

        let book = book_with(vec![Author::new("Tolstoy, Leo"), Author::new("Maude, Aylmer")], vec![]);
        assert_eq!(book.first_author_name(), "Tolstoy, Leo");
    }

    #[test]
    fn subjects_label_joins_with_comma_or_falls_back() {
        let book = book_with(vec![], vec![]);
        assert_eq!(book.subjects_label(), NO_SUBJECTS);

        let book = book_with(vec![], vec!["Fiction", "War stories"]);
        assert_eq!(book.subjects_label(), "Fiction, War stories");
    }

    #[test]
    fn cover_url_falls_back_when_format_missing() {
        let book = book_with(vec![], vec![]);
        assert_eq!(book.cover_url(), FALLBACK_COVER_URL);

        let book = Book::builder()
            .id(2600)
            .title("War and Peace")
            .add_format(COVER_FORMAT_KEY, "https://www.gutenberg.org/cache/epub/2600/pg2600.cover.medium.jpg")
            .build()
            .unwrap();
        assert_eq!(book.cover_url(), "https://www.gutenberg.org/cache/epub/2600/pg2600.cover.medium.jpg");
    }

    #[test]
    fn detail_url_is_derived_from_id() {
        let book = book_with(vec![], vec![]);
        assert_eq!(book.detail_url(), "https://www.gutenberg.org/ebooks/1");
    }
}
