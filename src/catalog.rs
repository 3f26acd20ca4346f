use crate::item::{Book, WishlistEntry, WishlistRepository};
use crate::provider::api::Client;
use std::collections::BTreeSet;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;
use tracing::{error, info, warn};

/// 카탈로그 사용 중 발생한 에러 열거
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// 네트워크 요청이 실패하거나 응답을 해석하지 못함
    NetworkFailure(String),

    /// 대상 도서가 현재 로드 된 페이지에 존재하지 않음
    BookNotInPage(u64),

    /// 이미 진행 중인 요청이 있어 새 요청이 거부 됨
    FetchAlreadyInFlight,
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// 페이지 로딩 상태
///
/// 요청 실패 시에도 별도의 에러 상태를 유지하지 않고 [`FetchState::Idle`]로 돌아간다.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FetchState {
    Idle,
    Loading,
}

/// 위시리스트 토글의 결과
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum WishlistToggle {
    Added,
    Removed,
}

/// 카탈로그 컨트롤러
///
/// # Description
/// 현재 로드 된 페이지의 도서 목록, 페이지네이션 커서, 장르 목록, 위시리스트 저장소 등
/// 카탈로그의 모든 상태를 하나의 구조체로 가진다. 전역 상태는 사용하지 않는다.
pub struct Catalog {
    client: Box<dyn Client>,
    wishlist: Box<dyn WishlistRepository>,

    /// 위시리스트의 읽기-수정-쓰기를 감싸는 잠금
    ///
    /// # Note
    /// 단일 프로세스 안의 토글만 직렬화 한다. 같은 저장소를 공유하는 다른 프로세스가
    /// 동시에 기록할 경우 갱신이 유실 될 수 있다.
    wishlist_lock: Mutex<()>,

    state: FetchState,
    books: Vec<Book>,
    genres: Vec<String>,
    previous: Option<String>,
    next: Option<String>,
    page_no: u32,
}

impl Catalog {
    pub fn new(client: Box<dyn Client>, wishlist: Box<dyn WishlistRepository>) -> Self {
        Self {
            client,
            wishlist,
            wishlist_lock: Mutex::new(()),
            state: FetchState::Idle,
            books: Vec::new(),
            genres: Vec::new(),
            previous: None,
            next: None,
            page_no: 1,
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn page_no(&self) -> u32 {
        self.page_no
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    /// 전달 받은 URL에서 도서 목록 한 페이지를 로드 한다.
    ///
    /// # Description
    /// 성공 시 현재 페이지의 도서 목록을 통째로 교체하고 장르 목록과 페이지네이션
    /// 커서를 새 응답 기준으로 다시 계산한다. 실패 시 에러를 로깅하고 마지막으로
    /// 로드 된 데이터를 유지한 채 [`FetchState::Idle`]로 돌아간다.
    ///
    /// 요청은 한 번에 하나만 허용하며 이미 진행 중인 요청이 있을 경우
    /// [`CatalogError::FetchAlreadyInFlight`]로 거부 된다.
    pub fn load_page(&mut self, url: &str) -> Result<(), CatalogError> {
        if self.state == FetchState::Loading {
            warn!("이미 진행 중인 요청이 있어 새 요청을 거부 합니다: {}", url);
            return Err(CatalogError::FetchAlreadyInFlight);
        }

        self.state = FetchState::Loading;
        let page = match self.client.get_books(url) {
            Ok(page) => page,
            Err(e) => {
                error!("도서 목록 요청 실패: {:?}", e);
                self.state = FetchState::Idle;
                return Err(CatalogError::NetworkFailure(format!("{:?}", e)));
            }
        };

        info!("도서 목록 로드 완료: url={}, 결과={}건", url, page.results.len());

        self.genres = derive_genres(&page.results);
        self.books = page.results;
        self.previous = page.previous;
        self.next = page.next;
        self.state = FetchState::Idle;

        Ok(())
    }

    /// 기본 엔드포인트에서 첫 페이지를 로드 한다.
    pub fn load_first(&mut self) -> Result<(), CatalogError> {
        let url = self.client.endpoint().to_owned();
        self.load_page(&url)?;
        self.page_no = 1;
        Ok(())
    }

    /// 지정 된 번호의 페이지를 기본 엔드포인트에서 로드 한다.
    pub fn load_page_number(&mut self, page_no: u32) -> Result<(), CatalogError> {
        if page_no <= 1 {
            return self.load_first();
        }

        let url = format!("{}?page={}", self.client.endpoint(), page_no);
        self.load_page(&url)?;
        self.page_no = page_no;
        Ok(())
    }

    /// 다음 페이지 커서를 따라 페이지를 로드 한다.
    /// 다음 페이지가 없을 경우 요청 없이 `Ok(false)`를 반환 한다.
    pub fn load_next(&mut self) -> Result<bool, CatalogError> {
        let url = match self.next.clone() {
            Some(url) => url,
            None => return Ok(false),
        };

        self.load_page(&url)?;
        self.page_no += 1;
        Ok(true)
    }

    /// 이전 페이지 커서를 따라 페이지를 로드 한다.
    /// 이전 페이지가 없을 경우 요청 없이 `Ok(false)`를 반환 한다.
    pub fn load_previous(&mut self) -> Result<bool, CatalogError> {
        let url = match self.previous.clone() {
            Some(url) => url,
            None => return Ok(false),
        };

        self.load_page(&url)?;
        self.page_no = self.page_no.saturating_sub(1).max(1);
        Ok(true)
    }

    /// 현재 페이지에서 제목으로 도서를 검색 한다.
    ///
    /// 대소문자를 구분하지 않는 부분 문자열 검색으로 빈 검색어는 현재 페이지 전체를 반환 한다.
    /// 장르 필터와는 독립적으로 항상 현재 페이지 전체를 대상으로 한다.
    pub fn search_title(&self, query: &str) -> Vec<&Book> {
        if query.is_empty() {
            return self.books.iter().collect();
        }

        let query = query.to_lowercase();
        self.books.iter()
            .filter(|book| book.title().to_lowercase().contains(&query))
            .collect()
    }

    /// 현재 페이지에서 장르로 도서를 필터링 한다.
    ///
    /// 도서의 주제 목록에 선택 된 장르와 정확히 일치하는 값이 있어야 포함 되며
    /// 빈 선택은 현재 페이지 전체를 반환 한다.
    /// 제목 검색과는 독립적으로 항상 현재 페이지 전체를 대상으로 한다.
    pub fn filter_genre(&self, genre: &str) -> Vec<&Book> {
        if genre.is_empty() {
            return self.books.iter().collect();
        }

        self.books.iter()
            .filter(|book| book.subjects().iter().any(|s| s == genre))
            .collect()
    }

    /// 위시리스트에서 도서를 토글 한다.
    ///
    /// # Description
    /// 이미 위시리스트에 있는 도서는 제거하고, 없는 도서는 현재 로드 된 페이지에서
    /// 찾아 값 복사본을 추가한다. 어느 쪽이든 컬렉션 전체를 저장소에 다시 기록한다.
    /// 추가 대상 도서가 현재 페이지에 없을 경우 [`CatalogError::BookNotInPage`]로
    /// 실패하며 저장소는 변경 되지 않는다. 제거는 아이디만 필요함으로 페이지와 무관하게 동작한다.
    pub fn toggle_wishlist(&self, book_id: u64) -> Result<WishlistToggle, CatalogError> {
        let _guard = self.wishlist_lock.lock().unwrap();

        let mut entries = self.wishlist.get_all();
        if let Some(pos) = entries.iter().position(|e| e.book_id() == book_id) {
            entries.remove(pos);
            self.wishlist.save_all(&entries);
            info!("위시리스트에서 도서를 제거 했습니다: id={}", book_id);
            return Ok(WishlistToggle::Removed);
        }

        let book = match self.books.iter().find(|b| b.id() == book_id) {
            Some(book) => book,
            None => {
                error!("현재 페이지에 존재하지 않는 도서 입니다: id={}", book_id);
                return Err(CatalogError::BookNotInPage(book_id));
            }
        };

        entries.push(WishlistEntry::new(book.clone()));
        self.wishlist.save_all(&entries);
        info!("위시리스트에 도서를 추가 했습니다: id={}", book_id);

        Ok(WishlistToggle::Added)
    }

    /// 전달 받은 도서 아이디가 위시리스트에 존재하는지 확인 한다.
    pub fn is_wishlisted(&self, book_id: u64) -> bool {
        self.wishlist.contains(book_id)
    }

    /// 저장 된 모든 위시리스트 항목을 가져온다.
    pub fn wishlist(&self) -> Vec<WishlistEntry> {
        self.wishlist.get_all()
    }
}

/// 도서 목록에서 중복을 제거한 장르(주제) 목록을 도출 한다.
///
/// 현재 로드 된 페이지의 도서들만 대상으로 하며 결과는 정렬 된 상태로 반환 된다.
pub fn derive_genres(books: &[Book]) -> Vec<String> {
    books.iter()
        .flat_map(|book| book.subjects().iter().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}
