use crate::item::{Book, WishlistEntry};
use std::collections::HashSet;

/// 표시할 도서가 없을 때 출력하는 메시지
pub const NO_RESULTS_MESSAGE: &'static str = "No results found.";
/// 위시리스트가 비어 있을 때 출력하는 메시지
pub const EMPTY_WISHLIST_MESSAGE: &'static str = "Wishlist is empty.";

/// 위시리스트에 담긴 도서의 표시 마크
const WISHLISTED_MARK: &'static str = "[*]";
/// 위시리스트에 없는 도서의 표시 마크
const NOT_WISHLISTED_MARK: &'static str = "[ ]";

/// 도서 목록을 카드 형태의 문자열로 렌더링 한다.
///
/// # Description
/// 입력 만으로 결정 되는 순수 함수로 도서 하나당 카드 하나를 만든다.
/// 각 카드는 제목과 상세 페이지 링크, 표지 이미지 URL, 첫 번째 저자명,
/// 콤마로 연결 된 주제 목록, 도서 아이디, 위시리스트 마크를 포함한다.
/// 도서 목록이 비어 있을 경우 카드 없이 [`NO_RESULTS_MESSAGE`]만 출력한다.
pub fn render_books<B: AsRef<Book>>(books: &[B], wishlist_ids: &HashSet<u64>) -> String {
    if books.is_empty() {
        return NO_RESULTS_MESSAGE.to_owned();
    }

    books.iter()
        .map(|book| render_card(book.as_ref(), wishlist_ids))
        .collect::<Vec<String>>()
        .join("\n\n")
}

fn render_card(book: &Book, wishlist_ids: &HashSet<u64>) -> String {
    let mark = if wishlist_ids.contains(&book.id()) {
        WISHLISTED_MARK
    } else {
        NOT_WISHLISTED_MARK
    };

    format!(
        "{} {} ({})\n    Cover: {}\n    Written by: {}\n    Genre: {}\n    ID: {}",
        mark,
        book.title(),
        book.detail_url(),
        book.cover_url(),
        book.first_author_name(),
        book.subjects_label(),
        book.id(),
    )
}

/// 장르 선택 목록을 렌더링 한다. 맨 앞에는 필터 없음 옵션이 붙는다.
pub fn render_genres(genres: &[String]) -> String {
    let mut lines = vec!["- (no filter)".to_owned()];
    for genre in genres {
        lines.push(format!("- {}", genre));
    }
    lines.join("\n")
}

/// 페이지 번호와 페이지네이션 컨트롤의 활성 여부를 렌더링 한다.
pub fn render_status(page_no: u32, has_previous: bool, has_next: bool) -> String {
    let prev = if has_previous { "[prev]" } else { "[----]" };
    let next = if has_next { "[next]" } else { "[----]" };
    format!("{} Page {} {}", prev, page_no, next)
}

/// 저장 된 위시리스트를 렌더링 한다.
pub fn render_wishlist(entries: &[WishlistEntry]) -> String {
    if entries.is_empty() {
        return EMPTY_WISHLIST_MESSAGE.to_owned();
    }

    entries.iter()
        .map(|entry| format!(
            "{} {} (ID: {}, added: {})",
            WISHLISTED_MARK,
            entry.book().title(),
            entry.book_id(),
            entry.added_at().format("%Y-%m-%d %H:%M"),
        ))
        .collect::<Vec<String>>()
        .join("\n")
}
