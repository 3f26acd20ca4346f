use crate::item::{WishlistEntry, WishlistRepository};
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::fs;
use std::path::PathBuf;
use tracing::error;

/// 위시리스트를 저장할 때 사용하는 기본 키
pub const DEFAULT_WISHLIST_KEY: &'static str = "wishlist";

/// 저장소 사용 중 발생한 에러 열거
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// 저장소에 값을 기록하지 못함
    WriteFailed(String),

    /// 저장 된 값의 직렬화/역직렬화에 실패함
    SerializeFailed(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// 키-값 저장소
///
/// # Description
/// 브라우저의 로컬 스토리지와 같은 단순 키-값 저장 능력을 표현하는 트레이트로
/// 키 하나에 문자열 값 하나를 저장한다.
pub trait KeyValueStore {

    /// 키에 저장 된 값을 가져온다. 저장 된 값이 없을 경우 `None`을 반환 한다.
    fn get(&self, key: &str) -> Option<String>;

    /// 키에 값을 저장 한다. 이미 값이 있을 경우 전체를 덮어쓴다.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// 파일 기반 키-값 저장소 키 하나당 `<키>.json` 파일 하나를 지정 된 디렉토리에 저장한다.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    fn path_of(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_of(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        fs::write(self.path_of(key), value)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))
    }
}

/// 메모리 기반 키-값 저장소 주로 테스트에서 [`FileStore`]를 대신해 사용한다.
pub struct MemoryStore {
    values: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            values: std::sync::Mutex::new(std::collections::HashMap::new()),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.lock().unwrap().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// 키-값 저장소에 위시리스트를 저장하는 저장소 구현체
///
/// # Description
/// 위시리스트 컬렉션 전체를 JSON으로 직렬화 하여 키 하나에 저장한다.
/// 저장 된 값이 없거나 역직렬화에 실패 할 경우 빈 컬렉션으로 처리한다.
pub struct StoreWishlistRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> StoreWishlistRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_WISHLIST_KEY)
    }

    pub fn with_key<K: Into<String>>(store: S, key: K) -> Self {
        Self { store, key: key.into() }
    }
}

impl<S: KeyValueStore> WishlistRepository for StoreWishlistRepository<S> {
    fn get_all(&self) -> Vec<WishlistEntry> {
        match self.store.get(&self.key) {
            Some(raw) => serde_json::from_str(&raw)
                .unwrap_or_else(|e| logging_with_default_vec(e)),
            None => vec![],
        }
    }

    fn save_all(&self, entries: &[WishlistEntry]) -> usize {
        let raw = match serde_json::to_string(entries) {
            Ok(raw) => raw,
            Err(e) => return logging_with_default_usize(e),
        };

        match self.store.set(&self.key, &raw) {
            Ok(_) => entries.len(),
            Err(e) => logging_with_default_usize(e),
        }
    }
}

fn logging_with_default_usize<E>(e: E) -> usize
where
    E: Debug
{
    error!("{:?}", e);
    0
}

fn logging_with_default_vec<E, R>(e: E) -> Vec<R>
where
    E: Debug
{
    error!("{:?}", e);
    vec![]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Book;

    fn entry(id: u64, title: &str) -> WishlistEntry {
        let book = Book::builder().id(id).title(title).build().unwrap();
        WishlistEntry::new(book)
    }

    #[test]
    fn get_all_defaults_to_empty_when_key_absent() {
        let repo = StoreWishlistRepository::new(MemoryStore::new());
        assert!(repo.get_all().is_empty());
    }

    #[test]
    fn get_all_defaults_to_empty_when_value_is_corrupt() {
        let store = MemoryStore::new();
        store.set(DEFAULT_WISHLIST_KEY, "definitely not json").unwrap();

        let repo = StoreWishlistRepository::new(store);
        assert!(repo.get_all().is_empty());
    }

    #[test]
    fn save_all_overwrites_whole_collection() {
        let repo = StoreWishlistRepository::new(MemoryStore::new());

        let saved = repo.save_all(&[entry(1, "Emma"), entry(2, "War and Peace")]);
        assert_eq!(saved, 2);

        let saved = repo.save_all(&[entry(3, "Dracula")]);
        assert_eq!(saved, 1);

        let stored = repo.get_all();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].book_id(), 3);
    }

    #[test]
    fn contains_checks_by_book_id() {
        let repo = StoreWishlistRepository::new(MemoryStore::new());
        repo.save_all(&[entry(2, "War and Peace")]);

        assert!(repo.contains(2));
        assert!(!repo.contains(1));
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store"));

        assert_eq!(store.get("wishlist"), None);

        store.set("wishlist", "[]").unwrap();
        assert_eq!(store.get("wishlist"), Some("[]".to_string()));

        let repo = StoreWishlistRepository::new(store);
        repo.save_all(&[entry(84, "Frankenstein")]);

        let stored = repo.get_all();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].book().title(), "Frankenstein");
    }
}
