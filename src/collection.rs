use crate::item::{Book, Filters, ItemError, RawBook};
use std::collections::HashSet;
use std::num::NonZeroUsize;
use tracing::debug;

/// 한 페이지에 표시할 기본 도서 개수
pub const DEF_PAGE_SIZE: usize = 36;

/// 검색, 페이징이 가능한 도서 목록
///
/// 전체 도서와 가장 최근 검색 조건을 만족하는 도서(matches), 현재 페이지를 가지고 있다.
/// 페이지는 1부터 시작하며 앞으로만 이동한다. ("더 보기" 방식)
///
/// # Example
/// ```
/// use book_catalog::collection::BookCollection;
/// use book_catalog::item::RawBook;
///
/// let raws = (1..=25).map(|i| RawBook {
///     id: i.to_string(),
///     title: format!("Book {}", i),
///     author: "author_1".to_owned(),
///     image: String::new(),
///     description: String::new(),
///     published: "2020-01-01".to_owned(),
///     genres: Vec::new(),
/// });
///
/// let mut collection = BookCollection::new(raws, 20).unwrap();
/// assert_eq!(collection.current_page_items().len(), 20);
/// assert_eq!(collection.remaining_count(), 5);
///
/// assert!(collection.advance_page());
/// assert_eq!(collection.current_page_items().len(), 5);
/// assert!(!collection.advance_page());
/// ```
#[derive(Debug, Clone)]
pub struct BookCollection {
    all: Vec<Book>,

    // all 에서의 위치, 항상 오름차순
    matches: Vec<usize>,

    page_size: NonZeroUsize,
    current_page: usize,
}

impl BookCollection {

    /// 원본 데이터로 도서 목록을 만든다.
    ///
    /// # Errors
    /// - `page_size`가 0일 경우 [`ItemError::InvalidPageSize`]
    /// - 같은 아이디의 도서가 있을 경우 [`ItemError::DuplicateId`]
    pub fn new<I>(raws: I, page_size: usize) -> Result<Self, ItemError>
    where
        I: IntoIterator<Item = RawBook>
    {
        let page_size = NonZeroUsize::new(page_size)
            .ok_or(ItemError::InvalidPageSize(page_size))?;

        let mut ids = HashSet::new();
        let mut all = Vec::new();
        for raw in raws {
            if !ids.insert(raw.id.clone()) {
                return Err(ItemError::DuplicateId(raw.id));
            }
            all.push(Book::from(raw));
        }

        let matches = (0..all.len()).collect();
        Ok(Self { all, matches, page_size, current_page: 1 })
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// 가장 최근 검색 조건을 만족하는 도서
    pub fn matches(&self) -> Vec<&Book> {
        self.resolve(&self.matches)
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// 아이디로 전체 도서 중 하나를 찾는다.
    pub fn find(&self, id: &str) -> Option<&Book> {
        self.all.iter().find(|book| book.id() == id)
    }

    /// 전달 받은 조건으로 도서를 다시 검색하고 첫 페이지로 이동한다.
    /// 검색 결과가 없어도 페이지는 1로 초기화 된다.
    pub fn search(&mut self, filters: &Filters) -> Vec<&Book> {
        self.matches = self.all.iter()
            .enumerate()
            .filter(|(_, book)| book.matches(filters))
            .map(|(i, _)| i)
            .collect();
        self.current_page = 1;

        debug!("Search finished: {} of {} books matched ({:?})", self.matches.len(), self.all.len(), filters);
        self.matches()
    }

    /// 현재 페이지의 도서
    /// 페이지가 검색 결과 범위를 벗어난 경우 빈 목록을 반환한다.
    pub fn current_page_items(&self) -> Vec<&Book> {
        let start = self.page_start();
        let end = std::cmp::min(start.saturating_add(self.page_size.get()), self.matches.len());
        if start >= end {
            return Vec::new();
        }
        self.resolve(&self.matches[start..end])
    }

    /// 첫 페이지부터 현재 페이지까지 불러온 도서
    pub fn loaded_items(&self) -> Vec<&Book> {
        let end = std::cmp::min(self.page_end(), self.matches.len());
        self.resolve(&self.matches[..end])
    }

    /// 현재 페이지 이후 남은 도서 개수
    pub fn remaining_count(&self) -> usize {
        self.matches.len().saturating_sub(self.page_end())
    }

    /// 남은 도서가 있을 경우 다음 페이지로 이동하고 true를 반환한다.
    /// 남은 도서가 없으면 아무것도 변경 하지 않고 false를 반환한다.
    pub fn advance_page(&mut self) -> bool {
        if self.remaining_count() == 0 {
            debug!("No more books to load (page: {})", self.current_page);
            return false;
        }

        self.current_page += 1;
        debug!("Advanced to page {} ({} remaining)", self.current_page, self.remaining_count());
        true
    }

    fn page_start(&self) -> usize {
        (self.current_page - 1).saturating_mul(self.page_size.get())
    }

    fn page_end(&self) -> usize {
        self.current_page.saturating_mul(self.page_size.get())
    }

    fn resolve(&self, positions: &[usize]) -> Vec<&Book> {
        positions.iter().map(|&i| &self.all[i]).collect()
    }
}
