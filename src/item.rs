mod raw_impl;

use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use tracing::warn;

pub use raw_impl::parse_published;

/// 검색 폼에서 "조건 없음"을 나타내는 값
pub const ANY: &str = "any";

/// Item 모듈에서 사용할 에러 열거
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    /// 페이지 크기는 0보다 커야 함
    InvalidPageSize(usize),

    /// 같은 아이디를 가진 도서가 두 개 이상 존재함
    DuplicateId(String),
}

impl Display for ItemError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ItemError::InvalidPageSize(size) => write!(f, "Page size must be greater than 0 (got {})", size),
            ItemError::DuplicateId(id) => write!(f, "Duplicate book id: {}", id),
        }
    }
}

impl std::error::Error for ItemError {}

/// 카탈로그에 기록된 도서 원본 데이터
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawBook {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    // 비어 있으면 출판일 없음으로 처리된다.
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// 아이디 - 표시 이름 사전 (저자, 장르)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Dictionary(HashMap<String, String>);

impl Dictionary {
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(|name| name.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(id, name)| (id.as_str(), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// 도서
///
/// 카탈로그를 읽을 때 한 번 생성 되며 이후 변경 되지 않는다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id: String,
    title: String,
    author_id: String,
    image_url: String,
    description: String,
    // 파싱할 수 없는 출판일은 None
    published: Option<NaiveDate>,
    genre_ids: Vec<String>,
}

impl Book {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author_id(&self) -> &str {
        &self.author_id
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn published(&self) -> Option<NaiveDate> {
        self.published
    }

    pub fn genre_ids(&self) -> &[String] {
        &self.genre_ids
    }

    /// 도서가 전달 받은 검색 조건을 모두 만족하는지 확인한다.
    ///
    /// 제목, 저자, 장르 조건의 AND 연산 결과를 반환한다.
    ///
    /// # Example
    /// ```
    /// use book_catalog::item::{Book, Filters, RawBook};
    ///
    /// let book = Book::from(RawBook {
    ///     id: "1".to_owned(),
    ///     title: "Dune Messiah".to_owned(),
    ///     author: "author_1".to_owned(),
    ///     image: "https://example.com/1.jpg".to_owned(),
    ///     description: String::new(),
    ///     published: "1969-10-15".to_owned(),
    ///     genres: vec!["scifi".to_owned()],
    /// });
    ///
    /// assert!(book.matches(&Filters::any().with_title("dune")));
    /// assert!(!book.matches(&Filters::any().with_author("author_2")));
    /// ```
    pub fn matches(&self, filters: &Filters) -> bool {
        filters.title.test(&self.title)
            && filters.author.accepts(|id| id == self.author_id)
            && filters.genre.accepts(|id| self.genre_ids.iter().any(|g| g == id))
    }

    /// 외부 렌더러에 넘겨줄 미리보기 데이터를 만든다.
    pub fn preview(&self, authors: &Dictionary) -> Preview {
        Preview {
            id: self.id.clone(),
            image_url: self.image_url.clone(),
            title: self.title.clone(),
            author: self.author_name(authors),
        }
    }

    /// 도서 상세 화면에 표시할 데이터를 만든다.
    pub fn detail(&self, authors: &Dictionary, genres: &Dictionary) -> Detail {
        use chrono::Datelike;

        let genre_names = self.genre_ids.iter()
            .map(|id| genres.name_of(id).unwrap_or(id).to_owned())
            .collect();

        Detail {
            id: self.id.clone(),
            image_url: self.image_url.clone(),
            title: self.title.clone(),
            author: self.author_name(authors),
            published_year: self.published.map(|d| d.year()),
            description: self.description.clone(),
            genres: genre_names,
        }
    }

    fn author_name(&self, authors: &Dictionary) -> String {
        match authors.name_of(&self.author_id) {
            Some(name) => name.to_owned(),
            None => {
                warn!("Unknown author id: {} (book: {})", self.author_id, self.id);
                self.author_id.clone()
            }
        }
    }
}

/// 도서 미리보기
/// 목록에서 클릭 가능한 카드 하나를 그리기 위한 데이터
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub id: String,
    pub image_url: String,
    pub title: String,
    /// 저자 아이디가 아닌 표시 이름
    pub author: String,
}

/// 도서 상세
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub id: String,
    pub image_url: String,
    pub title: String,
    pub author: String,
    pub published_year: Option<i32>,
    pub description: String,
    pub genres: Vec<String>,
}

/// 저자, 장르 검색 조건
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// 조건 없음
    Any,

    /// 아이디가 정확히 일치 해야 함 (대소문자 구분)
    Is(String),

    /// 검색 폼에 값이 없음, 어떤 도서와도 매칭 되지 않는다.
    Unset,
}

impl Criterion {
    fn accepts<F: Fn(&str) -> bool>(&self, predicate: F) -> bool {
        match self {
            Criterion::Any => true,
            Criterion::Is(id) => predicate(id),
            Criterion::Unset => false,
        }
    }
}

/// 제목 검색 조건
#[derive(Debug, Clone)]
enum TitleQuery {
    Blank,
    Pattern(Regex),
    Literal(String),
    Unset,
}

impl TitleQuery {
    fn new(title: Option<&str>) -> Self {
        let Some(title) = title else {
            return TitleQuery::Unset;
        };
        if title.trim().is_empty() {
            return TitleQuery::Blank;
        }

        match Regex::new(&format!("(?i){}", regex::escape(title))) {
            Ok(regex) => TitleQuery::Pattern(regex),
            Err(e) => {
                warn!("Cannot compile title pattern, falling back to lowercase comparison: {}", e);
                TitleQuery::Literal(title.to_lowercase())
            }
        }
    }

    fn test(&self, title: &str) -> bool {
        match self {
            TitleQuery::Blank => true,
            TitleQuery::Pattern(regex) => regex.is_match(title),
            TitleQuery::Literal(s) => title.to_lowercase().contains(s.as_str()),
            TitleQuery::Unset => false,
        }
    }
}

/// 도서 검색 조건
///
/// # Example
/// ```
/// use book_catalog::item::{Criterion, Filters};
///
/// let filters = Filters::any()
///     .with_title("dune")
///     .with_genre("scifi");
///
/// assert_eq!(filters.author(), &Criterion::Any);
/// assert_eq!(filters.genre(), &Criterion::Is("scifi".to_owned()));
/// ```
#[derive(Debug, Clone)]
pub struct Filters {
    title: TitleQuery,
    author: Criterion,
    genre: Criterion,
}

impl Filters {
    pub fn new(title: Option<&str>, author: Criterion, genre: Criterion) -> Self {
        Self {
            title: TitleQuery::new(title),
            author,
            genre,
        }
    }

    /// 모든 도서와 매칭 되는 검색 조건
    pub fn any() -> Self {
        Self::new(Some(""), Criterion::Any, Criterion::Any)
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = TitleQuery::new(Some(title));
        self
    }

    pub fn with_author(mut self, author_id: &str) -> Self {
        self.author = Criterion::Is(author_id.to_owned());
        self
    }

    pub fn with_genre(mut self, genre_id: &str) -> Self {
        self.genre = Criterion::Is(genre_id.to_owned());
        self
    }

    pub fn author(&self) -> &Criterion {
        &self.author
    }

    pub fn genre(&self) -> &Criterion {
        &self.genre
    }
}

/// 검색 폼에서 전달 받은 값
/// 저자, 장르는 [`ANY`]로 조건 없음을 표시한다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, title: &str, author: &str, genres: &[&str]) -> RawBook {
        RawBook {
            id: id.to_owned(),
            title: title.to_owned(),
            author: author.to_owned(),
            image: format!("https://example.com/{}.jpg", id),
            description: format!("description of {}", title),
            published: "2001-02-03T00:00:00.000Z".to_owned(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
        }
    }

    fn authors() -> Dictionary {
        Dictionary::from_iter([("author_1", "Frank Herbert"), ("author_2", "Ursula K. Le Guin")])
    }

    #[test]
    fn match_all_filters_accept_every_book() {
        let books = [
            Book::from(raw("1", "Dune", "author_1", &["scifi"])),
            Book::from(raw("2", "", "author_2", &[])),
            Book::from(raw("3", "The Dispossessed", "unknown", &["scifi", "classic"])),
        ];

        let filters = Filters::any();
        assert!(books.iter().all(|b| b.matches(&filters)));
    }

    #[test]
    fn title_is_case_insensitive_substring() {
        let book = Book::from(raw("1", "Dune Messiah", "author_1", &[]));

        assert!(book.matches(&Filters::any().with_title("dune")));
        assert!(book.matches(&Filters::any().with_title("MESSIAH")));
        assert!(book.matches(&Filters::any().with_title("e M")));
        assert!(!book.matches(&Filters::any().with_title("Children")));
    }

    #[test]
    fn whitespace_title_passes() {
        let book = Book::from(raw("1", "Dune", "author_1", &[]));

        assert!(book.matches(&Filters::any().with_title("   ")));
    }

    #[test]
    fn title_with_regex_characters_is_literal() {
        let book = Book::from(raw("1", "What? (Part 1)", "author_1", &[]));

        assert!(book.matches(&Filters::any().with_title("? (part")));
        assert!(!book.matches(&Filters::any().with_title(".*")));
    }

    #[test]
    fn author_is_exact_match() {
        let book = Book::from(raw("1", "Dune", "author_1", &[]));

        assert!(book.matches(&Filters::any().with_author("author_1")));
        assert!(!book.matches(&Filters::any().with_author("Author_1")));
        assert!(!book.matches(&Filters::any().with_author("author")));
    }

    #[test]
    fn genre_must_be_contained() {
        let book = Book::from(raw("1", "Dune", "author_1", &["scifi", "classic"]));
        let no_genre = Book::from(raw("2", "Dune", "author_1", &[]));

        assert!(book.matches(&Filters::any().with_genre("classic")));
        assert!(!book.matches(&Filters::any().with_genre("fantasy")));
        assert!(!no_genre.matches(&Filters::any().with_genre("scifi")));
        assert!(no_genre.matches(&Filters::any()));
    }

    #[test]
    fn all_clauses_are_combined() {
        let book = Book::from(raw("1", "Dune", "author_1", &["scifi"]));

        let filters = Filters::any().with_title("dune").with_author("author_1").with_genre("scifi");
        assert!(book.matches(&filters));

        let filters = Filters::any().with_title("dune").with_author("author_1").with_genre("fantasy");
        assert!(!book.matches(&filters));
    }

    #[test]
    fn unset_fields_fail_closed() {
        let book = Book::from(raw("1", "Dune", "author_1", &["scifi"]));

        assert!(!book.matches(&Filters::new(None, Criterion::Any, Criterion::Any)));
        assert!(!book.matches(&Filters::new(Some(""), Criterion::Unset, Criterion::Any)));
        assert!(!book.matches(&Filters::new(Some(""), Criterion::Any, Criterion::Unset)));
    }

    #[test]
    fn any_as_real_id_is_not_a_wildcard() {
        let book = Book::from(raw("1", "Dune", "author_1", &["scifi"]));

        assert!(!book.matches(&Filters::any().with_author(ANY)));
        assert!(!book.matches(&Filters::any().with_genre(ANY)));
    }

    #[test]
    fn preview_uses_author_display_name() {
        let book = Book::from(raw("1", "Dune", "author_1", &[]));

        let preview = book.preview(&authors());
        assert_eq!(preview, Preview {
            id: "1".to_owned(),
            image_url: "https://example.com/1.jpg".to_owned(),
            title: "Dune".to_owned(),
            author: "Frank Herbert".to_owned(),
        });
    }

    #[test]
    fn preview_falls_back_to_author_id() {
        let book = Book::from(raw("1", "Dune", "author_9", &[]));

        assert_eq!(book.preview(&authors()).author, "author_9");
    }

    #[test]
    fn detail_resolves_names_and_year() {
        let book = Book::from(raw("1", "Dune", "author_1", &["scifi", "mystery"]));
        let genres = Dictionary::from_iter([("scifi", "Science Fiction")]);

        let detail = book.detail(&authors(), &genres);
        assert_eq!(detail.author, "Frank Herbert");
        assert_eq!(detail.published_year, Some(2001));
        assert_eq!(detail.genres, vec!["Science Fiction".to_owned(), "mystery".to_owned()]);
        assert_eq!(detail.description, "description of Dune");
    }
}
