use crate::collection::BookCollection;
use crate::item::{Dictionary, ItemError, RawBook};
use serde::Deserialize;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::Path;
use tracing::info;

/// 카탈로그 로딩 중 발생한 에러 열거
#[derive(Debug)]
pub enum CatalogError {
    /// 카탈로그 파일을 읽을 수 없음
    Io(String, std::io::Error),

    /// 카탈로그 JSON 파싱 실패
    Parse(serde_json::Error),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(path, e) => write!(f, "Cannot read catalog {}: {}", path, e),
            CatalogError::Parse(e) => write!(f, "Cannot parse catalog: {}", e),
        }
    }
}

impl std::error::Error for CatalogError {}

/// 도서 카탈로그 원본
/// 도서 목록과 저자, 장르 사전을 가지고 있다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    pub books: Vec<RawBook>,
    #[serde(default)]
    pub authors: Dictionary,
    #[serde(default)]
    pub genres: Dictionary,
}

impl Catalog {

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(path.display().to_string(), e))?;

        let catalog = Self::from_json(&text)?;
        info!("Catalog loaded from {}: {} books, {} authors, {} genres",
            path.display(), catalog.books.len(), catalog.authors.len(), catalog.genres.len());
        Ok(catalog)
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(text).map_err(CatalogError::Parse)
    }

    /// 도서 목록을 [`BookCollection`]으로 옮기고 저자, 장르 사전을 반환한다.
    pub fn into_collection(self, page_size: usize) -> Result<(BookCollection, Dictionary, Dictionary), ItemError> {
        let collection = BookCollection::new(self.books, page_size)?;
        Ok((collection, self.authors, self.genres))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "books": [
            {
                "id": "b1",
                "title": "Dune",
                "author": "a1",
                "image": "https://example.com/b1.jpg",
                "description": "Desert planet",
                "published": "1965-08-01T00:00:00.000Z",
                "genres": ["g1"]
            },
            {
                "id": "b2",
                "title": "Untitled",
                "author": "a2",
                "image": "https://example.com/b2.jpg",
                "description": "",
                "published": "unknown"
            }
        ],
        "authors": { "a1": "Frank Herbert", "a2": "Anonymous" },
        "genres": { "g1": "Science Fiction" }
    }"#;

    #[test]
    fn parse_catalog() {
        let catalog = Catalog::from_json(CATALOG).unwrap();

        assert_eq!(catalog.books.len(), 2);
        assert!(catalog.books[1].genres.is_empty());
        assert_eq!(catalog.authors.name_of("a1"), Some("Frank Herbert"));
        assert_eq!(catalog.genres.name_of("g1"), Some("Science Fiction"));
    }

    #[test]
    fn into_collection_keeps_dictionaries() {
        let (collection, authors, genres) = Catalog::from_json(CATALOG).unwrap()
            .into_collection(1)
            .unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.page_size(), 1);
        assert_eq!(collection.remaining_count(), 1);
        assert_eq!(collection.find("b2").and_then(|b| b.published()), None);
        assert_eq!(authors.len(), 2);
        assert_eq!(genres.len(), 1);
    }

    #[test]
    fn missing_text_fields_fall_back_to_empty() {
        let catalog = Catalog::from_json(r#"{
            "books": [
                { "id": "b1", "title": "Dune", "author": "a1", "image": "b1.jpg", "description": "Spice", "published": "1965-08-01" },
                { "id": "b2", "author": "a2" }
            ]
        }"#).unwrap();

        let (collection, _, _) = catalog.into_collection(10).unwrap();
        let book = collection.find("b2").unwrap();
        assert_eq!(book.title(), "");
        assert_eq!(book.image_url(), "");
        assert_eq!(book.description(), "");
        assert_eq!(book.published(), None);
        assert!(book.genre_ids().is_empty());
        assert_eq!(collection.match_count(), 2);
    }

    #[test]
    fn missing_id_or_author_is_parse_error() {
        let result = Catalog::from_json(r#"{"books": [{ "id": "b1", "title": "Dune" }]}"#);

        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let result = Catalog::from_json(r#"{"books": [{"id": 1}]}"#);

        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = Catalog::from_path("does/not/exist.json");

        assert!(matches!(result, Err(CatalogError::Io(_, _))));
    }
}
