use crate::collection::BookCollection;
use crate::item::{Dictionary, Filters};
use crate::render::{Renderer, ShowMore};
use std::fmt;
use std::fmt::Formatter;
use std::io;

pub mod item;
pub mod collection;
pub mod catalog;
pub mod render;
pub mod config;

#[derive(Debug)]
pub enum ArgumentError {
    InvalidArgument(String),
    BookNotFound(String),
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentError::InvalidArgument(s) => write!(f, "Invalid argument: {}", s),
            ArgumentError::BookNotFound(id) => write!(f, "No book with id: {}", id),
        }
    }
}

impl std::error::Error for ArgumentError {}

/// 도서를 검색하고 `pages` 페이지 만큼 불러와 렌더러로 출력한다.
///
/// 첫 페이지를 출력한 뒤 남은 도서가 있는 동안 다음 페이지를 불러온다. ("더 보기" 클릭)
/// 검색 결과가 없으면 안내 메시지만 출력한다.
pub fn browse<R: Renderer>(
    collection: &mut BookCollection,
    authors: &Dictionary,
    filters: &Filters,
    pages: usize,
    renderer: &mut R,
) -> io::Result<()> {
    collection.search(filters);
    if collection.match_count() == 0 {
        return renderer.render_no_results();
    }

    for page in 1..=pages.max(1) {
        if page > 1 && !collection.advance_page() {
            break;
        }
        let previews = collection.current_page_items()
            .into_iter()
            .map(|book| book.preview(authors))
            .collect::<Vec<_>>();
        renderer.render_previews(&previews)?;
    }

    renderer.render_show_more(ShowMore::new(collection.remaining_count()))
}

/// 아이디로 도서를 찾아 상세 정보를 출력한다.
pub fn show<R: Renderer>(
    collection: &BookCollection,
    authors: &Dictionary,
    genres: &Dictionary,
    id: &str,
    renderer: &mut R,
) -> Result<(), Box<dyn std::error::Error>> {
    let book = collection.find(id)
        .ok_or_else(|| ArgumentError::BookNotFound(id.to_owned()))?;

    renderer.render_detail(&book.detail(authors, genres))?;
    Ok(())
}
