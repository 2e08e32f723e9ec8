use crate::item::{Book, Criterion, Filters, RawBook, SearchForm, ANY};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::warn;

impl From<RawBook> for Book {

    fn from(raw: RawBook) -> Self {
        let published = parse_published(&raw.published);
        if published.is_none() {
            warn!("Cannot parse published date of book {}: {:?}", raw.id, raw.published);
        }

        Book {
            id: raw.id,
            title: raw.title,
            author_id: raw.author,
            image_url: raw.image,
            description: raw.description,
            published,
            genre_ids: raw.genres,
        }
    }
}

/// 출판일 문자열을 날짜로 변환한다.
/// RFC 3339 형식과 `YYYY-MM-DD` 형식을 지원하며 변환 할 수 없을 경우 [`None`]을 반환한다.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use book_catalog::item::parse_published;
///
/// assert_eq!(parse_published("1965-08-01T00:00:00.000Z"), NaiveDate::from_ymd_opt(1965, 8, 1));
/// assert_eq!(parse_published("1965-08-01"), NaiveDate::from_ymd_opt(1965, 8, 1));
/// assert_eq!(parse_published("someday"), None);
/// ```
pub fn parse_published(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}

impl From<Option<&str>> for Criterion {

    fn from(value: Option<&str>) -> Self {
        match value {
            Some(ANY) => Criterion::Any,
            Some(id) => Criterion::Is(id.to_owned()),
            None => Criterion::Unset,
        }
    }
}

impl From<&SearchForm> for Filters {

    fn from(form: &SearchForm) -> Self {
        Filters::new(
            form.title.as_deref(),
            Criterion::from(form.author.as_deref()),
            Criterion::from(form.genre.as_deref()),
        )
    }
}
