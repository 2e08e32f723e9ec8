use crate::item::{Detail, Dictionary, Preview, ANY};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::io;
use std::io::Write;

/// 검색 결과가 없을 때 표시할 메시지
pub const NO_RESULTS_MESSAGE: &str = "No results found. Your filters might be too narrow.";

/// "더 보기" 버튼
///
/// # Example
/// ```
/// use book_catalog::render::ShowMore;
///
/// let button = ShowMore::new(5);
/// assert_eq!(button.to_string(), "Show more (5)");
/// assert!(button.is_enabled());
/// assert!(!ShowMore::new(0).is_enabled());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowMore {
    remaining: usize,
}

impl ShowMore {
    pub fn new(remaining: usize) -> Self {
        Self { remaining }
    }

    pub fn is_enabled(&self) -> bool {
        self.remaining > 0
    }
}

impl Display for ShowMore {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Show more ({})", self.remaining)
    }
}

/// 검색 폼의 선택 목록
/// 첫 항목은 항상 [`ANY`]이며 나머지는 표시 이름 순으로 정렬 된다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options(Vec<(String, String)>);

impl Options {

    pub fn new(all_label: &str, dict: &Dictionary) -> Self {
        let mut entries = dict.entries()
            .map(|(id, name)| (id.to_owned(), name.to_owned()))
            .collect::<Vec<_>>();
        entries.sort_by(|(a_id, a_name), (b_id, b_name)| a_name.cmp(b_name).then_with(|| a_id.cmp(b_id)));

        let mut options = vec![(ANY.to_owned(), all_label.to_owned())];
        options.extend(entries);
        Self(options)
    }

    pub fn authors(dict: &Dictionary) -> Self {
        Self::new("All Authors", dict)
    }

    pub fn genres(dict: &Dictionary) -> Self {
        Self::new("All Genres", dict)
    }

    /// (값, 표시 이름) 목록
    pub fn entries(&self) -> &[(String, String)] {
        &self.0
    }
}

/// 도서 목록, 상세를 그리는 외부 렌더러
pub trait Renderer {

    fn render_previews(&mut self, previews: &[Preview]) -> io::Result<()>;

    fn render_detail(&mut self, detail: &Detail) -> io::Result<()>;

    fn render_show_more(&mut self, show_more: ShowMore) -> io::Result<()>;

    fn render_no_results(&mut self) -> io::Result<()>;

    fn render_options(&mut self, options: &Options) -> io::Result<()>;
}

/// 일반 텍스트로 출력하는 렌더러
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {

    fn render_previews(&mut self, previews: &[Preview]) -> io::Result<()> {
        for preview in previews {
            writeln!(self.out, "[{}] {} - {}", preview.id, preview.title, preview.author)?;
            writeln!(self.out, "    {}", preview.image_url)?;
        }
        Ok(())
    }

    fn render_detail(&mut self, detail: &Detail) -> io::Result<()> {
        writeln!(self.out, "{}", detail.title)?;
        match detail.published_year {
            Some(year) => writeln!(self.out, "{} ({})", detail.author, year)?,
            None => writeln!(self.out, "{}", detail.author)?,
        }
        if !detail.genres.is_empty() {
            writeln!(self.out, "{}", detail.genres.join(", "))?;
        }
        writeln!(self.out, "{}", detail.image_url)?;
        writeln!(self.out)?;
        writeln!(self.out, "{}", detail.description)
    }

    fn render_show_more(&mut self, show_more: ShowMore) -> io::Result<()> {
        if show_more.is_enabled() {
            writeln!(self.out, "{}", show_more)?;
        }
        Ok(())
    }

    fn render_no_results(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", NO_RESULTS_MESSAGE)
    }

    fn render_options(&mut self, options: &Options) -> io::Result<()> {
        for (value, label) in options.entries() {
            writeln!(self.out, "{}\t{}", value, label)?;
        }
        Ok(())
    }
}
