use book_catalog::catalog::Catalog;
use book_catalog::config;
use book_catalog::item::{Filters, SearchForm};
use book_catalog::render::{Options, Renderer, TextRenderer};
use book_catalog::ArgumentError;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "book-catalog")]
#[command(about = "Browse, filter and page through a book catalog")]
struct CliArgs {
    #[arg(long, global = true, help = "Path of the catalog JSON file")]
    catalog: Option<String>,

    #[arg(long, global = true, help = "Number of books per page")]
    page_size: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 도서를 검색한다.
    Search {
        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "any", help = "Author id, or \"any\"")]
        author: String,

        #[arg(long, default_value = "any", help = "Genre id, or \"any\"")]
        genre: String,

        #[arg(long, default_value_t = 1, help = "Number of pages to load")]
        pages: usize,
    },

    /// 도서 상세 정보를 출력한다.
    Show {
        id: String,
    },

    /// 저자 선택 목록을 출력한다.
    Authors,

    /// 장르 선택 목록을 출력한다.
    Genres,
}

fn main() -> ExitCode {
    config::load_dotenv();
    let args = CliArgs::parse();

    let app_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Cannot load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _guard = match app_config.logger() {
        Some(logger) => match config::log::set_global_logging_config(logger) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            config::log::set_default_logging_config();
            None
        }
    };

    match run(args, &app_config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs, app_config: &config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let catalog_path = args.catalog.as_deref().unwrap_or(app_config.catalog());
    let page_size = args.page_size.unwrap_or(app_config.page_size());

    let (mut collection, authors, genres) = Catalog::from_path(catalog_path)?
        .into_collection(page_size)?;

    let stdout = std::io::stdout();
    let mut renderer = TextRenderer::new(stdout.lock());

    match args.command {
        Command::Search { title, author, genre, pages } => {
            if pages == 0 {
                return Err(ArgumentError::InvalidArgument("pages must be greater than 0".to_owned()).into());
            }
            let form = SearchForm {
                title: Some(title),
                author: Some(author),
                genre: Some(genre),
            };
            book_catalog::browse(&mut collection, &authors, &Filters::from(&form), pages, &mut renderer)?;
        }
        Command::Show { id } => {
            book_catalog::show(&collection, &authors, &genres, &id, &mut renderer)?;
        }
        Command::Authors => renderer.render_options(&Options::authors(&authors))?,
        Command::Genres => renderer.render_options(&Options::genres(&genres))?,
    }

    renderer.into_inner().flush()?;
    Ok(())
}
