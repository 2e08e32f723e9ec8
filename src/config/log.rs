use serde::Deserialize;
use std::fmt;
use std::fmt::{Display, Formatter};
use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;

const LEVELS: [&str; 5] = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];
const ROTATIONS: [&str; 4] = ["DAILY", "HOURLY", "MINUTELY", "NEVER"];

/// 로깅 설정 중 발생한 에러 열거
#[derive(Debug)]
pub enum LogError {
    /// 알 수 없는 로그 레벨
    InvalidLevel(String),

    /// 알 수 없는 로그 파일 로테이션
    InvalidRotation(String),

    /// 로그 파일을 생성할 수 없음
    Appender(String),
}

impl Display for LogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LogError::InvalidLevel(s) => write!(f, "Log level must be one of {:?} (got {})", LEVELS, s),
            LogError::InvalidRotation(s) => write!(f, "Log rotation must be one of {:?} (got {})", ROTATIONS, s),
            LogError::Appender(s) => write!(f, "Cannot create log file appender: {}", s),
        }
    }
}

impl std::error::Error for LogError {}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    dir: String,
    name: String,

    /// 최대 로그 파일 개수로 로그 파일이 설정한 개수보다 커질 경우 기존의 로그파일들은 삭제 된다.
    /// 설정 되지 않을 시 로그 파일은 삭제 되지 않는다.
    keep: Option<usize>,

    /// 파일과 stdout에 출력할 로그의 레벨로 지정된 로그 레벨 이상만 로깅된다.
    /// 설정하지 않을시 기본값은 INFO로 설정 된다.
    level: Option<String>,

    /// 로깅 파일이 분리 되는 기간으로 .log 파일 하나 당 설정된 기간 동안 로그가 기록 된다.
    /// 설정 되지 않을시 기본값은 DAILY로 설정된다.
    rotation: Option<String>
}

/// 설정 파일의 로거 설정으로 전역 로거를 등록한다.
/// 로그는 JSON 형식으로 stdout과 로그 파일에 함께 기록된다.
///
/// 반환된 [`WorkerGuard`]가 drop 되면 로그 파일에 더 이상 기록 되지 않음으로 프로그램 종료까지 유지 해야 한다.
pub fn set_global_logging_config(c: &Config) -> Result<WorkerGuard, LogError> {
    let rotation = c.rotation.as_deref().map(parse_rotation).transpose()?
        .unwrap_or(rolling::Rotation::DAILY);
    let level = c.level.as_deref().map(parse_level).transpose()?
        .unwrap_or(tracing::Level::INFO);

    let mut file_appender = rolling::RollingFileAppender::builder()
        .filename_prefix(c.name.clone())
        .filename_suffix("log")
        .rotation(rotation);

    if let Some(keep) = c.keep {
        file_appender = file_appender.max_log_files(keep);
    }

    let file_appender = file_appender.build(c.dir.clone())
        .map_err(|e| LogError::Appender(e.to_string()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let writer = std::io::stdout.and(non_blocking);

    tracing_subscriber::fmt()
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_current_span(true)
        .with_span_list(true)
        .with_timer(LocalTime::new(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]")))
        .with_writer(writer)
        .with_max_level(level)
        .init();

    Ok(guard)
}

/// 로거 설정이 없을 때 사용할 기본 로거로 WARN 이상의 로그만 stderr에 출력한다.
pub fn set_default_logging_config() {
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();
}

fn parse_rotation(s: &str) -> Result<rolling::Rotation, LogError> {
    match s {
        "DAILY" => Ok(rolling::Rotation::DAILY),
        "HOURLY" => Ok(rolling::Rotation::HOURLY),
        "MINUTELY" => Ok(rolling::Rotation::MINUTELY),
        "NEVER" => Ok(rolling::Rotation::NEVER),
        _ => Err(LogError::InvalidRotation(s.to_owned())),
    }
}

fn parse_level(l: &str) -> Result<tracing::Level, LogError> {
    match l {
        "TRACE" => Ok(tracing::Level::TRACE),
        "DEBUG" => Ok(tracing::Level::DEBUG),
        "INFO" => Ok(tracing::Level::INFO),
        "WARN" => Ok(tracing::Level::WARN),
        "ERROR" => Ok(tracing::Level::ERROR),
        _ => Err(LogError::InvalidLevel(l.to_owned())),
    }
}
