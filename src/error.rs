//! 에러 타입 정의 모듈
//!
//! rdfconvert에서 발생할 수 있는 모든 에러 타입과 종료 코드 매핑을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// 정상 종료 코드
pub const EXIT_SUCCESS: u8 = 0;
/// 사용법 오류 종료 코드
pub const EXIT_USAGE: u8 = 1;
/// 변환 오류 종료 코드
pub const EXIT_CONVERSION: u8 = 2;

/// rdfconvert에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum ConvertError {
    /// 입력 경로가 존재하지 않음
    #[error("입력 경로를 찾을 수 없습니다: {path}")]
    InputNotFound { path: PathBuf },

    /// 입력 파일 확장자가 .rdfe가 아님
    #[error("지원하지 않는 파일 확장자입니다 (.{expected} 필요): {path}")]
    UnsupportedExtension { path: PathBuf, expected: &'static str },

    /// 유효하지 않은 패턴
    #[error("유효하지 않은 패턴: {pattern}")]
    InvalidPattern { pattern: String },

    /// 파일 열기 실패
    #[error("파일을 열 수 없습니다 ({file}): {reason}")]
    FileOpenError { file: PathBuf, reason: String },

    /// 입력 스트림 읽기 실패
    #[error("입력을 읽을 수 없습니다: {reason}")]
    ReadError { reason: String },

    /// JSON 파싱 또는 스키마 검증 실패
    #[error("스키마 오류: {reason}")]
    SchemaError { reason: String },

    /// XML 쓰기 실패
    #[error("파일 쓰기 실패: {reason}")]
    WriteError { reason: String },

    /// 스레드 풀 초기화 실패
    #[error("스레드 풀 초기화 실패: {reason}")]
    ThreadPoolError { reason: String },

    /// 특정 파일 변환 중 발생한 에러
    #[error("{file}: {source}")]
    InFile {
        file: PathBuf,
        #[source]
        source: Box<ConvertError>,
    },

    /// --keep-going 모드에서 일부 파일 변환 실패
    #[error("{total}개 중 {failed}개 파일 변환 실패")]
    BatchFailed { failed: usize, total: usize },
}

impl ConvertError {
    /// 에러에 파일 경로 정보 추가
    pub fn in_file(self, file: impl Into<PathBuf>) -> Self {
        match self {
            already @ ConvertError::InFile { .. } => already,
            other => ConvertError::InFile {
                file: file.into(),
                source: Box::new(other),
            },
        }
    }

    /// 경로 정보를 벗겨낸 원인 에러
    pub fn root_cause(&self) -> &ConvertError {
        match self {
            ConvertError::InFile { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// 잘못된 인자로 인한 에러인지 확인
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            ConvertError::InputNotFound { .. }
                | ConvertError::UnsupportedExtension { .. }
                | ConvertError::InvalidPattern { .. }
        )
    }

    /// 프로세스 종료 코드
    pub fn exit_code(&self) -> u8 {
        if self.is_usage_error() {
            EXIT_USAGE
        } else {
            EXIT_CONVERSION
        }
    }
}

/// rdfconvert 결과 타입 별칭
pub type Result<T> = std::result::Result<T, ConvertError>;
