//! 파일 변환 모듈
//!
//! 단일 파일 변환(로드 후 출력)과 폴더 단위 일괄 변환을 담당합니다.

use memmap2::Mmap;
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::emitter::{check_export, emit};
use crate::error::{ConvertError, Result};
use crate::filter::InputFilter;
use crate::loader::{load, load_slice};
use crate::model::Export;

/// 입력 파일 확장자 (JSON 내보내기)
pub const INPUT_EXTENSION: &str = "rdfe";
/// 출력 파일 확장자 (XML 내보내기)
pub const OUTPUT_EXTENSION: &str = "rdfx";

/// 입력 경로 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    File,
    Directory,
}

/// 변환 옵션
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// 폴더 모드 작업 스레드 수 (1 이하이면 순차 처리)
    pub jobs: usize,
    /// 실패한 파일이 있어도 나머지 파일 계속 처리
    pub keep_going: bool,
    /// 로드(검증)만 수행하고 출력 파일은 쓰지 않음
    pub validate_only: bool,
    /// 최대 폴더 탐색 깊이
    pub max_depth: Option<usize>,
    /// 대용량 파일 임계값 (이상이면 메모리 매핑 사용)
    pub mmap_threshold: u64,
}

impl ConvertOptions {
    /// 기본 옵션 생성
    pub fn new() -> Self {
        Self {
            jobs: 1,
            keep_going: false,
            validate_only: false,
            max_depth: None,
            mmap_threshold: 10 * 1024 * 1024, // 10MB
        }
    }

    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs.unwrap_or(1).max(1);
        self
    }

    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    pub fn with_validate_only(mut self, validate_only: bool) -> Self {
        self.validate_only = validate_only;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// 파일 하나의 처리 결과
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOutcome {
    /// 입력 파일 경로
    pub input: PathBuf,
    /// 생성된 출력 파일 경로 (검증 모드에서는 None)
    pub output: Option<PathBuf>,
    /// 입력 파일 크기
    pub bytes_read: u64,
    /// 출력 파일 크기
    pub bytes_written: u64,
}

/// 폴더 일괄 처리 결과
#[derive(Debug, Default)]
pub struct BatchReport {
    /// 성공한 파일 (입력 순서)
    pub converted: Vec<ConvertOutcome>,
    /// 실패한 파일과 원인 (`keep_going`일 때만 채워짐)
    pub failures: Vec<(PathBuf, ConvertError)>,
}

impl BatchReport {
    /// 처리한 전체 파일 수
    pub fn total(&self) -> usize {
        self.converted.len() + self.failures.len()
    }

    /// 실패가 있으면 `BatchFailed` 에러로 변환
    pub fn ensure_success(&self) -> Result<()> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(ConvertError::BatchFailed {
                failed: self.failures.len(),
                total: self.total(),
            })
        }
    }
}

/// 확장자가 .rdfe인지 확인 (대소문자 무시)
pub fn has_input_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case(INPUT_EXTENSION))
        .unwrap_or(false)
}

/// 입력 파일과 같은 위치, 같은 이름의 .rdfx 경로
///
/// # Examples
/// ```
/// use rdfconvert::converter::output_path;
/// use std::path::Path;
///
/// assert_eq!(output_path(Path::new("dir/servers.rdfe")), Path::new("dir/servers.rdfx"));
/// ```
pub fn output_path(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}

/// 입력 경로 확인 및 분류
pub fn classify_input(path: &Path) -> Result<InputKind> {
    if !path.exists() {
        return Err(ConvertError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    if path.is_dir() {
        return Ok(InputKind::Directory);
    }

    if !has_input_extension(path) {
        return Err(ConvertError::UnsupportedExtension {
            path: path.to_path_buf(),
            expected: INPUT_EXTENSION,
        });
    }

    Ok(InputKind::File)
}

/// 입력 파일을 읽어 내보내기 트리 생성
///
/// 대용량 파일은 메모리 매핑, 그 외에는 버퍼 리더를 사용합니다.
pub fn read_export(path: &Path, options: &ConvertOptions) -> Result<(Export, u64)> {
    let file = File::open(path).map_err(|e| ConvertError::FileOpenError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let file_size = file.metadata().map(|m| m.len()).unwrap_or(0);

    let export = if file_size > 0 && file_size >= options.mmap_threshold {
        let mmap = unsafe {
            Mmap::map(&file).map_err(|e| ConvertError::FileOpenError {
                file: path.to_path_buf(),
                reason: format!("메모리 매핑 실패: {}", e),
            })?
        };
        load_slice(&mmap)?
    } else {
        load(BufReader::new(file))?
    };

    Ok((export, file_size))
}

/// 단일 파일 변환
///
/// 로드가 성공한 뒤에만 출력 파일을 생성합니다.
/// 출력 도중 실패하면 일부만 쓰인 파일이 남을 수 있습니다.
pub fn convert_file(input: &Path, options: &ConvertOptions) -> Result<ConvertOutcome> {
    let (export, bytes_read) = read_export(input, options)?;
    check_export(&export)?;

    let output = output_path(input);
    let file = File::create(&output).map_err(|e| ConvertError::WriteError {
        reason: format!("{}: {}", output.display(), e),
    })?;
    emit(&export, BufWriter::new(file))?;

    let bytes_written = fs::metadata(&output).map(|m| m.len()).unwrap_or(0);

    Ok(ConvertOutcome {
        input: input.to_path_buf(),
        output: Some(output),
        bytes_read,
        bytes_written,
    })
}

/// 단일 파일 유효성 검사 (출력 없음)
pub fn validate_file(input: &Path, options: &ConvertOptions) -> Result<ConvertOutcome> {
    let (export, bytes_read) = read_export(input, options)?;
    check_export(&export)?;

    Ok(ConvertOutcome {
        input: input.to_path_buf(),
        output: None,
        bytes_read,
        bytes_written: 0,
    })
}

/// 옵션에 따라 변환 또는 검증 수행
pub fn process_file(input: &Path, options: &ConvertOptions) -> Result<ConvertOutcome> {
    if options.validate_only {
        validate_file(input, options)
    } else {
        convert_file(input, options)
    }
}

/// 폴더에서 필터를 통과한 파일을 재귀적으로 수집 (이름순)
pub fn collect_input_files(
    root: &Path,
    max_depth: Option<usize>,
    input_filter: &InputFilter,
) -> Vec<PathBuf> {
    let walker = match max_depth {
        Some(depth) => WalkDir::new(root).max_depth(depth),
        None => WalkDir::new(root),
    };

    walker
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && input_filter.accepts(e.path()))
        .map(|e| e.into_path())
        .collect()
}

/// 여러 파일을 각각 독립적으로 처리
///
/// `keep_going`이 아니면 첫 실패에서 중단하고 그 에러를 반환합니다.
/// `on_done`은 파일 하나가 끝날 때마다 호출됩니다 (병렬 모드에서는 임의 스레드).
pub fn convert_files<F>(
    files: &[PathBuf],
    options: &ConvertOptions,
    on_done: F,
) -> Result<BatchReport>
where
    F: Fn(&Path, &Result<ConvertOutcome>) + Sync,
{
    let run_one = |path: &PathBuf| -> Result<ConvertOutcome> {
        let result = process_file(path, options).map_err(|e| e.in_file(path));
        on_done(path, &result);
        result
    };

    let pool = if options.jobs > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.jobs)
            .build()
            .map_err(|e| ConvertError::ThreadPoolError {
                reason: e.to_string(),
            })?;
        Some(pool)
    } else {
        None
    };

    if !options.keep_going {
        let converted = match &pool {
            Some(pool) => {
                pool.install(|| files.par_iter().map(&run_one).collect::<Result<Vec<_>>>())?
            }
            None => files.iter().map(&run_one).collect::<Result<Vec<_>>>()?,
        };
        return Ok(BatchReport {
            converted,
            failures: Vec::new(),
        });
    }

    let results: Vec<Result<ConvertOutcome>> = match &pool {
        Some(pool) => pool.install(|| files.par_iter().map(&run_one).collect()),
        None => files.iter().map(&run_one).collect(),
    };

    let mut report = BatchReport::default();
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(outcome) => report.converted.push(outcome),
            Err(e) => report.failures.push((path.clone(), e)),
        }
    }

    Ok(report)
}

/// 폴더 전체 변환 (수집 후 [`convert_files`])
pub fn convert_directory(
    root: &Path,
    options: &ConvertOptions,
    input_filter: &InputFilter,
) -> Result<BatchReport> {
    let files = collect_input_files(root, options.max_depth, input_filter);
    convert_files(&files, options, |_, _| {})
}
