//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::Parser;
use std::path::PathBuf;

use crate::converter::ConvertOptions;

/// rdfconvert CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "rdfconvert",
    author = "YourName <your@email.com>",
    version,
    about = "RDFE TO RDFX CONVERTER - 다이내믹 폴더 JSON 내보내기 파일을 XML로 변환하는 CLI 도구",
    long_about = r#"
RDFE TO RDFX CONVERTER
======================

다이내믹 폴더 내보내기 파일(.rdfe, JSON)을
같은 이름의 XML 파일(.rdfx)로 변환합니다.

폴더를 지정하면 하위 폴더까지 모든 .rdfe 파일을 찾아
각 파일 옆에 .rdfx 파일을 생성합니다.

종료 코드:
  0  성공
  1  사용법 오류 (인자 누락, 경로 없음, 확장자 불일치)
  2  변환 오류

예제:
  rdfconvert servers.rdfe
  rdfconvert ./exports
  rdfconvert ./exports --keep-going --log errors.log
  rdfconvert ./exports --pattern "prod_*" -j 4
  rdfconvert ./exports --validate-only
"#
)]
pub struct Args {
    /// 변환할 .rdfe 파일 또는 폴더 경로
    pub path: PathBuf,

    /// 파일 이름 패턴 필터 (glob 형식, 폴더 모드 전용)
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,

    /// 실제 변환 없이 처리될 파일 목록만 표시
    #[arg(long)]
    pub dry_run: bool,

    /// 유효성 검사만 수행 (출력 파일 없음)
    #[arg(long)]
    pub validate_only: bool,

    /// 실패한 파일이 있어도 나머지 파일 계속 변환
    #[arg(short, long)]
    pub keep_going: bool,

    /// 폴더 모드 병렬 작업 수 (기본값: 1, 순차 처리)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// 최대 폴더 탐색 깊이
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// 에러 로그 파일 경로
    #[arg(long)]
    pub log: Option<PathBuf>,
}

impl Args {
    /// 인자에서 변환 옵션 생성
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions::new()
            .with_jobs(self.jobs)
            .with_keep_going(self.keep_going)
            .with_validate_only(self.validate_only)
            .with_max_depth(self.max_depth)
    }
}
