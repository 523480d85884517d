//! rdfconvert - RDFE TO RDFX CONVERTER
//!
//! 다이내믹 폴더 JSON 내보내기 파일(.rdfe)을 XML(.rdfx)로 변환하는 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - 📥 **엄격한 로더**: 알 수 없는 필드와 8단계를 넘는 중첩을 거부 (주석과 후행 쉼표는 허용)
//! - 📤 **결정적 XML 출력**: 고정된 요소 순서, 4칸 들여쓰기, 여러 줄 값은 CDATA
//! - 📂 **폴더 모드**: 하위 폴더까지 모든 .rdfe 파일을 각각 변환
//! - 🔍 **패턴 필터링**: glob 형식의 파일 이름 필터링
//! - ⚡ **병렬 처리**: `--jobs`로 파일 단위 병렬 변환
//! - 🧪 **드라이런/검증 모드**: 출력 없이 대상 목록 확인 또는 스키마 검사
//!
//! # 예제
//!
//! ```bash
//! # 단일 파일
//! rdfconvert servers.rdfe
//!
//! # 폴더 전체, 실패 파일은 건너뛰기
//! rdfconvert ./exports --keep-going
//! ```

pub mod cli;
pub mod converter;
pub mod emitter;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
pub mod text;

// Re-exports for convenient access
pub use cli::Args;
pub use converter::{
    collect_input_files, convert_directory, convert_file, convert_files, output_path,
    BatchReport, ConvertOptions, ConvertOutcome, InputKind, INPUT_EXTENSION, OUTPUT_EXTENSION,
};
pub use emitter::{check_export, emit, emit_to_string};
pub use error::{ConvertError, Result};
pub use filter::InputFilter;
pub use loader::{load, load_slice, MAX_DEPTH};
pub use model::{CustomProperty, Export, ExportObject};
pub use stats::{format_bytes, Statistics};
