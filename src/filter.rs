//! 입력 파일 필터 모듈
//!
//! 폴더 모드에서 변환 대상을 고릅니다: .rdfe 확장자이면서 (지정된 경우) 파일 이름이 glob 패턴과 일치해야 합니다.

use glob::Pattern;
use std::path::Path;

use crate::converter::has_input_extension;
use crate::error::{ConvertError, Result};

/// 폴더 탐색 시 변환 대상 판별기
#[derive(Debug, Default)]
pub struct InputFilter {
    name_pattern: Option<Pattern>,
}

impl InputFilter {
    /// 파일 이름 패턴으로 필터 생성 (None이면 확장자만 검사)
    ///
    /// # Examples
    /// ```
    /// use rdfconvert::filter::InputFilter;
    /// use std::path::Path;
    ///
    /// let filter = InputFilter::new(Some("prod_*")).unwrap();
    /// assert!(filter.accepts(Path::new("exports/prod_servers.rdfe")));
    /// assert!(!filter.accepts(Path::new("exports/prod_servers.json")));
    /// assert!(!filter.accepts(Path::new("exports/test_servers.rdfe")));
    /// ```
    pub fn new(pattern: Option<&str>) -> Result<Self> {
        let name_pattern = pattern
            .map(|p| {
                Pattern::new(p).map_err(|e| ConvertError::InvalidPattern {
                    pattern: format!("{} ({})", p, e.msg),
                })
            })
            .transpose()?;

        Ok(Self { name_pattern })
    }

    /// 변환 대상 여부
    pub fn accepts(&self, path: &Path) -> bool {
        if !has_input_extension(path) {
            return false;
        }

        let Some(pattern) = &self.name_pattern else {
            return true;
        };

        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| pattern.matches(name))
    }
}
