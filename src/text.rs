//! 문자열 처리 헬퍼 모듈
//!
//! 문자열 필드를 일반 텍스트로 쓸지 CDATA로 쓸지 결정합니다.

/// CDATA 섹션 종료 표식
const CDATA_END: &str = "]]>";

/// 문자열 필드의 XML 표현 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextForm<'a> {
    /// 값이 없거나 빈 문자열 (빈 요소)
    Empty,
    /// 줄바꿈 없는 값 (이스케이프된 텍스트)
    Plain(&'a str),
    /// 줄바꿈 포함 값 (CDATA 섹션)
    CData(&'a str),
}

impl<'a> TextForm<'a> {
    /// 선택적 문자열 값을 분류
    ///
    /// # Examples
    /// ```
    /// use rdfconvert::text::TextForm;
    ///
    /// assert_eq!(TextForm::of(None), TextForm::Empty);
    /// assert_eq!(TextForm::of(Some("a")), TextForm::Plain("a"));
    /// assert_eq!(TextForm::of(Some("a\nb")), TextForm::CData("a\nb"));
    /// ```
    pub fn of(value: Option<&'a str>) -> Self {
        match value {
            None | Some("") => TextForm::Empty,
            Some(v) if has_newline(v) => TextForm::CData(v),
            Some(v) => TextForm::Plain(v),
        }
    }
}

/// XML 1.0 `Char`에 속하지 않는 첫 번째 문자
///
/// `\t`, `\n`, `\r`을 제외한 C0 제어 문자와 U+FFFE, U+FFFF는 요소 내용(CDATA 포함)에 쓸 수 없습니다.
///
/// # Examples
/// ```
/// use rdfconvert::text::find_invalid_xml_char;
///
/// assert_eq!(find_invalid_xml_char("tab\there"), None);
/// assert_eq!(find_invalid_xml_char("a\u{1}b"), Some('\u{1}'));
/// ```
pub fn find_invalid_xml_char(value: &str) -> Option<char> {
    value.chars().find(|&c| !is_xml_char(c))
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..
    )
}

/// 줄바꿈 문자(`\n` 또는 `\r`) 포함 여부
pub fn has_newline(value: &str) -> bool {
    value.contains(['\n', '\r'])
}

/// CDATA 섹션에 넣을 조각으로 분할
///
/// 값에 `]]>`가 있으면 `]]`와 `>` 사이에서 나눕니다.
/// 조각을 이어 붙이면 원래 값과 바이트 단위로 같습니다.
pub fn cdata_chunks(value: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = value;

    while let Some(pos) = rest.find(CDATA_END) {
        let split = pos + 2;
        chunks.push(&rest[..split]);
        rest = &rest[split..];
    }
    chunks.push(rest);

    chunks
}
