//! 입력 로더 모듈
//!
//! JSON 문서를 읽어 [`Export`] 트리를 만듭니다.
//! 문법은 관대하게(주석, 후행 쉼표 허용), 스키마는 엄격하게(알 수 없는 필드, 깊이 제한) 처리합니다.

use std::io::Read;

use crate::error::{ConvertError, Result};
use crate::model::Export;

/// 허용되는 최대 중첩 깊이 (루트 객체가 1단계)
pub const MAX_DEPTH: usize = 8;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 바이트 스트림에서 내보내기 문서 로드
///
/// 스트림을 끝까지 읽은 뒤 [`load_slice`]로 처리합니다.
pub fn load<R: Read>(mut reader: R) -> Result<Export> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| ConvertError::ReadError {
            reason: e.to_string(),
        })?;
    load_slice(&bytes)
}

/// 메모리에 올라온 바이트에서 내보내기 문서 로드
pub fn load_slice(bytes: &[u8]) -> Result<Export> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = std::str::from_utf8(bytes).map_err(|e| ConvertError::SchemaError {
        reason: format!("UTF-8 인코딩이 아닙니다: {}", e),
    })?;

    let normalized = normalize(text)?;

    serde_json::from_str(&normalized).map_err(|e| ConvertError::SchemaError {
        reason: e.to_string(),
    })
}

/// 주석과 후행 쉼표를 공백으로 바꾸고 중첩 깊이를 검사
///
/// 값이나 멤버 뒤에 오는 쉼표만 후행 쉼표로 봅니다 (`[,]`, `{,}`는 그대로 둬서 파싱 실패).
/// 위치 정보가 유지되도록 길이와 줄 구성은 그대로 둡니다.
fn normalize(text: &str) -> Result<String> {
    let src = text.as_bytes();
    let mut out = src.to_vec();
    let mut depth = 0usize;
    let mut pending_comma: Option<usize> = None;
    // 직전 유효 토큰이 값의 끝인지 (문자열, 리터럴, 닫는 괄호)
    let mut after_value = false;
    let mut i = 0;

    while i < src.len() {
        match src[i] {
            b'"' => {
                pending_comma = None;
                after_value = true;
                i = skip_string(src, i)?;
                continue;
            }
            b'/' if src.get(i + 1) == Some(&b'/') => {
                let end = src[i..]
                    .iter()
                    .position(|&b| b == b'\n')
                    .map_or(src.len(), |p| i + p);
                blank(&mut out, i, end);
                i = end;
                continue;
            }
            b'/' if src.get(i + 1) == Some(&b'*') => {
                let end = src[i + 2..]
                    .windows(2)
                    .position(|w| w == b"*/")
                    .map(|p| i + 2 + p + 2)
                    .ok_or_else(|| ConvertError::SchemaError {
                        reason: format!("닫히지 않은 블록 주석 (위치 {})", i),
                    })?;
                blank(&mut out, i, end);
                i = end;
                continue;
            }
            b'{' | b'[' => {
                pending_comma = None;
                after_value = false;
                depth += 1;
                if depth > MAX_DEPTH {
                    return Err(ConvertError::SchemaError {
                        reason: format!(
                            "중첩 깊이가 최대값 {}을 초과합니다 (위치 {})",
                            MAX_DEPTH, i
                        ),
                    });
                }
            }
            b'}' | b']' => {
                if let Some(comma) = pending_comma.take() {
                    out[comma] = b' ';
                }
                depth = depth.saturating_sub(1);
                after_value = true;
            }
            b',' => {
                pending_comma = if after_value { Some(i) } else { None };
                after_value = false;
            }
            b':' => {
                pending_comma = None;
                after_value = false;
            }
            b if b.is_ascii_whitespace() => {}
            _ => {
                pending_comma = None;
                after_value = true;
            }
        }
        i += 1;
    }

    // 공백과 ASCII 구분자만 바꿨으므로 UTF-8이 유지됨
    String::from_utf8(out).map_err(|e| ConvertError::SchemaError {
        reason: e.to_string(),
    })
}

/// 문자열 리터럴 끝 다음 위치 반환 (`start`는 여는 따옴표)
fn skip_string(src: &[u8], start: usize) -> Result<usize> {
    let mut i = start + 1;
    while i < src.len() {
        match src[i] {
            b'\\' => i += 2,
            b'"' => return Ok(i + 1),
            _ => i += 1,
        }
    }
    Err(ConvertError::SchemaError {
        reason: format!("닫히지 않은 문자열 (위치 {})", start),
    })
}

/// 주석 영역을 공백으로 치환 (줄바꿈은 유지)
fn blank(out: &mut [u8], start: usize, end: usize) {
    for b in &mut out[start..end] {
        if *b != b'\n' && *b != b'\r' {
            *b = b' ';
        }
    }
}
