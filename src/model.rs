//! 데이터 모델 모듈
//!
//! 다이내믹 폴더 내보내기 문서의 타입화된 트리입니다.
//! 필드 이름은 JSON 키와 XML 요소 이름에 그대로 사용됩니다.

use serde::{Deserialize, Deserializer};

/// 내보내기 문서 루트
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct Export {
    #[serde(default)]
    pub name: Option<String>,
    /// 원본 순서 그대로 출력됨
    #[serde(default, deserialize_with = "null_as_empty")]
    pub objects: Vec<ExportObject>,
}

/// 내보내기에 포함된 개별 오브젝트
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct ExportObject {
    #[serde(default, rename = "Type")]
    pub object_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub custom_properties: Vec<CustomProperty>,
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub script_interpreter: Option<String>,
    #[serde(default)]
    pub dynamic_credential_script: Option<String>,
    #[serde(default)]
    pub dynamic_credential_script_interpreter: Option<String>,
}

/// 오브젝트에 붙은 사용자 정의 속성
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct CustomProperty {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "Type")]
    pub property_type: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// `null` 배열을 빈 배열로 취급
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
