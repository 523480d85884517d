//! XML 출력 모듈
//!
//! [`Export`] 트리를 고정된 전위 순서로 순회하며 XML 조각을 씁니다.
//! XML 선언 없이 4칸 들여쓰기를 사용하고, 줄바꿈이 포함된 값은 CDATA로 씁니다.

use std::fmt::Display;
use std::io::Write;

use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{ConvertError, Result};
use crate::model::{CustomProperty, Export, ExportObject};
use crate::text::{cdata_chunks, find_invalid_xml_char, TextForm};

/// 들여쓰기 칸 수
pub const INDENT_SIZE: usize = 4;

/// (요소 이름, 필드 접근자) 쌍
type Field<T> = (&'static str, fn(&T) -> Option<&str>);

const EXPORT_FIELDS: &[Field<Export>] = &[("Name", |e| e.name.as_deref())];

/// `CustomProperties` 앞에 오는 오브젝트 필드
const OBJECT_LEADING_FIELDS: &[Field<ExportObject>] = &[
    ("Type", |o| o.object_type.as_deref()),
    ("Name", |o| o.name.as_deref()),
    ("Description", |o| o.description.as_deref()),
    ("Notes", |o| o.notes.as_deref()),
];

/// `CustomProperties` 뒤에 오는 오브젝트 필드
const OBJECT_TRAILING_FIELDS: &[Field<ExportObject>] = &[
    ("ScriptInterpreter", |o| o.script_interpreter.as_deref()),
    ("Script", |o| o.script.as_deref()),
    ("DynamicCredentialScriptInterpreter", |o| {
        o.dynamic_credential_script_interpreter.as_deref()
    }),
    ("DynamicCredentialScript", |o| o.dynamic_credential_script.as_deref()),
];

const PROPERTY_FIELDS: &[Field<CustomProperty>] = &[
    ("Name", |p| p.name.as_deref()),
    ("Type", |p| p.property_type.as_deref()),
    ("Value", |p| p.value.as_deref()),
];

/// 내보내기 트리를 XML로 출력
///
/// 모든 이벤트를 쓴 뒤 스트림을 플러시합니다.
/// XML로 표현할 수 없는 문자가 있으면 아무것도 쓰지 않고 실패합니다.
/// 쓰기 도중 실패하면 이미 쓴 내용은 정리하지 않습니다.
pub fn emit<W: Write>(export: &Export, writer: W) -> Result<()> {
    check_export(export)?;

    let mut xml = Writer::new_with_indent(writer, b' ', INDENT_SIZE);

    start(&mut xml, "DynamicFolderExport")?;
    write_fields(&mut xml, export, EXPORT_FIELDS)?;

    start(&mut xml, "Objects")?;
    for object in &export.objects {
        write_object(&mut xml, object)?;
    }
    end(&mut xml, "Objects")?;

    end(&mut xml, "DynamicFolderExport")?;

    xml.into_inner().flush().map_err(write_error)
}

/// XML 문자열로 출력 (테스트 및 미리보기용)
pub fn emit_to_string(export: &Export) -> Result<String> {
    let mut buffer = Vec::new();
    emit(export, &mut buffer)?;
    String::from_utf8(buffer).map_err(write_error)
}

/// 모든 문자열 필드가 XML로 표현 가능한지 출력 순서대로 검사
///
/// 처음 발견한 문자와 요소 이름을 담은 [`ConvertError::WriteError`]를 반환합니다.
pub fn check_export(export: &Export) -> Result<()> {
    check_fields(export, EXPORT_FIELDS)?;
    for object in &export.objects {
        check_fields(object, OBJECT_LEADING_FIELDS)?;
        for property in &object.custom_properties {
            check_fields(property, PROPERTY_FIELDS)?;
        }
        check_fields(object, OBJECT_TRAILING_FIELDS)?;
    }
    Ok(())
}

fn check_fields<T>(entity: &T, fields: &[Field<T>]) -> Result<()> {
    for (name, accessor) in fields {
        if let Some(c) = accessor(entity).and_then(find_invalid_xml_char) {
            return Err(ConvertError::WriteError {
                reason: format!(
                    "<{}> 요소 값에 XML로 표현할 수 없는 문자 U+{:04X}가 있습니다",
                    name, c as u32
                ),
            });
        }
    }
    Ok(())
}

fn write_object<W: Write>(xml: &mut Writer<W>, object: &ExportObject) -> Result<()> {
    start(xml, "DynamicFolderExportObject")?;
    write_fields(xml, object, OBJECT_LEADING_FIELDS)?;

    start(xml, "CustomProperties")?;
    for property in &object.custom_properties {
        start(xml, "CustomProperty")?;
        write_fields(xml, property, PROPERTY_FIELDS)?;
        end(xml, "CustomProperty")?;
    }
    end(xml, "CustomProperties")?;

    write_fields(xml, object, OBJECT_TRAILING_FIELDS)?;
    end(xml, "DynamicFolderExportObject")
}

fn write_fields<W: Write, T>(xml: &mut Writer<W>, entity: &T, fields: &[Field<T>]) -> Result<()> {
    for (name, accessor) in fields {
        write_string_element(xml, name, accessor(entity))?;
    }
    Ok(())
}

/// 선택적 문자열 필드를 요소 하나로 출력
fn write_string_element<W: Write>(
    xml: &mut Writer<W>,
    name: &str,
    value: Option<&str>,
) -> Result<()> {
    match TextForm::of(value) {
        TextForm::Empty => write_event(xml, Event::Empty(BytesStart::new(name))),
        TextForm::Plain(text) => {
            start(xml, name)?;
            write_event(xml, Event::Text(BytesText::new(text)))?;
            end(xml, name)
        }
        TextForm::CData(text) => {
            start(xml, name)?;
            for chunk in cdata_chunks(text) {
                write_event(xml, Event::CData(BytesCData::new(chunk)))?;
            }
            end(xml, name)
        }
    }
}

fn start<W: Write>(xml: &mut Writer<W>, name: &str) -> Result<()> {
    write_event(xml, Event::Start(BytesStart::new(name)))
}

fn end<W: Write>(xml: &mut Writer<W>, name: &str) -> Result<()> {
    write_event(xml, Event::End(BytesEnd::new(name)))
}

fn write_event<W: Write>(xml: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    xml.write_event(event).map_err(write_error)
}

fn write_error(e: impl Display) -> ConvertError {
    ConvertError::WriteError {
        reason: e.to_string(),
    }
}
