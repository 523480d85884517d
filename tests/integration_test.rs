//! 통합 테스트 모듈
//!
//! rdfconvert의 로드, 출력, 폴더 변환 전체 흐름을 테스트합니다.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const EXAMPLE_INPUT: &str = r#"{"Name":"Folder1","Objects":[{"Type":"Job","Name":"N1","CustomProperties":[{"Name":"P1","Type":"string","Value":"line1\nline2"}]}]}"#;

/// 테스트용 입력 파일 생성 헬퍼
fn create_input_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// 요소 `name`의 첫 번째 내용 추출 (`<name>...</name>`)
fn element_content<'a>(xml: &'a str, name: &str) -> Option<&'a str> {
    let open = format!("<{}>", name);
    let close = format!("</{}>", name);
    let start = xml.find(&open)? + open.len();
    let end = start + xml[start..].find(&close)?;
    Some(&xml[start..end])
}

/// 유효한 파일 3개와 무관한 파일이 있는 폴더
fn setup_export_directory() -> TempDir {
    let temp_dir = TempDir::new().unwrap();

    create_input_file(temp_dir.path(), "alpha.rdfe", r#"{"Name": "Alpha"}"#);
    create_input_file(temp_dir.path(), "beta.rdfe", EXAMPLE_INPUT);

    let nested = temp_dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    create_input_file(&nested, "gamma.RDFE", r#"{"Objects": [{"Name": "G"}]}"#);

    create_input_file(temp_dir.path(), "notes.json", r#"{"Name": "ignored"}"#);

    temp_dir
}

/// 중간 파일이 잘못된 폴더 (이름순: a, b(잘못됨), c)
fn setup_mixed_directory() -> TempDir {
    let temp_dir = TempDir::new().unwrap();

    create_input_file(temp_dir.path(), "a.rdfe", r#"{"Name": "A"}"#);
    create_input_file(temp_dir.path(), "b.rdfe", r#"{"Name": "B", "Extra": true}"#);
    create_input_file(temp_dir.path(), "c.rdfe", r#"{"Name": "C"}"#);

    temp_dir
}

mod emit_tests {
    use super::*;
    use rdfconvert::{emit_to_string, load_slice};

    #[test]
    fn test_end_to_end_example() {
        let export = load_slice(EXAMPLE_INPUT.as_bytes()).unwrap();
        let xml = emit_to_string(&export).unwrap();

        let objects = element_content(&xml, "Objects").unwrap();
        assert_eq!(objects.matches("<DynamicFolderExportObject>").count(), 1);

        let object = element_content(objects, "DynamicFolderExportObject").unwrap();
        assert_eq!(element_content(object, "Name"), Some("N1"));
        assert!(object.contains("<Description/>"));
        assert!(object.contains("<Notes/>"));

        let properties = element_content(object, "CustomProperties").unwrap();
        assert_eq!(properties.matches("<CustomProperty>").count(), 1);
        assert_eq!(
            element_content(properties, "Value"),
            Some("<![CDATA[line1\nline2]]>")
        );
    }

    #[test]
    fn test_escaped_control_chars_cannot_be_emitted() {
        use rdfconvert::ConvertError;

        let plain = load_slice(br#"{"Name": "a\u0001b"}"#).unwrap();
        assert!(matches!(
            emit_to_string(&plain),
            Err(ConvertError::WriteError { reason }) if reason.contains("<Name>")
        ));

        let cdata = load_slice(br#"{"Objects": [{"Script": "x\n\u0000y"}]}"#).unwrap();
        assert!(matches!(
            emit_to_string(&cdata),
            Err(ConvertError::WriteError { reason }) if reason.contains("<Script>")
        ));
    }

    #[test]
    fn test_sequence_lengths_and_order() {
        let input = r#"{
            "Objects": [
                {"Name": "o1", "CustomProperties": [{"Name": "p1"}, {"Name": "p2"}, {"Name": "p3"}]},
                {"Name": "o2"},
                {"Name": "o3", "CustomProperties": []}
            ]
        }"#;
        let xml = emit_to_string(&load_slice(input.as_bytes()).unwrap()).unwrap();

        assert_eq!(xml.matches("<DynamicFolderExportObject>").count(), 3);
        assert_eq!(xml.matches("<CustomProperty>").count(), 3);

        let positions: Vec<usize> = ["o1", "p1", "p2", "p3", "o2", "o3"]
            .iter()
            .map(|n| xml.find(&format!("<Name>{}</Name>", n)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_element_order_within_object() {
        let input = r#"{"Objects": [{
            "DynamicCredentialScript": "dcs",
            "Script": "s",
            "Notes": "n",
            "Type": "t",
            "DynamicCredentialScriptInterpreter": "dcsi",
            "Description": "d",
            "ScriptInterpreter": "si",
            "Name": "nm"
        }]}"#;
        let xml = emit_to_string(&load_slice(input.as_bytes()).unwrap()).unwrap();

        let order = [
            "<Type>t</Type>",
            "<Name>nm</Name>",
            "<Description>d</Description>",
            "<Notes>n</Notes>",
            "<CustomProperties>",
            "<ScriptInterpreter>si</ScriptInterpreter>",
            "<Script>s</Script>",
            "<DynamicCredentialScriptInterpreter>dcsi</DynamicCredentialScriptInterpreter>",
            "<DynamicCredentialScript>dcs</DynamicCredentialScript>",
        ];
        let positions: Vec<usize> = order.iter().map(|tag| xml.find(tag).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_multiline_script_is_byte_exact() {
        let script = "#!/bin/bash\r\necho \"<hosts> & more\"\n\tindent\n";
        let input = serde_json::json!({ "Objects": [{ "Script": script }] }).to_string();
        let xml = emit_to_string(&load_slice(input.as_bytes()).unwrap()).unwrap();

        let content = element_content(&xml, "Script").unwrap();
        assert_eq!(content, format!("<![CDATA[{}]]>", script));
    }

    #[test]
    fn test_absent_and_empty_values_are_empty_elements() {
        let input = r#"{"Name": "", "Objects": [{"Notes": null}]}"#;
        let xml = emit_to_string(&load_slice(input.as_bytes()).unwrap()).unwrap();

        assert!(xml.contains("    <Name/>"));
        assert!(xml.contains("<Notes/>"));
        assert!(!xml.contains("CDATA"));
    }
}

mod loader_tests {
    use rdfconvert::{load_slice, ConvertError};

    #[test]
    fn test_unknown_nested_field_rejected() {
        let input = r#"{"Objects": [{"CustomProperties": [{"Name": "a", "Hidden": "x"}]}]}"#;
        assert!(matches!(
            load_slice(input.as_bytes()),
            Err(ConvertError::SchemaError { .. })
        ));
    }

    #[test]
    fn test_nine_levels_rejected() {
        let input = r#"{"Objects":[{"CustomProperties":[[[[[[]]]]]]}]}"#;
        assert!(matches!(
            load_slice(input.as_bytes()),
            Err(ConvertError::SchemaError { .. })
        ));
    }

    #[test]
    fn test_non_string_value_rejected() {
        assert!(matches!(
            load_slice(br#"{"Name": 42}"#),
            Err(ConvertError::SchemaError { .. })
        ));
    }
}

mod converter_tests {
    use super::*;
    use rdfconvert::{
        collect_input_files, convert_directory, convert_file, convert_files, output_path,
        ConvertError, ConvertOptions, InputFilter,
    };

    #[test]
    fn test_convert_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = create_input_file(temp_dir.path(), "folder.rdfe", EXAMPLE_INPUT);

        let outcome = convert_file(&input, &ConvertOptions::new()).unwrap();

        let output = temp_dir.path().join("folder.rdfx");
        assert_eq!(outcome.output.as_deref(), Some(output.as_path()));
        let xml = fs::read_to_string(&output).unwrap();
        assert!(xml.starts_with("<DynamicFolderExport>"));
        assert_eq!(outcome.bytes_written, xml.len() as u64);
    }

    #[test]
    fn test_convert_directory_three_files() {
        let temp_dir = setup_export_directory();

        let report = convert_directory(
            temp_dir.path(),
            &ConvertOptions::new(),
            &InputFilter::default(),
        )
        .unwrap();

        assert_eq!(report.converted.len(), 3);
        assert!(report.failures.is_empty());
        for outcome in &report.converted {
            let output = output_path(&outcome.input);
            assert!(output.exists(), "missing {:?}", output);
            let xml = fs::read_to_string(&output).unwrap();
            assert!(xml.ends_with("</DynamicFolderExport>"));
        }
        assert!(temp_dir.path().join("nested").join("gamma.rdfx").exists());
        assert!(!temp_dir.path().join("notes.rdfx").exists());
    }

    #[test]
    fn test_directory_aborts_on_first_failure() {
        let temp_dir = setup_mixed_directory();

        let result = convert_directory(
            temp_dir.path(),
            &ConvertOptions::new(),
            &InputFilter::default(),
        );

        match result {
            Err(ConvertError::InFile { file, source }) => {
                assert!(file.ends_with("b.rdfe"));
                assert!(matches!(*source, ConvertError::SchemaError { .. }));
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(temp_dir.path().join("a.rdfx").exists());
        assert!(!temp_dir.path().join("b.rdfx").exists());
        assert!(!temp_dir.path().join("c.rdfx").exists());
    }

    #[test]
    fn test_directory_keep_going_isolates_failures() {
        let temp_dir = setup_mixed_directory();
        let options = ConvertOptions::new().with_keep_going(true);

        let report =
            convert_directory(temp_dir.path(), &options, &InputFilter::default()).unwrap();

        assert_eq!(report.converted.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].0.ends_with("b.rdfe"));
        assert!(temp_dir.path().join("a.rdfx").exists());
        assert!(temp_dir.path().join("c.rdfx").exists());
        assert!(matches!(
            report.ensure_success(),
            Err(ConvertError::BatchFailed { failed: 1, total: 3 })
        ));
    }

    #[test]
    fn test_parallel_jobs_convert_every_file() {
        let temp_dir = TempDir::new().unwrap();
        for i in 0..6 {
            create_input_file(
                temp_dir.path(),
                &format!("export{}.rdfe", i),
                &format!(r#"{{"Name": "E{}"}}"#, i),
            );
        }
        let files = collect_input_files(temp_dir.path(), None, &InputFilter::default());
        let options = ConvertOptions::new().with_jobs(Some(4));

        let report = convert_files(&files, &options, |_, _| {}).unwrap();

        assert_eq!(report.converted.len(), 6);
        let inputs: Vec<_> = report.converted.iter().map(|o| o.input.clone()).collect();
        assert_eq!(inputs, files);
        for i in 0..6 {
            let xml =
                fs::read_to_string(temp_dir.path().join(format!("export{}.rdfx", i))).unwrap();
            assert!(xml.contains(&format!("<Name>E{}</Name>", i)));
        }
    }

    #[test]
    fn test_progress_callback_sees_every_file() {
        let temp_dir = setup_mixed_directory();
        let files = collect_input_files(temp_dir.path(), None, &InputFilter::default());
        let options = ConvertOptions::new().with_keep_going(true);
        let seen = std::sync::Mutex::new(Vec::new());

        convert_files(&files, &options, |path, result| {
            seen.lock().unwrap().push((path.to_path_buf(), result.is_ok()));
        })
        .unwrap();

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen.iter().filter(|(_, ok)| !ok).count(), 1);
    }

    #[test]
    fn test_validate_only_writes_nothing() {
        let temp_dir = setup_export_directory();
        let options = ConvertOptions::new().with_validate_only(true);

        let report =
            convert_directory(temp_dir.path(), &options, &InputFilter::default()).unwrap();

        assert_eq!(report.converted.len(), 3);
        assert!(report.converted.iter().all(|o| o.output.is_none()));
        assert!(!temp_dir.path().join("alpha.rdfx").exists());
    }

    #[test]
    fn test_collect_with_pattern_and_depth() {
        let temp_dir = setup_export_directory();

        let matcher = InputFilter::new(Some("b*")).unwrap();
        let files = collect_input_files(temp_dir.path(), None, &matcher);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("beta.rdfe"));

        let shallow = collect_input_files(temp_dir.path(), Some(1), &InputFilter::default());
        assert_eq!(shallow.len(), 2);
    }
}

mod error_tests {
    use rdfconvert::ConvertError;
    use std::path::PathBuf;

    #[test]
    fn test_error_display() {
        let error = ConvertError::InputNotFound {
            path: PathBuf::from("/nonexistent"),
        };
        assert!(error.to_string().contains("입력 경로를 찾을 수 없습니다"));
        assert!(error.is_usage_error());
    }

    #[test]
    fn test_schema_error_in_file_display() {
        let error = ConvertError::SchemaError {
            reason: "unknown field `Extra`".to_string(),
        }
        .in_file("b.rdfe");

        let msg = error.to_string();
        assert!(msg.contains("b.rdfe"));
        assert!(msg.contains("스키마 오류"));
        assert_eq!(error.exit_code(), 2);
    }
}
