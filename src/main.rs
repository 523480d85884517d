//! rdfconvert - RDFE TO RDFX CONVERTER
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rdfconvert::{
    cli::Args,
    converter::{
        classify_input, collect_input_files, convert_files, output_path, process_file, InputKind,
        INPUT_EXTENSION,
    },
    error::{ConvertError, EXIT_CONVERSION, EXIT_USAGE},
    filter::InputFilter,
    stats::{format_bytes, Statistics},
};

fn main() -> ExitCode {
    // clap 기본 종료 코드(2) 대신 사용법 오류는 1로 종료
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(EXIT_USAGE),
            };
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(report_error(&err)),
    }
}

fn run(args: &Args) -> Result<()> {
    let kind = classify_input(&args.path)?;
    let input_filter = InputFilter::new(args.pattern.as_deref())?;

    print_header(args, kind);

    match kind {
        InputKind::File => run_single_file(args),
        InputKind::Directory => run_directory(args, &input_filter),
    }
}

/// 에러 출력 후 종료 코드 반환
fn report_error(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ConvertError>() {
        Some(e) if e.is_usage_error() => {
            eprintln!("{} {}", "error:".bright_red().bold(), e);
            eprintln!("       {}", usage_hint(e));
            eprintln!("\n{}", Args::command().render_usage());
            EXIT_USAGE
        }
        Some(e) => {
            eprintln!("\n{} {}", "❌ 변환 실패:".bright_red(), e);
            EXIT_CONVERSION
        }
        None => {
            eprintln!("\n{} {:#}", "❌ 오류:".bright_red(), err);
            EXIT_CONVERSION
        }
    }
}

/// 사용법 오류에 대한 안내 문구
fn usage_hint(e: &ConvertError) -> String {
    match e {
        ConvertError::UnsupportedExtension { .. } => format!(
            ".{} 파일 또는 .{} 파일이 들어 있는 폴더를 지정하세요.",
            INPUT_EXTENSION, INPUT_EXTENSION
        ),
        ConvertError::InvalidPattern { .. } => {
            "glob 패턴 형식을 확인하세요 (예: \"prod_*\").".to_string()
        }
        _ => "경로가 올바른지 확인하세요.".to_string(),
    }
}

/// 헤더 출력
fn print_header(args: &Args, kind: InputKind) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!("{}", " 🚀 RDFE TO RDFX CONVERTER".bright_white().bold());
    println!("{}", "═".repeat(50).bright_blue());

    match kind {
        InputKind::File => println!("  {} 입력 파일: {:?}", "📄".bright_cyan(), args.path),
        InputKind::Directory => println!("  {} 입력 폴더: {:?}", "📂".bright_cyan(), args.path),
    }

    if let Some(ref pattern) = args.pattern {
        println!("  {} 패턴 필터: {}", "🔍".bright_magenta(), pattern);
    }

    if let Some(depth) = args.max_depth {
        println!("  {} 최대 깊이: {}", "📏".bright_white(), depth);
    }

    if let Some(jobs) = args.jobs {
        println!("  {} 병렬 작업: {}", "⚡".bright_yellow(), jobs);
    }

    if args.keep_going {
        println!(
            "  {} {}",
            "⚙️".bright_yellow(),
            "실패 파일 건너뛰기 모드".yellow()
        );
    }

    if args.dry_run {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 변환 없음)".yellow()
        );
    }

    if args.validate_only {
        println!("  {} {}", "🔍".bright_cyan(), "유효성 검사 모드".cyan());
    }

    println!("{}", "═".repeat(50).bright_blue());
}

/// 단일 파일 변환
fn run_single_file(args: &Args) -> Result<()> {
    if args.dry_run {
        print_dry_run(std::slice::from_ref(&args.path), args.validate_only);
        return Ok(());
    }

    let options = args.convert_options();
    let outcome = match process_file(&args.path, &options) {
        Ok(outcome) => outcome,
        Err(e) => {
            let e = e.in_file(&args.path);
            if let Some(ref log_path) = args.log {
                write_error_log(log_path, &[(args.path.clone(), e.root_cause().to_string())])?;
            }
            return Err(e.into());
        }
    };

    match outcome.output {
        Some(ref output) => println!(
            "\n{} 저장 완료: {:?} ({})\n",
            "✅".bright_green(),
            output,
            format_bytes(outcome.bytes_written)
        ),
        None => println!(
            "\n{} 유효한 파일입니다: {:?}\n",
            "✅".bright_green(),
            outcome.input
        ),
    }

    Ok(())
}

/// 폴더 변환
fn run_directory(args: &Args, input_filter: &InputFilter) -> Result<()> {
    println!("\n{}", "📁 파일 검색 중...".bright_cyan());

    let files = collect_input_files(&args.path, args.max_depth, input_filter);

    if files.is_empty() {
        println!(
            "{}",
            format!("⚠️ 처리할 .{} 파일이 없습니다.", INPUT_EXTENSION).yellow()
        );
        return Ok(());
    }

    println!(
        "  {} 발견된 파일 수: {}",
        "📋".bright_white(),
        files.len().to_string().bright_green()
    );

    if args.dry_run {
        print_dry_run(&files, args.validate_only);
        return Ok(());
    }

    let options = args.convert_options();
    let stats = Statistics::new(files.len());
    let pb = create_progress_bar(files.len());

    let phase = if args.validate_only {
        "🔍 유효성 검사 중..."
    } else {
        "⚡ 변환 중..."
    };
    println!("\n{}", phase.bright_cyan());

    let result = convert_files(&files, &options, |path, result| {
        pb.inc(1);
        match result {
            Ok(outcome) => {
                stats.increment_success();
                stats.add_bytes_read(outcome.bytes_read);
                stats.add_bytes_written(outcome.bytes_written);
                if args.verbose {
                    pb.println(format!("  {} {:?}", "✓".green(), path));
                }
            }
            Err(_) => stats.increment_error(),
        }
    });

    pb.finish_with_message("완료!");

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            // 첫 실패에서 중단됨
            let errors = vec![(failed_path(&e, &args.path), e.root_cause().to_string())];
            print_errors(&errors, args.verbose);
            if let Some(ref log_path) = args.log {
                write_error_log(log_path, &errors)?;
            }
            stats.print_summary(args.validate_only);
            return Err(e.into());
        }
    };

    let errors: Vec<(PathBuf, String)> = report
        .failures
        .iter()
        .map(|(path, e)| (path.clone(), e.root_cause().to_string()))
        .collect();

    print_errors(&errors, args.verbose);

    if let Some(ref log_path) = args.log {
        write_error_log(log_path, &errors)?;
    }

    stats.print_summary(args.validate_only);

    report.ensure_success()?;

    if args.validate_only {
        println!("\n{} 모든 파일이 유효합니다!\n", "✅".bright_green());
    } else {
        println!(
            "\n{} {}개 파일 변환 완료\n",
            "✅".bright_green(),
            report.converted.len()
        );
    }

    Ok(())
}

/// 에러에 담긴 파일 경로 (없으면 입력 경로)
fn failed_path(e: &ConvertError, fallback: &Path) -> PathBuf {
    match e {
        ConvertError::InFile { file, .. } => file.clone(),
        _ => fallback.to_path_buf(),
    }
}

/// 드라이런 출력
fn print_dry_run(files: &[PathBuf], validate_only: bool) {
    println!("\n{}", "📋 처리 예정 파일 목록:".bright_cyan());
    for (i, path) in files.iter().enumerate() {
        if validate_only {
            println!("  {}. {:?}", i + 1, path);
        } else {
            println!("  {}. {:?} → {:?}", i + 1, path, output_path(path));
        }
    }
    println!(
        "\n{} 총 {} 개의 파일이 처리될 예정입니다.",
        "ℹ️".bright_blue(),
        files.len().to_string().bright_green()
    );
}

/// 진행률 바 생성
fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}

/// 에러 목록 출력
fn print_errors(errors: &[(PathBuf, String)], verbose: bool) {
    if errors.is_empty() {
        return;
    }

    eprintln!("\n{}", "❌ 오류 발생 파일:".bright_red());
    for (path, error) in errors {
        eprintln!("  {} {:?}", "•".red(), path);
        if verbose {
            eprintln!("    {}", error.dimmed());
        }
    }
}

/// 에러 로그 파일 작성
fn write_error_log(log_path: &Path, errors: &[(PathBuf, String)]) -> Result<()> {
    let mut log_file = File::create(log_path)
        .with_context(|| format!("에러 로그 파일을 만들 수 없습니다: {:?}", log_path))?;

    writeln!(log_file, "rdfconvert 에러 로그")?;
    writeln!(log_file, "생성 시간: {}", unix_now())?;
    writeln!(log_file, "총 에러 수: {}", errors.len())?;
    writeln!(log_file, "{}", "=".repeat(50))?;

    for (path, error) in errors {
        writeln!(log_file, "\n파일: {:?}", path)?;
        writeln!(log_file, "에러: {}", error)?;
    }

    println!("\n{} 에러 로그 저장: {:?}", "📝".bright_cyan(), log_path);

    Ok(())
}

/// 현재 시간 문자열 반환
fn unix_now() -> String {
    use std::time::SystemTime;
    let duration = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    format!("Unix timestamp: {}", duration.as_secs())
}
