use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

use cutoff_model::{CutoffRecord, DocumentOutput};
use cutoff_parser::pages::{split_pages, strip_boilerplate};
use cutoff_parser::{ParseSession, ParserConfig, PercentileFill};
use log::warn;

fn print_usage() {
    eprintln!(
        "Usage:\n\
         cutoff-extract parse INPUT.txt [--out FILE] [--format csv|jsonl]\n\
         \x20                [--branch-width N] [--serial-start N] [--encoding ENC]\n\
         \x20                [--percentile-fill sentinel|zero|truncate] [--keep-boilerplate]\n\
         \n\
         Reads an OCR text dump (either `--- Page N ---` or <PAGEn> page markers),\n\
         reconstructs cutoff records and writes them as CSV (default) or JSONL.\n\
         Notes: --out defaults to <INPUT>.csv; warnings go to stderr.\n"
    );
}

fn main() {
    env_logger::init();
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        print_usage();
        std::process::exit(2);
    }
    let cmd = args.remove(0);
    let result = match cmd.as_str() {
        "parse" => do_parse(args),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => Err(format!("unknown command: {other}")),
    };
    if let Err(e) = result {
        eprintln!("error: {e}");
        print_usage();
        std::process::exit(1);
    }
}

#[derive(Debug)]
struct ParseArgs {
    input: String,
    out: Option<String>,
    format: String,
    encoding: Option<String>,
    keep_boilerplate: bool,
    config: ParserConfig,
}

fn parse_args(mut tail: Vec<String>) -> Result<ParseArgs, String> {
    if tail.is_empty() || tail[0].starts_with('-') {
        return Err("parse requires an input file".into());
    }
    let input = tail.remove(0);
    let mut out = None;
    let mut format = String::from("csv");
    let mut encoding = None;
    let mut keep_boilerplate = false;
    let mut config = ParserConfig::default();

    let mut i = 0;
    while i < tail.len() {
        match tail[i].as_str() {
            "--out" => {
                out = Some(take_value(&tail, &mut i, "--out")?);
            }
            "--format" => {
                format = take_value(&tail, &mut i, "--format")?;
                if format != "csv" && format != "jsonl" {
                    return Err(format!("--format must be csv or jsonl, got {format}"));
                }
            }
            "--encoding" => {
                encoding = Some(take_value(&tail, &mut i, "--encoding")?);
            }
            "--branch-width" => {
                let v = take_value(&tail, &mut i, "--branch-width")?;
                config.branch_code_width =
                    v.parse().map_err(|_| format!("--branch-width requires a number, got {v}"))?;
            }
            "--serial-start" => {
                let v = take_value(&tail, &mut i, "--serial-start")?;
                config.serial_start =
                    v.parse().map_err(|_| format!("--serial-start requires a number, got {v}"))?;
            }
            "--percentile-fill" => {
                let v = take_value(&tail, &mut i, "--percentile-fill")?;
                config.percentile_fill = match v.as_str() {
                    "sentinel" => PercentileFill::Sentinel,
                    "zero" => PercentileFill::ZeroFill,
                    "truncate" => PercentileFill::Truncate,
                    _ => return Err(format!("--percentile-fill must be sentinel|zero|truncate, got {v}")),
                };
            }
            "--keep-boilerplate" => {
                keep_boilerplate = true;
                i += 1;
            }
            other => return Err(format!("unknown option: {other}")),
        }
    }
    Ok(ParseArgs { input, out, format, encoding, keep_boilerplate, config })
}

fn take_value(tail: &[String], i: &mut usize, flag: &str) -> Result<String, String> {
    if *i + 1 < tail.len() {
        let v = tail[*i + 1].clone();
        *i += 2;
        Ok(v)
    } else {
        Err(format!("{flag} requires a value"))
    }
}

fn do_parse(tail: Vec<String>) -> Result<(), String> {
    let args = parse_args(tail)?;
    let text = read_text(&args.input, args.encoding.as_deref())?;

    let mut pages = split_pages(&text);
    if !args.keep_boilerplate {
        for page in &mut pages {
            page.text = strip_boilerplate(&page.text);
        }
    }

    let mut session =
        ParseSession::new(args.config).map_err(|e| format!("session init failed: {e}"))?;
    let doc = session.parse_pages(&pages);

    for w in &doc.warnings {
        warn!("{w}");
    }

    let out_path = args.out.unwrap_or_else(|| derive_out_path(&args.input, &args.format));
    match args.format.as_str() {
        "csv" => write_csv(&out_path, &doc.records)?,
        "jsonl" => write_jsonl(&out_path, &doc.records)?,
        _ => unreachable!(),
    }

    eprintln!(
        "{}: {} pages, {} records, {} warnings -> {}",
        chrono::Utc::now().to_rfc3339(),
        doc.pages_seen,
        doc.records.len(),
        doc.warnings.len(),
        out_path
    );
    summarize(&doc);
    Ok(())
}

fn read_text(path: &str, encoding: Option<&str>) -> Result<String, String> {
    let bytes = fs::read(path).map_err(|e| format!("failed to read {path}: {e}"))?;
    let lower = encoding.unwrap_or("").to_ascii_lowercase();
    let text = match lower.as_str() {
        "utf-8" | "utf8" | "" => String::from_utf8_lossy(&bytes).to_string(),
        "windows-1252" | "cp1252" => {
            let (cow, _enc_used, _had_errors) = encoding_rs::WINDOWS_1252.decode(&bytes);
            cow.into_owned()
        }
        "latin1" | "iso-8859-1" => {
            let (cow, _enc_used, _had_errors) = encoding_rs::WINDOWS_1252.decode(&bytes);
            cow.into_owned()
        }
        other => return Err(format!("unsupported encoding: {other}")),
    };
    // Normalize CRLF to LF
    Ok(text.replace('\r', ""))
}

fn derive_out_path(input: &str, format: &str) -> String {
    let stem = Path::new(input)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "cutoff".to_string());
    let ext = if format == "jsonl" { "jsonl" } else { "csv" };
    match Path::new(input).parent() {
        Some(dir) if dir != Path::new("") => dir.join(format!("{stem}.{ext}")).display().to_string(),
        _ => format!("{stem}.{ext}"),
    }
}

fn write_csv(path: &str, records: &[CutoffRecord]) -> Result<(), String> {
    let mut writer =
        csv::Writer::from_path(path).map_err(|e| format!("failed to open {path}: {e}"))?;
    for record in records {
        writer.serialize(record).map_err(|e| format!("csv write failed: {e}"))?;
    }
    writer.flush().map_err(|e| format!("csv flush failed: {e}"))?;
    Ok(())
}

fn write_jsonl(path: &str, records: &[CutoffRecord]) -> Result<(), String> {
    let mut file = fs::File::create(path).map_err(|e| format!("failed to open {path}: {e}"))?;
    for record in records {
        let line =
            serde_json::to_string(record).map_err(|e| format!("json serialize failed: {e}"))?;
        writeln!(file, "{line}").map_err(|e| format!("jsonl write failed: {e}"))?;
    }
    Ok(())
}

fn summarize(doc: &DocumentOutput) {
    let mut institutes: Vec<&str> = doc
        .records
        .iter()
        .map(|r| r.institute_code.as_str())
        .collect();
    institutes.sort_unstable();
    institutes.dedup();
    eprintln!("institutes: {}", institutes.len());
}
