use fdx_script_parser::{Conf, FdxParser};
use std::env;
use std::path::Path;
use std::time::Instant;

const USAGE_FLAGS: &str = "<script.fdx> [--json] [--trim] [--skip-empty]";

/// 命令行参数
#[derive(Debug, PartialEq)]
struct CliArgs {
    file_path: String,
    as_json: bool,
    conf: Conf,
}

// 解析命令行参数，未知选项或多个文件路径返回错误信息
fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut conf = Conf::default();
    let mut as_json = false;
    let mut file_path: Option<&str> = None;
    for arg in args {
        match arg.as_str() {
            "--json" => as_json = true,
            "--trim" => conf.trim_text = true,
            "--skip-empty" => conf.skip_empty_paragraphs = true,
            flag if flag.starts_with("--") => return Err(format!("未知选项: {}", flag)),
            path => {
                if let Some(previous) = file_path {
                    return Err(format!("只能指定一个剧本文件: {} {}", previous, path));
                }
                file_path = Some(path);
            }
        }
    }
    match file_path {
        Some(path) => Ok(CliArgs {
            file_path: path.to_string(),
            as_json,
            conf,
        }),
        None => Err("缺少剧本文件路径".to_string()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("fdx-parser");

    let CliArgs { file_path, as_json, conf } = match parse_args(args.get(1..).unwrap_or(&[])) {
        Ok(cli) => cli,
        Err(message) => {
            println!("{}", message);
            println!("Usage: {} {}", program, USAGE_FLAGS);
            return;
        }
    };
    let file_path = file_path.as_str();

    if !Path::new(file_path).exists() {
        println!("找不到剧本文件: {}", file_path);
        return;
    }

    let parser = FdxParser::with_conf(conf);
    let display_width = parser.conf().display_width;

    let started = Instant::now();
    let result = parser.parse_file(file_path);
    let elapsed = started.elapsed();

    if as_json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => println!("JSON 序列化失败: {}", e),
        }
        return;
    }

    if let Some(diagnostic) = &result.diagnostic {
        println!("解析失败: {}", diagnostic);
    }

    println!("\n--- 剧本元素 ---");
    if result.elements.is_empty() {
        println!("没有解析出任何元素");
    }
    for element in &result.elements {
        println!("{}", element.display_with_width(display_width));
    }

    if !result.warnings.is_empty() {
        println!("\n--- 警告 ---");
        for warning in &result.warnings {
            println!("{}", warning);
        }
    }

    println!("\n元素数量: {}", result.elements.len());
    println!("场景数量: {}", result.properties.scene_names.len());
    println!("角色列表: {:?}", result.properties.character_names());
    println!("Parsing took: {:.4} seconds", elapsed.as_secs_f64());
}
