//! 时间戳目录重命名工具
//!
//! 递归遍历目录，将形如 `2025-10-01 15:00:00` 的目录重命名为 `2025-10-01_150000`

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use regex::Regex;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static TIMESTAMP_DIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2}) ([0-9]{2}):([0-9]{2}):([0-9]{2})$").unwrap()
});

#[derive(Parser)]
#[command(name = "rename_ts", about = "Rename timestamp-named directories to a filename-safe form")]
struct Args {
    /// 预览模式，不实际执行重命名
    #[arg(long)]
    preview: bool,

    /// 要处理的目录路径
    #[arg(long, default_value = ".")]
    directory: PathBuf,

    /// 跳过确认提示
    #[arg(short, long)]
    yes: bool,
}

/// 单个待重命名目录
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlannedRename {
    from: PathBuf,
    to: PathBuf,
}

/// 重命名统计
#[derive(Debug, Default, PartialEq, Eq)]
struct RenameSummary {
    renamed: usize,
    skipped: usize,
}

/// `2025-10-01 15:00:00` -> `2025-10-01_150000`，不匹配时返回 None
fn compact_name(name: &str) -> Option<String> {
    let caps = TIMESTAMP_DIR.captures(name)?;
    Some(format!("{}_{}{}{}", &caps[1], &caps[2], &caps[3], &caps[4]))
}

/// 后序遍历收集待重命名目录：子目录排在父目录之前，父目录改名不影响已收集的子路径
fn plan_renames(root: &Path) -> Result<Vec<PlannedRename>> {
    let mut plan = Vec::new();
    collect(root, &mut plan)?;
    Ok(plan)
}

fn collect(dir: &Path, plan: &mut Vec<PlannedRename>) -> Result<()> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("无法读取目录 {}", dir.display()))?
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let path = entry.path();
        collect(&path, plan)?;

        let name = entry.file_name();
        if let Some(new_name) = name.to_str().and_then(compact_name) {
            plan.push(PlannedRename {
                to: dir.join(new_name),
                from: path,
            });
        }
    }
    Ok(())
}

/// 执行重命名；目标已存在或失败时跳过并计数
fn apply_renames(plan: &[PlannedRename]) -> RenameSummary {
    let mut summary = RenameSummary::default();

    for item in plan {
        if item.to.exists() {
            log::warn!("目标路径已存在，跳过: {}", item.to.display());
            summary.skipped += 1;
            continue;
        }
        match fs::rename(&item.from, &item.to) {
            Ok(()) => {
                println!("重命名: {} -> {}", item.from.display(), item.to.display());
                summary.renamed += 1;
            }
            Err(e) => {
                log::error!("无法重命名 {} -> {}: {}", item.from.display(), item.to.display(), e);
                summary.skipped += 1;
            }
        }
    }
    summary
}

fn confirm() -> Result<bool> {
    print!("确定要继续吗? (y/N): ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn main() -> Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let args = Args::parse();

    let root = std::path::absolute(&args.directory).unwrap_or_else(|_| args.directory.clone());
    println!("开始遍历目录: {}", root.display());
    let plan = plan_renames(&root)?;

    if args.preview {
        println!("预览模式 - 将要重命名的目录:");
        println!("{}", "-".repeat(60));
        for item in &plan {
            println!("{}", item.from.display());
            println!("  -> {}", item.to.display());
        }
        println!("{}", "-".repeat(60));
        println!("总共找到 {} 个需要重命名的目录", plan.len());
        println!("\n使用以下命令执行重命名:");
        println!("rename_ts --directory \"{}\"", args.directory.display());
        return Ok(());
    }

    if !args.yes {
        println!("警告: 此操作将实际重命名目录!");
        println!("建议先使用 --preview 参数预览更改");
        if !confirm()? {
            println!("操作已取消");
            return Ok(());
        }
    }

    let summary = apply_renames(&plan);
    println!("\n操作完成!");
    println!("成功重命名: {} 个目录", summary.renamed);
    println!("错误/跳过: {} 个目录", summary.skipped);
    Ok(())
}
