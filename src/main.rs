// ==========================================
// 缝制产线负荷排产系统 - 命令行入口
// ==========================================
// 用法:
//   line-loading-aps <demand.xlsx>                    [选项]
//   line-loading-aps <demand.csv> <groups.csv>        [选项]
// 选项:
//   --out <result.json>        完整结果写入 JSON（缺省输出 KPI 到 stdout）
//   --schedule-csv <path>      班次排程写入 CSV
//   --summary-csv <path>       产线组汇总写入 CSV
//   --db <path>                配置库路径（缺省见 db::get_default_db_path）
// ==========================================

use anyhow::{bail, Context};
use line_loading_aps::api::{PlanApi, ResultExporter};
use line_loading_aps::config::{ConfigManager, PlanningConfigReader, StaticConfig};
use line_loading_aps::db::get_default_db_path;
use line_loading_aps::{logging, PlanResult};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Default)]
struct CliArgs {
    inputs: Vec<PathBuf>,
    out: Option<PathBuf>,
    schedule_csv: Option<PathBuf>,
    summary_csv: Option<PathBuf>,
    db_path: Option<String>,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let mut value_of = |flag: &str| {
            args.next()
                .with_context(|| format!("参数 {} 缺少取值", flag))
        };
        match arg.as_str() {
            "--out" => parsed.out = Some(PathBuf::from(value_of("--out")?)),
            "--schedule-csv" => {
                parsed.schedule_csv = Some(PathBuf::from(value_of("--schedule-csv")?))
            }
            "--summary-csv" => parsed.summary_csv = Some(PathBuf::from(value_of("--summary-csv")?)),
            "--db" => parsed.db_path = Some(value_of("--db")?),
            flag if flag.starts_with("--") => bail!("未知参数: {}", flag),
            _ => parsed.inputs.push(PathBuf::from(arg)),
        }
    }

    if parsed.inputs.is_empty() || parsed.inputs.len() > 2 {
        bail!("用法: line-loading-aps <demand.xlsx | demand.csv groups.csv> [--out result.json] [--schedule-csv path] [--summary-csv path] [--db path]");
    }
    Ok(parsed)
}

fn run_plan<C: PlanningConfigReader>(
    api: PlanApi<C>,
    args: &CliArgs,
) -> anyhow::Result<PlanResult> {
    let result = match args.inputs.as_slice() {
        [workbook] => api.generate_plan_from_workbook(workbook)?,
        [demand, groups] => api.generate_plan_from_csv(demand, groups)?,
        _ => bail!("输入文件数量不正确"),
    };
    Ok(result)
}

fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", line_loading_aps::APP_NAME);
    tracing::info!("系统版本: {}", line_loading_aps::VERSION);
    tracing::info!("==================================================");

    let args = parse_args()?;

    let db_path = args.db_path.clone().unwrap_or_else(get_default_db_path);
    tracing::info!("使用配置库: {}", db_path);

    let result = match ConfigManager::new(&db_path) {
        Ok(manager) => run_plan(PlanApi::new(Arc::new(manager)), &args)?,
        Err(e) => {
            tracing::warn!(error = %e, "配置库不可用，使用默认排产参数");
            run_plan(PlanApi::new(Arc::new(StaticConfig::default())), &args)?
        }
    };

    if let Some(path) = &args.schedule_csv {
        ResultExporter::export_schedule_csv(path, &result)?;
    }
    if let Some(path) = &args.summary_csv {
        ResultExporter::export_summary_csv(path, &result)?;
    }
    match &args.out {
        Some(path) => ResultExporter::export_json(path, &result)?,
        None => println!("{}", serde_json::to_string_pretty(&result.kpi)?),
    }

    Ok(())
}
