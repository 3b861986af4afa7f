// ==========================================
// 纺织原料采购计划系统 - 命令行入口
// ==========================================
// 用途: 读取数据目录 -> 执行采购计划 -> 导出建议 CSV 与运行报告 JSON
// 系统定位: 决策支持系统
// ==========================================

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use raw_material_planner::{
    logging, ConfigLoader, PlanningConfig, ProcurementPlanner, RecommendationExporter,
    SnapshotLoader,
};
use std::path::PathBuf;
use tracing::info;

/// 纺织原料采购计划
#[derive(Parser, Debug)]
#[command(name = "raw-material-planner", version, about = "纺织原料采购计划: BOM 展开、库存净算、供应商优化")]
struct Cli {
    /// 输入数据目录（forecasts / bom / inventory / suppliers 四张表, csv 或 xlsx）
    #[arg(short = 'd', long = "data-dir")]
    data_dir: PathBuf,

    /// 计划参数 JSON 文件（缺省使用内置默认值）
    #[arg(short = 'c', long = "config", env = "PLANNER_CONFIG")]
    config: Option<PathBuf>,

    /// 输出目录
    #[arg(short = 'o', long = "output-dir", default_value = "output")]
    output_dir: PathBuf,

    /// 计划日期 YYYY-MM-DD（缺省为当天）
    #[arg(long = "plan-date")]
    plan_date: Option<NaiveDate>,

    /// 输出 JSON 格式日志
    #[arg(long = "json-log")]
    json_log: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.json_log {
        logging::init_json();
    } else {
        logging::init();
    }

    info!("==================================================");
    info!("{} v{}", raw_material_planner::APP_NAME, raw_material_planner::VERSION);
    info!("==================================================");

    // 加载计划参数
    let config = match &cli.config {
        Some(path) => ConfigLoader::from_file(path)
            .with_context(|| format!("加载计划参数失败: {}", path.display()))?,
        None => PlanningConfig::default(),
    };
    let planner = ProcurementPlanner::new(config).context("计划参数校验失败")?;

    // 加载输入快照
    let snapshot = SnapshotLoader::new()
        .load_dir(&cli.data_dir)
        .with_context(|| format!("加载输入数据失败: {}", cli.data_dir.display()))?;

    // 执行计划
    let plan_date = cli.plan_date.unwrap_or_else(|| Local::now().date_naive());
    let report = planner.plan(&snapshot, plan_date).context("采购计划执行失败")?;

    // 导出
    std::fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("创建输出目录失败: {}", cli.output_dir.display()))?;

    let exporter = RecommendationExporter::new();
    let csv_path = cli.output_dir.join("recommendations.csv");
    exporter
        .export_csv(&csv_path, &report.recommendations)
        .with_context(|| format!("导出采购建议失败: {}", csv_path.display()))?;

    let json_path = cli.output_dir.join("planning_report.json");
    exporter
        .export_report_json(&json_path, &report)
        .with_context(|| format!("导出运行报告失败: {}", json_path.display()))?;

    info!(
        run_id = %report.run_id,
        status = %report.status,
        recommendations = report.summary.recommendation_count,
        unallocated = report.summary.unallocated_count,
        failures = report.summary.failure_count,
        total_cost = report.summary.total_cost,
        "运行结束"
    );

    Ok(())
}
