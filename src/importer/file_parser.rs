// ==========================================
// 缝制产线负荷排产系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx，多工作表) / CSV (.csv，单表)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::raw_table::{RawTable, DEMAND_TABLE, GROUP_TABLE};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
pub trait FileParser {
    /// 解析文件为原始表列表
    fn parse_tables(&self, file_path: &Path) -> ImportResult<Vec<RawTable>>;
}

/// 一次排产所需的两张输入表
#[derive(Debug, Clone)]
pub struct PlanningTables {
    pub demand: RawTable,
    pub groups: RawTable,
}

fn check_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
// 表名取文件名（不含扩展名）
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_tables(&self, file_path: &Path) -> ImportResult<Vec<RawTable>> {
        check_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let name = file_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let mut table = RawTable::new(name, headers.clone());

        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            table.rows.push(row_map);
        }

        Ok(vec![table])
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 读取全部工作表，表名取工作表名
pub struct ExcelParser;

/// 单元格转文本：整数值浮点去掉小数部分（202538.0 → "202538"）
fn cell_to_text(cell: &Data) -> String {
    match cell {
        Data::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
            format!("{}", *v as i64)
        }
        other => other.to_string().trim().to_string(),
    }
}

impl ExcelParser {
    fn range_to_table(name: &str, range: &Range<Data>) -> RawTable {
        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row
                .iter()
                .map(cell_to_text)
                .collect(),
            None => return RawTable::new(name, Vec::new()),
        };

        let mut table = RawTable::new(name, headers.clone());
        for data_row in rows {
            let mut row_map = HashMap::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    if header.is_empty() {
                        continue;
                    }
                    row_map.insert(header.clone(), cell_to_text(cell));
                }
            }

            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            table.rows.push(row_map);
        }
        table
    }
}

impl FileParser for ExcelParser {
    fn parse_tables(&self, file_path: &Path) -> ImportResult<Vec<RawTable>> {
        check_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "xlsx" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook: Xlsx<_> = open_workbook(file_path)?;

        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::ExcelParseError(
                "Excel 文件无工作表".to_string(),
            ));
        }

        let mut tables = Vec::with_capacity(sheet_names.len());
        for sheet_name in sheet_names {
            let range = workbook.worksheet_range(&sheet_name)?;
            tables.push(Self::range_to_table(&sheet_name, &range));
        }

        Ok(tables)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<RawTable>> {
        let path = file_path.as_ref();
        match extension_of(path).as_str() {
            "csv" => CsvParser.parse_tables(path),
            "xlsx" => ExcelParser.parse_tables(path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }

    /// 从单个工作簿读取需求表与产线组绩效表
    pub fn load_workbook<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<PlanningTables> {
        let tables = ExcelParser.parse_tables(file_path.as_ref())?;
        pick_planning_tables(tables)
    }

    /// 从两个 CSV 文件读取需求表与产线组绩效表
    pub fn load_csv_pair<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        demand_path: P,
        groups_path: Q,
    ) -> ImportResult<PlanningTables> {
        let mut demand = take_single(CsvParser.parse_tables(demand_path.as_ref())?)?;
        let mut groups = take_single(CsvParser.parse_tables(groups_path.as_ref())?)?;
        demand.name = DEMAND_TABLE.to_string();
        groups.name = GROUP_TABLE.to_string();
        Ok(PlanningTables { demand, groups })
    }
}

fn take_single(tables: Vec<RawTable>) -> ImportResult<RawTable> {
    tables
        .into_iter()
        .next()
        .ok_or_else(|| ImportError::CsvParseError("CSV 文件无数据".to_string()))
}

/// 按工作表名挑选两张输入表（名称比较忽略大小写）
pub fn pick_planning_tables(tables: Vec<RawTable>) -> ImportResult<PlanningTables> {
    let mut demand = None;
    let mut groups = None;

    for table in tables {
        if table.name.eq_ignore_ascii_case(DEMAND_TABLE) {
            demand = Some(table);
        } else if table.name.eq_ignore_ascii_case(GROUP_TABLE) {
            groups = Some(table);
        }
    }

    let demand = demand.ok_or_else(|| ImportError::SheetNotFound(DEMAND_TABLE.to_string()))?;
    let groups = groups.ok_or_else(|| ImportError::SheetNotFound(GROUP_TABLE.to_string()))?;
    Ok(PlanningTables { demand, groups })
}
