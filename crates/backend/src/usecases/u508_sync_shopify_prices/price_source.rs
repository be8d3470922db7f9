use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

use crate::shared::error::SyncError;

/// Строка файла цен после нормализации
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub sku: String,
    pub price: f64,
    pub compare_at_price: Option<f64>,
}

/// Значение ячейки независимо от формата файла
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            other => CellValue::Text(other.to_string()),
        }
    }
}

/// Таблица: строка заголовков и строки данных
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

const REQUIRED_COLUMNS_MESSAGE: &str =
    "Price file must have columns: sku, price (and optional compare_at_price)";

/// Прочитать файл цен (xlsx/xlsm/xlsb/xls/ods или csv)
pub fn read_price_file(path: &Path) -> Result<Vec<PriceRow>, SyncError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let table = match extension.as_str() {
        "csv" => read_csv_table(path)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook_table(path)?,
        other => {
            return Err(SyncError::Configuration(format!(
                "Unsupported price file format '{}': {}",
                other,
                path.display()
            )))
        }
    };

    let rows = normalize_rows(table)?;
    tracing::info!("Loaded {} price rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Первый лист книги; первая строка считается заголовком
fn read_workbook_table(path: &Path) -> Result<RawTable, SyncError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| {
        SyncError::Configuration(format!("Failed to open price file {}: {}", path.display(), e))
    })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| SyncError::InvalidSource("Price file has no sheets".to_string()))?;

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
        SyncError::Configuration(format!("Failed to read sheet '{}': {}", sheet_name, e))
    })?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|header| header.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default();

    Ok(RawTable {
        headers,
        rows: rows
            .map(|row| row.iter().map(CellValue::from).collect())
            .collect(),
    })
}

fn read_csv_table(path: &Path) -> Result<RawTable, SyncError> {
    let open_error = |e: csv::Error| {
        SyncError::Configuration(format!("Failed to read price file {}: {}", path.display(), e))
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(open_error)?;

    let headers = reader
        .headers()
        .map_err(open_error)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(open_error)?;
        rows.push(
            record
                .iter()
                .map(|value| {
                    if value.trim().is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(value.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(RawTable { headers, rows })
}

/// Превратить таблицу в строки цен.
///
/// Строки без SKU и строки с нечисловой ценой отбрасываются молча:
/// они не попадают ни в total_rows, ни в список ошибок.
pub fn normalize_rows(table: RawTable) -> Result<Vec<PriceRow>, SyncError> {
    let column = |name: &str| {
        table
            .headers
            .iter()
            .position(|h| h.trim().to_lowercase() == name)
    };

    let (Some(sku_idx), Some(price_idx)) = (column("sku"), column("price")) else {
        return Err(SyncError::InvalidSource(REQUIRED_COLUMNS_MESSAGE.to_string()));
    };
    let compare_at_idx = column("compare_at_price");

    let mut result = Vec::with_capacity(table.rows.len());
    for (idx, row) in table.rows.iter().enumerate() {
        let sku = sku_text(row.get(sku_idx));
        if sku.is_empty() {
            continue;
        }

        let Some(price) = coerce_price(row.get(price_idx)) else {
            tracing::debug!(
                "Dropping row {}: invalid price {:?} for sku '{}'",
                idx + 2,
                row.get(price_idx),
                sku
            );
            continue;
        };

        let compare_at_price = compare_at_idx.and_then(|i| coerce_price(row.get(i)));

        result.push(PriceRow {
            sku,
            price,
            compare_at_price,
        });
    }

    Ok(result)
}

/// SKU как строка без пробелов по краям. Числовые ячейки Excel
/// ("12345" сохранён как 12345.0) выводятся без дробной части.
fn sku_text(cell: Option<&CellValue>) -> String {
    match cell {
        Some(CellValue::Text(s)) => s.trim().to_string(),
        Some(CellValue::Number(n)) if n.fract() == 0.0 && n.abs() < 1e15 => {
            format!("{}", *n as i64)
        }
        Some(CellValue::Number(n)) => n.to_string(),
        Some(CellValue::Empty) | None => String::new(),
    }
}

/// Неотрицательное конечное число
fn coerce_price(cell: Option<&CellValue>) -> Option<f64> {
    let value = match cell? {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => parse_price_text(s)?,
        CellValue::Empty => return None,
    };

    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Цена из текста. Десятичная запятая допускается только в виде "5309,00":
/// без точки и с одной-двумя цифрами после запятой. "1,000" и "1,234.50"
/// не числа (разделитель тысяч), такие строки отбрасываются.
fn parse_price_text(raw: &str) -> Option<f64> {
    let s = raw.trim();
    match s.split_once(',') {
        None => s.parse().ok(),
        Some((whole, fraction))
            if !whole.contains('.')
                && (1..=2).contains(&fraction.len())
                && fraction.chars().all(|c| c.is_ascii_digit()) =>
        {
            format!("{}.{}", whole, fraction).parse().ok()
        }
        Some(_) => None,
    }
}
