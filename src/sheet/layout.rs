//! JSON value → rectangular sheet grid
//!
//! The shape of the top-level value decides the layout:
//! - `{}` / `[]` → empty sheet
//! - scalar → single cell A1
//! - array of arrays → one row per inner array
//! - array of scalars → one single-cell row per element
//! - array of objects → header row of keys (first-seen order), one row per object
//! - object of arrays → header row of keys, each array fills its column
//! - object of scalars → key/value pairs in two columns

use crate::error::{PkgsheetError, PkgsheetResult};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use tracing::trace;

/// Worksheet row limit, applied to every output format
pub const MAX_ROWS: usize = 1_048_576;
/// Worksheet column limit, applied to every output format
pub const MAX_COLS: usize = 16_384;

/// Largest magnitude at which every integer is exactly representable in f64
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A single spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Convert a JSON scalar; arrays and objects cannot live in a cell
    fn from_json(value: &Value, row: usize, col: usize) -> PkgsheetResult<Self> {
        match value {
            Value::Null => Ok(CellValue::Empty),
            Value::Bool(b) => Ok(CellValue::Bool(*b)),
            Value::Number(n) => n.as_f64().map(CellValue::Number).ok_or_else(|| {
                PkgsheetError::Serialization(format!(
                    "number {} at cell {} is not representable",
                    n,
                    cell_ref(row, col)
                ))
            }),
            // A cell cannot tell an empty string from a blank
            Value::String(s) if s.is_empty() => Ok(CellValue::Empty),
            Value::String(s) => Ok(CellValue::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => Err(PkgsheetError::Serialization(format!(
                "nested {} at cell {} cannot be placed in a single cell",
                kind_name(value),
                cell_ref(row, col)
            ))),
        }
    }

    /// JSON form; whole floats within the exact-integer range become integers
    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Empty => Value::Null,
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
                    Value::Number(Number::from(*n as i64))
                } else {
                    Number::from_f64(*n).map(Value::Number).unwrap_or(Value::Null)
                }
            }
            CellValue::Text(s) => Value::String(s.clone()),
        }
    }

    /// Text used when the cell serves as a header or key
    pub fn to_label(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Number(_) => Some(self.to_json().to_string()),
            CellValue::Text(s) => Some(s.clone()),
        }
    }
}

/// Rows of cells with trailing blanks trimmed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetGrid {
    rows: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    pub fn new(mut rows: Vec<Vec<CellValue>>) -> Self {
        for row in &mut rows {
            while row.last().is_some_and(CellValue::is_empty) {
                row.pop();
            }
        }
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Non-empty cells with their zero-based positions
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &CellValue)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| !cell.is_empty())
                .map(move |(c, cell)| (r, c, cell))
        })
    }

    /// Array of row arrays padded to the grid width, blanks as `null`
    pub fn to_json_rows(&self) -> Value {
        let width = self.width();
        Value::Array(
            self.rows
                .iter()
                .map(|row| {
                    let mut cells: Vec<Value> = row.iter().map(CellValue::to_json).collect();
                    cells.resize(width, Value::Null);
                    Value::Array(cells)
                })
                .collect(),
        )
    }
}

/// How a JSON value was mapped onto the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetShape {
    Empty,
    Scalar,
    Rows,
    ScalarList,
    Records,
    Columns,
    Pairs,
}

/// Classify `value` and lay it out as a grid
pub fn lay_out(value: &Value) -> PkgsheetResult<(SheetShape, SheetGrid)> {
    let (shape, rows) = match value {
        Value::Array(items) => lay_out_array(items)?,
        Value::Object(map) => lay_out_object(map)?,
        scalar => (
            SheetShape::Scalar,
            vec![vec![CellValue::from_json(scalar, 0, 0)?]],
        ),
    };

    let grid = SheetGrid::new(rows);
    check_limits(&grid)?;
    trace!(
        ?shape,
        rows = grid.height(),
        cols = grid.width(),
        "laid out sheet"
    );
    Ok((shape, grid))
}

fn lay_out_array(items: &[Value]) -> PkgsheetResult<(SheetShape, Vec<Vec<CellValue>>)> {
    let Some(first) = items.first() else {
        return Ok((SheetShape::Empty, Vec::new()));
    };

    if let Some((idx, odd)) = items
        .iter()
        .enumerate()
        .find(|(_, item)| kind_name(item) != kind_name(first))
    {
        return Err(PkgsheetError::Serialization(format!(
            "array mixes element kinds: element 0 is {}, element {} is {}",
            article(kind_name(first)),
            idx,
            article(kind_name(odd))
        )));
    }

    match first {
        Value::Array(_) => {
            let rows = items
                .iter()
                .enumerate()
                .map(|(r, item)| {
                    let cells = item.as_array().map(Vec::as_slice).unwrap_or_default();
                    cells
                        .iter()
                        .enumerate()
                        .map(|(c, v)| CellValue::from_json(v, r, c))
                        .collect::<PkgsheetResult<Vec<_>>>()
                })
                .collect::<PkgsheetResult<Vec<_>>>()?;
            Ok((SheetShape::Rows, rows))
        }
        Value::Object(_) => lay_out_records(items),
        _ => {
            let rows = items
                .iter()
                .enumerate()
                .map(|(r, item)| CellValue::from_json(item, r, 0).map(|cell| vec![cell]))
                .collect::<PkgsheetResult<Vec<_>>>()?;
            Ok((SheetShape::ScalarList, rows))
        }
    }
}

fn lay_out_records(items: &[Value]) -> PkgsheetResult<(SheetShape, Vec<Vec<CellValue>>)> {
    let mut headers: Vec<&str> = Vec::new();
    let mut header_index: HashMap<&str, usize> = HashMap::new();

    for record in items.iter().filter_map(Value::as_object) {
        for key in record.keys() {
            if !header_index.contains_key(key.as_str()) {
                header_index.insert(key.as_str(), headers.len());
                headers.push(key.as_str());
            }
        }
    }

    let mut rows = Vec::with_capacity(items.len() + 1);
    rows.push(headers.iter().map(|h| header_cell(h)).collect());

    for (idx, record) in items.iter().filter_map(Value::as_object).enumerate() {
        let row_idx = idx + 1;
        let mut row = vec![CellValue::Empty; headers.len()];
        for (key, value) in record {
            let col = header_index[key.as_str()];
            row[col] = CellValue::from_json(value, row_idx, col)?;
        }
        rows.push(row);
    }

    Ok((SheetShape::Records, rows))
}

fn lay_out_object(map: &Map<String, Value>) -> PkgsheetResult<(SheetShape, Vec<Vec<CellValue>>)> {
    if map.is_empty() {
        return Ok((SheetShape::Empty, Vec::new()));
    }

    let array_count = map.values().filter(|v| v.is_array()).count();

    if array_count == map.len() {
        let height = map
            .values()
            .filter_map(Value::as_array)
            .map(Vec::len)
            .max()
            .unwrap_or(0);
        let mut rows = vec![vec![CellValue::Empty; map.len()]; height + 1];

        for (col, (key, column)) in map.iter().enumerate() {
            rows[0][col] = header_cell(key);
            for (idx, value) in column.as_array().into_iter().flatten().enumerate() {
                rows[idx + 1][col] = CellValue::from_json(value, idx + 1, col)?;
            }
        }
        return Ok((SheetShape::Columns, rows));
    }

    if array_count > 0 {
        return Err(PkgsheetError::Serialization(
            "object mixes array and non-array values".to_string(),
        ));
    }

    let rows = map
        .iter()
        .enumerate()
        .map(|(row, (key, value))| -> PkgsheetResult<Vec<CellValue>> {
            Ok(vec![header_cell(key), CellValue::from_json(value, row, 1)?])
        })
        .collect::<PkgsheetResult<Vec<_>>>()?;
    Ok((SheetShape::Pairs, rows))
}

fn header_cell(key: &str) -> CellValue {
    if key.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(key.to_string())
    }
}

fn check_limits(grid: &SheetGrid) -> PkgsheetResult<()> {
    if grid.height() > MAX_ROWS {
        return Err(PkgsheetError::Serialization(format!(
            "{} rows exceed the worksheet limit of {}",
            grid.height(),
            MAX_ROWS
        )));
    }
    if grid.width() > MAX_COLS {
        return Err(PkgsheetError::Serialization(format!(
            "{} columns exceed the worksheet limit of {}",
            grid.width(),
            MAX_COLS
        )));
    }
    Ok(())
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "array",
        Value::Object(_) => "object",
        _ => "scalar",
    }
}

fn article(kind: &str) -> String {
    match kind {
        "array" | "object" => format!("an {}", kind),
        _ => format!("a {}", kind),
    }
}

/// Zero-based column index to Excel letters (0 → A, 26 → AA)
pub fn column_letter(index: usize) -> String {
    let mut result = String::new();
    let mut idx = index;

    loop {
        result.insert(0, (b'A' + (idx % 26) as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }

    result
}

/// Zero-based position to an A1-style reference
pub fn cell_ref(row: usize, col: usize) -> String {
    format!("{}{}", column_letter(col), row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(MAX_COLS - 1), "XFD");
        assert_eq!(cell_ref(2, 1), "B3");
    }

    #[test]
    fn test_empty_containers() {
        let (shape, grid) = lay_out(&json!({})).unwrap();
        assert_eq!(shape, SheetShape::Empty);
        assert!(grid.is_empty());

        let (shape, grid) = lay_out(&json!([])).unwrap();
        assert_eq!(shape, SheetShape::Empty);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_scalar() {
        let (shape, grid) = lay_out(&json!("hello")).unwrap();
        assert_eq!(shape, SheetShape::Scalar);
        assert_eq!(grid.rows(), &[vec![text("hello")]]);

        let (_, grid) = lay_out(&json!(null)).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_rows_ragged() {
        let (shape, grid) = lay_out(&json!([[1, "a", true], [2.5], []])).unwrap();
        assert_eq!(shape, SheetShape::Rows);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(
            grid.rows()[0],
            vec![CellValue::Number(1.0), text("a"), CellValue::Bool(true)]
        );
        assert_eq!(grid.rows()[1], vec![CellValue::Number(2.5)]);
    }

    #[test]
    fn test_scalar_list_is_one_column() {
        let (shape, grid) = lay_out(&json!(["x", 2, null, false])).unwrap();
        assert_eq!(shape, SheetShape::ScalarList);
        assert_eq!(
            grid.rows(),
            &[
                vec![text("x")],
                vec![CellValue::Number(2.0)],
                vec![],
                vec![CellValue::Bool(false)],
            ]
        );
    }

    #[test]
    fn test_records_union_headers_in_first_seen_order() {
        let value = json!([
            {"name": "ada", "age": 36},
            {"age": 41, "city": "London"},
        ]);
        let (shape, grid) = lay_out(&value).unwrap();
        assert_eq!(shape, SheetShape::Records);
        assert_eq!(grid.rows()[0], vec![text("name"), text("age"), text("city")]);
        assert_eq!(grid.rows()[1], vec![text("ada"), CellValue::Number(36.0)]);
        assert_eq!(
            grid.rows()[2],
            vec![CellValue::Empty, CellValue::Number(41.0), text("London")]
        );
    }

    #[test]
    fn test_columns() {
        let value = json!({"q1": [1, 2, 3], "q2": [4]});
        let (shape, grid) = lay_out(&value).unwrap();
        assert_eq!(shape, SheetShape::Columns);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.get(0, 1), Some(&text("q2")));
        assert_eq!(grid.get(1, 1), Some(&CellValue::Number(4.0)));
        assert_eq!(grid.get(3, 0), Some(&CellValue::Number(3.0)));
        assert_eq!(grid.get(3, 1), None);
    }

    #[test]
    fn test_pairs() {
        let value = json!({"title": "Report", "pages": 12, "draft": false});
        let (shape, grid) = lay_out(&value).unwrap();
        assert_eq!(shape, SheetShape::Pairs);
        assert_eq!(
            grid.rows(),
            &[
                vec![text("title"), text("Report")],
                vec![text("pages"), CellValue::Number(12.0)],
                vec![text("draft"), CellValue::Bool(false)],
            ]
        );
    }

    #[test]
    fn test_mixed_array_rejected() {
        let err = lay_out(&json!([[1], {"a": 1}])).unwrap_err();
        assert!(matches!(err, PkgsheetError::Serialization(_)));
        assert!(err.to_string().contains("element 1 is an object"));
    }

    #[test]
    fn test_mixed_object_rejected() {
        let err = lay_out(&json!({"a": [1], "b": 2})).unwrap_err();
        assert!(err.to_string().contains("mixes array and non-array"));
    }

    #[test]
    fn test_nested_cell_rejected_with_position() {
        let err = lay_out(&json!([[1, 2], [3, [4]]])).unwrap_err();
        assert!(err.to_string().contains("cell B2"), "got: {}", err);

        let err = lay_out(&json!([{"a": {"b": 1}}])).unwrap_err();
        assert!(err.to_string().contains("nested object at cell A2"), "got: {}", err);
    }

    #[test]
    fn test_column_limit() {
        let wide: Vec<i32> = vec![0; MAX_COLS + 1];
        let err = lay_out(&json!([wide])).unwrap_err();
        assert!(err.to_string().contains("columns exceed"));
    }

    #[test]
    fn test_to_json_integers() {
        assert_eq!(CellValue::Number(3.0).to_json(), json!(3));
        assert_eq!(CellValue::Number(-2.5).to_json(), json!(-2.5));
        assert_eq!(CellValue::Empty.to_json(), json!(null));
    }

    #[test]
    fn test_json_rows_are_padded() {
        let (_, grid) = lay_out(&json!([[1], [1, 2]])).unwrap();
        assert_eq!(grid.to_json_rows(), json!([[1, null], [1, 2]]));
    }

    #[test]
    fn test_grid_trims_trailing_blanks() {
        let grid = SheetGrid::new(vec![
            vec![CellValue::Number(1.0), CellValue::Empty],
            vec![CellValue::Empty],
        ]);
        assert_eq!(grid.rows(), &[vec![CellValue::Number(1.0)]]);
    }
}
