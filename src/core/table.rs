//! Tabular rendering for `Logger::table`
//!
//! Renders a JSON mapping or sequence of records as a box-drawn table with an
//! `(index)` column. Rows that are objects or arrays spread their entries
//! across columns; primitive rows go into a `Values` column. Anything that is
//! not a mapping or sequence is rendered as plain text.
//!
//! Column widths count `char`s, so accented Latin text lines up while
//! double-width scripts (CJK, most emoji) push their row's borders out.

use super::args::canonical_json;
use serde_json::Value;

const INDEX_HEADER: &str = "(index)";
const VALUES_HEADER: &str = "Values";

/// Render `data` as an aligned table.
///
/// When `columns` is given only those columns are shown, in that order.
///
/// # Examples
///
/// ```
/// use multisink_logger::core::table::render_table;
/// use serde_json::json;
///
/// let table = render_table(&json!([{"a": 1, "b": "Y"}, {"a": 2}]), None);
/// assert_eq!(
///     table,
///     "┌─────────┬───┬─────┐\n\
///      │ (index) │ a │ b   │\n\
///      ├─────────┼───┼─────┤\n\
///      │ 0       │ 1 │ 'Y' │\n\
///      │ 1       │ 2 │     │\n\
///      └─────────┴───┴─────┘\n"
/// );
/// ```
pub fn render_table(data: &Value, columns: Option<&[&str]>) -> String {
    let rows: Vec<(String, &Value)> = match data {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        other => return format!("{}\n", plain_text(other)),
    };

    let mut headers: Vec<String> = Vec::new();
    let mut has_values = false;
    match columns {
        Some(selected) => headers.extend(selected.iter().map(|c| c.to_string())),
        None => {
            for (_, row) in &rows {
                match row {
                    Value::Object(map) => {
                        for key in map.keys() {
                            if !headers.contains(key) {
                                headers.push(key.clone());
                            }
                        }
                    }
                    Value::Array(items) => {
                        for i in 0..items.len() {
                            let key = i.to_string();
                            if !headers.contains(&key) {
                                headers.push(key);
                            }
                        }
                    }
                    _ => has_values = true,
                }
            }
        }
    }

    let mut grid: Vec<Vec<String>> = Vec::with_capacity(rows.len() + 1);
    let mut header_row = vec![INDEX_HEADER.to_string()];
    header_row.extend(headers.iter().cloned());
    if has_values {
        header_row.push(VALUES_HEADER.to_string());
    }
    grid.push(header_row);

    for (index, row) in &rows {
        let mut cells = vec![index.clone()];
        for header in &headers {
            cells.push(lookup(row, header).map(cell_text).unwrap_or_default());
        }
        if has_values {
            let value = match row {
                Value::Object(_) | Value::Array(_) => String::new(),
                primitive => cell_text(primitive),
            };
            cells.push(value);
        }
        grid.push(cells);
    }

    draw(&grid)
}

fn lookup<'a>(row: &'a Value, column: &str) -> Option<&'a Value> {
    match row {
        Value::Object(map) => map.get(column),
        Value::Array(items) => column.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s),
        Value::Array(_) | Value::Object(_) => canonical_json(value),
        other => other.to_string(),
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => canonical_json(other),
    }
}

fn draw(grid: &[Vec<String>]) -> String {
    let column_count = grid.first().map_or(0, Vec::len);
    let widths: Vec<usize> = (0..column_count)
        .map(|c| {
            grid.iter()
                .map(|row| row.get(c).map_or(0, |cell| cell.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(mid), right)
    };
    let line = |row: &[String]| {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width - cell.chars().count();
                format!(" {}{} ", cell, " ".repeat(pad))
            })
            .collect();
        format!("│{}│\n", cells.join("│"))
    };

    let mut out = rule("┌", "┬", "┐");
    if let Some((header, body)) = grid.split_first() {
        out.push_str(&line(header));
        out.push_str(&rule("├", "┼", "┤"));
        for row in body {
            out.push_str(&line(row));
        }
    }
    out.push_str(&rule("└", "┴", "┘"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mapping_of_records() {
        let data = json!({
            "alice": {"age": 31, "admin": true},
            "bob": {"age": 27}
        });
        let table = render_table(&data, None);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "│ (index) │ admin │ age │");
        assert_eq!(lines[3], "│ alice   │ true  │ 31  │");
        assert_eq!(lines[4], "│ bob     │       │ 27  │");
    }

    #[test]
    fn test_column_selection() {
        let data = json!([{"a": 1, "b": 2, "c": 3}]);
        let table = render_table(&data, Some(&["c", "a"]));
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[1], "│ (index) │ c │ a │");
        assert_eq!(lines[3], "│ 0       │ 3 │ 1 │");
    }

    #[test]
    fn test_primitive_rows_use_values_column() {
        let table = render_table(&json!(["x", 2]), None);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[1], "│ (index) │ Values │");
        assert_eq!(lines[3], "│ 0       │ 'x'    │");
        assert_eq!(lines[4], "│ 1       │ 2      │");
    }

    #[test]
    fn test_nested_values_render_as_json() {
        let table = render_table(&json!([{"tags": ["a", "b"]}]), None);
        assert!(table.contains(r#"["a","b"]"#));
    }

    #[test]
    fn test_non_tabular_data_is_plain() {
        assert_eq!(render_table(&json!("just text"), None), "just text\n");
        assert_eq!(render_table(&json!(42), None), "42\n");
    }

    #[test]
    fn test_multibyte_cells_align_by_char() {
        let table = render_table(&json!([{"city": "Zürich"}, {"city": "Oslo"}]), None);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[3], "│ 0       │ 'Zürich' │");
        assert_eq!(lines[4], "│ 1       │ 'Oslo'   │");
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_empty_sequence_has_header_only() {
        let table = render_table(&json!([]), None);
        assert_eq!(table.lines().count(), 4);
    }
}
