//! Row layout: observations of a table-style report page grouped into
//! item / value / unit / reference rows, and the text composed from them.

use super::sanitize::sanitize_extracted_text;
use super::types::{PageRecognition, TextObservation};
use crate::config::LayoutConfig;

/// One reconstructed table row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    pub page_index: usize,
    pub item: String,
    pub value: String,
    pub unit: String,
    pub reference: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Item,
    Value,
    Unit,
    Reference,
}

impl TableRow {
    fn new(page_index: usize) -> Self {
        Self {
            page_index,
            ..Self::default()
        }
    }

    fn is_blank(&self) -> bool {
        self.item.is_empty()
            && self.value.is_empty()
            && self.unit.is_empty()
            && self.reference.is_empty()
    }

    fn cell_mut(&mut self, column: Column) -> &mut String {
        match column {
            Column::Item => &mut self.item,
            Column::Value => &mut self.value,
            Column::Unit => &mut self.unit,
            Column::Reference => &mut self.reference,
        }
    }

    /// Text in an already filled cell is appended after a space.
    fn place(&mut self, column: Column, text: &str) {
        let cell = self.cell_mut(column);
        if !cell.is_empty() {
            cell.push(' ');
        }
        cell.push_str(text);
    }

    /// "item: value unit", followed by "参考值: reference" when present.
    pub fn to_text(&self) -> String {
        let mut line = format!("{}: {}", self.item, self.value);
        if !self.unit.is_empty() {
            line.push(' ');
            line.push_str(&self.unit);
        }
        if !self.reference.is_empty() {
            line.push_str("\n参考值: ");
            line.push_str(&self.reference);
        }
        line
    }
}

fn column_for(x: f32, config: &LayoutConfig) -> Column {
    if x < config.item_column_end {
        Column::Item
    } else if x < config.value_column_end {
        Column::Value
    } else if x < config.unit_column_end {
        Column::Unit
    } else {
        Column::Reference
    }
}

/// Top to bottom, then left to right.
fn reading_order(observations: &[TextObservation]) -> Vec<&TextObservation> {
    let mut sorted: Vec<&TextObservation> = observations.iter().collect();
    sorted.sort_by(|a, b| {
        b.bounding_box
            .y
            .total_cmp(&a.bounding_box.y)
            .then(a.bounding_box.x.total_cmp(&b.bounding_box.x))
    });
    sorted
}

/// Group a page's observations into rows.
///
/// A new row starts when an observation's vertical position (in page points)
/// is farther than the row tolerance from the first observation of the
/// current row.
pub fn layout_rows(page: &PageRecognition, config: &LayoutConfig) -> Vec<TableRow> {
    let mut rows = Vec::new();
    let mut current: Option<(f32, TableRow)> = None;

    for observation in reading_order(&page.observations) {
        let text = sanitize_extracted_text(&observation.text).replace('\n', " ");
        if text.is_empty() {
            continue;
        }

        let y = observation.bounding_box.y * page.height;
        let starts_row = match &current {
            Some((anchor, _)) => (y - anchor).abs() > config.row_tolerance,
            None => true,
        };
        if starts_row {
            if let Some((_, row)) = current.take() {
                rows.push(row);
            }
            current = Some((y, TableRow::new(page.page_index)));
        }

        if let Some((_, row)) = current.as_mut() {
            row.place(column_for(observation.bounding_box.x, config), &text);
        }
    }

    if let Some((_, row)) = current {
        rows.push(row);
    }
    rows.retain(|row| !row.is_blank());
    rows
}

/// Table text of all pages, in page order.
pub fn compose_table_text(pages: &[PageRecognition], config: &LayoutConfig) -> String {
    let mut lines = Vec::new();
    for page in pages {
        let rows = layout_rows(page, config);
        tracing::debug!(page = page.page_index, rows = rows.len(), "Page rows laid out");
        lines.extend(rows.iter().map(TableRow::to_text));
    }
    lines.join("\n")
}

/// Plain reading-order text with a "第 N 页:" header per non-empty page.
pub fn compose_plain_text(pages: &[PageRecognition]) -> String {
    let mut sections = Vec::new();
    for page in pages.iter().filter(|p| !p.is_empty()) {
        let body = reading_order(&page.observations)
            .into_iter()
            .map(|o| o.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let body = sanitize_extracted_text(&body);
        if body.is_empty() {
            continue;
        }
        sections.push(format!("第 {} 页:\n{}", page.page_index + 1, body));
    }
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::extraction::types::BoundingBox;

    fn obs(text: &str, x: f32, y: f32) -> TextObservation {
        TextObservation {
            text: text.into(),
            confidence: 0.9,
            bounding_box: BoundingBox {
                x,
                y,
                width: 0.1,
                height: 0.01,
            },
        }
    }

    /// 600 x 800 point page.
    fn page(index: usize, observations: Vec<TextObservation>) -> PageRecognition {
        PageRecognition {
            page_index: index,
            width: 600.0,
            height: 800.0,
            observations,
        }
    }

    #[test]
    fn observations_are_placed_in_columns() {
        let p = page(
            0,
            vec![
                obs("血红蛋白", 0.05, 0.90),
                obs("150", 0.35, 0.901),
                obs("g/L", 0.52, 0.899),
                obs("130-175", 0.70, 0.90),
            ],
        );
        let rows = layout_rows(&p, &LayoutConfig::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].item, "血红蛋白");
        assert_eq!(rows[0].value, "150");
        assert_eq!(rows[0].unit, "g/L");
        assert_eq!(rows[0].reference, "130-175");
    }

    #[test]
    fn rows_split_on_vertical_distance() {
        // 0.02 * 800 = 16 points apart stays in the row, 0.05 * 800 = 40 splits
        let p = page(
            0,
            vec![
                obs("身高", 0.05, 0.80),
                obs("172", 0.35, 0.78),
                obs("体重", 0.05, 0.75),
                obs("68", 0.35, 0.75),
            ],
        );
        let rows = layout_rows(&p, &LayoutConfig::default());
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].item.as_str(), rows[0].value.as_str()), ("身高", "172"));
        assert_eq!((rows[1].item.as_str(), rows[1].value.as_str()), ("体重", "68"));
    }

    #[test]
    fn rows_run_top_to_bottom() {
        let p = page(0, vec![obs("下", 0.05, 0.10), obs("上", 0.05, 0.90)]);
        let rows = layout_rows(&p, &LayoutConfig::default());
        assert_eq!(rows[0].item, "上");
        assert_eq!(rows[1].item, "下");
    }

    #[test]
    fn filled_cell_is_appended() {
        let p = page(
            0,
            vec![obs("白细胞", 0.05, 0.5), obs("计数", 0.15, 0.5), obs("6.2", 0.4, 0.5)],
        );
        let rows = layout_rows(&p, &LayoutConfig::default());
        assert_eq!(rows[0].item, "白细胞 计数");
    }

    #[test]
    fn row_text_format() {
        let row = TableRow {
            page_index: 0,
            item: "血红蛋白".into(),
            value: "150".into(),
            unit: "g/L".into(),
            reference: "130-175".into(),
        };
        assert_eq!(row.to_text(), "血红蛋白: 150 g/L\n参考值: 130-175");

        let bare = TableRow {
            item: "尿蛋白".into(),
            value: "阴性".into(),
            ..TableRow::default()
        };
        assert_eq!(bare.to_text(), "尿蛋白: 阴性");
    }

    #[test]
    fn table_text_feeds_parsers() {
        let p = page(
            0,
            vec![
                obs("血红蛋白", 0.05, 0.90),
                obs("150", 0.35, 0.90),
                obs("g/L", 0.52, 0.90),
                obs("130-175", 0.70, 0.90),
            ],
        );
        let text = compose_table_text(&[p], &LayoutConfig::default());
        let batches = crate::pipeline::parsing::parse_report_text(&text);
        assert_eq!(batches.blood.len(), 1);
        assert_eq!(batches.blood[0].reference, "130-175");
    }

    #[test]
    fn plain_text_has_page_headers_and_skips_empty_pages() {
        let pages = vec![
            page(0, vec![obs("心率 72 次/分", 0.1, 0.5)]),
            PageRecognition::empty(1),
            page(2, vec![obs("第二行", 0.1, 0.2), obs("第一行", 0.1, 0.8)]),
        ];
        let text = compose_plain_text(&pages);
        assert_eq!(text, "第 1 页:\n心率 72 次/分\n\n第 3 页:\n第一行\n第二行");
    }

    #[test]
    fn blank_observations_are_skipped() {
        let p = page(0, vec![obs("  ", 0.05, 0.5), obs("\u{3000}", 0.4, 0.3)]);
        assert!(layout_rows(&p, &LayoutConfig::default()).is_empty());
    }
}
