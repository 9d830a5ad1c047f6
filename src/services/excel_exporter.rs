//! Excel 导出 - 业务能力层
//!
//! 只负责把聚合结果摊平成固定列并写出 xlsx 文件
//!
//! 列集与培训平台的导入模板一致，行顺序保持题目入库顺序

use rust_xlsxwriter::Workbook;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::question::QuizItem;

/// 导出列头，顺序不可调整
pub const COLUMNS: [&str; 12] = [
    "必填-题号",
    "必填-分类",
    "必填-题型",
    "必填-题目",
    "必填-标准答案",
    "答案A",
    "答案B",
    "答案C",
    "答案D",
    "答案E",
    "答案F",
    "试题解析",
];

/// 答案A-答案F 六列对应的选项标签
const OPTION_LABELS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

/// 一行导出数据
#[derive(Debug, Clone, PartialEq)]
pub struct ExcelRow {
    pub number: u32,
    pub category: String,
    pub question_type: String,
    pub question: String,
    pub answer: String,
    /// 答案A-答案F 六列，缺失的选项为空字符串
    pub options: [String; 6],
    pub explanation: String,
}

/// 把题目列表摊平成导出行，顺序保持不变
pub fn to_rows(items: &[QuizItem]) -> Vec<ExcelRow> {
    items
        .iter()
        .map(|item| ExcelRow {
            number: item.number,
            category: item.category.clone(),
            question_type: item.question_type.name().to_string(),
            question: item.question.clone(),
            answer: item.answer.clone(),
            options: OPTION_LABELS.map(|label| item.options.get(label).cloned().unwrap_or_default()),
            explanation: item.explanation.clone(),
        })
        .collect()
}

/// 写出 xlsx 文件，首行为表头
///
/// 任何失败都是致命的导出错误，由调用方终止运行
pub fn write_excel(path: &str, items: &[QuizItem]) -> AppResult<()> {
    let wrap = |e: rust_xlsxwriter::XlsxError| AppError::export_write_failed(path, e);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).map_err(wrap)?;
    }

    for (index, row) in to_rows(items).into_iter().enumerate() {
        let r = index as u32 + 1;
        worksheet.write_number(r, 0, row.number as f64).map_err(wrap)?;
        worksheet.write_string(r, 1, row.category.as_str()).map_err(wrap)?;
        worksheet.write_string(r, 2, row.question_type.as_str()).map_err(wrap)?;
        worksheet.write_string(r, 3, row.question.as_str()).map_err(wrap)?;
        worksheet.write_string(r, 4, row.answer.as_str()).map_err(wrap)?;
        for (offset, option) in row.options.iter().enumerate() {
            worksheet
                .write_string(r, 5 + offset as u16, option.as_str())
                .map_err(wrap)?;
        }
        worksheet.write_string(r, 11, row.explanation.as_str()).map_err(wrap)?;
    }

    workbook.save(path).map_err(wrap)?;

    info!("所有题目已保存到 {}（共 {} 道）", path, items.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{ParsedQuestion, QuestionType};
    use std::collections::BTreeMap;

    fn make_item(number: u32, option_count: usize) -> QuizItem {
        let labels = ["A", "B", "C", "D", "E", "F"];
        let options: BTreeMap<String, String> = labels[..option_count]
            .iter()
            .map(|l| (l.to_string(), format!("选项{}", l)))
            .collect();
        QuizItem::from((
            number,
            ParsedQuestion {
                category: "phishing".to_string(),
                question_type: QuestionType::SingleChoice,
                question: format!("题目{}", number),
                options,
                answer: "A".to_string(),
                explanation: "解析".to_string(),
            },
        ))
    }

    #[test]
    fn test_to_rows_maps_fixed_columns() {
        let rows = to_rows(&[make_item(1, 4)]);
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.number, 1);
        assert_eq!(row.category, "phishing");
        assert_eq!(row.question_type, "单选题");
        assert_eq!(row.answer, "A");
        assert_eq!(row.options[0], "选项A");
        assert_eq!(row.options[3], "选项D");
    }

    #[test]
    fn test_missing_high_labels_rendered_empty() {
        let rows = to_rows(&[make_item(1, 4)]);
        // 只有 A-D 四个选项时，答案E / 答案F 两列应为空
        assert_eq!(rows[0].options[4], "");
        assert_eq!(rows[0].options[5], "");
    }

    #[test]
    fn test_row_order_follows_item_order() {
        let items = vec![make_item(1, 4), make_item(2, 4), make_item(3, 6)];
        let rows = to_rows(&items);
        let numbers: Vec<u32> = rows.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(rows[2].options[5], "选项F");
    }

    #[test]
    fn test_write_excel_creates_file() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let path = dir.path().join("out.xlsx");
        let path_str = path.to_string_lossy().to_string();

        let items = vec![make_item(1, 4), make_item(2, 5)];
        write_excel(&path_str, &items).expect("写出 Excel 失败");

        let metadata = std::fs::metadata(&path).expect("输出文件不存在");
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_write_excel_unwritable_path_is_error() {
        let result = write_excel("no_such_dir/out.xlsx", &[make_item(1, 4)]);
        assert!(result.is_err());
    }
}
