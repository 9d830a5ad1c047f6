//! 题目聚合结果
//!
//! 整轮运行唯一的可变状态，由编排层独占持有：
//! 运行开始时为空，只增不删，结束时一次性交给导出层

use crate::models::question::QuizItem;

/// 整轮运行的题目聚合结果
#[derive(Debug, Default)]
pub struct AggregateResult {
    items: Vec<QuizItem>,
}

impl AggregateResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// 下一道题应使用的题号（从 1 开始，跨文档、跨批次连续）
    pub fn next_number(&self) -> u32 {
        self.items.len() as u32 + 1
    }

    /// 追加一批已编号的题目，不去重也不重新编号
    pub fn extend(&mut self, items: Vec<QuizItem>) {
        self.items.extend(items);
    }

    /// 按入库顺序返回全部题目
    pub fn items(&self) -> &[QuizItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<QuizItem> {
        self.items
    }
}
