use crate::domain::model::{ProductName, RawDocument};
use crate::utils::error::{AppError, Result};
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeSet;

/// Element id wrapping the lookup answer.
pub const RESPONSE_CONTAINER_ID: &str = "respostaWS";
/// Class marking each logical table of the invoice page.
pub const HEADER_BLOCK_CLASS: &str = "NFCCabecalho";
/// The line-items block is the 4th header block (issuer, ..., items, totals).
pub const LINE_ITEMS_BLOCK_INDEX: usize = 3;
/// Column 0 holds the item sequence number.
pub const PRODUCT_NAME_COLUMN: usize = 1;

/// Turns the invoice lookup page into a deduplicated, sorted list of product names.
pub struct ResponseParser {
    container: Selector,
    header_blocks: Selector,
    data_rows: Selector,
    cells: Selector,
}

impl ResponseParser {
    pub fn new() -> Self {
        Self {
            container: static_selector(&format!("#{}", RESPONSE_CONTAINER_ID)),
            header_blocks: static_selector(&format!(".{}", HEADER_BLOCK_CLASS)),
            data_rows: static_selector("tr[id]"),
            cells: static_selector("td"),
        }
    }

    pub fn parse(&self, document: &RawDocument) -> Result<Vec<ProductName>> {
        let html = Html::parse_document(document.as_str());

        let container = html
            .select(&self.container)
            .next()
            .ok_or_else(|| AppError::EmptyResultError {
                reason: format!("element #{} not found", RESPONSE_CONTAINER_ID),
            })?;

        let line_items = self.line_items_block(container)?;

        let mut names = BTreeSet::new();
        for row in line_items.select(&self.data_rows) {
            let Some(cell) = row.select(&self.cells).nth(PRODUCT_NAME_COLUMN) else {
                tracing::debug!("Skipping row without a product column: {:?}", row.value().attr("id"));
                continue;
            };

            let text: String = cell.text().collect();
            if let Some(name) = ProductName::new(&text) {
                names.insert(name);
            }
        }

        tracing::debug!("📄 Parsed {} distinct product names", names.len());
        Ok(names.into_iter().collect())
    }

    /// 取得第 4 個表頭區塊（商品明細）；數量不足時回傳 EmptyResultError
    fn line_items_block<'a>(&self, container: ElementRef<'a>) -> Result<ElementRef<'a>> {
        let blocks: Vec<ElementRef<'a>> = container.select(&self.header_blocks).collect();

        if blocks.is_empty() {
            return Err(AppError::EmptyResultError {
                reason: format!("no .{} blocks inside #{}", HEADER_BLOCK_CLASS, RESPONSE_CONTAINER_ID),
            });
        }

        blocks
            .get(LINE_ITEMS_BLOCK_INDEX)
            .copied()
            .ok_or_else(|| AppError::EmptyResultError {
                reason: format!(
                    "expected at least {} .{} blocks, found {}",
                    LINE_ITEMS_BLOCK_INDEX + 1,
                    HEADER_BLOCK_CLASS,
                    blocks.len()
                ),
            })
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

// Only called with the fixed selectors above.
fn static_selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css:?}: {e:?}"))
}
