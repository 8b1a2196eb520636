//! # Invoice Rendering
//!
//! Lays an order out as a fixed-format PDF: an underlined "Invoice" heading,
//! a separator, then one `<quantity>$<price>` line per product. Text that
//! does not fit on a page continues on the next one.
//!
//! Rendering writes into any `std::io::Write`, so callers can fan a single
//! pass out to several sinks.

use crate::error::{ShopError, ShopResult};
use crate::order::Order;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::io::Write;

// US Letter, in points
const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: i64 = 72;

const BODY_FONT_SIZE: i64 = 26;
const SEPARATOR: &str = "--------------------------";

/// One line of invoice text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceLine {
    pub text: String,
    pub font_size: i64,
    pub underline: bool,
}

impl InvoiceLine {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: BODY_FONT_SIZE,
            underline: false,
        }
    }

    fn line_height(&self) -> i64 {
        self.font_size * 6 / 5
    }

    // Helvetica averages a bit over half an em per glyph
    fn approx_width(&self) -> i64 {
        self.text.chars().count() as i64 * self.font_size * 11 / 20
    }
}

/// A rendered-on-demand invoice for one order
#[derive(Debug, Clone)]
pub struct InvoiceDocument {
    title: String,
    lines: Vec<InvoiceLine>,
}

impl InvoiceDocument {
    pub fn for_order(order: &Order) -> Self {
        let mut lines = vec![
            InvoiceLine {
                text: "Invoice".to_string(),
                font_size: BODY_FONT_SIZE,
                underline: true,
            },
            InvoiceLine::plain(SEPARATOR),
        ];
        lines.extend(order.products.iter().map(|line| {
            InvoiceLine::plain(format!("{}${}", line.quantity, line.product.price))
        }));

        Self {
            title: order.invoice_name(),
            lines,
        }
    }

    pub fn lines(&self) -> &[InvoiceLine] {
        &self.lines
    }

    /// Content operations, one entry per page
    fn page_operations(&self) -> Vec<Vec<Operation>> {
        let mut pages = Vec::new();
        let mut current = Vec::new();
        let mut cursor = PAGE_HEIGHT - MARGIN;

        for line in &self.lines {
            let baseline = cursor - line.font_size;
            if baseline < MARGIN && !current.is_empty() {
                pages.push(std::mem::take(&mut current));
                cursor = PAGE_HEIGHT - MARGIN;
            }
            let baseline = cursor - line.font_size;

            current.extend([
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), Object::Integer(line.font_size)]),
                Operation::new("Td", vec![Object::Integer(MARGIN), Object::Integer(baseline)]),
                Operation::new("Tj", vec![Object::string_literal(line.text.as_str())]),
                Operation::new("ET", vec![]),
            ]);

            if line.underline {
                let y = baseline - 3;
                current.extend([
                    Operation::new("w", vec![Object::Integer(1)]),
                    Operation::new("m", vec![Object::Integer(MARGIN), Object::Integer(y)]),
                    Operation::new(
                        "l",
                        vec![Object::Integer(MARGIN + line.approx_width()), Object::Integer(y)],
                    ),
                    Operation::new("S", vec![]),
                ]);
            }

            cursor -= line.line_height();
        }

        pages.push(current);
        pages
    }

    fn build(&self) -> ShopResult<Document> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for operations in self.page_operations() {
            let encoded = Content { operations }
                .encode()
                .map_err(|e| ShopError::Invoice(format!("Failed to encode page content: {}", e)))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH),
                Object::Integer(PAGE_HEIGHT),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(self.title.as_str()),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        Ok(doc)
    }

    /// Render the PDF in a single pass into `writer`
    pub fn write_to<W: Write>(&self, writer: &mut W) -> ShopResult<()> {
        let mut doc = self.build()?;
        doc.save_to(writer)
            .map_err(|e| ShopError::Invoice(format!("Failed to write PDF: {}", e)))?;
        writer.flush()?;
        Ok(())
    }
}
