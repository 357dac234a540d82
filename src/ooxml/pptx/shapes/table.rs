/// Table shape implementation for PowerPoint presentations.
use crate::common::xml::XmlElement;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::shapes::textframe::{TextFrame, TextFrameMut, prefixed_name};

/// A table in a PowerPoint presentation.
///
/// Tables in PowerPoint are DrawingML tables (a:tbl) contained within
/// graphic frames. The grid (`a:tblGrid/a:gridCol`) fixes the column count;
/// rows (`a:tr`) contain cells (`a:tc`).
///
/// # Examples
///
/// ```rust,ignore
/// if let Some(table) = shape.table() {
///     println!("Table: {}x{}", table.row_count(), table.column_count());
///     println!("Top left: {:?}", table.cell_text(0, 0));
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    tbl: &'a XmlElement,
}

impl<'a> Table<'a> {
    pub fn new(tbl: &'a XmlElement) -> Self {
        Self { tbl }
    }

    pub fn row_count(&self) -> usize {
        self.tbl.children_named("tr").count()
    }

    pub fn column_count(&self) -> usize {
        column_count(self.tbl)
    }

    /// Text of the cell at (row, column), or `None` outside the table.
    pub fn cell_text(&self, row: usize, col: usize) -> Option<String> {
        let tc = self.tbl.children_named("tr").nth(row)?.children_named("tc").nth(col)?;
        Some(tc.child("txBody").map(|b| TextFrame::new(b).text()).unwrap_or_default())
    }
}

fn column_count(tbl: &XmlElement) -> usize {
    tbl.child("tblGrid")
        .map(|grid| grid.children_named("gridCol").count())
        .unwrap_or(0)
}

/// Mutable access to a table's cells. The grid itself is never resized.
#[derive(Debug)]
pub struct TableMut<'a> {
    tbl: &'a mut XmlElement,
}

impl<'a> TableMut<'a> {
    pub fn new(tbl: &'a mut XmlElement) -> Self {
        Self { tbl }
    }

    pub fn row_count(&self) -> usize {
        self.tbl.children_named("tr").count()
    }

    pub fn column_count(&self) -> usize {
        column_count(&*self.tbl)
    }

    /// The cell at (row, column).
    ///
    /// A row holding fewer cells than requested is a malformed table and
    /// yields `InvalidFormat`.
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Result<TableCellMut<'_>> {
        let tr = self
            .tbl
            .children_named_mut("tr")
            .nth(row)
            .ok_or_else(|| OoxmlError::InvalidFormat(format!("table has no row {}", row)))?;
        let tc = tr.children_named_mut("tc").nth(col).ok_or_else(|| {
            OoxmlError::InvalidFormat(format!("table row {} has no cell {}", row, col))
        })?;
        Ok(TableCellMut::new(tc))
    }

    /// Every cell, row by row.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = TableCellMut<'_>> {
        self.tbl
            .children_named_mut("tr")
            .flat_map(|tr| tr.children_named_mut("tc"))
            .map(TableCellMut::new)
    }
}

/// A mutable table cell (`a:tc`).
#[derive(Debug)]
pub struct TableCellMut<'a> {
    tc: &'a mut XmlElement,
}

impl<'a> TableCellMut<'a> {
    pub fn new(tc: &'a mut XmlElement) -> Self {
        Self { tc }
    }

    pub fn text(&self) -> String {
        self.tc
            .child("txBody")
            .map(|b| TextFrame::new(b).text())
            .unwrap_or_default()
    }

    /// The cell's text frame, if the cell has a text body.
    pub fn text_frame_mut(&mut self) -> Option<TextFrameMut<'_>> {
        self.tc.child_mut("txBody").map(TextFrameMut::new)
    }

    /// Replace the cell's text, creating a minimal text body when the cell
    /// has none.
    pub fn set_text(&mut self, text: &str) {
        if self.tc.child("txBody").is_none() {
            let body = minimal_text_body(&*self.tc);
            match self.tc.position_of("tcPr") {
                Some(pos) => self.tc.insert_element(pos, body),
                None => self.tc.push_element(body),
            }
        }
        if let Some(mut frame) = self.text_frame_mut() {
            frame.set_text(text);
        }
    }
}

/// `<a:txBody><a:bodyPr/><a:lstStyle/><a:p/></a:txBody>`
fn minimal_text_body(tc: &XmlElement) -> XmlElement {
    XmlElement::new(prefixed_name(tc, "txBody"))
        .with_child(XmlElement::new(prefixed_name(tc, "bodyPr")))
        .with_child(XmlElement::new(prefixed_name(tc, "lstStyle")))
        .with_child(XmlElement::new(prefixed_name(tc, "p")))
}
