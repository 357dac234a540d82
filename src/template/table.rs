//! Filling named template tables with literal rows.
use crate::ooxml::pptx::Slide;
use crate::template::error::{Result, TableDimension, TemplateError};
use crate::template::locator::SlideTarget;
use crate::template::placeholder::value_to_string;
use crate::template::request::TableInstruction;
use tracing::debug;

/// Write `instruction`'s rows into the table shape it names on `slide`.
///
/// The table grid is fixed: more rows or columns than the template provides
/// fail with `TableCapacityExceeded` before any cell is touched. Values are
/// written verbatim, not run through placeholder substitution. Short rows
/// leave their trailing cells empty, and with `clear_extra_rows` every cell
/// below the written rows is blanked.
pub fn populate(slide: &mut Slide, target: &SlideTarget, instruction: &TableInstruction) -> Result<()> {
    let mut shapes = slide.shapes_mut();
    let shape = shapes
        .iter_mut()
        .find(|shape| {
            shape.name().as_deref() == Some(instruction.shape.as_str()) && shape.as_shape().has_table()
        })
        .ok_or_else(|| TemplateError::TableNotFound {
            shape: instruction.shape.clone(),
            slide: target.clone(),
        })?;
    let mut table = shape.table_mut().ok_or_else(|| TemplateError::TableNotFound {
        shape: instruction.shape.clone(),
        slide: target.clone(),
    })?;

    let rows = instruction.rows();
    let row_count = table.row_count();
    let column_count = table.column_count();

    let required_rows = rows.len();
    if required_rows > row_count {
        return Err(TemplateError::TableCapacityExceeded {
            shape: instruction.shape.clone(),
            dimension: TableDimension::Rows,
            required: required_rows,
            available: row_count,
        });
    }

    let required_cols = rows.iter().map(|row| row.len()).max().unwrap_or(column_count);
    if required_cols > column_count {
        return Err(TemplateError::TableCapacityExceeded {
            shape: instruction.shape.clone(),
            dimension: TableDimension::Columns,
            required: required_cols,
            available: column_count,
        });
    }

    debug!(
        shape = %instruction.shape,
        slide = %target,
        rows = required_rows,
        columns = column_count,
        "populating table"
    );

    for (r, row) in rows.iter().enumerate() {
        for c in 0..column_count {
            table.cell_mut(r, c)?.set_text(&value_to_string(row.get(c)));
        }
    }

    if instruction.clear_extra_rows {
        for r in required_rows..row_count {
            for c in 0..column_count {
                table.cell_mut(r, c)?.set_text("");
            }
        }
    }

    Ok(())
}
