//! Resolving a slide instruction to one slide of the presentation.
use crate::ooxml::pptx::{Presentation, Slide};
use crate::template::error::{Result, TemplateError};
use crate::template::placeholder::slide_markers;
use crate::template::request::SlideInstruction;
use std::fmt;

/// A resolved slide: its position, and the marker it was found by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideTarget {
    pub index: usize,
    pub id: Option<String>,
}

impl fmt::Display for SlideTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "'{}' (index {})", id, self.index),
            None => write!(f, "index {}", self.index),
        }
    }
}

/// Find the slide an instruction addresses.
///
/// `id` wins over `index`: the first slide with a `{id:<id>}` marker in any
/// of its text shapes is chosen. Otherwise `index` must fall inside
/// `0..slide_count`. `position` is the instruction's place in the request
/// and only feeds error messages.
pub fn locate(
    presentation: &Presentation,
    instruction: &SlideInstruction,
    position: usize,
) -> Result<SlideTarget> {
    if let Some(id) = instruction.marker_id() {
        return presentation
            .slides()
            .iter()
            .position(|slide| has_marker(slide, id))
            .map(|index| SlideTarget {
                index,
                id: Some(id.to_string()),
            })
            .ok_or_else(|| TemplateError::SlideNotFound { id: id.to_string() });
    }

    let index = instruction
        .index
        .ok_or(TemplateError::InvalidSlideInstruction { position })?;
    let slide_count = presentation.slide_count();

    match usize::try_from(index) {
        Ok(i) if i < slide_count => Ok(SlideTarget { index: i, id: None }),
        _ => Err(TemplateError::SlideIndexOutOfRange { index, slide_count }),
    }
}

/// Whether any text shape on `slide` carries the `{id:<id>}` marker.
pub fn has_marker(slide: &Slide, id: &str) -> bool {
    slide
        .shapes()
        .iter()
        .filter_map(|shape| shape.text())
        .any(|text| slide_markers(&text).contains(&id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::Package;
    use crate::ooxml::pptx::testing::{PptxBuilder, group_shape, table_shape, text_shape};

    fn presentation() -> Presentation {
        let bytes = PptxBuilder::new()
            .slide(&[text_shape("Title", "Cover")])
            .slide(&[
                text_shape("Title", "Agenda"),
                text_shape("Notes", "some text before {id:intro} and after"),
            ])
            .slide(&[group_shape("G", &[text_shape("Inner", "{id:grouped}")])])
            .slide(&[table_shape("T", &[["{id:in-table}"]])])
            .build();
        Package::from_bytes(bytes).unwrap().into_presentation().unwrap()
    }

    fn by_index(index: i64) -> SlideInstruction {
        SlideInstruction {
            index: Some(index),
            ..Default::default()
        }
    }

    fn by_id(id: &str) -> SlideInstruction {
        SlideInstruction {
            id: Some(id.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_index_zero_is_first_slide() {
        let pres = presentation();
        let target = locate(&pres, &by_index(0), 0).unwrap();
        assert_eq!(target.index, 0);
        assert_eq!(target.to_string(), "index 0");
    }

    #[test]
    fn test_index_equal_to_count_out_of_range() {
        let pres = presentation();
        assert!(matches!(
            locate(&pres, &by_index(4), 0),
            Err(TemplateError::SlideIndexOutOfRange { index: 4, slide_count: 4 })
        ));
        assert!(matches!(
            locate(&pres, &by_index(-1), 0),
            Err(TemplateError::SlideIndexOutOfRange { index: -1, .. })
        ));
    }

    #[test]
    fn test_id_found_among_other_text() {
        let pres = presentation();
        let target = locate(&pres, &by_id("intro"), 0).unwrap();
        assert_eq!(target.index, 1);
        assert_eq!(target.to_string(), "'intro' (index 1)");
    }

    #[test]
    fn test_id_wins_over_index() {
        let pres = presentation();
        let instruction = SlideInstruction {
            index: Some(0),
            ..by_id("grouped")
        };
        assert_eq!(locate(&pres, &instruction, 0).unwrap().index, 2);
    }

    #[test]
    fn test_id_not_found() {
        let pres = presentation();
        assert!(matches!(
            locate(&pres, &by_id("missing"), 0),
            Err(TemplateError::SlideNotFound { ref id }) if id == "missing"
        ));
        // markers inside table cells do not address slides
        assert!(matches!(
            locate(&pres, &by_id("in-table"), 0),
            Err(TemplateError::SlideNotFound { .. })
        ));
    }

    #[test]
    fn test_neither_id_nor_index() {
        let pres = presentation();
        let instruction = SlideInstruction {
            id: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            locate(&pres, &instruction, 3),
            Err(TemplateError::InvalidSlideInstruction { position: 3 })
        ));
    }
}
