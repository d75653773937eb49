//! Structural validation of layouts and their regions.
//!
//! Checks run in a fixed order and stop at the first violation:
//! minimum size, mode/width agreement, column count, then each region's
//! position, extent and padding.

use crate::core::errors::{LayoutError, Result};

use super::model::{
    ContentRegion, LayoutMode, MIN_TERMINAL_HEIGHT, MIN_TERMINAL_WIDTH, TerminalLayout,
};

/// Validate a layout and every region in it.
pub fn validate_layout<C>(layout: &TerminalLayout<C>) -> Result<()> {
    if layout.width < MIN_TERMINAL_WIDTH || layout.height < MIN_TERMINAL_HEIGHT {
        return Err(LayoutError::TerminalTooSmall {
            width: layout.width,
            height: layout.height,
            min_width: MIN_TERMINAL_WIDTH,
            min_height: MIN_TERMINAL_HEIGHT,
        });
    }

    let expected = LayoutMode::for_width(layout.width);
    if layout.mode != expected {
        return Err(LayoutError::ModeMismatch {
            expected,
            actual: layout.mode,
            width: layout.width,
        });
    }

    match layout.mode {
        LayoutMode::Wide if layout.columns < 2 => {
            return Err(LayoutError::WideColumns {
                columns: layout.columns,
            });
        }
        LayoutMode::Compact | LayoutMode::Standard if layout.columns != 1 => {
            return Err(LayoutError::NarrowColumns {
                mode: layout.mode,
                columns: layout.columns,
            });
        }
        _ => {}
    }

    for region in &layout.regions {
        validate_region(region, layout)?;
    }
    Ok(())
}

/// Validate one region against the bounds of `layout`.
pub fn validate_region<C, L>(region: &ContentRegion<C>, layout: &TerminalLayout<L>) -> Result<()> {
    let position = region.position;
    let size = region.size;

    if position.row >= layout.height {
        return Err(LayoutError::RowOutOfBounds {
            id: region.id.clone(),
            row: position.row,
            max: layout.height.saturating_sub(1),
        });
    }
    if position.column >= layout.width {
        return Err(LayoutError::ColumnOutOfBounds {
            id: region.id.clone(),
            column: position.column,
            max: layout.width.saturating_sub(1),
        });
    }

    // Both subtractions are in range after the position checks above.
    let max_width = layout.width - position.column;
    let max_height = layout.height - position.row;

    if size.width == 0 || size.width > max_width {
        return Err(LayoutError::WidthOutOfBounds {
            id: region.id.clone(),
            width: size.width,
            max: max_width,
        });
    }
    if size.height == 0 || size.height > max_height {
        return Err(LayoutError::HeightOutOfBounds {
            id: region.id.clone(),
            height: size.height,
            max: max_height,
        });
    }

    let horizontal = region.padding.horizontal();
    if horizontal >= u32::from(size.width) {
        return Err(LayoutError::HorizontalPadding {
            id: region.id.clone(),
            padding: horizontal,
            width: size.width,
        });
    }
    let vertical = region.padding.vertical();
    if vertical >= u32::from(size.height) {
        return Err(LayoutError::VerticalPadding {
            id: region.id.clone(),
            padding: vertical,
            height: size.height,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::layout::model::{ContentRegionType, Padding, Position, Size};

    fn layout(width: u16, height: u16, mode: LayoutMode, columns: u16) -> TerminalLayout {
        TerminalLayout {
            width,
            height,
            mode,
            columns,
            regions: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    fn region(row: u16, column: u16, width: u16, height: u16) -> ContentRegion {
        ContentRegion::new(
            "test-region",
            ContentRegionType::Content,
            Position { row, column },
            Size { width, height },
        )
    }

    #[test]
    fn accepts_each_well_formed_mode() {
        validate_layout(&layout(70, 24, LayoutMode::Compact, 1)).unwrap();
        validate_layout(&layout(100, 30, LayoutMode::Standard, 1)).unwrap();
        validate_layout(&layout(140, 40, LayoutMode::Wide, 2)).unwrap();
        validate_layout(&layout(200, 50, LayoutMode::Wide, 3)).unwrap();
    }

    #[test]
    fn rejects_terminal_below_minimum() {
        let err = validate_layout(&layout(50, 24, LayoutMode::Compact, 1)).unwrap_err();
        assert!(err.to_string().contains("Terminal too small"));
        let err = validate_layout(&layout(80, 19, LayoutMode::Standard, 1)).unwrap_err();
        assert!(err.to_string().contains("Terminal too small: 80x19"));
    }

    #[test]
    fn rejects_mode_that_disagrees_with_width() {
        let err = validate_layout(&layout(100, 30, LayoutMode::Wide, 2)).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("LayoutMode mismatch"));
        assert!(text.contains("expected standard for width 100, got wide"));
    }

    #[test]
    fn rejects_wrong_column_counts() {
        let err = validate_layout(&layout(140, 40, LayoutMode::Wide, 1)).unwrap_err();
        assert!(err.to_string().contains("WIDE mode requires columns >= 2"));
        let err = validate_layout(&layout(100, 30, LayoutMode::Standard, 2)).unwrap_err();
        assert!(err.to_string().contains("Non-WIDE mode requires columns = 1"));
    }

    #[test]
    fn size_check_runs_before_mode_check() {
        let err = validate_layout(&layout(50, 10, LayoutMode::Wide, 1)).unwrap_err();
        assert!(matches!(err, LayoutError::TerminalTooSmall { .. }));
    }

    #[test]
    fn accepts_region_filling_the_layout() {
        let parent = layout(80, 24, LayoutMode::Standard, 1);
        validate_region(&region(0, 0, 80, 24), &parent).unwrap();
        validate_region(&region(23, 79, 1, 1), &parent).unwrap();
    }

    #[test]
    fn rejects_position_outside_layout() {
        let parent = layout(80, 24, LayoutMode::Standard, 1);
        let err = validate_region(&region(24, 0, 10, 1), &parent).unwrap_err();
        assert!(err.to_string().contains("row 24 out of bounds (0-23)"));
        let err = validate_region(&region(0, 80, 1, 1), &parent).unwrap_err();
        assert!(err.to_string().contains("column 80 out of bounds"));
    }

    #[test]
    fn rejects_extent_past_remaining_space() {
        let parent = layout(80, 24, LayoutMode::Standard, 1);
        let err = validate_region(&region(0, 10, 71, 5), &parent).unwrap_err();
        assert!(err.to_string().contains("width 71 out of bounds (1-70)"));
        let err = validate_region(&region(20, 0, 10, 5), &parent).unwrap_err();
        assert!(err.to_string().contains("height 5 out of bounds (1-4)"));
        let err = validate_region(&region(0, 0, 0, 5), &parent).unwrap_err();
        assert!(err.to_string().contains("out of bounds"));
    }

    #[test]
    fn rejects_padding_that_consumes_region() {
        let parent = layout(80, 24, LayoutMode::Standard, 1);
        let padded = region(0, 0, 10, 10).with_padding(Padding {
            top: 0,
            right: 5,
            bottom: 0,
            left: 5,
        });
        let err = validate_region(&padded, &parent).unwrap_err();
        assert!(err.to_string().contains("horizontal padding 10 >= width 10"));
        assert_eq!(err.region_id(), Some("test-region"));

        let tall = region(0, 0, 10, 4).with_padding(Padding::uniform(2));
        let err = validate_region(&tall, &parent).unwrap_err();
        assert!(err.to_string().contains("vertical padding"));
    }

    #[test]
    fn layout_reports_first_bad_region() {
        let mut parent = layout(100, 30, LayoutMode::Standard, 1);
        parent.regions = vec![
            region(0, 0, 100, 3),
            ContentRegion::new(
                "overflow",
                ContentRegionType::Footer,
                Position { row: 29, column: 0 },
                Size {
                    width: 100,
                    height: 2,
                },
            ),
        ];
        let err = validate_layout(&parent).unwrap_err();
        assert_eq!(err.region_id(), Some("overflow"));
    }
}
