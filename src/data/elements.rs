use super::model::Table;
use crate::error::DetectionError;

/// Element channels: every column strictly between the distance column and
/// the end marker, in table order.
///
/// Adjacent markers, or an end marker placed before the distance column,
/// yield an empty list.
pub fn detect_elements(
    table: &Table,
    distance_column: &str,
    end_column: &str,
) -> Result<Vec<String>, DetectionError> {
    let start = table
        .position(distance_column)
        .ok_or_else(|| DetectionError::MissingColumn(distance_column.to_string()))?;
    let end = table
        .position(end_column)
        .ok_or_else(|| DetectionError::MissingColumn(end_column.to_string()))?;

    let names = table.column_names();
    if start + 1 >= end {
        return Ok(Vec::new());
    }
    Ok(names[start + 1..end].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;

    fn table(names: &[&str]) -> Table {
        Table::new(
            names.iter().map(|s| s.to_string()).collect(),
            names.iter().map(|_| Column::Numeric(Vec::new())).collect(),
            0,
        )
    }

    #[test]
    fn elements_between_markers_in_order() {
        let t = table(&["Distance", "PdL", "FeK", "NiK", "SED", "BSE"]);
        assert_eq!(
            detect_elements(&t, "Distance", "SED").unwrap(),
            ["PdL", "FeK", "NiK"]
        );
    }

    #[test]
    fn adjacent_markers_give_no_elements() {
        let t = table(&["Distance", "SED"]);
        assert!(detect_elements(&t, "Distance", "SED").unwrap().is_empty());
    }

    #[test]
    fn reversed_markers_give_no_elements() {
        let t = table(&["SED", "FeK", "Distance"]);
        assert!(detect_elements(&t, "Distance", "SED").unwrap().is_empty());
    }

    #[test]
    fn missing_sed_is_a_detection_error() {
        let t = table(&["Distance", "FeK"]);
        assert_eq!(
            detect_elements(&t, "Distance", "SED").unwrap_err(),
            DetectionError::MissingColumn("SED".to_string())
        );
    }

    #[test]
    fn missing_distance_is_a_detection_error() {
        let t = table(&["FeK", "SED"]);
        assert_eq!(
            detect_elements(&t, "Distance", "SED").unwrap_err(),
            DetectionError::MissingColumn("Distance".to_string())
        );
    }
}
