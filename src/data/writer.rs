use std::io::Write;

use super::model::Table;

/// Write the header and the given rows (in the given order) as CSV.
pub fn write_csv<W: Write>(table: &Table, rows: &[usize], out: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(table.column_names())?;

    for &row in rows {
        let record: Vec<String> = table
            .columns()
            .map(|(_, col)| col.cell(row).map(|c| c.to_string()).unwrap_or_default())
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;

    #[test]
    fn writes_header_and_selected_rows() {
        let table = Table::new(
            vec!["Distance".into(), "Note".into()],
            vec![
                Column::Numeric(vec![0.0, 0.5, 1.0]),
                Column::Text(vec!["a".into(), "b, c".into(), "d".into()]),
            ],
            3,
        );
        let mut out = Vec::new();
        write_csv(&table, &[2, 1], &mut out).unwrap();

        let mut reader = csv::Reader::from_reader(out.as_slice());
        let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(header, ["Distance", "Note"]);
        let records: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        assert_eq!(records, [vec!["1", "d"], vec!["0.5", "b, c"]]);
    }
}
