//! CSV encoding and decoding for tables.
//!
//! The first record is the header. Rows may be shorter or longer than the
//! header; the codec keeps them as they are and leaves interpretation to
//! `TableData`.

use csv::{ReaderBuilder, Terminator, Writer, WriterBuilder};

use crate::error::{LibrisError, Result};
use crate::storage::table::TableData;

/// Decode a whole table. Empty input yields an empty header and no rows.
pub fn decode_table(bytes: &[u8]) -> Result<TableData> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => record?.iter().map(str::to_string).collect(),
        None => return Ok(TableData::default()),
    };

    let mut data = TableData::new(header);
    for record in records {
        let record = record?;
        data.rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(data)
}

/// Encode a whole table, header first.
pub fn encode_table(data: &TableData) -> Result<Vec<u8>> {
    let mut writer = table_writer();
    writer.write_record(&data.header)?;
    for row in &data.rows {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| LibrisError::Csv(e.to_string()))
}

/// Encode a single row, including its record terminator.
pub fn encode_row(row: &[String]) -> Result<Vec<u8>> {
    let mut writer = table_writer();
    writer.write_record(row)?;
    writer
        .into_inner()
        .map_err(|e| LibrisError::Csv(e.to_string()))
}

fn table_writer() -> Writer<Vec<u8>> {
    WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::table::Table;

    #[test]
    fn test_empty_input_is_empty_table() {
        let data = decode_table(b"").unwrap();
        assert!(data.header.is_empty());
        assert!(data.is_empty());
    }

    #[test]
    fn test_header_only() {
        let data = decode_table(b"book_id,title,author,category,status\n").unwrap();
        assert_eq!(data, TableData::for_table(Table::Books));
    }

    #[test]
    fn test_embedded_comma_quote_and_newline_survive() {
        let mut data = TableData::for_table(Table::Books);
        data.rows.push(vec![
            "b1".to_string(),
            "War, and \"Peace\"".to_string(),
            "Leo\nTolstoy".to_string(),
            "Classics".to_string(),
            "available".to_string(),
        ]);

        let encoded = encode_table(&data).unwrap();
        let text = String::from_utf8(encoded.clone()).unwrap();
        assert!(text.contains("\"War, and \"\"Peace\"\"\""));

        assert_eq!(decode_table(&encoded).unwrap(), data);
    }

    #[test]
    fn test_ragged_rows_are_kept() {
        let data = decode_table(b"loan_id,book_id,return_date\nl1,b1\nl2,b2,,extra\n").unwrap();
        assert_eq!(data.rows[0], vec!["l1", "b1"]);
        assert_eq!(data.rows[1], vec!["l2", "b2", "", "extra"]);
    }

    #[test]
    fn test_encode_row_is_one_line() {
        let bytes = encode_row(&["u1".to_string(), "Ada, Countess".to_string()]).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "u1,\"Ada, Countess\"\n");
    }
}
