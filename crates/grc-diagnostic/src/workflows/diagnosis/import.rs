use super::bank::QuestionBank;
use super::domain::{QuestionId, ResponseError, ResponseSet};
use std::io::Read;
use std::path::Path;

const QUESTION_COLUMN: &str = "question_id";
const VALUE_COLUMN: &str = "value";

/// Raised while loading answers from a `question_id,value` CSV export.
///
/// Row numbers are file lines, so the header is line 1.
#[derive(Debug, thiserror::Error)]
pub enum ResponseImportError {
    #[error("failed to read responses: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid responses CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("responses CSV is missing the `{0}` column")]
    MissingColumn(&'static str),
    #[error("row {row}: `{cell}` is not a valid {column}")]
    Unparseable {
        row: u64,
        column: &'static str,
        cell: String,
    },
    #[error("row {row}: {source}")]
    Rejected {
        row: u64,
        #[source]
        source: ResponseError,
    },
}

pub fn import_responses_from_path<P: AsRef<Path>>(
    path: P,
    bank: &QuestionBank,
) -> Result<ResponseSet, ResponseImportError> {
    let file = std::fs::File::open(path)?;
    import_responses(file, bank)
}

/// Later rows for the same question replace earlier ones.
pub fn import_responses<R: Read>(
    reader: R,
    bank: &QuestionBank,
) -> Result<ResponseSet, ResponseImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let question_column = column_index(&headers, QUESTION_COLUMN)?;
    let value_column = column_index(&headers, VALUE_COLUMN)?;

    let mut responses = ResponseSet::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = record
            .position()
            .map(csv::Position::line)
            .unwrap_or(index as u64 + 2);

        let raw_id = record.get(question_column).unwrap_or_default();
        let id = parse_question_id(raw_id).ok_or_else(|| ResponseImportError::Unparseable {
            row,
            column: QUESTION_COLUMN,
            cell: raw_id.to_string(),
        })?;

        let raw_value = record.get(value_column).unwrap_or_default();
        let value = raw_value
            .parse::<u8>()
            .map_err(|_| ResponseImportError::Unparseable {
                row,
                column: VALUE_COLUMN,
                cell: raw_value.to_string(),
            })?;

        bank.check_answer(id, value)
            .map_err(|source| ResponseImportError::Rejected { row, source })?;
        responses.record(id, value);
    }

    Ok(responses)
}

fn column_index(
    headers: &csv::StringRecord,
    column: &'static str,
) -> Result<usize, ResponseImportError> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(column))
        .ok_or(ResponseImportError::MissingColumn(column))
}

/// Accepts `7` as well as the display form `Q7`.
fn parse_question_id(raw: &str) -> Option<QuestionId> {
    let digits = raw
        .strip_prefix('Q')
        .or_else(|| raw.strip_prefix('q'))
        .unwrap_or(raw);
    digits.parse::<u16>().ok().map(QuestionId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn import(data: &str) -> Result<ResponseSet, ResponseImportError> {
        import_responses(Cursor::new(data), QuestionBank::standard())
    }

    #[test]
    fn imports_trimmed_rows_and_keeps_last_value() {
        let responses = import("question_id, value\n1, 2\nQ4,3\n1,0\n").expect("import succeeds");
        assert_eq!(responses.len(), 2);
        assert_eq!(responses.get(QuestionId(1)), Some(0));
        assert_eq!(responses.get(QuestionId(4)), Some(3));
    }

    #[test]
    fn header_only_yields_empty_set() {
        let responses = import("question_id,value\n").expect("import succeeds");
        assert!(responses.is_empty());
    }

    #[test]
    fn reports_unknown_question_with_row() {
        let err = import("question_id,value\n1,2\n42,1\n").expect_err("unknown id");
        match err {
            ResponseImportError::Rejected { row, source } => {
                assert_eq!(row, 3);
                assert_eq!(source, ResponseError::UnknownQuestion(QuestionId(42)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn reports_out_of_range_value() {
        let err = import("question_id,value\n2,7\n").expect_err("invalid option");
        assert!(matches!(
            err,
            ResponseImportError::Rejected {
                row: 2,
                source: ResponseError::InvalidOption { value: 7, .. }
            }
        ));
    }

    #[test]
    fn reports_non_numeric_cells() {
        let err = import("question_id,value\n3,alto\n").expect_err("non numeric");
        assert!(matches!(
            err,
            ResponseImportError::Unparseable {
                row: 2,
                column: VALUE_COLUMN,
                ..
            }
        ));
        assert!(err.to_string().contains("alto"));
    }

    #[test]
    fn requires_both_columns() {
        let err = import("id,value\n1,2\n").expect_err("missing column");
        assert!(matches!(
            err,
            ResponseImportError::MissingColumn(QUESTION_COLUMN)
        ));
    }
}
