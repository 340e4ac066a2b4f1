//! CSV ingest for book imports.
//!
//! Turns the text of an uploaded `title;stock` file into an [`ImportBatch`].
//! Parsing never rejects a row for its content: typing and business rules
//! belong to the server. The only failures here are an unreadable source and
//! undecodable bytes.

use thiserror::Error;

use crate::models::{CandidateRecord, ImportBatch};

/// Field separator of uploaded files and of the template.
pub const FIELD_DELIMITER: char = ';';

/// Content of the downloadable template: the header line only.
pub const TEMPLATE_CSV: &str = "title;stock";

/// File name offered for the template download.
pub const TEMPLATE_FILE_NAME: &str = "TemplateCsv.csv";

pub const TEMPLATE_MIME: &str = "text/csv;charset=utf-8";

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

const TITLE_COLUMN: &str = "title";
const STOCK_COLUMN: &str = "stock";

/// Errors while reading an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The medium could not be read (device or permission failure).
    #[error("The file could not be read: {0}")]
    Unreadable(String),

    /// Bytes could not be decoded as text.
    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// Result of parsing a file, with the metadata shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    pub batch: ImportBatch,
    /// Detected encoding
    pub encoding: String,
    /// Header names as read from the first line
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the given encoding.
///
/// Unknown encodings fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> Result<String, ParseError> {
    let text = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => String::from_utf8_lossy(bytes).into_owned(),
        },
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.into_owned()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        other => match encoding_rs::Encoding::for_label(other.as_bytes()) {
            Some(enc) => {
                let (text, _, had_errors) = enc.decode(bytes);
                if had_errors {
                    return Err(ParseError::Encoding(format!(
                        "content is not valid {}",
                        enc.name()
                    )));
                }
                text.into_owned()
            }
            None => String::from_utf8_lossy(bytes).into_owned(),
        },
    };
    Ok(text)
}

/// Parse raw file bytes.
///
/// Valid UTF-8 (with or without a BOM) is taken as is; chardet only guesses
/// for bytes that are not UTF-8.
pub fn parse_import_bytes(bytes: &[u8]) -> Result<ParsedFile, ParseError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let (encoding, content) = match std::str::from_utf8(bytes) {
        Ok(text) => ("utf-8".to_string(), text.to_string()),
        Err(_) => {
            let encoding = detect_encoding(bytes);
            let content = decode_content(bytes, &encoding)?;
            (encoding, content)
        }
    };
    let (headers, batch) = split_rows(&content);

    Ok(ParsedFile {
        batch,
        encoding,
        headers,
    })
}

/// Parse the text of an uploaded file into an import batch.
///
/// # Example
/// ```
/// use bookstock_contracts::parse_import_text;
///
/// let batch = parse_import_text("title;stock\r\nDune;5\nEmma;2\n");
/// assert_eq!(batch.len(), 2);
/// assert_eq!(batch.records()[1].title.as_deref(), Some("Emma"));
/// ```
pub fn parse_import_text(content: &str) -> ImportBatch {
    split_rows(content).1
}

fn split_rows(content: &str) -> (Vec<String>, ImportBatch) {
    // `lines()` accepts both `\n` and `\r\n`.
    let mut rows = content
        .lines()
        .map(|line| line.split(FIELD_DELIMITER).collect::<Vec<_>>())
        .filter(|fields| fields.len() > 1);

    let headers: Vec<String> = match rows.next() {
        Some(fields) => fields.iter().map(|h| clean_header(h)).collect(),
        None => return (Vec::new(), ImportBatch::default()),
    };

    let title_idx = column_index(&headers, TITLE_COLUMN);
    let stock_idx = column_index(&headers, STOCK_COLUMN);

    let records = rows
        .map(|cols| CandidateRecord {
            title: cell(&cols, title_idx),
            stock: cell(&cols, stock_idx),
        })
        .collect();

    (headers, ImportBatch::new(records))
}

fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .trim()
        .trim_matches('"')
        .to_string()
}

fn column_index(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

fn cell(cols: &[&str], idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| cols.get(i)).map(|v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_file() {
        let batch = parse_import_text("title;stock\nDune;5\nEmma;2");

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.records()[0], CandidateRecord::new("Dune", "5"));
        assert_eq!(batch.records()[1], CandidateRecord::new("Emma", "2"));
    }

    #[test]
    fn test_crlf_and_trailing_blank_lines() {
        let batch = parse_import_text("title;stock\r\nDune;5\r\n\r\nEmma;2\r\n\r\n");

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.records()[1].stock.as_deref(), Some("2"));
    }

    #[test]
    fn test_template_yields_empty_batch() {
        let parsed = parse_import_bytes(TEMPLATE_CSV.as_bytes()).unwrap();

        assert!(parsed.batch.is_empty());
        assert_eq!(parsed.headers, vec!["title", "stock"]);
    }

    #[test]
    fn test_single_field_lines_dropped() {
        // A line without a delimiter is not a row, even in the middle.
        let batch = parse_import_text("title;stock\nDune;5\njunk\nEmma;2");
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn test_header_order_is_positional() {
        let batch = parse_import_text("stock;title\n5;Dune");
        assert_eq!(batch.records()[0], CandidateRecord::new("Dune", "5"));
    }

    #[test]
    fn test_short_row_has_missing_trailing_field() {
        let batch = parse_import_text("title;extra;stock\nDune;x\n");

        assert_eq!(batch.records()[0].title.as_deref(), Some("Dune"));
        assert_eq!(batch.records()[0].stock, None);
    }

    #[test]
    fn test_values_kept_raw() {
        let batch = parse_import_text("title;stock\n  Dune ; 5.5");
        assert_eq!(batch.records()[0], CandidateRecord::new("  Dune ", " 5.5"));
    }

    #[test]
    fn test_header_cleanup() {
        let batch = parse_import_text("\u{feff}\"Title\"; STOCK \nDune;5");
        assert_eq!(batch.records()[0], CandidateRecord::new("Dune", "5"));
    }

    #[test]
    fn test_empty_content() {
        assert!(parse_import_text("").is_empty());
        assert!(parse_import_text("\n\n").is_empty());
    }

    #[test]
    fn test_row_order_preserved() {
        let content = (0..50)
            .map(|i| format!("Book {i};{i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let batch = parse_import_text(&format!("title;stock\n{content}"));

        assert_eq!(batch.len(), 50);
        for (i, rec) in batch.iter().enumerate() {
            assert_eq!(rec.stock.as_deref(), Some(i.to_string().as_str()));
        }
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_utf8_accents_kept() {
        let content = "title;stock\nLes Misérables;3\nÀ rebours;1\nDer Zauberberg für Kinder;2\n";
        let parsed = parse_import_bytes(content.as_bytes()).unwrap();

        assert_eq!(parsed.encoding, "utf-8");
        let titles: Vec<_> = parsed
            .batch
            .iter()
            .map(|r| r.title.clone().unwrap_or_default())
            .collect();
        assert_eq!(titles, vec!["Les Misérables", "À rebours", "Der Zauberberg für Kinder"]);
    }

    #[test]
    fn test_utf8_bom_bytes() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("title;stock\nÉmile;4\n".as_bytes());
        let parsed = parse_import_bytes(&bytes).unwrap();

        assert_eq!(parsed.encoding, "utf-8");
        assert_eq!(parsed.headers, vec!["title", "stock"]);
        assert_eq!(parsed.batch.records()[0].title.as_deref(), Some("Émile"));
    }

    #[test]
    fn test_latin1_bytes_still_detected() {
        // "title;stock\nSociété;3" in ISO-8859-1 is not valid UTF-8
        let mut bytes = b"title;stock\nSoci".to_vec();
        bytes.extend_from_slice(&[0xE9, b't', 0xE9, b';', b'3']);
        match parse_import_bytes(&bytes) {
            Ok(parsed) => {
                assert_ne!(parsed.encoding, "utf-8");
                assert_eq!(parsed.batch.len(), 1);
            }
            Err(e) => assert!(matches!(e, ParseError::Encoding(_))),
        }
    }
}
