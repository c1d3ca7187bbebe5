use crate::error::EngineError;
use csv::{ByteRecord, ReaderBuilder};
use shared::models::LedgerRow;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads the ledger export: one header row, `;` between fields by default.
///
/// Parsing of individual values is left to the aggregation layer. This reader only turns
/// lines into rows, so a malformed amount or date never costs a row.
pub struct LedgerCsvParser {
    delimiter: u8,
}

impl Default for LedgerCsvParser {
    fn default() -> Self {
        Self { delimiter: b';' }
    }
}

impl LedgerCsvParser {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    // CSV Header: ...;DEPARTAMENTO;NATUREZA;VALOR DEPARTAMENTO;DT. PAGO;...
    // Example Row: ...;FINANCEIRO;ALUGUEL;1.234,56;05/03/2024;...
    pub fn load_rows_from_csv(&self, file_path: impl AsRef<Path>) -> Result<Vec<LedgerRow>, EngineError> {
        let file_path = file_path.as_ref();
        let file = File::open(file_path)?;
        let rows = self.read_rows(BufReader::new(file))?;
        tracing::info!(path = %file_path.display(), rows = rows.len(), "Loaded ledger export");
        Ok(rows)
    }

    pub fn read_rows<R: Read>(&self, reader: R) -> Result<Vec<LedgerRow>, EngineError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true) // short rows are kept; their missing columns are simply absent
            .from_reader(reader);

        let headers = unique_headers(
            rdr.byte_headers()?
                .iter()
                .map(|h| clean_header(&String::from_utf8_lossy(h))),
        );
        tracing::debug!(?headers, "Read ledger header");

        let mut rows = Vec::new();
        let mut record = ByteRecord::new();
        while rdr.read_byte_record(&mut record)? {
            if is_blank(&record) {
                continue;
            }
            // Exports from older systems are often Latin-1; keep the row rather than fail.
            let mut fields: Vec<(String, String)> = headers
                .iter()
                .zip(record.iter())
                .map(|(name, value)| (name.clone(), decode(value).into_owned()))
                .collect();
            if record.len() > headers.len() {
                let extra: Vec<Cow<'_, str>> = record.iter().skip(headers.len()).map(decode).collect();
                tracing::debug!(extra = extra.len(), "Row has more cells than the header");
                fields.push((EXTRA_FIELDS.to_string(), extra.join(self.separator().as_str())));
            }
            rows.push(LedgerRow::new(fields));
        }
        Ok(rows)
    }

    fn separator(&self) -> String {
        char::from(self.delimiter).to_string()
    }
}

/// Cells past the last header, joined with the delimiter.
pub const EXTRA_FIELDS: &str = "__parsed_extra";

// Repeated header names get a numeric suffix so no column overwrites another:
// VALOR;VALOR;VALOR -> VALOR, VALOR_1, VALOR_2.
fn unique_headers(headers: impl Iterator<Item = String>) -> Vec<String> {
    let headers: Vec<String> = headers.collect();
    let mut taken: HashSet<String> = headers.iter().cloned().collect();
    let mut seen = HashSet::new();
    headers
        .into_iter()
        .map(|name| {
            if seen.insert(name.clone()) {
                return name;
            }
            let mut suffix = 1;
            let mut candidate = format!("{}_{}", name, suffix);
            while taken.contains(&candidate) {
                suffix += 1;
                candidate = format!("{}_{}", name, suffix);
            }
            taken.insert(candidate.clone());
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

// Header names are trimmed, including a UTF-8 byte order mark on the first column.
fn clean_header(header: &str) -> String {
    header
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_string()
}

fn is_blank(record: &ByteRecord) -> bool {
    record.len() == 1 && record.get(0).map_or(true, |f| f.is_empty())
}
