//! Streaming FASTA record scanner.

use crate::core::error::ScanError;
use crate::core::model::SequenceRecord;
use std::io::BufRead;

const UTF8_BOM: char = '\u{feff}';

/// Lazily yields the records of one FASTA stream.
///
/// Takes the reader by value: the stream is released when the iterator is exhausted,
/// fails, or is dropped early. After the first error the iterator is fused.
pub struct FastaRecords<R> {
    reader: R,
    line: Vec<u8>,
    line_no: u64,
    pending_id: Option<String>,
    done: bool,
}

impl<R: BufRead> FastaRecords<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::with_capacity(256),
            line_no: 0,
            pending_id: None,
            done: false,
        }
    }

    fn scan_record(&mut self) -> Result<Option<SequenceRecord>, ScanError> {
        let mut seq = String::new();
        loop {
            self.line.clear();
            let n = self
                .reader
                .read_until(b'\n', &mut self.line)
                .map_err(|source| ScanError::Io {
                    line: self.line_no + 1,
                    source,
                })?;
            if n == 0 {
                return Ok(self.pending_id.take().map(|id| SequenceRecord { id, seq }));
            }
            self.line_no += 1;

            if memchr::memchr(0, &self.line).is_some() {
                return Err(ScanError::Binary { line: self.line_no });
            }
            let mut text = std::str::from_utf8(&self.line)
                .map_err(|_| ScanError::Binary { line: self.line_no })?;
            if self.line_no == 1 {
                text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
            }
            let text = text.trim_ascii();
            if text.is_empty() {
                continue;
            }

            if let Some(header) = text.strip_prefix('>') {
                let id = header
                    .split_ascii_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_string();
                match self.pending_id.replace(id) {
                    Some(prev) => return Ok(Some(SequenceRecord { id: prev, seq })),
                    None => continue,
                }
            }

            if self.pending_id.is_none() {
                return Err(ScanError::MissingHeader { line: self.line_no });
            }
            seq.push_str(text);
        }
    }
}

impl<R: BufRead> Iterator for FastaRecords<R> {
    type Item = Result<SequenceRecord, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.scan_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::{self, Cursor, Read};

    fn scan(input: &[u8]) -> Result<Vec<SequenceRecord>, ScanError> {
        FastaRecords::new(Cursor::new(input.to_vec())).collect()
    }

    fn record(id: &str, seq: &str) -> SequenceRecord {
        SequenceRecord {
            id: id.to_string(),
            seq: seq.to_string(),
        }
    }

    #[test]
    fn test_multiline_records() {
        let records = scan(b">c1 len=8\nACGT\nacgt\n>c2\nNNNN\n").unwrap();
        assert_eq!(records, vec![record("c1", "ACGTacgt"), record("c2", "NNNN")]);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let records = scan(b"\r\n>c1\r\nAC\r\n\r\nGT\r\n>c2\r\n").unwrap();
        assert_eq!(records, vec![record("c1", "ACGT"), record("c2", "")]);
    }

    #[test]
    fn test_missing_trailing_newline() {
        let records = scan(b">only\nGGCC").unwrap();
        assert_eq!(records, vec![record("only", "GGCC")]);
    }

    #[test]
    fn test_leading_bom_is_ignored() {
        let records = scan("\u{feff}>c1\nAT\n".as_bytes()).unwrap();
        assert_eq!(records, vec![record("c1", "AT")]);
    }

    #[test]
    fn test_empty_header_gives_empty_id() {
        let records = scan(b">\nAT\n").unwrap();
        assert_eq!(records, vec![record("", "AT")]);
    }

    #[rstest]
    #[case(b"", "empty stream")]
    #[case(b"\n\n  \n", "blank lines only")]
    fn test_no_records(#[case] input: &[u8], #[case] description: &str) {
        assert!(scan(input).unwrap().is_empty(), "{description}");
    }

    #[rstest]
    #[case(b"hello world\n", 1, "plain text")]
    #[case(b"@read1\nACGT\n+\nIIII\n", 1, "fastq")]
    #[case(b"\nACGT\n>c1\nAC\n", 2, "sequence before header")]
    #[case(b"; assembly v2\n>c1\nAC\n", 1, "comment preamble")]
    fn test_missing_header(#[case] input: &[u8], #[case] line: u64, #[case] description: &str) {
        match scan(input) {
            Err(ScanError::MissingHeader { line: l }) => assert_eq!(l, line, "{description}"),
            other => panic!("{description}: expected MissingHeader, got {other:?}"),
        }
    }

    #[rstest]
    #[case(&[b'>', b'c', b'\n', 0x00, 0x01, b'\n'], "nul byte")]
    #[case(&[b'>', b'c', b'\n', 0xff, 0xfe, b'\n'], "invalid utf-8")]
    fn test_binary_content(#[case] input: &[u8], #[case] description: &str) {
        assert!(
            matches!(scan(input), Err(ScanError::Binary { line: 2 })),
            "{description}"
        );
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::InvalidData, "corrupt deflate stream"))
        }
    }

    #[test]
    fn test_reader_error_is_reported_once() {
        let mut records = FastaRecords::new(io::BufReader::new(FailingReader));
        assert!(matches!(records.next(), Some(Err(ScanError::Io { line: 1, .. }))));
        assert!(records.next().is_none());
    }

    #[test]
    fn test_records_are_lazy() {
        let input = b">a\nAC\n>b\nGT\n\xff\n";
        let mut records = FastaRecords::new(Cursor::new(&input[..]));
        assert_eq!(records.next().unwrap().unwrap(), record("a", "AC"));
        assert!(matches!(records.next(), Some(Err(ScanError::Binary { line: 5 }))));
    }
}
