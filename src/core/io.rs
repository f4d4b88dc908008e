//! Input decoding: decides whether a file is gzip-compressed and hands back one buffered
//! byte stream either way.

use flate2::read::MultiGzDecoder;
use gzp::deflate::{Bgzf, Mgzip};
use gzp::par::decompress::ParDecompressBuilder;
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::Path;

/// Decoded text stream. Owned by the caller and closed on drop.
pub type DecodedStream = Box<dyn BufRead + Send>;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const GZIP_READ_BUF: usize = 1024 * 1024;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputKind {
    Plain,
    Gzip,
}

impl InputKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InputKind::Plain => "plain",
            InputKind::Gzip => "gzip",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GzipVariant {
    Standard,
    Mgzip,
    Bgzf,
}

pub struct DecodedInput {
    pub kind: InputKind,
    pub stream: DecodedStream,
}

/// Opens `path` once and returns a decoded stream over its contents.
///
/// The header is peeked from the read buffer rather than consumed, so the plain-text branch
/// sees the file from its first byte. Gzip input is checked by decoding one buffer; a decode
/// failure is not reported here but replayed by the returned stream, so the record scanner
/// surfaces it as a format problem. Errors returned directly are open/read failures.
pub fn open_decoded(path: &Path, decompress_threads: usize) -> io::Result<DecodedInput> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let header = reader.fill_buf()?;

    if !header.starts_with(&GZIP_MAGIC) {
        let stream = open_plain(reader.into_inner())?;
        return Ok(DecodedInput {
            kind: InputKind::Plain,
            stream,
        });
    }

    let variant = detect_gzip_variant(header);
    let stream = open_gzip(reader, variant, decompress_threads)?;
    Ok(DecodedInput {
        kind: InputKind::Gzip,
        stream: check_first_block(stream),
    })
}

fn open_plain(file: File) -> io::Result<DecodedStream> {
    if file.metadata()?.len() == 0 {
        return Ok(Box::new(io::empty()));
    }
    // SAFETY: read-only file mapping.
    let mmap = unsafe { Mmap::map(&file) }?;
    Ok(Box::new(Cursor::new(mmap)))
}

fn detect_gzip_variant(header: &[u8]) -> GzipVariant {
    if header.len() < 14 {
        return GzipVariant::Standard;
    }
    if header[3] & 4 == 0 {
        return GzipVariant::Standard;
    }
    match (header[12], header[13]) {
        (b'B', b'C') => GzipVariant::Bgzf,
        (b'I', b'G') => GzipVariant::Mgzip,
        _ => GzipVariant::Standard,
    }
}

fn open_gzip(
    reader: BufReader<File>,
    variant: GzipVariant,
    threads: usize,
) -> io::Result<DecodedStream> {
    let decoder: Box<dyn Read + Send> = match variant {
        GzipVariant::Bgzf if threads > 1 => Box::new(
            ParDecompressBuilder::<Bgzf>::new()
                .num_threads(threads)
                .map_err(io::Error::other)?
                .from_reader(reader),
        ),
        GzipVariant::Mgzip if threads > 1 => Box::new(
            ParDecompressBuilder::<Mgzip>::new()
                .num_threads(threads)
                .map_err(io::Error::other)?
                .from_reader(reader),
        ),
        _ => Box::new(MultiGzDecoder::new(reader)),
    };
    Ok(Box::new(BufReader::with_capacity(GZIP_READ_BUF, decoder)))
}

/// Decodes the first buffer. If that fails the stream is replaced by one that keeps
/// reporting the same error.
fn check_first_block(mut stream: DecodedStream) -> DecodedStream {
    match stream.fill_buf() {
        Ok(_) => stream,
        Err(e) => {
            log::debug!("gzip decode failed on first block: {e}");
            Box::new(FailedStream {
                kind: e.kind(),
                message: e.to_string(),
            })
        }
    }
}

struct FailedStream {
    kind: io::ErrorKind,
    message: String,
}

impl FailedStream {
    fn error(&self) -> io::Error {
        io::Error::new(self.kind, self.message.clone())
    }
}

impl Read for FailedStream {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(self.error())
    }
}

impl BufRead for FailedStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Err(self.error())
    }

    fn consume(&mut self, _amt: usize) {}
}
