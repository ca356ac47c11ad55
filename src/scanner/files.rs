//! Format-sniffing file processor
//!
//! Content is classified by magic bytes rather than file extension, which
//! handles extensionless files (`.git/logs/HEAD`, `email`) and misnamed
//! archives correctly. Plain text and gzip streams are line-scanned; zip
//! archives are buffered and their entries processed recursively, so nested
//! archives work transparently. Video and bzip2 content is skipped outright
//! since binary noise produces meaningless matches.

use crate::detector::MatchFinder;
use crate::domain::Result;
use flate2::read::GzDecoder;
use std::io::{BufRead, BufReader, Cursor, Read};

/// Lines longer than this are truncated; the truncated prefix is still
/// scanned and counted, the remainder of the line is discarded.
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

// 261 bytes is enough for every magic-byte matcher
const SNIFF_BYTES: usize = 261;

/// Sniff a stream and feed its text content into the finder
///
/// Empty streams produce no findings and no error.
pub fn process_file<R: Read>(mut reader: R, finder: &mut MatchFinder) -> Result<()> {
    let mut head = [0u8; SNIFF_BYTES];
    let mut filled = 0;
    while filled < head.len() {
        let n = reader.read(&mut head[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    let head = &head[..filled];

    if let Some(kind) = infer::get(head) {
        let mime = kind.mime_type();
        if kind.matcher_type() == infer::MatcherType::Video || mime == "application/x-bzip2" {
            tracing::debug!(mime, "Skipping binary content");
            return Ok(());
        }
        if mime == "application/zip" {
            // the archive reader needs random access
            let mut data = head.to_vec();
            reader.read_to_end(&mut data)?;
            return process_zip(&data, finder);
        }
        if mime == "application/gzip" {
            let stream = Cursor::new(head.to_vec()).chain(reader);
            return scan_lines(GzDecoder::new(stream), finder);
        }
    }

    scan_lines(Cursor::new(head.to_vec()).chain(reader), finder)
}

fn process_zip(data: &[u8], finder: &mut MatchFinder) -> Result<()> {
    let mut archive = match zip::ZipArchive::new(Cursor::new(data)) {
        Ok(archive) => archive,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable zip archive, skipping");
            return Ok(());
        }
    };

    for i in 0..archive.len() {
        let mut entry = match archive.by_index(i) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, index = i, "Unreadable archive entry, skipping");
                continue;
            }
        };
        if entry.is_dir() {
            continue;
        }

        let mut contents = Vec::new();
        if let Err(e) = entry.read_to_end(&mut contents) {
            tracing::warn!(error = %e, entry = entry.name(), "Truncated archive entry, skipping");
            continue;
        }
        process_file(Cursor::new(contents), finder)?;
    }

    Ok(())
}

fn scan_lines<R: Read>(reader: R, finder: &mut MatchFinder) -> Result<()> {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::with_capacity(8 * 1024);

    loop {
        buf.clear();
        let n = reader
            .by_ref()
            .take(MAX_LINE_BYTES as u64 + 1)
            .read_until(b'\n', &mut buf)?;
        if n == 0 {
            break;
        }

        if buf.len() > MAX_LINE_BYTES && !buf.ends_with(b"\n") {
            buf.truncate(MAX_LINE_BYTES);
            skip_to_newline(&mut reader)?;
        }
        while matches!(buf.last(), Some(b'\n') | Some(b'\r')) {
            buf.pop();
        }

        let line = String::from_utf8_lossy(&buf);
        finder.scan_line(&line);
    }

    Ok(())
}

fn skip_to_newline<R: BufRead>(reader: &mut R) -> std::io::Result<()> {
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            return Ok(());
        }
        match available.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                reader.consume(pos + 1);
                return Ok(());
            }
            None => {
                let len = available.len();
                reader.consume(len);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::MatchConfig;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use std::sync::Arc;
    use zip::write::FileOptions;

    fn finder() -> MatchFinder {
        MatchFinder::new(Arc::new(MatchConfig::default()))
    }

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn zip_archive(name: &str, data: &[u8]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file(name, FileOptions::default()).unwrap();
        writer.write_all(data).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_plain_text() {
        let mut finder = finder();
        process_file(Cursor::new(b"test@example.org\nplain line\n".to_vec()), &mut finder)
            .unwrap();
        assert_eq!(finder.count(), 2);
        let matches = finder.check_matches("email.txt", true);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].rule_name, "email");
    }

    #[test]
    fn test_empty_stream() {
        let mut finder = finder();
        process_file(Cursor::new(Vec::new()), &mut finder).unwrap();
        assert_eq!(finder.count(), 0);
        assert!(finder.check_matches("empty.txt", true).is_empty());
    }

    #[test]
    fn test_crlf_lines() {
        let mut finder = finder();
        process_file(Cursor::new(b"test@example.org\r\n".to_vec()), &mut finder).unwrap();
        let matches = finder.check_matches("email.txt", true);
        assert_eq!(matches[0].matched_data, vec!["test@example.org"]);
    }

    #[test]
    fn test_gzip_stream() {
        let mut finder = finder();
        let data = gzip(b"test@example.org\n");
        process_file(Cursor::new(data), &mut finder).unwrap();
        let matches = finder.check_matches("email.txt.gz", true);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].rule_name, "email");
    }

    #[test]
    fn test_zip_archive() {
        let mut finder = finder();
        let data = zip_archive("email.txt", b"test@example.org\n");
        process_file(Cursor::new(data), &mut finder).unwrap();
        let matches = finder.check_matches("email.zip", true);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].rule_name, "email");
    }

    #[test]
    fn test_nested_gzip_in_zip() {
        let mut finder = finder();
        let inner = gzip(b"test@example.org\n");
        let data = zip_archive("email.txt.gz", &inner);
        process_file(Cursor::new(data), &mut finder).unwrap();
        let matches = finder.check_matches("email.zip", true);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].rule_name, "email");
    }

    #[test]
    fn test_bzip2_is_skipped() {
        let mut finder = finder();
        // bzip2 magic followed by junk that would otherwise line-scan
        let mut data = b"BZh9".to_vec();
        data.extend_from_slice(b"test@example.org\n");
        process_file(Cursor::new(data), &mut finder).unwrap();
        assert_eq!(finder.count(), 0);
    }

    #[test]
    fn test_corrupt_zip_yields_no_findings() {
        let mut finder = finder();
        // zip magic with a garbage body
        let mut data = b"PK\x03\x04".to_vec();
        data.extend_from_slice(&[0u8; 64]);
        process_file(Cursor::new(data), &mut finder).unwrap();
        assert_eq!(finder.count(), 0);
    }
}
