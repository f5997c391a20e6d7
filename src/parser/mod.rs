// txome: Spliced transcriptome construction and reference index caching.
//
// Copyright 2025 Tommi Mäklin [tommi@maklin.fi].
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//

//! Annotation parser.
//!
//! Reads a tab-delimited GTF stream and collects its exon rows into an
//! [Annotation]. Only rows with at least nine columns and the feature type
//! `exon` are used, see [read_gtf_line](gtf::read_gtf_line) for the details of
//! a single row.
//!
//! The whole stream is consumed before the exon lists are sorted, there is no
//! partial result: any read error or malformed exon coordinate aborts the
//! parse.
//!

pub mod gtf;

use crate::annotation::Annotation;
use crate::parser::gtf::read_gtf_line;

use bstr::ByteSlice;

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

type E = Box<dyn std::error::Error>;

#[derive(Debug, Clone)]
pub struct AnnotationError {
    /// 1-based line number in the annotation.
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for AnnotationError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "malformed annotation on line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for AnnotationError {}

/// Read an annotation from something that implements [Read].
///
/// ## Usage
///
/// ```rust
/// use txome::parser::read_annotation;
/// use txome::annotation::Exon;
/// use std::io::Cursor;
///
/// let mut data: Vec<u8> = Vec::new();
/// data.append(&mut b"chr1\tsrc\texon\t300\t400\t.\t+\t.\ttranscript_id \"T1\";\n".to_vec());
/// data.append(&mut b"chr1\tsrc\texon\t100\t200\t.\t+\t.\ttranscript_id \"T1\";\n".to_vec());
/// let mut input = Cursor::new(data);
///
/// let annotation = read_annotation(&mut input).unwrap();
///
/// assert_eq!(annotation.exons("T1_chr1").unwrap(), &[Exon::new(100, 200), Exon::new(300, 400)]);
/// ```
///
pub fn read_annotation<R: Read>(
    conn: &mut R,
) -> Result<Annotation, E> {
    let mut reader = BufReader::new(conn);
    let mut annotation = Annotation::new();

    // invalid UTF-8 is replaced with U+FFFD
    let mut buf: Vec<u8> = Vec::new();
    let mut line_num: usize = 0;
    let mut n_exons: usize = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break
        }
        line_num += 1;
        let line = buf.trim_end_with(|c| c == '\n' || c == '\r').to_str_lossy();
        if let Some(record) = read_gtf_line(&line, line_num)? {
            annotation.add_exon(&record.chromosome, &record.transcript_id, record.strand, record.exon);
            n_exons += 1;
        }
    }

    annotation.finalize();
    log::debug!("Read {} exons in {} transcripts", n_exons, annotation.n_transcripts());

    Ok(annotation)
}

/// Read an annotation from the GTF file at `path`.
///
/// Terminates with the underlying [std::io::Error] if the file cannot be
/// opened.
pub fn read_annotation_file<P: AsRef<Path>>(
    path: P,
) -> Result<Annotation, E> {
    let mut conn = File::open(path.as_ref()).map_err(|e| {
        log::error!("Error opening annotation file '{}'", path.as_ref().display());
        e
    })?;
    read_annotation(&mut conn)
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn read_annotation_non_utf8_comment() {
        use super::read_annotation;
        use crate::annotation::Exon;
        use std::io::Cursor;

        let mut data: Vec<u8> = b"#!author J\xf6rg\n".to_vec();
        data.append(&mut b"chr1\tsrc\tgene\t1\t9\t.\t+\t.\tgene_name \"\xe9\";\n".to_vec());
        data.append(&mut b"chr1\tsrc\texon\t1\t4\t.\t+\t.\ttranscript_id \"T1\";\r\n".to_vec());
        data.append(&mut b"chr1\tsrc\texon\t6\t9\t.\t+\t.\ttranscript_id \"T1\";".to_vec());
        let mut input = Cursor::new(data);

        let got = read_annotation(&mut input).unwrap();

        assert_eq!(got.n_transcripts(), 1);
        assert_eq!(got.exons("T1_chr1").unwrap(), &[Exon::new(1, 4), Exon::new(6, 9)]);
    }

    #[test]
    fn read_annotation_two_exons() {
        use super::read_annotation;
        use crate::annotation::{Exon, Region, Strand};
        use std::io::Cursor;

        let mut data: Vec<u8> = b"chr1\tsrc\texon\t100\t200\t.\t+\t.\ttranscript_id \"T1\";\n".to_vec();
        data.append(&mut b"chr1\tsrc\texon\t300\t400\t.\t+\t.\ttranscript_id \"T1\";\n".to_vec());
        let mut input = Cursor::new(data);

        let got = read_annotation(&mut input).unwrap();

        assert_eq!(got.transcripts_on("chr1").unwrap(), &[("T1_chr1".to_string(), Strand::Forward)]);
        assert_eq!(got.location("T1_chr1").unwrap(), &("chr1".to_string(), Strand::Forward));
        assert_eq!(got.exons("T1_chr1").unwrap(), &[Exon::new(100, 200), Exon::new(300, 400)]);
        assert_eq!(got.regions("T1_chr1").unwrap(), &[Region::new(100, 200), Region::new(300, 400)]);
    }

    #[test]
    fn read_annotation_sorts_exons() {
        use super::read_annotation;
        use std::io::Cursor;

        let mut data: Vec<u8> = b"chr1\tsrc\texon\t900\t950\t.\t-\t.\ttranscript_id \"T1\";\n".to_vec();
        data.append(&mut b"chr1\tsrc\texon\t10\t20\t.\t-\t.\ttranscript_id \"T1\";\n".to_vec());
        data.append(&mut b"chr1\tsrc\texon\t500\t600\t.\t-\t.\ttranscript_id \"T1\";\n".to_vec());
        data.append(&mut b"chr1\tsrc\texon\t30\t40\t.\t-\t.\ttranscript_id \"T2\";\n".to_vec());
        let mut input = Cursor::new(data);

        let got = read_annotation(&mut input).unwrap();

        got.transcript_to_exons().values().for_each(|exons| {
            assert!(exons.windows(2).all(|pair| pair[0].start <= pair[1].start));
        });
        assert_eq!(got.exons("T1_chr1").unwrap()[0].start, 10);
    }

    #[test]
    fn read_annotation_disambiguates_chromosomes() {
        use super::read_annotation;
        use std::io::Cursor;

        let mut data: Vec<u8> = b"chr1\tsrc\texon\t1\t10\t.\t+\t.\ttranscript_id \"T1\";\n".to_vec();
        data.append(&mut b"chr2\tsrc\texon\t1\t10\t.\t+\t.\ttranscript_id \"T1\";\n".to_vec());
        let mut input = Cursor::new(data);

        let got = read_annotation(&mut input).unwrap();

        assert_eq!(got.n_transcripts(), 2);
        assert!(got.exons("T1_chr1").is_some());
        assert!(got.exons("T1_chr2").is_some());
        assert_eq!(got.transcripts_on("chr2").unwrap()[0].0, "T1_chr2");
    }

    #[test]
    fn read_annotation_skips_non_exon_rows() {
        use super::read_annotation;
        use std::io::Cursor;

        let mut data: Vec<u8> = b"#!genome-build test\n".to_vec();
        data.append(&mut b"chr1\tsrc\tgene\t1\t100\t.\t+\t.\tgene_id \"G1\";\n".to_vec());
        data.append(&mut b"chr1\tsrc\ttranscript\t1\t100\t.\t+\t.\tgene_id \"G1\"; transcript_id \"T1\";\n".to_vec());
        data.append(&mut b"chr1\tsrc\texon\t1\t100\n".to_vec());
        let mut input = Cursor::new(data);

        let got = read_annotation(&mut input).unwrap();

        assert!(got.is_empty());
    }

    #[test]
    fn read_annotation_reports_line_of_bad_coordinate() {
        use super::{read_annotation, AnnotationError};
        use std::io::Cursor;

        let mut data: Vec<u8> = b"chr1\tsrc\texon\t1\t10\t.\t+\t.\ttranscript_id \"T1\";\n".to_vec();
        data.append(&mut b"chr1\tsrc\texon\t20\tx\t.\t+\t.\ttranscript_id \"T1\";\n".to_vec());
        let mut input = Cursor::new(data);

        let got = read_annotation(&mut input).unwrap_err();

        assert_eq!(got.downcast_ref::<AnnotationError>().unwrap().line, 2);
    }

    #[test]
    fn read_annotation_file_missing() {
        use super::read_annotation_file;

        let dir = tempfile::tempdir().unwrap();
        let got = read_annotation_file(dir.path().join("missing.gtf"));

        assert!(got.unwrap_err().downcast_ref::<std::io::Error>().is_some());
    }
}
