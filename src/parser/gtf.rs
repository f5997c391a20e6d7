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
use crate::annotation::Exon;
use crate::annotation::Strand;
use crate::parser::AnnotationError;

type E = Box<dyn std::error::Error>;

/// Column holding the feature type.
const FEATURE_COLUMN: usize = 2;
/// Minimum number of tab-separated columns in a usable row.
const MIN_COLUMNS: usize = 9;

/// Exon row read from one line of a [GTF](https://mblab.wustl.edu/GTF22.html) file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExonRecord {
    /// First whitespace-separated token of the seqname column.
    pub chromosome: String,
    /// Value of the `transcript_id` attribute.
    pub transcript_id: String,
    pub strand: Strand,
    pub exon: Exon,
}

/// Extract the value of the `transcript_id` attribute.
///
/// Attributes are `;` separated `key value` clauses. The value is the text
/// between the first pair of double quotes, or the bare value if it is not
/// quoted.
///
/// Returns None if there is no `transcript_id` clause or its value is empty.
///
/// ## Usage
///
/// ```rust
/// use txome::parser::gtf::transcript_id;
///
/// let attributes = "gene_id \"G1\"; transcript_id \"T1\"; exon_number \"1\";";
/// assert_eq!(transcript_id(attributes), Some("T1"));
/// assert_eq!(transcript_id("gene_id \"G1\";"), None);
/// ```
///
pub fn transcript_id(
    attributes: &str,
) -> Option<&str> {
    for clause in attributes.split(';') {
        let Some((key, value)) = clause.trim().split_once(' ') else {
            continue
        };
        if key != "transcript_id" {
            continue
        }
        let value = value.trim();
        let id = if value.contains('"') {
            value.split('"').nth(1).unwrap_or("")
        } else {
            value
        };
        return if id.is_empty() { None } else { Some(id) }
    }
    None
}

fn parse_coordinate(
    field: &str,
    line_num: usize,
) -> Result<u64, E> {
    field.trim().parse::<u64>().map_err(|_| {
        Box::new(AnnotationError {
            line: line_num,
            message: format!("invalid exon coordinate '{}'", field),
        }) as E
    })
}

/// Parse a line from a GTF file.
///
/// Lines with fewer than nine tab-separated columns, lines whose feature type
/// is not `exon`, and exon lines without a `transcript_id` are skipped and
/// return Ok(None).
///
/// Terminates with an [AnnotationError] if the start or end column of an exon
/// line is not an integer.
///
pub fn read_gtf_line(
    line: &str,
    line_num: usize,
) -> Result<Option<ExonRecord>, E> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < MIN_COLUMNS || fields[FEATURE_COLUMN] != "exon" {
        return Ok(None)
    }

    let chromosome = fields[0].split_whitespace().next().unwrap_or("");
    let Some(transcript_id) = transcript_id(fields[8]) else {
        log::debug!("Skipping exon without transcript_id on line {}", line_num);
        return Ok(None)
    };

    let start = parse_coordinate(fields[3], line_num)?;
    let end = parse_coordinate(fields[4], line_num)?;

    Ok(Some(ExonRecord {
        chromosome: chromosome.to_string(),
        transcript_id: transcript_id.to_string(),
        strand: Strand::from_field(fields[6]),
        exon: Exon::new(start, end),
    }))
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn read_gtf_line_exon() {
        use super::{read_gtf_line, ExonRecord};
        use crate::annotation::{Exon, Strand};

        let line = "chr1\tsrc\texon\t100\t200\t.\t+\t.\tgene_id \"G1\"; transcript_id \"T1\";";
        let expected = ExonRecord {
            chromosome: "chr1".to_string(),
            transcript_id: "T1".to_string(),
            strand: Strand::Forward,
            exon: Exon::new(100, 200),
        };

        let got = read_gtf_line(line, 1).unwrap().unwrap();

        assert_eq!(got, expected);
    }

    #[test]
    fn read_gtf_line_trims_chromosome() {
        use super::read_gtf_line;
        use crate::annotation::Strand;

        let line = "chr2 assembled\tsrc\texon\t5\t9\t.\t-\t.\ttranscript_id \"T9\";";
        let got = read_gtf_line(line, 1).unwrap().unwrap();

        assert_eq!(got.chromosome, "chr2");
        assert_eq!(got.strand, Strand::Reverse);
    }

    #[test]
    fn read_gtf_line_skips_other_features() {
        use super::read_gtf_line;

        let gene = "chr1\tsrc\tgene\t100\t400\t.\t+\t.\tgene_id \"G1\";";
        let cds = "chr1\tsrc\tCDS\t100\t200\t.\t+\t0\ttranscript_id \"T1\";";

        assert!(read_gtf_line(gene, 1).unwrap().is_none());
        assert!(read_gtf_line(cds, 2).unwrap().is_none());
    }

    #[test]
    fn read_gtf_line_skips_short_rows() {
        use super::read_gtf_line;

        let line = "chr1\tsrc\texon\t100\t200\t.\t+\t.";

        assert!(read_gtf_line(line, 1).unwrap().is_none());
        assert!(read_gtf_line("", 2).unwrap().is_none());
        assert!(read_gtf_line("#!genome-build GRCh38", 3).unwrap().is_none());
    }

    #[test]
    fn read_gtf_line_skips_missing_transcript_id() {
        use super::read_gtf_line;

        let line = "chr1\tsrc\texon\t100\t200\t.\t+\t.\tgene_id \"G1\";";

        assert!(read_gtf_line(line, 1).unwrap().is_none());
    }

    #[test]
    fn read_gtf_line_invalid_coordinate() {
        use super::read_gtf_line;
        use crate::parser::AnnotationError;

        let line = "chr1\tsrc\texon\tabc\t200\t.\t+\t.\ttranscript_id \"T1\";";
        let got = read_gtf_line(line, 7);

        assert!(got.is_err());
        let err = got.unwrap_err();
        let err = err.downcast_ref::<AnnotationError>().unwrap();
        assert_eq!(err.line, 7);
    }

    #[test]
    fn transcript_id_variants() {
        use super::transcript_id;

        assert_eq!(transcript_id("transcript_id \"T1\""), Some("T1"));
        assert_eq!(transcript_id("  transcript_id   \"T1\"  ;gene_id \"G\""), Some("T1"));
        assert_eq!(transcript_id("transcript_id T2;"), Some("T2"));
        assert_eq!(transcript_id("gene_id \"G1\"; transcript_id \"\";"), None);
        assert_eq!(transcript_id("transcript_name \"T1\";"), None);
        assert_eq!(transcript_id(""), None);
    }
}
