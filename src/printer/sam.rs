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
use std::io::Write;
use std::num::NonZeroUsize;

use bstr::BString;
use indexmap::map::IndexMap;
use noodles_sam::{
    self as sam,
    header::record::value::{map::ReferenceSequence, Map},
};

use crate::sequence::trim_to_first_space;

type E = Box<dyn std::error::Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SamHeaderError {
    ZeroLength { name: String },
    DuplicateName { name: String },
}

impl std::fmt::Display for SamHeaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SamHeaderError::ZeroLength { name } => write!(f, "reference sequence '{}' has length 0", name),
            SamHeaderError::DuplicateName { name } => write!(f, "more than one reference sequence is named '{}'", name),
        }
    }
}

impl std::error::Error for SamHeaderError {}

/// Formats (name, length) pairs as a SAM header with one `@SQ` per pair
///
/// Names are trimmed to the first whitespace and must be unique after
/// trimming.
///
/// Terminates with a [SamHeaderError] if a length is 0 or if two names trim to
/// the same name.
///
pub fn format_sam_header<'a, I>(
    references: I,
) -> Result<sam::Header, E>
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    let mut refs: IndexMap<BString, Map<ReferenceSequence>> = IndexMap::new();
    for (name, len) in references {
        let trimmed = trim_to_first_space(name);
        let len = NonZeroUsize::new(len as usize).ok_or_else(|| SamHeaderError::ZeroLength { name: trimmed.to_string() })?;
        let key = BString::from(trimmed);
        if refs.contains_key(&key) {
            return Err(Box::new(SamHeaderError::DuplicateName { name: trimmed.to_string() }))
        }
        refs.insert(key, Map::<ReferenceSequence>::new(len));
    }

    Ok(
        sam::Header::builder()
            .set_reference_sequences(refs)
            .build()
    )
}

/// Write `header` in SAM text format to `conn`.
pub fn write_sam_header<W: Write>(
    header: &sam::Header,
    conn: &mut W,
) -> Result<(), E> {
    let mut writer = sam::io::Writer::new(conn);
    writer.write_header(header)?;
    Ok(())
}

/// Formats (name, length) pairs as newline-terminated `@SQ\tSN:<name>\tLN:<length>` lines.
///
/// ## Usage
///
/// ```rust
/// use txome::printer::sam::sam_header_text;
///
/// let refs = vec![("chr1 primary", 248956422_u64), ("chrM", 16569_u64)];
/// let got = sam_header_text(refs).unwrap();
///
/// assert_eq!(got, "@SQ\tSN:chr1\tLN:248956422\n@SQ\tSN:chrM\tLN:16569\n");
/// ```
///
pub fn sam_header_text<'a, I>(
    references: I,
) -> Result<String, E>
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    let header = format_sam_header(references)?;
    let mut bytes: Vec<u8> = Vec::new();
    write_sam_header(&header, &mut bytes)?;
    Ok(String::from_utf8(bytes)?)
}
