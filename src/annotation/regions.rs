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
use crate::annotation::Region;

use std::collections::HashMap;

/// Merge the sorted `exons` of one transcript into regions.
///
/// An exon starting at or before the end of the running region extends it,
/// any other exon closes the running region and opens a new one. Exons must
/// be sorted by start coordinate.
///
/// Returns an empty Vec if `exons` is empty.
///
/// ## Usage
///
/// ```rust
/// use txome::annotation::{Exon, Region};
/// use txome::annotation::regions::merge_exons;
///
/// let exons = vec![Exon::new(100, 200), Exon::new(150, 250), Exon::new(300, 400)];
/// let got = merge_exons(&exons);
///
/// assert_eq!(got, vec![Region::new(100, 250), Region::new(300, 400)]);
/// ```
///
pub fn merge_exons(
    exons: &[Exon],
) -> Vec<Region> {
    let mut regions: Vec<Region> = Vec::new();
    let Some(first) = exons.first() else {
        return regions
    };

    let mut start = first.start;
    let mut end = first.end;
    for exon in exons.iter().skip(1) {
        if exon.start <= end {
            end = end.max(exon.end);
        } else {
            regions.push(Region::new(start, end));
            start = exon.start;
            end = exon.end;
        }
    }

    let last = Region::new(start, end);
    if regions.last() != Some(&last) {
        regions.push(last);
    }

    regions
}

/// Merge the exons of every transcript, see [merge_exons].
///
/// Transcripts with no exons get no entry.
pub fn make_regions(
    transcript_to_exons: &HashMap<String, Vec<Exon>>,
) -> HashMap<String, Vec<Region>> {
    transcript_to_exons.iter().filter(|(_, exons)| !exons.is_empty()).map(|(key, exons)| {
        (key.clone(), merge_exons(exons))
    }).collect()
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn merge_disjoint_exons() {
        use super::merge_exons;
        use crate::annotation::{Exon, Region};

        let exons = vec![Exon::new(100, 200), Exon::new(300, 400)];
        let expected = vec![Region::new(100, 200), Region::new(300, 400)];

        assert_eq!(merge_exons(&exons), expected);
    }

    #[test]
    fn merge_all_overlapping_exons() {
        use super::merge_exons;
        use crate::annotation::{Exon, Region};

        let exons = vec![Exon::new(10, 50), Exon::new(20, 30), Exon::new(25, 60), Exon::new(60, 70)];
        let expected = vec![Region::new(10, 70)];

        assert_eq!(merge_exons(&exons), expected);
    }

    #[test]
    fn merge_adjacent_exons_stay_separate() {
        use super::merge_exons;
        use crate::annotation::{Exon, Region};

        let exons = vec![Exon::new(100, 200), Exon::new(201, 300)];
        let expected = vec![Region::new(100, 200), Region::new(201, 300)];

        assert_eq!(merge_exons(&exons), expected);
    }

    #[test]
    fn merge_single_and_empty() {
        use super::merge_exons;
        use crate::annotation::{Exon, Region};

        assert_eq!(merge_exons(&[Exon::new(5, 5)]), vec![Region::new(5, 5)]);
        assert!(merge_exons(&[]).is_empty());
    }

    #[test]
    fn merged_regions_cover_exons_without_overlap() {
        use super::merge_exons;
        use crate::annotation::Exon;
        use std::collections::BTreeSet;

        let mut exons = vec![
            Exon::new(1, 4), Exon::new(3, 9), Exon::new(12, 15), Exon::new(14, 14),
            Exon::new(20, 22), Exon::new(22, 30), Exon::new(40, 41), Exon::new(2, 3),
        ];
        exons.sort_by_key(|exon| exon.start);

        let regions = merge_exons(&exons);

        regions.windows(2).for_each(|pair| {
            assert!(pair[0].end < pair[1].start);
        });

        let exon_positions: BTreeSet<u64> = exons.iter().flat_map(|x| x.start..=x.end).collect();
        let region_positions: BTreeSet<u64> = regions.iter().flat_map(|x| x.start..=x.end).collect();
        assert_eq!(exon_positions, region_positions);
    }

    #[test]
    fn make_regions_skips_empty_transcripts() {
        use super::make_regions;
        use crate::annotation::{Exon, Region};
        use std::collections::HashMap;

        let mut exons: HashMap<String, Vec<Exon>> = HashMap::new();
        exons.insert("T1_chr1".to_string(), vec![Exon::new(1, 10), Exon::new(5, 20)]);
        exons.insert("T2_chr1".to_string(), vec![]);

        let got = make_regions(&exons);

        assert_eq!(got.len(), 1);
        assert_eq!(got.get("T1_chr1").unwrap(), &vec![Region::new(1, 20)]);
    }
}
