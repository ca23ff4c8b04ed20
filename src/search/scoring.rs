//! Search relevance and ranking algorithms.
//!
//! Scores are accumulated per entry as `weighted_tf * idf(df)` summed over the
//! matched query tokens, then ranked by [`compare_hits`].

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Inverse-document-frequency factor applied to each matched query token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdfFormula {
    /// `1 / ln(1 + df)`: rarer tokens weigh more, independent of corpus size.
    #[default]
    InverseLog,
    /// `ln(1 + N / df)`: the classic smoothed IDF.
    Smooth,
    /// Always 1; ranking by weighted term frequency alone.
    Flat,
}

impl IdfFormula {
    /// Computes the factor for a token present in `doc_freq` of `total_docs` entries.
    ///
    /// Returns 0 when the token has no postings.
    pub fn factor(self, doc_freq: usize, total_docs: usize) -> f64 {
        if doc_freq == 0 {
            return 0.0;
        }
        let df = doc_freq as f64;
        match self {
            Self::InverseLog => 1.0 / df.ln_1p(),
            Self::Smooth => (total_docs.max(doc_freq) as f64 / df).ln_1p(),
            Self::Flat => 1.0,
        }
    }
}

/// Accumulated relevance of one entry for one query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Hit {
    /// Position of the entry in the index's entry list.
    pub(crate) entry: usize,
    pub(crate) score: f64,
    /// Distinct query tokens this entry matched.
    pub(crate) matched_terms: usize,
}

/// Ranks hits: more distinct matched tokens first, then higher score, then
/// lower entry index so equal scores keep document order.
pub(crate) fn compare_hits(a: &Hit, b: &Hit) -> Ordering {
    b.matched_terms
        .cmp(&a.matched_terms)
        .then_with(|| b.score.total_cmp(&a.score))
        .then_with(|| a.entry.cmp(&b.entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    fn hit(entry: usize, score: f64, matched_terms: usize) -> Hit {
        Hit {
            entry,
            score,
            matched_terms,
        }
    }

    #[rstest]
    #[case(IdfFormula::InverseLog, 1, 10, 1.0 / 2f64.ln())]
    #[case(IdfFormula::InverseLog, 3, 10, 1.0 / 4f64.ln())]
    #[case(IdfFormula::Smooth, 2, 10, 6f64.ln())]
    #[case(IdfFormula::Flat, 7, 10, 1.0)]
    fn test_idf_factor(
        #[case] formula: IdfFormula,
        #[case] doc_freq: usize,
        #[case] total: usize,
        #[case] expected: f64,
    ) {
        check!((formula.factor(doc_freq, total) - expected).abs() < 1e-12);
    }

    #[rstest]
    #[case(IdfFormula::InverseLog)]
    #[case(IdfFormula::Smooth)]
    #[case(IdfFormula::Flat)]
    fn test_idf_zero_doc_freq(#[case] formula: IdfFormula) {
        check!(formula.factor(0, 10) == 0.0);
    }

    #[test]
    fn test_rarer_tokens_weigh_more() {
        let formula = IdfFormula::InverseLog;
        check!(formula.factor(1, 100) > formula.factor(2, 100));
        check!(formula.factor(2, 100) > formula.factor(50, 100));
    }

    #[test]
    fn test_match_count_beats_score() {
        let broad = hit(5, 1.0, 2);
        let repeated = hit(0, 100.0, 1);
        check!(compare_hits(&broad, &repeated) == Ordering::Less);
    }

    #[test]
    fn test_equal_scores_keep_entry_order() {
        let mut hits = vec![hit(4, 2.0, 1), hit(1, 2.0, 1), hit(2, 3.0, 1)];
        hits.sort_by(compare_hits);
        let order: Vec<_> = hits.iter().map(|h| h.entry).collect();
        check!(order == vec![2, 1, 4]);
    }
}
