use crate::query::Explanation;
use crate::Score;

pub(crate) fn idf(doc_freq: u64, doc_count: u64) -> Score {
    1.0 + (doc_count as Score / (doc_freq as Score + 1.0)).ln()
}

/// Turns the sum of squared weights of a query tree into the norm
/// applied to every weight of that tree.
///
/// A query whose weights all are zero is left unnormalized.
pub fn query_norm(sum_of_squared_weights: Score) -> Score {
    let norm = 1.0 / sum_of_squared_weights.sqrt();
    if norm.is_finite() {
        norm
    } else {
        1.0
    }
}

fn tf(term_freq: u32) -> Score {
    (term_freq as Score).sqrt()
}

/// Classic vector space similarity: `sqrt(freq) * idf² * boost * query_norm`.
#[derive(Clone, Debug)]
pub struct TfIdfWeight {
    idf: Score,
    doc_freq: u64,
    doc_count: u64,
    query_boost: Score,
    query_norm: Score,
    query_weight: Score,
    value: Score,
}

impl TfIdfWeight {
    pub fn for_one_term(doc_freq: u64, doc_count: u64, query_boost: Score) -> TfIdfWeight {
        let idf = idf(doc_freq, doc_count);
        let query_weight = idf * query_boost;
        TfIdfWeight {
            idf,
            doc_freq,
            doc_count,
            query_boost,
            query_norm: 1.0,
            query_weight,
            value: query_weight * idf,
        }
    }

    pub fn value_for_normalization(&self) -> Score {
        self.query_weight * self.query_weight
    }

    /// Recomputes the weight for the given norm.
    ///
    /// Calling it twice with the same arguments is a no-op.
    pub fn normalize(&mut self, query_norm: Score, top_level_boost: Score) {
        self.query_norm = query_norm * top_level_boost;
        self.query_weight = self.idf * self.query_boost * self.query_norm;
        self.value = self.query_weight * self.idf;
    }

    #[inline]
    pub fn score(&self, term_freq: u32) -> Score {
        tf(term_freq) * self.value
    }

    pub fn explain(&self, term_freq: u32) -> Explanation {
        let mut idf_explanation = Explanation::new("idf, computed as 1 + ln(N / (n + 1)) from:", self.idf);
        idf_explanation.add_const("n, number of documents containing term", self.doc_freq as Score);
        idf_explanation.add_const("N, total number of documents", self.doc_count as Score);

        let mut query_weight_explanation = Explanation::new("queryWeight, product of:", self.query_weight);
        if self.query_boost != 1.0 {
            query_weight_explanation.add_const("boost", self.query_boost);
        }
        query_weight_explanation.add_detail(idf_explanation.clone());
        query_weight_explanation.add_const("queryNorm", self.query_norm);

        let field_weight = tf(term_freq) * self.idf;
        let mut field_weight_explanation = Explanation::new("fieldWeight, product of:", field_weight);
        field_weight_explanation.add_const(format!("tf(freq={term_freq})"), tf(term_freq));
        field_weight_explanation.add_detail(idf_explanation);

        let mut explanation = Explanation::new(
            format!("TermQuery, score(freq={term_freq}), product of:"),
            self.score(term_freq),
        );
        explanation.add_detail(query_weight_explanation);
        explanation.add_detail(field_weight_explanation);
        explanation
    }
}
