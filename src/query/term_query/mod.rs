mod term_query;
mod term_scorer;
mod term_weight;

pub use self::term_query::TermQuery;
pub use self::term_scorer::TermScorer;
pub use self::term_weight::TermWeight;

#[cfg(test)]
mod tests {
    use crate::collector::{Count, TopDocs};
    use crate::index::SegmentWriter;
    use crate::query::{Query, TermQuery};
    use crate::schema::{Field, Term};
    use crate::{assert_nearly_equals, DocAddress, Searcher};

    fn term(text: &str) -> Term {
        Term::from_field_text(Field::from_field_id(0), text)
    }

    fn searcher() -> Searcher {
        let mut segment_writer = SegmentWriter::new();
        segment_writer.add_document(vec![term("a")]);
        segment_writer.add_document(vec![term("b")]);
        segment_writer.add_document(vec![term("a"), term("a"), term("a"), term("a")]);
        segment_writer.add_document(vec![term("c")]);
        Searcher::new(vec![segment_writer.finalize()])
    }

    #[test]
    fn test_term_query_no_hit() {
        let searcher = searcher();
        let term_query = TermQuery::new(term("missing"));
        assert_eq!(searcher.search(&term_query, &Count).unwrap(), 0);
        assert_eq!(term_query.count(&searcher).unwrap(), 0);
    }

    #[test]
    fn test_term_query_scores_by_frequency() {
        let searcher = searcher();
        let term_query = TermQuery::new(term("a"));
        let top_docs = searcher.search(&term_query, &TopDocs::with_limit(2)).unwrap();
        assert_eq!(top_docs.len(), 2);
        assert_eq!(top_docs[0].1, DocAddress::new(0, 2));
        assert_eq!(top_docs[1].1, DocAddress::new(0, 0));
        // sqrt(4) against sqrt(1)
        assert_nearly_equals!(top_docs[0].0, 2.0 * top_docs[1].0);
    }

    #[test]
    fn test_term_query_explain() {
        let searcher = searcher();
        let term_query = TermQuery::new(term("a"));
        let explanation = searcher.explain(&term_query, DocAddress::new(0, 2)).unwrap();
        let top_docs = searcher.search(&term_query, &TopDocs::with_limit(1)).unwrap();
        assert_nearly_equals!(explanation.value(), top_docs[0].0);
        assert!(searcher.explain(&term_query, DocAddress::new(0, 1)).is_err());
    }

    #[test]
    fn test_term_query_count_with_deletes() {
        let mut segment_writer = SegmentWriter::new();
        segment_writer.add_document(vec![term("a")]);
        let deleted = segment_writer.add_document(vec![term("a")]);
        segment_writer.add_document(vec![term("a")]);
        segment_writer.delete_document(deleted).unwrap();
        let searcher = Searcher::new(vec![segment_writer.finalize()]);
        let term_query = TermQuery::new(term("a"));
        assert_eq!(term_query.count(&searcher).unwrap(), 2);
        assert_eq!(searcher.search(&term_query, &Count).unwrap(), 2);
    }
}
