//! Application of a transformation to a lazy sequence of graphs.
//!
//! Each graph is processed independently. A graph whose processing fails is logged with
//! its identifying metadata and skipped, the stream goes on with the next graph.
//! Errors of configuration never reach this point : they are returned when the
//! transformation is built.
//!
//! Output order is input order. The consumer can stop pulling graphs at any time.

use rayon::prelude::*;

use crate::error::ContractionError;
use crate::graph::AttributedGraph;

/// A transformation of one graph into another. Implemented by
/// [Contract](super::edge::Contract) and [Minor](super::minor::Minor).
pub trait Transform {
    /// transforms one graph. The argument is never modified.
    fn transform_one(&self, graph: &AttributedGraph) -> Result<AttributedGraph, ContractionError>;

    /// lazily transforms a sequence of graphs, skipping the ones that fail
    fn transform<I>(&self, graphs: I) -> GraphStream<'_, I::IntoIter, Self>
    where
        Self: Sized,
        I: IntoIterator<Item = AttributedGraph>,
    {
        GraphStream::new(self, graphs.into_iter())
    }
} // end of trait Transform

/// Iterator over transformed graphs
pub struct GraphStream<'a, I, T> {
    transformer: &'a T,
    graphs: I,
    /// number of graphs pulled from input
    nb_processed: usize,
    /// number of graphs skipped
    nb_failed: usize,
} // end of struct GraphStream

impl<'a, I, T> GraphStream<'a, I, T>
where
    I: Iterator<Item = AttributedGraph>,
    T: Transform,
{
    pub fn new(transformer: &'a T, graphs: I) -> Self {
        GraphStream {
            transformer,
            graphs,
            nb_processed: 0,
            nb_failed: 0,
        }
    }

    /// number of graphs pulled from input so far
    pub fn get_nb_processed(&self) -> usize {
        self.nb_processed
    }

    /// number of graphs skipped so far. Each of them was logged once, at warn level.
    pub fn get_nb_failed(&self) -> usize {
        self.nb_failed
    }
} // end of impl GraphStream

impl<'a, I, T> Iterator for GraphStream<'a, I, T>
where
    I: Iterator<Item = AttributedGraph>,
    T: Transform,
{
    type Item = AttributedGraph;

    fn next(&mut self) -> Option<AttributedGraph> {
        loop {
            let graph = self.graphs.next()?;
            let rank = self.nb_processed;
            self.nb_processed += 1;
            match self.transformer.transform_one(&graph) {
                Ok(transformed) => return Some(transformed),
                Err(e) => {
                    self.nb_failed += 1;
                    log::warn!(
                        "failed iteration on graph {} (rank {}), reason : {}",
                        graph.describe(),
                        rank,
                        e
                    );
                }
            }
        }
    } // end of next
} // end of impl Iterator for GraphStream

/// transforms a batch of graphs in parallel. Failed graphs are logged and dropped,
/// the others are returned in input order.
pub fn transform_par<T>(transformer: &T, graphs: &[AttributedGraph]) -> Vec<AttributedGraph>
where
    T: Transform + Sync,
{
    let results: Vec<Option<AttributedGraph>> = graphs
        .par_iter()
        .enumerate()
        .map(|(rank, graph)| match transformer.transform_one(graph) {
            Ok(transformed) => Some(transformed),
            Err(e) => {
                log::warn!(
                    "failed iteration on graph {} (rank {}), reason : {}",
                    graph.describe(),
                    rank,
                    e
                );
                None
            }
        })
        .collect();
    let nb_in = results.len();
    let transformed: Vec<AttributedGraph> = results.into_iter().flatten().collect();
    log::info!(
        "transform_par : {} graphs in, {} graphs out",
        nb_in,
        transformed.len()
    );
    transformed
} // end of transform_par

//=====================================================================================

#[cfg(test)]
mod tests {

    use super::*;

    use crate::contraction::edge::Contract;
    use crate::contraction::modifier::ContractionModifier;
    use crate::contraction::params::ContractionParams;
    use crate::contraction::reduction::Reduction;
    use crate::graph::*;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    // path of 3 nodes labelled A A B, weights given as strings
    fn weighted_path(name: &str, weight: &str) -> AttributedGraph {
        let mut graph = AttributedGraph::new();
        for (i, l) in ["A", "A", "B"].iter().enumerate() {
            graph.add_node(
                i as NodeId,
                attributes([(LABEL, AttrValue::from(*l)), ("weight", AttrValue::from(weight))]),
            );
            if i > 0 {
                graph.add_edge(i as NodeId, (i - 1) as NodeId, Attributes::new()).unwrap();
            }
        }
        graph.set_meta("id", AttrValue::from(name));
        graph
    }

    fn make_contract() -> Contract {
        let modifiers = vec![ContractionModifier::new("weight", "weight", Reduction::Sum)];
        Contract::new(ContractionParams::new(LABEL, false, 1., modifiers)).unwrap()
    }

    fn five_graphs() -> Vec<AttributedGraph> {
        (1..=5)
            .map(|i| {
                let weight = if i == 3 { "not a number" } else { "1.5" };
                weighted_path(&format!("g{}", i), weight)
            })
            .collect()
    }

    #[test]
    fn stream_fault_isolation() {
        log_init_test();
        //
        let contract = make_contract();
        let mut stream = contract.transform(five_graphs());
        let mut names = Vec::<String>::new();
        for graph in &mut stream {
            assert_eq!(graph.node_count(), 2);
            names.push(graph.describe());
        }
        assert_eq!(names, vec!["g1", "g2", "g4", "g5"]);
        assert_eq!(stream.get_nb_processed(), 5);
        // one warning is logged per skipped graph, the counter is what we can observe
        assert_eq!(stream.get_nb_failed(), 1);
    } // end of stream_fault_isolation

    #[test]
    fn stream_is_lazy() {
        log_init_test();
        //
        let contract = make_contract();
        let mut stream = contract.transform(five_graphs());
        let first: Vec<AttributedGraph> = stream.by_ref().take(2).collect();
        assert_eq!(first.len(), 2);
        assert_eq!(stream.get_nb_processed(), 2);
        assert_eq!(stream.get_nb_failed(), 0);
        // the third graph is pulled and skipped, we get the fourth
        let next = stream.next().unwrap();
        assert_eq!(next.describe(), "g4");
        assert_eq!(stream.get_nb_failed(), 1);
    } // end of stream_is_lazy

    #[test]
    fn parallel_keeps_order() {
        log_init_test();
        //
        let contract = make_contract();
        let graphs = five_graphs();
        let transformed = transform_par(&contract, &graphs);
        let names: Vec<String> = transformed.iter().map(|g| g.describe()).collect();
        assert_eq!(names, vec!["g1", "g2", "g4", "g5"]);
        // inputs are untouched
        assert!(graphs.iter().all(|g| g.node_count() == 3));
    } // end of parallel_keeps_order
} // end of mod tests
