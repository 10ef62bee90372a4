//! Load RNA structures from a csv, dump a graph as a csv
//!
//! The input csv has a header line and 3 columns : id, sequence, structure (dot bracket).
//! The dump has one row per node and per edge :
//! `kind,source,target,attributes` with kind node or edge, attributes as name=value separated by ';'


use std::fs::OpenOptions;
use std::io::{BufReader, Write};
use std::path::Path;

use anyhow::anyhow;
use csv::{ReaderBuilder, WriterBuilder};
use serde::Deserialize;

use crate::graph::*;

use super::dotbracket::sequence_dotbracket_to_graph;

/// a record of the structure csv file
#[derive(Debug, Clone, Deserialize)]
pub struct StructureRecord {
    pub id: String,
    pub sequence: String,
    pub structure: String,
}

/// graph of a record. metadata id, header, sequence, structure and info are set
pub fn record_to_graph(record: &StructureRecord) -> anyhow::Result<AttributedGraph> {
    let mut graph = sequence_dotbracket_to_graph(&record.sequence, &record.structure)?;
    graph.set_meta("id", AttrValue::from(record.id.as_str()));
    graph.set_meta("header", AttrValue::from(record.id.as_str()));
    graph.set_meta(INFO, AttrValue::from(record.id.as_str()));
    Ok(graph)
}

/// reads all records of a structure csv file.
/// A record that cannot be read or converted is an error for the whole file.
pub fn read_structures_csv(filepath: &Path, delim: u8) -> anyhow::Result<Vec<AttributedGraph>> {
    //
    let fileres = OpenOptions::new().read(true).open(filepath);
    if fileres.is_err() {
        log::error!("read_structures_csv could not open file {:?}", filepath.as_os_str());
        return Err(anyhow!("read_structures_csv could not open file {}", filepath.display()));
    }
    let file = fileres?;
    let bufreader = BufReader::new(file);
    let mut rdr = ReaderBuilder::new()
        .delimiter(delim)
        .flexible(false)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(bufreader);
    //
    let mut graphs = Vec::<AttributedGraph>::new();
    for (nb_record, result) in rdr.deserialize::<StructureRecord>().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                return Err(anyhow!("error decoding record {} : {}", nb_record + 1, e));
            }
        };
        match record_to_graph(&record) {
            Ok(graph) => graphs.push(graph),
            Err(e) => {
                return Err(anyhow!("error in structure of record {} ({}) : {}", nb_record + 1, record.id, e));
            }
        }
        log::debug!("record {} : {:?}", nb_record + 1, record.id);
    }
    log::info!("read_structures_csv read {} structures from {:?}", graphs.len(), filepath);
    Ok(graphs)
} // end of read_structures_csv

// name=value;name=value
fn serialize_attributes(attrs: &Attributes, contracted: Option<&[NodeId]>) -> String {
    let mut fields: Vec<String> = attrs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v.to_text()))
        .collect();
    if let Some(c) = contracted {
        let ids: Vec<String> = c.iter().map(|id| id.to_string()).collect();
        fields.push(format!("contracted={}", ids.join(LIST_SEPARATOR)));
    }
    fields.join(";")
}

/// dumps nodes then edges of graph
pub fn write_graph_csv<W: Write>(graph: &AttributedGraph, writer: W) -> anyhow::Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(["kind", "source", "target", "attributes"])?;
    for node in graph.nodes() {
        let attrs = serialize_attributes(node.get_attrs(), node.get_contracted());
        let source = node.get_id().to_string();
        wtr.write_record(["node", source.as_str(), "", attrs.as_str()])?;
    }
    for (u, v, attrs) in graph.edges() {
        let attrs = serialize_attributes(attrs, None);
        let (source, target) = (u.to_string(), v.to_string());
        wtr.write_record(["edge", source.as_str(), target.as_str(), attrs.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
} // end of write_graph_csv

//=====================================================================================

// end of mod tests
