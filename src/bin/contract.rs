//! an executable for contracting graphs of RNA secondary structures
//! example usage:
//! contract --csv "structures.csv" --attribute label --nesting --scaling 0.5
//! contract --csv "structures.csv" --modifier "attribute_in:label attribute_out:label reduction:set_categorical" --modifier "attribute_in:weight attribute_out:weight reduction:sum"
//!
//! The csv file has a header and columns id, sequence, structure (dot bracket).
//! Resulting graphs are dumped on stdout, each preceded by a line # id.
//! Graphs that cannot be contracted are logged and skipped.


use std::io::Write;
use std::time::SystemTime;

use anyhow::{anyhow};
use clap::{Arg, ArgMatches, Command};
use cpu_time::ProcessTime;

use graphminor::prelude::*;


fn parse_contraction(matches : &ArgMatches) -> Result<ContractionParams, anyhow::Error> {
    log::debug!("in parse_contraction");
    let mut params = ContractionParams::default();
    //
    if let Some(str) = matches.value_of("attribute") {
        params.contraction_attribute = String::from(str);
    }
    params.set_nesting(matches.is_present("nesting"));
    // get scaling
    if let Some(str) = matches.value_of("scaling") {
        match str.parse::<f64>() {
            Ok(val) => { params.weight_scaling_factor = val; },
            _       => { return Err(anyhow!("could not parse scaling factor {}", str)); },
        }
    }
    if let Some(str) = matches.value_of("separator") {
        params.set_separator(str);
    }
    // get modifiers, default ones if none given
    if let Some(values) = matches.values_of("modifier") {
        let mut modifiers = Vec::<ContractionModifier>::new();
        for str in values {
            modifiers.push(str.parse::<ContractionModifier>()?);
        }
        params.modifiers = modifiers;
    }
    //
    Ok(params)
} // end of parse_contraction


fn parse_delimiter(matches : &ArgMatches) -> Result<u8, anyhow::Error> {
    match matches.value_of("delim") {
        Some(str) => {
            let bytes = str.as_bytes();
            if bytes.len() == 1 { Ok(bytes[0]) }
            else if str == "\\t" { Ok(b'\t') }
            else { Err(anyhow!("delimiter must be one character, got {}", str)) }
        },
        None => Ok(b','),
    }
} // end of parse_delimiter


fn dump(graph : &AttributedGraph, out : &mut dyn Write) -> Result<(), anyhow::Error> {
    writeln!(out, "# {}", graph.describe())?;
    write_graph_csv(graph, out)
}


pub fn main() {
    //
    graphminor::log_init();
    log::info!("logger initialized");
    //
    let matches = Command::new("contract")
        .arg_required_else_help(true)
        .arg(Arg::new("csvfile")
            .long("csv")
            .takes_value(true)
            .required(true)
            .help("expecting a csv file with columns id,sequence,structure"))
        .arg(Arg::new("delim")
            .long("delim")
            .takes_value(true)
            .required(false)
            .help("csv delimiter, default ','"))
        .arg(Arg::new("attribute")
            .long("attribute")
            .takes_value(true)
            .required(false)
            .help("node attribute to contract on, default label"))
        .arg(Arg::new("nesting")
            .long("nesting")
            .help("output nesting graphs (original + contracted)"))
        .arg(Arg::new("scaling")
            .long("scaling")
            .takes_value(true)
            .help("weight scaling factor of contracted nodes, > 0."))
        .arg(Arg::new("separator")
            .long("separator")
            .takes_value(true)
            .help("separator of categorical reductions, default '.'"))
        .arg(Arg::new("modifier")
            .long("modifier")
            .takes_value(true)
            .multiple_occurrences(true)
            .help("\"attribute_in:a attribute_out:b reduction:r\" with r in histogram, sum, average, categorical, set_categorical"))
        .arg(Arg::new("parallel")
            .long("parallel")
            .help("contract graphs in parallel"))
    .get_matches();

    // decode args. Configuration errors stop here, before any graph is read

    let params = match parse_contraction(&matches) {
        Ok(params) => params,
        Err(e) => {
            log::error!("error parsing contraction parameters : {}", e);
            std::process::exit(1);
        }
    };
    let contract = match Contract::new(params) {
        Ok(contract) => contract,
        Err(e) => {
            log::error!("bad contraction parameters : {}", e);
            std::process::exit(1);
        }
    };
    let delim = match parse_delimiter(&matches) {
        Ok(delim) => delim,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    let fname = matches.value_of("csvfile").unwrap_or("");
    if fname.is_empty() {
        log::error!("parsing of csv file name failed");
        std::process::exit(1);
    }
    log::info!("input file : {:?}", fname);
    //
    let path = std::path::Path::new(fname);
    let graphs = match read_structures_csv(path, delim) {
        Ok(graphs) => graphs,
        Err(e) => {
            log::error!("error : {:?}", e);
            log::error!("contract failed reading {:?}", path);
            std::process::exit(1);
        }
    };
    let nb_in = graphs.len();
    //
    let cpu_start = ProcessTime::now();
    let sys_start = SystemTime::now();
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let mut nb_out = 0;
    if matches.is_present("parallel") {
        let contracted = transform_par(&contract, &graphs);
        for graph in &contracted {
            if let Err(e) = dump(graph, &mut handle) {
                log::error!("dump of {} failed : {}", graph.describe(), e);
                std::process::exit(1);
            }
            nb_out += 1;
        }
    }
    else {
        let mut stream = contract.transform(graphs);
        for graph in &mut stream {
            if let Err(e) = dump(&graph, &mut handle) {
                log::error!("dump of {} failed : {}", graph.describe(), e);
                std::process::exit(1);
            }
            nb_out += 1;
        }
        log::info!("nb graphs skipped : {}", stream.get_nb_failed());
    }
    //
    log::info!("contracted {} graphs out of {}, sys time(s) {:.2e} cpu time(s) {:.2e}", nb_out, nb_in,
            sys_start.elapsed().map(|d| d.as_secs_f64()).unwrap_or(0.), cpu_start.elapsed().as_secs_f64());
}  // end fo main
