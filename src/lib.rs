//! lib target
//!
//! Contraction, minors and nesting of attributed graphs, see module [contraction].


use env_logger::{Builder};

#[macro_use]
extern crate  lazy_static;

lazy_static! {
    static ref LOG: u64 = {
        let res = init_log();
        res
    };
}

// install a logger facility
fn init_log() -> u64 {
    Builder::from_default_env().init();
    eprintln!("\n ************** initializing logger *****************\n");    
    return 1;
}

/// installs the logger (once), configured by RUST_LOG
pub fn log_init() {
    lazy_static::initialize(&LOG);
}

pub mod error;

pub mod graph;

pub mod contraction;

pub mod io;

pub mod prelude;
