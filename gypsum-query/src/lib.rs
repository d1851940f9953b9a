//! Text front end of gypsum.
//!
//! Reads base relation statistics from a catalogue file, and translates queries into the
//! canonical plan expected by [`gypsum::heuristic::HeuristicOptimizer`]:
//!
//! ```text
//! # catalogue
//! Person:400
//! Person.persid:400
//! Person.name:350
//!
//! # query
//! SELECT name FROM Person WHERE persid="42"
//! ```

use pest_derive::Parser;

pub mod catalogue;
pub mod query;

pub use catalogue::parse_catalogue;
pub use query::parse_query;

#[derive(Parser)]
#[grammar = "grammar.pest"]
struct GypsumParser;
