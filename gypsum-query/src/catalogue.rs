use anyhow::{anyhow, Context};
use gypsum::catalogue::Catalogue;
use gypsum::error::GypsumResult;
use log::debug;
use pest::iterators::Pair;
use pest::Parser;

use crate::{GypsumParser, Rule};

/// Parses catalogue text into a [`Catalogue`].
///
/// Each line declares either a relation as `Relation:tuples`, or an attribute of a previously
/// declared relation as `Relation.attribute:values`. `#` starts a comment.
pub fn parse_catalogue(text: &str) -> GypsumResult<Catalogue> {
    let parsed = GypsumParser::parse(Rule::catalogue, text)
        .map_err(|e| anyhow!("Failed to parse catalogue:\n{}", e))?
        .next()
        .ok_or_else(|| anyhow!("Empty catalogue"))?;

    let mut catalogue = Catalogue::new();
    for declaration in parsed.into_inner() {
        let (line, _) = declaration.as_span().start_pos().line_col();
        match declaration.as_rule() {
            Rule::relation_decl => {
                let mut inner = declaration.into_inner();
                let name = next_str(&mut inner)?;
                let tuple_count = parse_count(&mut inner)?;
                catalogue
                    .create_relation(name, tuple_count)
                    .with_context(|| format!("Invalid relation at line {}", line))?;
                debug!("Relation {} with {} tuples", name, tuple_count);
            }
            Rule::attribute_decl => {
                let mut inner = declaration.into_inner();
                let relation = next_str(&mut inner)?;
                let attribute = next_str(&mut inner)?;
                let value_count = parse_count(&mut inner)?;
                catalogue
                    .create_attribute(relation, attribute, value_count)
                    .with_context(|| format!("Invalid attribute at line {}", line))?;
            }
            _ => {}
        }
    }

    Ok(catalogue)
}

pub(crate) fn next_str<'i>(
    pairs: &mut impl Iterator<Item = Pair<'i, Rule>>,
) -> GypsumResult<&'i str> {
    pairs
        .next()
        .map(|pair| pair.as_str())
        .ok_or_else(|| anyhow!("Unexpected end of input"))
}

fn parse_count<'i>(pairs: &mut impl Iterator<Item = Pair<'i, Rule>>) -> GypsumResult<u64> {
    let number = next_str(pairs)?;
    number
        .parse()
        .with_context(|| format!("Count {} out of range", number))
}
