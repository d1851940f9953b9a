use anyhow::{anyhow, Context};
use gypsum::catalogue::Catalogue;
use gypsum::error::GypsumResult;
use gypsum::plan::{Plan, PlanBuilder};
use gypsum::predicate::Predicate;
use itertools::Itertools;
use log::debug;
use pest::iterators::Pair;
use pest::Parser;

use crate::catalogue::next_str;
use crate::{GypsumParser, Rule};

/// Parses query text into its canonical plan.
///
/// The canonical plan is a left deep product of scans of relations in `FROM` order, with one
/// select per `WHERE` predicate applied in order, first predicate innermost. A project of the
/// `SELECT` list is placed on top unless it's `*`.
///
/// Relations must exist in `catalogue`. Attributes are not checked: predicates on missing
/// attributes are estimated as empty.
pub fn parse_query(text: &str, catalogue: &Catalogue) -> GypsumResult<Plan> {
    let parsed = GypsumParser::parse(Rule::query, text)
        .map_err(|e| anyhow!("Failed to parse query:\n{}", e))?
        .next()
        .ok_or_else(|| anyhow!("Empty query"))?;

    let mut attributes = None;
    let mut relations: Vec<&str> = vec![];
    let mut predicates: Vec<Predicate> = vec![];
    for pair in parsed.into_inner() {
        match pair.as_rule() {
            Rule::select_list => attributes = parse_select_list(pair),
            Rule::from_list => relations = pair.into_inner().map(|p| p.as_str()).collect(),
            Rule::where_list => {
                predicates = pair
                    .into_inner()
                    .map(parse_predicate)
                    .collect::<GypsumResult<Vec<_>>>()?
            }
            _ => {}
        }
    }

    let mut relations = relations.into_iter().map(|name| {
        catalogue
            .relation(name)
            .with_context(|| format!("Unknown relation {:?} in FROM clause", name))
    });
    let first = relations
        .next()
        .ok_or_else(|| anyhow!("No relation in FROM clause"))??;

    let mut builder = PlanBuilder::scan(first);
    for relation in relations {
        builder = builder.product(PlanBuilder::scan(relation?).build().root());
    }
    for predicate in predicates {
        builder = builder.select(predicate);
    }
    if let Some(attributes) = attributes {
        builder = builder.project(attributes);
    }

    let plan = builder.build();
    debug!(
        "Canonical plan of {} with {} nodes",
        text.split_whitespace().join(" "),
        plan.bfs_iterator().count()
    );
    Ok(plan)
}

/// `None` for `*`.
fn parse_select_list(pair: Pair<Rule>) -> Option<Vec<String>> {
    let attributes = pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::identifier)
        .map(|p| p.as_str().to_string())
        .collect::<Vec<_>>();

    if attributes.is_empty() {
        None
    } else {
        Some(attributes)
    }
}

fn parse_predicate(pair: Pair<Rule>) -> GypsumResult<Predicate> {
    let rule = pair.as_rule();
    let mut inner = pair.into_inner();
    let left = next_str(&mut inner)?;
    let right = inner
        .next()
        .ok_or_else(|| anyhow!("Incomplete predicate on {}", left))?;

    match (rule, right.as_rule()) {
        (Rule::attr_eq, _) => Ok(Predicate::attr_eq(left, right.as_str())),
        (Rule::value_eq, Rule::string) => {
            let value = right
                .into_inner()
                .next()
                .map(|p| p.as_str())
                .unwrap_or_default();
            Ok(Predicate::value_eq(left, value))
        }
        (Rule::value_eq, _) => Ok(Predicate::value_eq(left, right.as_str())),
        _ => Err(anyhow!("Unexpected predicate {:?}", rule)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_catalogue;
    use gypsum::plan::explain::explain_to_string;

    fn catalogue() -> Catalogue {
        parse_catalogue(
            "\
R:100
R.a:10
R.b:100
S:20
S.c:5
",
        )
        .unwrap()
    }

    #[test]
    fn test_parse_query() {
        let plan = parse_query(
            "SELECT a, c FROM R, S WHERE a=c, b=\"x y\", c=3",
            &catalogue(),
        )
        .unwrap();

        let expected = r#"Project { attributes: [a, c] }
└─ Select { predicate: c="3" }
   └─ Select { predicate: b="x y" }
      └─ Select { predicate: a=c }
         └─ Product
            ├─ Scan { relation: R }
            └─ Scan { relation: S }
"#;
        assert_eq!(expected, explain_to_string(&plan).unwrap());
    }

    #[test]
    fn test_star_without_where() {
        let plan = parse_query("select *\nfrom S", &catalogue()).unwrap();

        assert_eq!(
            "Scan { relation: S }\n",
            explain_to_string(&plan).unwrap()
        );
    }

    #[test]
    fn test_keywords_case_insensitive() {
        let plan = parse_query("Select a From R Where a=\"1\"", &catalogue()).unwrap();
        assert_eq!(3, plan.bfs_iterator().count());
    }

    #[test]
    fn test_three_relations_left_deep() {
        let catalogue = parse_catalogue("A:1\nB:1\nC:1\n").unwrap();
        let plan = parse_query("SELECT * FROM A, B, C", &catalogue).unwrap();

        let expected = r#"Product
├─ Product
│  ├─ Scan { relation: A }
│  └─ Scan { relation: B }
└─ Scan { relation: C }
"#;
        assert_eq!(expected, explain_to_string(&plan).unwrap());
    }

    #[test]
    fn test_unknown_relation() {
        let err = parse_query("SELECT * FROM R, T", &catalogue()).unwrap_err();
        assert!(err.to_string().contains("\"T\""), "{}", err);
    }

    #[test]
    fn test_unknown_attribute_accepted() {
        assert!(parse_query("SELECT q FROM R WHERE q=a", &catalogue()).is_ok());
    }

    #[test]
    fn test_syntax_error() {
        let catalogue = catalogue();
        assert!(parse_query("SELECT FROM R", &catalogue).is_err());
        assert!(parse_query("SELECT a FROM", &catalogue).is_err());
        assert!(parse_query("SELECT a FROM R WHERE", &catalogue).is_err());
        assert!(parse_query("SELECT a FROM R WHERE a>1", &catalogue).is_err());
    }
}
