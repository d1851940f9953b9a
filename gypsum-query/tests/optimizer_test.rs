use crate::utils::{load_catalogue, HeuristicOptimizerFactory, OptimizerFactory, TestCaseRunner};
use gypsum::catalogue::Catalogue;
use gypsum::cost::Estimator;
use gypsum::optimizer::Optimizer;
use gypsum_query::parse_query;
use maplit::hashmap;
use std::path::PathBuf;
use std::sync::Arc;

mod utils;

#[test]
fn test_heuristic_optimizer() {
    let runner = TestCaseRunner {
        paths: vec![PathBuf::from("resources/heuristic.yaml")],
        catalogue: load_catalogue("resources/catalogue.txt"),
        optimizer_factory: HeuristicOptimizerFactory,
    };

    runner.run()
}

#[test]
fn test_optimized_plan_cheaper() {
    let relations = hashmap! {
        "Person" => (400, vec![("persid", 400), ("name", 350), ("age", 47)]),
        "Project" => (40, vec![("projid", 40), ("projname", 35)]),
        "Department" => (5, vec![("deptid", 5), ("dname", 5)]),
    };

    let mut catalogue = Catalogue::new();
    for (name, (tuple_count, attributes)) in relations {
        catalogue.create_relation(name, tuple_count).unwrap();
        for (attribute, value_count) in attributes {
            catalogue
                .create_attribute(name, attribute, value_count)
                .unwrap();
        }
    }
    let catalogue = Arc::new(catalogue);

    let plan = parse_query(
        "SELECT name, dname FROM Person, Project, Department \
         WHERE persid=projid, projid=deptid, age=\"30\"",
        &catalogue,
    )
    .unwrap();

    let mut estimator = Estimator::new();
    estimator.estimate_plan(&plan);
    let original_cost = estimator.cost();

    let optimized = HeuristicOptimizerFactory
        .create(catalogue)
        .optimize(&plan);
    estimator.reset();
    estimator.estimate_plan(&optimized);

    assert!(
        estimator.cost() < original_cost,
        "{} is not cheaper than {}",
        estimator.cost(),
        original_cost
    );
}
