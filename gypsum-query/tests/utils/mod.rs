use anyhow::Context;
use gypsum::catalogue::Catalogue;
use gypsum::heuristic::HeuristicOptimizer;
use gypsum::optimizer::{Optimizer, OptimizerContext};
use gypsum::plan::explain::explain_to_string;
use gypsum_query::{parse_catalogue, parse_query};
use serde::Deserialize;
use serde::Serialize;
use std::fmt::Debug;
use std::fs::{read_to_string, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Serialize, Deserialize)]
pub struct TestCase {
    pub query: String,
    pub expected_optimized_plan: String,
}

pub trait OptimizerFactory {
    type O: Optimizer;
    fn create(&self, catalogue: Arc<Catalogue>) -> Self::O;
}

pub struct HeuristicOptimizerFactory;

impl OptimizerFactory for HeuristicOptimizerFactory {
    type O = HeuristicOptimizer;

    fn create(&self, catalogue: Arc<Catalogue>) -> Self::O {
        HeuristicOptimizer::new(OptimizerContext::new(catalogue))
    }
}

pub fn load_catalogue<P: AsRef<Path> + Debug>(path: P) -> Arc<Catalogue> {
    let text = read_to_string(&path)
        .with_context(|| format!("Failed to read catalogue file: {:?}", &path))
        .unwrap();
    Arc::new(parse_catalogue(&text).unwrap())
}

pub struct TestCaseRunner<F> {
    /// Input file path.
    pub paths: Vec<PathBuf>,
    pub catalogue: Arc<Catalogue>,
    pub optimizer_factory: F,
}

impl<F: OptimizerFactory> TestCaseRunner<F> {
    pub fn run(self) {
        for path in &self.paths {
            let file = File::options()
                .read(true)
                .open(path)
                .with_context(|| format!("Failed to open test case file: {:?}", &path))
                .unwrap();

            let test_cases: Vec<TestCase> = serde_yaml::from_reader(file)
                .with_context(|| {
                    format!("Failed to load test cases from file: {:?}", &path)
                })
                .unwrap();

            for test_case in test_cases {
                self.run_case(path, test_case);
            }
        }
    }

    fn run_case<P: AsRef<Path> + Debug>(&self, path: &P, test_case: TestCase) {
        let original_plan = parse_query(&test_case.query, &self.catalogue)
            .with_context(|| format!("Failed to parse query: {}", test_case.query))
            .unwrap();

        let optimized_plan = self
            .optimizer_factory
            .create(self.catalogue.clone())
            .optimize(&original_plan);

        let optimized_plan_string = explain_to_string(&optimized_plan).unwrap();

        assert_eq!(
            test_case.expected_optimized_plan, optimized_plan_string,
            "Plan for {} in {:?} is different.",
            test_case.query, path
        );
    }
}
