use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

use dmn_core::context::EvalContext;
use dmn_core::value::Value;

use crate::exprlang::ExprLangEngine;
use crate::model_io::{TableDto, parse_table_expressions};
use crate::result_io::{failure_to_json, outcome_to_json};

pub(crate) fn run(table: PathBuf, vars: PathBuf) -> Result<()> {
    let table_json = std::fs::read_to_string(&table)
        .with_context(|| format!("reading decision table '{}'", table.display()))?;
    let table_dto: TableDto = serde_json::from_str(&table_json)
        .with_context(|| format!("parsing decision table '{}'", table.display()))?;
    let decision_table = table_dto.into_model();

    let vars_json = std::fs::read_to_string(&vars)
        .with_context(|| format!("reading variables '{}'", vars.display()))?;
    let variables: BTreeMap<String, Value> = serde_json::from_str(&vars_json)
        .with_context(|| format!("parsing variables '{}'", vars.display()))?;

    let parsed_expressions = parse_table_expressions(&decision_table)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("parsing table expressions")?;
    let ctx = EvalContext::new(variables, parsed_expressions);
    let engine = ExprLangEngine;

    tracing::debug!(
        inputs = decision_table.inputs.len(),
        outputs = decision_table.outputs.len(),
        rules = decision_table.rules.len(),
        "loaded decision table"
    );

    match dmn_core::evaluate(&decision_table, &ctx, &engine) {
        Ok(outcome) => {
            println!("{}", serde_json::to_string_pretty(&outcome_to_json(&outcome))?);
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", serde_json::to_string_pretty(&failure_to_json(&err))?);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writes `contents` to a fresh file under a per-test temp directory
    /// and returns its path, so `run` can be exercised against real files
    /// on disk without touching the repo.
    fn write_temp(dir_name: &str, file_name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("dmn_cli_test").join(dir_name);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file_name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn run_evaluates_a_table_end_to_end_and_succeeds() {
        let table = write_temp(
            "discount",
            "table.json",
            r#"{
                "inputs": [
                    {"expression": "customer"},
                    {"expression": "orderSize"}
                ],
                "outputs": [{}],
                "rules": [
                    {
                        "input_entries": ["customer == \"Business\"", "orderSize >= 5"],
                        "output_entries": ["0.1"]
                    }
                ],
                "hit_policy": "UNIQUE"
            }"#,
        );
        let vars = write_temp(
            "discount",
            "vars.json",
            r#"{"customer": "Business", "orderSize": 7}"#,
        );

        run(table, vars).expect("a well-formed table and matching variables evaluate cleanly");
    }

    #[test]
    fn run_reports_an_error_for_a_missing_table_file() {
        let table = std::env::temp_dir().join("dmn_cli_test_does_not_exist.json");
        let vars = write_temp("missing_table", "vars.json", "{}");

        assert!(run(table, vars).is_err());
    }
}
