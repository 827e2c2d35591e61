use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use wlf_cli::runner::{RunReport, build_form, run_scenario};
use wlf_cli::scenario::Scenario;
use wlf_cli::summary::{fields_table, print_summary};

use crate::cli::ScenarioArgs;

fn scenario_name<'a>(scenario: &'a Scenario, path: &'a Path) -> &'a str {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("scenario");
    scenario.display_name(stem)
}

pub fn run_run(args: &ScenarioArgs) -> Result<RunReport> {
    let scenario = Scenario::load(&args.scenario)?;
    let report = run_scenario(&scenario, scenario_name(&scenario, &args.scenario))?;
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serialize report")?
        );
    } else {
        print_summary(&report);
    }
    Ok(report)
}

pub fn run_check(args: &ScenarioArgs) -> Result<()> {
    let scenario = Scenario::load(&args.scenario)?;
    let name = scenario_name(&scenario, &args.scenario);
    let built = build_form(&scenario)?;
    info!(scenario = %name, fields = built.fields.len(), "scenario is well-formed");
    if args.json {
        let fields: Vec<_> = built
            .fields
            .iter()
            .map(|field| {
                serde_json::json!({
                    "name": field.name,
                    "path": field.handle.path(),
                    "mode": field.policy.mode,
                    "reValidateMode": field.policy.revalidate_mode,
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&fields).context("serialize fields")?
        );
    } else {
        println!("Scenario: {name}");
        println!("{}", fields_table(&built));
        println!(
            "{} field(s), {} event(s)",
            built.fields.len(),
            scenario.events.len()
        );
    }
    Ok(())
}
