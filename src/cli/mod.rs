//! Command-line surface over the engine: reads JSON requests, prints JSON.

pub mod requests;

use serde::Serialize;
use tracing::info;

use crate::{
    config::Config,
    engine::{
        aggregate_fleet_history, aggregate_validated, compare_jobs, outlook, reveal,
        CommuteCostModel, DailyLedgerEntry, GatedFeature, SubscriptionTier, TrueCompensation,
        Visibility, VisibilityTable,
    },
    errors::CliError,
    time::Clock,
    utils::{build_info, input::read_json},
};

use requests::{
    CashFlowRequest, CashFlowResponse, CommuteRequest, CommuteResponse, JobsRequest,
    VehiclesRequest, VehiclesResponse,
};

pub const USAGE: &str = "Usage: forecast_core_cli <command>\n\
Commands:\n  \
commute <file.json|->\n  \
jobs <file.json|->\n  \
cashflow <file.json|->\n  \
vehicles <file.json|->\n  \
visibility <tier> <feature>\n  \
version";

/// Everything a command needs besides its arguments.
pub struct CliContext {
    pub config: Config,
    pub clock: Box<dyn Clock>,
}

impl CliContext {
    pub fn new(config: Config, clock: Box<dyn Clock>) -> Self {
        Self { config, clock }
    }

    fn visibility_table(&self) -> VisibilityTable {
        self.config.visibility_table()
    }

    /// Requests without a tier see everything.
    fn resolve(&self, tier: Option<SubscriptionTier>, feature: GatedFeature) -> Visibility {
        tier.map(|tier| self.visibility_table().resolve(tier, feature))
            .unwrap_or(Visibility::Full)
    }
}

/// Runs one command and returns the text to print on stdout.
pub fn run(args: &[String], ctx: &CliContext) -> Result<String, CliError> {
    let (command, rest) = args
        .split_first()
        .ok_or_else(|| CliError::Input(USAGE.to_string()))?;
    info!(command = %command, "running command");

    match command.as_str() {
        "commute" => render(&commute(single_arg(rest)?, ctx)?),
        "jobs" => {
            let request: JobsRequest = read_json(single_arg(rest)?)?;
            let year = request
                .reference_year
                .unwrap_or_else(|| ctx.clock.current_year());
            render(&compare_jobs(&request.offers, &ctx.config.rates, year)?)
        }
        "cashflow" => render(&cashflow(single_arg(rest)?, ctx)?),
        "vehicles" => render(&vehicles(single_arg(rest)?, ctx)?),
        "visibility" => {
            let [tier, feature] = rest else {
                return Err(CliError::Input(USAGE.to_string()));
            };
            let tier: SubscriptionTier = tier.parse()?;
            let feature: GatedFeature = feature.parse()?;
            render(&ctx.visibility_table().resolve(tier, feature))
        }
        "version" => Ok(build_info::current().summary()),
        other => Err(CliError::Command(format!(
            "unknown command `{other}`\n{USAGE}"
        ))),
    }
}

fn single_arg(rest: &[String]) -> Result<&str, CliError> {
    match rest {
        [source] => Ok(source.as_str()),
        _ => Err(CliError::Input(USAGE.to_string())),
    }
}

fn render<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|err| CliError::Command(err.to_string()))
}

fn commute(source: &str, ctx: &CliContext) -> Result<CommuteResponse, CliError> {
    let request: CommuteRequest = read_json(source)?;
    let year = request
        .reference_year
        .unwrap_or_else(|| ctx.clock.current_year());
    let breakdown =
        CommuteCostModel::compute(&request.vehicle, &request.commute, &ctx.config.rates, year)?;
    let compensation = request
        .monthly_salary
        .map(|salary| TrueCompensation::from_salary(salary, &breakdown))
        .transpose()?;
    Ok(CommuteResponse {
        breakdown,
        compensation,
    })
}

fn cashflow(source: &str, ctx: &CliContext) -> Result<CashFlowResponse, CliError> {
    let request: CashFlowRequest = read_json(source)?;
    let tier = request.tier;
    let entries: Vec<DailyLedgerEntry> = request
        .entries
        .into_iter()
        .map(|entry| entry.into_entry(&ctx.config.thresholds))
        .collect();
    // One rejected entry fails the whole request; nothing is skipped.
    let months = aggregate_validated(&entries)?;
    let breakdown_visibility = ctx.resolve(tier, GatedFeature::MonthlyBreakdown);
    let chart_visibility = ctx.resolve(tier, GatedFeature::NinetyDayChart);
    let shown = reveal(&months, breakdown_visibility).to_vec();
    let headline = if chart_visibility.is_locked() {
        None
    } else {
        outlook(&entries)
    };
    Ok(CashFlowResponse {
        breakdown_visibility,
        hidden_months: months.len() - shown.len(),
        months: shown,
        chart_visibility,
        outlook: headline,
    })
}

fn vehicles(source: &str, ctx: &CliContext) -> Result<VehiclesResponse, CliError> {
    let request: VehiclesRequest = read_json(source)?;
    let drill_down_visibility = ctx.resolve(request.tier, GatedFeature::VehicleDrillDown);
    let mut months = aggregate_fleet_history(&request.records)?;
    for month in &mut months {
        month.vehicles = reveal(&month.vehicles, drill_down_visibility).to_vec();
    }
    Ok(VehiclesResponse {
        drill_down_visibility,
        months,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BalanceStatus;
    use crate::time::FixedClock;
    use chrono::NaiveDate;

    fn ctx() -> CliContext {
        CliContext::new(
            Config::default(),
            Box::new(FixedClock::on(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())),
        )
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn visibility_command_prints_tagged_decision() {
        let out = run(&args(&["visibility", "budget", "monthly-breakdown"]), &ctx()).unwrap();
        assert!(out.contains("partial_preview"));
        assert!(out.contains("3"));
    }

    #[test]
    fn unknown_command_is_reported() {
        let err = run(&args(&["frobnicate"]), &ctx()).unwrap_err();
        assert!(err.to_string().contains("frobnicate"));
    }

    #[test]
    fn missing_arguments_show_usage() {
        assert!(matches!(run(&[], &ctx()), Err(CliError::Input(_))));
        assert!(matches!(
            run(&args(&["visibility", "budget"]), &ctx()),
            Err(CliError::Input(_))
        ));
    }

    #[test]
    fn cashflow_hides_months_beyond_preview() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let entries: Vec<String> = (1..=5)
            .map(|month| {
                format!(
                    r#"{{"date":"2024-0{month}-01","opening_balance":100.0,"closing_balance":90.0,"net_change":-10.0,"status":"warning"}}"#
                )
            })
            .collect();
        let body = format!(r#"{{"tier":"budget","entries":[{}]}}"#, entries.join(","));
        std::fs::write(file.path(), body).unwrap();

        let path = file.path().to_str().unwrap();
        let response = cashflow(path, &ctx()).unwrap();
        assert_eq!(response.months.len(), 3);
        assert_eq!(response.hidden_months, 2);
        assert!(response.outlook.is_none());
    }

    #[test]
    fn cashflow_classifies_missing_status_with_configured_floor() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"{"entries":[
                {"date":"2024-06-01","opening_balance":900.0,"closing_balance":800.0},
                {"date":"2024-06-02","opening_balance":800.0,"closing_balance":700.0,"status":"healthy"}
            ]}"#,
        )
        .unwrap();
        let mut context = ctx();
        context.config.thresholds.healthy_floor = 750.0;

        let response = cashflow(file.path().to_str().unwrap(), &context).unwrap();
        assert_eq!(response.months[0].worst_status, BalanceStatus::Healthy);
        assert_eq!(response.months[0].total_expenses, 200.0);

        context.config.thresholds.healthy_floor = 850.0;
        let response = cashflow(file.path().to_str().unwrap(), &context).unwrap();
        assert_eq!(response.months[0].worst_status, BalanceStatus::Warning);
    }
}
