use std::sync::Arc;

use appraise_core::config::AppConfig;
use appraise_core::error::AppError;
use appraise_core::reviews::{
    CompetencyCategory, CompetencyDraft, EmployeeId, Evaluation, EvaluationKind, EvaluationStatus,
    ManagerialLevel, MemoryRepository, MemoryWeightConfigs, NewEvaluation, ObjectiveDraft,
    ObjectiveStatus, ReviewRepository, ReviewService, ReviewServiceError, ScoreCard,
    WeightConfiguration,
};
use appraise_core::telemetry;
use chrono::{Datelike, Local};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "appraise",
    about = "Walk the performance-review scoring engine from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Seed an in-memory review cycle and print the scoring trail (default command)
    Demo(DemoArgs),
    /// Print the built-in weight configuration table
    Weights,
}

#[derive(Args, Debug)]
struct DemoArgs {
    /// Managerial level for the demo employee (ic, supervisory, middle, executive)
    #[arg(long, default_value = "ic", value_parser = parse_level)]
    level: ManagerialLevel,
    /// Review period label (defaults to the current year's mid cycle)
    #[arg(long)]
    period: Option<String>,
    /// Emit the final summary as JSON instead of text
    #[arg(long)]
    json: bool,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            level: ManagerialLevel::IndividualContributor,
            period: None,
            json: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct DemoSummary {
    period: String,
    level: &'static str,
    objective_weights: Vec<Decimal>,
    competency_weights: Vec<Decimal>,
    readiness_findings: Vec<String>,
    scorecard: ScoreCard,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Demo(DemoArgs::default()));

    match command {
        Command::Demo(args) => run_demo(args),
        Command::Weights => {
            render_weight_table();
            Ok(())
        }
    }
}

fn parse_level(raw: &str) -> Result<ManagerialLevel, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "ic" | "individual-contributor" => Ok(ManagerialLevel::IndividualContributor),
        "supervisory" | "supervisor" => Ok(ManagerialLevel::Supervisory),
        "middle" | "middle-management" => Ok(ManagerialLevel::MiddleManagement),
        "executive" | "exec" => Ok(ManagerialLevel::Executive),
        other => Err(format!(
            "unknown level '{other}', expected ic, supervisory, middle, or executive"
        )),
    }
}

fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let repository = Arc::new(MemoryRepository::default());
    let weight_configs = Arc::new(MemoryWeightConfigs::with_standard_table());
    let service = if config.scoring.cap_overachievement {
        ReviewService::new(repository.clone(), weight_configs)
    } else {
        ReviewService::new(repository.clone(), weight_configs).with_uncapped_ratios()
    };

    let period = args
        .period
        .unwrap_or_else(|| format!("{}-Mid", Local::now().year()));

    let evaluation = service.create_evaluation(NewEvaluation {
        employee: EmployeeId("emp-000042".to_string()),
        reviewer: None,
        managerial_level: args.level,
        period: period.clone(),
        kind: EvaluationKind::Annual,
        status: EvaluationStatus::Draft,
    })?;

    info!(evaluation = %evaluation.id.0, period = %period, "demo review cycle opened");

    for (title, target, achieved) in [
        ("Cut onboarding time to five days", "5", Some("7")),
        ("Close twelve enterprise renewals", "12", Some("9")),
        ("Ship the quarterly planning portal", "1", Some("1")),
    ] {
        service.add_objective(
            &evaluation.id,
            ObjectiveDraft {
                title: title.to_string(),
                description: String::new(),
                target: Some(parse_decimal(target)?),
                achieved: achieved.map(parse_decimal).transpose()?,
                status: ObjectiveStatus::InProgress,
            },
        )?;
    }

    for (name, category, actual) in [
        ("Ownership", CompetencyCategory::Core, 4),
        ("Communication", CompetencyCategory::Core, 3),
        ("Coaching", CompetencyCategory::Leadership, 3),
        ("Domain expertise", CompetencyCategory::Functional, 4),
    ] {
        service.add_competency(
            &evaluation.id,
            CompetencyDraft {
                name: name.to_string(),
                category,
                required_level: 4,
                actual_level: actual,
                description: String::new(),
            },
        )?;
    }

    let objective_weights: Vec<Decimal> = repository
        .objectives_for(&evaluation.id)
        .map_err(ReviewServiceError::from)?
        .iter()
        .map(|objective| objective.weight)
        .collect();
    let competency_weights: Vec<Decimal> = repository
        .competencies_for(&evaluation.id)
        .map_err(ReviewServiceError::from)?
        .iter()
        .map(|competency| competency.weight)
        .collect();

    let readiness_findings: Vec<String> = service
        .validate_objectives(&evaluation.id)?
        .into_iter()
        .chain(service.validate_competencies(&evaluation.id)?)
        .map(|violation| violation.to_string())
        .collect();

    let scorecard = service.score(&evaluation.id)?;

    if args.json {
        let summary = DemoSummary {
            period,
            level: args.level.label(),
            objective_weights,
            competency_weights,
            readiness_findings,
            scorecard,
        };
        let rendered = serde_json::to_string_pretty(&summary).map_err(std::io::Error::other)?;
        println!("{rendered}");
        return Ok(());
    }

    render_demo(
        &evaluation,
        &objective_weights,
        &competency_weights,
        &readiness_findings,
        &scorecard,
    );
    Ok(())
}

fn parse_decimal(raw: &str) -> Result<Decimal, AppError> {
    raw.parse::<Decimal>().map_err(|err| {
        AppError::Io(std::io::Error::other(format!(
            "invalid number '{raw}': {err}"
        )))
    })
}

fn render_demo(
    evaluation: &Evaluation,
    objective_weights: &[Decimal],
    competency_weights: &[Decimal],
    readiness_findings: &[String],
    scorecard: &ScoreCard,
) {
    println!("Review scoring demo");
    println!(
        "Cycle {} for {} ({})",
        evaluation.period,
        evaluation.employee.0,
        evaluation.managerial_level.label()
    );
    println!(
        "Frozen weights: objectives {}%, competencies {}% (core {}, leadership {}, functional {})",
        evaluation.weights.objectives_pct,
        evaluation.weights.competencies_pct,
        evaluation.weights.core_pct,
        evaluation.weights.leadership_pct,
        evaluation.weights.functional_pct
    );

    println!("\nObjective weight shares");
    for weight in objective_weights {
        println!("- {weight}%");
    }

    println!("\nCompetency weight shares");
    for weight in competency_weights {
        println!("- {weight}%");
    }

    if readiness_findings.is_empty() {
        println!("\nReadiness checks: all clear");
    } else {
        println!("\nReadiness findings");
        for finding in readiness_findings {
            println!("- {finding}");
        }
    }

    println!("\nScorecard");
    println!("- objectives block: {}", scorecard.objectives_score);
    println!("- competencies block: {}", scorecard.competencies_score);
    println!("- final score: {}", scorecard.score);
}

fn render_weight_table() {
    println!("Standard weight configuration");
    for level in [
        ManagerialLevel::IndividualContributor,
        ManagerialLevel::Supervisory,
        ManagerialLevel::MiddleManagement,
        ManagerialLevel::Executive,
    ] {
        let WeightConfiguration {
            objective_weight,
            competency_weight,
            core_weight,
            leadership_weight,
            functional_weight,
            ..
        } = WeightConfiguration::standard(level);
        println!(
            "- {}: objectives {objective_weight}% / competencies {competency_weight}% (core {core_weight}, leadership {leadership_weight}, functional {functional_weight})",
            level.label()
        );
    }
}
