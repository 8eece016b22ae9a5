use anyhow::{bail, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use matrixcalc_cli::draft::MatrixDraft;
use matrixcalc_cli::history::{CalculationRecord, HistoryStore, JsonHistory, StoredResult};
use matrixcalc_cli::io::{read_matrix_file, write_result_file};
use matrixcalc_cli::settings::{load_settings, CalcSettings};
use matrixcalc_engine::format::format_result;
use matrixcalc_engine::ops::{evaluate, Operation};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("MATRIXCALC_LOG", "error,matrixcalc=info"))
        .init();

    let matches = Command::new("matrixcalc")
        .version(clap::crate_version!())
        .about("Matrix calculator - dense linear algebra from the command line")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("eval")
                .about("Evaluate an operation on one or two matrices")
                .arg(
                    Arg::new("operation")
                        .help("Operation to perform")
                        .required(true)
                        .value_parser(Operation::NAMES),
                )
                .arg(
                    Arg::new("matrix_a")
                        .short('a')
                        .long("matrix-a")
                        .help("Path to the first matrix (CSV or TSV, no header)")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("matrix_b")
                        .short('b')
                        .long("matrix-b")
                        .help("Path to the second matrix, required by binary operations")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Write the result to this CSV/TSV file in addition to stdout")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("save")
                        .long("save")
                        .help("Append this calculation to the history file")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Fail on empty cells instead of treating them as zeros")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("precision")
                        .long("precision")
                        .help("Decimals shown in the rendered result. Overrides the settings file.")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .help("Path to a JSON settings file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("history")
                .about("Inspect or edit the saved calculation history")
                .subcommand_required(true)
                .arg(
                    Arg::new("config")
                        .long("config")
                        .help("Path to a JSON settings file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath)
                        .global(true),
                )
                .arg(
                    Arg::new("history_file")
                        .long("history-file")
                        .help("History file to operate on. Overrides the settings file.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath)
                        .global(true),
                )
                .subcommand(Command::new("list").about("List saved calculations"))
                .subcommand(
                    Command::new("delete")
                        .about("Delete one saved calculation by id")
                        .arg(Arg::new("id").help("Id of the record to delete").required(true)),
                )
                .subcommand(Command::new("clear").about("Delete all saved calculations")),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("eval", sub_m)) => {
            if let Err(e) = run_eval(sub_m) {
                log::error!("Evaluation failed: {:#}", e);
                std::process::exit(1)
            }
            Ok(())
        }
        Some(("history", sub_m)) => {
            if let Err(e) = run_history(sub_m) {
                log::error!("History command failed: {:#}", e);
                std::process::exit(1)
            }
            Ok(())
        }
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn settings_from(matches: &ArgMatches) -> Result<CalcSettings> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => load_settings(path),
        None => Ok(CalcSettings::default()),
    }
}

fn run_eval(matches: &ArgMatches) -> Result<()> {
    let mut settings = settings_from(matches)?;
    if let Some(&precision) = matches.get_one::<usize>("precision") {
        settings.precision = precision;
    }

    let op_name: &String = matches.get_one("operation").unwrap();
    let op: Operation = op_name.parse()?;

    let path_a: &PathBuf = matches.get_one("matrix_a").unwrap();
    let draft_a = read_matrix_file(path_a)?;
    let draft_b = match matches.get_one::<PathBuf>("matrix_b") {
        Some(path) => Some(read_matrix_file(path)?),
        None => None,
    };

    if op.is_binary() && draft_b.is_none() {
        bail!("Operation '{}' requires --matrix-b", op);
    }

    let strict = matches.get_flag("strict");
    let first = resolve(&draft_a, strict)?;
    let second = match &draft_b {
        Some(draft) => Some(resolve(draft, strict)?),
        None => None,
    };

    log::info!(
        "Evaluating '{}' on {}x{} input",
        op,
        first.nrows(),
        first.ncols()
    );
    let result = evaluate(op, &first, second.as_ref())?;

    println!("{}", format_result(&result, settings.precision));

    if let Some(output) = matches.get_one::<PathBuf>("output") {
        write_result_file(output, &result, settings.precision)?;
        log::info!("Result written to {}", output.display());
    }

    if matches.get_flag("save") {
        let store = JsonHistory::new(&settings.history_path);
        let record = CalculationRecord::new(draft_a, draft_b, &result);
        let id = record.id.clone();
        store.append(record)?;
        log::info!("Calculation saved with id {}", id);
    }

    Ok(())
}

fn resolve(
    draft: &MatrixDraft,
    strict: bool,
) -> Result<matrixcalc_engine::math::Matrix<f64>> {
    if strict {
        Ok(draft.resolve_strict()?)
    } else {
        Ok(draft.resolve_zeros())
    }
}

fn run_history(matches: &ArgMatches) -> Result<()> {
    let settings = settings_from(matches)?;
    let history_path = matches
        .get_one::<PathBuf>("history_file")
        .cloned()
        .unwrap_or(settings.history_path);
    let store = JsonHistory::new(&history_path);

    match matches.subcommand() {
        Some(("list", _)) => {
            let records = store.load_all()?;
            if records.is_empty() {
                println!("No saved calculations yet.");
                return Ok(());
            }
            for record in &records {
                let shape = match &record.result {
                    StoredResult::Real(rows) => {
                        format!("{}x{}", rows.len(), rows.first().map_or(0, Vec::len))
                    }
                    StoredResult::Complex(rows) => {
                        format!("{}x{} complex", rows.len(), rows.first().map_or(0, Vec::len))
                    }
                };
                println!("{}  {}  result {}", record.id, record.timestamp, shape);
            }
            Ok(())
        }
        Some(("delete", delete_m)) => {
            let id: &String = delete_m.get_one("id").unwrap();
            if store.delete_by_id(id)? {
                println!("Deleted calculation {}", id);
            } else {
                log::warn!("No saved calculation with id {}", id);
            }
            Ok(())
        }
        Some(("clear", _)) => {
            store.clear_all()?;
            println!("Cleared all saved calculations.");
            Ok(())
        }
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}
