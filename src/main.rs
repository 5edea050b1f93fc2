use std::error::Error;
use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};
use csv::{ReaderBuilder, Trim};
use tracing::Level;

use feasibility::constants::CONFIGURATION_ERROR_CODE;
use feasibility::{Engine, Event, Policy, Simulation, Task, TaskSet, TimeStep, ID};

/// Reads a task set file and returns a `TaskSet`.
///
/// One task per line, `C, D, T[, P]`, no header. Ids follow line order.
pub fn read_task_file(file_path: &String) -> Result<TaskSet, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_path(file_path)?;
    let mut tasks = Vec::new();

    let mut id: ID = 1;

    for result in rdr.records() {
        let record = result?;
        if record.len() < 3 {
            return Err(format!("line {}: expected C, D, T[, P]", id).into());
        }

        let computation_time: TimeStep = record[0].parse()?;
        let deadline: TimeStep = record[1].parse()?;
        let period: TimeStep = record[2].parse()?;
        let priority: i32 = match record.get(3) {
            Some(field) if !field.is_empty() => field.parse()?,
            _ => 0,
        };

        tasks.push(Task::new(id, computation_time, deadline, period, priority)?);
        id += 1;
    }

    Ok(TaskSet::new(tasks)?)
}

/// Built-in task sets: the fixed-priority exercise and the EDF example.
pub fn demo_task_set(name: &str) -> Result<TaskSet, Box<dyn Error>> {
    let params: &[(TimeStep, TimeStep, TimeStep, i32)] = match name {
        "fixed" => &[(2, 7, 7, 20), (3, 11, 11, 15), (5, 13, 13, 10)],
        "edf" => &[(2, 5, 5, 0), (1, 3, 6, 0), (1, 7, 8, 0)],
        _ => return Err(format!("unknown demo task set '{}'", name).into()),
    };

    let tasks = params
        .iter()
        .enumerate()
        .map(|(i, &(c, d, t, p))| Task::new(i as ID + 1, c, d, t, p))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TaskSet::new(tasks)?)
}

pub fn parse_policy(name: &str) -> Option<Policy> {
    match name {
        "hpf" => Some(Policy::Static),
        "rm" => Some(Policy::RateMonotonic),
        "dm" => Some(Policy::DeadlineMonotonic),
        "edf" => Some(Policy::EarliestDeadlineFirst),
        _ => None,
    }
}

pub fn build_cli_command() -> Command {
    Command::new("feasibility")
    .version("0.1.0")
    .about("Checks the feasibility of periodic task sets by simulation (HPF, RM, DM, EDF)")
    .disable_version_flag(true)

    .arg(Arg::new("task_file")
        .required_unless_present("demo")
        .conflicts_with("demo")
        .help("Path to the task set file (C, D, T[, P] per line)"))

    .arg(Arg::new("algorithm")
        .short('a')
        .long("algorithm")
        .required(true)
        .help("Scheduling policy")
        .value_parser(["hpf", "rm", "dm", "edf"]))

    .arg(Arg::new("horizon")
        .short('H')
        .long("horizon")
        .help("Number of time units to simulate (default: 100, or 24 for EDF)")
        .value_parser(clap::value_parser!(TimeStep)))

    .arg(Arg::new("demo")
        .short('d')
        .long("demo")
        .help("Use a built-in task set instead of a file")
        .value_parser(["fixed", "edf"]))

    .arg(Arg::new("quiet")
        .short('q')
        .long("quiet")
        .action(ArgAction::SetTrue)
        .help("Only print the verdict"))

    .arg(Arg::new("verbose")
        .long("verbose")
        .action(ArgAction::SetTrue)
        .help("Log every tick to stderr"))
}

fn print_configuration(engine: &Engine) {
    let taskset = engine.taskset();

    println!("Algorithm: {}", engine.policy());
    println!("+--------+-----+-----+-----+-------+");
    println!("| Task   |  C  |  D  |  T  |   P   |");
    println!("+--------+-----+-----+-----+-------+");
    for task in taskset.iter() {
        let priority = if engine.policy().is_fixed_priority() {
            task.priority().to_string()
        } else {
            "-".to_string()
        };
        println!(
            "| T{:<5} | {:>3} | {:>3} | {:>3} | {:>5} |",
            task.id(), task.wcet(), task.deadline(), task.period(), priority
        );
    }
    println!("+--------+-----+-----+-----+-------+");

    println!("\nUtilisation:");
    for task in taskset.iter() {
        println!("   U{} = {}/{} = {:.3}", task.id(), task.wcet(), task.period(), task.utilisation());
    }
    println!("   U_total = {:.3}", taskset.utilisation());
    println!(
        "   U <= 1.0 => {}",
        if taskset.utilisation_respected() { "respected" } else { "violated" }
    );
    match taskset.hyperperiod() {
        Some(hyperperiod) => println!("Hyperperiod: {}", hyperperiod),
        None => println!("Hyperperiod: overflow"),
    }
}

fn print_trace(simulation: &Simulation) {
    for tick in simulation.ticks.iter() {
        println!("\n--- t = {} ---", tick.time);
        for event in tick.events.iter() {
            println!("    >> {}", event);
        }
        if tick.events.iter().all(|event| matches!(event, Event::Activated { .. } | Event::DeadlineMissed { .. })) {
            continue;
        }
        if tick.pending.is_empty() {
            println!("    queue: (empty)");
        }
        for job in tick.pending.iter() {
            println!(
                "    queue: task {} (deadline {}, remaining {})",
                job.task_id, job.absolute_deadline, job.remaining
            );
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    // cargo run -- <task_file> -a hpf|rm|dm|edf [-H <horizon>] [-q] [--verbose]
    // example : cargo run -- --demo edf -a edf -H 24
    let matches: ArgMatches = build_cli_command().get_matches();
    init_logging(matches.get_flag("verbose"));

    let taskset = match matches.get_one::<String>("demo") {
        Some(name) => demo_task_set(name),
        None => match matches.get_one::<String>("task_file") {
            Some(path) => read_task_file(path),
            None => Err("a task file or --demo is required".into()),
        },
    };
    let taskset = match taskset {
        Ok(taskset) => taskset,
        Err(e) => {
            eprintln!("Error reading task set: {}", e);
            process::exit(CONFIGURATION_ERROR_CODE);
        }
    };

    // The value parser only lets known names through.
    let Some(policy) = matches.get_one::<String>("algorithm").and_then(|name| parse_policy(name)) else {
        eprintln!("Invalid algorithm. Please use 'hpf', 'rm', 'dm' or 'edf'.");
        process::exit(CONFIGURATION_ERROR_CODE);
    };
    let horizon = matches
        .get_one::<TimeStep>("horizon")
        .copied()
        .unwrap_or_else(|| policy.default_horizon());

    let mut engine = match Engine::new(taskset, policy) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            process::exit(CONFIGURATION_ERROR_CODE);
        }
    };

    let quiet = matches.get_flag("quiet");
    if !quiet {
        print_configuration(&engine);
    }

    let simulation = match engine.run(horizon) {
        Ok(simulation) => simulation,
        Err(e) => {
            eprintln!("Simulation error: {}", e);
            process::exit(CONFIGURATION_ERROR_CODE);
        }
    };

    if !quiet {
        print_trace(&simulation);
        println!();
    }
    println!("{}", simulation.result);

    process::exit(simulation.result.code());
}

#[cfg(test)]
mod tests {
    use super::*;
    use feasibility::{simulation, Feasibility};

    #[test]
    fn test_read_task_file_valid() {
        let task_file_content = "\
            2, 7, 7, 20\n\
            3, 11, 11\n\
            5, 13, 13, 10";
        let file_path = "test_feasibility_tasks.csv";

        std::fs::write(file_path, task_file_content).expect("Unable to write test file");

        let taskset = read_task_file(&file_path.to_string()).expect("Failed to read task set");
        let task = &taskset.get_tasks()[0];

        assert_eq!(taskset.get_tasks().len(), 3);
        assert_eq!(task.id(), 1);
        assert_eq!(task.wcet(), 2);
        assert_eq!(task.deadline(), 7);
        assert_eq!(task.period(), 7);
        assert_eq!(task.priority(), 20);
        assert_eq!(taskset.get_tasks()[1].priority(), 0);
        assert_eq!(taskset.get_tasks()[2].id(), 3);

        std::fs::remove_file(file_path).expect("Failed to clean up test file");
    }

    #[test]
    fn test_read_task_file_invalid_format() {
        let task_file_content = "Invalid, Data";
        let file_path = "test_feasibility_invalid.csv";

        std::fs::write(file_path, task_file_content).expect("Unable to write test file");

        let result = read_task_file(&file_path.to_string());
        assert!(result.is_err());

        std::fs::remove_file(file_path).expect("Failed to clean up test file");
    }

    #[test]
    fn test_read_task_file_rejects_non_positive_values() {
        let file_path = "test_feasibility_zero.csv";

        std::fs::write(file_path, "2, 5, 0").expect("Unable to write test file");
        assert!(read_task_file(&file_path.to_string()).is_err());

        std::fs::write(file_path, "-1, 5, 5").expect("Unable to write test file");
        assert!(read_task_file(&file_path.to_string()).is_err());

        std::fs::remove_file(file_path).expect("Failed to clean up test file");
    }

    #[test]
    fn test_demo_task_sets() {
        let edf = demo_task_set("edf").unwrap();
        assert_eq!(edf.len(), 3);
        assert!((edf.utilisation() - (2.0 / 5.0 + 1.0 / 6.0 + 1.0 / 8.0)).abs() < 1e-12);

        let fixed = demo_task_set("fixed").unwrap();
        let result = simulation(fixed, Policy::Static, 100).unwrap().result;
        assert_eq!(result, Feasibility::Infeasible { at_tick: 13, task_id: 3 });

        assert!(demo_task_set("unknown").is_err());
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!(parse_policy("hpf"), Some(Policy::Static));
        assert_eq!(parse_policy("rm"), Some(Policy::RateMonotonic));
        assert_eq!(parse_policy("dm"), Some(Policy::DeadlineMonotonic));
        assert_eq!(parse_policy("edf"), Some(Policy::EarliestDeadlineFirst));
        assert_eq!(parse_policy("rr"), None);
    }

    #[test]
    fn test_command_line_arguments() {
        let matches = build_cli_command().try_get_matches_from(vec![
            "feasibility",
            "tasks.csv",
            "-a",
            "rm",
            "-H",
            "50",
        ]);

        assert!(matches.is_ok());
        let matches = matches.unwrap();

        assert_eq!(matches.get_one::<String>("task_file").unwrap(), "tasks.csv");
        assert_eq!(matches.get_one::<String>("algorithm").unwrap(), "rm");
        assert_eq!(*matches.get_one::<TimeStep>("horizon").unwrap(), 50);
        assert!(!matches.get_flag("quiet"));
    }

    #[test]
    fn test_command_line_demo_without_file() {
        let matches = build_cli_command()
            .try_get_matches_from(vec!["feasibility", "--demo", "edf", "-a", "edf", "-q"])
            .unwrap();

        assert_eq!(matches.get_one::<String>("demo").unwrap(), "edf");
        assert!(matches.get_one::<TimeStep>("horizon").is_none());
        assert!(matches.get_flag("quiet"));
    }

    #[test]
    fn test_command_line_rejects_missing_input_and_unknown_algorithm() {
        assert!(build_cli_command().try_get_matches_from(vec!["feasibility", "-a", "edf"]).is_err());
        assert!(build_cli_command()
            .try_get_matches_from(vec!["feasibility", "tasks.csv", "-a", "rr"])
            .is_err());
        assert!(build_cli_command()
            .try_get_matches_from(vec!["feasibility", "tasks.csv", "--demo", "edf", "-a", "edf"])
            .is_err());
    }
}
