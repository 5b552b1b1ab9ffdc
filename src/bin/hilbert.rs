//! Hilbert CLI - интерактивное построение доказательств.
//!
//! Использование:
//!   hilbert                          - запустить REPL
//!   hilbert --solve "<task>"         - решить задачу
//!   hilbert --generate N VARS...     - сгенерировать задачу
//!   hilbert --table "<formula>"      - таблица истинности
//!   hilbert --help                   - справка

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use hilbert_prover::generator::generate_task;
use hilbert_prover::store::SnapshotStore;
use hilbert_prover::{
    AxiomPool, AxiomSet, Ledger, ProofError, ProofResult, ProofTask, Rule, Solver, SolverConfig,
    TruthTable,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Предел шагов решателя, если не задан `--max-steps`.
const DEFAULT_MAX_STEPS: usize = 2_000;

const HELP: &str = r#"
Hilbert - propositional proof assistant

USAGE:
    hilbert                          Start REPL (interactive mode)
    hilbert --solve "<task>"         Solve a task and print the proof
    hilbert --generate N VARS...     Generate a provable task with N hypotheses
    hilbert --table "<formula>"      Print the truth table of a formula
    hilbert --axioms <file> ...      Use base axioms from a JSON file
    hilbert --max-steps <n> ...      Solver step budget (default 2000)
    hilbert --help, -h               Show this help
    hilbert --version, -v            Show version

ENVIRONMENT:
    HILBERT_AXIOMS                   Base axiom file, same as --axioms
    HILBERT_MAX_STEPS                Solver step budget, same as --max-steps
    RUST_LOG                         Log level (error, warn, info, debug, trace)

REPL COMMANDS:
    :help, :h                        Show help
    :quit, :q, :exit                 Exit REPL
    :task {f1, f2} |- c              Start a new task
    :show, :s                        Show the task and all steps
    :hyp <formula>                   Add a hypothesis step
    :axiom <n> <f1>, <f2>, ...       Instantiate axiom schema n
    :rule <MP|MT|MTP|MPT|CS> <i> <j> Apply a rule to steps i and j
    :rollback <n>                    Delete step n and everything after it
    :hint                            Suggest a rule application
    :solve                           Search for a proof automatically
    :prune                           Remove tautological hypotheses
    :axioms                          List base and added axioms
    :add-axiom <formula>             Add a tautology as a new axiom
    :table <formula>                 Show the truth table of a formula
    :save <name>                     Save the ledger
    :load <name>                     Load a saved ledger
    :list                            List saved ledgers

FORMULAS:
    Variables:  A B C D F G H J K L M W R T Z U
    ~A          negation
    (A & B)     conjunction
    (A | B)     disjunction
    (A >> B)    implication
    Every binary subformula must be wrapped in exactly one pair of brackets.

EXAMPLES:
    hilbert --solve "{(A >> B), (B >> C)} |- (A >> C)"
    hilbert --generate 2 A B C
"#;

fn main() {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let axioms_path = take_flag_value(&mut args, "--axioms").or_else(|| env::var("HILBERT_AXIOMS").ok());
    let axioms = match axioms_path {
        Some(path) => load_axioms(&PathBuf::from(path)),
        None => match AxiomSet::standard() {
            Ok(axioms) => axioms,
            Err(e) => {
                eprintln!("Error in built-in axioms: {}", e);
                process::exit(1);
            }
        },
    };
    let max_steps = take_flag_value(&mut args, "--max-steps").or_else(|| env::var("HILBERT_MAX_STEPS").ok());
    let config = match solver_config(max_steps.as_deref()) {
        Ok(config) => config,
        Err(e) => usage_error(&e.to_string()),
    };

    match args.first().map(String::as_str) {
        None => run_repl(axioms, config),
        Some("--help") | Some("-h") => println!("{}", HELP),
        Some("--version") | Some("-v") => println!("Hilbert {}", VERSION),
        Some("--solve") => match args.get(1) {
            Some(task) => run_solve(task, axioms, config),
            None => usage_error("--solve needs a task like \"{(A >> B), A} |- B\""),
        },
        Some("--generate") => run_generate(&args[1..]),
        Some("--table") => match args.get(1) {
            Some(formula) => show_table(formula),
            None => usage_error("--table needs a formula"),
        },
        Some(other) => usage_error(&format!("Unknown option: {}", other)),
    }
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("Use --help for usage information.");
    process::exit(1);
}

/// Вынуть `<flag> <value>` из аргументов.
fn take_flag_value(args: &mut Vec<String>, flag: &str) -> Option<String> {
    let pos = args.iter().position(|a| a == flag)?;
    if pos + 1 >= args.len() {
        usage_error(&format!("{} needs a value", flag));
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    Some(value)
}

/// Настройки решателя: предел шагов всегда задан.
fn solver_config(max_steps: Option<&str>) -> ProofResult<SolverConfig> {
    let max_steps = match max_steps {
        None => DEFAULT_MAX_STEPS,
        Some(text) => match text.trim().parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => {
                return Err(ProofError::Construction(format!(
                    "'{}' is not a positive step budget",
                    text
                )))
            }
        },
    };
    Ok(SolverConfig {
        max_steps: Some(max_steps),
    })
}

fn load_axioms(path: &std::path::Path) -> AxiomSet {
    match AxiomSet::from_path(path) {
        Ok(axioms) => {
            log::info!("loaded {} axioms from {}", axioms.len(), path.display());
            axioms
        }
        Err(e) => {
            eprintln!("Error loading axioms: {}", e);
            process::exit(1);
        }
    }
}

/// Решить задачу из командной строки.
fn run_solve(summary: &str, axioms: AxiomSet, config: SolverConfig) {
    let task = match ProofTask::parse_summary(summary) {
        Ok(task) => task,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let mut ledger = Ledger::from_task(task, axioms);
    match Solver::new(config).solve(&mut ledger) {
        Ok(proof) => {
            println!("{}", ledger.summary());
            if proof.is_empty() {
                println!("The consequence is one of the hypotheses.");
            }
            print!("{}", proof);
        }
        Err(e) => {
            eprintln!("{}: {}", ledger.summary(), e);
            process::exit(2);
        }
    }
}

/// Сгенерировать задачу: `N VARS...`.
fn run_generate(args: &[String]) {
    let count = match args.first().and_then(|n| n.parse::<usize>().ok()) {
        Some(count) => count,
        None => usage_error("--generate needs a number of hypotheses"),
    };
    let variables: Vec<char> = args[1..].iter().flat_map(|v| v.chars()).collect();
    match generate_task(count, &variables) {
        Ok(task) => println!("{}", task),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn show_table(formula: &str) {
    match TruthTable::build(formula) {
        Some(table) => {
            print!("{}", table);
            if table.is_tautology() {
                println!("Tautology.");
            }
        }
        None => eprintln!("Invalid formula: {}", formula),
    }
}

// === REPL ===

struct Session {
    ledger: Option<Ledger>,
    axioms: AxiomSet,
    solver: Solver,
    store: SnapshotStore,
}

enum CommandResult {
    Continue,
    Exit,
}

/// Запустить REPL.
fn run_repl(axioms: AxiomSet, config: SolverConfig) {
    println!("Hilbert {} - propositional proof assistant", VERSION);
    println!("Type :help for commands, :quit to exit.\n");

    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Failed to initialize readline: {}", e);
            process::exit(1);
        }
    };

    let mut session = Session {
        ledger: None,
        axioms,
        solver: Solver::new(config),
        store: SnapshotStore::open_default(),
    };
    let history_path = dirs_next::data_dir()
        .map(|p| p.join("hilbert").join("history.txt"))
        .unwrap_or_else(|| PathBuf::from(".hilbert_history"));

    let _ = rl.load_history(&history_path);

    loop {
        match rl.readline("hilbert> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if !line.starts_with(':') {
                    println!("Commands start with ':'. Type :help for the list.");
                    continue;
                }
                match handle_command(line, &mut session) {
                    Ok(CommandResult::Continue) => {}
                    Ok(CommandResult::Exit) => break,
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Some(parent) = history_path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let _ = rl.save_history(&history_path);
}

fn handle_command(cmd: &str, session: &mut Session) -> ProofResult<CommandResult> {
    let (command, arg) = match cmd.split_once(' ') {
        Some((command, arg)) => (command, arg.trim()),
        None => (cmd, ""),
    };

    match command {
        ":help" | ":h" => println!("{}", HELP),
        ":quit" | ":q" | ":exit" => return Ok(CommandResult::Exit),
        ":task" | ":t" => {
            let task = ProofTask::parse_summary(arg)?;
            let ledger = Ledger::from_task(task, session.axioms.clone());
            if !ledger.is_provable() {
                println!("Warning: the consequence does not follow from the hypotheses.");
            }
            if ledger.is_terminated() {
                println!("The consequence is already a hypothesis.");
            }
            println!("{}", ledger.summary());
            session.ledger = Some(ledger);
        }
        ":show" | ":s" => show_ledger(ledger(session)?),
        ":hyp" => {
            let step = ledger_mut(session)?.add_hyp(arg)?;
            println!("{}", step);
            report_closed(ledger(session)?);
        }
        ":axiom" | ":ax" => add_axiom_step(arg, ledger_mut(session)?)?,
        ":rule" | ":r" => {
            let parts: Vec<&str> = arg.split_whitespace().collect();
            let (rule, first, second) = match parts.as_slice() {
                [rule, first, second] => (
                    Rule::from_tag(rule)
                        .ok_or_else(|| ProofError::Construction(format!("unknown rule '{}'", rule)))?,
                    step_number(first)?,
                    step_number(second)?,
                ),
                _ => {
                    println!("Usage: :rule <MP|MT|MTP|MPT|CS> <i> <j>");
                    return Ok(CommandResult::Continue);
                }
            };
            let step = ledger_mut(session)?.add_rule_step(rule, first, second)?;
            println!("{}", step);
            report_closed(ledger(session)?);
        }
        ":rollback" => {
            let index = step_number(arg)?;
            let ledger = ledger_mut(session)?;
            ledger.rollback(index)?;
            println!("{} steps left.", ledger.len());
        }
        ":hint" => match ledger(session)?.hint() {
            Some(hint) => println!(
                "Try {} on steps {} and {} (gives {})",
                hint.rule,
                hint.first + 1,
                hint.second + 1,
                hint.formula
            ),
            None => println!("No hint available."),
        },
        ":solve" => {
            let solver = session.solver.clone();
            let proof = solver.solve(ledger_mut(session)?)?;
            if proof.is_empty() {
                println!("The consequence is one of the hypotheses.");
            }
            print!("{}", proof);
        }
        ":prune" => {
            let removed = ledger_mut(session)?.prune_tautologies();
            println!("Removed {} tautological hypotheses.", removed);
        }
        ":axioms" => show_axioms(session),
        ":add-axiom" => {
            ledger_mut(session)?.add_user_axiom(arg)?;
            println!("Axiom added.");
        }
        ":table" => show_table(arg),
        ":save" => {
            let path = session.store.save_ledger(arg, ledger(session)?)?;
            println!("Saved to {}", path.display());
        }
        ":load" => {
            let loaded = session.store.load_ledger(arg, session.axioms.clone())?;
            println!("Loaded {}", loaded.summary());
            session.ledger = Some(loaded);
        }
        ":list" => {
            let names = session.store.list()?;
            if names.is_empty() {
                println!("No saved ledgers in {}.", session.store.root().display());
            }
            for name in names {
                println!("  {}", name);
            }
        }
        _ => {
            println!("Unknown command: {}", command);
            println!("Type :help for available commands.");
        }
    }
    Ok(CommandResult::Continue)
}

fn ledger(session: &Session) -> ProofResult<&Ledger> {
    session
        .ledger
        .as_ref()
        .ok_or_else(|| ProofError::Construction("no task, start one with :task".to_string()))
}

fn ledger_mut(session: &mut Session) -> ProofResult<&mut Ledger> {
    session
        .ledger
        .as_mut()
        .ok_or_else(|| ProofError::Construction("no task, start one with :task".to_string()))
}

/// Номер шага с 1 в индекс с 0.
fn step_number(text: &str) -> ProofResult<usize> {
    match text.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(ProofError::Construction(format!("'{}' is not a step number", text))),
    }
}

/// `:axiom <n> <f1>, <f2>, ...`
fn add_axiom_step(arg: &str, ledger: &mut Ledger) -> ProofResult<()> {
    let (number, data) = arg.split_once(' ').unwrap_or((arg, ""));
    let number = step_number(number)?;
    let base = ledger.base_axioms().len();
    let (pool, schema) = if number < base {
        (AxiomPool::Base, ledger.base_axioms().get(number))
    } else {
        (AxiomPool::Added, ledger.added_axioms().get(number - base))
    };
    let schema = schema
        .map(|axiom| axiom.formula().to_string())
        .ok_or_else(|| ProofError::UnknownAxiom(format!("#{}", number + 1)))?;

    let data: Vec<&str> = data.split(',').map(str::trim).filter(|d| !d.is_empty()).collect();
    let step = ledger.add_axiom(&schema, &data, pool)?;
    println!("{}", step);
    report_closed(ledger);
    Ok(())
}

fn report_closed(ledger: &Ledger) {
    if ledger.is_terminated() {
        println!("Proved: {}", ledger.summary());
    }
}

fn show_ledger(ledger: &Ledger) {
    println!("{}", ledger.summary());
    for line in ledger.render_steps() {
        println!("  {}", line);
    }
    if ledger.is_terminated() {
        println!("Proved.");
    }
}

fn show_axioms(session: &Session) {
    let (base, added) = match &session.ledger {
        Some(ledger) => (ledger.base_axioms(), Some(ledger.added_axioms())),
        None => (&session.axioms, None),
    };
    for (i, axiom) in base.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, axiom.formula());
    }
    if let Some(added) = added {
        for (i, axiom) in added.iter().enumerate() {
            println!("  {:>2}. {} (added)", base.len() + i + 1, axiom.formula());
        }
    }
}
