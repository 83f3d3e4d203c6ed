use clap::{App, Arg};
use proplogic::*;
use std::io::Read;

fn main() {
    env_logger::init();

    let matches = App::new("proplogic")
        .about("Parse, normalize and decide propositional formulas")
        .arg(
            Arg::with_name("FORMULA")
                .help("formula such as \"(A & B) -> ~C\" (read from stdin if absent)")
                .index(1),
        )
        .arg(
            Arg::with_name("assign")
                .short("a")
                .long("assign")
                .value_name("ATOM=VALUE,...")
                .help("evaluate under the given assignment, e.g. A=1,B=0")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("models")
                .short("m")
                .long("models")
                .help("list every satisfying assignment"),
        )
        .get_matches();

    let text = match matches.value_of("FORMULA") {
        Some(text) => text.to_string(),
        None => {
            let mut buf = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
                eprintln!("error reading stdin: {}", e);
                std::process::exit(1);
            }
            buf
        }
    };

    let formula = match parse(&text) {
        Ok(formula) => formula,
        Err(e) => {
            eprintln!("parse error: {}", e);
            std::process::exit(1);
        }
    };

    let assignment = match matches.value_of("assign").map(parse_assignment).transpose() {
        Ok(assignment) => assignment,
        Err(e) => {
            eprintln!("invalid assignment: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = report(&formula, assignment.as_ref(), matches.is_present("models")) {
        eprintln!("error: {}", e);
        std::process::exit(2);
    }
}

fn report(formula: &Proposition, assignment: Option<&Assignment>, models: bool) -> Result<(), LogicError> {
    let nnf = to_nnf(formula)?;
    let cnf = to_cnf(&nnf)?;
    println!("formula:       {}", formula);
    println!("nnf:           {}", nnf);
    println!("cnf:           {}", cnf);
    println!("tautology:     {}", is_tautology(formula)?);
    println!("contradiction: {}", is_contradiction(formula)?);

    if let Some(assignment) = assignment {
        println!("value:         {}", evaluate(formula, assignment)?);
    }

    if models {
        for model in true_assignments(formula)? {
            println!("{}", model);
        }
    }
    Ok(())
}

/// `A=1,B=false` style assignments.
fn parse_assignment(text: &str) -> Result<Assignment, String> {
    let mut assignment = Assignment::new();
    for entry in text.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, value) = match entry.find('=') {
            Some(i) => (&entry[..i], &entry[i + 1..]),
            None => (entry, "1"),
        };
        let atom: Atom = name
            .trim()
            .to_ascii_uppercase()
            .parse()
            .map_err(|e: LogicError| e.to_string())?;
        let value = match value.trim().to_ascii_lowercase().as_str() {
            "1" | "t" | "true" => true,
            "0" | "f" | "false" => false,
            _ => return Err(format!("'{}' is not a truth value", value)),
        };
        assignment.insert(atom, value);
    }
    Ok(assignment)
}
