use calcc::{repl, runner, RunOptions};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::fs;
use std::path::Path;
use std::process;

fn cli() -> Command {
    Command::new("calcc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Arithmetic expression compiler with readable error diagnostics")
        .arg(
            Arg::new("file")
                .help("File with one expression per line")
                .value_name("FILE")
                .index(1)
                .conflicts_with("expr"),
        )
        .arg(
            Arg::new("expr")
                .short('e')
                .long("expr")
                .value_name("EXPR")
                .help("Evaluate a single expression and exit"),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start the interactive REPL, after running FILE or EXPR if given")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tree")
                .long("tree")
                .help("Print the parenthesized expression tree with each result")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Reject numbers with leading zeros such as 08")
                .action(ArgAction::SetTrue),
        )
}

/// -i drops into the REPL after any FILE or EXPR has run; with neither the REPL is the default.
fn wants_repl(matches: &ArgMatches) -> bool {
    matches.get_flag("interactive") || (!matches.contains_id("expr") && !matches.contains_id("file"))
}

fn main() {
    env_logger::init();

    let matches = cli().get_matches();

    let options = RunOptions {
        show_tree: matches.get_flag("tree"),
        strict: matches.get_flag("strict"),
    };

    let ok = if let Some(expr) = matches.get_one::<String>("expr") {
        runner::run_line(expr, Some("<expr>"), &options)
    } else if let Some(file_path) = matches.get_one::<String>("file") {
        run_file(file_path, &options)
    } else {
        true
    };

    if wants_repl(&matches) {
        repl::start(&options);
    }

    if !ok {
        process::exit(1);
    }
}

fn run_file(path: &str, options: &RunOptions) -> bool {
    let path = Path::new(path);

    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        return false;
    }

    match fs::read_to_string(path) {
        Ok(source) => {
            let name = path.display().to_string();
            runner::run(&source, Some(&name), options)
        }
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repl_for(args: &[&str]) -> bool {
        let matches = cli().try_get_matches_from(args).unwrap();
        wants_repl(&matches)
    }

    #[test]
    fn bare_invocation_starts_the_repl() {
        assert!(repl_for(&["calcc"]));
        assert!(repl_for(&["calcc", "--tree"]));
    }

    #[test]
    fn interactive_flag_forces_the_repl() {
        assert!(repl_for(&["calcc", "-i"]));
        assert!(repl_for(&["calcc", "-i", "script.calc"]));
        assert!(repl_for(&["calcc", "--interactive", "-e", "1 + 2"]));
    }

    #[test]
    fn file_or_expr_alone_skips_the_repl() {
        assert!(!repl_for(&["calcc", "script.calc"]));
        assert!(!repl_for(&["calcc", "-e", "1 + 2"]));
    }

    #[test]
    fn file_and_expr_conflict() {
        assert!(cli().try_get_matches_from(["calcc", "a.calc", "-e", "1"]).is_err());
    }
}
