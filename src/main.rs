//! ushell: interactive shell over the built-in applications.
//!
//! Usage:
//!   ushell                 read-eval-print loop on stdin
//!   ushell -c "<line>"     evaluate one line and exit
//!   ushell --dump-config   print the merged configuration

use std::io::{BufRead, Write};
use std::process::ExitCode;

use ushell::Shell;
use ushell::config::Config;
use ushell::eval::ShellContext;

enum Mode {
    Repl,
    Command(String),
    DumpConfig,
}

fn parse_args(args: &[String]) -> Result<Mode, String> {
    match args {
        [] => Ok(Mode::Repl),
        [flag] if flag == "--dump-config" => Ok(Mode::DumpConfig),
        [flag, line] if flag == "-c" => Ok(Mode::Command(line.clone())),
        [flag] if flag == "-c" => Err("wrong number of arguments".into()),
        [flag, ..] if flag != "-c" && flag != "--dump-config" => {
            Err(format!("{flag}: unexpected argument"))
        }
        _ => Err("wrong number of arguments".into()),
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mode = match parse_args(&args) {
        Ok(mode) => mode,
        Err(msg) => {
            println!("ushell: {msg}");
            return ExitCode::from(2);
        }
    };

    let config = Config::load();
    ushell::logging::init(&config);

    if let Mode::DumpConfig = mode {
        return match config.to_toml() {
            Ok(text) => {
                print!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("ushell: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let context = match ShellContext::from_process() {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("ushell: cannot determine working directory: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut shell = Shell::new(config, context);

    match mode {
        Mode::Command(line) => {
            if run_line(&mut shell, &line) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        _ => repl(&mut shell),
    }
}

/// Evaluate one line against stdout, reporting any error. Returns success.
fn run_line(shell: &mut Shell, line: &str) -> bool {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = shell.eval(line, &mut out);
    if shell.config().settings.history {
        ushell::logging::log_command(line, &result);
    }
    match result {
        Ok(()) => true,
        Err(e) => {
            log::debug!("line failed: {e}");
            let _ = writeln!(out, "ushell: {e}");
            let _ = out.flush();
            false
        }
    }
}

fn repl(shell: &mut Shell) -> ExitCode {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}", shell.prompt());
        let _ = std::io::stdout().flush();
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("ushell: {e}");
                return ExitCode::FAILURE;
            }
            None => return ExitCode::SUCCESS,
        };
        if line.trim().is_empty() {
            continue;
        }
        run_line(shell, &line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args_is_repl() {
        assert!(matches!(parse_args(&[]), Ok(Mode::Repl)));
    }

    #[test]
    fn command_flag() {
        match parse_args(&args(&["-c", "echo hi"])) {
            Ok(Mode::Command(line)) => assert_eq!(line, "echo hi"),
            _ => panic!("expected command mode"),
        }
    }

    #[test]
    fn dump_config_flag() {
        assert!(matches!(
            parse_args(&args(&["--dump-config"])),
            Ok(Mode::DumpConfig)
        ));
    }

    #[test]
    fn bad_shapes() {
        assert_eq!(
            parse_args(&args(&["-c"])).err().unwrap(),
            "wrong number of arguments"
        );
        assert_eq!(
            parse_args(&args(&["-c", "a", "b"])).err().unwrap(),
            "wrong number of arguments"
        );
        assert_eq!(
            parse_args(&args(&["--dump-config", "x"])).err().unwrap(),
            "wrong number of arguments"
        );
        assert_eq!(
            parse_args(&args(&["-x"])).err().unwrap(),
            "-x: unexpected argument"
        );
    }
}
