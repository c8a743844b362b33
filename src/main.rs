use std::env;
use std::fmt::Write as _;
use std::process;

use argexpand::{
    expand_command_line, load_settings, ArgError, ArgValue, ErrorKind, Options, ReferenceSyntax,
};

fn main() {
    init_logging();
    let args: Vec<String> = env::args().skip(1).collect();
    match run(args) {
        Ok(output) => print!("{output}"),
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    }
}

fn init_logging() {
    let env = env_logger::Env::default().filter_or("ARGEXPAND_LOG", "warn");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}

fn run(args: Vec<String>) -> Result<String, ArgError> {
    let mut settings = match load_settings() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("config error: {err}");
            Default::default()
        }
    };
    let mut flags: Vec<String> = Vec::new();
    let mut iter = args.into_iter().peekable();
    while let Some(arg) = iter.peek() {
        if arg == "--" {
            iter.next();
            break;
        }
        if arg == "--ignore-case" {
            settings.ignore_case = true;
        } else if arg == "--match-case" {
            settings.ignore_case = false;
        } else if let Some(value) = arg.strip_prefix("--syntax=") {
            settings.syntax = ReferenceSyntax::parse(value).ok_or_else(|| {
                ArgError::new(ErrorKind::Usage, format!("unknown syntax '{value}'"))
                    .with_context("Expected: --syntax=posix or --syntax=windows")
            })?;
        } else if let Some(name) = arg.strip_prefix("--flag=") {
            flags.push(name.to_string());
        } else if arg == "--flag" {
            iter.next();
            let name = iter.next().ok_or_else(|| {
                ArgError::new(ErrorKind::Usage, "option '--flag' requires an option name")
            })?;
            flags.push(name);
            continue;
        } else {
            break;
        }
        iter.next();
    }

    let flags: Vec<&str> = flags.iter().map(String::as_str).collect();
    let expander = settings.expander();
    log::debug!("expanding with {expander:?}");
    let (options, positionals) = expand_command_line(iter.collect(), &flags, &expander)?;
    Ok(render(&options, &positionals))
}

/// Argument-file form: one option (with its value) or positional per line.
fn render(options: &Options, positionals: &[String]) -> String {
    let mut out = String::new();
    for (name, value) in options.iter() {
        render_value(&mut out, name, value);
    }
    for arg in positionals {
        let _ = writeln!(out, "{arg}");
    }
    out
}

fn render_value(out: &mut String, name: &str, value: &ArgValue) {
    match value {
        ArgValue::Str(s) => {
            let _ = writeln!(out, "{name} {s}");
        }
        ArgValue::Bool(true) => {
            let _ = writeln!(out, "{name}");
        }
        ArgValue::Bool(false) => {}
        ArgValue::Int(n) => {
            let _ = writeln!(out, "{name} {n}");
        }
        ArgValue::Float(n) => {
            let _ = writeln!(out, "{name} {n}");
        }
        ArgValue::List(items) => {
            for item in items {
                render_value(out, name, item);
            }
        }
    }
}
