#![warn(rust_2018_idioms)]
#![warn(clippy::print_stdout)]

mod driver;

use self::driver::{print_error, CompilerPhase, Driver, Outcome};
use diagnostics::Diagnostics;
use failure::Error;
use std::{io, path::PathBuf, process::exit};
use structopt::StructOpt;
use termcolor::{ColorChoice, StandardStream};

#[derive(StructOpt)]
#[structopt(name = "minijava")]
pub struct Opt {
    /// Stop after loading the syntax tree.
    #[structopt(long = "parse-only")]
    parse_only: bool,
    /// Stop after the semantic analysis, do not write the typed program.
    #[structopt(long = "type-only")]
    type_only: bool,
    /// Print the typed program to stdout.
    #[structopt(long = "print-typed")]
    print_typed: bool,
    /// Log debug messages to stderr. `RUST_LOG` is honoured otherwise.
    #[structopt(long = "debug")]
    debug: bool,
    /// JSON encoded syntax tree of a MiniJava program.
    #[structopt(name = "FILE", parse(from_os_str))]
    input: PathBuf,
}

impl Opt {
    fn stop_after(&self) -> CompilerPhase {
        if self.parse_only {
            CompilerPhase::Parse
        } else if self.type_only {
            CompilerPhase::Typing
        } else {
            CompilerPhase::Emit
        }
    }
}

fn main() {
    let opt = Opt::from_args();
    setup_logging(opt.debug);

    let diagnostics = Diagnostics::new(Box::new(StandardStream::stderr(ColorChoice::Auto)));
    match run(&opt, &diagnostics) {
        Ok(outcome) => {
            diagnostics.write_statistics();
            if outcome == Outcome::Rejected {
                exit(1);
            }
        }
        Err(err) => exit_with_error(&err),
    }
}

fn run(opt: &Opt, diagnostics: &Diagnostics) -> Result<Outcome, Error> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let mut driver = Driver {
        input: opt.input.clone(),
        stop_after: opt.stop_after(),
        print_typed: opt.print_typed,
        writer_out: &mut stdout,
        diagnostics,
    };
    driver.run()
}

fn setup_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

/// Print an error in a format intended for end users and terminate
/// the program.
fn exit_with_error(err: &Error) -> ! {
    let mut stderr = io::stderr();
    print_error(&mut stderr, err).expect("unable to print error");
    exit(1);
}
