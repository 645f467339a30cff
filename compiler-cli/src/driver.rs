//! Runs the phases of the compiler on one input file.
use diagnostics::Diagnostics;
use failure::{Error, Fail, ResultExt};
use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

#[derive(Debug, Fail)]
pub enum CliError {
    #[fail(display = "cannot read input file {:?}", path)]
    ReadInput { path: PathBuf },
    #[fail(display = "input file {:?} is not a valid syntax tree", path)]
    MalformedTree { path: PathBuf },
    #[fail(display = "cannot write typed program to {:?}", path)]
    WriteOutput { path: PathBuf },
    #[fail(display = "cannot write to stdout")]
    Stdout,
}

/// The last phase that is run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerPhase {
    /// Load the syntax tree.
    Parse,
    /// Run the semantic analysis.
    Typing,
    /// Write the typed listing next to the input.
    Emit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The program was rejected. The error is already reported.
    Rejected,
}

pub struct Driver<'d> {
    pub input: PathBuf,
    pub stop_after: CompilerPhase,
    /// Also print the typed listing to `writer_out`.
    pub print_typed: bool,
    /// Receives typing errors and listings. Defaults to stdout.
    pub writer_out: &'d mut dyn Write,
    pub diagnostics: &'d Diagnostics,
}

impl<'d> Driver<'d> {
    pub fn run(&mut self) -> Result<Outcome, Error> {
        let program = self.load_program()?;
        log::debug!(
            "loaded syntax tree with {} classes from {:?}",
            program.classes.len(),
            self.input
        );
        if self.stop_after == CompilerPhase::Parse {
            return Ok(Outcome::Success);
        }

        let typed = match type_checking::check(&program, self.diagnostics) {
            Ok(typed) => typed,
            Err(err) => {
                log::debug!("semantic analysis failed: {:?}", err.kind());
                writeln!(self.writer_out, "{}:{}", self.input.display(), err)
                    .context(CliError::Stdout)?;
                self.diagnostics.error(err.as_diagnostic());
                return Ok(Outcome::Rejected);
            }
        };

        if self.print_typed {
            type_checking::print::print(&typed, &mut *self.writer_out).context(CliError::Stdout)?;
        }
        if self.stop_after == CompilerPhase::Typing {
            return Ok(Outcome::Success);
        }

        let output = typed_output_path(&self.input);
        let mut file = File::create(&output)
            .map(BufWriter::new)
            .context(CliError::WriteOutput {
                path: output.clone(),
            })?;
        type_checking::print::print(&typed, &mut file)
            .and_then(|()| file.flush())
            .context(CliError::WriteOutput {
                path: output.clone(),
            })?;
        log::debug!("wrote typed program to {:?}", output);

        Ok(Outcome::Success)
    }

    fn load_program(&self) -> Result<ast::Program, Error> {
        let contents = fs::read_to_string(&self.input).context(CliError::ReadInput {
            path: self.input.clone(),
        })?;
        let program = serde_json::from_str::<ast::Program>(&contents).context(CliError::MalformedTree {
            path: self.input.clone(),
        })?;
        Ok(program)
    }
}

/// `<input>.typed`
pub fn typed_output_path(input: &Path) -> PathBuf {
    let mut path = OsString::from(input.as_os_str());
    path.push(".typed");
    PathBuf::from(path)
}

/// Print error objects in a format intended for end users
pub fn print_error(writer: &mut dyn io::Write, err: &Error) -> Result<(), Error> {
    writeln!(writer, "error: {}", err.as_fail())?;
    for cause in err.iter_causes() {
        writeln!(writer, "caused by: {}", cause)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_output_is_placed_next_to_the_input() {
        assert_eq!(
            PathBuf::from("dir/prog.json.typed"),
            typed_output_path(Path::new("dir/prog.json"))
        );
    }

    #[test]
    fn errors_are_printed_with_their_causes() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "no such file")
            .context(CliError::ReadInput {
                path: PathBuf::from("prog.json"),
            })
            .into();
        let mut out = Vec::new();
        print_error(&mut out, &err).unwrap();
        assert_eq!(
            "error: cannot read input file \"prog.json\"\ncaused by: no such file\n",
            String::from_utf8(out).unwrap()
        );
    }
}
