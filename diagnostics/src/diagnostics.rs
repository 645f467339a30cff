//! The diagnostics object controls the output of warnings and notes generated
//! by the semantic analysis. It also tracks the number of messages per level
//! so that the driver can summarize a compilation.
//!
//! Errors that abort the analysis are returned as values by the checker; the
//! sink is for everything that does not stop compilation.
//!
//! This implementation is NOT thread-safe.
use span::MaybeSpanned;
use std::{cell::RefCell, collections::HashMap, fmt, io::Write};
use termcolor::{Color, WriteColor};
use utils::color::ColorOutput;

/// Instead of writing warnings generated in the different compiler stages
/// directly to stderr, they are collected in this object.
///
/// This has several advantages:
/// - the output level can be adapted by users.
/// - we have a single source responsible for formatting compiler messages.
pub struct Diagnostics {
    message_count: RefCell<HashMap<MessageLevel, usize>>,
    writer: RefCell<Box<dyn WriteColor>>,
}

impl Diagnostics {
    pub fn new(writer: Box<dyn WriteColor>) -> Self {
        Self {
            writer: RefCell::new(writer),
            message_count: RefCell::new(HashMap::new()),
        }
    }

    /// True when an error message was emitted, false
    /// if only warnings were emitted.
    pub fn errored(&self) -> bool {
        self.count(MessageLevel::Error) > 0
    }

    pub fn count(&self, level: MessageLevel) -> usize {
        self.message_count
            .borrow()
            .get(&level)
            .cloned()
            .unwrap_or(0)
    }

    pub fn write_statistics(&self) {
        let mut writer = self.writer.borrow_mut();
        let mut output = ColorOutput::new(&mut **writer);

        output.set_bold(true);

        if self.errored() {
            output.set_color(MessageLevel::Error.color());
            writeln!(
                output.writer(),
                "Compilation aborted due to {}",
                match self.count(MessageLevel::Error) {
                    1 => "an error".to_string(),
                    n => format!("{} errors", n),
                }
            )
            .ok();
        } else {
            output.set_color(Some(Color::Green));
            writeln!(
                output.writer(),
                "Compilation finished successfully {}",
                match self.count(MessageLevel::Warning) {
                    0 => "without warnings".to_string(),
                    1 => "with a warning".to_string(),
                    n => format!("with {} warnings", n),
                }
            )
            .ok();
        }
    }

    /// Write a message to the writer given in the `new` constructor. Most of
    /// the time this will be stderr.
    pub fn emit(&self, level: MessageLevel, message: MaybeSpanned<&dyn fmt::Display>) {
        let msg = Message { level, message };

        let mut writer = self.writer.borrow_mut();
        msg.write_colored(&mut **writer);
        self.increment_level_count(level);
    }

    pub fn warning(&self, message: MaybeSpanned<&dyn fmt::Display>) {
        self.emit(MessageLevel::Warning, message)
    }

    pub fn error(&self, message: MaybeSpanned<&dyn fmt::Display>) {
        self.emit(MessageLevel::Error, message)
    }

    fn increment_level_count(&self, level: MessageLevel) {
        let mut message_count = self.message_count.borrow_mut();
        let counter = message_count.entry(level).or_insert(0);
        *counter += 1;
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MessageLevel {
    Error,
    Warning,
    Note,
}

impl MessageLevel {
    fn color(self) -> Option<Color> {
        // Don't be confused by the return type. `None` means default color!
        match self {
            MessageLevel::Error => Some(Color::Red),
            MessageLevel::Warning => Some(Color::Yellow),
            MessageLevel::Note => Some(Color::Cyan),
        }
    }

    fn name(self) -> &'static str {
        match self {
            MessageLevel::Error => "error",
            MessageLevel::Warning => "warning",
            MessageLevel::Note => "note",
        }
    }
}

struct Message<'a> {
    level: MessageLevel,
    message: MaybeSpanned<&'a dyn fmt::Display>,
}

impl Message<'_> {
    fn write_colored(&self, writer: &mut dyn WriteColor) {
        let mut output = ColorOutput::new(writer);
        output
            .write_styled(self.level.color(), true, format_args!("{}: ", self.level.name()))
            .ok();

        if let Some(span) = self.message.span() {
            output
                .write_styled(None, true, format_args!("{}: ", span.start_position()))
                .ok();
        }

        writeln!(output.writer(), "{}", *self.message).ok();
    }
}
