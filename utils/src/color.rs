//! Helper for writing colored and bold text to a terminal.
//!
//! `ColorOutput` resets the terminal style when it is dropped, so a caller
//! cannot leave the terminal in the color it last used. Each function that
//! writes colored text should create its own `ColorOutput` from the raw
//! writer, which keeps nested calls correctly colored.
//!
//! Coloring failures are ignored: a writer that does not support colors
//! still receives the text.
//!
//! NOT thread-safe.
use std::{
    fmt,
    io::{self, Write},
};
use termcolor::{Color, ColorSpec, WriteColor};

pub struct ColorOutput<'a> {
    writer: &'a mut dyn WriteColor,
    spec: ColorSpec,
}

impl<'a> ColorOutput<'a> {
    pub fn new(writer: &'a mut dyn WriteColor) -> Self {
        writer.reset().ok();

        Self {
            writer,
            spec: ColorSpec::new(),
        }
    }

    /// `None` selects the terminal's default color.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.spec.set_fg(color);
        self.writer.set_color(&self.spec).ok();
    }

    pub fn set_bold(&mut self, yes: bool) {
        self.spec.set_bold(yes);
        self.writer.set_color(&self.spec).ok();
    }

    /// Write `text` in the given style and restore the previous style
    /// afterwards.
    pub fn write_styled(
        &mut self,
        color: Option<Color>,
        bold: bool,
        text: impl fmt::Display,
    ) -> io::Result<()> {
        let previous = self.spec.clone();
        self.spec.set_fg(color).set_bold(bold);
        self.writer.set_color(&self.spec).ok();

        let result = write!(self.writer, "{}", text);

        self.spec = previous;
        self.writer.set_color(&self.spec).ok();
        result
    }

    pub fn writer(&mut self) -> &mut dyn WriteColor {
        self.writer
    }
}

impl<'a> Drop for ColorOutput<'a> {
    fn drop(&mut self) {
        self.writer.reset().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::Buffer;

    #[test]
    fn styled_text_reaches_uncolored_writer() {
        let mut buffer = Buffer::no_color();
        {
            let mut output = ColorOutput::new(&mut buffer);
            output.write_styled(Some(Color::Red), true, "error").unwrap();
            write!(output.writer(), ": boom").unwrap();
        }
        assert_eq!("error: boom", String::from_utf8_lossy(buffer.as_slice()));
    }
}
