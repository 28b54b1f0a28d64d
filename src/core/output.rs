use std::io::{self, Write};

/// Writes command results to the output stream, one integer per line.
///
/// Every response is flushed before returning so a reader on the other end
/// of a pipe sees it immediately.
pub struct ResponseWriter<W: Write> {
    inner: W,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn write_response(&mut self, values: &[i64]) -> io::Result<()> {
        for value in values {
            writeln!(self.inner, "{}", value)?;
        }
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Optional `CMD:`/`RES:` echo on a diagnostic stream.
pub struct DiagnosticEcho<'a> {
    sink: Option<&'a mut dyn Write>,
}

impl<'a> DiagnosticEcho<'a> {
    pub fn new(sink: Option<&'a mut dyn Write>) -> Self {
        Self { sink }
    }

    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn command(&mut self, line: &str) -> io::Result<()> {
        self.emit(format_args!("CMD: {}", line))
    }

    pub fn result(&mut self, value: i64) -> io::Result<()> {
        self.emit(format_args!("RES: {}", value))
    }

    fn emit(&mut self, args: std::fmt::Arguments<'_>) -> io::Result<()> {
        match self.sink.as_mut() {
            Some(sink) => {
                sink.write_fmt(args)?;
                sink.write_all(b"\n")?;
                sink.flush()
            }
            None => Ok(()),
        }
    }
}
