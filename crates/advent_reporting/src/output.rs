use std::{fmt::Display, io, time::Duration};

use termcolor::{Color, ColorSpec, WriteColor};

pub fn format_start_banner(writer: &mut impl WriteColor) -> io::Result<()> {
    writeln!(writer, "Starting run")
}

pub fn format_test_count(writer: &mut impl WriteColor, count: usize) -> io::Result<()> {
    writeln!(writer, "Running {count} tests...")?;
    writeln!(writer)
}

/// Formats a passed test on a single line.
pub fn format_test_passed(
    writer: &mut impl WriteColor,
    test_number: usize,
    elapsed: Duration,
) -> io::Result<()> {
    with_color_spec(writer, &green_bold_spec(), |w| {
        write!(w, "Test {test_number} passed! Time: ")?;
        format_duration(w, elapsed)
    })?;
    writeln!(writer)
}

/// Formats an expected/actual mismatch on a single line.
pub fn format_test_failed(
    writer: &mut impl WriteColor,
    test_number: usize,
    expected: impl Display,
    actual: impl Display,
    elapsed: Duration,
) -> io::Result<()> {
    with_color_spec(writer, &red_bold_spec(), |w| {
        write!(
            w,
            "Test {test_number} failed: expected {expected}, got {actual}. Time: "
        )?;
        format_duration(w, elapsed)
    })?;
    writeln!(writer)
}

/// Formats a test whose solution returned an error instead of an answer.
pub fn format_test_errored(
    writer: &mut impl WriteColor,
    test_number: usize,
    error: impl Display,
) -> io::Result<()> {
    with_color_spec(writer, &red_bold_spec(), |w| {
        write!(w, "Test {test_number} failed: solution returned an error: {error}")
    })?;
    writeln!(writer)
}

pub fn format_main_run_started(writer: &mut impl WriteColor) -> io::Result<()> {
    writeln!(writer, "Running main run...")?;
    writeln!(writer)
}

pub fn format_main_finished(
    writer: &mut impl WriteColor,
    answer: impl Display,
    elapsed: Duration,
) -> io::Result<()> {
    with_color_spec(writer, &green_bold_spec(), |w| write!(w, "Main run finished!"))?;
    writeln!(writer)?;
    write!(writer, "Result was: {answer}, run took ")?;
    format_duration(writer, elapsed)?;
    writeln!(writer)
}

/// The main run reports its failures plain, without styling.
pub fn format_main_errored(writer: &mut impl io::Write, error: impl Display) -> io::Result<()> {
    writeln!(writer, "Main run failed: {error}")
}

/// Formats a registration-time input resolution failure.
pub fn format_resolution_error(
    writer: &mut impl WriteColor,
    error: impl Display,
) -> io::Result<()> {
    with_color_spec(writer, &red_bold_spec(), |w| write!(w, "{error}"))?;
    writeln!(writer)
}

pub fn format_finished_banner(writer: &mut impl WriteColor) -> io::Result<()> {
    writeln!(writer, "Run finished, press enter to continue")
}

#[inline]
fn green_bold_spec() -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Green)).set_bold(true);
    spec
}

#[inline]
pub(crate) fn red_bold_spec() -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Red)).set_bold(true);
    spec
}

#[inline]
pub(crate) fn yellow_bold_spec() -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Yellow)).set_bold(true);
    spec
}

#[inline]
fn with_color_spec<W>(
    writer: &mut W,
    color_spec: &ColorSpec,
    f: impl FnOnce(&mut W) -> io::Result<()>,
) -> io::Result<()>
where
    W: WriteColor,
{
    writer.set_color(color_spec)?;
    f(writer)?;
    writer.reset()
}

const MILLIS_IN_SECOND: u64 = 1000;

/// Renders an elapsed wall-clock duration in whole milliseconds, spelling out
/// minute and second components when they are present.
pub fn format_duration(writer: &mut impl io::Write, duration: Duration) -> io::Result<()> {
    const MILLIS_IN_MINUTE: u64 = 60 * MILLIS_IN_SECOND;

    let millis = duration.as_millis() as u64;
    let (minutes, millis) = (millis / MILLIS_IN_MINUTE, millis % MILLIS_IN_MINUTE);
    let (seconds, millis) = (millis / MILLIS_IN_SECOND, millis % MILLIS_IN_SECOND);

    let mut written = false;
    if minutes > 0 {
        write!(writer, "{} m", minutes)?;
        written = true;
    }
    if seconds > 0 {
        if written {
            write!(writer, ", ")?;
        }
        write!(writer, "{} s", seconds)?;
        written = true;
    }
    if millis > 0 || !written {
        if written {
            write!(writer, ", ")?;
        }
        write!(writer, "{} ms", millis)?;
    }

    Ok(())
}
