use std::{
    io::{self, BufRead, Write},
    time::{Duration, Instant},
};

use advent_reporting::{output, writer::ColorWriter};
use termcolor::{ColorChoice, StandardStream, WriteColor};
use thiserror::Error;

use crate::{input, solution::Solution};

#[derive(Debug, Error)]
pub enum RunnerError {
    /// A solution invocation failed while the runner is configured to
    /// propagate failures. `test_number` is unset for the main run.
    #[error("solution failed during the run")]
    Solution {
        test_number: Option<usize>,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to write to the report buffer")]
    Report(#[from] io::Error),
}

struct TestCase<A> {
    input: String,
    expected: A,
}

/// Answer and elapsed wall-clock span of one solution invocation.
struct RunResult<A> {
    answer: A,
    elapsed: Duration,
}

/// Runs and verifies a puzzle solution.
///
/// Test cases and the main input register fluently; [Self::run] then executes
/// every case in registration order, timing each invocation and reporting
/// pass/fail lines to the runner's buffer, followed by the main run if an
/// input was set.
pub struct SolutionRunner<S, F>
where
    S: Solution,
    F: FnMut() -> S,
{
    make_solution: F,
    propagate_failures: bool,
    test_cases: Vec<TestCase<S::Answer>>,
    main_input: Option<String>,
    answer: Option<S::Answer>,
    buffer: Box<dyn WriteColor + Send>,
    ack: Box<dyn BufRead + Send>,
}

impl<S, F> SolutionRunner<S, F>
where
    S: Solution,
    F: FnMut() -> S,
{
    /// Builds a runner reporting to stdout, with the end-of-run
    /// acknowledgment read from stdin.
    pub fn new(make_solution: F) -> Self {
        let color_choice = if atty::is(atty::Stream::Stdout) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self::with_io(
            make_solution,
            Box::new(StandardStream::stdout(color_choice)),
            Box::new(io::BufReader::new(io::stdin())),
        )
    }

    /// Builds a runner against caller-supplied report and acknowledgment
    /// streams.
    pub fn with_io(
        make_solution: F,
        buffer: Box<dyn WriteColor + Send>,
        ack: Box<dyn BufRead + Send>,
    ) -> Self {
        Self {
            make_solution,
            propagate_failures: true,
            test_cases: Vec::new(),
            main_input: None,
            answer: None,
            buffer,
            ack,
        }
    }

    /// Controls whether a solution failure aborts the run or is reported and
    /// skipped over. Defaults to aborting.
    pub fn propagate_failures(mut self, propagate: bool) -> Self {
        self.propagate_failures = propagate;
        self
    }

    /// Registers a test case. `input` is either literal puzzle text or a
    /// path to a file holding it.
    ///
    /// A failed file lookup reports the problem and leaves the collection
    /// unchanged, so chained registrations keep going. Registering the same
    /// resolved input twice replaces the expected answer in place; the case
    /// keeps its original position in the report order.
    pub fn test_case(mut self, input: &str, expected: S::Answer) -> Self {
        match input::resolve(input) {
            Ok(resolved) => {
                match self
                    .test_cases
                    .iter_mut()
                    .find(|case| case.input == resolved)
                {
                    Some(case) => {
                        tracing::warn!(input, "input registered twice, replacing expected answer");
                        let _ = self.buffer.warn_line(&format!(
                            "input {input:?} registered twice, replacing expected answer"
                        ));
                        case.expected = expected;
                    }
                    None => self.test_cases.push(TestCase {
                        input: resolved,
                        expected,
                    }),
                }
            }
            Err(err) => {
                let _ = output::format_resolution_error(&mut self.buffer, err);
            }
        }
        self
    }

    /// Sets the main puzzle input, with the same resolution semantics as
    /// [Self::test_case]. A failed lookup reports and leaves the slot empty.
    pub fn main_input(mut self, input: &str) -> Self {
        match input::resolve(input) {
            Ok(resolved) => self.main_input = Some(resolved),
            Err(err) => {
                let _ = output::format_resolution_error(&mut self.buffer, err);
            }
        }
        self
    }

    /// Answer from the main run, if one has finished successfully.
    pub fn answer(&self) -> Option<&S::Answer> {
        self.answer.as_ref()
    }

    /// Runs every registered test case in registration order, then the main
    /// input if one is set, and blocks for one acknowledgment line before
    /// returning.
    ///
    /// Solution failures abort with [RunnerError::Solution] only when the
    /// runner propagates failures; otherwise they are reported and the run
    /// carries on.
    pub fn run(&mut self, run_tests: bool) -> Result<(), RunnerError> {
        output::format_start_banner(&mut self.buffer)?;

        if run_tests {
            output::format_test_count(&mut self.buffer, self.test_cases.len())?;

            for (index, case) in self.test_cases.iter().enumerate() {
                let test_number = index + 1;
                match run_single(&mut self.make_solution, &case.input) {
                    Ok(run) => {
                        if run.answer == case.expected {
                            output::format_test_passed(
                                &mut self.buffer,
                                test_number,
                                run.elapsed,
                            )?;
                        } else {
                            output::format_test_failed(
                                &mut self.buffer,
                                test_number,
                                &case.expected,
                                &run.answer,
                                run.elapsed,
                            )?;
                        }
                    }
                    Err(source) => {
                        output::format_test_errored(
                            &mut self.buffer,
                            test_number,
                            format_args!("{source:#}"),
                        )?;
                        if self.propagate_failures {
                            return Err(RunnerError::Solution {
                                test_number: Some(test_number),
                                source,
                            });
                        }
                    }
                }
            }
        }

        writeln!(&mut self.buffer)?;

        if let Some(main_input) = &self.main_input {
            output::format_main_run_started(&mut self.buffer)?;
            match run_single(&mut self.make_solution, main_input) {
                Ok(run) => {
                    output::format_main_finished(&mut self.buffer, &run.answer, run.elapsed)?;
                    self.answer = Some(run.answer);
                }
                Err(source) => {
                    output::format_main_errored(&mut self.buffer, format_args!("{source:#}"))?;
                    if self.propagate_failures {
                        return Err(RunnerError::Solution {
                            test_number: None,
                            source,
                        });
                    }
                }
            }
        }

        output::format_finished_banner(&mut self.buffer)?;
        self.buffer.flush()?;

        let mut ack = String::new();
        self.ack.read_line(&mut ack)?;

        Ok(())
    }
}

/// Obtains a fresh solution and times the solve call alone; factory cost is
/// excluded from the measured span. Solution failures propagate unmodified.
fn run_single<S: Solution>(
    make_solution: &mut impl FnMut() -> S,
    input: &str,
) -> anyhow::Result<RunResult<S::Answer>> {
    let mut solution = make_solution();

    let start = Instant::now();
    let answer = solution.solve(input)?;
    let elapsed = start.elapsed();

    tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "solve finished");

    Ok(RunResult { answer, elapsed })
}

#[cfg(test)]
mod test {
    use std::{io, time::Duration};

    use advent_reporting::writer::NoopColorWriter;
    use advent_test_utils::color_writer::SharedTestColorWriter;

    use super::{run_single, RunnerError, SolutionRunner};
    use crate::solution::Solution;

    struct SumSolution;

    impl Solution for SumSolution {
        type Answer = i64;

        fn solve(&mut self, input: &str) -> anyhow::Result<i64> {
            let mut total = 0;
            for token in input.split_whitespace() {
                total += token.parse::<i64>()?;
            }
            Ok(total)
        }
    }

    struct FailingSolution;

    impl Solution for FailingSolution {
        type Answer = i64;

        fn solve(&mut self, _input: &str) -> anyhow::Result<i64> {
            anyhow::bail!("this puzzle is unsolvable")
        }
    }

    struct SleepySolution;

    impl Solution for SleepySolution {
        type Answer = u8;

        fn solve(&mut self, _input: &str) -> anyhow::Result<u8> {
            std::thread::sleep(Duration::from_millis(50));
            Ok(0)
        }
    }

    fn ack() -> Box<dyn io::BufRead + Send> {
        Box::new(io::Cursor::new(b"\n".to_vec()))
    }

    macro_rules! assert_run_snapshot {
        ($output:expr, @$snapshot:literal) => {
            insta::with_settings!({filters => vec![(r"[0-9]+ ms", "[elapsed]")]}, {
                insta::assert_snapshot!($output, @$snapshot);
            });
        };
    }

    #[test]
    fn passing_and_failing_cases_reported_in_order() {
        let out = SharedTestColorWriter::new(vec![]);
        let mut runner = SolutionRunner::with_io(|| SumSolution, Box::new(out.clone()), ack())
            .test_case("1 1", 2)
            .test_case("2 2", 5);

        runner.run(true).unwrap();
        drop(runner);

        let output = String::from_utf8(out.get()).unwrap();
        assert_run_snapshot!(output, @r###"
        Starting run
        Running 2 tests...

        <green-bold>Test 1 passed! Time: [elapsed]<reset>
        <red-bold>Test 2 failed: expected 5, got 4. Time: [elapsed]<reset>

        Run finished, press enter to continue
        "###);
    }

    #[test]
    fn tests_then_main_run() {
        let out = SharedTestColorWriter::new(vec![]);
        let mut runner = SolutionRunner::with_io(|| SumSolution, Box::new(out.clone()), ack())
            .test_case("1 1", 2)
            .test_case("2 2", 4)
            .main_input("10 20");

        runner.run(true).unwrap();
        assert_eq!(runner.answer(), Some(&30));
        drop(runner);

        let output = String::from_utf8(out.get()).unwrap();
        assert_run_snapshot!(output, @r###"
        Starting run
        Running 2 tests...

        <green-bold>Test 1 passed! Time: [elapsed]<reset>
        <green-bold>Test 2 passed! Time: [elapsed]<reset>

        Running main run...

        <green-bold>Main run finished!<reset>
        Result was: 30, run took [elapsed]
        Run finished, press enter to continue
        "###);
    }

    #[test]
    fn missing_file_registration_is_skipped() {
        let out = SharedTestColorWriter::new(vec![]);
        let mut runner = SolutionRunner::with_io(|| SumSolution, Box::new(out.clone()), ack())
            .test_case("bad-path.txt", 1);

        runner.run(true).unwrap();
        drop(runner);

        let output = String::from_utf8(out.get()).unwrap();
        insta::assert_snapshot!(output, @r###"
        <red-bold>could not find file bad-path.txt<reset>
        Starting run
        Running 0 tests...


        Run finished, press enter to continue
        "###);
    }

    #[test]
    fn file_backed_inputs_resolve_to_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        io::Write::write_all(&mut file, b"3 4").unwrap();

        let out = SharedTestColorWriter::new(vec![]);
        let mut runner = SolutionRunner::with_io(|| SumSolution, Box::new(out.clone()), ack())
            .test_case(file.path().to_str().unwrap(), 7);

        runner.run(true).unwrap();
        drop(runner);

        let output = String::from_utf8(out.get()).unwrap();
        assert!(output.contains("Test 1 passed"), "unexpected output: {output}");
    }

    #[test]
    fn swallowed_failures_run_every_case() {
        let out = SharedTestColorWriter::new(vec![]);
        let mut runner = SolutionRunner::with_io(|| FailingSolution, Box::new(out.clone()), ack())
            .propagate_failures(false)
            .test_case("1 1", 2)
            .test_case("2 2", 4);

        runner.run(true).unwrap();
        drop(runner);

        let output = String::from_utf8(out.get()).unwrap();
        insta::assert_snapshot!(output, @r###"
        Starting run
        Running 2 tests...

        <red-bold>Test 1 failed: solution returned an error: this puzzle is unsolvable<reset>
        <red-bold>Test 2 failed: solution returned an error: this puzzle is unsolvable<reset>

        Run finished, press enter to continue
        "###);
    }

    #[test]
    fn propagated_failure_halts_the_batch() {
        let out = SharedTestColorWriter::new(vec![]);
        let mut runner = SolutionRunner::with_io(|| FailingSolution, Box::new(out.clone()), ack())
            .test_case("1 1", 2)
            .test_case("2 2", 4);

        let err = runner.run(true).unwrap_err();
        assert!(matches!(
            err,
            RunnerError::Solution {
                test_number: Some(1),
                ..
            }
        ));
        drop(runner);

        let output = String::from_utf8(out.get()).unwrap();
        assert!(output.contains("Test 1 failed"), "unexpected output: {output}");
        assert!(!output.contains("Test 2"), "unexpected output: {output}");
        assert!(!output.contains("Run finished"), "unexpected output: {output}");
    }

    #[test]
    fn main_run_failure_leaves_answer_unset() {
        let out = SharedTestColorWriter::new(vec![]);
        let mut runner = SolutionRunner::with_io(|| FailingSolution, Box::new(out.clone()), ack())
            .propagate_failures(false)
            .main_input("10 20");

        runner.run(false).unwrap();
        assert!(runner.answer().is_none());
        drop(runner);

        let output = String::from_utf8(out.get()).unwrap();
        insta::assert_snapshot!(output, @r###"
        Starting run

        Running main run...

        Main run failed: this puzzle is unsolvable
        Run finished, press enter to continue
        "###);
    }

    #[test]
    fn duplicate_registration_replaces_the_expected_answer() {
        let out = SharedTestColorWriter::new(vec![]);
        let mut runner = SolutionRunner::with_io(|| SumSolution, Box::new(out.clone()), ack())
            .test_case("1 1", 3)
            .test_case("1 1", 2);

        runner.run(true).unwrap();
        drop(runner);

        let output = String::from_utf8(out.get()).unwrap();
        assert_run_snapshot!(output, @r###"
        <yellow-bold>WARNING: input "1 1" registered twice, replacing expected answer
        <reset>Starting run
        Running 1 tests...

        <green-bold>Test 1 passed! Time: [elapsed]<reset>

        Run finished, press enter to continue
        "###);
    }

    #[test]
    fn elapsed_time_covers_the_solve_span() {
        let mut make = || SleepySolution;
        let run = run_single(&mut make, "").unwrap();
        assert!(run.elapsed >= Duration::from_millis(50));
    }

    #[test]
    fn silent_runner_still_produces_an_answer() {
        let mut runner = SolutionRunner::with_io(|| SumSolution, Box::new(NoopColorWriter), ack())
            .main_input("10 20");

        runner.run(false).unwrap();
        assert_eq!(runner.answer(), Some(&30));
    }
}
