//! # Reporting Module Unit Tests / Reporting 模块单元测试
//!
//! Tests for the console reporter and the error taxonomy it renders: header
//! and success lines, failure blocks with raw output, and exit code mapping.
//!
//! 控制台报告器及其渲染的错误分类的测试：标题和成功行、
//! 带原始输出的失败块，以及退出码映射。

use partition_matrix::core::error::{
    EXIT_CONFIG, EXIT_INTERRUPTED, EXIT_RUN_FAILURE, EXIT_SPAWN, HarnessError, ParseProblem,
};
use partition_matrix::core::models::Metrics;
use partition_matrix::reporting::{ConsoleReporter, Reporter};
use std::time::Duration;

fn render(f: impl FnOnce(&mut ConsoleReporter<Vec<u8>>)) -> String {
    colored::control::set_override(false);
    let mut reporter = ConsoleReporter::with_writer(Vec::new(), "en");
    f(&mut reporter);
    String::from_utf8(reporter.into_inner()).unwrap()
}

#[cfg(test)]
mod console_tests {
    use super::*;

    #[test]
    fn test_header_and_success_lines() {
        let text = render(|r| {
            r.header("tests/instances/ibm01.hgr", 2, 0.03);
            r.success(
                &Metrics {
                    total_time: 1.5,
                    imbalance: 0.02,
                    km1: 10,
                    cut: 20,
                },
                Duration::from_millis(1500),
            );
        });
        assert!(text.contains("Instance = tests/instances/ibm01.hgr, k = 2, Epsilon = 0.03"));
        assert!(text.contains("[SUCCESS]"));
        assert!(text.contains("Total Time = 1.5 Imbalance = 0.02 km1 = 10 cut = 20"));
    }

    #[test]
    fn test_failure_prints_exit_code_and_raw_output() {
        let text = render(|r| {
            r.failure(&HarnessError::ProcessFailure {
                command: "bin -k2".into(),
                exit_code: Some(1),
                output: "segmentation fault\n".into(),
            })
        });
        assert!(text.contains("[ERROR]"));
        assert!(text.contains("Exit Code = 1"));
        assert!(text.contains("segmentation fault"));
    }

    #[test]
    fn test_parse_failure_names_the_problem() {
        let text = render(|r| {
            r.failure(&HarnessError::ResultParse {
                command: "bin".into(),
                problem: ParseProblem::NoMarkerLine,
                output: "no summary here".into(),
            })
        });
        assert!(text.contains("no line contains the RESULT marker"));
        assert!(text.contains("no summary here"));
    }

    #[test]
    fn test_pairs_are_separated_by_blank_line() {
        let text = render(|r| {
            r.header("a", 2, 0.03);
            r.header("a", 4, 0.03);
        });
        assert_eq!(text.lines().filter(|l| l.is_empty()).count(), 1);
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_exit_codes_per_failure_kind() {
        let failure = HarnessError::ProcessFailure {
            command: "a".into(),
            exit_code: Some(3),
            output: String::new(),
        };
        let parse = HarnessError::ResultParse {
            command: "a".into(),
            problem: ParseProblem::NoMarkerLine,
            output: String::new(),
        };
        let spawn = HarnessError::Spawn {
            program: "missing".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(failure.exit_code(), EXIT_RUN_FAILURE);
        assert_eq!(parse.exit_code(), EXIT_RUN_FAILURE);
        assert_eq!(spawn.exit_code(), EXIT_SPAWN);
        assert_eq!(HarnessError::Config("x".into()).exit_code(), EXIT_CONFIG);
        assert_eq!(
            HarnessError::Interrupted { command: "a".into() }.exit_code(),
            EXIT_INTERRUPTED
        );
    }

    #[test]
    fn test_process_failure_message_names_exit_code() {
        let err = HarnessError::ProcessFailure {
            command: "MtKaHyParFast -k2".into(),
            exit_code: Some(1),
            output: String::new(),
        };
        assert_eq!(err.to_string(), "`MtKaHyParFast -k2` terminated with exit code 1");

        let killed = HarnessError::ProcessFailure {
            command: "x".into(),
            exit_code: None,
            output: String::new(),
        };
        assert!(killed.to_string().ends_with("a signal"));
    }

    #[test]
    fn test_command_and_output_fill_in_parse_failures_only() {
        let parse = HarnessError::ResultParse {
            command: String::new(),
            problem: ParseProblem::MissingKey("cut"),
            output: "stdout only".into(),
        }
        .with_command("bin -k4")
        .with_output("stdout\nstderr\n".into());
        assert!(parse.to_string().contains("bin -k4"));
        assert!(parse.to_string().contains("`cut=`"));
        assert_eq!(parse.raw_output(), Some("stdout\nstderr\n"));

        let other = HarnessError::Config("bad".into())
            .with_command("ignored")
            .with_output("ignored".into());
        assert_eq!(other.to_string(), "invalid configuration: bad");
        assert_eq!(other.raw_output(), None);
    }
}
