mod support;

use codepad::{EditorSession, ExampleSet, OutputEntry, OutputKind, OutputLog};
use codepad_app::app::{App, RunPolicy, RUN_ALREADY_IN_PROGRESS, TRANSPORT_FAILURE_MESSAGE};
use codepad_app::backend::RunResult;
use pretty_assertions::assert_eq;
use support::{lock_unpoisoned, CaptureRenderer, Drawn, HostSpy};

const ARITHMETIC: &str = "// Arithmetic operations\n2 + 3 * 4;\n10 - 5 / 2;\n(15 + 5) * 2;";

fn captured_app() -> (App, std::sync::Arc<std::sync::Mutex<Vec<Drawn>>>) {
    let (renderer, trace) = CaptureRenderer::new();
    let app = App::with_parts(EditorSession::default(), OutputLog::new(Box::new(renderer)));
    (app, trace)
}

#[test]
fn output_response_appends_one_success_entry() {
    let (mut app, trace) = captured_app();
    let mut host = HostSpy::default();

    app.on_input_line("print 3 + 4;", &mut host);
    app.on_input_line("/run", &mut host);
    assert_eq!(host.started, vec![(1, "print 3 + 4;".to_string())]);

    app.on_run_completed(1, RunResult::Output("7".to_string()));

    let expected = OutputEntry::success("Output: 7");
    assert_eq!(app.log.entries(), &[expected.clone()]);
    assert_eq!(*lock_unpoisoned(&trace), vec![Drawn::Append(expected)]);
    assert!(app.is_idle());
}

#[test]
fn compile_error_is_shown_verbatim() {
    let (mut app, _trace) = captured_app();
    let mut host = HostSpy::default();

    app.on_run(&mut host);
    app.on_run_completed(1, RunResult::CompileError("unexpected token".to_string()));

    assert_eq!(
        app.log.entries(),
        &[OutputEntry::error("Error: unexpected token")]
    );
}

#[test]
fn transport_failure_shows_fixed_message_without_cause() {
    let (mut app, _trace) = captured_app();
    let mut host = HostSpy::default();

    app.on_run(&mut host);
    app.on_run_completed(
        1,
        RunResult::TransportFailed("connection refused (os error 111)".to_string()),
    );

    assert_eq!(app.log.len(), 1);
    let entry = &app.log.entries()[0];
    assert_eq!(entry.text, TRANSPORT_FAILURE_MESSAGE);
    assert_eq!(entry.kind, OutputKind::Error);
    assert!(!entry.text.contains("refused"));
}

#[test]
fn run_sends_the_full_buffer_including_empty() {
    let mut app = App::new();
    let mut host = HostSpy::default();

    app.on_run(&mut host);
    app.editor.set_text("x = 5;\n\nprint x;\n");
    app.on_run(&mut host);

    assert_eq!(
        host.started,
        vec![(1, String::new()), (2, "x = 5;\n\nprint x;\n".to_string())]
    );
}

#[test]
fn start_failure_is_a_notice_not_a_log_entry() {
    let mut app = App::new();
    let mut host = HostSpy {
        fail_next_start: Some("no threads".to_string()),
        ..HostSpy::default()
    };

    app.on_run(&mut host);

    assert!(app.log.is_empty());
    assert!(app.is_idle());
    assert_eq!(host.notices, vec!["Failed to start run: no threads".to_string()]);
}

#[test]
fn load_example_sets_literal_text_and_ignores_unknown_names() {
    let mut app = App::new();
    let mut host = HostSpy::default();

    assert!(app.on_load_example("arithmetic", &mut host));
    assert_eq!(app.editor.get_text(), ARITHMETIC);

    assert!(!app.on_load_example("nonexistent", &mut host));
    assert_eq!(app.editor.get_text(), ARITHMETIC);
    assert!(host.notices.is_empty());

    app.on_input_line("/example variables", &mut host);
    assert_eq!(
        app.editor.get_text(),
        "// Variable assignments\nx = 5;\ny = 10;\nprint x + y;\nz = (x + y) * 2;\nprint z;"
    );
}

#[test]
fn clear_empties_the_log_and_redraws() {
    let (mut app, trace) = captured_app();
    let mut host = HostSpy::default();

    app.on_run(&mut host);
    app.on_run(&mut host);
    app.on_run_completed(1, RunResult::Output("1".to_string()));
    app.on_run_completed(2, RunResult::CompileError("bad".to_string()));
    assert_eq!(app.log.len(), 2);

    app.on_input_line("/clear", &mut host);
    assert!(app.log.is_empty());
    assert_eq!(lock_unpoisoned(&trace).last(), Some(&Drawn::Clear));

    app.on_clear(&mut host);
    assert!(app.log.is_empty());
}

#[test]
fn clear_does_not_cancel_in_flight_runs() {
    let mut app = App::new();
    let mut host = HostSpy::default();

    app.on_run(&mut host);
    app.on_clear(&mut host);
    app.on_run_completed(1, RunResult::Output("late".to_string()));

    assert_eq!(app.log.entries(), &[OutputEntry::success("Output: late")]);
}

#[test]
fn source_lines_accumulate_and_new_resets_buffer() {
    let mut app = App::new();
    let mut host = HostSpy::default();

    app.on_input_line("// comment stays in the buffer", &mut host);
    app.on_input_line("x = 1;", &mut host);
    assert_eq!(app.editor.get_text(), "// comment stays in the buffer\nx = 1;");

    app.on_input_line("/new", &mut host);
    assert!(app.editor.is_empty());
}

#[test]
fn informational_commands_produce_notices() {
    let mut app = App::new();
    let mut host = HostSpy::default();

    app.on_input_line("/examples", &mut host);
    app.on_input_line("/help", &mut host);
    app.on_input_line("/frobnicate now", &mut host);
    app.editor.set_text("a;\nb;");
    app.on_input_line("/show", &mut host);

    assert_eq!(host.notices[0], "Examples: arithmetic, expressions, variables");
    assert!(host.notices[1].starts_with("Commands: /run"));
    assert_eq!(host.notices[2], "Unknown command: /frobnicate");
    assert!(host.notices[3].contains("a;"));
    assert!(host.notices[3].contains("b;"));
    assert!(app.log.is_empty());
}

#[test]
fn quit_requests_stop() {
    let mut app = App::new();
    let mut host = HostSpy::default();

    app.on_input_line("/quit", &mut host);

    assert!(app.should_exit);
    assert_eq!(host.stop_requests, 1);
}

#[test]
fn serial_policy_refuses_overlapping_runs() {
    let mut app = App::new().with_policy(RunPolicy::Serial);
    let mut host = HostSpy::default();

    app.on_run(&mut host);
    app.on_run(&mut host);
    assert_eq!(host.started.len(), 1);
    assert_eq!(host.notices, vec![RUN_ALREADY_IN_PROGRESS.to_string()]);

    app.on_run_completed(1, RunResult::Output("done".to_string()));
    app.on_run(&mut host);
    assert_eq!(host.started.len(), 2);
}

#[test]
fn custom_example_sets_replace_the_builtin_ones() {
    let examples: &'static ExampleSet =
        Box::leak(Box::new(ExampleSet::from_entries([("hello", "print 1;")])));
    let mut app = App::new().with_examples(examples);
    let mut host = HostSpy::default();

    assert!(app.on_load_example("hello", &mut host));
    assert_eq!(app.editor.get_text(), "print 1;");
    assert!(!app.on_load_example("arithmetic", &mut host));

    app.on_input_line("/examples", &mut host);
    assert_eq!(host.notices, vec!["Examples: hello".to_string()]);
}

#[test]
fn indented_slash_lines_go_to_the_buffer() {
    let mut app = App::new();
    let mut host = HostSpy::default();

    app.on_input_line("x = 10", &mut host);
    app.on_input_line("   /2;", &mut host);

    assert_eq!(app.editor.get_text(), "x = 10\n   /2;");
    assert!(host.notices.is_empty());
    assert!(host.started.is_empty());
}
