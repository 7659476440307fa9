//! End-to-end tests: batches of statements driven through a fresh session,
//! asserting on the captured log and the post-execution context.

use std::cell::RefCell;
use std::rc::Rc;

use script_host::{
    execute, Command, ErrorKind, ExecuteOptions, Host, HostError, HostUi, InitialState,
    PipelineState, ScriptHost, Session, StageOutput, Value, HOST_NAME, OUT_DEFAULT,
};

#[test]
fn executes_statements_in_order() {
    let log = execute(&["write 'a'", "write 'b'"]).unwrap();
    assert_eq!(log, "a\nb\n");
}

#[test]
fn output_and_errors_interleave_in_statement_order() {
    let log = execute(&["write 'before'", "error 'oops'", "write 'after'"]).unwrap();
    assert_eq!(log, "before\noops\nafter\n");
}

#[test]
fn exit_stops_remaining_statements() {
    let mut host = ScriptHost::new();
    let log = host.execute(&["write 'a'", "exit 3", "write 'b'"]).unwrap();
    assert_eq!(log, "a\n");
    assert_eq!(host.last_exit_code(), Some(3));
}

#[test]
fn exit_defaults_to_code_zero() {
    let mut host = ScriptHost::new();
    let log = host.execute(&["exit"]).unwrap();
    assert_eq!(log, "");
    assert_eq!(host.last_exit_code(), Some(0));
}

#[test]
fn failing_statement_is_logged_even_without_log_errors() {
    // Error text is never dropped: the default path appends it to the log.
    let log = execute(&["throw 'boom'"]).unwrap();
    assert!(log.contains("boom"), "log was: {:?}", log);
}

#[test]
fn batch_continues_after_a_failing_statement() {
    let log = execute(&["throw 'boom'", "write 'after'"]).unwrap();
    assert!(log.contains("boom"));
    assert!(log.ends_with("after\n"));
}

#[test]
fn execute_logged_appends_error_lines_to_the_log() {
    let mut host = ScriptHost::new();
    let log = host.execute_logged(&["throw 'boom'"]).unwrap();
    assert!(log.contains("boom"), "log was: {:?}", log);
}

#[test]
fn custom_error_handler_receives_every_error_line() {
    let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let collector = Rc::clone(&seen);

    let options = ExecuteOptions::new()
        .log_errors(true)
        .on_error(Box::new(move |_ui, line| {
            collector.borrow_mut().push(line.to_string());
        }));

    let mut host = ScriptHost::new();
    let log = host
        .execute_with(options, &["error 'one'", "error 'two'", "write 'ok'"])
        .unwrap();

    // Routed to the handler, so the handler decides what lands in the log
    assert_eq!(log, "ok\n");
    assert_eq!(*seen.borrow(), vec!["one".to_string(), "two".to_string()]);
}

#[test]
fn error_handler_may_append_to_the_sink_itself() {
    let options = ExecuteOptions::new()
        .log_errors(true)
        .on_error(Box::new(|ui: &mut HostUi, line: &str| {
            ui.write("E: ");
            ui.write_line(line);
        }));

    let mut host = ScriptHost::new();
    let log = host.execute_with(options, &["error 'oops'"]).unwrap();
    assert_eq!(log, "E: oops\n");
}

#[test]
fn consecutive_batches_reset_exit_state() {
    let mut host = ScriptHost::new();
    host.execute(&["exit 5"]).unwrap();
    assert_eq!(host.last_exit_code(), Some(5));

    let log = host.execute(&["write 'ok'"]).unwrap();
    assert_eq!(log, "ok\n");
    assert_eq!(host.last_exit_code(), None);
}

#[test]
fn sessions_do_not_share_state_across_batches() {
    let mut host = ScriptHost::new();
    host.execute(&["set NAME world"]).unwrap();

    let log = host.execute(&["get NAME"]).unwrap();
    assert!(log.contains("not defined"), "log was: {:?}", log);
}

#[test]
fn variables_expand_within_a_batch() {
    let log = execute(&["set NAME world", "write hello $NAME"]).unwrap();
    assert_eq!(log, "hello world\n");
}

#[test]
fn quoted_fragments_suppress_expansion() {
    let log = execute(&["set NAME world", "write '$NAME'"]).unwrap();
    assert_eq!(log, "$NAME\n");
}

#[test]
fn host_variable_exposes_the_host_name() {
    let log = execute(&["write $HOST"]).unwrap();
    assert_eq!(log, format!("{}\n", HOST_NAME));
}

#[test]
fn integer_values_round_trip_through_variables() {
    let log = execute(&["set N 42", "get N"]).unwrap();
    assert_eq!(log, "42\n");
}

#[test]
fn vars_lists_matching_variables_sorted() {
    let log = execute(&["set A 1", "set ABBY two", "vars '^A'"]).unwrap();
    assert_eq!(log, "A=1\nABBY=two\n");
}

#[test]
fn vars_rejects_an_invalid_pattern() {
    let log = execute(&["vars '['"]).unwrap();
    assert!(log.contains("invalid pattern"), "log was: {:?}", log);
}

#[test]
fn unknown_command_becomes_an_error_line() {
    let log = execute(&["nope"]).unwrap();
    assert!(log.contains("unknown command: nope"), "log was: {:?}", log);
}

#[test]
fn blank_statements_produce_no_output() {
    let log = execute(&["", "   ", "# just a comment"]).unwrap();
    assert_eq!(log, "");
}

#[test]
fn empty_quoted_argument_writes_an_empty_line() {
    let log = execute(&["write ''"]).unwrap();
    assert_eq!(log, "\n");
}

#[test]
fn custom_ui_captures_the_same_log() {
    let ui = HostUi::shared();
    let mut host = ScriptHost::new();
    let log = host
        .execute_with(ExecuteOptions::new().ui(Rc::clone(&ui)), &["write 'x'"])
        .unwrap();
    assert_eq!(log, "x\n");
    assert_eq!(ui.borrow().log(), "x\n");
}

#[test]
fn last_session_is_left_open_for_inspection() {
    let mut host = ScriptHost::new();
    host.execute(&["set NAME world"]).unwrap();

    let session = host.last_session().unwrap();
    assert!(session.is_open());
    assert_eq!(session.host().name(), HOST_NAME);
    assert_eq!(
        session.variable("NAME"),
        Some(&Value::Text("world".to_string()))
    );
}

#[test]
fn set_should_exit_keeps_the_last_code() {
    let host = Host::new("test", HostUi::shared());
    host.set_should_exit(1);
    host.set_should_exit(7);
    assert!(host.exit_requested());
    assert_eq!(host.exit_code(), Some(7));
}

#[test]
fn unsupported_host_operations_fail_explicitly() {
    let host = Host::new("test", HostUi::shared());

    assert_eq!(
        host.current_culture().unwrap_err().kind,
        ErrorKind::Unsupported
    );
    assert_eq!(
        host.current_ui_culture().unwrap_err().kind,
        ErrorKind::Unsupported
    );
    assert_eq!(host.instance_id().unwrap_err().kind, ErrorKind::Unsupported);
    assert_eq!(host.version().unwrap_err().kind, ErrorKind::Unsupported);
    assert_eq!(
        host.enter_nested_prompt().unwrap_err().kind,
        ErrorKind::Unsupported
    );
    assert_eq!(
        host.exit_nested_prompt().unwrap_err().kind,
        ErrorKind::Unsupported
    );
    assert_eq!(
        host.notify_begin_application().unwrap_err().kind,
        ErrorKind::Unsupported
    );
    assert_eq!(
        host.notify_end_application().unwrap_err().kind,
        ErrorKind::Unsupported
    );
}

/// Custom command that requests termination twice in one statement.
struct QuitTwiceCmd;

impl Command for QuitTwiceCmd {
    fn run(
        &self,
        session: &mut Session,
        _input: Vec<Value>,
        _args: &[String],
    ) -> Result<StageOutput, HostError> {
        session.host().set_should_exit(1);
        session.host().set_should_exit(9);
        Ok(StageOutput::none())
    }
}

#[test]
fn double_exit_in_one_statement_keeps_last_code_and_halts() {
    let mut initial = InitialState::with_defaults();
    initial.add_command("quit-twice", Rc::new(QuitTwiceCmd));

    let mut host = ScriptHost::new();
    host.set_initial_state(Some(initial));

    let log = host
        .execute(&["write 'a'", "quit-twice", "write 'b'"])
        .unwrap();
    assert_eq!(log, "a\n");
    assert_eq!(host.last_exit_code(), Some(9));
}

#[test]
fn initial_state_applies_to_every_later_session_until_replaced() {
    let mut initial = InitialState::with_defaults();
    initial.add_command("quit-twice", Rc::new(QuitTwiceCmd));
    initial.add_variable("GREETING", Value::Text("hi".to_string()));

    let mut host = ScriptHost::new();
    host.set_initial_state(Some(initial));

    let first = host.execute(&["write $GREETING"]).unwrap();
    assert_eq!(first, "hi\n");

    // Second batch: same descriptor, fresh session
    host.execute(&["quit-twice"]).unwrap();
    assert_eq!(host.last_exit_code(), Some(9));

    host.set_initial_state(None);
    let third = host.execute(&["quit-twice"]).unwrap();
    assert!(third.contains("unknown command: quit-twice"));
}

#[test]
fn misconfigured_initial_state_is_a_fatal_setup_error() {
    let mut initial = InitialState::with_defaults();
    initial.add_command("bad name", Rc::new(QuitTwiceCmd));

    let mut host = ScriptHost::new();
    host.set_initial_state(Some(initial));

    let error = host.execute(&["write 'a'"]).unwrap_err();
    assert_eq!(error.kind, ErrorKind::SessionCreation);
}

#[test]
fn empty_initial_state_knows_no_commands() {
    let mut host = ScriptHost::new();
    host.set_initial_state(Some(InitialState::empty()));

    let log = host.execute(&["write 'a'"]).unwrap();
    assert!(log.contains("unknown command"), "log was: {:?}", log);
}

#[test]
fn pipeline_refuses_an_unopened_session() {
    let host = Rc::new(Host::new("test", HostUi::shared()));
    let mut session = Session::create(host, None).unwrap();

    let mut pipeline = session.create_pipeline();
    pipeline.add_script("write 'x'");
    let error = pipeline.invoke().unwrap_err();
    assert_eq!(error.kind, ErrorKind::SessionNotOpen);
    assert_eq!(pipeline.state(), PipelineState::Failed);
}

#[test]
fn pipeline_reports_its_completion_state() {
    let ui = HostUi::shared();
    let host = Rc::new(Host::new("test", Rc::clone(&ui)));
    let mut session = Session::create(host, None).unwrap();
    session.open();

    let mut pipeline = session.create_pipeline();
    assert_eq!(pipeline.state(), PipelineState::NotStarted);
    pipeline.add_script("write 'x'");
    pipeline.add_command(OUT_DEFAULT);
    pipeline.invoke().unwrap();
    assert_eq!(pipeline.state(), PipelineState::Completed);
    assert!(pipeline.drain_errors().is_empty());
    drop(pipeline);

    assert_eq!(ui.borrow().log(), "x\n");

    let mut pipeline = session.create_pipeline();
    pipeline.add_script("error 'oops'");
    pipeline.invoke().unwrap();
    assert_eq!(pipeline.state(), PipelineState::Failed);

    let records = pipeline.drain_errors();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, ErrorKind::CommandFailed);
}
