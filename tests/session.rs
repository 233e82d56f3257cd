use jtagctl::Controller;
use jtagctl::console::ScriptedConsole;
use jtagctl::error::{JtagError, JtagResult};
use jtagctl::link::mock::MockLink;

/// Drive a full session against a scripted link and operator, keeping
/// handles to both for assertions afterwards.
fn run_session(link: MockLink, inputs: &[&str]) -> (JtagResult<()>, MockLink, ScriptedConsole) {
    let console = ScriptedConsole::new(inputs.iter().copied());
    let transcript = console.clone();
    let handle = link.clone();

    let result = Controller::attach(Box::new(link)).run_with(console);

    (result, handle, transcript)
}

#[test]
fn handshake_detects_prompt_and_sends_start_token() {
    let link = MockLink::new();
    link.enqueue_line("Ready>\n");
    link.enqueue_line("Menu>\n");

    let (result, link, transcript) = run_session(link, &["s", "z"]);

    result.unwrap();
    assert_eq!(link.sent_lines(), vec!["s\n", "z\n"]);
    assert_eq!(transcript.echoed(), vec!["Ready>\n", "Menu>\n"]);
}

#[test]
fn handshake_echoes_banner_and_retries_after_timeouts() {
    let link = MockLink::new();
    link.enqueue_timeout();
    link.enqueue_line("Jtagger v1.2 for MAX10\n");
    link.enqueue_timeout();
    link.enqueue_line("cmd> ");
    link.enqueue_line("cmd> ");

    let (result, link, transcript) = run_session(link, &["s", "z"]);

    result.unwrap();
    assert_eq!(link.sent_lines(), vec!["s\n", "z\n"]);
    assert_eq!(
        transcript.echoed(),
        vec!["Jtagger v1.2 for MAX10\n", "cmd> ", "cmd> "]
    );
}

#[test]
fn handshake_discards_operator_input_until_start_token() {
    let link = MockLink::new();
    link.enqueue_line("hello> ");
    link.enqueue_line("ok> ");

    let (result, link, _) = run_session(link, &["go", "", "s", "z"]);

    result.unwrap();
    // Neither "go" nor the empty line reached the wire
    assert_eq!(link.sent_lines(), vec!["s\n", "z\n"]);
}

#[test]
fn empty_command_is_transmitted_as_single_space() {
    let link = MockLink::new();
    link.enqueue_line("boot> ");
    link.enqueue_line("cmd> ");
    link.enqueue_line("cmd> ");

    let (result, link, _) = run_session(link, &["s", "", "z"]);

    result.unwrap();
    assert_eq!(
        link.write_log(),
        vec![b"s\n".to_vec(), b" \n".to_vec(), b"z\n".to_vec()]
    );
}

#[test]
fn commands_are_forwarded_verbatim() {
    let link = MockLink::new();
    link.enqueue_line("boot> ");
    link.enqueue_line("ir> ");
    link.enqueue_line("ir> ");

    let (result, link, _) = run_session(link, &["s", "shift_ir 0x006", "z"]);

    result.unwrap();
    assert_eq!(link.sent_lines(), vec!["s\n", "shift_ir 0x006\n", "z\n"]);
}

#[test]
fn terminate_performs_one_final_drain_then_closes() {
    let link = MockLink::new();
    link.enqueue_line("hi> ");
    link.enqueue_line("Menu>\n");
    link.enqueue_line("bye\n");

    let (result, link, transcript) = run_session(link, &["s", "z"]);

    result.unwrap();
    assert_eq!(link.sent_lines(), vec!["s\n", "z\n"]);
    // The goodbye line arrives after the terminate command went out
    assert_eq!(transcript.echoed(), vec!["hi> ", "Menu>\n", "bye\n"]);
    assert_eq!(link.close_count(), 1);
}

#[test]
fn prompt_marker_is_detected_at_any_position() {
    let link = MockLink::new();
    link.enqueue_line(">boot\n");
    link.enqueue_line("mid > line\n");
    link.enqueue_line("end>\n");

    let (result, link, _) = run_session(link, &["s", "x", "z"]);

    result.unwrap();
    assert_eq!(link.sent_lines(), vec!["s\n", "x\n", "z\n"]);
}

#[test]
fn lines_without_marker_do_not_consume_operator_input() {
    let link = MockLink::new();
    link.enqueue_line("no marker here\n");
    link.enqueue_line("still none\n");
    link.enqueue_line("ready> ");
    link.enqueue_line("ok> ");

    let (result, link, transcript) = run_session(link, &["s", "z"]);

    result.unwrap();
    assert_eq!(
        transcript.echoed(),
        vec!["no marker here\n", "still none\n", "ready> ", "ok> "]
    );
    assert_eq!(link.sent_lines(), vec!["s\n", "z\n"]);
}

#[test]
fn quiet_device_in_steady_state_keeps_waiting() {
    let link = MockLink::new();
    link.enqueue_line("go> ");
    link.enqueue_timeout();
    link.enqueue_timeout();
    link.enqueue_line("cmd> ");

    let (result, link, _) = run_session(link, &["s", "z"]);

    result.unwrap();
    assert_eq!(link.sent_lines(), vec!["s\n", "z\n"]);
}

#[test]
fn empty_reads_are_quiet_and_never_echoed() {
    let link = MockLink::new();
    link.enqueue_line("");
    link.enqueue_line("cmd> ");
    link.enqueue_line("cmd> ");

    let (result, _, transcript) = run_session(link, &["s", "z"]);

    result.unwrap();
    assert_eq!(transcript.echoed(), vec!["cmd> ", "cmd> "]);
}

#[test]
fn round_trip_with_no_commands_closes_exactly_once() {
    let link = MockLink::new();
    link.enqueue_line("cmd> ");
    link.enqueue_line("cmd> ");

    let (result, link, _) = run_session(link, &["s", "z"]);

    result.unwrap();
    assert_eq!(link.reset_count(), 1);
    assert_eq!(link.close_count(), 1);
    assert_eq!(link.sent_lines(), vec!["s\n", "z\n"]);
}

#[test]
fn link_fault_in_steady_state_still_closes_the_link() {
    let link = MockLink::new();
    link.enqueue_line("go> ");
    link.enqueue_fault("device unplugged");

    let (result, link, _) = run_session(link, &["s"]);

    match result {
        Err(JtagError::LinkFault(msg)) => assert_eq!(msg, "device unplugged"),
        other => panic!("Expected LinkFault, got: {:?}", other),
    }
    assert_eq!(link.sent_lines(), vec!["s\n"]);
    assert_eq!(link.close_count(), 1);
}

#[test]
fn link_fault_during_handshake_still_closes_the_link() {
    let link = MockLink::new();
    link.enqueue_fault("read error");

    let (result, link, _) = run_session(link, &[]);

    assert!(matches!(result, Err(JtagError::LinkFault(_))));
    assert_eq!(link.close_count(), 1);
}
