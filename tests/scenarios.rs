// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! End-to-end scenarios: serial bytes in, reply lines and register writes out.
//!
//! Runs on the host against the recording backend in `common`.

mod common;

use common::{Bench, PwmCall};
use pwmctl::config::{ControllerConfig, RestartPolicy, RX_LINE_QUEUE};
use pwmctl::control::Channel;

const STATUS_AFTER_BOOT: &str = "Duty: 50% -> 50%\r\nFreq: 20000 Hz\r\nState: ON\r\n";

#[test]
fn boot_prints_start_and_banner() {
    let bench = Bench::boot();
    assert_eq!(
        bench.console,
        "PWM START\r\n\r\n=== PWM CONTROLLER READY ===\r\n"
    );
    assert_eq!(bench.rx.armed, 1, "receive must be armed once at startup");
    assert_eq!(bench.backend().period, 799);
    assert_eq!(bench.backend().compare, [399; 3]);
    assert!(bench.backend().outputs_enabled);
}

#[test]
fn status_after_boot_reports_running() {
    let mut bench = Bench::boot();
    assert_eq!(bench.send("status\n"), STATUS_AFTER_BOOT);
}

#[test]
fn set_then_wait_reaches_target() {
    let mut bench = Bench::boot();
    assert_eq!(bench.send("set 80\n"), "TARGET 80%\r\n");

    bench.advance(2_000);
    assert_eq!(
        bench.send("status\n"),
        "Duty: 80% -> 80%\r\nFreq: 20000 Hz\r\nState: ON\r\n"
    );
    // 80% of 799
    assert_eq!(bench.backend().compare, [639; 3]);
}

#[test]
fn ramp_moves_one_percent_per_twenty_ms() {
    let mut bench = Bench::boot();
    bench.send("set 40\n");

    let mut last = bench.controller.state().duty_now;
    for _ in 0..15 {
        bench.advance(20);
        let now = bench.controller.state().duty_now;
        assert_eq!(now, last.saturating_sub(1).max(40));
        last = now;
    }
    assert_eq!(last, 40);
}

#[test]
fn frequency_change_goes_through_safe_state() {
    let mut bench = Bench::boot();
    let before = bench.backend().calls.len();

    assert_eq!(
        bench.send("freq 10000\n"),
        "PWM STOP\r\nPWM START\r\nFREQ 10000 Hz\r\n"
    );
    assert_eq!(
        &bench.backend().calls[before..],
        &[
            PwmCall::Disable,
            PwmCall::SetPeriod(1_599),
            PwmCall::SetCompare(Channel::Ch1, 799),
            PwmCall::SetCompare(Channel::Ch2, 799),
            PwmCall::SetCompare(Channel::Ch3, 799),
            PwmCall::Enable,
        ]
    );
    assert_eq!(
        bench.send("status\n"),
        "Duty: 50% -> 50%\r\nFreq: 10000 Hz\r\nState: ON\r\n"
    );
}

#[test]
fn out_of_range_frequency_is_rejected() {
    let mut bench = Bench::boot();
    let calls = bench.backend().calls.len();

    assert_eq!(bench.send("freq 999\n"), "FREQ ERR\r\n");
    assert_eq!(bench.send("freq 50001\n"), "FREQ ERR\r\n");
    assert_eq!(bench.send("freq abc\n"), "FREQ ERR\r\n");

    assert_eq!(bench.backend().calls.len(), calls);
    assert_eq!(bench.send("status\n"), STATUS_AFTER_BOOT);
}

#[test]
fn unknown_command_changes_nothing() {
    let mut bench = Bench::boot();
    let calls = bench.backend().calls.len();
    let state = bench.controller.state();

    assert_eq!(bench.send("foo\n"), "CMD ERR\r\n");
    assert_eq!(bench.send("Start\n"), "CMD ERR\r\n");
    assert_eq!(bench.controller.state(), state);
    assert_eq!(bench.backend().calls.len(), calls);
}

#[test]
fn start_and_stop_twice() {
    let mut bench = Bench::boot();

    assert_eq!(bench.send("stop\nstop\n"), "PWM STOP\r\nPWM STOP\r\n");
    assert!(!bench.controller.state().enabled);
    assert!(!bench.backend().outputs_enabled);

    assert_eq!(bench.send("start\nstart\n"), "PWM START\r\nPWM START\r\n");
    assert!(bench.controller.state().enabled);
    assert!(bench.backend().outputs_enabled);
}

#[test]
fn crlf_terminated_command_also_yields_cmd_err() {
    let mut bench = Bench::boot();
    assert_eq!(
        bench.send("status\r\n"),
        format!("{STATUS_AFTER_BOOT}CMD ERR\r\n")
    );
}

#[test]
fn frequency_change_restarts_stopped_outputs_by_default() {
    let mut bench = Bench::boot();
    bench.send("stop\n");
    bench.send("freq 5000\n");
    assert!(bench.controller.state().enabled);
    assert!(bench.backend().outputs_enabled);
}

#[test]
fn resume_policy_keeps_stopped_outputs_off() {
    let mut bench = Bench::boot_with(ControllerConfig {
        restart_policy: RestartPolicy::Resume,
        ..ControllerConfig::default()
    });
    bench.send("stop\n");
    assert_eq!(bench.send("freq 5000\n"), "PWM STOP\r\nFREQ 5000 Hz\r\n");
    assert!(!bench.controller.state().enabled);
    assert!(!bench.backend().outputs_enabled);
    assert_eq!(bench.backend().period, 3_199);
}

#[test]
fn ramp_runs_while_stopped() {
    let mut bench = Bench::boot();
    bench.send("stop\nset 55\n");
    bench.advance(100);
    assert_eq!(bench.controller.state().duty_now, 55);
    assert!(!bench.backend().outputs_enabled);
}

#[test]
fn every_received_byte_rearms_the_receive() {
    let mut bench = Bench::boot();
    let text = "set 10\nfreq 2000\nstatus\n";
    bench.send(text);
    assert_eq!(bench.rx.armed, 1 + text.len());
}

#[test]
fn overlong_line_wraps_without_error() {
    let mut bench = Bench::boot();
    let mut text = "x".repeat(64);
    text.push_str("stop\n");
    assert_eq!(bench.send(&text), "PWM STOP\r\n");
}

#[test]
fn burst_of_crlf_commands_runs_every_line_in_order() {
    let mut bench = Bench::boot();
    assert_eq!(
        bench.burst("stop\r\nset 10\r\n"),
        "PWM STOP\r\nCMD ERR\r\nTARGET 10%\r\nCMD ERR\r\n"
    );
    assert!(!bench.controller.state().enabled);
    assert!(!bench.backend().outputs_enabled);
    assert_eq!(bench.controller.state().duty_target, 10);
    assert_eq!(bench.rx_lines.take_dropped(), 0);
}

#[test]
fn burst_with_frequency_change_keeps_later_commands() {
    let mut bench = Bench::boot();
    assert_eq!(
        bench.burst("freq 10000\nset 70\nstatus\n"),
        "PWM STOP\r\nPWM START\r\nFREQ 10000 Hz\r\nTARGET 70%\r\n\
         Duty: 50% -> 70%\r\nFreq: 10000 Hz\r\nState: ON\r\n"
    );
    assert_eq!(bench.backend().period, 1_599);
}

#[test]
fn burst_beyond_queue_capacity_drops_the_excess() {
    let mut bench = Bench::boot();
    let text = "stop\n".repeat(RX_LINE_QUEUE + 2);
    assert_eq!(bench.burst(&text), "PWM STOP\r\n".repeat(RX_LINE_QUEUE));
    assert_eq!(bench.rx_lines.take_dropped(), 2);

    // The link keeps working afterwards.
    assert_eq!(bench.burst("start\n"), "PWM START\r\n");
}
