use std::time::{Duration, SystemTime};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use stanza::input::{action_for, InputAction};
use stanza::round::{EndReason, Round, RoundPhase};
use stanza::runtime::{RoundEvent, Runner, TestEventSource};

// Headless integration using the internal runtime + Round without a TTY.
// Verifies that a minimal typing flow completes via Runner/TestEventSource.
#[test]
fn headless_typing_flow_completes() {
    let mut round = Round::new("hi".to_string(), 60);

    let (tx, es) = TestEventSource::pair();
    let runner = Runner::with_interval(es, Duration::from_millis(5));

    for c in ['h', 'i'] {
        tx.send(RoundEvent::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::NONE,
        )))
        .unwrap();
    }

    let mut tick_handle = None;
    for _ in 0..100u32 {
        let now = SystemTime::now();
        match runner.step() {
            RoundEvent::Tick => {
                if let Some(handle) = tick_handle {
                    round.tick(handle, now);
                }
            }
            RoundEvent::Resize => {}
            RoundEvent::Key(key) => {
                if let InputAction::Type(c) = action_for(key) {
                    let mut text = round.typed().to_string();
                    text.push(c);
                    if let Some(handle) = round.submit_typed_text(&text, now) {
                        tick_handle = Some(handle);
                    }
                }
            }
        }
        if !round.is_running() && round.phase() != RoundPhase::Idle {
            break;
        }
    }

    assert_eq!(round.phase(), RoundPhase::Ended(EndReason::Completed));
    assert_eq!(round.metrics().accuracy_percent, 100);
}

#[test]
fn headless_timed_round_expires_via_ticks() {
    // Nothing but ticks arrive; the round must end by timeout, driven
    // through the runner's timeout-to-Tick conversion.
    let base = SystemTime::now();
    let mut round = Round::new("a passage nobody finishes".to_string(), 3);
    let handle = round.submit_typed_text("a", base).unwrap();

    let (_tx, es) = TestEventSource::pair();
    let runner = Runner::with_interval(es, Duration::from_millis(1));

    let mut simulated = 0u64;
    for _ in 0..10u32 {
        if let RoundEvent::Tick = runner.step() {
            simulated += 1;
            if round.tick(handle, base + Duration::from_secs(simulated)) {
                break;
            }
        }
    }

    assert_eq!(round.phase(), RoundPhase::Ended(EndReason::TimeUp));
    assert_eq!(simulated, 3);
}

#[test]
fn headless_reset_leaves_driver_ticks_inert() {
    let base = SystemTime::now();
    let mut round = Round::new("target".to_string(), 5);
    let handle = round.submit_typed_text("t", base).unwrap();

    round.request_reset();

    // the driver has not noticed the reset yet and keeps firing
    for secs in 1..20u64 {
        assert!(!round.tick(handle, base + Duration::from_secs(secs)));
    }
    assert_eq!(round.phase(), RoundPhase::Idle);
    assert_eq!(round.metrics().gross_wpm, 0);
}
