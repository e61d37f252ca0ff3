use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use flipquiz::{
    bank::QuestionBank,
    card::Stage,
    controls::{Controls, Flow},
    runtime::{ManualClock, Runner, TermEvent, TestEventSource},
    session::{Phase, RevealMode, SessionOptions},
    Quiz,
};
use rand::{rngs::StdRng, SeedableRng};

// Headless integration using the internal runtime + Quiz without a TTY.
// Keys travel through a channel, Runner hands them to Controls exactly as
// the binary does.

fn key(c: KeyCode) -> TermEvent {
    TermEvent::Key(KeyEvent::new(c, KeyModifiers::NONE))
}

fn chars(tx: &mpsc::Sender<TermEvent>, s: &str) {
    for c in s.chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }
}

fn build_quiz(options: SessionOptions) -> Quiz {
    let bank = QuestionBank::builtin("arithmetic").unwrap();
    Quiz::new(&bank.entries, options, &mut StdRng::seed_from_u64(11))
}

/// Drive the loop until the channel is drained; a frame arrives once nothing is queued.
fn drain(
    runner: &mut Runner<TestEventSource, ManualClock>,
    controls: &mut Controls,
    quiz: &mut Quiz,
) -> Flow {
    for _ in 0..500u32 {
        match runner.step() {
            TermEvent::Frame | TermEvent::Closed => return Flow::Continue,
            TermEvent::Resize => {}
            TermEvent::Second(secs) => {
                for _ in 0..secs {
                    quiz.tick();
                }
            }
            TermEvent::Key(k) => match controls.on_key(k, quiz) {
                Flow::Continue => {}
                other => return other,
            },
        }
        runner.count_seconds(quiz.phase() == Phase::Preview && quiz.countdown().is_running());
    }
    Flow::Continue
}

fn harness() -> (
    mpsc::Sender<TermEvent>,
    ManualClock,
    Runner<TestEventSource, ManualClock>,
) {
    let (tx, events) = TestEventSource::channel();
    let clock = ManualClock::new();
    let runner = Runner::with_clock(events, Duration::from_millis(5), clock.clone());
    (tx, clock, runner)
}

#[test]
fn headless_full_session_with_password_preview_and_shame() {
    let mut quiz = build_quiz(SessionOptions {
        cards: 3,
        preview_secs: Some(2),
        secret: Some("chalk".into()),
        ..SessionOptions::default()
    });
    let mut controls = Controls::new();
    let (tx, clock, mut runner) = harness();

    // Wrong password keeps the gate closed
    chars(&tx, "chak");
    tx.send(key(KeyCode::Enter)).unwrap();
    drain(&mut runner, &mut controls, &mut quiz);
    assert_eq!(quiz.phase(), Phase::Auth);
    assert!(quiz.error().is_some());

    chars(&tx, "chalk");
    tx.send(key(KeyCode::Enter)).unwrap();
    drain(&mut runner, &mut controls, &mut quiz);
    assert_eq!(quiz.phase(), Phase::Preview);
    assert!(quiz.error().is_none());

    // Start the preview and let two seconds elapse
    chars(&tx, "s");
    drain(&mut runner, &mut controls, &mut quiz);
    assert!(quiz.countdown().is_running());
    assert!(runner.is_counting());
    clock.advance(Duration::from_secs(2));
    drain(&mut runner, &mut controls, &mut quiz);
    assert_eq!(quiz.phase(), Phase::Game);
    assert!(!runner.is_counting());

    // Card 1: answered in two steps
    chars(&tx, "1");
    tx.send(key(KeyCode::Enter)).unwrap();
    tx.send(key(KeyCode::Enter)).unwrap();
    drain(&mut runner, &mut controls, &mut quiz);
    assert_eq!(quiz.cards()[0].stage(), Stage::Answered);

    // Card 2: nobody knows it
    chars(&tx, "2c");
    chars(&tx, "Sam");
    tx.send(key(KeyCode::Enter)).unwrap();
    drain(&mut runner, &mut controls, &mut quiz);
    assert_eq!(quiz.shame_log().len(), 1);
    assert_eq!(quiz.shame_log()[0].name, "Sam");
    assert_eq!(quiz.shame_log()[0].question, quiz.cards()[1].question());
    assert_eq!(quiz.cards_remaining(), 1);

    // Card 3: dismissed once, then reopened and finished
    chars(&tx, "3");
    tx.send(key(KeyCode::Esc)).unwrap();
    drain(&mut runner, &mut controls, &mut quiz);
    assert!(quiz.overlay().is_none());
    assert!(quiz.cards()[2].stage().is_question());

    chars(&tx, "3ad");
    drain(&mut runner, &mut controls, &mut quiz);
    assert!(quiz.is_complete());

    chars(&tx, "n");
    assert_eq!(drain(&mut runner, &mut controls, &mut quiz), Flow::NewSession);
}

#[test]
fn headless_single_step_without_gate_or_timer() {
    let mut quiz = build_quiz(SessionOptions {
        cards: 2,
        preview_secs: None,
        reveal: RevealMode::SingleStep,
        wall_of_shame: false,
        secret: None,
    });
    let mut controls = Controls::new();
    let (tx, _clock, mut runner) = harness();
    assert_eq!(quiz.phase(), Phase::Game);

    tx.send(key(KeyCode::Enter)).unwrap();
    chars(&tx, "c");
    tx.send(key(KeyCode::Enter)).unwrap();
    drain(&mut runner, &mut controls, &mut quiz);
    assert!(!controls.is_naming());
    assert!(quiz.shame_log().is_empty());
    assert_eq!(quiz.cards()[0].stage(), Stage::Answered);

    tx.send(key(KeyCode::Right)).unwrap();
    tx.send(key(KeyCode::Char(' '))).unwrap();
    tx.send(key(KeyCode::Char(' '))).unwrap();
    drain(&mut runner, &mut controls, &mut quiz);
    assert!(quiz.is_complete());

    chars(&tx, "q");
    assert_eq!(drain(&mut runner, &mut controls, &mut quiz), Flow::Quit);
}

#[test]
fn headless_preview_pause_holds_the_clock() {
    let mut quiz = build_quiz(SessionOptions {
        preview_secs: Some(10),
        ..SessionOptions::default()
    });
    let mut controls = Controls::new();
    let (tx, clock, mut runner) = harness();

    // 10 -> 15 -> 10 -> 5 before starting
    chars(&tx, "+--");
    drain(&mut runner, &mut controls, &mut quiz);
    assert_eq!(quiz.countdown().duration(), 5);

    chars(&tx, "s");
    drain(&mut runner, &mut controls, &mut quiz);
    clock.advance(Duration::from_millis(1200));
    drain(&mut runner, &mut controls, &mut quiz);
    assert_eq!(quiz.countdown().remaining(), 4);

    chars(&tx, "p");
    drain(&mut runner, &mut controls, &mut quiz);
    assert!(!runner.is_counting());
    clock.advance(Duration::from_secs(30));
    drain(&mut runner, &mut controls, &mut quiz);
    assert_eq!(quiz.countdown().remaining(), 4);

    // Duration is locked once the timer has run
    chars(&tx, "+");
    drain(&mut runner, &mut controls, &mut quiz);
    assert_eq!(quiz.countdown().duration(), 5);
}

#[test]
fn headless_ctrl_c_quits_from_any_phase() {
    let mut quiz = build_quiz(SessionOptions {
        secret: Some("x".into()),
        ..SessionOptions::default()
    });
    let mut controls = Controls::new();
    let (tx, _clock, mut runner) = harness();

    tx.send(TermEvent::Key(KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
    )))
    .unwrap();
    assert_eq!(drain(&mut runner, &mut controls, &mut quiz), Flow::Quit);
}
