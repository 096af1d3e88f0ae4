//! Scoring, ranking and timing tests for the session layer.

use std::cell::RefCell;
use std::rc::Rc;

use memo_grid::core::{ManualClock, PlayerId, PlayerMap};
use memo_grid::session::{
    rank_scores, GameOutcome, MultiPlayerController, PlayerScore, SessionConfig, SessionController,
    SessionSnapshot, SinglePlayerController,
};
use memo_grid::timer::{format_millis, ChangeReason, Timer};

fn scores(rows: &[(u32, u32)]) -> PlayerMap<PlayerScore> {
    PlayerMap::new(rows.len(), |player| PlayerScore {
        matches: rows[player.index()].0,
        tries: rows[player.index()].1,
        is_active: false,
    })
}

/// Test the ranking order: most matches, then fewest tries.
#[test]
fn test_ranking_order_and_single_winner() {
    let ranked = rank_scores(&scores(&[(3, 5), (3, 4), (2, 3)]));

    let order: Vec<u16> = ranked.iter().map(|r| r.player).collect();
    assert_eq!(order, vec![2, 1, 3]);

    let winners: Vec<bool> = ranked.iter().map(|r| r.is_winner).collect();
    assert_eq!(winners, vec![true, false, false]);
    assert_eq!(ranked[0].score, "3 / 4");
}

/// Test that identical scores are all winners.
#[test]
fn test_identical_scores_draw() {
    let outcome = GameOutcome::Multi(rank_scores(&scores(&[(2, 4), (2, 4)])));

    assert_eq!(outcome.winners(), vec![1, 2]);
    assert_eq!(outcome.headline(), "It's a draw!");
}

/// Test the headline for a shared win that is not a full draw.
#[test]
fn test_partial_tie_headline() {
    let outcome = GameOutcome::Multi(rank_scores(&scores(&[(2, 4), (1, 1), (2, 4), (2, 4)])));

    assert_eq!(outcome.headline(), "Players 1, 3 and 4 win");
    assert!(outcome.is_winner(PlayerId::new(2)));
    assert!(!outcome.is_winner(PlayerId::new(1)));
}

/// Test the timer's second count after two and a half periods and after reset.
#[test]
fn test_timer_seconds_and_reset() {
    let clock = ManualClock::shared();
    let mut timer = Timer::new(clock.clone());
    let reasons = Rc::new(RefCell::new(Vec::new()));
    let sink = reasons.clone();
    timer.on_change(move |change, _| sink.borrow_mut().push(change.reason));

    timer.start();
    clock.advance(2_500);
    assert_eq!(timer.poll(), 2);
    assert!(timer.format("S", 0).parse::<u64>().unwrap() >= 2);

    timer.reset();
    assert_eq!(timer.value(), 0);
    assert_eq!(timer.format("S", 0), "0");

    timer.start();
    clock.advance(1_000);
    timer.poll();
    assert_eq!(timer.value(), 1_000);

    assert_eq!(
        *reasons.borrow(),
        vec![
            ChangeReason::Start,
            ChangeReason::Tick,
            ChangeReason::Tick,
            ChangeReason::Stop,
            ChangeReason::Reset,
            ChangeReason::Start,
            ChangeReason::Tick,
        ]
    );
}

/// Test the single-player time format.
#[test]
fn test_seventy_five_seconds_format() {
    assert_eq!(format_millis(75_000, "M:ss", 0), "1:15");
    assert_eq!(format_millis(75_000, "M:s", 2), "01:15");
}

/// Test that a stopped timer resumes from its accumulated value.
#[test]
fn test_timer_resumes_after_stop() {
    let clock = ManualClock::shared();
    let mut timer = Timer::new(clock.clone());

    timer.start();
    clock.advance(1_500);
    timer.stop();
    clock.advance(10_000);
    timer.start();
    clock.advance(500);
    timer.stop();

    assert_eq!(timer.value(), 2_000);
}

/// Test a single-player session end to end without a grid.
#[test]
fn test_single_player_session() {
    let clock = ManualClock::shared();
    let frames = Rc::new(RefCell::new(Vec::new()));
    let sink = frames.clone();
    let mut single: Box<dyn SessionController> = Box::new(
        SinglePlayerController::new(clock.clone())
            .with_presenter(move |snapshot| sink.borrow_mut().push(snapshot.clone())),
    );

    single.activate(&SessionConfig::default()).unwrap();
    single.on_start();
    single.on_try();
    clock.advance(3_000);
    single.tick();
    single.on_match();

    clock.advance(400);

    let result = match single.on_end() {
        GameOutcome::Single(result) => result,
        other => panic!("unexpected outcome {other:?}"),
    };
    assert_eq!(result.tries, 2);
    assert_eq!(result.elapsed_ms, 3_400);
    assert_eq!(result.time, "0:03");

    // activate, start, try, tick, match, end
    let frames = frames.borrow();
    assert_eq!(frames.len(), 6);
    assert_eq!(frames.last(), Some(&SessionSnapshot::Single(result)));
}

/// Test the multi-player turn order over a scripted game.
#[test]
fn test_multi_player_session() {
    let mut multi = MultiPlayerController::new();
    multi.activate(&SessionConfig::players(3)).unwrap();

    let mut turns = vec![multi.active_player().index()];
    for is_fail in [true, true, false, true] {
        multi.record_try(is_fail);
        turns.push(multi.active_player().index());
    }
    assert_eq!(turns, vec![0, 1, 2, 2, 0]);

    let SessionSnapshot::Multi(rows) = multi.result() else {
        panic!("expected multi snapshot");
    };
    let scores: Vec<&str> = rows.iter().map(|r| r.score.as_str()).collect();
    assert_eq!(scores, vec!["0 / 1", "0 / 1", "1 / 2"]);

    let outcome = multi.on_end();
    assert_eq!(outcome.winners(), vec![3]);
    assert_eq!(outcome.headline(), "Player 3 wins");
}

/// Test that a session snapshot serializes for a UI.
#[test]
fn test_snapshot_serializes() {
    let multi = MultiPlayerController::new();
    let json = serde_json::to_value(multi.result()).unwrap();

    assert_eq!(json["Multi"][0]["active"], true);
    assert_eq!(json["Multi"][1]["score"], "0 / 0");
}
