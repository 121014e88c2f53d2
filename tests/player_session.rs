//! Session state carried by a player between plays
//!
//! Covers pause and resume, early return, stack lifetimes, and snapshots.

use macroscope::language::{Program, compile};
use macroscope::player::{MemorySurface, PlayOutcome, Player, PlayerSnapshot, Position};

fn program(source: &str) -> Program {
    compile(source).into_program().expect("macro compiles")
}

#[tokio::test]
async fn empty_program_completes_without_touching_state() {
    let mut surface = MemorySurface::new("untouched");
    let mut player = Player::new();

    let paused = program("[a]\npause\n[b]");
    assert_eq!(
        player.play(&mut surface, &paused).await,
        PlayOutcome::Paused { index: 1 }
    );

    let outcome = player.play(&mut surface, &program("")).await;
    assert_eq!(outcome, PlayOutcome::Completed);
    assert_eq!(player.pause_index(), Some(1));
    assert_eq!(surface.text(), "auntouched");
}

#[tokio::test]
async fn pause_then_resume_after_pause_operation() {
    let mut surface = MemorySurface::new("");
    let mut player = Player::new();
    let macro_program = program("[a]\npause\n[b]");

    let outcome = player.play(&mut surface, &macro_program).await;
    assert_eq!(outcome, PlayOutcome::Paused { index: 1 });
    assert!(outcome.is_suspended());
    assert_eq!(player.pause_index(), Some(1));
    assert_eq!(surface.text(), "a");

    let outcome = player.play(&mut surface, &macro_program).await;
    assert_eq!(outcome, PlayOutcome::Completed);
    assert_eq!(player.pause_index(), None);
    assert_eq!(surface.text(), "ab");

    // A completed run starts over on the next play.
    let outcome = player.play(&mut surface, &macro_program).await;
    assert_eq!(outcome, PlayOutcome::Paused { index: 1 });
    assert_eq!(surface.text(), "aba");
}

#[tokio::test]
async fn stacks_survive_a_pause() {
    let mut surface = MemorySurface::new("token rest");
    let mut player = Player::new();
    let macro_program = program("push-word\npause\npop-text");

    player.play(&mut surface, &macro_program).await;
    assert_eq!(player.text_stack(), ["token".to_string()]);

    let outcome = player.play(&mut surface, &macro_program).await;
    assert_eq!(outcome, PlayOutcome::Completed);
    assert!(player.text_stack().is_empty());
    assert_eq!(surface.text(), "tokentoken rest");
}

#[tokio::test]
async fn fresh_run_clears_stacks() {
    let mut surface = MemorySurface::new("word");
    let mut player = Player::new();
    let macro_program = program("push-word\npush-position\npush-word");

    player.play(&mut surface, &macro_program).await;
    assert_eq!(player.text_stack().len(), 2);
    assert_eq!(player.position_stack(), [Position::new(0, 0)]);

    player.play(&mut surface, &macro_program).await;
    assert_eq!(player.text_stack().len(), 2);
    assert_eq!(player.position_stack().len(), 1);
}

#[tokio::test]
async fn return_stops_execution() {
    let mut surface = MemorySurface::new("");
    let mut player = Player::new();

    let outcome = player.play(&mut surface, &program("[a]\nreturn\n[b]")).await;
    assert_eq!(outcome, PlayOutcome::Returned);
    assert!(!outcome.is_suspended());
    assert_eq!(player.pause_index(), None);
    assert_eq!(surface.text(), "a");
}

#[tokio::test]
async fn different_program_discards_pending_pause() {
    let mut surface = MemorySurface::new("");
    let mut player = Player::new();
    let first = program("[x]\npause\n[y]");
    let second = program("[z]");

    player.play(&mut surface, &first).await;
    assert_eq!(player.pause_index(), Some(1));

    let outcome = player.play(&mut surface, &second).await;
    assert_eq!(outcome, PlayOutcome::Completed);
    assert_eq!(player.pause_index(), None);

    // The first program starts over instead of resuming.
    let outcome = player.play(&mut surface, &first).await;
    assert_eq!(outcome, PlayOutcome::Paused { index: 1 });
    assert_eq!(surface.text(), "xzx");
}

#[tokio::test]
async fn reset_pause_restarts_program() {
    let mut surface = MemorySurface::new("");
    let mut player = Player::new();
    let macro_program = program("[1]\npause\n[2]");

    player.play(&mut surface, &macro_program).await;
    player.reset_pause();
    assert_eq!(player.pause_index(), None);

    player.play(&mut surface, &macro_program).await;
    assert_eq!(surface.text(), "11");
}

#[tokio::test]
async fn snapshot_resumes_on_another_player() {
    let mut surface = MemorySurface::new("");
    let macro_program = program("push-position\n[a]\npause\npop-position\n[b]");

    let mut player = Player::new();
    player.play(&mut surface, &macro_program).await;
    let json = serde_json::to_string(&player.snapshot()).expect("snapshot serializes");

    let snapshot: PlayerSnapshot = serde_json::from_str(&json).expect("snapshot parses");
    let mut restored = Player::from_snapshot(snapshot);
    let outcome = restored.play(&mut surface, &macro_program).await;
    assert_eq!(outcome, PlayOutcome::Completed);
    assert_eq!(surface.text(), "ba");
}
