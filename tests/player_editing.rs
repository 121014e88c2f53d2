//! Editing behaviour of the player
//!
//! Each test compiles a small macro and plays it against an in-memory
//! surface, checking the resulting text, selection, and clipboard.

use macroscope::language::{Program, compile};
use macroscope::player::{MemorySurface, PlayOutcome, Player, Position, Selection, TextSurface};

fn program(source: &str) -> Program {
    compile(source).into_program().expect("macro compiles")
}

async fn run(source: &str, surface: &mut MemorySurface) -> PlayOutcome {
    Player::new().play(surface, &program(source)).await
}

#[tokio::test]
async fn push_and_pop_position_restores_cursor() {
    let mut surface =
        MemorySurface::new("hello world\nsecond line").with_cursor(Position::new(0, 3));
    run(
        "push-position\nmove down\nmove end-line\npop-position",
        &mut surface,
    )
    .await;
    assert_eq!(surface.selection(), Selection::caret(Position::new(0, 3)));
}

#[tokio::test]
async fn pop_position_with_select_spans_back() {
    let mut surface = MemorySurface::new("hello world");
    run("push-position\nmove right 5\npop-position select", &mut surface).await;
    let selection = surface.selection();
    assert_eq!(selection.anchor, Position::new(0, 5));
    assert_eq!(selection.active, Position::new(0, 0));
    assert_eq!(surface.text_in(selection.range()), "hello");
}

#[tokio::test]
async fn copy_word_then_paste() {
    let mut surface = MemorySurface::new("alpha beta").with_cursor(Position::new(0, 1));
    run("copy-word\nmove end-line\n[ ]\npaste", &mut surface).await;
    assert_eq!(surface.text(), "alpha beta alpha");
    assert_eq!(surface.read_clipboard().as_deref(), Some("alpha"));
}

#[tokio::test]
async fn copy_and_paste_without_material_are_no_ops() {
    let mut surface = MemorySurface::new("abc").with_clipboard("keep");
    run("copy", &mut surface).await;
    assert_eq!(surface.read_clipboard().as_deref(), Some("keep"));

    let mut surface = MemorySurface::new("abc");
    run("paste\n[!]", &mut surface).await;
    assert_eq!(surface.text(), "!abc");
}

#[tokio::test]
async fn text_literal_replaces_selection() {
    let mut surface = MemorySurface::new("old text");
    run("move right 3 select\n[new]", &mut surface).await;
    assert_eq!(surface.text(), "new text");
}

#[tokio::test]
async fn push_text_and_pop_text() {
    let mut surface =
        MemorySurface::new("  indented line  \nnext").with_cursor(Position::new(0, 4));
    run(
        "push-trimmed-line\nmove down\nmove end-line\npop-text",
        &mut surface,
    )
    .await;
    assert_eq!(surface.text(), "  indented line  \nnextindented line");
}

#[tokio::test]
async fn pop_text_on_empty_stack_is_a_no_op() {
    let mut surface = MemorySurface::new("same");
    let outcome = run("pop-text\npop-position", &mut surface).await;
    assert_eq!(outcome, PlayOutcome::Completed);
    assert_eq!(surface.text(), "same");
}

#[tokio::test]
async fn case_conversion_rewrites_selection() {
    let mut surface = MemorySurface::new("make it camel");
    run("move end-line select\ncamel-case", &mut surface).await;
    assert_eq!(surface.text(), "makeItCamel");
    let selection = surface.selection();
    assert_eq!(surface.text_in(selection.range()), "makeItCamel");

    let mut surface = MemorySurface::new("a.b/c-d_e");
    run("move end-line select\nremove-punctuation", &mut surface).await;
    assert_eq!(surface.text(), "a b c d e");
}

#[tokio::test]
async fn conversions_chain_on_the_converted_text() {
    let mut surface = MemorySurface::new("Split Me");
    run("move end-line select\nsnake-syntax\nupper-case", &mut surface).await;
    assert_eq!(surface.text(), "SPLIT_ME");
}

#[tokio::test]
async fn case_conversion_needs_a_selection() {
    let mut surface = MemorySurface::new("abc");
    run("upper-case", &mut surface).await;
    assert_eq!(surface.text(), "abc");
}

#[tokio::test]
async fn select_trimmed_line_and_convert() {
    let mut surface = MemorySurface::new("  abc  ");
    run("select-trimmed-line\nupper-case", &mut surface).await;
    assert_eq!(surface.text(), "  ABC  ");
}

#[tokio::test]
async fn select_word_and_delete() {
    let mut surface = MemorySurface::new("hello world").with_cursor(Position::new(0, 1));
    run("select-word\ndelete", &mut surface).await;
    assert_eq!(surface.text(), " world");
}

#[tokio::test]
async fn swap_and_deselect() {
    let mut surface = MemorySurface::new("hello world");
    run("move right 5 select\nswap-selection", &mut surface).await;
    assert_eq!(
        surface.selection(),
        Selection::new(Position::new(0, 5), Position::new(0, 0))
    );

    run("deselect-end", &mut surface).await;
    assert_eq!(surface.selection(), Selection::caret(Position::new(0, 5)));
}

#[tokio::test]
async fn find_next_selects_following_match() {
    let mut surface = MemorySurface::new("cat dog cat");
    run("select-word\nfind-next\ndelete", &mut surface).await;
    assert_eq!(surface.text(), "cat dog ");
}

#[tokio::test]
async fn word_moves() {
    let mut surface = MemorySurface::new("one two  three");
    run("move next-word 2", &mut surface).await;
    assert_eq!(surface.selection().active, Position::new(0, 9));

    run("move previous-word", &mut surface).await;
    assert_eq!(surface.selection().active, Position::new(0, 4));

    run("move word-end", &mut surface).await;
    assert_eq!(surface.selection().active, Position::new(0, 7));

    run("move word-start select", &mut surface).await;
    let selection = surface.selection();
    assert_eq!(surface.text_in(selection.range()), "two");
}

#[tokio::test]
async fn offset_moves_clamp_at_document_start() {
    let mut surface = MemorySurface::new("ab\ncd").with_cursor(Position::new(0, 1));
    run("move forward 3", &mut surface).await;
    assert_eq!(surface.selection().active, Position::new(1, 1));

    run("move backward 10", &mut surface).await;
    assert_eq!(surface.selection().active, Position::new(0, 0));
}

#[tokio::test]
async fn empty_line_moves_step_once_per_count() {
    let mut surface = MemorySurface::new("a\n\nb\n\nc");
    run("move next-empty-line 2", &mut surface).await;
    assert_eq!(surface.selection().active, Position::new(3, 0));

    run("move previous-empty-line", &mut surface).await;
    assert_eq!(surface.selection().active, Position::new(1, 0));
}

#[tokio::test]
async fn trimmed_line_moves() {
    let mut surface = MemorySurface::new("   code();   ");
    run("move start-trimmed-line", &mut surface).await;
    assert_eq!(surface.selection().active, Position::new(0, 3));

    run("move end-trimmed-line select", &mut surface).await;
    let selection = surface.selection();
    assert_eq!(surface.text_in(selection.range()), "code();");
}

#[tokio::test]
async fn match_in_line_lands_on_requested_occurrence() {
    let mut surface = MemorySurface::new("abc abc abc");
    run("move match-in-line-forward [abc] 2", &mut surface).await;
    assert_eq!(surface.selection(), Selection::caret(Position::new(0, 4)));

    let mut surface = MemorySurface::new("abc abc abc");
    run("move match-in-line-forward [abc] 2 select", &mut surface).await;
    assert_eq!(
        surface.selection(),
        Selection::new(Position::new(0, 4), Position::new(0, 7))
    );
}

#[tokio::test]
async fn match_in_line_scans_other_lines() {
    let mut surface = MemorySurface::new("none here\nx abc");
    run("move match-in-line-forward [abc]", &mut surface).await;
    assert_eq!(surface.selection().active, Position::new(1, 2));

    let mut surface =
        MemorySurface::new("first\nabc abc abc\nzzz").with_cursor(Position::new(2, 1));
    run("move match-in-line-backward [abc]", &mut surface).await;
    assert_eq!(surface.selection().active, Position::new(1, 8));
}

#[tokio::test]
async fn match_in_line_without_match_leaves_cursor() {
    let mut surface = MemorySurface::new("abc\nabc").with_cursor(Position::new(0, 2));
    run("move match-in-line-forward [abc] 3", &mut surface).await;
    assert_eq!(surface.selection(), Selection::caret(Position::new(0, 2)));
}

#[tokio::test]
async fn surface_failures_do_not_stop_the_macro() {
    // The popped position no longer exists once the second line is deleted.
    let mut surface = MemorySurface::new("abc\ndef").with_cursor(Position::new(1, 3));
    let outcome = run(
        "push-position\nmove up select\ndelete\npop-position\n[!]",
        &mut surface,
    )
    .await;
    assert_eq!(outcome, PlayOutcome::Completed);
    assert_eq!(surface.text(), "abc!");
}

#[tokio::test]
async fn copy_line_and_trimmed_line() {
    let mut surface =
        MemorySurface::new("  let a = 1;  \nnext").with_cursor(Position::new(0, 5));
    run("copy-line", &mut surface).await;
    assert_eq!(surface.read_clipboard().as_deref(), Some("  let a = 1;  "));

    run("copy-trimmed-line", &mut surface).await;
    assert_eq!(surface.read_clipboard().as_deref(), Some("let a = 1;"));
}

#[tokio::test]
async fn select_line_then_convert() {
    let mut surface = MemorySurface::new("first\nsecond").with_cursor(Position::new(1, 2));
    run("select-line\nupper-case", &mut surface).await;
    assert_eq!(surface.text(), "first\nSECOND");
}

#[tokio::test]
async fn push_line_and_pop_elsewhere() {
    let mut surface = MemorySurface::new("alpha\nbeta").with_cursor(Position::new(0, 1));
    run(
        "push-line\nmove down\nmove end-line\n[ ]\npop-text",
        &mut surface,
    )
    .await;
    assert_eq!(surface.text(), "alpha\nbeta alpha");
}

#[tokio::test]
async fn deselect_start_collapses_to_leftmost_end() {
    let mut surface = MemorySurface::new("hello world").with_cursor(Position::new(0, 5));
    run("move left 3 select\ndeselect-start", &mut surface).await;
    assert_eq!(surface.selection(), Selection::caret(Position::new(0, 2)));
}

#[tokio::test]
async fn find_previous_selects_earlier_match() {
    let mut surface = MemorySurface::new("cat dog cat").with_cursor(Position::new(0, 9));
    run("select-word\nfind-previous\ndelete", &mut surface).await;
    assert_eq!(surface.text(), " dog cat");
}

#[tokio::test]
async fn line_and_character_moves() {
    let mut surface = MemorySurface::new("abcdef\nxyz").with_cursor(Position::new(1, 2));
    run(
        "move up\nmove end-line\nmove left 2\nmove start-line select",
        &mut surface,
    )
    .await;
    let selection = surface.selection();
    assert_eq!(selection.active, Position::new(0, 0));
    assert_eq!(surface.text_in(selection.range()), "abcd");
}

#[tokio::test]
async fn every_conversion_keyword_rewrites_selection() {
    let cases = [
        ("lower-case", "MiXeD", "mixed"),
        ("toggle-case", "Hello World", "hELLO wORLD"),
        ("title-case", "hello wORLD", "Hello World"),
        ("member-syntax", "a b c", "a.b.c"),
        ("kebab-syntax", "a b c", "a-b-c"),
        ("split-by-case", "camelCase", "camel Case"),
    ];
    for (keyword, input, expected) in cases {
        let mut surface = MemorySurface::new(input);
        run(&format!("move end-line select\n{keyword}"), &mut surface).await;
        assert_eq!(surface.text(), expected, "{keyword}");
    }
}
