use pencil_durability::prelude::*;
use pencil_durability::script;

#[test]
fn test_lowercase_write_spends_one_per_letter() {
    let mut pencil = Pencil::new();
    pencil.write("aaa", &mut Paper::new());
    assert_eq!(pencil.durability(), 17);
}

#[test]
fn test_write_runs_dull_on_last_letter() {
    let mut pencil = Pencil::new().with_durability(5);
    let mut paper = Paper::new();
    pencil.write("Aasdf", &mut paper);
    assert_eq!(paper.text(), "Aasd ");
}

#[test]
fn test_sharpen_restores_full_point() {
    let mut pencil = Pencil::new();
    pencil.write("AAAAAA", &mut Paper::new());
    pencil.sharpen();
    assert_eq!(pencil.durability(), 20);
}

#[test]
fn test_sharpen_without_length_keeps_dull_point() {
    let mut pencil = Pencil::new().with_length(0).with_durability(10);
    pencil.write("AAAA", &mut Paper::new());
    pencil.sharpen();
    assert_eq!(pencil.durability(), 2);
}

#[test]
fn test_erase_last_occurrence() {
    let mut pencil = Pencil::new();
    let mut paper = Paper::from_text("something goes in this something");
    pencil.erase("some", &mut paper).unwrap();
    assert_eq!(paper.text(), "something goes in this     thing");
}

#[test]
fn test_erase_until_eraser_wears_out() {
    let mut pencil = Pencil::new();
    let mut paper = Paper::from_text("this is a long sentence");
    pencil.erase("sentence", &mut paper).unwrap();
    assert_eq!(paper.text(), "this is a long sen     ");
}

#[test]
fn test_edit_over_written_text_marks_conflicts() {
    let pencil = Pencil::new();
    let mut paper = Paper::from_text("I sure hope this works");
    pencil.edit("it didn't work", 0, &mut paper).unwrap();
    assert_eq!(paper.text(), "@t@@@@n@@@@o@@is works");
    assert_eq!(paper.text().matches(CONFLICT_MARKER).count(), 11);
}

#[test]
fn test_paper_length_only_grows_by_writing() {
    let mut pencil = Pencil::new();
    let mut paper = Paper::from_text("An apple a day");
    let before = paper.len();
    pencil.erase("apple", &mut paper).unwrap();
    pencil.edit("onion", 3, &mut paper).unwrap();
    assert_eq!(paper.len(), before);
    pencil.write(" keeps", &mut paper);
    assert_eq!(paper.len(), before + 6);
}

#[test]
fn test_script_replays_a_full_session() {
    let source = "\
# draft a sentence, then fix a word
write She sells sea shells
sharpen
erase sea
edit 10 the
write \\nby the shore
";
    let steps = script::parse(source).unwrap();
    let mut pencil = Pencil::new().with_durability(30);
    let mut paper = Paper::new();
    script::run(&steps, &mut pencil, &mut paper).unwrap();
    assert_eq!(paper.text(), "She sells the shells\nby the shore");
    assert_eq!(pencil.length(), 9);
    assert_eq!(pencil.eraser_durability(), 2);
}

#[test]
fn test_script_reports_out_of_bounds_edit() {
    let steps = script::parse("write abc\nedit 2 xyz").unwrap();
    let mut pencil = Pencil::new();
    let mut paper = Paper::new();
    let err = script::run(&steps, &mut pencil, &mut paper).unwrap_err();
    assert_eq!(
        err.to_string(),
        "line 2: position 4 is out of bounds for paper of length 3"
    );
}
