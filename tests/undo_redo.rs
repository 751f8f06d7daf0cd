use mdnotes::MarkdownDocument;

const SOURCE: &str = "# Notes\n\nFirst paragraph with words\n\n- item one\n- item two\n\n```sh\necho hi\n\necho bye\n```\n\n> closing quote";

#[derive(Debug, Clone, Copy)]
enum Op {
    Update(usize),
    Insert(usize),
    Delete(usize),
    Split(usize, Option<usize>),
    Merge(usize, usize),
    Comment(usize),
    Undo,
}

fn apply(doc: &mut MarkdownDocument, op: Op, step: usize) {
    match op {
        Op::Update(i) => {
            doc.update_element(i, &format!("updated {step}"));
        }
        Op::Insert(i) => {
            doc.insert_element(i, &format!("inserted {step}"));
        }
        Op::Delete(i) => {
            doc.delete_element(i);
        }
        Op::Split(i, at) => {
            doc.split_element(i, at);
        }
        Op::Merge(a, b) => {
            doc.merge_elements(a, b);
        }
        Op::Comment(i) => {
            doc.add_comment_to_element(i, &format!("comment {step}"));
        }
        Op::Undo => {
            doc.undo();
        }
    }
}

fn assert_full_undo_redo_restores(ops: &[Op]) {
    let mut doc = MarkdownDocument::from_markdown(SOURCE);
    for (step, op) in ops.iter().enumerate() {
        apply(&mut doc, *op, step);
    }

    let before = doc.elements().to_vec();
    while doc.undo() {}
    while doc.redo() {}
    assert_eq!(doc.elements(), before.as_slice(), "ops: {ops:?}");
}

#[test]
fn test_undo_redo_round_trip_over_scripts() {
    let scripts: Vec<Vec<Op>> = vec![
        vec![Op::Update(0)],
        vec![Op::Update(1), Op::Insert(2), Op::Delete(0)],
        vec![Op::Split(1, Some(5)), Op::Merge(1, 2), Op::Comment(0)],
        vec![Op::Insert(0), Op::Undo, Op::Update(3), Op::Split(2, None)],
        vec![Op::Merge(3, 2), Op::Undo, Op::Undo, Op::Delete(4)],
        vec![Op::Comment(1), Op::Comment(1), Op::Update(1), Op::Merge(0, 1)],
        vec![Op::Delete(9), Op::Merge(0, 3), Op::Split(7, Some(1)), Op::Update(2)],
    ];

    for script in &scripts {
        assert_full_undo_redo_restores(script);
    }
}

#[test]
fn test_round_trip_survives_history_trimming() {
    let ops: Vec<Op> = (0..80).map(|i| Op::Update(i % 4)).collect();
    assert_full_undo_redo_restores(&ops);
}

#[test]
fn test_code_block_loads_as_one_element() {
    let doc = MarkdownDocument::from_markdown(SOURCE);
    assert_eq!(doc.element_count(), 5);
    assert_eq!(
        doc.element(3).unwrap().markdown_code(),
        "```sh\necho hi\n\necho bye\n```"
    );
}

#[test]
fn test_full_markdown_reloads_to_same_elements() {
    let mut doc = MarkdownDocument::from_markdown(SOURCE);
    doc.add_comment_to_element(2, "check list");

    let reloaded = MarkdownDocument::from_markdown(&doc.get_full_markdown());
    assert_eq!(reloaded.elements(), doc.elements());
}
